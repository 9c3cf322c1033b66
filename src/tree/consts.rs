/// Attribute keys expressing ordering relationships between states.
/// Values under these keys are always stored as lists.
pub const DEPENDENCY_KEYS: [&str; 4] = ["require", "watch", "require_in", "watch_in"];
/// Joins a module name and an operation into a fully-qualified function (`file.managed`)
pub const FUNC_SEPARATOR: &str = ".";
