// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::Context;
use statecraft::{attrs, StateFactory, StateRegistry};
use tracing_subscriber::EnvFilter;

/// Declares a demo web stack into `registry`
fn declare_demo(registry: &StateRegistry) -> anyhow::Result<()> {
    let pkg = StateFactory::new("pkg", registry);
    let file = StateFactory::new("file", registry);
    let service = StateFactory::new("service", registry);

    pkg.build("installed", "nginx", attrs! {})?;

    let managed = file.function("managed");
    managed.declare(
        "/etc/nginx/nginx.conf",
        attrs! {
            "source" => "salt://nginx/nginx.conf",
            "user" => "root",
            "group" => "root",
            "mode" => 644,
            "require" => pkg.reference("nginx"),
        },
    )?;
    managed.declare(
        "/var/www/index.html",
        attrs! {
            "contents" => "hello from statecraft",
            "makedirs" => true,
            "require_in" => service.reference("nginx-service"),
        },
    )?;

    service.build(
        "running",
        "nginx-service",
        attrs! {
            "name" => "nginx",
            "enable" => true,
            "watch" => file.reference("/etc/nginx/nginx.conf"),
        },
    )?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let json = match args.get(1).map(String::as_str) {
        None => false,
        Some("--json") => true,
        Some(other) => {
            eprintln!("Usage: {} [--json]", env!("CARGO_PKG_NAME"));
            anyhow::bail!("unknown argument '{}'", other);
        }
    };

    // The process-wide registry is resolved once here and passed down.
    let registry = StateRegistry::global();
    declare_demo(&registry).context("failed to declare demo states")?;

    let document = registry.serialize();
    let rendered = if json {
        serde_json::to_string_pretty(&document).context("failed to encode document as JSON")?
    } else {
        serde_yaml::to_string(&document).context("failed to encode document as YAML")?
    };
    println!("{}", rendered);

    Ok(())
}
