// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use jointfund::{cli, commands};

fn setup_logging(level: Option<&String>) {
    let filter = match level {
        Some(l) => EnvFilter::try_new(l.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    setup_logging(matches.get_one::<String>("log_level"));

    match matches.subcommand() {
        Some(("summary", sub)) => commands::summary::handle(sub)?,
        Some(("records", sub)) => commands::records::handle(sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(sub)?,
        Some(("config", sub)) => commands::settings::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
