// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use anyhow::{Result, anyhow};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("init", sub)) => {
            let path = match sub.get_one::<String>("path") {
                Some(p) => PathBuf::from(p.trim()),
                None => config::config_path()?,
            };
            init(&path, sub.get_flag("force"))?;
            println!("Config written to {}", path.display());
        }
        Some(("show", sub)) => {
            let cfg = config::load(sub.get_one::<String>("config").map(Path::new))?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        Some(("path", _)) => {
            println!("{}", config::config_path()?.display());
        }
        _ => {}
    }
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    config::save_to(&Config::default(), path)
}
