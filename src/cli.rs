// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn source_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("source")
            .long("source")
            .help("Sheet export URL or CSV path (overrides the config file)"),
    )
    .arg(
        Arg::new("config")
            .long("config")
            .help("Path to a config.json (defaults to the platform config dir)"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .help("Period to summarize as YYYY-MM (defaults to the current month)"),
    )
}

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("jointfund")
        .about("Shared household budget summary over a published spreadsheet export")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .help("Log filter (error, warn, info, debug, trace); RUST_LOG also works"),
        )
        .subcommand(output_args(source_args(
            Command::new("summary").about("Contributions, spending, reserve and obligation checklist"),
        )))
        .subcommand(output_args(source_args(
            Command::new("records")
                .about("Normalized transactions, newest first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Ignore the month filter"),
                ),
        )))
        .subcommand(output_args(source_args(
            Command::new("doctor").about("Report rows the normalizer dropped or repaired"),
        )))
        .subcommand(
            Command::new("config")
                .about("Manage the config file")
                .subcommand(
                    Command::new("init")
                        .about("Write the default config")
                        .arg(Arg::new("path").long("path"))
                        .arg(Arg::new("force").long("force").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print the effective config")
                        .arg(Arg::new("config").long("config")),
                )
                .subcommand(Command::new("path").about("Print the default config location")),
        )
}
