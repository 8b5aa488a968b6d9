// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn csv_arg() -> Arg {
    Arg::new("csv")
        .long("csv")
        .value_name("PATH")
        .help("Read rows from a CSV export instead of the configured spreadsheet")
}

pub fn build_cli() -> Command {
    Command::new("salesclip")
        .about("Sales sheet digest: period reports printed or served by a chat bot")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Config file (default: $SALESCLIP_CONFIG or the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("report")
                .about("Summarise sales for a period")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(["week", "month", "all"])
                        .default_value("week"),
                )
                .arg(csv_arg())
                .arg(
                    Arg::new("today")
                        .long("today")
                        .value_name("YYYY-MM-DD")
                        .help("Override today's date"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("bot")
                .about("Answer Telegram /start, /myid and report buttons (long polling)")
                .arg(csv_arg()),
        )
        .subcommand(
            Command::new("doctor")
                .about("List rows the report would drop or only partly count")
                .arg(csv_arg()),
        )
        .subcommand(Command::new("config-path").about("Print the config file location"))
}
