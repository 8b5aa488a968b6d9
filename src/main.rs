// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use salesclip::{cli, commands, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = match matches.get_one::<String>("config") {
        Some(path) => config::Config::from_path(path.trim())?,
        None => config::Config::load()?,
    };
    let _log_guard =
        logging::init_logging(matches.get_flag("verbose"), cfg.logging.file.as_deref());

    match matches.subcommand() {
        Some(("report", sub)) => commands::report::handle(&cfg, sub)?,
        Some(("bot", sub)) => commands::bot::handle(&cfg, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&cfg, sub)?,
        Some(("config-path", _)) => match matches.get_one::<String>("config") {
            Some(path) => println!("{}", path.trim()),
            None => println!("{}", config::config_path()?.display()),
        },
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
