// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `fwissr` command-line tool.
//!
//! Looks up a key in the registry bootstrapped from the main configuration
//! directories, or dumps the whole merged tree.

use clap::{Arg, ArgAction, ArgMatches, Command};
use fwissr::bootstrap::Bootstrap;
use fwissr::domain::{ConfigValue, Result};
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("fwissr")
        .about("The configuration registry")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("key")
                .value_name("KEY")
                .help("Configuration key, e.g. '/fqdn'"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print result as JSON"),
        )
        .arg(
            Arg::new("inspect")
                .short('i')
                .long("inspect")
                .action(ArgAction::SetTrue)
                .help("Print 'inspected' result"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("Dump all keys and values"),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty output"),
        )
}

fn render(value: &ConfigValue, matches: &ArgMatches) -> String {
    if matches.get_flag("inspect") {
        format!("{:?}", value)
    } else if matches.get_flag("pretty") {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
    } else if matches.get_flag("json") {
        value.to_string()
    } else {
        // Bare strings print without quotes; everything else as JSON.
        match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        }
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let registry = Bootstrap::new().registry()?;

    if matches.get_flag("dump") {
        let dump = ConfigValue::Mapping(registry.dump()?);
        println!("{}", render(&dump, matches));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(key) = matches.get_one::<String>("key") else {
        eprintln!("Please specify the key, e.g. 'fwissr /fqdn'");
        return Ok(ExitCode::from(2));
    };

    match registry.get(key)? {
        Some(value) => {
            println!("{}", render(&value, matches));
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fwissr: {}", err);
            ExitCode::FAILURE
        }
    }
}
