//! validate-user - check a user request body against the user rules.
//!
//! Reads a JSON body from a file or STDIN, validates it under the selected
//! group and prints either `valid` or the error envelope.
//!
//! ```text
//! $ validate-user --group create user.json
//! $ cat user.json | validate-user --group update
//! ```

use armature_users::logging::{LogConfig, LogFormat};
use armature_users::prelude::*;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// Validate a user request body
#[derive(Parser)]
#[command(name = "validate-user")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Validate a user request body against the create/update rules")]
struct Cli {
    /// JSON file to read; STDIN when omitted
    file: Option<PathBuf>,

    /// Validation group to check under
    #[arg(short, long, value_enum, default_value_t = Group::Create)]
    group: Group,

    /// Validator configuration file (TOML or JSON)
    #[arg(short, long, env = "ARMATURE_VALIDATION_CONFIG")]
    config: Option<PathBuf>,

    /// Plain log output instead of JSON
    #[arg(long)]
    plain_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Group {
    /// Rules of the create request
    Create,
    /// Rules of the update request
    Update,
    /// Rules declared without a group
    Default,
}

impl Group {
    fn ids(self) -> Vec<GroupId> {
        match self {
            Group::Create => vec![GroupId::ON_CREATE],
            Group::Update => vec![GroupId::ON_UPDATE],
            Group::Default => Vec::new(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    LogConfig::new()
        .level(if cli.verbose { "debug" } else { "warn" })
        .format(if cli.plain_logs {
            LogFormat::Plain
        } else {
            LogFormat::Json
        })
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, String> {
    let config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path),
        None => ValidatorConfig::from_env(),
    }
    .map_err(|e| e.to_string())?;

    let validation = UserValidation::with_config(config).map_err(|e| e.to_string())?;
    let body = read_body(cli.file.as_ref()).map_err(|e| e.to_string())?;

    let user: UserRequest = match serde_json::from_slice(&body) {
        Ok(user) => user,
        Err(e) => {
            let err = UserError::InvalidBody(e.to_string());
            print_json(&err.body());
            return Ok(false);
        }
    };

    let report = validation.check(&user, &cli.group.ids());
    if report.is_valid() {
        println!("valid");
        Ok(true)
    } else {
        print_json(&UserError::from(report).body());
        Ok(false)
    }
}

fn read_body(file: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match file {
        Some(path) => std::fs::read(path),
        None => {
            let mut body = Vec::new();
            io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
