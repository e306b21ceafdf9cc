//! pcalc - interactive calculator
//!
//! Usage:
//!   pcalc              Start interactive REPL
//!   pcalc -c "cmd"     Execute a single command
//!   pcalc script.calc  Execute a script file

mod cli;
mod repl;
mod terminal;

use cli::{execute_command, execute_script, parse_args, print_help, print_version, USAGE_ERROR};
use pcalc::{config, logging, Calculator, Settings};
use repl::run_repl;
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("pcalc: {}", e);
            eprintln!("Try 'pcalc --help' for more information.");
            return ExitCode::from(USAGE_ERROR);
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    // .env.<environment> fills in variables before settings are read
    let env_file = config::load_env_file(Path::new("."), &config::environment())
        .unwrap_or_else(|e| {
            eprintln!("pcalc: {}", e);
            None
        });

    let mut settings = Settings::from_env();
    cli.apply(&mut settings);

    if let Err(e) = logging::init(&settings) {
        eprintln!("pcalc: {}", e);
    }
    tracing::debug!(environment = %settings.environment, env_file = ?env_file, "settings loaded");

    let mut calc = Calculator::from_settings(&settings);
    load_plugins(&mut calc, &settings);

    if let Some(cmd) = cli.command {
        return execute_command(&mut calc, &cmd);
    }

    if let Some(script) = cli.script {
        return execute_script(&mut calc, &script);
    }

    match run_repl(&mut calc, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "plugins")]
fn load_plugins(calc: &mut Calculator, settings: &Settings) {
    let Some(dir) = &settings.plugin_dir else {
        return;
    };
    if let Err(e) = pcalc::plugin::discover(dir, calc.registry_mut()) {
        tracing::warn!(dir = %dir.display(), error = %e, "plugin discovery failed");
    }
}

#[cfg(not(feature = "plugins"))]
fn load_plugins(_calc: &mut Calculator, _settings: &Settings) {}
