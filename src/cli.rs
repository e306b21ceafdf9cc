use pcalc::{Calculator, Settings};
use crate::terminal::{execute_line, is_exit};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for bad command-line usage
pub(crate) const USAGE_ERROR: u8 = 2;

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) history: Option<PathBuf>,
    pub(crate) plugins: Option<PathBuf>,
    pub(crate) no_plugins: bool,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the command
                if i + 1 >= args.len() {
                    return Err("-c requires a command".to_string());
                }
                cli.command = Some(args[i + 1..].join(" "));
                break;
            }
            "--history" => {
                i += 1;
                let path = args.get(i).ok_or("--history requires a path")?;
                cli.history = Some(PathBuf::from(path));
            }
            "--plugins" => {
                i += 1;
                let dir = args.get(i).ok_or("--plugins requires a directory")?;
                cli.plugins = Some(PathBuf::from(dir));
            }
            "--no-plugins" => {
                cli.no_plugins = true;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option '{}'", flag));
            }
            path => {
                if cli.script.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                cli.script = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(cli)
}

impl CliArgs {
    /// Apply command-line overrides on top of environment settings
    pub(crate) fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.history {
            settings.history_file = path.clone();
        }
        if self.no_plugins {
            settings.plugin_dir = None;
        } else if let Some(dir) = &self.plugins {
            settings.plugin_dir = Some(dir.clone());
        }
    }
}

pub(crate) fn print_help() {
    println!(
        r#"pcalc-{} - interactive calculator

USAGE:
    pcalc                   Start interactive REPL
    pcalc -c <command>      Execute a single command
    pcalc <script>          Execute commands from a file, one per line
    pcalc --help            Show this help message
    pcalc --version         Show version

OPTIONS:
    --history <path>        Default file for save_history/load_history
    --plugins <dir>         Load plugins from <dir>
    --no-plugins            Skip plugin discovery

SYNTAX:
    add(5, 3)               Call syntax, comma separated
    add 5 3                 Word syntax, whitespace separated
    save_history("a b.csv") Quote arguments containing spaces
    exit, quit              Leave the REPL (or Ctrl-D)

COMMANDS:
    add subtract multiply divide    Two operands
    sin cos tan sqrt                One operand
    display_history                 Show recorded calculations
    save_history [path]             Write history as CSV
    load_history [path]             Replace history from CSV
    clear_history                   Forget all calculations
    last_calculation                Show the most recent calculation
    menu                            List every registered command

ENVIRONMENT:
    PCALC_ENV               Environment name; loads .env.<name> (development)
    PCALC_HISTORY_FILE      Default history file (history.csv)
    PCALC_PLUGIN_DIR        Plugin directory (~/.pcalc/plugins)
    PCALC_LOG               Log filter, e.g. debug or pcalc=info (warn)
    PCALC_LOG_FILE          Write logs to this file instead of stderr
                            (development: logs/development_calculator.log)
    PCALC_BANNER=1          Show startup banner"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("pcalc {}", VERSION);
}

/// Execute a single command
pub(crate) fn execute_command(calc: &mut Calculator, cmd: &str) -> ExitCode {
    match execute_line(calc, cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a script file line by line, stopping at the first failure
pub(crate) fn execute_script(calc: &mut Calculator, path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    for (n, line) in content.lines().enumerate() {
        if is_exit(line) {
            break;
        }
        if let Err(e) = execute_line(calc, line) {
            eprintln!("Error: {}:{}: {}", path, n + 1, e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
