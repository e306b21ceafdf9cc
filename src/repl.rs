use pcalc::config::dirs_home;
use pcalc::{Calculator, Settings};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;

use crate::terminal::{execute_line, is_exit};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">>> ";

// ============================================
// CalcHelper: rustyline helper with tab completion and hints
// ============================================

/// Completes and hints command names
struct CalcHelper {
    commands: Vec<String>,
}

impl CalcHelper {
    fn new(calc: &Calculator) -> Self {
        let mut commands: Vec<String> = calc.registry().names().map(String::from).collect();
        commands.extend(["exit".to_string(), "quit".to_string()]);
        commands.sort();
        CalcHelper { commands }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.commands.iter().filter(move |c| c.starts_with(prefix))
    }
}

impl Helper for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only the command name is completed
        let prefix = &line[..pos];
        if prefix.contains(|c: char| c.is_whitespace() || c == '(') {
            return Ok((pos, Vec::new()));
        }

        let pairs = self
            .matching(prefix)
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();

        Ok((0, pairs))
    }
}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() {
            return None;
        }
        let mut candidates = self.matching(line);
        match (candidates.next(), candidates.next()) {
            (Some(only), None) if only.len() > line.len() => Some(only[line.len()..].to_string()),
            _ => None,
        }
    }
}

impl Highlighter for CalcHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        false
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for CalcHelper {}

// ============================================
// REPL main loop
// ============================================

pub(crate) fn run_repl(calc: &mut Calculator, settings: &Settings) -> RlResult<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CalcHelper::new(calc)));

    // Try to load line history
    let history_path = dirs_home().map(|h| h.join(".pcalc_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    if settings.banner {
        println!("pcalc-{} - interactive calculator", VERSION);
        println!("  Type 'menu' for commands, 'exit' or Ctrl-D to quit");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if is_exit(trimmed) {
                    break;
                }

                if let Err(e) = execute_line(calc, trimmed) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C - drop the line, keep going
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D - exit
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}
