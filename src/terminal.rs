use pcalc::{display, Calculator, LineError};

/// Execute a single line of input and print its output.
///
/// Blank lines and `#` comments do nothing.
pub(crate) fn execute_line(calc: &mut Calculator, input: &str) -> Result<(), LineError> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('#') {
        return Ok(());
    }

    let output = calc.execute_line(input)?;
    println!("{}", display::format_output(&output, terminal_width()));
    Ok(())
}

/// `exit` or `quit`, alone on the line
pub(crate) fn is_exit(input: &str) -> bool {
    matches!(input.trim(), "exit" | "quit")
}

/// Get terminal width, defaulting to 80
pub(crate) fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}
