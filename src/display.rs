//! Display formatting for command output
//!
//! Numbers print without trailing zeros (`10.0` shows as `10`), and the history renders as a
//! box-drawn table when shown in the terminal.

use rust_decimal::Decimal;

use crate::command::Output;
use crate::history::{HistoryEntry, HistoryView};

/// Format a number for display, without trailing zeros
pub fn format_number(n: Decimal) -> String {
    n.normalize().to_string()
}

/// Entry count with the right noun: "1 entry", "3 entries"
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", count)
    }
}

/// Format a command's output for terminal display
pub fn format_output(output: &Output, max_width: usize) -> String {
    match output {
        Output::History(entries) if !entries.is_empty() => format_history(entries, max_width),
        other => other.to_string(),
    }
}

/// Format history entries as a table with box-drawing characters
pub fn format_history(entries: &[HistoryEntry], max_width: usize) -> String {
    if entries.is_empty() {
        return HistoryView::EMPTY_MESSAGE.to_string();
    }

    let columns = ["#", "operation", "operand_a", "operand_b", "result"];
    let rows: Vec<[String; 5]> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            [
                (i + 1).to_string(),
                e.operation.clone(),
                format_number(e.operand_a),
                e.operand_b.map(format_number).unwrap_or_default(),
                format_number(e.result),
            ]
        })
        .collect();

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    // Cap individual column widths
    let max_col_width = 24;
    for w in &mut widths {
        *w = (*w).min(max_col_width);
    }

    // Scale down if total exceeds max_width
    let padding = widths.len() * 3 + 1;
    let content: usize = widths.iter().sum();
    if content + padding > max_width && max_width > padding {
        let scale = (max_width - padding) as f64 / content as f64;
        for w in &mut widths {
            *w = ((*w as f64 * scale) as usize).max(3);
        }
    }

    let mut out = String::new();

    // Top border
    out.push_str(&border('┌', '┬', '┐', &widths));
    out.push('\n');

    // Header row
    out.push_str("\x1b[90m│\x1b[0m");
    for (col, w) in columns.iter().zip(&widths) {
        out.push_str(&format!(
            " \x1b[1m{:width$}\x1b[0m \x1b[90m│\x1b[0m",
            truncate_str(col, *w),
            width = *w
        ));
    }
    out.push('\n');

    // Header separator
    out.push_str(&border('├', '┼', '┤', &widths));
    out.push('\n');

    // Data rows, numbers right-aligned
    for row in &rows {
        out.push_str("\x1b[90m│\x1b[0m");
        for (i, (cell, w)) in row.iter().zip(&widths).enumerate() {
            let cell = truncate_str(cell, *w);
            if i == 1 {
                out.push_str(&format!(" {:<width$} \x1b[90m│\x1b[0m", cell, width = *w));
            } else {
                out.push_str(&format!(" {:>width$} \x1b[90m│\x1b[0m", cell, width = *w));
            }
        }
        out.push('\n');
    }

    // Bottom border
    out.push_str(&border('└', '┴', '┘', &widths));

    // Row count
    out.push_str(&format!("\n\x1b[90m({})\x1b[0m", format_count(rows.len())));

    out
}

fn border(left: char, mid: char, right: char, widths: &[usize]) -> String {
    let mut line = String::from("\x1b[90m");
    line.push(left);
    for (i, w) in widths.iter().enumerate() {
        line.push_str(&"─".repeat(*w + 2));
        if i < widths.len() - 1 {
            line.push(mid);
        }
    }
    line.push(right);
    line.push_str("\x1b[0m");
    line
}

/// Truncate a string to max width, adding ellipsis if needed
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        ".".to_string()
    } else {
        let kept: String = s.chars().take(max_width - 1).collect();
        format!("{}…", kept)
    }
}
