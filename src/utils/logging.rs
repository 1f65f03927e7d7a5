// file: src/utils/logging.rs
// description: Tracing subscriber initialization and import status formatting

use crate::models::report::{ImportSummary, RowError, RowWarning};
use colored::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::new(level);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_row_warning(warning: &RowWarning) -> String {
    format!(
        "{} row {} [{}]: {}",
        "⚠".yellow().bold(),
        warning.row,
        warning.field,
        warning.message.yellow()
    )
}

pub fn format_row_error(error: &RowError) -> String {
    if error.row == 0 {
        format!("{} {}", "✗".red().bold(), error.message.red())
    } else {
        format!("{} row {}: {}", "✗".red().bold(), error.row, error.message.red())
    }
}

pub fn format_summary(summary: &ImportSummary) -> String {
    format!(
        "{} received | {} valid | {} warned | {} errors",
        summary.rows_received.to_string().cyan().bold(),
        summary.rows_valid.to_string().green().bold(),
        summary.rows_with_warnings.to_string().yellow().bold(),
        summary.rows_with_errors.to_string().red().bold()
    )
}
