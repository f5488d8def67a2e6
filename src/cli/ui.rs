use super::error::CliError;
use colored::*;
use dialoguer::Confirm;
use tabled::{
    settings::{object::Rows, Color, Format, Modify, Style},
    Table, Tabled,
};

pub fn format_header(text: &str) -> String {
    format!("{}", text.blue().bold())
}

pub fn format_highlight(text: &str) -> String {
    format!("{}", text.cyan())
}

pub fn format_success(text: &str) -> String {
    format!("{}", text.green())
}

pub fn format_warning(text: &str) -> String {
    format!("{}", text.yellow())
}

/// Print rows as a borderless table with a bold coloured header.
pub fn print_table<T: Tabled>(title: &str, rows: Vec<T>) {
    println!("\n{}", format_header(title));
    if rows.is_empty() {
        println!("  {}", format_warning("(None)"));
        return;
    }

    let mut table = Table::new(rows);
    table
        .with(Style::blank())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN))
        .with(Modify::new(Rows::first()).with(Format::content(|s| s.bold().to_string())));
    println!("{}", table);
}

/// Ask before a destructive operation unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::OperationFailed(format!("Failed to get confirmation: {}", e)))
}
