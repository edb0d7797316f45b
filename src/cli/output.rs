//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (#, Title, Username, URL, Updated) in vault order.
pub fn print_entries_table(entries: &[Entry]) {
    if entries.is_empty() {
        info("No password entries found.");
        tip("Run `pm add <TITLE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Title", "Username", "URL", "Updated"]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.title.clone(),
            e.username.clone(),
            e.url.clone().unwrap_or_default(),
            e.updated_at.format(TIME_FORMAT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print the fields of one entry.
///
/// `password_line` replaces the password value, e.g. with a clipboard note.
pub fn print_entry(entry: &Entry, password_line: &str) {
    println!("{} {}", style("Title:").bold(), entry.title);
    println!("{} {}", style("Username:").bold(), entry.username);
    println!("{} {}", style("Password:").bold(), password_line);
    if let Some(url) = &entry.url {
        println!("{} {}", style("URL:").bold(), url);
    }
    if let Some(notes) = &entry.notes {
        println!("{} {}", style("Notes:").bold(), notes);
    }
    println!(
        "{} {}",
        style("Created:").bold(),
        entry.created_at.format(TIME_FORMAT)
    );
    println!(
        "{} {}",
        style("Updated:").bold(),
        entry.updated_at.format(TIME_FORMAT)
    );
}
