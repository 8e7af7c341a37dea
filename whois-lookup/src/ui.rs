//! Terminal display logic for whois-lookup.
//!
//! Draws a [`View`] as boxed two-column tables, the error banner, the
//! empty-input notice, and a spinner while a lookup is in flight. Uses only
//! the `console` crate for styling.

use console::{measure_text_width, pad_str, style, Alignment, Term};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use whois_lookup_lib::{DisplayMode, Table, View};

/// Text of the empty-input notice.
pub const EMPTY_INPUT_NOTICE: &str = "Please enter a domain name to search.";

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a spinner, or a no-op one when stderr is not a terminal.
    pub fn start(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        if !Term::stderr().is_term() {
            return Self {
                running,
                handle: None,
            };
        }

        let running_clone = running.clone();
        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print the banner shown when the interactive prompt starts.
pub fn print_header(mode: DisplayMode) {
    println!(
        "{} {} {}",
        style("whois-lookup").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style("type a domain to search, :help for commands").dim(),
    );
    print_mode_selector(mode);
    println!();
}

/// Show the three display modes with the active one highlighted.
pub fn print_mode_selector(mode: DisplayMode) {
    let labels = DisplayMode::ALL.map(|m| {
        let label = match m {
            DisplayMode::Domain => "Domain Info",
            DisplayMode::Contact => "Contact Info",
            DisplayMode::Both => "Both",
        };
        if m == mode {
            style(format!("[{}]", label)).cyan().bold().to_string()
        } else {
            style(format!(" {} ", label)).dim().to_string()
        }
    });
    println!("  {}", labels.join(" "));
}

// ── View ─────────────────────────────────────────────────────────────────────

/// Draw the current view to stdout.
pub fn print_view(view: &View) {
    match view {
        View::Empty => {}
        View::ErrorNotice { message } => {
            println!("  {}", style(message).red().bold());
            println!();
        }
        View::Tables { tables } => {
            for table in tables {
                print_table(table);
                println!();
            }
        }
    }
}

fn print_table(table: &Table) {
    println!("  {}", style(table.title).bold().underlined());
    for (i, line) in table_lines(table).iter().enumerate() {
        // header row is line 1
        if i == 1 {
            println!("  {}", style(line).bold());
        } else {
            println!("  {}", line);
        }
    }
}

/// Lay out a table as box-drawn lines, without styling.
pub fn table_lines(table: &Table) -> Vec<String> {
    const FIELD: &str = "Field";
    const INFO: &str = "Information";

    let label_width = table
        .rows
        .iter()
        .map(|(label, _)| measure_text_width(label))
        .chain(std::iter::once(FIELD.len()))
        .max()
        .unwrap_or(FIELD.len());
    let value_width = table
        .rows
        .iter()
        .map(|(_, value)| measure_text_width(value))
        .chain(std::iter::once(INFO.len()))
        .max()
        .unwrap_or(INFO.len());

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(label_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };
    let row = |label: &str, value: &str| {
        format!(
            "│ {} │ {} │",
            pad_str(label, label_width, Alignment::Left, None),
            pad_str(value, value_width, Alignment::Left, None)
        )
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 4);
    lines.push(rule("┌", "┬", "┐"));
    lines.push(row(FIELD, INFO));
    lines.push(rule("├", "┼", "┤"));
    for (label, value) in &table.rows {
        lines.push(row(label, value));
    }
    lines.push(rule("└", "┴", "┘"));
    lines
}

// ── Empty-input notice ───────────────────────────────────────────────────────

/// Lay out the notice as a framed block, without styling.
pub fn notice_lines() -> Vec<String> {
    let width = EMPTY_INPUT_NOTICE.len() + 2;
    vec![
        format!("┌{}┐", "─".repeat(width)),
        format!("│ {} │", pad_str("Error", width - 2, Alignment::Left, None)),
        format!("├{}┤", "─".repeat(width)),
        format!("│ {} │", EMPTY_INPUT_NOTICE),
        format!("└{}┘", "─".repeat(width)),
    ]
}

/// Show the notice and the dismissal hint.
pub fn print_notice() {
    for line in notice_lines() {
        println!("  {}", style(line).yellow());
    }
    println!("  {}", style("Press Enter to close").dim());
}

// ── JSON ─────────────────────────────────────────────────────────────────────

/// Machine-readable form of one lookup.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub query: &'a str,
    pub mode: DisplayMode,
    #[serde(flatten)]
    pub view: &'a View,
}

/// Print a lookup result as pretty JSON.
pub fn print_json(query: &str, mode: DisplayMode, view: &View) -> serde_json::Result<()> {
    let output = JsonOutput { query, mode, view };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
