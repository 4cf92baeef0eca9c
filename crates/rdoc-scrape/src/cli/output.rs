//! Shared CLI output formatting with colors, symbols, and structured display.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

/// Output switches chosen on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
}

static MODE: OnceLock<OutputMode> = OnceLock::new();

/// Record the output mode once at startup.
pub fn init(mode: OutputMode) {
    let _ = MODE.set(mode);
}

fn mode() -> OutputMode {
    MODE.get().copied().unwrap_or_default()
}

pub fn is_quiet() -> bool {
    mode().quiet
}

pub fn is_json() -> bool {
    mode().json
}

/// Styled report lines go to stderr, so color follows stderr.
pub fn color_enabled() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() || mode().no_color {
        return false;
    }
    std::io::stderr().is_terminal()
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Leading marker of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Warn,
    Dead,
}

impl Mark {
    fn parts(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Mark::Ok => (GREEN, "\u{2713}", "OK"),
            Mark::Warn => (YELLOW, "\u{26a0}", "??"),
            Mark::Dead => (RED, "\u{2717}", "!!"),
        }
    }
}

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    pub fn mark(&self, mark: Mark) -> String {
        let (color, symbol, ascii) = mark.parts();
        if self.use_color {
            self.paint(color, symbol)
        } else {
            ascii.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

/// Tool name and version, then a blank line.
pub fn print_header(s: &Styled) {
    eprintln!(
        "  {} {}",
        s.bold("rdoc-scrape"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

pub fn print_section(s: &Styled, title: &str) {
    eprintln!("  {}", s.bold(title));
}

/// One marked `label  value` line under a section.
pub fn print_line(s: &Styled, mark: Mark, label: &str, value: &str) {
    eprintln!("    {} {label:<16} {value}", s.mark(mark));
}

/// Closing `Status: ...` line.
pub fn print_status(s: &Styled, status: &str, msg: &str) {
    eprintln!();
    eprintln!("  {}: {status} ({msg})", s.bold("Status"));
}

/// Format a duration into human-readable form (e.g., "2m 14s").
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

/// Page progress bar for the feature crawl; hidden in quiet and JSON modes.
/// The crawler sets its length once the page count is known.
pub fn page_progress() -> ProgressBar {
    if is_quiet() || is_json() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("\u{2588}\u{2591} "));
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(134)), "2m 14s");
        assert_eq!(format_duration(Duration::from_secs(7_260)), "2h 1m");
    }

    #[test]
    fn test_uncolored_marks() {
        let s = Styled { use_color: false };
        assert_eq!(s.mark(Mark::Ok), "OK");
        assert_eq!(s.mark(Mark::Warn), "??");
        assert_eq!(s.mark(Mark::Dead), "!!");
        assert_eq!(s.green("done"), "done");
    }

    #[test]
    fn test_colored_marks() {
        let s = Styled { use_color: true };
        assert_eq!(s.mark(Mark::Dead), "\x1b[31m\u{2717}\x1b[0m");
        assert_eq!(s.bold("x"), "\x1b[1mx\x1b[0m");
    }
}
