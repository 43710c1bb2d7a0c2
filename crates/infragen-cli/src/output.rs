//! Everything the commands print to stdout goes through [`OutputManager`].
//!
//! Status lines carry a one-character marker (`✓ ✗ ⚠ ℹ`). Colour is used
//! only for `human` output on a terminal; `plain` and `json` stay
//! byte-stable for scripts.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Info,
}

impl Tone {
    const fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Failure => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    /// Failures are shown even under `--quiet`.
    const fn always_shown(self) -> bool {
        matches!(self, Self::Failure)
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format auto` becomes `human` on a terminal and `plain`
    /// otherwise. `--no-color`, `NO_COLOR` or `output.no_color` turn colour
    /// off.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Failure, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    /// Section title, e.g. `Recommendations:`.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&text.cyan().bold().to_string())
        } else {
            self.term.write_line(text)
        }
    }

    /// Pretty JSON on stdout. Not affected by `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet && !tone.always_shown() {
            return Ok(());
        }
        self.term.write_line(&status_line(tone, msg, self.color))
    }
}

fn status_line(tone: Tone, msg: &str, color: bool) -> String {
    let marker = tone.marker();
    if !color {
        return format!("{marker} {msg}");
    }
    match tone {
        Tone::Success => format!("{} {}", marker.green().bold(), msg.green()),
        Tone::Failure => format!("{} {}", marker.red().bold(), msg.red()),
        Tone::Warning => format!("{} {}", marker.yellow().bold(), msg.yellow()),
        Tone::Info => format!("{} {}", marker.blue().bold(), msg.blue()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
            log_file: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_status_lines_have_markers_only() {
        assert_eq!(status_line(Tone::Success, "done", false), "\u{2713} done");
        assert_eq!(status_line(Tone::Failure, "broke", false), "\u{2717} broke");
        assert_eq!(status_line(Tone::Warning, "careful", false), "\u{26a0} careful");
        assert_eq!(status_line(Tone::Info, "fyi", false), "\u{2139} fyi");
    }

    #[test]
    fn coloured_status_lines_keep_the_message() {
        let line = status_line(Tone::Warning, "careful", true);
        assert!(line.contains("careful"));
        assert!(line.contains('\u{1b}'));
    }

    #[test]
    fn only_failures_survive_quiet() {
        assert!(Tone::Failure.always_shown());
        assert!(!Tone::Success.always_shown());
        assert!(!Tone::Warning.always_shown());
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.quiet);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn colour_needs_human_format_and_no_opt_out() {
        assert!(manager(false, false, OutputFormat::Human).color);
        assert!(!manager(false, true, OutputFormat::Human).color);
        assert!(!manager(false, false, OutputFormat::Plain).color);
        assert!(!manager(false, false, OutputFormat::Json).color);

        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
            log_file: None,
        };
        assert!(!OutputManager::new(&args, &config).color);
    }

    #[test]
    fn explicit_format_is_kept() {
        let out = manager(false, false, OutputFormat::Json);
        assert_eq!(out.format, OutputFormat::Json);
        assert!(out.is_json());
    }

    #[test]
    fn json_writes_without_error() {
        let out = manager(true, true, OutputFormat::Json);
        assert!(out.json(&serde_json::json!({"ok": true})).is_ok());
    }
}
