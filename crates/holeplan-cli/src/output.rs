//! Output formatting shared by every `hp` subcommand.
//!
//! Commands build one serializable payload and hand it to [`render`] or
//! [`render_mode`] together with their human renderers. Errors go through
//! [`render_error`] so agents always get a stable JSON shape on stderr.
//!
//! # Mode selection
//!
//! First match wins:
//! 1. `--format`, or the hidden `--json` shorthand
//! 2. the `FORMAT` environment variable (`pretty`, `text`, `json`)
//! 3. [`OutputMode::Pretty`] when stdout is a terminal, else [`OutputMode::Text`]

use clap::ValueEnum;
use holeplan_core::error::{ConfigError, ErrorCode, InputError};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Environment variable consulted when no format flag is given.
const FORMAT_ENV: &str = "FORMAT";

/// Width of the rule printed under pretty section headings.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Print a dashed rule.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(PRETTY_RULE_WIDTH))
}

/// Print a heading and underline it.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Print `key:` padded to a fixed column, then the value.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    let label = format!("{key}:");
    writeln!(w, "{label:<18} {}", value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headings and aligned columns for a terminal.
    Pretty,
    /// Line-oriented output for pipes and scripts.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputMode {
    /// Parse a `FORMAT` value; unknown values yield `None`.
    fn from_env_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn pick_output_mode(
    flag: Option<OutputMode>,
    json: bool,
    env_value: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    flag.or_else(|| json.then_some(OutputMode::Json))
        .or_else(|| env_value.and_then(OutputMode::from_env_value))
        .unwrap_or(if stdout_is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Decide the output mode for this process.
pub fn resolve_output_mode(flag: Option<OutputMode>, json: bool) -> OutputMode {
    let env_value = std::env::var(FORMAT_ENV).ok();
    pick_output_mode(flag, json, env_value.as_deref(), io::stdout().is_terminal())
}

/// User-facing failure, printed to stderr.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// What to try next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    fn coded(message: String, code: ErrorCode) -> Self {
        Self {
            message,
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&InputError> for CliError {
    fn from(err: &InputError) -> Self {
        Self::coded(err.to_string(), err.code())
    }
}

impl From<&ConfigError> for CliError {
    fn from(err: &ConfigError) -> Self {
        Self::coded(err.to_string(), err.code())
    }
}

fn write_json<T: Serialize>(w: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

/// Write `value` to stdout, with separate text and pretty renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match mode {
        OutputMode::Json => write_json(&mut out, value)?,
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Write `value` to stdout; text and pretty share `human_fn`.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match mode {
        OutputMode::Json => write_json(&mut out, value)?,
        OutputMode::Pretty | OutputMode::Text => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// Write `error` as `{"error": {...}}` in JSON mode, else as plain lines.
pub fn write_error(w: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        return write_json(w, &serde_json::json!({ "error": error }));
    }
    writeln!(w, "error: {}", error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(w, "  suggestion: {suggestion}")?;
    }
    Ok(())
}

/// Write `error` to stderr.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    write_error(&mut io::stderr().lock(), mode, error)
}
