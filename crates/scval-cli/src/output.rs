use std::io::Write;
use std::sync::OnceLock;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// A bold, colored line on stdout.
pub fn heading(text: &str) -> anyhow::Result<()> {
    let mut out = stdout();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(out, "{text}")?;
    out.reset()?;
    writeln!(out)?;
    Ok(())
}

/// `key: value` with the key highlighted.
pub fn field(key: &str, value: &str) -> anyhow::Result<()> {
    let mut out = stdout();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{key}")?;
    out.reset()?;
    writeln!(out, ": {value}")?;
    Ok(())
}

pub fn line(text: &str) {
    println!("{text}");
}

pub fn error_line(msg: &str) {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
    let _ = write!(err, "{msg}");
    let _ = err.reset();
    let _ = writeln!(err);
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
