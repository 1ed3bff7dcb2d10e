//! Structured JSON logger
//!
//! One line per event, written synchronously. Key order is deterministic:
//! `event` first, then `severity`, then the remaining fields alphabetized, so
//! identical operations always produce byte-identical log lines.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous JSON event logger.
///
/// INFO and below go to stdout, WARN and above to stderr.
pub struct Logger;

impl Logger {
    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Debug, event, fields, &mut io::stdout());
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields, &mut io::stdout());
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields, &mut io::stderr());
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields, &mut io::stderr());
    }

    fn emit<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let line = Self::format_line(severity, event, fields);
        // A failed write must not disturb the operation being logged
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        push_json_string(&mut line, event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, severity.as_str());

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }

        line.push_str("}\n");
        line
    }
}

fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = fmt::Write::write_fmt(out, format_args!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_line_is_valid_json_with_event_first() {
        let line = Logger::format_line(Severity::Info, "LOAD_COMPLETE", &[("records", "12")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "LOAD_COMPLETE");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["records"], "12");

        assert!(line.starts_with("{\"event\":"));
        assert!(line.ends_with("}\n"));
    }

    #[test]
    fn test_fields_are_alphabetized() {
        let a = Logger::format_line(
            Severity::Info,
            "E",
            &[("zulu", "1"), ("alpha", "2"), ("mike", "3")],
        );
        let b = Logger::format_line(
            Severity::Info,
            "E",
            &[("mike", "3"), ("alpha", "2"), ("zulu", "1")],
        );
        assert_eq!(a, b);
        assert!(a.find("alpha").unwrap() < a.find("mike").unwrap());
        assert!(a.find("mike").unwrap() < a.find("zulu").unwrap());
    }

    #[test]
    fn test_escaping() {
        let line = Logger::format_line(
            Severity::Warn,
            "PARSE_WARNING",
            &[("token", "bad\"value\nline2")],
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["token"], "bad\"value\nline2");
    }
}
