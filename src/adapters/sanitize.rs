//! Log sanitization for survey answers and secrets.
//!
//! Applied line by line to formatted log output. Redacts:
//! - Survey answers written as `Field=value` or `"Field": value`
//! - Email addresses and phone numbers
//! - Long hex or base64 runs (keys, seeds, signatures)
//!
//! Answers should never reach a log call in the first place (`RawAnswers`
//! and `AnswerValue` redact their `Debug` output). This writer catches
//! whatever slips through.
//!
//! Input per line is capped at `CARDIORISK_SANITIZE_MAX_BYTES` (default 16 KiB).

use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::FEATURE_NAMES;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: String,
}

struct Redactions {
    /// `Field=` / `"Field": ` prefix of an answer assignment.
    answer_key: Regex,
    set: RegexSet,
    rules: Vec<Redaction>,
}

static REDACTIONS: OnceLock<Redactions> = OnceLock::new();

fn redactions() -> &'static Redactions {
    REDACTIONS.get_or_init(|| {
        let fields = FEATURE_NAMES.join("|");
        // Patterns are static; a failure here is a programming error caught by tests.
        let answer_key = Regex::new(&format!(r#""?\b(?:{fields})\b"?\s*[:=]\s*"#))
            .expect("Valid regex");

        let rules: [(&str, &str); 4] = [
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
            (r"\b[0-9a-fA-F]{32,}\b", "[REDACTED-KEY]"),
            (r"\b[A-Za-z0-9+/]{40,}={0,2}", "[REDACTED-KEY]"),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = rules
            .iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement: (*replacement).to_string(),
            })
            .collect();

        Redactions {
            answer_key,
            set,
            rules,
        }
    })
}

/// Replace every answer value that follows a field key.
///
/// A quoted value ends at its closing quote. A bare value may contain spaces
/// and commas (most vocabulary labels do), so it runs until the next field
/// key, a closing bracket, or the end of the line.
fn redact_answers(answer_key: &Regex, input: &str) -> String {
    let keys: Vec<(usize, usize)> = answer_key
        .find_iter(input)
        .map(|m| (m.start(), m.end()))
        .collect();
    if keys.is_empty() {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    for (i, &(key_start, value_start)) in keys.iter().enumerate() {
        if key_start < cursor {
            // Inside a quoted value already redacted.
            continue;
        }

        let value_end = if let Some(quoted) = input[value_start..].strip_prefix('"') {
            quoted
                .find('"')
                .map_or(input.len(), |close| value_start + close + 2)
        } else {
            let next_key = keys.get(i + 1).map_or(input.len(), |&(start, _)| start);
            let bare = &input[value_start..next_key];
            let stop = bare.find(['\n', '\r', '}', ']', '"']).unwrap_or(bare.len());
            value_start + bare[..stop].trim_end_matches([' ', '\t', ',', ';']).len()
        };

        out.push_str(&input[cursor..key_start]);
        out.push_str("[REDACTED-ANSWER]");
        cursor = value_end;
    }
    out.push_str(&input[cursor..]);
    out
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CARDIORISK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact answers and secrets from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let redactions = redactions();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = redact_answers(&redactions.answer_key, prefix);
    for idx in redactions.set.matches(&out).into_iter() {
        let rule = &redactions.rules[idx];
        out = rule
            .regex
            .replace_all(&out, rule.replacement.as_str())
            .into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` that sanitizes every complete line before forwarding it.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }

        // A formatter that never emits a newline must not buffer without bound.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let rest = std::mem::take(&mut self.pending);
            self.write_sanitized(&rest)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.write_sanitized(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}
