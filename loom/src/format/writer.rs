//! Token-level output buffer with lazy indentation and automatic spacing.

use typeloom_catalog::names::{is_identifier_part, is_identifier_start};

use super::{Indent, LineEnding};

/// Closes a type-argument list. Printed as `>` only when the buffer is
/// finished, so the spacing rules can tell it apart from the operator.
pub const CLOSE_TYPE_ARGS: char = '\u{FFFF}';

/// Whether a space separates a token ending in `prev` from one starting
/// with `next`.
pub(crate) fn needs_space(prev: char, next: char) -> bool {
    if next == CLOSE_TYPE_ARGS {
        return false;
    }
    if prev == CLOSE_TYPE_ARGS {
        // `List<String> x`, but `new Foo<Bar>()` and `Map<K, List<V>>`
        return !matches!(next, '(' | ')' | ',' | ';' | '.' | '[');
    }
    if prev == ']' && next == '{' {
        return true;
    }
    if prev == ';' {
        return true;
    }
    if prev == ')' && next == '{' {
        return true;
    }
    if prev == ',' || prev == '=' {
        return true;
    }
    if next == '=' {
        return true;
    }
    if prev.is_ascii_digit() {
        return !matches!(next, '(' | ')' | ';' | ',');
    }
    if is_identifier_part(prev) {
        return matches!(next, '{' | '}' | '+' | '-' | '>' | '@') || is_identifier_start(next);
    }
    if is_identifier_start(next) {
        return matches!(prev, ']' | ')' | '}' | '+');
    }
    if next.is_ascii_digit() {
        return prev != '(';
    }
    false
}

/// Output buffer of a [`Formatter`](super::Formatter).
#[derive(Debug, Clone)]
pub(crate) struct SourceWriter {
    buffer: String,
    indent: Indent,
    depth: usize,
    last: Option<char>,
    at_line_start: bool,
    force_space: bool,
}

impl SourceWriter {
    pub fn new(indent: Indent) -> Self {
        Self {
            buffer: String::new(),
            indent,
            depth: 0,
            last: None,
            at_line_start: true,
            force_space: false,
        }
    }

    /// Append a token, preceded by indentation or a separating space.
    pub fn token(&mut self, s: &str) {
        let Some(first) = s.chars().next() else {
            return;
        };
        if self.at_line_start {
            for _ in 0..self.depth {
                self.indent.push_to(&mut self.buffer);
            }
            self.at_line_start = false;
        } else if let Some(last) = self.last {
            if first != CLOSE_TYPE_ARGS && (self.force_space || needs_space(last, first)) {
                self.buffer.push(' ');
            }
        }
        self.force_space = false;
        self.buffer.push_str(s);
        self.last = s.chars().next_back();
    }

    /// Separate the next token by a space regardless of the spacing rules.
    pub fn space(&mut self) {
        self.force_space = true;
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
        self.last = None;
        self.at_line_start = true;
        self.force_space = false;
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the writer, resolving sentinels and line endings.
    pub fn finish(self, line_ending: LineEnding) -> String {
        let text = self.buffer.replace(CLOSE_TYPE_ARGS, ">");
        match line_ending {
            LineEnding::Lf => text,
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}
