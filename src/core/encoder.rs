//! Line-interpreter payload encoding
//!
//! The remote `cmd.exe` session only accepts one command per line, so every
//! file we need on the target is re-expressed as a run of `echo.` commands
//! placed inside a redirected `( ... )` block. Characters the interpreter
//! would treat as redirection, piping, chaining or grouping are caret-escaped.
//!
//! Inside a double-quoted span `cmd.exe` takes every character literally,
//! carets included, so quoted spans are copied through untouched. A quote
//! left open runs to the end of the line.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Command prefix that makes `cmd.exe` print the rest of the line verbatim,
/// including an empty remainder
pub const ECHO_PREFIX: &str = "echo.";

/// Escape character of the batch interpreter
pub const ESCAPE_CHAR: char = '^';

/// Characters that must be escaped outside a quoted span
pub const SPECIAL_CHARS: &[char] = &['(', ')', '<', '>', '|', '&', '^'];

static SPECIAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()<>|&^]").expect("Invalid special character pattern"));

// A quoted span (possibly unterminated) or a run of unquoted text.
static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"?|[^"]+"#).expect("Invalid segment pattern"));

/// Escape batch special characters in a single line
pub fn escape_line(line: &str) -> String {
    SEGMENT_PATTERN
        .find_iter(line)
        .map(|segment| {
            let text = segment.as_str();
            if text.starts_with('"') {
                Cow::Borrowed(text)
            } else {
                SPECIAL_PATTERN.replace_all(text, "^$0")
            }
        })
        .collect()
}

/// Encode arbitrary text as `echo.` commands, one per original line
///
/// Lines are split with [`str::lines`], so `\r\n` endings are normalized and
/// a trailing newline does not produce an extra command. Blank and
/// whitespace-only lines still get their own command. Empty input produces
/// empty output.
pub fn escape_and_echo(text: &str) -> String {
    text.lines()
        .map(|line| format!("{ECHO_PREFIX}{}", escape_line(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of commands [`escape_and_echo`] emits for `text`
pub fn command_count(text: &str) -> usize {
    text.lines().count()
}
