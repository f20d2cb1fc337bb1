//! Tokenizer for command lines.
//!
//! Splits a line into whitespace-separated words. Single and double quotes
//! group words containing spaces and allow empty arguments (`""`). Arguments are
//! regular expressions, so backslashes are kept as typed; inside quotes only
//! `\<quote>` is unescaped.

use std::iter::Peekable;
use std::str::Chars;

/// Tokenizes a command line into words.
///
/// - `scan t1 "a b"` → `["scan", "t1", "a b"]`
/// - `list '' row` → `["list", "", "row"]`
/// - `get t1 "say \"hi\""` → `["get", "t1", "say \"hi\""]`
///
/// An unterminated quote runs to the end of the line.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }
        tokens.push(collect_word(&mut chars));
    }

    tokens
}

/// Collects one word, which may mix quoted and unquoted parts.
fn collect_word(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        chars.next();
        if c == '"' || c == '\'' {
            word.push_str(&collect_quoted(chars, c));
        } else {
            word.push(c);
        }
    }

    word
}

/// Collects characters up to the closing quote.
fn collect_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> String {
    let mut result = String::new();

    while let Some(c) = chars.next() {
        if c == quote {
            break;
        }
        if c == '\\' && chars.peek() == Some(&quote) {
            chars.next();
            result.push(quote);
            continue;
        }
        result.push(c);
    }

    result
}
