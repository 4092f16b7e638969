//! Mustache-style variable substitution for `.hbs` template files.
//!
//! Supported syntax:
//!
//! - `{{ key }}` inserts the HTML-escaped answer for `key`
//! - `{{{ key }}}` and `{{& key }}` insert it unescaped
//! - `{{~ key }}` / `{{ key ~}}` also strip whitespace before / after the tag
//! - `{{! note }}` and `{{!-- note --}}` are comments and produce nothing
//! - `\{{` produces a literal `{{`
//!
//! A key with no answer renders as the empty string. Block and partial tags
//! (`{{#if}}`, `{{/if}}`, `{{^x}}`, `{{> p}}`, `{{else}}`) are kept verbatim in the output.

use std::fmt;

use crate::answers::Answers;

/// A malformed construct in a template, located by 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.column)
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    pub(crate) fn at(text: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(text, offset);
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Render `text` against `scope`.
pub fn render(text: &str, scope: &Answers) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut trim_next = false;

    while let Some(found) = text[pos..].find("{{") {
        let open = pos + found;
        let mut literal = &text[pos..open];
        if std::mem::take(&mut trim_next) {
            literal = literal.trim_start();
        }

        match count_trailing_backslashes(literal) {
            // `\{{`: literal braces, the rest of the mustache is plain text
            1 => {
                out.push_str(&literal[..literal.len() - 1]);
                out.push_str("{{");
                pos = open + 2;
                continue;
            }
            // `\\{{`: one literal backslash, then a real mustache
            2 => out.push_str(&literal[..literal.len() - 1]),
            _ => out.push_str(literal),
        }

        let after = &text[open + 2..];

        if let Some(body) = after.strip_prefix('{') {
            let end = body
                .find("}}}")
                .ok_or_else(|| RenderError::at(text, open, "unterminated `{{{` expression"))?;
            let (key, trim_before, trim_after) = whitespace_control(body[..end].trim());
            if key.is_empty() {
                return Err(RenderError::at(text, open, "empty expression"));
            }
            if trim_before {
                trim_end_in_place(&mut out);
            }
            trim_next = trim_after;
            out.push_str(scope.get(key).unwrap_or(""));
            pos = open + 3 + end + 3;
            continue;
        }

        if let Some(body) = after.strip_prefix("!--") {
            let end = body
                .find("--}}")
                .ok_or_else(|| RenderError::at(text, open, "unterminated comment"))?;
            pos = open + 5 + end + 4;
            continue;
        }

        let end = after
            .find("}}")
            .ok_or_else(|| RenderError::at(text, open, "unterminated `{{` expression"))?;
        let tag = &text[open..open + 2 + end + 2];
        let (expr, trim_before, trim_after) = whitespace_control(after[..end].trim());
        pos = open + 2 + end + 2;

        match expr.chars().next() {
            None => return Err(RenderError::at(text, open, "empty expression")),
            Some('#' | '/' | '^' | '>') => out.push_str(tag),
            Some(_) if expr == "else" => out.push_str(tag),
            Some(sigil) => {
                if trim_before {
                    trim_end_in_place(&mut out);
                }
                trim_next = trim_after;
                match sigil {
                    '!' => {}
                    '&' => {
                        let key = expr[1..].trim();
                        if key.is_empty() {
                            return Err(RenderError::at(text, open, "empty expression"));
                        }
                        out.push_str(scope.get(key).unwrap_or(""));
                    }
                    // `{{~{ key }~}}`: the triple-stash form with whitespace control
                    '{' => {
                        let key = expr[1..]
                            .strip_suffix('}')
                            .ok_or_else(|| {
                                RenderError::at(text, open, "unterminated `{{{` expression")
                            })?
                            .trim();
                        if key.is_empty() {
                            return Err(RenderError::at(text, open, "empty expression"));
                        }
                        out.push_str(scope.get(key).unwrap_or(""));
                    }
                    _ => escape_html_into(scope.get(expr).unwrap_or(""), &mut out),
                }
            }
        }
    }

    let tail = &text[pos..];
    out.push_str(if trim_next { tail.trim_start() } else { tail });
    Ok(out)
}

/// Split `~` markers off an expression: `(key, trim_before, trim_after)`.
fn whitespace_control(expr: &str) -> (&str, bool, bool) {
    let (expr, before) = match expr.strip_prefix('~') {
        Some(rest) => (rest, true),
        None => (expr, false),
    };
    let (expr, after) = match expr.strip_suffix('~') {
        Some(rest) => (rest, true),
        None => (expr, false),
    };
    (expr.trim(), before, after)
}

fn trim_end_in_place(out: &mut String) {
    let len = out.trim_end().len();
    out.truncate(len);
}

fn count_trailing_backslashes(s: &str) -> usize {
    s.bytes().rev().take_while(|&b| b == b'\\').take(2).count()
}

/// Same character set and entities as handlebars' `escapeExpression`.
fn escape_html_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
}

pub(crate) fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
