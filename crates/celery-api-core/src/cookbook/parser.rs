//! Line parser for the `metadata.rb` declaration subset.
//!
//! Only the flat `keyword 'literal'[, 'literal']` form is understood, plus
//! the one Ruby expression metadata files use to pull in their README.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::CookbookError;

static README_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^IO\.read\(\s*File\.join\(\s*File\.dirname\(\s*__FILE__\s*\)\s*,\s*['"]([^'"]+)['"]\s*\)\s*\)$"#,
    )
    .expect("static regex")
});

/// The value side of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Value {
    /// One or more string literals.
    Literals(Vec<String>),
    /// Contents of a file next to the metadata file.
    SiblingFile(String),
}

/// One parsed declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Declaration {
    pub line: usize,
    pub keyword: String,
    pub value: Value,
}

/// Split `source` into declarations, skipping blanks and comments.
pub(super) fn parse_declarations(source: &str) -> Result<Vec<Declaration>, CookbookError> {
    let mut out = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        let split = text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(text.len());
        let (keyword, rest) = text.split_at(split);
        if keyword.is_empty() {
            return Err(syntax(line, format!("expected a declaration, found {text:?}")));
        }

        let mut rest = rest.trim();
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            rest = inner.trim();
        }
        if rest.is_empty() {
            return Err(syntax(line, format!("`{keyword}` has no value")));
        }

        let value = if let Some(caps) = README_EXPR.captures(rest) {
            Value::SiblingFile(caps[1].to_string())
        } else {
            Value::Literals(parse_literals(rest).map_err(|msg| syntax(line, msg))?)
        };

        out.push(Declaration {
            line,
            keyword: keyword.to_string(),
            value,
        });
    }
    Ok(out)
}

/// Read a sibling file referenced by `long_description`.
pub(super) fn read_sibling(base_dir: &Path, name: &str) -> Result<String, CookbookError> {
    let path = base_dir.join(name);
    if !path.is_file() {
        return Err(CookbookError::MissingReadme(path));
    }
    std::fs::read_to_string(&path).map_err(|source| CookbookError::Io { path, source })
}

fn syntax(line: usize, message: String) -> CookbookError {
    CookbookError::Syntax { line, message }
}

/// Drop a trailing `#` comment that is not inside a string literal.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '#' => return &line[..i],
            None => {}
        }
    }
    line
}

/// Parse `'a', "b"` into its literal values.
fn parse_literals(input: &str) -> Result<Vec<String>, String> {
    let mut values = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(quote) = chars.next() else {
            return Err("expected a string literal".to_string());
        };
        if quote != '\'' && quote != '"' {
            return Err(format!("expected a quoted string, found {quote:?}"));
        }

        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(next) if next == quote || next == '\\' => value.push(next),
                    Some(next) => {
                        value.push('\\');
                        value.push(next);
                    }
                    None => break,
                }
            } else if c == quote {
                closed = true;
                break;
            } else {
                value.push(c);
            }
        }
        if !closed {
            return Err("unterminated string literal".to_string());
        }
        values.push(value);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => return Ok(values),
            Some(',') => {}
            Some(c) => return Err(format!("unexpected {c:?} after string literal")),
        }
    }
}
