//! Rewrite template parsing and expansion.
//!
//! # Responsibilities
//! - Parse `$1`-style templates into a token sequence
//! - Expand tokens against regex captures at request time
//!
//! # Design Decisions
//! - Templates are tokenized once at load; expansion never re-scans for `$`
//! - Group references are `$1`, `$2`, ...; `$$` escapes a literal dollar
//! - A group that did not participate in the match expands to ""
//! - Malformed templates are a load-time error, never a request-time one

use regex::Captures;

/// A single piece of a parsed rewrite template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Verbatim text.
    Literal(String),
    /// Positional reference to a capture group (1-based).
    Group(usize),
}

/// Error produced while tokenizing a rewrite template.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("dangling '$' at end of template")]
    DanglingDollar,
    #[error("'$' must be followed by a group number or '$', found {0:?}")]
    BadReference(char),
    #[error("group references start at $1; $0 is not valid")]
    GroupZero,
}

/// A parsed rewrite template.
#[derive(Debug, Clone)]
pub struct RewriteTemplate {
    tokens: Vec<Token>,
}

impl RewriteTemplate {
    /// Tokenize a template string.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }
            match chars.peek() {
                None => return Err(TemplateError::DanglingDollar),
                Some('$') => {
                    chars.next();
                    literal.push('$');
                }
                Some(d) if d.is_ascii_digit() => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek() {
                        if d.is_ascii_digit() {
                            digits.push(*d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    // usize overflow is unreachable here; templates are short
                    // and the group count check rejects huge indexes anyway.
                    let index: usize =
                        digits.parse().map_err(|_| TemplateError::GroupZero)?;
                    if index == 0 {
                        return Err(TemplateError::GroupZero);
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(Token::Group(index));
                }
                Some(other) => return Err(TemplateError::BadReference(*other)),
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self { tokens })
    }

    /// Highest group index referenced, or 0 for a pure-literal template.
    pub fn max_group(&self) -> usize {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Group(i) => Some(*i),
                Token::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Expand against regex captures.
    ///
    /// Groups that matched nothing substitute as the empty string. The raw
    /// result may be empty or missing a leading slash; callers normalize.
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Group(i) => {
                    if let Some(m) = caps.get(*i) {
                        out.push_str(m.as_str());
                    }
                }
            }
        }
        out
    }

    /// Expand a template with no group references.
    ///
    /// Only valid after validation has confirmed `max_group() == 0`.
    pub fn expand_literal(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            if let Token::Literal(text) = token {
                out.push_str(text);
            }
        }
        out
    }
}

/// Normalize a rewritten path so it is always non-empty and absolute.
pub fn normalize_path(path: String) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    if !path.starts_with('/') {
        let mut fixed = String::with_capacity(path.len() + 1);
        fixed.push('/');
        fixed.push_str(&path);
        return fixed;
    }
    path
}

/// Join an expanded template with the untouched remainder of the path,
/// collapsing the doubled slash that appears when the template ends with
/// '/' and the remainder starts with one.
pub fn join_rewrite(prefix_replacement: &str, remainder: &str) -> String {
    let mut out = String::with_capacity(prefix_replacement.len() + remainder.len());
    out.push_str(prefix_replacement);
    if out.ends_with('/') && remainder.starts_with('/') {
        out.pop();
    }
    out.push_str(remainder);
    normalize_path(out)
}
