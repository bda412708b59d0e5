//! Concrete syntax tree for TTCN-3.
//!
//! Every grammar rule maps to a typed node with a fixed set of fields.
//! Optional grammar parts are `Option` fields and repeated parts are `Vec`s.
//! An absent field means the construct was not written. A function without a
//! `body`, for example, is a forward declaration.

use serde::{Deserialize, Serialize};

mod attributes;
mod declarations;
mod expressions;
mod program;
mod statements;
mod types;

pub use attributes::*;
pub use declarations::*;
pub use expressions::*;
pub use program::*;
pub use statements::*;
pub use types::*;

/// Byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// An identifier in name position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

impl Name {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    Friend,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Friend => "friend",
        }
    }
}

/// `@word` modifier such as `@deterministic` or `@nodefault`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub text: String,
    pub span: Span,
}

/// Placeholder for source that failed to parse. `text` is the skipped input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorNode {
    pub message: String,
    pub text: String,
    pub span: Span,
}
