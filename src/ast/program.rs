//! Source unit

use serde::{Deserialize, Serialize};

use super::{Definition, Expression, Span};

/// Root node of a parsed source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub root: SourceRoot,
    /// Comments in source order, for tooling that attaches them to nodes
    pub comments: Vec<Comment>,
    pub span: Span,
}

/// A source unit holds either definitions or one bare expression, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceRoot {
    Definitions(Vec<Definition>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl SourceFile {
    pub fn definitions(&self) -> &[Definition] {
        match &self.root {
            SourceRoot::Definitions(defs) => defs,
            SourceRoot::Expression(_) => &[],
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        match &self.root {
            SourceRoot::Expression(expr) => Some(expr),
            SourceRoot::Definitions(_) => None,
        }
    }
}
