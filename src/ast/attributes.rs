//! `with { ... }` attribute blocks

use serde::{Deserialize, Serialize};

use super::{Reference, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithAttributes {
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// `variant override (f except {g}) {"BER"} "value"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub modifier: Option<AttributeModifier>,
    pub specifiers: Option<Vec<AttributeSpecifier>>,
    /// Encoding names, as written (quoted)
    pub encodings: Option<Vec<String>>,
    /// Attribute value, as written (quoted)
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    Extension,
    Encode,
    Variant,
    Display,
    Optional,
}

impl AttributeKind {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "extension" => Some(AttributeKind::Extension),
            "encode" => Some(AttributeKind::Encode),
            "variant" => Some(AttributeKind::Variant),
            "display" => Some(AttributeKind::Display),
            "optional" => Some(AttributeKind::Optional),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Extension => "extension",
            AttributeKind::Encode => "encode",
            AttributeKind::Variant => "variant",
            AttributeKind::Display => "display",
            AttributeKind::Optional => "optional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeModifier {
    Override,
    /// `@local`
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpecifier {
    pub reference: Reference,
    pub except: Option<Vec<Reference>>,
}
