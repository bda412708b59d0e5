//! Type-level building blocks shared by definitions and statements

use serde::{Deserialize, Serialize};

use super::{Expression, ListExpr, Name, Reference, Span};

/// A name with optional formal type parameters, `Name<in type T>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterizedName {
    pub name: Name,
    pub type_parameters: Option<Vec<TypeParameter>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub kind: TypeParameterKind,
    pub name: Name,
    pub default: Option<Reference>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeParameterKind {
    Type(Reference),
    /// `in type T`
    TypeKeyword,
    /// `in signature S`
    SignatureKeyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    Inout,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Inout => "inout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateRestriction {
    Omit,
    Value,
    Present,
}

impl TemplateRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateRestriction::Omit => "omit",
            TemplateRestriction::Value => "value",
            TemplateRestriction::Present => "present",
        }
    }
}

/// `template`, `template (omit)` or a bare restriction keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NestedTemplate {
    Template(Option<TemplateRestriction>),
    Restriction(TemplateRestriction),
}

/// Formal parameter: `in template (present) T p[2] := d`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub direction: Option<Direction>,
    pub template_restriction: Option<NestedTemplate>,
    pub ty: Reference,
    pub name: Name,
    pub array_def: Vec<Expression>,
    pub variadic: bool,
    pub default: Option<Expression>,
    pub span: Span,
}

/// `return template T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnType {
    pub template_restriction: Option<NestedTemplate>,
    pub ty: Reference,
    pub span: Span,
}

/// `runs on`, `mtc` and `system` clauses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub runs_on: Option<Reference>,
    pub mtc: Option<Reference>,
    pub system: Option<Reference>,
}

/// Field of a record, set or union type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub default: bool,
    pub ty: Reference,
    pub name: Option<Name>,
    pub array_def: Vec<Expression>,
    pub value_constraint: Option<ListExpr>,
    pub length_constraint: Option<LengthSpec>,
    pub optional: bool,
    pub span: Span,
}

/// `length(lower .. upper)` or `length(n)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthSpec {
    pub lower: Option<Boundary>,
    pub upper: Boundary,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Written with a leading `!`
    pub exclusive: bool,
    pub value: BoundaryValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryValue {
    Number(String),
    Reference(Reference),
}

/// `name<type params>[dims] := value` in a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: ParameterizedName,
    pub array_def: Vec<Expression>,
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: Name,
    pub values: Option<Vec<Expression>>,
    pub span: Span,
}
