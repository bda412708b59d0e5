//! Expression and reference nodes

use serde::{Deserialize, Serialize};

use super::{Block, ExecutionContext, Modifier, Name, Parameter, ReturnType, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Literal(Literal),
    /// `( expr, ... )`
    TemplateValues(ListExpr),
    /// `{ expr, ... }`
    Composite(ListExpr),
    FunctionLiteral(Box<FunctionLiteral>),
    /// `Type : value`
    InlineTemplate(InlineTemplate),
    Reference(Reference),
    /// `lower .. upper`, only as an item of a value list
    Range(RangeExpr),
    /// `field := value`, only as an item of a composite literal
    FieldAssignment(FieldAssignment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    Bang,
    Increment,
    Decrement,
    Not4b,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `=>`, whose left side is always a reference
    Arrow,
    Mul,
    Div,
    Mod,
    Rem,
    Add,
    Sub,
    Concat,
    And4b,
    Xor4b,
    Or4b,
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Xor,
    Or,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Bang => "!",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
            UnaryOp::Not4b => "not4b",
            UnaryOp::Not => "not",
        }
    }
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Arrow => "=>",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "mod",
            BinaryOp::Rem => "rem",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Concat => "&",
            BinaryOp::And4b => "and4b",
            BinaryOp::Xor4b => "xor4b",
            BinaryOp::Or4b => "or4b",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::RotateLeft => "<@",
            BinaryOp::RotateRight => "@>",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "and",
            BinaryOp::Xor => "xor",
            BinaryOp::Or => "or",
        }
    }
}

/// A literal keeps its source spelling in `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Null,
    Omit,
    /// A lone `-`, the not-used value
    NotUsed,
    Boolean(bool),
    Verdict(Verdict),
    Number,
    Charstring,
    Bitstring,
    Hexstring,
    Octetstring,
    /// A quoted string that is none of the three bit/hex/octet shapes
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    None,
    Pass,
    Inconc,
    Fail,
    Error,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::None => "none",
            Verdict::Pass => "pass",
            Verdict::Inconc => "inconc",
            Verdict::Fail => "fail",
            Verdict::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    pub items: Vec<Expression>,
    pub span: Span,
}

/// Anonymous function: `function (params) runs on C return T { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    pub modifiers: Vec<Modifier>,
    pub parameters: Vec<Parameter>,
    pub context: ExecutionContext,
    pub return_type: Option<ReturnType>,
    pub exception: Option<Vec<Reference>>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeExpr {
    pub lower: Box<Expression>,
    pub upper: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAssignment {
    pub field: Reference,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineTemplate {
    pub ty: Box<Reference>,
    pub value: Box<Expression>,
    pub span: Span,
}

/// Names, selections, indexing and calls.
///
/// Postfix chains nest to the left: `a.b[0](x)` is a call whose function is
/// an index expression whose operand is the selector `a.b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reference {
    Name(Name),
    Keyword {
        keyword: ReferenceKeyword,
        span: Span,
    },
    /// `Name<T, ...>`, only directly on an identifier
    TypeInstantiation {
        name: Name,
        arguments: Vec<Reference>,
        span: Span,
    },
    Selector {
        operand: Box<Reference>,
        field: Box<Reference>,
        span: Span,
    },
    Index {
        operand: Box<Reference>,
        indices: Vec<Expression>,
        span: Span,
    },
    Call {
        function: Box<Reference>,
        arguments: Vec<Expression>,
        variadic: bool,
        span: Span,
    },
    /// `any from x` / `all from x`; the argument is a bare identifier.
    FromCall {
        quantifier: Quantifier,
        argument: Name,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKeyword {
    This,
    SelfRef,
    /// `???`
    Unknown,
    AllPort,
    AnyPort,
    AllTimer,
    AnyTimer,
    AllComponent,
    AnyComponent,
    Testcase,
}

impl ReferenceKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKeyword::This => "this",
            ReferenceKeyword::SelfRef => "self",
            ReferenceKeyword::Unknown => "???",
            ReferenceKeyword::AllPort => "all port",
            ReferenceKeyword::AnyPort => "any port",
            ReferenceKeyword::AllTimer => "all timer",
            ReferenceKeyword::AnyTimer => "any timer",
            ReferenceKeyword::AllComponent => "all component",
            ReferenceKeyword::AnyComponent => "any component",
            ReferenceKeyword::Testcase => "testcase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    Any,
    All,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Unary(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::TemplateValues(e) | Expression::Composite(e) => e.span,
            Expression::FunctionLiteral(e) => e.span,
            Expression::InlineTemplate(e) => e.span,
            Expression::Reference(r) => r.span(),
            Expression::Range(e) => e.span,
            Expression::FieldAssignment(e) => e.span,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Expression::Reference(r) => Some(r),
            _ => None,
        }
    }
}

impl Reference {
    pub fn span(&self) -> Span {
        match self {
            Reference::Name(name) => name.span,
            Reference::Keyword { span, .. }
            | Reference::TypeInstantiation { span, .. }
            | Reference::Selector { span, .. }
            | Reference::Index { span, .. }
            | Reference::Call { span, .. }
            | Reference::FromCall { span, .. } => *span,
        }
    }

    /// The identifier if this reference is a bare name
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Reference::Name(name) => Some(name),
            _ => None,
        }
    }
}
