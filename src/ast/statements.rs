//! Statement nodes

use serde::{Deserialize, Serialize};

use super::{
    ErrorNode, Expression, Name, PortDecl, Reference, Span, TemplateDef, TimerDecl, VarDecl,
};

/// `{ ... }` with optional `catch` clauses and a `finally` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub catches: Vec<Clause>,
    pub finally: Option<Clause>,
    pub span: Span,
}

/// Body of a `catch` or `finally` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block(Block),
    /// A reference used as a statement, usually a call
    Reference(Reference),
    Redirection(Redirection),
    Assignment(Assignment),
    Var(VarDecl),
    Const(VarDecl),
    Timer(TimerDecl),
    Port(PortDecl),
    Template(Box<TemplateDef>),
    Label(LabelStmt),
    Goto(LabelStmt),
    Break(JumpStmt),
    Continue(JumpStmt),
    Return(ReturnStmt),
    If(IfStmt),
    Select(SelectStmt),
    For(ForStmt),
    ForRange(ForRangeStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    Alt(AltStmt),
    Interleave(AltStmt),
    Error(ErrorNode),
}

/// `ref := expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Reference,
    pub value: Expression,
    pub span: Span,
}

/// `p.receive -> value v sender s`; every clause is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redirection {
    pub reference: Reference,
    pub value: Option<Expression>,
    pub sender: Option<Expression>,
    pub verdict: Option<Expression>,
    pub param: Option<Expression>,
    pub timestamp: Option<Expression>,
    /// `@index value e`
    pub index_value: Option<Expression>,
    pub span: Span,
}

/// `label L` / `goto L`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStmt {
    pub name: Name,
    pub span: Span,
}

/// `break` / `continue` with an optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpStmt {
    pub label: Option<Name>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub init: Option<Box<Statement>>,
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    If(Box<IfStmt>),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectKind {
    Plain,
    Union,
    Class,
    Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    pub kind: SelectKind,
    pub init: Option<Box<Statement>>,
    pub expression: Expression,
    pub clauses: Vec<SelectClause>,
    pub span: Span,
}

/// Clauses are tried in textual order; `case else` is always last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectClause {
    Case {
        expression: Expression,
        body: Block,
        span: Span,
    },
    Else {
        body: Block,
        span: Span,
    },
}

/// C-style `for (init; condition; post)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub post: Option<Box<Statement>>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBinding {
    Var,
    Const,
}

/// `for (var x in range)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForRangeStmt {
    pub binding: Option<RangeBinding>,
    pub name: Name,
    pub range: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub init: Option<Box<Statement>>,
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStmt {
    pub body: Block,
    pub condition: Expression,
    pub span: Span,
}

/// `alt` or `interleave`, optionally `@nodefault`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltStmt {
    pub nodefault: bool,
    pub body: AltBlock,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltBlock {
    pub items: Vec<AltItem>,
    pub catches: Vec<Clause>,
    pub finally: Option<Clause>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AltItem {
    Var(VarDecl),
    Const(VarDecl),
    Timer(TimerDecl),
    Port(PortDecl),
    Template(Box<TemplateDef>),
    Guarded(GuardedStmt),
    Else(GuardedElse),
    Error(ErrorNode),
}

/// `[guard] p.receive(t) -> value v { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardedStmt {
    /// `None` for an empty guard `[]`
    pub condition: Option<Expression>,
    pub stmt: Communication,
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Communication {
    Reference(Reference),
    Redirection(Redirection),
}

/// `[else] { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardedElse {
    pub body: Block,
    pub span: Span,
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(s) => s.span,
            Statement::Reference(r) => r.span(),
            Statement::Redirection(s) => s.span,
            Statement::Assignment(s) => s.span,
            Statement::Var(s) | Statement::Const(s) => s.span,
            Statement::Timer(s) => s.span,
            Statement::Port(s) => s.span,
            Statement::Template(s) => s.span,
            Statement::Label(s) | Statement::Goto(s) => s.span,
            Statement::Break(s) | Statement::Continue(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Select(s) => s.span,
            Statement::For(s) => s.span,
            Statement::ForRange(s) => s.span,
            Statement::While(s) => s.span,
            Statement::DoWhile(s) => s.span,
            Statement::Alt(s) | Statement::Interleave(s) => s.span,
            Statement::Error(s) => s.span,
        }
    }
}

impl Communication {
    pub fn span(&self) -> Span {
        match self {
            Communication::Reference(r) => r.span(),
            Communication::Redirection(r) => r.span,
        }
    }
}
