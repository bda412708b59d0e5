//! Definition nodes

use serde::{Deserialize, Serialize};

use super::{
    AltBlock, Block, Declarator, EnumValue, ErrorNode, ExecutionContext, Expression, Field,
    LengthSpec, ListExpr, Modifier, Name, NestedTemplate, Parameter, ParameterizedName,
    Reference, ReturnType, Span, TemplateRestriction, Visibility, WithAttributes,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Definition {
    Module(ModuleDef),
    Group(GroupDef),
    Function(FunctionDef),
    ExternalFunction(ExternalFunctionDef),
    Altstep(AltstepDef),
    Testcase(TestcaseDef),
    Configuration(ConfigurationDef),
    Control(ControlDef),
    AltstepType(AltstepTypeDef),
    TestcaseType(TestcaseTypeDef),
    FunctionType(FunctionTypeDef),
    Class(ClassDef),
    Component(ComponentDef),
    Constructor(ConstructorDef),
    Subtype(SubtypeDef),
    Structured(StructuredTypeDef),
    List(ListTypeDef),
    Map(MapTypeDef),
    Enumerated(EnumeratedDef),
    PortType(PortTypeDef),
    Signature(SignatureDef),
    Var(VarDecl),
    Const(VarDecl),
    ModulePar(VarDecl),
    Timer(TimerDecl),
    Port(PortDecl),
    Template(TemplateDef),
    Friend(FriendDef),
    Import(ImportDef),
    Mode(ModeDef),
    Error(ErrorNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub name: ParameterizedName,
    /// `language "TTCN-3:2018", ...`, strings as written
    pub language: Option<Vec<String>>,
    pub definitions: Vec<Definition>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub definitions: Vec<Definition>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `function`; without a body it is a forward declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub visibility: Option<Visibility>,
    pub modifiers: Vec<Modifier>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub extends: Option<Reference>,
    pub context: ExecutionContext,
    pub return_type: Option<ReturnType>,
    pub exception: Option<Vec<Reference>>,
    pub body: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFunctionDef {
    pub visibility: Option<Visibility>,
    pub modifiers: Vec<Modifier>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub extends: Option<Reference>,
    pub return_type: Option<ReturnType>,
    pub exception: Option<Vec<Reference>>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltstepDef {
    pub visibility: Option<Visibility>,
    pub modifiers: Vec<Modifier>,
    pub interleave: bool,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub context: ExecutionContext,
    pub exception: Option<Vec<Reference>>,
    pub body: Option<AltBlock>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestcaseDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub runs: Option<TestcaseRuns>,
    pub body: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestcaseRuns {
    /// `execute on Config`
    ExecuteOn(Reference),
    /// `runs on C system S`
    RunsOn {
        component: Reference,
        system: Option<Reference>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub runs_on: Reference,
    pub system: Option<Reference>,
    pub body: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDef {
    pub visibility: Option<Visibility>,
    pub body: Block,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltstepTypeDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub context: ExecutionContext,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestcaseTypeDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub runs_on: Reference,
    pub system: Option<Reference>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTypeDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub extends: Option<Reference>,
    pub context: ExecutionContext,
    pub return_type: Option<ReturnType>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub visibility: Option<Visibility>,
    pub external: bool,
    pub modifiers: Vec<Modifier>,
    pub name: ParameterizedName,
    pub extends: Option<Reference>,
    pub context: ExecutionContext,
    pub definitions: Vec<Definition>,
    pub destructor: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub extends: Option<Vec<Reference>>,
    pub body: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDef {
    pub visibility: Option<Visibility>,
    pub parameters: Vec<Parameter>,
    /// `: super(a, b)`, kept as the call reference
    pub super_call: Option<Reference>,
    pub body: Option<Block>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `type T Name (values) length(n)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtypeDef {
    pub visibility: Option<Visibility>,
    pub super_type: Reference,
    pub name: ParameterizedName,
    pub value_constraint: Option<ListExpr>,
    pub length_constraint: Option<LengthSpec>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructuredKind {
    Record,
    Set,
    Union,
}

impl StructuredKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructuredKind::Record => "record",
            StructuredKind::Set => "set",
            StructuredKind::Union => "union",
        }
    }
}

/// `type record|set|union Name { fields }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredTypeDef {
    pub visibility: Option<Visibility>,
    pub kind: StructuredKind,
    pub name: ParameterizedName,
    pub fields: Vec<Field>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    RecordOf,
    SetOf,
}

/// `type record length(n) of T Name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTypeDef {
    pub visibility: Option<Visibility>,
    pub kind: ListKind,
    pub length_constraint: Option<LengthSpec>,
    pub element_type: Reference,
    pub name: ParameterizedName,
    pub element_value_constraint: Option<ListExpr>,
    pub element_length_constraint: Option<LengthSpec>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `type map from K to V Name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTypeDef {
    pub visibility: Option<Visibility>,
    pub key_type: Reference,
    pub value_type: Reference,
    pub name: ParameterizedName,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumeratedDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub values: Vec<EnumValue>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortKind {
    Procedure,
    Message,
    Stream,
    Mixed,
}

impl PortKind {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "procedure" => Some(PortKind::Procedure),
            "message" => Some(PortKind::Message),
            "stream" => Some(PortKind::Stream),
            "mixed" => Some(PortKind::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::Procedure => "procedure",
            PortKind::Message => "message",
            PortKind::Stream => "stream",
            PortKind::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortTypeDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub map_to: Option<Vec<Reference>>,
    pub connect_to: Option<Vec<Reference>>,
    pub kind: PortKind,
    pub realtime: bool,
    pub port_attributes: Option<Vec<PortAttribute>>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortAttribute {
    Var(VarDecl),
    Const(VarDecl),
    Address(TranslationSpec),
    MapParam(Vec<Parameter>),
    UnmapParam(Vec<Parameter>),
    Messages {
        direction: super::Direction,
        messages: Vec<TranslationSpec>,
    },
}

/// `T from Outer with f()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationSpec {
    pub ty: Reference,
    pub translate: Option<Translation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub direction: TranslationDirection,
    pub outer_type: Reference,
    pub translator: Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationDirection {
    From,
    To,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Vec<Parameter>,
    pub exception: Option<Vec<Reference>>,
    pub return_type: Option<ReturnType>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `var`, `const` and `modulepar` declarations share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub visibility: Option<Visibility>,
    pub template_restriction: Option<NestedTemplate>,
    pub ty: Option<Reference>,
    pub declarators: Vec<Declarator>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerDecl {
    pub visibility: Option<Visibility>,
    pub declarators: Vec<Declarator>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDecl {
    pub visibility: Option<Visibility>,
    pub ty: Reference,
    pub declarators: Vec<Declarator>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `template (present) T name(params) modifies base := value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDef {
    pub visibility: Option<Visibility>,
    pub restriction: Option<TemplateRestriction>,
    pub modifiers: Vec<Modifier>,
    pub ty: Reference,
    pub name: ParameterizedName,
    pub parameters: Option<Vec<Parameter>>,
    pub modifies: Option<Reference>,
    pub value: Expression,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

/// `private friend module A, B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendDef {
    pub private: bool,
    pub modules: Vec<Reference>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDef {
    pub visibility: Option<Visibility>,
    pub module: Reference,
    /// `-> localName`
    pub local_name: Option<Name>,
    pub body: ImportBody,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportBody {
    /// `all` with an optional `except { ... }`
    All { except: Option<Vec<ExceptSpec>> },
    /// `{ type A, B; const all except C }`
    Specs(Vec<ImportSpec>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    Group,
    Type,
    Template,
    Const,
    Testcase,
    Altstep,
    Function,
    Signature,
    Modulepar,
    Import,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Group => "group",
            ImportKind::Type => "type",
            ImportKind::Template => "template",
            ImportKind::Const => "const",
            ImportKind::Testcase => "testcase",
            ImportKind::Altstep => "altstep",
            ImportKind::Function => "function",
            ImportKind::Signature => "signature",
            ImportKind::Modulepar => "modulepar",
            ImportKind::Import => "import",
        }
    }
}

/// `kind refs` or `kind all` inside `except { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptSpec {
    pub kind: ImportKind,
    /// `None` means `all`
    pub refs: Option<Vec<Reference>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportSpec {
    Group {
        groups: Vec<GroupImport>,
        span: Span,
    },
    Kind {
        kind: ImportKind,
        refs: ImportRefs,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupImport {
    pub reference: Reference,
    pub except: Option<Vec<ExceptSpec>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportRefs {
    List(Vec<Reference>),
    All { except: Option<Vec<Reference>> },
}

/// `mode Name(params) runs on C { }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDef {
    pub visibility: Option<Visibility>,
    pub name: ParameterizedName,
    pub parameters: Option<Vec<Parameter>>,
    pub runs_on: Option<Reference>,
    pub attributes: Option<WithAttributes>,
    pub span: Span,
}

impl Definition {
    pub fn span(&self) -> Span {
        match self {
            Definition::Module(d) => d.span,
            Definition::Group(d) => d.span,
            Definition::Function(d) => d.span,
            Definition::ExternalFunction(d) => d.span,
            Definition::Altstep(d) => d.span,
            Definition::Testcase(d) => d.span,
            Definition::Configuration(d) => d.span,
            Definition::Control(d) => d.span,
            Definition::AltstepType(d) => d.span,
            Definition::TestcaseType(d) => d.span,
            Definition::FunctionType(d) => d.span,
            Definition::Class(d) => d.span,
            Definition::Component(d) => d.span,
            Definition::Constructor(d) => d.span,
            Definition::Subtype(d) => d.span,
            Definition::Structured(d) => d.span,
            Definition::List(d) => d.span,
            Definition::Map(d) => d.span,
            Definition::Enumerated(d) => d.span,
            Definition::PortType(d) => d.span,
            Definition::Signature(d) => d.span,
            Definition::Var(d) | Definition::Const(d) | Definition::ModulePar(d) => d.span,
            Definition::Timer(d) => d.span,
            Definition::Port(d) => d.span,
            Definition::Template(d) => d.span,
            Definition::Friend(d) => d.span,
            Definition::Import(d) => d.span,
            Definition::Mode(d) => d.span,
            Definition::Error(d) => d.span,
        }
    }

    /// Human readable node kind, used in summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            Definition::Module(_) => "module",
            Definition::Group(_) => "group",
            Definition::Function(_) => "function",
            Definition::ExternalFunction(_) => "external function",
            Definition::Altstep(_) => "altstep",
            Definition::Testcase(_) => "testcase",
            Definition::Configuration(_) => "configuration",
            Definition::Control(_) => "control",
            Definition::AltstepType(_) => "altstep type",
            Definition::TestcaseType(_) => "testcase type",
            Definition::FunctionType(_) => "function type",
            Definition::Class(_) => "class",
            Definition::Component(_) => "component",
            Definition::Constructor(_) => "constructor",
            Definition::Subtype(_) => "subtype",
            Definition::Structured(d) => d.kind.as_str(),
            Definition::List(d) => match d.kind {
                ListKind::RecordOf => "record of",
                ListKind::SetOf => "set of",
            },
            Definition::Map(_) => "map",
            Definition::Enumerated(_) => "enumerated",
            Definition::PortType(_) => "port type",
            Definition::Signature(_) => "signature",
            Definition::Var(_) => "var",
            Definition::Const(_) => "const",
            Definition::ModulePar(_) => "modulepar",
            Definition::Timer(_) => "timer",
            Definition::Port(_) => "port",
            Definition::Template(_) => "template",
            Definition::Friend(_) => "friend",
            Definition::Import(_) => "import",
            Definition::Mode(_) => "mode",
            Definition::Error(_) => "error",
        }
    }

    /// Name of the defined entity, when the definition has exactly one
    pub fn name(&self) -> Option<&Name> {
        let name = match self {
            Definition::Module(d) => &d.name,
            Definition::Group(d) => &d.name,
            Definition::Function(d) => &d.name,
            Definition::ExternalFunction(d) => &d.name,
            Definition::Altstep(d) => &d.name,
            Definition::Testcase(d) => &d.name,
            Definition::Configuration(d) => &d.name,
            Definition::AltstepType(d) => &d.name,
            Definition::TestcaseType(d) => &d.name,
            Definition::FunctionType(d) => &d.name,
            Definition::Class(d) => &d.name,
            Definition::Component(d) => &d.name,
            Definition::Subtype(d) => &d.name,
            Definition::Structured(d) => &d.name,
            Definition::List(d) => &d.name,
            Definition::Map(d) => &d.name,
            Definition::Enumerated(d) => &d.name,
            Definition::PortType(d) => &d.name,
            Definition::Signature(d) => &d.name,
            Definition::Template(d) => &d.name,
            Definition::Mode(d) => &d.name,
            _ => return None,
        };
        Some(&name.name)
    }
}
