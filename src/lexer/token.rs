//! Token definitions

use logos::Logos;
use std::fmt;

/// TTCN-3 token kinds.
///
/// Trivia (whitespace and comments) is kept in the stream so that the
/// concatenated token texts reproduce the input. The parser filters it out.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    // Trivia
    #[regex(r"[\s\u{00A0}\u{FEFF}\u{3000}]+")]
    Whitespace,
    #[regex(r"//[^\n\r]*")]
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    // Definitions
    #[token("module")]
    Module,
    #[token("group")]
    Group,
    #[token("function")]
    Function,
    #[token("altstep")]
    Altstep,
    #[token("testcase")]
    Testcase,
    #[token("configuration")]
    Configuration,
    #[token("control")]
    Control,
    #[token("type")]
    Type,
    #[token("record")]
    Record,
    #[token("set")]
    Set,
    #[token("union")]
    Union,
    #[token("enumerated")]
    Enumerated,
    #[token("component")]
    Component,
    #[token("class")]
    Class,
    #[token("port")]
    Port,
    #[token("template")]
    Template,
    #[token("const")]
    Const,
    #[token("var")]
    Var,
    #[token("timer")]
    Timer,
    #[token("modulepar")]
    Modulepar,
    #[token("signature")]
    Signature,
    #[token("import")]
    Import,
    #[token("friend")]
    Friend,
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("external")]
    External,
    #[token("constructor")]
    Constructor,

    // Statements
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("select")]
    Select,
    #[token("case")]
    Case,
    #[token("alt")]
    Alt,
    #[token("interleave")]
    Interleave,
    #[token("label")]
    Label,
    #[token("goto")]
    Goto,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("with")]
    With,

    // Word operators
    #[token("of")]
    Of,
    #[token("length")]
    Length,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("xor")]
    Xor,
    #[token("not")]
    Not,
    #[token("and4b")]
    And4b,
    #[token("or4b")]
    Or4b,
    #[token("xor4b")]
    Xor4b,
    #[token("not4b")]
    Not4b,
    #[token("mod")]
    Mod,
    #[token("rem")]
    Rem,

    // Literal words
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("omit")]
    Omit,
    #[token("none")]
    NoneKw,
    #[token("pass")]
    Pass,
    #[token("inconc")]
    Inconc,
    #[token("fail")]
    Fail,
    #[token("error")]
    ErrorKw,

    // Other reserved words
    #[token("any")]
    Any,
    #[token("all")]
    All,
    #[token("except")]
    Except,
    #[token("extends")]
    Extends,
    #[token("runs")]
    Runs,
    #[token("on")]
    On,
    #[token("from")]
    From,
    #[token("to")]
    To,
    #[token("in")]
    In,
    #[token("out")]
    Out,
    #[token("inout")]
    Inout,
    #[token("this")]
    This,
    #[token("self")]
    SelfValue,
    #[token("value")]
    Value,
    #[token("present")]
    Present,

    // Identifiers (keywords above win on equal length)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    #[regex(r"@[a-zA-Z0-9_]+", |lex| lex.slice().to_owned())]
    Modifier(String),

    // Literals keep their source spelling; see `literal_parser` for decoding.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9][0-9_]*)?", |lex| lex.slice().to_owned())]
    Number(String),

    #[regex(r#""(\\.|""|[^"\\])*""#, |lex| lex.slice().to_owned())]
    Charstring(String),

    #[regex(r"'[01*? ]+'[bB]", |lex| lex.slice().to_owned(), priority = 20)]
    Bitstring(String),

    #[regex(r"'[0-9A-Fa-f*? ]+'[hH]", |lex| lex.slice().to_owned(), priority = 20)]
    Hexstring(String),

    #[regex(r"'[0-9A-Fa-f*? ]+'[oO]", |lex| lex.slice().to_owned(), priority = 20)]
    Octetstring(String),

    #[regex(r"'[^']*'[a-zA-Z_]*", |lex| lex.slice().to_owned())]
    MalformedString(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Ampersand,
    #[token("!")]
    Bang,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<@")]
    RotateLeft,
    #[token("@>")]
    RotateRight,
    #[token(":=")]
    Assign,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("???")]
    Unknown,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    Ellipsis,

    // Unrecognized input
    Error,
}

impl Token {
    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Comment)
    }

    /// The fixed spelling of keywords and punctuation. `None` for tokens that
    /// carry their own text.
    pub fn spelling(&self) -> Option<&'static str> {
        let s = match self {
            Token::Module => "module",
            Token::Group => "group",
            Token::Function => "function",
            Token::Altstep => "altstep",
            Token::Testcase => "testcase",
            Token::Configuration => "configuration",
            Token::Control => "control",
            Token::Type => "type",
            Token::Record => "record",
            Token::Set => "set",
            Token::Union => "union",
            Token::Enumerated => "enumerated",
            Token::Component => "component",
            Token::Class => "class",
            Token::Port => "port",
            Token::Template => "template",
            Token::Const => "const",
            Token::Var => "var",
            Token::Timer => "timer",
            Token::Modulepar => "modulepar",
            Token::Signature => "signature",
            Token::Import => "import",
            Token::Friend => "friend",
            Token::Public => "public",
            Token::Private => "private",
            Token::External => "external",
            Token::Constructor => "constructor",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::While => "while",
            Token::Do => "do",
            Token::Select => "select",
            Token::Case => "case",
            Token::Alt => "alt",
            Token::Interleave => "interleave",
            Token::Label => "label",
            Token::Goto => "goto",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Return => "return",
            Token::Catch => "catch",
            Token::Finally => "finally",
            Token::With => "with",
            Token::Of => "of",
            Token::Length => "length",
            Token::And => "and",
            Token::Or => "or",
            Token::Xor => "xor",
            Token::Not => "not",
            Token::And4b => "and4b",
            Token::Or4b => "or4b",
            Token::Xor4b => "xor4b",
            Token::Not4b => "not4b",
            Token::Mod => "mod",
            Token::Rem => "rem",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::Omit => "omit",
            Token::NoneKw => "none",
            Token::Pass => "pass",
            Token::Inconc => "inconc",
            Token::Fail => "fail",
            Token::ErrorKw => "error",
            Token::Any => "any",
            Token::All => "all",
            Token::Except => "except",
            Token::Extends => "extends",
            Token::Runs => "runs",
            Token::On => "on",
            Token::From => "from",
            Token::To => "to",
            Token::In => "in",
            Token::Out => "out",
            Token::Inout => "inout",
            Token::This => "this",
            Token::SelfValue => "self",
            Token::Value => "value",
            Token::Present => "present",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Ampersand => "&",
            Token::Bang => "!",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Equal => "==",
            Token::NotEqual => "!=",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::RotateLeft => "<@",
            Token::RotateRight => "@>",
            Token::Assign => ":=",
            Token::Arrow => "->",
            Token::FatArrow => "=>",
            Token::Unknown => "???",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Dot => ".",
            Token::DotDot => "..",
            Token::Ellipsis => "...",
            _ => return None,
        };
        Some(s)
    }

    /// Reserved words, i.e. spellings that start with a letter.
    pub fn is_keyword(&self) -> bool {
        self.spelling()
            .map(|s| s.starts_with(|c: char| c.is_ascii_alphabetic()))
            .unwrap_or(false)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "whitespace"),
            Token::Comment => write!(f, "comment"),
            Token::Identifier(s) => write!(f, "identifier `{}`", s),
            Token::Modifier(s) => write!(f, "modifier `{}`", s),
            Token::Number(s) => write!(f, "number `{}`", s),
            Token::Charstring(s) => write!(f, "charstring {}", s),
            Token::Bitstring(s) => write!(f, "bitstring {}", s),
            Token::Hexstring(s) => write!(f, "hexstring {}", s),
            Token::Octetstring(s) => write!(f, "octetstring {}", s),
            Token::MalformedString(s) => write!(f, "malformed string {}", s),
            Token::Error => write!(f, "unrecognized input"),
            other => match other.spelling() {
                Some(s) if other.is_keyword() => write!(f, "keyword `{}`", s),
                Some(s) => write!(f, "`{}`", s),
                None => write!(f, "{:?}", other),
            },
        }
    }
}
