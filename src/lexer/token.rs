//! Token definitions
//!
//! Keywords are ASCII-case-insensitive, as IEC 61131-3 requires. Numeric
//! literal tokens keep the raw slice (prefix and `_` separators included);
//! the constant-folding pass owns the conversion to native values.

use logos::Logos;

/// Structured Text expression token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"\(\*([^*]|\*+[^*)])*\*+\)")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("AND", ignore(ascii_case))]
    And,
    #[token("OR", ignore(ascii_case))]
    Or,
    #[token("XOR", ignore(ascii_case))]
    Xor,
    #[token("NOT", ignore(ascii_case))]
    Not,
    #[token("MOD", ignore(ascii_case))]
    Mod,
    #[token("TRUE", ignore(ascii_case))]
    True,
    #[token("FALSE", ignore(ascii_case))]
    False,

    // Literals. Raw slices are kept verbatim; digit groups follow the
    // standard's `digit (('_'? digit))*` shape, so separators cannot lead,
    // trail, or double up.
    #[regex(r"16#[0-9A-Fa-f](_?[0-9A-Fa-f])*", |lex| lex.slice().to_string())]
    HexInt(String),
    #[regex(r"8#[0-7](_?[0-7])*", |lex| lex.slice().to_string())]
    OctInt(String),
    #[regex(r"2#[01](_?[01])*", |lex| lex.slice().to_string())]
    BinInt(String),
    #[regex(
        r"[0-9](_?[0-9])*\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?",
        |lex| lex.slice().to_string()
    )]
    Real(String),
    #[regex(r"[0-9](_?[0-9])*", |lex| lex.slice().to_string())]
    Int(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Operators (longest first where prefixes overlap)
    #[token("**")]
    Power,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("<>")]
    Ne,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    /// `&` is the standard's symbolic synonym for AND
    #[token("&")]
    Amp,

    // Symbols
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("#")]
    Hash,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::Xor => write!(f, "XOR"),
            Token::Not => write!(f, "NOT"),
            Token::Mod => write!(f, "MOD"),
            Token::True => write!(f, "TRUE"),
            Token::False => write!(f, "FALSE"),
            Token::HexInt(s) => write!(f, "{s}"),
            Token::OctInt(s) => write!(f, "{s}"),
            Token::BinInt(s) => write!(f, "{s}"),
            Token::Real(s) => write!(f, "{s}"),
            Token::Int(s) => write!(f, "{s}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Power => write!(f, "**"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Eq => write!(f, "="),
            Token::Ne => write!(f, "<>"),
            Token::Le => write!(f, "<="),
            Token::Ge => write!(f, ">="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Amp => write!(f, "&"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Hash => write!(f, "#"),
        }
    }
}
