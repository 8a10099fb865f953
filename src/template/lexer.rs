//! Lexer for placeholder templates using logos

use logos::Logos;

/// Template tokens
///
/// Every byte of a template belongs to some token, so lexing never fails.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Start of a placeholder
    #[token("${")]
    Open,

    /// `\${`, which stays literal
    #[token("\\${")]
    EscapedOpen,

    #[token("}")]
    Close,

    #[token("$")]
    Dollar,

    #[token("\\")]
    Backslash,

    #[regex(r"[^$}\\]+")]
    Text,
}
