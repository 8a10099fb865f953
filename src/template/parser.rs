//! Placeholder parser
//!
//! Splits a template into literal text and `${field}` placeholders, checking
//! each field against the legal set of the template's slot.

use logos::Logos;

use crate::error::UnexpectedPlaceholderError;

use super::fields::Field;
use super::lexer::Token;

/// One node of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode<F> {
    Text(String),
    Placeholder(F),
}

/// A compiled template: literal text and placeholders in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<F> {
    nodes: Vec<TemplateNode<F>>,
}

impl<F> Template<F> {
    pub fn new(nodes: Vec<TemplateNode<F>>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TemplateNode<F>] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<F: Field> Template<F> {
    /// Parse a template against the fields of `F`
    pub fn parse(source: &str) -> Result<Self, UnexpectedPlaceholderError> {
        parse(source)
    }

    /// Placeholders in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = F> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            TemplateNode::Placeholder(field) => Some(*field),
            TemplateNode::Text(_) => None,
        })
    }
}

/// Parse `source` into template nodes
///
/// An unescaped `${` opens a placeholder that runs to the next `}`. A `${`
/// preceded by a backslash is kept literally, backslash included, and so is
/// a `${` that is never closed.
pub fn parse<F: Field>(source: &str) -> Result<Template<F>, UnexpectedPlaceholderError> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if token != Ok(Token::Open) {
            literal.push_str(lexer.slice());
            continue;
        }

        let open = lexer.span();
        let mut close = None;
        while let Some(token) = lexer.next() {
            if token == Ok(Token::Close) {
                close = Some(lexer.span());
                break;
            }
        }

        let Some(close) = close else {
            // Unterminated: the rest of the template is literal.
            literal.push_str(&source[open.start..]);
            break;
        };

        let name = &source[open.end..close.start];
        let field = F::from_name(name).ok_or_else(|| {
            UnexpectedPlaceholderError::new(name, F::names(), open.start..close.end)
        })?;

        if !literal.is_empty() {
            nodes.push(TemplateNode::Text(std::mem::take(&mut literal)));
        }
        nodes.push(TemplateNode::Placeholder(field));
    }

    if !literal.is_empty() {
        nodes.push(TemplateNode::Text(literal));
    }
    Ok(Template::new(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::fields::{TextField, TweetField, UrlField};
    use pretty_assertions::assert_eq;

    fn text<F>(s: &str) -> TemplateNode<F> {
        TemplateNode::Text(s.to_string())
    }

    #[test]
    fn test_parse_empty() {
        let template = parse::<TweetField>("").expect("Should parse");
        assert!(template.is_empty());
    }

    #[test]
    fn test_parse_placeholders() {
        let template = parse::<TweetField>("[${tweet.url} @${user.username}]").expect("Should parse");
        assert_eq!(
            template.nodes(),
            &[
                text("["),
                TemplateNode::Placeholder(TweetField::TweetUrl),
                text(" @"),
                TemplateNode::Placeholder(TweetField::UserUsername),
                text("]"),
            ]
        );
    }

    #[test]
    fn test_parse_escaped_placeholder() {
        let template =
            parse::<TweetField>("[\\${tweet.url} @${user.username}]").expect("Should parse");
        assert_eq!(
            template.nodes(),
            &[
                text("[\\${tweet.url} @"),
                TemplateNode::Placeholder(TweetField::UserUsername),
                text("]"),
            ]
        );
    }

    #[test]
    fn test_parse_escaped_only_with_no_fields() {
        let template = parse::<TextField>("\\${x}").expect("Should parse");
        assert_eq!(template.nodes(), &[text("\\${x}")]);
    }

    #[test]
    fn test_parse_connected_placeholders() {
        let template = parse::<TweetField>("${tweet.url}${user.username}").expect("Should parse");
        assert_eq!(
            template.nodes(),
            &[
                TemplateNode::Placeholder(TweetField::TweetUrl),
                TemplateNode::Placeholder(TweetField::UserUsername),
            ]
        );
    }

    #[test]
    fn test_parse_empty_placeholder() {
        let err = parse::<TweetField>("${}").unwrap_err();
        assert_eq!(err.field, "");
        assert_eq!(err.span, 0..3);
    }

    #[test]
    fn test_parse_unexpected_field() {
        let err = parse::<TweetField>("[${tweet.url} @${user.usrname}]").unwrap_err();
        assert_eq!(err.field, "user.usrname");
        assert_eq!(err.suggestions, vec!["user.username", "user.name"]);
        assert_eq!(err.span, 15..30);
        assert_eq!(err.fields, TweetField::names());
    }

    #[test]
    fn test_parse_unterminated_is_literal() {
        let template = parse::<UrlField>("a ${title").expect("Should parse");
        assert_eq!(template.nodes(), &[text("a ${title")]);
    }

    #[test]
    fn test_parse_field_runs_to_first_close() {
        let err = parse::<UrlField>("${a${b}}").unwrap_err();
        assert_eq!(err.field, "a${b");
    }

    #[test]
    fn test_parse_lone_braces_and_dollars() {
        let template = parse::<UrlField>("$1 } {${text}}").expect("Should parse");
        assert_eq!(
            template.nodes(),
            &[
                text("$1 } {"),
                TemplateNode::Placeholder(UrlField::Text),
                text("}"),
            ]
        );
    }

    #[test]
    fn test_placeholders_iter() {
        let template = parse::<UrlField>("${title}: ${decoded_url}").expect("Should parse");
        let fields: Vec<_> = template.placeholders().collect();
        assert_eq!(fields, vec![UrlField::Title, UrlField::DecodedUrl]);
    }
}
