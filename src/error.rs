//! Template error types and diagnostics

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template source
pub type Span = std::ops::Range<usize>;

/// Minimum similarity for a legal field to be offered as a suggestion
const SUGGESTION_CUTOFF: f64 = 0.6;

/// Maximum number of suggestions carried by an error
const MAX_SUGGESTIONS: usize = 3;

/// A `${...}` placeholder names a field that is not legal in its template
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", describe(.field, .suggestions))]
pub struct UnexpectedPlaceholderError {
    /// The field name as written between the braces
    pub field: String,
    /// Every field legal in the template, in declaration order
    pub fields: Vec<&'static str>,
    /// Closest legal fields, best match first
    pub suggestions: Vec<&'static str>,
    /// Byte range of the whole `${...}` expression
    pub span: Span,
}

impl UnexpectedPlaceholderError {
    pub fn new(field: impl Into<String>, fields: Vec<&'static str>, span: Span) -> Self {
        let field = field.into();
        let suggestions = suggest(&field, &fields);
        Self {
            field,
            fields,
            suggestions,
            span,
        }
    }

    /// Format the error with template context using ariadne
    pub fn format(&self, source: &str, name: &str) -> String {
        // ariadne labels count chars, not bytes
        let start = char_offset(source, self.span.start);
        let end = char_offset(source, self.span.end);

        let mut report = Report::build(ReportKind::Error, name, start)
            .with_config(Config::default().with_color(false))
            .with_message(self.to_string())
            .with_label(
                Label::new((name, start..end))
                    .with_message(format!("unknown field \"{}\"", self.field))
                    .with_color(Color::Red),
            )
            .with_note(format!("available fields: {}", self.fields.join(", ")));
        if let Some(best) = self.suggestions.first() {
            report = report.with_help(format!("replace with ${{{}}}", best));
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((name, Source::from(source)), &mut buf)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn describe(field: &str, suggestions: &[&str]) -> String {
    let mut message = format!("\"{}\" is not assignable to a placeholder.", field);
    if !suggestions.is_empty() {
        let quoted: Vec<String> = suggestions.iter().map(|s| format!("\"{}\"", s)).collect();
        message.push_str(&format!(" Did you mean {}?", quoted.join(" / ")));
    }
    message
}

fn char_offset(source: &str, byte: usize) -> usize {
    source
        .get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| source.chars().count())
}

/// Rank legal fields by similarity to an unknown one
///
/// Scores are normalized Levenshtein similarity; ties keep declaration order.
pub fn suggest(field: &str, fields: &[&'static str]) -> Vec<&'static str> {
    let mut scored: Vec<(f64, &'static str)> = fields
        .iter()
        .map(|&candidate| (strsim::normalized_levenshtein(field, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();
    // Stable sort, so equal scores stay in declaration order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}
