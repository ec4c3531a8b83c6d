use crate::parser::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        source_snippet: String,
    },

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    #[error("Unexpected {found} at line {line}, column {column}, expected {expected}")]
    Unexpected {
        found: String,
        expected: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        let err = err.renamed_rules(describe_rule);
        let message = format!("{}", err.variant);
        let source_snippet = err.line().to_string();

        ParseError::Syntax {
            message,
            line,
            column,
            source_snippet,
        }
    }

    /// Format error with context for display
    pub fn format_error(&self) -> String {
        match self {
            ParseError::Syntax {
                message,
                line,
                column,
                source_snippet,
            } => {
                format!(
                    "Syntax error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    source_snippet,
                    " ".repeat(column.saturating_sub(1)),
                    message
                )
            }
            _ => self.to_string(),
        }
    }
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::kw_select => "SELECT".into(),
        Rule::kw_from => "FROM".into(),
        Rule::kw_where => "WHERE".into(),
        Rule::kw_and => "AND".into(),
        Rule::kw_join => "JOIN".into(),
        Rule::kw_on => "ON".into(),
        Rule::kw_inner => "INNER".into(),
        Rule::kw_left => "LEFT".into(),
        Rule::kw_right => "RIGHT".into(),
        Rule::kw_outer => "OUTER".into(),
        Rule::field => "field name".into(),
        Rule::table_name => "table name".into(),
        Rule::comparator => "comparison operator".into(),
        Rule::literal | Rule::lit_string | Rule::lit_number | Rule::lit_null | Rule::lit_word => {
            "value".into()
        }
        Rule::join_type => "join type".into(),
        Rule::EOI => "end of query".into(),
        other => format!("{other:?}"),
    }
}
