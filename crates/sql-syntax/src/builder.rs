use crate::{
    error::ParseError,
    parser::{Rule, SqlParser},
};
use model::{
    core::value::Value,
    query::{
        descriptor::{FilterClause, QueryDescriptor},
        join::{JoinKind, JoinPredicate, JoinSpec},
    },
};
use pest::{
    Parser,
    iterators::{Pair, Pairs},
};
use tracing::debug;

pub type BuildResult<T> = Result<T, ParseError>;

/// Parse a `SELECT` statement into a query descriptor.
pub fn parse(input: &str) -> BuildResult<QueryDescriptor> {
    let mut pairs = SqlParser::parse(Rule::query, input).map_err(ParseError::from_pest_error)?;
    let query = pairs.next().ok_or_else(|| ParseError::Unexpected {
        found: "empty input".into(),
        expected: "SELECT".into(),
        line: 1,
        column: 1,
    })?;

    let descriptor = build_query(query)?;
    debug!(
        table = %descriptor.table,
        fields = descriptor.fields.len(),
        conditions = descriptor.where_clauses.len(),
        joined = ?descriptor.joined_table(),
        "Parsed query"
    );

    Ok(descriptor)
}

fn build_query(pair: Pair<Rule>) -> BuildResult<QueryDescriptor> {
    let mut fields = Vec::new();
    let mut table = String::new();
    let mut join = None;
    let mut where_clauses = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::select_clause => {
                fields = inner
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::field)
                    .map(|p| p.as_str().to_string())
                    .collect();
            }
            Rule::from_clause => {
                table = expect(&mut inner.into_inner(), Rule::table_name, "table name")?
                    .as_str()
                    .to_string();
            }
            Rule::join_clause => {
                join = Some(build_join_clause(inner)?);
            }
            Rule::where_clause => {
                where_clauses = inner
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::condition)
                    .map(build_condition)
                    .collect::<BuildResult<Vec<_>>>()?;
            }
            _ => {}
        }
    }

    Ok(QueryDescriptor {
        fields,
        table,
        where_clauses,
        join,
    })
}

fn build_join_clause(pair: Pair<Rule>) -> BuildResult<JoinSpec> {
    // A bare JOIN is an inner join
    let mut kind = JoinKind::Inner;
    let mut table = String::new();
    let mut predicate = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::join_type => {
                kind = build_join_type(inner)?;
            }
            Rule::table_name => {
                table = inner.as_str().to_string();
            }
            Rule::join_condition => {
                let mut sides = inner.into_inner();
                let left = expect(&mut sides, Rule::field, "field name")?;
                let right = expect(&mut sides, Rule::field, "field name")?;
                predicate = Some(JoinPredicate::new(left.as_str(), right.as_str()));
            }
            _ => {}
        }
    }

    let predicate = predicate.ok_or_else(|| ParseError::Unexpected {
        found: "JOIN without ON".into(),
        expected: "join condition".into(),
        line: 1,
        column: 1,
    })?;

    Ok(JoinSpec::new(kind.to_string(), table, predicate))
}

fn build_join_type(pair: Pair<Rule>) -> BuildResult<JoinKind> {
    let (line, column) = pair.line_col();
    match pair.into_inner().next().map(|p| p.as_rule()) {
        Some(Rule::kw_inner) => Ok(JoinKind::Inner),
        Some(Rule::kw_left) => Ok(JoinKind::Left),
        Some(Rule::kw_right) => Ok(JoinKind::Right),
        _ => Err(ParseError::Unexpected {
            found: "join type".into(),
            expected: "INNER, LEFT or RIGHT".into(),
            line,
            column,
        }),
    }
}

fn build_condition(pair: Pair<Rule>) -> BuildResult<FilterClause> {
    let mut inner = pair.into_inner();
    let field = expect(&mut inner, Rule::field, "field name")?;
    let operator = expect(&mut inner, Rule::comparator, "comparison operator")?;
    let literal = expect(&mut inner, Rule::literal, "value")?;

    Ok(FilterClause::new(
        field.as_str(),
        operator.as_str(),
        build_literal(literal)?,
    ))
}

fn build_literal(pair: Pair<Rule>) -> BuildResult<Value> {
    let (line, column) = pair.line_col();
    let Some(inner) = pair.into_inner().next() else {
        return Err(ParseError::Unexpected {
            found: "nothing".into(),
            expected: "value".into(),
            line,
            column,
        });
    };

    let text = inner.as_str();
    match inner.as_rule() {
        Rule::lit_string => Ok(Value::String(parse_string_literal(text))),
        Rule::lit_number => parse_number(text),
        Rule::lit_null => Ok(Value::Null),
        Rule::lit_word => Ok(Value::String(text.to_string())),
        other => Err(ParseError::Unexpected {
            found: format!("{other:?}"),
            expected: "value".into(),
            line,
            column,
        }),
    }
}

fn parse_string_literal(lexeme: &str) -> String {
    if let Some(body) = lexeme.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return body.replace("''", "'");
    }
    lexeme.trim_matches('"').to_string()
}

/// Integers become `Int`, anything with a fraction (or too wide for i64) becomes `Float`.
fn parse_number(text: &str) -> BuildResult<Value> {
    if !text.contains('.')
        && let Ok(int) = text.parse::<i64>()
    {
        return Ok(Value::Int(int));
    }

    text.parse::<f64>()
        .map(Value::Float)
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

fn expect<'i>(pairs: &mut Pairs<'i, Rule>, rule: Rule, what: &str) -> BuildResult<Pair<'i, Rule>> {
    match pairs.find(|p| p.as_rule() == rule) {
        Some(pair) => Ok(pair),
        None => Err(ParseError::Unexpected {
            found: "end of clause".into(),
            expected: what.to_string(),
            line: 1,
            column: 1,
        }),
    }
}
