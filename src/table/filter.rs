//! Copyright © 2025 Maren Holt. All Rights Reserved.
//!
//! This file is part of Tio.
//! The Tio project belongs to the Veldt project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Memory Source Filter Dialect
//!
//! The native query dialect of [`TioMemoryTable`](super::memory::TioMemoryTable):
//! `AND`-joined comparisons (`=`, `<>`, `>`, `>=`, `<`, `<=`) between a field
//! and a literal, plus `IS NULL` / `IS NOT NULL` tests, and an `ORDER BY`
//! postfix clause. String literals use single quotes with `''` escaping.
//!
//! Anything outside the dialect is a query error raised when the cursor is
//! opened, before any output exists. Comparisons involving `Null` or
//! incomparable types match nothing, the way SQL treats unknown.

use std::cmp::Ordering;

use regex::Regex;

use crate::errors::{Result, TioError};
use crate::table::{TioRow, TioSchema};
use crate::value::TioValue;

const TOKEN_PATTERN: &str = r"^(?:(?i:IS\s+NOT\s+NULL)|(?i:IS\s+NULL)|(?i:AND)\b|<=|>=|<>|=|<|>|'(?:[^']|'')*'|-?[0-9]+(?:\.[0-9]+)?|[A-Za-z_][A-Za-z0-9_]*)";

const ORDER_BY_PATTERN: &str =
    r"^(?i:ORDER\s+BY)\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s+(?i)(ASC|DESC))?\s*$";

#[derive(Clone, Debug, PartialEq)]
enum Token {
    And,
    IsNull,
    IsNotNull,
    Op(TioFilterOp),
    Str(String),
    Num(String),
    Ident(String),
}

/// Comparison operators accepted by the dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TioFilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl TioFilterOp {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            TioFilterOp::Eq => ordering == Ordering::Equal,
            TioFilterOp::Ne => ordering != Ordering::Equal,
            TioFilterOp::Gt => ordering == Ordering::Greater,
            TioFilterOp::Ge => ordering != Ordering::Less,
            TioFilterOp::Lt => ordering == Ordering::Less,
            TioFilterOp::Le => ordering != Ordering::Greater,
        }
    }
}

#[derive(Clone, Debug)]
enum Term {
    Compare {
        field: usize,
        op: TioFilterOp,
        literal: TioValue,
    },
    IsNull {
        field: usize,
        negated: bool,
    },
}

/// A parsed, schema-bound `where` expression.
#[derive(Clone, Debug)]
pub struct TioFilterExpr {
    terms: Vec<Term>,
}

impl TioFilterExpr {
    /// Parses an expression and binds its field references to `schema`.
    ///
    /// Unknown fields and malformed syntax are query errors carrying the
    /// original expression text.
    pub fn parse(expression: &str, schema: &TioSchema) -> Result<Self> {
        let tokens = _tokenize(expression)?;
        let mut iter = tokens.into_iter();
        let mut terms = Vec::new();

        loop {
            let field_name = match iter.next() {
                Some(Token::Ident(name)) => name,
                Some(other) => {
                    return Err(TioError::query(
                        expression,
                        format!("expected field name, found {other:?}"),
                    ))
                }
                None => return Err(TioError::query(expression, "expected field name")),
            };
            let field = schema.index_of(&field_name).ok_or_else(|| {
                TioError::query(expression, format!("unknown field '{field_name}'"))
            })?;

            let term = match iter.next() {
                Some(Token::IsNull) => Term::IsNull {
                    field,
                    negated: false,
                },
                Some(Token::IsNotNull) => Term::IsNull {
                    field,
                    negated: true,
                },
                Some(Token::Op(op)) => {
                    let literal = match iter.next() {
                        Some(Token::Str(text)) => TioValue::Text(text),
                        Some(Token::Num(digits)) => _parse_number(expression, &digits)?,
                        _ => {
                            return Err(TioError::query(
                                expression,
                                format!("expected literal after comparison of '{field_name}'"),
                            ))
                        }
                    };
                    Term::Compare { field, op, literal }
                }
                _ => {
                    return Err(TioError::query(
                        expression,
                        format!("expected comparison or null test after '{field_name}'"),
                    ))
                }
            };
            terms.push(term);

            match iter.next() {
                None => break,
                Some(Token::And) => continue,
                Some(other) => {
                    return Err(TioError::query(
                        expression,
                        format!("expected AND between terms, found {other:?}"),
                    ))
                }
            }
        }

        Ok(Self { terms })
    }

    /// True when every term of the conjunction matches the row.
    pub fn matches(&self, row: &TioRow) -> bool {
        self.terms.iter().all(|term| match term {
            Term::IsNull { field, negated } => {
                let is_null = row.get(*field).map_or(true, TioValue::is_null);
                is_null != *negated
            }
            Term::Compare { field, op, literal } => match row.get(*field) {
                Some(value) => value
                    .compare(literal)
                    .map_or(false, |ordering| op.accepts(ordering)),
                None => false,
            },
        })
    }
}

/// A parsed, schema-bound `ORDER BY` postfix clause.
#[derive(Clone, Debug)]
pub struct TioOrderBy {
    field: usize,
    descending: bool,
}

impl TioOrderBy {
    /// Parses a postfix clause; only `ORDER BY <field> [ASC|DESC]` is valid.
    pub fn parse(clause: &str, schema: &TioSchema) -> Result<Self> {
        let order_re = Regex::new(ORDER_BY_PATTERN)
            .map_err(|err| TioError::internal(format!("postfix lexer error: {err}")))?;
        let captures = order_re.captures(clause.trim()).ok_or_else(|| {
            TioError::query(clause, "unsupported postfix clause, expected ORDER BY")
        })?;

        let field_name = &captures[1];
        let field = schema
            .index_of(field_name)
            .ok_or_else(|| TioError::query(clause, format!("unknown field '{field_name}'")))?;
        let descending = captures
            .get(2)
            .map_or(false, |direction| direction.as_str().eq_ignore_ascii_case("DESC"));

        Ok(Self { field, descending })
    }

    /// Stable-sorts rows by the clause's field; nulls sort last.
    pub fn apply(&self, rows: &mut [TioRow]) {
        rows.sort_by(|a, b| {
            let left = a.get(self.field).unwrap_or(&TioValue::Null);
            let right = b.get(self.field).unwrap_or(&TioValue::Null);
            let ordering = match (left.is_null(), right.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => left.compare(right).unwrap_or(Ordering::Equal),
            };
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

fn _tokenize(expression: &str) -> Result<Vec<Token>> {
    let token_re = Regex::new(TOKEN_PATTERN)
        .map_err(|err| TioError::internal(format!("filter lexer error: {err}")))?;
    let mut rest = expression;
    let mut tokens = Vec::new();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let matched = token_re.find(rest).ok_or_else(|| {
            TioError::query(
                expression,
                format!("unrecognized token near '{}'", _excerpt(rest)),
            )
        })?;
        tokens.push(_classify(matched.as_str()));
        rest = &rest[matched.end()..];
    }

    Ok(tokens)
}

fn _classify(text: &str) -> Token {
    if let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        return Token::Str(inner.replace("''", "'"));
    }
    if text.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return Token::Num(text.to_string());
    }
    match text {
        "<=" => return Token::Op(TioFilterOp::Le),
        ">=" => return Token::Op(TioFilterOp::Ge),
        "<>" => return Token::Op(TioFilterOp::Ne),
        "=" => return Token::Op(TioFilterOp::Eq),
        "<" => return Token::Op(TioFilterOp::Lt),
        ">" => return Token::Op(TioFilterOp::Gt),
        _ => {}
    }

    let squeezed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase();
    match squeezed.as_str() {
        "AND" => Token::And,
        "IS NULL" => Token::IsNull,
        "IS NOT NULL" => Token::IsNotNull,
        _ => Token::Ident(text.to_string()),
    }
}

fn _parse_number(expression: &str, digits: &str) -> Result<TioValue> {
    if digits.contains('.') {
        digits
            .parse::<f64>()
            .map(TioValue::Real)
            .map_err(|_| TioError::query(expression, format!("invalid number '{digits}'")))
    } else {
        digits
            .parse::<i64>()
            .map(TioValue::Integer)
            .map_err(|_| TioError::query(expression, format!("invalid number '{digits}'")))
    }
}

fn _excerpt(text: &str) -> String {
    text.chars().take(12).collect()
}
