//! Key expression parser
//!
//! Grammar (keywords are case-insensitive):
//!
//! ```text
//! key-expr         := "key" "(" [project-clause ","] [namespace-clause ","] path ")"
//! project-clause   := "PROJECT" "(" STRING ")"
//! namespace-clause := "NAMESPACE" "(" STRING ")"
//! path             := segment ("," segment)*
//! segment          := IDENTIFIER "," (INTEGER | STRING)
//! ```
//!
//! PROJECT must come before NAMESPACE when both are present.

use super::lexer::{tokenize, Symbol, Token};
use super::KeyExpr;
use crate::error::{KeyError, Result};
use crate::key::{PathElement, PathId};

/// Parse a key expression
///
/// # Errors
///
/// Returns [`KeyError::InvalidKey`] for any lexical or grammatical problem.
/// No partially parsed key is ever returned.
pub fn parse(input: &str) -> Result<KeyExpr> {
    let tokens = tokenize(input).collect::<Result<Vec<_>>>()?;

    let mut rest = match tokens.as_slice() {
        [Token::Identifier(kw), Token::Symbol(Symbol::LParen), inner @ .., Token::Symbol(Symbol::RParen)]
            if kw.eq_ignore_ascii_case("key") =>
        {
            inner
        }
        _ => return Err(KeyError::invalid("expected key(...)")),
    };

    let project = take_clause(&mut rest, "project");
    let namespace = take_clause(&mut rest, "namespace");
    let path = parse_path(rest)?;

    Ok(KeyExpr {
        project,
        namespace,
        path,
    })
}

/// Strip a leading `KEYWORD('value'),` clause
fn take_clause<'t>(rest: &mut &'t [Token], keyword: &str) -> Option<String> {
    let tokens: &'t [Token] = *rest;
    match tokens {
        [Token::Identifier(kw), Token::Symbol(Symbol::LParen), Token::String(value), Token::Symbol(Symbol::RParen), Token::Symbol(Symbol::Comma), tail @ ..]
            if kw.eq_ignore_ascii_case(keyword) =>
        {
            *rest = tail;
            Some(value.clone())
        }
        _ => None,
    }
}

fn parse_path(mut rest: &[Token]) -> Result<Vec<PathElement>> {
    if rest.is_empty() {
        return Err(KeyError::invalid("empty path"));
    }

    let mut path = Vec::new();
    loop {
        match rest {
            [Token::Identifier(kind), Token::Symbol(Symbol::Comma), id, tail @ ..] => {
                let id = match id {
                    Token::Integer(digits) => PathId::Id(digits.clone()),
                    Token::String(name) => PathId::Name(name.clone()),
                    other => {
                        return Err(KeyError::invalid(format!(
                            "expected id or name, got {}",
                            other
                        )))
                    }
                };
                path.push(PathElement {
                    kind: kind.clone(),
                    id: Some(id),
                });
                rest = tail;
            }
            [Token::Identifier(_), ..] => return Err(KeyError::invalid("expected kind, id pair")),
            [other, ..] => return Err(KeyError::invalid(format!("expected kind, got {}", other))),
            [] => return Err(KeyError::invalid("expected kind")),
        }

        match rest {
            [] => break,
            [Token::Symbol(Symbol::Comma), tail @ ..] => rest = tail,
            [other, ..] => {
                return Err(KeyError::invalid(format!(
                    "expected end or comma, got {}",
                    other
                )))
            }
        }
    }

    Ok(path)
}
