//! Key expression tokenizer
//!
//! [`tokenize`] returns a lazy iterator over the tokens of a key expression.
//! Each call owns its own cursor, so tokenizing the same text twice yields
//! two independent streams.
//!
//! | Token | Form |
//! |-------|------|
//! | Symbol | `(` `)` `,` |
//! | Identifier | run of ASCII letters, or `` `any text without backticks` `` |
//! | String | `'...'` or `"..."`, no escapes |
//! | Integer | run of ASCII digits, kept as text |
//!
//! Plain ASCII space is the only whitespace. After an error the iterator
//! yields nothing further.

use crate::error::{KeyError, Result};
use std::fmt;
use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

/// Punctuation token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

impl Symbol {
    fn as_char(self) -> char {
        match self {
            Symbol::LParen => '(',
            Symbol::RParen => ')',
            Symbol::Comma => ',',
        }
    }
}

/// A key expression token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Punctuation
    Symbol(Symbol),
    /// Bare or backtick-quoted identifier
    Identifier(String),
    /// Quoted string literal
    String(String),
    /// Decimal digits, unbounded
    Integer(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(s) => write!(f, "'{}'", s.as_char()),
            Token::Identifier(i) => write!(f, "identifier `{}`", i),
            Token::String(s) => write!(f, "string {:?}", s),
            Token::Integer(i) => write!(f, "integer {}", i),
        }
    }
}

/// Tokenize a key expression
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer {
        chars: input.chars().peekable(),
        done: false,
    }
}

/// Lazy token stream over one input
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    fn take_while(&mut self, first: char, pred: fn(&char) -> bool) -> String {
        let mut text = String::from(first);
        while let Some(c) = self.chars.next_if(pred) {
            text.push(c);
        }
        text
    }

    fn quoted(&mut self, delim: char, what: &str) -> Result<String> {
        let mut text = String::new();
        for c in self.chars.by_ref() {
            if c == delim {
                return Ok(text);
            }
            text.push(c);
        }
        Err(KeyError::invalid(format!("unfinished {}", what)))
    }

    fn fail(&mut self, err: KeyError) -> Option<Result<Token>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let c = self.chars.next()?;
            let token = match c {
                ' ' => continue,
                '(' => Token::Symbol(Symbol::LParen),
                ')' => Token::Symbol(Symbol::RParen),
                ',' => Token::Symbol(Symbol::Comma),
                c if c.is_ascii_alphabetic() => {
                    Token::Identifier(self.take_while(c, char::is_ascii_alphabetic))
                }
                c if c.is_ascii_digit() => Token::Integer(self.take_while(c, char::is_ascii_digit)),
                '`' => match self.quoted('`', "identifier") {
                    Ok(text) => Token::Identifier(text),
                    Err(e) => return self.fail(e),
                },
                '\'' | '"' => match self.quoted(c, "string") {
                    Ok(text) => Token::String(text),
                    Err(e) => return self.fail(e),
                },
                other => {
                    return self.fail(KeyError::invalid(format!(
                        "unexpected character: {:?}",
                        other
                    )))
                }
            };
            return Some(Ok(token));
        }
    }
}

impl<'a> FusedIterator for Lexer<'a> {}
