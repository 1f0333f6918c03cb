//! Bracket notation: `(value (left) (right))`, both children optional.
//!
//! Validation and building are two separate scans. [`validate`] reports the
//! first problem it meets. The builder in `binary_tree` trusts its input.

use std::iter::Peekable;
use std::str::CharIndices;

/// Positions are byte offsets into the validated text.
#[derive(Clone, Debug, Eq, Fail, PartialEq)]
pub enum BracketError {
    #[fail(display = "two opening brackets in a row at offset {}", pos)]
    ConsecutiveOpen { pos: usize },
    #[fail(display = "closing bracket without a matching opening one at offset {}", pos)]
    UnmatchedClose { pos: usize },
    #[fail(display = "brackets closed at offset {} hold no node", pos)]
    EmptyNode { pos: usize },
    #[fail(display = "node closed at offset {} has more than two children", pos)]
    TooManyChildren { pos: usize },
    #[fail(display = "number outside of a bracket at offset {}", pos)]
    ValueOutsideBrackets { pos: usize },
    #[fail(display = "unexpected character '{}' at offset {}", ch, pos)]
    UnexpectedChar { pos: usize, ch: char },
    #[fail(display = "{} bracket(s) left unclosed", count)]
    UnclosedBrackets { count: usize },
    #[fail(display = "number '{}' at offset {} is out of range", literal, pos)]
    InvalidNumber { pos: usize, literal: String },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    Open,
    Close,
    Value(i64),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Lexeme {
    pub pos: usize,
    pub token: Token,
}

/// Splits the notation into brackets and integer literals, skipping
/// whitespace. A `-` only starts a literal when a digit follows it.
pub(crate) struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Lexer<'a> {
        Lexer {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn next_is_digit(&mut self) -> bool {
        self.chars
            .peek()
            .map(|(_, c)| c.is_ascii_digit())
            .unwrap_or(false)
    }

    fn number(&mut self, start: usize) -> Result<Lexeme, BracketError> {
        while self.next_is_digit() {
            self.chars.next();
        }
        let end = self
            .chars
            .peek()
            .map(|(pos, _)| *pos)
            .unwrap_or_else(|| self.text.len());
        let literal = &self.text[start..end];
        literal
            .parse()
            .map(|value| Lexeme {
                pos: start,
                token: Token::Value(value),
            })
            .map_err(|_| BracketError::InvalidNumber {
                pos: start,
                literal: literal.to_owned(),
            })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Lexeme, BracketError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (pos, ch) = self.chars.next()?;
            let lexeme = match ch {
                c if c.is_whitespace() => continue,
                '(' => Ok(Lexeme {
                    pos,
                    token: Token::Open,
                }),
                ')' => Ok(Lexeme {
                    pos,
                    token: Token::Close,
                }),
                '-' if self.next_is_digit() => self.number(pos),
                c if c.is_ascii_digit() => self.number(pos),
                c => Err(BracketError::UnexpectedChar { pos, ch: c }),
            };
            return Some(lexeme);
        }
    }
}

/// Checks that `text` describes a binary tree.
///
/// Each open bracket gets a counter of the things that completed inside it:
/// its value, then every child bracket closed within it. A value plus two
/// children makes three, so a fourth means a third child.
pub fn validate(text: &str) -> Result<(), BracketError> {
    let mut levels: Vec<u8> = Vec::new();
    let mut awaiting_value = false;

    for lexeme in Lexer::new(text) {
        let Lexeme { pos, token } = lexeme?;
        match token {
            Token::Open => {
                if awaiting_value {
                    return Err(BracketError::ConsecutiveOpen { pos });
                }
                levels.push(0);
                awaiting_value = true;
            }
            Token::Value(_) => match levels.last_mut() {
                Some(count) if awaiting_value => {
                    *count += 1;
                    awaiting_value = false;
                }
                _ => return Err(BracketError::ValueOutsideBrackets { pos }),
            },
            Token::Close => {
                match levels.pop() {
                    None => return Err(BracketError::UnmatchedClose { pos }),
                    Some(0) => return Err(BracketError::EmptyNode { pos }),
                    Some(_) => {}
                }
                awaiting_value = false;
                if let Some(count) = levels.last_mut() {
                    *count += 1;
                    if *count >= 4 {
                        return Err(BracketError::TooManyChildren { pos });
                    }
                }
            }
        }
    }

    if !levels.is_empty() {
        return Err(BracketError::UnclosedBrackets {
            count: levels.len(),
        });
    }
    debug!("valid bracket notation: {}", text.trim());
    Ok(())
}
