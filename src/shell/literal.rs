//! Array literal parsing
//!
//! Grammar:
//! ```text
//! array   := '[' (element (',' element)* ','?)? ']'
//! element := '-'? number | string | true | false | null | undefined
//! ```

use super::error::{ShellError, ShellResult};
use super::lexer::{Lexer, Token};
use crate::value::Value;

/// Parse a complete array literal into its element values
pub fn parse_array_literal(source: &str) -> ShellResult<Vec<Value>> {
    let mut parser = LiteralParser::new(source);
    let values = parser.array()?;
    parser.expect_end()?;
    Ok(values)
}

struct LiteralParser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    column: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let column = lexer.token_start();
        let current = lexer.next_token();
        LiteralParser {
            lexer,
            current,
            column,
        }
    }

    fn bump(&mut self) -> Token {
        self.column = self.lexer.token_start();
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn error(&self, message: impl Into<String>) -> ShellError {
        ShellError::syntax(self.column, message)
    }

    fn unexpected(&self) -> ShellError {
        match &self.current {
            Token::Error(msg) => self.error(msg.clone()),
            Token::Eof => self.error("Unexpected end of input"),
            tok => self.error(format!("Unexpected token {}", describe(tok))),
        }
    }

    fn array(&mut self) -> ShellResult<Vec<Value>> {
        if self.current != Token::LBracket {
            return Err(self.error("Expected array literal"));
        }
        self.bump();

        let mut values = Vec::new();
        loop {
            if self.current == Token::RBracket {
                self.bump();
                return Ok(values);
            }

            values.push(self.element()?);

            match self.current {
                Token::Comma => {
                    self.bump();
                }
                Token::RBracket => {}
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn element(&mut self) -> ShellResult<Value> {
        let value = match &self.current {
            Token::Number(n) => Value::number(*n),
            Token::String(s) => Value::string(s.as_str()),
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Null => Value::Null,
            Token::Undefined => Value::Undefined,
            Token::Minus => {
                self.bump();
                return match self.current {
                    Token::Number(n) => {
                        self.bump();
                        Ok(Value::number(-n))
                    }
                    _ => Err(self.unexpected()),
                };
            }
            Token::Ident(name) => {
                return Err(self.error(format!("{} is not a literal", name)));
            }
            _ => return Err(self.unexpected()),
        };
        self.bump();
        Ok(value)
    }

    fn expect_end(&self) -> ShellResult<()> {
        match self.current {
            Token::Eof => Ok(()),
            _ => Err(self.unexpected()),
        }
    }
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::Number(n) => format!("number {}", n),
        Token::String(s) => format!("string '{}'", s),
        Token::Ident(s) => format!("identifier {}", s),
        Token::Minus => "'-'".to_string(),
        Token::Comma => "','".to_string(),
        Token::LBracket => "'['".to_string(),
        Token::RBracket => "']'".to_string(),
        Token::True => "true".to_string(),
        Token::False => "false".to_string(),
        Token::Null => "null".to_string(),
        Token::Undefined => "undefined".to_string(),
        Token::Eof => "end of input".to_string(),
        Token::Error(msg) => msg.clone(),
    }
}
