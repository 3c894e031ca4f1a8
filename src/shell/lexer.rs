//! Literal lexer
//!
//! Converts the right-hand side of a `let` binding into a stream of tokens.
//! Only what array literals need is recognized.

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    String(String),
    Ident(String),

    // Punctuation
    Minus,     // -
    Comma,     // ,
    LBracket,  // [
    RBracket,  // ]

    // Keywords
    True,
    False,
    Null,
    Undefined,

    // Special
    Eof,
    Error(String),
}

/// Lexer over a single input line.
///
/// `pos` is a byte offset into `source`; `column` counts characters.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
            column: 1,
        }
    }

    /// Column (1-based) of the next unread character
    pub fn column(&self) -> usize {
        self.column
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Peek at the character after the current one
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Consume the current character
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        self.column += 1;
        Some(c)
    }

    /// Skip whitespace and block comments
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.bump();
                    self.bump();
                    while let Some(c) = self.bump() {
                        if c == '*' && self.peek() == Some('/') {
                            self.bump();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Skip whitespace, then report the column the next token starts at
    pub fn token_start(&mut self) -> usize {
        self.skip_whitespace();
        self.column
    }

    /// Read the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Token::Eof;
        };

        if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            return self.read_identifier();
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()))
        {
            return self.read_number();
        }

        if c == '"' || c == '\'' {
            return self.read_string();
        }

        self.bump();
        match c {
            '-' => Token::Minus,
            ',' => Token::Comma,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            _ => Token::Error(format!("Unexpected character: {}", c)),
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                self.bump();
            } else {
                break;
            }
        }

        match &self.source[start..self.pos] {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            "undefined" => Token::Undefined,
            "NaN" => Token::Number(f64::NAN),
            "Infinity" => Token::Number(f64::INFINITY),
            ident => Token::Ident(ident.to_string()),
        }
    }

    /// Read a number literal
    fn read_number(&mut self) -> Token {
        let start = self.pos;

        self.eat_digits();

        // Decimal part
        if self.peek() == Some('.') {
            self.bump();
            self.eat_digits();
        }

        // Exponent part
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.eat_digits();
        }

        let text = &self.source[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Error(format!("Invalid number: {}", text)),
        }
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        let Some(quote) = self.bump() else {
            return Token::Eof;
        };
        let mut text = String::new();

        loop {
            match self.bump() {
                None => return Token::Error("Unterminated string".to_string()),
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('r') => text.push('\r'),
                    Some('t') => text.push('\t'),
                    Some('0') => text.push('\0'),
                    Some(c) => text.push(c),
                    None => return Token::Error("Unterminated string".to_string()),
                },
                Some(c) => text.push(c),
            }
        }

        Token::String(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new("42 3.14 1e3 .5");

        assert!(matches!(lexer.next_token(), Token::Number(n) if n == 42.0));
        assert!(matches!(lexer.next_token(), Token::Number(n) if (n - 3.14).abs() < 0.001));
        assert!(matches!(lexer.next_token(), Token::Number(n) if n == 1000.0));
        assert!(matches!(lexer.next_token(), Token::Number(n) if n == 0.5));
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn test_strings() {
        let mut lexer = Lexer::new(r#""hello" 'wörld' 'a\'b'"#);

        assert_eq!(lexer.next_token(), Token::String("hello".to_string()));
        assert_eq!(lexer.next_token(), Token::String("wörld".to_string()));
        assert_eq!(lexer.next_token(), Token::String("a'b".to_string()));
    }

    #[test]
    fn test_keywords_and_punctuation() {
        let mut lexer = Lexer::new("[true, null, -x]");

        assert_eq!(lexer.next_token(), Token::LBracket);
        assert_eq!(lexer.next_token(), Token::True);
        assert_eq!(lexer.next_token(), Token::Comma);
        assert_eq!(lexer.next_token(), Token::Null);
        assert_eq!(lexer.next_token(), Token::Comma);
        assert_eq!(lexer.next_token(), Token::Minus);
        assert_eq!(lexer.next_token(), Token::Ident("x".to_string()));
        assert_eq!(lexer.next_token(), Token::RBracket);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Lexer::new("'open").next_token(),
            Token::Error("Unterminated string".to_string())
        );
        assert!(matches!(Lexer::new("#").next_token(), Token::Error(_)));
    }

    #[test]
    fn test_non_ascii_input() {
        let mut lexer = Lexer::new("[é]");
        assert_eq!(lexer.next_token(), Token::LBracket);
        assert_eq!(
            lexer.next_token(),
            Token::Error("Unexpected character: é".to_string())
        );
        assert_eq!(lexer.column(), 3);

        let mut lexer = Lexer::new("'日本' x");
        assert_eq!(lexer.next_token(), Token::String("日本".to_string()));
        assert_eq!(lexer.token_start(), 6);
    }

    #[test]
    fn test_column_tracking() {
        let mut lexer = Lexer::new("  [ 1");
        assert_eq!(lexer.token_start(), 3);
        lexer.next_token();
        assert_eq!(lexer.token_start(), 5);
    }
}
