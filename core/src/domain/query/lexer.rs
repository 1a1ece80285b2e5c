use crate::domain::query::errors::QueryError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Function(String),
    String(String),
    Integer(i64),
    Double(f64),
    True,
    False,
    Null,
    And,
    Or,
    Not,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    LParen,
    RParen,
    Comma,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the first character of the token.
    pub position: usize,
    pub lexeme: String,
}

pub struct Tokenizer<'a> {
    filter: &'a str,
    input: Vec<char>,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(filter: &'a str) -> Self {
        Self {
            filter,
            input: filter.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while<F>(&mut self, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut result = String::new();
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn error(
        &self,
        message: impl Into<String>,
        position: usize,
        lexeme: impl Into<String>,
    ) -> QueryError {
        QueryError::Parse {
            message: message.into(),
            position,
            token: lexeme.into(),
            filter: self.filter.to_string(),
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, QueryError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let start = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    position: start,
                    lexeme: String::new(),
                });
                break;
            };

            let kind = match ch {
                '(' => {
                    self.advance();
                    TokenKind::LParen
                }
                ')' => {
                    self.advance();
                    TokenKind::RParen
                }
                ',' => {
                    self.advance();
                    TokenKind::Comma
                }
                '=' => {
                    self.advance();
                    if self.peek() != Some('=') {
                        return Err(self.error("unknown operator '=', use '=='", start, "="));
                    }
                    self.advance();
                    TokenKind::Eq
                }
                '!' => {
                    self.advance();
                    if self.peek() != Some('=') {
                        return Err(self.error("unknown operator '!', use NOT", start, "!"));
                    }
                    self.advance();
                    TokenKind::Neq
                }
                '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Gte
                    } else {
                        TokenKind::Gt
                    }
                }
                '<' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Lte
                    } else {
                        TokenKind::Lt
                    }
                }
                '"' | '\'' => self.read_string(ch)?,
                '@' => {
                    self.advance();
                    let name = self.read_while(|c| c.is_alphanumeric() || c == '_');
                    if name.is_empty() {
                        return Err(self.error("expected a function name after '@'", start, "@"));
                    }
                    TokenKind::Function(name.to_lowercase())
                }
                '-' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => self.read_number()?,
                _ if ch.is_ascii_digit() => self.read_number()?,
                _ if ch.is_alphabetic() || ch == '_' => {
                    let word = self.read_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                    match word.to_uppercase().as_str() {
                        "AND" => TokenKind::And,
                        "OR" => TokenKind::Or,
                        "NOT" => TokenKind::Not,
                        "TRUE" => TokenKind::True,
                        "FALSE" => TokenKind::False,
                        "NULL" => TokenKind::Null,
                        _ => TokenKind::Identifier(word),
                    }
                }
                '&' | '|' | '~' | '+' | '*' | '/' | '%' | '^' | '-' => {
                    return Err(self.error(
                        format!("unknown operator '{ch}'"),
                        start,
                        ch.to_string(),
                    ));
                }
                _ => {
                    return Err(self.error(
                        format!("unexpected character '{ch}'"),
                        start,
                        ch.to_string(),
                    ));
                }
            };

            tokens.push(Token {
                kind,
                position: start,
                lexeme: self.lexeme_from(start),
            });
        }

        Ok(tokens)
    }

    fn read_string(&mut self, quote: char) -> Result<TokenKind, QueryError> {
        let start = self.pos;
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    return Err(self.error(
                        "unterminated string literal",
                        start,
                        self.lexeme_from(start),
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    let escaped = match self.advance() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c @ ('\\' | '"' | '\'')) => c,
                        Some(other) => {
                            return Err(self.error(
                                format!("unknown escape sequence '\\{other}'"),
                                self.pos - 2,
                                format!("\\{other}"),
                            ));
                        }
                        None => {
                            return Err(self.error(
                                "unterminated string literal",
                                start,
                                self.lexeme_from(start),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn read_number(&mut self) -> Result<TokenKind, QueryError> {
        let start = self.pos;
        let mut is_double = false;

        if self.peek() == Some('-') {
            self.advance();
        }
        self.read_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            is_double = true;
            self.advance();
            if self.read_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.malformed_number(start));
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_double = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if self.read_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.malformed_number(start));
            }
        }

        if self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return Err(self.malformed_number(start));
        }

        let text = self.lexeme_from(start);
        if is_double {
            text.parse::<f64>()
                .map(TokenKind::Double)
                .map_err(|_| self.malformed_number(start))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| self.malformed_number(start))
        }
    }

    fn malformed_number(&mut self, start: usize) -> QueryError {
        self.read_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
        self.error("malformed number literal", start, self.lexeme_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(filter: &str) -> Vec<TokenKind> {
        Tokenizer::new(filter)
            .tokenize()
            .expect("filter should tokenize")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_comparison() {
        assert_eq!(
            kinds("capacity >= 10"),
            vec![
                TokenKind::Identifier("capacity".to_string()),
                TokenKind::Gte,
                TokenKind::Integer(10),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("a and B Or not TRUE null"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::And,
                TokenKind::Identifier("B".to_string()),
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::True,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_function_and_literals() {
        assert_eq!(
            kinds("@Between(budget, -1.5, 2e3)"),
            vec![
                TokenKind::Function("between".to_string()),
                TokenKind::LParen,
                TokenKind::Identifier("budget".to_string()),
                TokenKind::Comma,
                TokenKind::Double(-1.5),
                TokenKind::Comma,
                TokenKind::Double(2000.0),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes_and_quotes() {
        assert_eq!(
            kinds(r#"'it\'s' "say \"hi\"""#),
            vec![
                TokenKind::String("it's".to_string()),
                TokenKind::String("say \"hi\"".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_character_offsets() {
        let tokens = Tokenizer::new("é == 'x'").tokenize().expect("tokenize");
        assert_eq!(tokens[1].position, 2);
        assert_eq!(tokens[2].position, 5);
        assert_eq!(tokens[3].position, 8);
    }

    #[test]
    fn test_single_equals_is_unknown_operator() {
        let err = Tokenizer::new("name = 'x'").tokenize().unwrap_err();
        match err {
            QueryError::Parse {
                position, token, ..
            } => {
                assert_eq!(position, 5);
                assert_eq!(token, "=");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_malformed_numbers() {
        for filter in ["1.2.3", "12abc", "1.", "3e", "99999999999999999999"] {
            let err = Tokenizer::new(filter).tokenize().unwrap_err();
            assert!(
                matches!(&err, QueryError::Parse { message, .. } if message.contains("malformed")),
                "{filter} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = Tokenizer::new("name == 'abc").tokenize().unwrap_err();
        assert!(matches!(
            err,
            QueryError::Parse { position: 8, ref message, .. } if message.contains("unterminated")
        ));
    }
}
