use tracing::debug;

use crate::domain::query::{
    ast::{BinaryOperator, CallOperator, FilterNode, Literal, UnaryOperator},
    errors::QueryError,
    lexer::{Token, TokenKind, Tokenizer},
};

/// Recursive-descent parser for the filter language.
///
/// ```text
/// expr       := orExpr
/// orExpr     := andExpr ("OR" andExpr)*
/// andExpr    := notExpr ("AND" notExpr)*
/// notExpr    := "NOT"* comparison
/// comparison := callExpr (("=="|"!="|">"|">="|"<"|"<=") callExpr)?
/// callExpr   := "@" name "(" field ("," literal)* ")" | primary
/// primary    := field | literal | "(" expr ")"
/// ```
///
/// The tree depth is tracked while the tree is built, so an oversized
/// expression is rejected as soon as the limit is crossed.
#[derive(Debug, Clone)]
pub struct FilterParser {
    max_depth: usize,
    max_length: usize,
}

impl FilterParser {
    pub fn new(max_depth: usize, max_length: usize) -> Self {
        Self {
            max_depth,
            max_length,
        }
    }

    /// Callers only hand non-blank text to the parser.
    pub fn parse(&self, filter: &str) -> Result<FilterNode, QueryError> {
        let length = filter.chars().count();
        if length > self.max_length {
            return Err(QueryError::FilterTooLong {
                length,
                max: self.max_length,
            });
        }

        let tokens = Tokenizer::new(filter).tokenize()?;
        let mut parser = Parser {
            filter,
            tokens,
            pos: 0,
            nesting: 0,
            max_depth: self.max_depth,
        };

        let parsed = parser.parse_or()?;
        parser.expect_end()?;

        debug!(depth = parsed.depth, "parsed filter expression");
        Ok(parsed.node)
    }
}

struct Parsed {
    node: FilterNode,
    depth: usize,
}

impl Parsed {
    fn leaf(node: FilterNode) -> Self {
        Self { node, depth: 1 }
    }
}

struct Parser<'a> {
    filter: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        // the tokenizer always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> QueryError {
        QueryError::Parse {
            message: message.into(),
            position: token.position,
            token: token.lexeme.clone(),
            filter: self.filter.to_string(),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), QueryError> {
        if depth > self.max_depth {
            return Err(QueryError::ExpressionTooComplex {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    fn combine(
        &self,
        operator: BinaryOperator,
        left: Parsed,
        right: Parsed,
    ) -> Result<Parsed, QueryError> {
        let depth = 1 + left.depth.max(right.depth);
        self.check_depth(depth)?;
        Ok(Parsed {
            node: FilterNode::binary(operator, left.node, right.node),
            depth,
        })
    }

    fn expect_end(&self) -> Result<(), QueryError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::RParen => {
                Err(self.error_at(token, "unbalanced parentheses: unexpected ')'"))
            }
            _ => Err(self.error_at(token, format!("unexpected token '{}'", token.lexeme))),
        }
    }

    fn parse_or(&mut self) -> Result<Parsed, QueryError> {
        let mut left = self.parse_and()?;
        while self.peek().kind == TokenKind::Or {
            self.advance();
            let right = self.parse_and()?;
            left = self.combine(BinaryOperator::Or, left, right)?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Parsed, QueryError> {
        let mut left = self.parse_not()?;
        while self.peek().kind == TokenKind::And {
            self.advance();
            let right = self.parse_not()?;
            left = self.combine(BinaryOperator::And, left, right)?;
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Parsed, QueryError> {
        let mut negations = 0;
        while self.peek().kind == TokenKind::Not {
            self.advance();
            negations += 1;
            self.check_depth(negations + 1)?;
        }

        let mut parsed = self.parse_comparison()?;
        for _ in 0..negations {
            let depth = parsed.depth + 1;
            self.check_depth(depth)?;
            parsed = Parsed {
                node: FilterNode::unary(UnaryOperator::Not, parsed.node),
                depth,
            };
        }
        Ok(parsed)
    }

    fn parse_comparison(&mut self) -> Result<Parsed, QueryError> {
        let left = self.parse_call()?;
        let operator = match self.peek().kind {
            TokenKind::Eq => BinaryOperator::Eq,
            TokenKind::Neq => BinaryOperator::Neq,
            TokenKind::Gt => BinaryOperator::Gt,
            TokenKind::Gte => BinaryOperator::Gte,
            TokenKind::Lt => BinaryOperator::Lt,
            TokenKind::Lte => BinaryOperator::Lte,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_call()?;
        self.combine(operator, left, right)
    }

    fn parse_call(&mut self) -> Result<Parsed, QueryError> {
        let Some(name) = function_name(&self.peek().kind) else {
            return self.parse_primary();
        };
        let function_token = self.advance();

        let opening = self.advance();
        if opening.kind != TokenKind::LParen {
            return Err(self.error_at(&opening, format!("expected '(' after '@{name}'")));
        }

        let target_token = self.advance();
        let TokenKind::Identifier(field) = &target_token.kind else {
            return Err(self.error_at(
                &target_token,
                format!("'@{name}' expects a field name as its first argument"),
            ));
        };
        let target = FilterNode::field(field.clone());

        let mut arguments = Vec::new();
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            arguments.push(self.parse_literal_argument(&name)?);
        }

        let closing = self.advance();
        if closing.kind != TokenKind::RParen {
            return Err(self.error_at(
                &closing,
                format!("unbalanced parentheses: expected ')' to close '@{name}'"),
            ));
        }

        let node = match name.as_str() {
            "contains" => FilterNode::call(CallOperator::Contains, target, arguments),
            "startswith" => FilterNode::call(CallOperator::StartsWith, target, arguments),
            "endswith" => FilterNode::call(CallOperator::EndsWith, target, arguments),
            "in" => FilterNode::call(CallOperator::In, target, arguments),
            "between" => FilterNode::call(CallOperator::Between, target, arguments),
            "isnull" | "notnull" => {
                if !arguments.is_empty() {
                    return Err(QueryError::ArityMismatch {
                        function: format!("@{name}"),
                        expected: "1".to_string(),
                        found: arguments.len() + 1,
                    });
                }
                let operator = if name == "isnull" {
                    UnaryOperator::IsNull
                } else {
                    UnaryOperator::IsNotNull
                };
                FilterNode::unary(operator, target)
            }
            _ => {
                return Err(
                    self.error_at(&function_token, format!("unknown function '@{name}'"))
                );
            }
        };

        let parsed = Parsed { node, depth: 2 };
        self.check_depth(parsed.depth)?;
        Ok(parsed)
    }

    fn parse_literal_argument(&mut self, function: &str) -> Result<FilterNode, QueryError> {
        let token = self.advance();
        literal_of(&token.kind)
            .map(FilterNode::Literal)
            .ok_or_else(|| {
                self.error_at(
                    &token,
                    format!("'@{function}' expects literal values after the field"),
                )
            })
    }

    fn parse_primary(&mut self) -> Result<Parsed, QueryError> {
        let token = self.advance();

        if let Some(literal) = literal_of(&token.kind) {
            return Ok(Parsed::leaf(FilterNode::Literal(literal)));
        }

        match &token.kind {
            TokenKind::Identifier(name) => Ok(Parsed::leaf(FilterNode::field(name.clone()))),
            TokenKind::LParen => {
                self.nesting += 1;
                if self.nesting > self.max_depth {
                    return Err(QueryError::ExpressionTooComplex {
                        depth: self.nesting,
                        max: self.max_depth,
                    });
                }
                if self.peek().kind == TokenKind::RParen {
                    return Err(self.error_at(self.peek(), "empty expression inside parentheses"));
                }

                let inner = self.parse_or()?;
                let closing = self.advance();
                if closing.kind != TokenKind::RParen {
                    return Err(self.error_at(&closing, "unbalanced parentheses: expected ')'"));
                }
                self.nesting -= 1;

                Ok(Parsed {
                    node: FilterNode::group(inner.node),
                    depth: inner.depth,
                })
            }
            TokenKind::Eof if self.tokens.len() == 1 => {
                Err(self.error_at(&token, "empty expression"))
            }
            TokenKind::Eof => Err(self.error_at(&token, "unexpected end of filter")),
            TokenKind::RParen => {
                Err(self.error_at(&token, "unbalanced parentheses: unexpected ')'"))
            }
            _ => Err(self.error_at(
                &token,
                format!("expected a field, literal or '(' but found '{}'", token.lexeme),
            )),
        }
    }
}

fn function_name(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Function(name) => Some(name.clone()),
        _ => None,
    }
}

fn literal_of(kind: &TokenKind) -> Option<Literal> {
    match kind {
        TokenKind::String(value) => Some(Literal::String(value.clone())),
        TokenKind::Integer(value) => Some(Literal::Integer(*value)),
        TokenKind::Double(value) => Some(Literal::Double(*value)),
        TokenKind::True => Some(Literal::Boolean(true)),
        TokenKind::False => Some(Literal::Boolean(false)),
        TokenKind::Null => Some(Literal::Null),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FilterParser {
        FilterParser::new(8, 256)
    }

    fn parse(filter: &str) -> FilterNode {
        parser().parse(filter).expect("filter should parse")
    }

    fn parse_error(filter: &str) -> (String, usize) {
        match parser().parse(filter) {
            Err(QueryError::Parse {
                message,
                position,
                filter: original,
                ..
            }) => {
                assert_eq!(original, filter);
                (message, position)
            }
            other => panic!("expected a parse error for {filter:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_comparison() {
        assert_eq!(
            parse("name == 'Acme'"),
            FilterNode::binary(
                BinaryOperator::Eq,
                FilterNode::field("name"),
                FilterNode::string("Acme")
            )
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let tree = parse("a == 1 OR b == 2 AND c == 3");
        let FilterNode::Binary {
            operator, right, ..
        } = tree
        else {
            panic!("expected a binary node");
        };
        assert_eq!(operator, BinaryOperator::Or);
        assert!(matches!(
            *right,
            FilterNode::Binary {
                operator: BinaryOperator::And,
                ..
            }
        ));
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let tree = parse("(a == 1 OR b == 2) AND c == 3");
        let FilterNode::Binary { operator, left, .. } = tree else {
            panic!("expected a binary node");
        };
        assert_eq!(operator, BinaryOperator::And);
        assert!(matches!(*left, FilterNode::Group(_)));
    }

    #[test]
    fn test_not_applies_to_the_comparison() {
        assert_eq!(
            parse("NOT capacity > 5"),
            FilterNode::unary(
                UnaryOperator::Not,
                FilterNode::binary(
                    BinaryOperator::Gt,
                    FilterNode::field("capacity"),
                    FilterNode::integer(5)
                )
            )
        );
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(
            parse("@in(status, 'Active', 'Draft')"),
            FilterNode::call(
                CallOperator::In,
                FilterNode::field("status"),
                vec![FilterNode::string("Active"), FilterNode::string("Draft")]
            )
        );
        assert_eq!(
            parse("@IsNull(taxNumber)"),
            FilterNode::unary(UnaryOperator::IsNull, FilterNode::field("taxNumber"))
        );
        assert_eq!(
            parse("@in(status)"),
            FilterNode::call(CallOperator::In, FilterNode::field("status"), vec![])
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let filter =
            "@contains(name, 'hq') AND (capacity >= 10 OR NOT isActive) AND openedOn < '2024-01-01'";
        assert_eq!(parse(filter), parse(filter));
    }

    #[test]
    fn test_depth_limit_rejects_long_chains() {
        let filter = (0..8)
            .map(|i| format!("a == {i}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let err = parser().parse(&filter).unwrap_err();
        assert!(matches!(err, QueryError::ExpressionTooComplex { max: 8, .. }));
    }

    #[test]
    fn test_depth_limit_rejects_deep_nesting() {
        let filter = format!("{}a == 1{}", "(".repeat(50_000), ")".repeat(50_000));
        let err = FilterParser::new(32, 200_000).parse(&filter).unwrap_err();
        assert!(matches!(err, QueryError::ExpressionTooComplex { max: 32, .. }));
    }

    #[test]
    fn test_depth_limit_rejects_repeated_not() {
        let filter = format!("{}a", "NOT ".repeat(10_000));
        let err = FilterParser::new(32, 200_000).parse(&filter).unwrap_err();
        assert!(matches!(err, QueryError::ExpressionTooComplex { .. }));
    }

    #[test]
    fn test_groups_within_the_limit_are_accepted() {
        assert_eq!(parse("((((a == 1))))").depth(), 2);
    }

    #[test]
    fn test_filter_length_limit() {
        let err = FilterParser::new(8, 10)
            .parse("name == 'a long value'")
            .unwrap_err();
        assert_eq!(err, QueryError::FilterTooLong { length: 22, max: 10 });
    }

    #[test]
    fn test_unbalanced_parentheses() {
        let (message, position) = parse_error("(a == 1");
        assert!(message.contains("unbalanced"));
        assert_eq!(position, 7);

        let (message, position) = parse_error("a == 1)");
        assert!(message.contains("unbalanced"));
        assert_eq!(position, 6);
    }

    #[test]
    fn test_empty_expression() {
        let (message, _) = parse_error("   ");
        assert_eq!(message, "empty expression");

        let (message, position) = parse_error("()");
        assert!(message.contains("empty expression"));
        assert_eq!(position, 1);
    }

    #[test]
    fn test_incomplete_comparison() {
        let (message, position) = parse_error("a ==");
        assert_eq!(message, "unexpected end of filter");
        assert_eq!(position, 4);
    }

    #[test]
    fn test_unknown_function() {
        let (message, position) = parse_error("x == 1 AND @matches(name, 'a')");
        assert!(message.contains("unknown function '@matches'"));
        assert_eq!(position, 11);
    }

    #[test]
    fn test_function_arguments_must_be_literals() {
        let (message, _) = parse_error("@in(status, other)");
        assert!(message.contains("literal"));

        let (message, _) = parse_error("@contains('x', name)");
        assert!(message.contains("field name"));
    }

    #[test]
    fn test_null_checks_take_a_single_field() {
        let err = parser().parse("@isnull(name, 1)").unwrap_err();
        assert_eq!(
            err,
            QueryError::ArityMismatch {
                function: "@isnull".to_string(),
                expected: "1".to_string(),
                found: 2,
            }
        );
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let (message, position) = parse_error("a == 1 b");
        assert!(message.contains("unexpected token 'b'"));
        assert_eq!(position, 7);
    }
}
