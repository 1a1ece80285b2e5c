use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl BinaryOperator {
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Gt | BinaryOperator::Gte | BinaryOperator::Lt | BinaryOperator::Lte
        )
    }

    /// The operator to use when both operands swap sides, `5 < price` becoming `price > 5`.
    pub fn mirrored(&self) -> Self {
        match self {
            BinaryOperator::Gt => BinaryOperator::Lt,
            BinaryOperator::Gte => BinaryOperator::Lte,
            BinaryOperator::Lt => BinaryOperator::Gt,
            BinaryOperator::Lte => BinaryOperator::Gte,
            other => *other,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Eq => "==",
            BinaryOperator::Neq => "!=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Gte => ">=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Lte => "<=",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    IsNull,
    IsNotNull,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnaryOperator::Not => "NOT",
            UnaryOperator::IsNull => "@isnull",
            UnaryOperator::IsNotNull => "@notnull",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOperator {
    Contains,
    StartsWith,
    EndsWith,
    In,
    Between,
}

impl fmt::Display for CallOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallOperator::Contains => "@contains",
            CallOperator::StartsWith => "@startswith",
            CallOperator::EndsWith => "@endswith",
            CallOperator::In => "@in",
            CallOperator::Between => "@between",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    Null,
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Double(_) => "double",
            Literal::Integer(_) => "integer",
            Literal::Boolean(_) => "boolean",
            Literal::Null => "null",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(value) => write!(f, "\"{value}\""),
            Literal::Double(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Null => write!(f, "null"),
        }
    }
}

/// Parsed filter expression.
///
/// Field names are kept as written; they are only resolved against a
/// field map when the tree is bound.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Binary {
        operator: BinaryOperator,
        left: Box<FilterNode>,
        right: Box<FilterNode>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<FilterNode>,
    },
    Call {
        operator: CallOperator,
        target: Box<FilterNode>,
        arguments: Vec<FilterNode>,
    },
    Field(String),
    Literal(Literal),
    Group(Box<FilterNode>),
}

impl FilterNode {
    pub fn binary(operator: BinaryOperator, left: FilterNode, right: FilterNode) -> Self {
        FilterNode::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: FilterNode) -> Self {
        FilterNode::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn call(operator: CallOperator, target: FilterNode, arguments: Vec<FilterNode>) -> Self {
        FilterNode::Call {
            operator,
            target: Box::new(target),
            arguments,
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        FilterNode::Field(name.into())
    }

    pub fn group(inner: FilterNode) -> Self {
        FilterNode::Group(Box::new(inner))
    }

    pub fn string(value: impl Into<String>) -> Self {
        FilterNode::Literal(Literal::String(value.into()))
    }

    pub fn double(value: f64) -> Self {
        FilterNode::Literal(Literal::Double(value))
    }

    pub fn integer(value: i64) -> Self {
        FilterNode::Literal(Literal::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        FilterNode::Literal(Literal::Boolean(value))
    }

    pub fn null() -> Self {
        FilterNode::Literal(Literal::Null)
    }

    /// Height of the tree. Leaves count as one and groups add nothing.
    pub fn depth(&self) -> usize {
        match self {
            FilterNode::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
            FilterNode::Unary { operand, .. } => 1 + operand.depth(),
            FilterNode::Call {
                target, arguments, ..
            } => {
                let deepest_argument = arguments.iter().map(FilterNode::depth).max().unwrap_or(0);
                1 + target.depth().max(deepest_argument)
            }
            FilterNode::Field(_) | FilterNode::Literal(_) => 1,
            FilterNode::Group(inner) => inner.depth(),
        }
    }

    /// Strips any number of enclosing groups.
    pub fn ungrouped(&self) -> &FilterNode {
        let mut node = self;
        while let FilterNode::Group(inner) = node {
            node = inner;
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_depth_is_one() {
        assert_eq!(FilterNode::field("name").depth(), 1);
        assert_eq!(FilterNode::integer(4).depth(), 1);
    }

    #[test]
    fn test_group_is_transparent_to_depth() {
        let comparison = FilterNode::binary(
            BinaryOperator::Eq,
            FilterNode::field("name"),
            FilterNode::string("Acme"),
        );
        let grouped = FilterNode::group(FilterNode::group(comparison.clone()));

        assert_eq!(comparison.depth(), 2);
        assert_eq!(grouped.depth(), 2);
        assert_eq!(grouped.ungrouped(), &comparison);
    }

    #[test]
    fn test_depth_follows_deepest_branch() {
        let left = FilterNode::unary(
            UnaryOperator::Not,
            FilterNode::binary(
                BinaryOperator::Gt,
                FilterNode::field("capacity"),
                FilterNode::integer(10),
            ),
        );
        let right = FilterNode::call(
            CallOperator::In,
            FilterNode::field("status"),
            vec![FilterNode::string("Active")],
        );
        let tree = FilterNode::binary(BinaryOperator::And, left, right);

        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn test_mirrored_operator() {
        assert_eq!(BinaryOperator::Lt.mirrored(), BinaryOperator::Gt);
        assert_eq!(BinaryOperator::Gte.mirrored(), BinaryOperator::Lte);
        assert_eq!(BinaryOperator::Eq.mirrored(), BinaryOperator::Eq);
    }
}
