use std::{cmp::Ordering, fmt, sync::Arc};

use crate::domain::query::{
    ast::{BinaryOperator, CallOperator, FilterNode, Literal, UnaryOperator},
    errors::QueryError,
    field_map::{Accessor, FieldMap},
    value::{FieldType, FieldValue},
};

/// Compiled boolean test over an entity.
///
/// Cheap to clone; combining predicates never re-reads the filter text.
pub struct Predicate<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

impl<T: 'static> Predicate<T> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn evaluate(&self, entity: &T) -> bool {
        (self.test)(entity)
    }

    pub fn and(self, other: Predicate<T>) -> Self {
        Self::new(move |entity| self.evaluate(entity) && other.evaluate(entity))
    }

    pub fn or(self, other: Predicate<T>) -> Self {
        Self::new(move |entity| self.evaluate(entity) || other.evaluate(entity))
    }

    pub fn not(self) -> Self {
        Self::new(move |entity| !self.evaluate(entity))
    }
}

/// Compiles a parsed filter into a predicate over `T`.
///
/// Field names resolve through `fields` and must be filterable. Literals are
/// coerced to the type of the field they are compared with. CONTAINS,
/// STARTS_WITH and ENDS_WITH ignore case.
pub fn bind<T: 'static>(
    node: &FilterNode,
    fields: &FieldMap<T>,
) -> Result<Predicate<T>, QueryError> {
    ExpressionBinder { fields }.predicate(node)
}

struct BoundField<T> {
    name: String,
    field_type: FieldType,
    accessor: Accessor<T>,
}

enum Operand<T> {
    Field(BoundField<T>),
    Constant(Literal),
}

struct ExpressionBinder<'a, T> {
    fields: &'a FieldMap<T>,
}

impl<T: 'static> ExpressionBinder<'_, T> {
    fn predicate(&self, node: &FilterNode) -> Result<Predicate<T>, QueryError> {
        match node {
            FilterNode::Group(inner) => self.predicate(inner),
            FilterNode::Binary {
                operator: BinaryOperator::And,
                left,
                right,
            } => Ok(self.predicate(left)?.and(self.predicate(right)?)),
            FilterNode::Binary {
                operator: BinaryOperator::Or,
                left,
                right,
            } => Ok(self.predicate(left)?.or(self.predicate(right)?)),
            FilterNode::Binary {
                operator,
                left,
                right,
            } => self.comparison(*operator, left, right),
            FilterNode::Unary {
                operator: UnaryOperator::Not,
                operand,
            } => Ok(self.predicate(operand)?.not()),
            FilterNode::Unary { operator, operand } => self.null_check(*operator, operand),
            FilterNode::Call {
                operator,
                target,
                arguments,
            } => self.call(*operator, target, arguments),
            FilterNode::Field(name) => {
                let field = self.field(name)?;
                if field.field_type != FieldType::Boolean {
                    return Err(QueryError::type_mismatch(
                        field.name,
                        FieldType::Boolean,
                        field.field_type,
                    ));
                }
                let accessor = field.accessor;
                Ok(Predicate::new(move |entity| {
                    accessor(entity) == FieldValue::Boolean(true)
                }))
            }
            FilterNode::Literal(Literal::Boolean(value)) => {
                let value = *value;
                Ok(Predicate::new(move |_| value))
            }
            FilterNode::Literal(literal) => Err(QueryError::type_mismatch(
                EXPRESSION,
                FieldType::Boolean,
                literal_description(literal),
            )),
        }
    }

    fn field(&self, name: &str) -> Result<BoundField<T>, QueryError> {
        let descriptor = self.fields.filterable(name)?;
        Ok(BoundField {
            name: descriptor.name().to_string(),
            field_type: descriptor.field_type(),
            accessor: descriptor.accessor(),
        })
    }

    fn target_field(
        &self,
        operator: impl fmt::Display,
        node: &FilterNode,
    ) -> Result<BoundField<T>, QueryError> {
        match node.ungrouped() {
            FilterNode::Field(name) => self.field(name),
            _ => Err(QueryError::unsupported(operator, "a non-field operand")),
        }
    }

    fn operand(
        &self,
        operator: BinaryOperator,
        node: &FilterNode,
    ) -> Result<Operand<T>, QueryError> {
        match node.ungrouped() {
            FilterNode::Field(name) => Ok(Operand::Field(self.field(name)?)),
            FilterNode::Literal(literal) => Ok(Operand::Constant(literal.clone())),
            _ => Err(QueryError::unsupported(operator, "a nested expression")),
        }
    }

    fn comparison(
        &self,
        operator: BinaryOperator,
        left: &FilterNode,
        right: &FilterNode,
    ) -> Result<Predicate<T>, QueryError> {
        match (self.operand(operator, left)?, self.operand(operator, right)?) {
            (Operand::Field(field), Operand::Constant(literal)) => {
                field_against_literal(operator, field, &literal)
            }
            (Operand::Constant(literal), Operand::Field(field)) => {
                field_against_literal(operator.mirrored(), field, &literal)
            }
            (Operand::Field(left), Operand::Field(right)) => {
                field_against_field(operator, left, right)
            }
            (Operand::Constant(left), Operand::Constant(right)) => {
                literal_against_literal(operator, &left, &right)
            }
        }
    }

    fn null_check(
        &self,
        operator: UnaryOperator,
        operand: &FilterNode,
    ) -> Result<Predicate<T>, QueryError> {
        let accessor = self.target_field(operator, operand)?.accessor;
        let expect_null = operator == UnaryOperator::IsNull;
        Ok(Predicate::new(move |entity| {
            accessor(entity).is_null() == expect_null
        }))
    }

    fn call(
        &self,
        operator: CallOperator,
        target: &FilterNode,
        arguments: &[FilterNode],
    ) -> Result<Predicate<T>, QueryError> {
        let field = self.target_field(operator, target)?;
        let literals = arguments
            .iter()
            .map(|argument| match argument.ungrouped() {
                FilterNode::Literal(literal) => Ok(literal),
                _ => Err(QueryError::unsupported(operator, "a non-literal argument")),
            })
            .collect::<Result<Vec<&Literal>, QueryError>>()?;

        match operator {
            CallOperator::Contains | CallOperator::StartsWith | CallOperator::EndsWith => {
                text_match(operator, field, &literals)
            }
            CallOperator::In => membership(field, &literals),
            CallOperator::Between => between(field, &literals),
        }
    }
}

fn ordering_satisfies(operator: BinaryOperator, ordering: Ordering) -> bool {
    match operator {
        BinaryOperator::Eq => ordering == Ordering::Equal,
        BinaryOperator::Neq => ordering != Ordering::Equal,
        BinaryOperator::Gt => ordering == Ordering::Greater,
        BinaryOperator::Gte => ordering != Ordering::Less,
        BinaryOperator::Lt => ordering == Ordering::Less,
        BinaryOperator::Lte => ordering != Ordering::Greater,
        BinaryOperator::And | BinaryOperator::Or => false,
    }
}

fn evaluate(operator: BinaryOperator, left: &FieldValue, right: &FieldValue) -> bool {
    match operator {
        BinaryOperator::Eq => left.equals(right),
        BinaryOperator::Neq => !left.equals(right),
        _ => left
            .compare(right)
            .is_some_and(|ordering| ordering_satisfies(operator, ordering)),
    }
}

fn field_against_literal<T: 'static>(
    operator: BinaryOperator,
    field: BoundField<T>,
    literal: &Literal,
) -> Result<Predicate<T>, QueryError> {
    let value = FieldValue::coerce(literal, field.field_type, &field.name)?;

    if operator.is_ordering() {
        if !field.field_type.supports_ordering() {
            return Err(QueryError::unsupported(operator, field.name));
        }
        if value.is_null() {
            return Err(QueryError::type_mismatch(field.name, field.field_type, "null"));
        }
    }

    let accessor = field.accessor;
    Ok(Predicate::new(move |entity| {
        evaluate(operator, &accessor(entity), &value)
    }))
}

fn field_against_field<T: 'static>(
    operator: BinaryOperator,
    left: BoundField<T>,
    right: BoundField<T>,
) -> Result<Predicate<T>, QueryError> {
    if !left.field_type.is_compatible_with(&right.field_type) {
        return Err(QueryError::type_mismatch(
            right.name,
            left.field_type,
            right.field_type,
        ));
    }
    if operator.is_ordering() && !left.field_type.supports_ordering() {
        return Err(QueryError::unsupported(operator, left.name));
    }

    let (left, right) = (left.accessor, right.accessor);
    Ok(Predicate::new(move |entity| {
        evaluate(operator, &left(entity), &right(entity))
    }))
}

/// Stands in for the field name when an error concerns a bare literal.
const EXPRESSION: &str = "expression";

fn literal_description(literal: &Literal) -> String {
    format!("{} {literal}", literal.type_name())
}

fn literal_value(literal: &Literal) -> FieldValue {
    match literal {
        Literal::String(value) => FieldValue::String(value.clone()),
        Literal::Double(value) => FieldValue::Double(*value),
        Literal::Integer(value) => FieldValue::Integer(*value),
        Literal::Boolean(value) => FieldValue::Boolean(*value),
        Literal::Null => FieldValue::Null,
    }
}

fn literal_against_literal<T: 'static>(
    operator: BinaryOperator,
    left: &Literal,
    right: &Literal,
) -> Result<Predicate<T>, QueryError> {
    let (left_value, right_value) = (literal_value(left), literal_value(right));
    let has_null = left_value.is_null() || right_value.is_null();

    if operator.is_ordering() && has_null {
        let other = if left_value.is_null() { right } else { left };
        return Err(QueryError::type_mismatch(EXPRESSION, other.type_name(), "null"));
    }
    if !has_null && left_value.compare(&right_value).is_none() {
        return Err(QueryError::type_mismatch(
            EXPRESSION,
            left.type_name(),
            literal_description(right),
        ));
    }

    let result = evaluate(operator, &left_value, &right_value);
    Ok(Predicate::new(move |_| result))
}

fn single_string_argument(
    operator: CallOperator,
    field: &BoundField<impl Sized>,
    literals: &[&Literal],
) -> Result<String, QueryError> {
    let [literal] = literals else {
        return Err(QueryError::ArityMismatch {
            function: operator.to_string(),
            expected: "2".to_string(),
            found: literals.len() + 1,
        });
    };
    match FieldValue::coerce(literal, FieldType::String, &field.name)? {
        FieldValue::String(value) => Ok(value),
        _ => Err(QueryError::type_mismatch(
            field.name.clone(),
            FieldType::String,
            literal.type_name(),
        )),
    }
}

fn text_match<T: 'static>(
    operator: CallOperator,
    field: BoundField<T>,
    literals: &[&Literal],
) -> Result<Predicate<T>, QueryError> {
    if field.field_type != FieldType::String {
        return Err(QueryError::unsupported(operator, field.name));
    }
    let needle = single_string_argument(operator, &field, literals)?.to_lowercase();

    let accessor = field.accessor;
    Ok(Predicate::new(move |entity| match accessor(entity) {
        FieldValue::String(value) => {
            let value = value.to_lowercase();
            match operator {
                CallOperator::Contains => value.contains(&needle),
                CallOperator::StartsWith => value.starts_with(&needle),
                CallOperator::EndsWith => value.ends_with(&needle),
                CallOperator::In | CallOperator::Between => false,
            }
        }
        _ => false,
    }))
}

fn membership<T: 'static>(
    field: BoundField<T>,
    literals: &[&Literal],
) -> Result<Predicate<T>, QueryError> {
    let candidates = literals
        .iter()
        .map(|literal| FieldValue::coerce(literal, field.field_type, &field.name))
        .collect::<Result<Vec<FieldValue>, QueryError>>()?;

    if candidates.is_empty() {
        return Ok(Predicate::never());
    }

    let accessor = field.accessor;
    Ok(Predicate::new(move |entity| {
        let value = accessor(entity);
        candidates.iter().any(|candidate| value.equals(candidate))
    }))
}

fn between<T: 'static>(
    field: BoundField<T>,
    literals: &[&Literal],
) -> Result<Predicate<T>, QueryError> {
    let [low, high] = literals else {
        return Err(QueryError::ArityMismatch {
            function: CallOperator::Between.to_string(),
            expected: "3".to_string(),
            found: literals.len() + 1,
        });
    };
    if !field.field_type.supports_ordering() {
        return Err(QueryError::unsupported(CallOperator::Between, field.name));
    }

    let low = FieldValue::coerce(low, field.field_type, &field.name)?;
    let high = FieldValue::coerce(high, field.field_type, &field.name)?;
    if low.is_null() || high.is_null() {
        return Err(QueryError::type_mismatch(field.name, field.field_type, "null"));
    }

    let accessor = field.accessor;
    Ok(Predicate::new(move |entity| {
        let value = accessor(entity);
        value
            .compare(&low)
            .is_some_and(|ordering| ordering != Ordering::Less)
            && value
                .compare(&high)
                .is_some_and(|ordering| ordering != Ordering::Greater)
    }))
}
