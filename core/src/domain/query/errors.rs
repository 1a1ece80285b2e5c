use thiserror::Error;

/// Failures produced while turning a raw query request into a compiled query.
///
/// Every variant apart from [`QueryError::DuplicateField`] and
/// [`QueryError::InvalidFieldName`] is a client error and is reported as a
/// bad request. The two configuration variants can only surface while field
/// maps are being built at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid filter at position {position} near '{token}': {message} (filter: \"{filter}\")")]
    Parse {
        message: String,
        position: usize,
        token: String,
        filter: String,
    },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("field '{field}' cannot be used in a filter")]
    FieldNotFilterable { field: String },

    #[error("field '{field}' cannot be used for sorting")]
    FieldNotSortable { field: String },

    #[error("type mismatch on '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("operator '{operator}' is not supported for '{field}'")]
    UnsupportedOperator { operator: String, field: String },

    #[error("function '{function}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("invalid include '{include}': {reason}")]
    InvalidInclude { include: String, reason: String },

    #[error("filter expression too complex: depth {depth} exceeds maximum {max}")]
    ExpressionTooComplex { depth: usize, max: usize },

    #[error("filter too long: {length} characters exceeds maximum {max}")]
    FilterTooLong { length: usize, max: usize },

    #[error("field '{field}' is registered more than once")]
    DuplicateField { field: String },

    #[error("'{field}' is not a valid field name")]
    InvalidFieldName { field: String },
}

impl QueryError {
    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        QueryError::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn unsupported(operator: impl ToString, field: impl Into<String>) -> Self {
        QueryError::UnsupportedOperator {
            operator: operator.to_string(),
            field: field.into(),
        }
    }

    /// Whether the error points at the caller's request rather than at the
    /// server's field configuration.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            QueryError::DuplicateField { .. } | QueryError::InvalidFieldName { .. }
        )
    }
}
