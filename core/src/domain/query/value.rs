use std::{cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::query::{ast::Literal, errors::QueryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Double,
    Boolean,
    DateTime,
    Date,
    Uuid,
}

impl FieldType {
    /// Types that accept `>`, `>=`, `<`, `<=` and `@between`.
    pub fn supports_ordering(&self) -> bool {
        matches!(
            self,
            FieldType::String
                | FieldType::Integer
                | FieldType::Double
                | FieldType::DateTime
                | FieldType::Date
        )
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Double)
    }

    pub fn is_compatible_with(&self, other: &FieldType) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "datetime",
            FieldType::Date => "date",
            FieldType::Uuid => "uuid",
        };
        write!(f, "{name}")
    }
}

/// A value read from an entity, or a literal after coercion to a field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Uuid(Uuid),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Orders two non-null values of compatible kinds. Integers and doubles
    /// compare numerically; anything else across kinds is incomparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Double(a), FieldValue::Double(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Double(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Double(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Null only equals null.
    pub fn equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Null, _) | (_, FieldValue::Null) => false,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }

    /// Total order used for sorting: nulls first, incomparable values tie.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }

    /// Converts a literal to the representation used by a field of type
    /// `field_type`, failing when the literal cannot stand for such a value.
    pub fn coerce(
        literal: &Literal,
        field_type: FieldType,
        field: &str,
    ) -> Result<FieldValue, QueryError> {
        let mismatch = || QueryError::type_mismatch(field, field_type, describe(literal));

        let value = match (field_type, literal) {
            (_, Literal::Null) => FieldValue::Null,
            (FieldType::String, Literal::String(value)) => FieldValue::String(value.clone()),
            (FieldType::Integer, Literal::Integer(value)) => FieldValue::Integer(*value),
            (FieldType::Integer, Literal::Double(value)) => FieldValue::Double(*value),
            (FieldType::Integer, Literal::String(value)) => value
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| mismatch())?,
            (FieldType::Double, Literal::Integer(value)) => FieldValue::Double(*value as f64),
            (FieldType::Double, Literal::Double(value)) => FieldValue::Double(*value),
            (FieldType::Double, Literal::String(value)) => value
                .trim()
                .parse::<f64>()
                .map(FieldValue::Double)
                .map_err(|_| mismatch())?,
            (FieldType::Boolean, Literal::Boolean(value)) => FieldValue::Boolean(*value),
            (FieldType::Boolean, Literal::String(value)) => {
                if value.eq_ignore_ascii_case("true") {
                    FieldValue::Boolean(true)
                } else if value.eq_ignore_ascii_case("false") {
                    FieldValue::Boolean(false)
                } else {
                    return Err(mismatch());
                }
            }
            (FieldType::DateTime, Literal::String(value)) => {
                parse_datetime(value.trim()).map(FieldValue::DateTime).ok_or_else(mismatch)?
            }
            (FieldType::Date, Literal::String(value)) => {
                parse_date(value.trim()).map(FieldValue::Date).ok_or_else(mismatch)?
            }
            (FieldType::Uuid, Literal::String(value)) => Uuid::parse_str(value.trim())
                .map(FieldValue::Uuid)
                .map_err(|_| mismatch())?,
            _ => return Err(mismatch()),
        };

        Ok(value)
    }
}

fn describe(literal: &Literal) -> String {
    match literal {
        Literal::Null => literal.type_name().to_string(),
        _ => format!("{} {}", literal.type_name(), literal),
    }
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Conversion used by field accessors. The associated type tag lets a field
/// map learn a field's type from its accessor alone.
pub trait IntoFieldValue {
    const FIELD_TYPE: FieldType;

    fn into_field_value(self) -> FieldValue;
}

macro_rules! impl_into_field_value {
    ($ty:ty, $field_type:ident, $variant:ident) => {
        impl IntoFieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::$field_type;

            fn into_field_value(self) -> FieldValue {
                FieldValue::$variant(self.into())
            }
        }
    };
}

impl_into_field_value!(String, String, String);
impl_into_field_value!(i64, Integer, Integer);
impl_into_field_value!(i32, Integer, Integer);
impl_into_field_value!(u32, Integer, Integer);
impl_into_field_value!(f64, Double, Double);
impl_into_field_value!(f32, Double, Double);
impl_into_field_value!(bool, Boolean, Boolean);
impl_into_field_value!(DateTime<Utc>, DateTime, DateTime);
impl_into_field_value!(NaiveDate, Date, Date);
impl_into_field_value!(Uuid, Uuid, Uuid);

impl<V: IntoFieldValue> IntoFieldValue for Option<V> {
    const FIELD_TYPE: FieldType = V::FIELD_TYPE;

    fn into_field_value(self) -> FieldValue {
        self.map_or(FieldValue::Null, IntoFieldValue::into_field_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_compare_across_kinds() {
        assert_eq!(
            FieldValue::Integer(10).compare(&FieldValue::Double(10.5)),
            Some(Ordering::Less)
        );
        assert!(FieldValue::Double(3.0).equals(&FieldValue::Integer(3)));
        assert_eq!(
            FieldValue::String("a".into()).compare(&FieldValue::Integer(1)),
            None
        );
    }

    #[test]
    fn test_null_equality_and_sort_order() {
        assert!(FieldValue::Null.equals(&FieldValue::Null));
        assert!(!FieldValue::Null.equals(&FieldValue::Integer(0)));
        assert_eq!(
            FieldValue::Null.sort_cmp(&FieldValue::Integer(-100)),
            Ordering::Less
        );
    }

    #[test]
    fn test_coerce_string_to_dates() {
        let datetime = FieldValue::coerce(
            &Literal::String("2024-03-01".into()),
            FieldType::DateTime,
            "createdAt",
        )
        .expect("plain date should coerce");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc())
            .expect("valid date");
        assert_eq!(datetime, FieldValue::DateTime(expected));

        let date = FieldValue::coerce(
            &Literal::String("2024-03-01T10:30:00+02:00".into()),
            FieldType::Date,
            "openedOn",
        )
        .expect("rfc3339 should coerce to a date");
        assert_eq!(
            date,
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"))
        );
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(
            FieldValue::coerce(&Literal::Integer(5), FieldType::Double, "budget"),
            Ok(FieldValue::Double(5.0))
        );
        assert_eq!(
            FieldValue::coerce(&Literal::String("42".into()), FieldType::Integer, "capacity"),
            Ok(FieldValue::Integer(42))
        );
    }

    #[test]
    fn test_coerce_failure_is_type_mismatch() {
        let err = FieldValue::coerce(
            &Literal::String("soon".into()),
            FieldType::Date,
            "openedOn",
        )
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::TypeMismatch {
                field: "openedOn".to_string(),
                expected: "date".to_string(),
                found: "string \"soon\"".to_string(),
            }
        );

        assert!(matches!(
            FieldValue::coerce(&Literal::Integer(1), FieldType::String, "name"),
            Err(QueryError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_option_accessors_produce_null() {
        assert_eq!(None::<String>.into_field_value(), FieldValue::Null);
        assert_eq!(<Option<f64> as IntoFieldValue>::FIELD_TYPE, FieldType::Double);
    }
}
