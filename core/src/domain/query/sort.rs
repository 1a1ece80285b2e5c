use std::{cmp::Ordering, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::query::{
    errors::QueryError,
    field_map::{Accessor, FieldMap},
    value::IntoFieldValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One entry of a sort string, before it is resolved against a field map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse sort string like "field1,-field2,field3"
    pub fn parse_list(s: &str) -> Vec<SortSpec> {
        let mut sorts = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some(stripped) = part.strip_prefix('-') {
                sorts.push(SortSpec {
                    field: stripped.trim().to_string(),
                    direction: SortDirection::Desc,
                });
            } else {
                sorts.push(SortSpec {
                    field: part.to_string(),
                    direction: SortDirection::Asc,
                });
            }
        }
        sorts
    }
}

pub struct SortKey<T> {
    field: String,
    direction: SortDirection,
    accessor: Accessor<T>,
}

impl<T> SortKey<T> {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

/// Multi-key ordering, most significant key first.
pub struct SortOrder<T> {
    keys: Vec<SortKey<T>>,
}

impl<T> Clone for SortOrder<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<T> fmt::Debug for SortOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.keys.iter().map(|key| (&key.field, key.direction)))
            .finish()
    }
}

impl<T> Default for SortOrder<T> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<T: 'static> SortOrder<T> {
    /// Ordering on a single attribute that need not be registered in a field map.
    pub fn by<V, F>(field: &str, accessor: F, direction: SortDirection) -> Self
    where
        V: IntoFieldValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            keys: vec![SortKey {
                field: field.to_string(),
                direction,
                accessor: Arc::new(move |entity: &T| accessor(entity).into_field_value()),
            }],
        }
    }
}

impl<T> SortOrder<T> {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[SortKey<T>] {
        &self.keys
    }

    /// Appends `other` as lower-priority keys.
    pub fn then(mut self, other: SortOrder<T>) -> Self {
        self.keys.extend(other.keys);
        self
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.keys {
            let ordering = (key.accessor)(a).sort_cmp(&(key.accessor)(b));
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable: items that tie on every key keep their relative order.
    pub fn sort(&self, items: &mut [T]) {
        if self.keys.is_empty() {
            return;
        }
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Resolves a sort string against `fields`.
///
/// With `strict` unset, unknown and unsortable fields are dropped with a
/// warning and the remaining keys still apply. With `strict` set they fail
/// the request like filter fields do.
pub fn apply_sort<T>(
    text: Option<&str>,
    fields: &FieldMap<T>,
    strict: bool,
) -> Result<SortOrder<T>, QueryError> {
    let Some(text) = text else {
        return Ok(SortOrder::default());
    };

    let mut keys = Vec::new();
    for spec in SortSpec::parse_list(text) {
        match fields.sortable(&spec.field) {
            Ok(descriptor) => keys.push(SortKey {
                field: descriptor.name().to_string(),
                direction: spec.direction,
                accessor: descriptor.accessor(),
            }),
            Err(err) if strict => return Err(err),
            Err(err) => warn!(field = %spec.field, reason = %err, "skipping sort field"),
        }
    }

    let order = SortOrder { keys };
    debug!(order = ?order, "resolved sort order");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        created_at: i64,
        secret: String,
    }

    fn row(id: u32, name: &str, created_at: i64) -> Row {
        Row {
            id,
            name: name.to_string(),
            created_at,
            secret: String::new(),
        }
    }

    fn fields() -> FieldMap<Row> {
        FieldMap::new()
            .add("name", |r: &Row| r.name.clone(), true, true)
            .and_then(|m| m.add("createdAt", |r: &Row| r.created_at, true, true))
            .and_then(|m| m.add("secret", |r: &Row| r.secret.clone(), true, false))
            .unwrap()
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_parse() {
        let sorts = SortSpec::parse_list("-risk_score, created_at,,");
        assert_eq!(sorts.len(), 2);
        assert_eq!(sorts[0].field, "risk_score");
        assert_eq!(sorts[0].direction, SortDirection::Desc);
        assert_eq!(sorts[1].field, "created_at");
        assert_eq!(sorts[1].direction, SortDirection::Asc);
    }

    #[test]
    fn test_descending_then_ascending() {
        let order = apply_sort(Some("-createdAt,name"), &fields(), false).unwrap();
        let mut rows = vec![
            row(1, "delta", 10),
            row(2, "alpha", 20),
            row(3, "charlie", 20),
            row(4, "bravo", 10),
            row(5, "alpha", 5),
        ];
        order.sort(&mut rows);
        assert_eq!(ids(&rows), vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn test_ties_keep_their_original_order() {
        let order = apply_sort(Some("-createdAt"), &fields(), false).unwrap();
        let mut rows = vec![row(1, "b", 7), row(2, "a", 7), row(3, "c", 9), row(4, "d", 7)];
        order.sort(&mut rows);
        assert_eq!(ids(&rows), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_unknown_and_unsortable_fields_are_skipped() {
        let order = apply_sort(Some("secret,-colour,NAME"), &fields(), false).unwrap();
        assert_eq!(order.keys().len(), 1);
        assert_eq!(order.keys()[0].field(), "name");
        assert_eq!(order.keys()[0].direction(), SortDirection::Asc);
    }

    #[test]
    fn test_strict_mode_rejects_bad_fields() {
        assert_eq!(
            apply_sort(Some("name,secret"), &fields(), true).unwrap_err(),
            QueryError::FieldNotSortable {
                field: "secret".to_string()
            }
        );
        assert!(matches!(
            apply_sort(Some("-colour"), &fields(), true),
            Err(QueryError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_fallback_keys_break_ties() {
        let order = apply_sort(Some("createdAt"), &fields(), false)
            .unwrap()
            .then(SortOrder::by("id", |r: &Row| r.id, SortDirection::Desc));
        let mut rows = vec![row(1, "a", 1), row(2, "b", 1), row(3, "c", 0)];
        order.sort(&mut rows);
        assert_eq!(ids(&rows), vec![3, 2, 1]);
    }

    #[test]
    fn test_missing_sort_text_yields_no_keys() {
        assert!(apply_sort(None, &fields(), true).unwrap().is_empty());
    }
}
