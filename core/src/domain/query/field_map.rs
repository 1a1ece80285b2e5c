use std::{collections::HashMap, fmt, sync::Arc, sync::OnceLock};

use regex::Regex;

use crate::domain::query::{
    errors::QueryError,
    includes::{IncludeOptions, IncludeSet},
    value::{FieldType, FieldValue, IntoFieldValue},
};

pub type Accessor<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;

static PATH_REGEX: OnceLock<Regex> = OnceLock::new();

/// Identifier segments separated by dots, as used by field and include names.
pub(crate) fn is_valid_path(name: &str) -> bool {
    PATH_REGEX
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
                .expect("path pattern is a valid regex")
        })
        .is_match(name)
}

pub struct FieldDescriptor<T> {
    name: String,
    field_type: FieldType,
    can_filter: bool,
    can_sort: bool,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    /// Name as registered, with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn can_filter(&self) -> bool {
        self.can_filter
    }

    pub fn can_sort(&self) -> bool {
        self.can_sort
    }

    pub fn accessor(&self) -> Accessor<T> {
        Arc::clone(&self.accessor)
    }

    pub fn read(&self, entity: &T) -> FieldValue {
        (self.accessor)(entity)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            field_type: self.field_type,
            can_filter: self.can_filter,
            can_sort: self.can_sort,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("can_filter", &self.can_filter)
            .field("can_sort", &self.can_sort)
            .finish_non_exhaustive()
    }
}

/// Logical fields a client may filter and sort an entity type by, plus the
/// includes it may request alongside it.
///
/// Lookups ignore case. A map is assembled once at startup and only read
/// afterwards, so it can be shared between requests without locking.
pub struct FieldMap<T> {
    fields: HashMap<String, FieldDescriptor<T>>,
    includes: IncludeOptions,
}

impl<T: 'static> FieldMap<T> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            includes: IncludeOptions::none(),
        }
    }

    /// Registers a field; its type comes from the accessor's return type.
    pub fn add<V, F>(
        mut self,
        name: &str,
        accessor: F,
        can_filter: bool,
        can_sort: bool,
    ) -> Result<Self, QueryError>
    where
        V: IntoFieldValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        if !is_valid_path(name) {
            return Err(QueryError::InvalidFieldName {
                field: name.to_string(),
            });
        }

        let key = name.to_lowercase();
        if self.fields.contains_key(&key) {
            return Err(QueryError::DuplicateField {
                field: name.to_string(),
            });
        }

        self.fields.insert(
            key,
            FieldDescriptor {
                name: name.to_string(),
                field_type: V::FIELD_TYPE,
                can_filter,
                can_sort,
                accessor: Arc::new(move |entity: &T| accessor(entity).into_field_value()),
            },
        );

        Ok(self)
    }

    pub fn with_includes(mut self, includes: IncludeOptions) -> Self {
        self.includes = includes;
        self
    }
}

impl<T> FieldMap<T> {
    pub fn try_get(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.get(&name.to_lowercase())
    }

    pub fn filterable(&self, name: &str) -> Result<&FieldDescriptor<T>, QueryError> {
        let descriptor = self.try_get(name).ok_or_else(|| QueryError::UnknownField {
            field: name.to_string(),
        })?;
        if !descriptor.can_filter {
            return Err(QueryError::FieldNotFilterable {
                field: descriptor.name.clone(),
            });
        }
        Ok(descriptor)
    }

    pub fn sortable(&self, name: &str) -> Result<&FieldDescriptor<T>, QueryError> {
        let descriptor = self.try_get(name).ok_or_else(|| QueryError::UnknownField {
            field: name.to_string(),
        })?;
        if !descriptor.can_sort {
            return Err(QueryError::FieldNotSortable {
                field: descriptor.name.clone(),
            });
        }
        Ok(descriptor)
    }

    pub fn includes(&self) -> &IncludeOptions {
        &self.includes
    }

    /// Blank or missing include text yields an empty set.
    pub fn parse_includes(&self, text: Option<&str>) -> Result<IncludeSet, QueryError> {
        match text {
            Some(text) => self.includes.parse(text),
            None => Ok(IncludeSet::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: 'static> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.fields.values().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("FieldMap")
            .field("fields", &names)
            .field("includes", &self.includes)
            .finish()
    }
}
