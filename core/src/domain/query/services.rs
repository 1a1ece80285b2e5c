use tracing::{debug, instrument};

use crate::domain::query::{
    binder::{Predicate, bind},
    errors::QueryError,
    field_map::FieldMap,
    pagination::Pagination,
    parser::FilterParser,
    sort::apply_sort,
    value_objects::{CompiledQuery, QueryLimits, QueryRequest},
};

/// Turns raw list parameters into a [`CompiledQuery`] for one entity type.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    parser: FilterParser,
    limits: QueryLimits,
}

impl QueryCompiler {
    pub fn new(limits: QueryLimits) -> Self {
        Self {
            parser: FilterParser::new(limits.max_filter_depth, limits.max_filter_length),
            limits,
        }
    }

    #[instrument(
        skip(self, request, fields),
        fields(
            filter = request.filter.as_deref(),
            sort = request.sort.as_deref(),
            include = request.include.as_deref()
        )
    )]
    pub fn compile<T: 'static>(
        &self,
        request: &QueryRequest,
        fields: &FieldMap<T>,
    ) -> Result<CompiledQuery<T>, QueryError> {
        let includes = fields.parse_includes(request.include.as_deref())?;

        let predicate = match request.filter.as_deref().map(str::trim) {
            Some(filter) if !filter.is_empty() => {
                let ast = self.parser.parse(filter)?;
                bind(&ast, fields)?
            }
            _ => Predicate::always(),
        };

        let order = apply_sort(request.sort.as_deref(), fields, self.limits.strict_sort)?;
        let pagination = Pagination::new(request.page, request.page_size, &self.limits);

        debug!(
            page = pagination.page(),
            page_size = pagination.page_size(),
            "compiled query"
        );

        Ok(CompiledQuery {
            predicate,
            order,
            includes,
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::includes::IncludeOptions;

    #[derive(Debug, Clone)]
    struct Room {
        name: String,
        seats: i64,
    }

    fn fields() -> FieldMap<Room> {
        FieldMap::new()
            .add("name", |r: &Room| r.name.clone(), true, true)
            .and_then(|m| m.add("seats", |r: &Room| r.seats, true, true))
            .unwrap()
            .with_includes(IncludeOptions::new(["building"], 1, 1))
    }

    fn rooms() -> Vec<Room> {
        (1..=25)
            .map(|i| Room {
                name: format!("room-{i:02}"),
                seats: i,
            })
            .collect()
    }

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(QueryLimits::default())
    }

    #[test]
    fn test_blank_filter_matches_everything() {
        let request = QueryRequest {
            filter: Some("   ".to_string()),
            ..QueryRequest::default()
        };
        let query = compiler().compile(&request, &fields()).unwrap();
        assert!(rooms().iter().all(|room| query.predicate.evaluate(room)));
        assert!(query.order.is_empty());
        assert_eq!(query.pagination.page(), 1);
        assert_eq!(query.pagination.page_size(), 20);
    }

    #[test]
    fn test_compile_combines_every_part() {
        let request = QueryRequest {
            filter: Some("seats > 5".to_string()),
            sort: Some("-seats".to_string()),
            include: Some("Building".to_string()),
            page: Some(2),
            page_size: Some(10),
        };
        let query = compiler().compile(&request, &fields()).unwrap();

        let mut matching: Vec<Room> = rooms()
            .into_iter()
            .filter(|room| query.predicate.evaluate(room))
            .collect();
        query.order.sort(&mut matching);

        assert_eq!(matching.len(), 20);
        assert_eq!(matching[0].seats, 25);
        assert!(query.includes.contains("building"));
        assert_eq!(query.pagination.skip(), 10);
    }

    #[test]
    fn test_invalid_include_fails_before_the_filter_is_parsed() {
        let request = QueryRequest {
            filter: Some("((".to_string()),
            include: Some("floors".to_string()),
            ..QueryRequest::default()
        };
        assert!(matches!(
            compiler().compile(&request, &fields()),
            Err(QueryError::InvalidInclude { .. })
        ));
    }

    #[test]
    fn test_depth_limit_applies_before_binding() {
        let compiler = QueryCompiler::new(QueryLimits {
            max_filter_depth: 3,
            ..QueryLimits::default()
        });
        let request = QueryRequest {
            filter: Some("unknown == 1 AND unknown == 2 AND unknown == 3".to_string()),
            ..QueryRequest::default()
        };
        assert!(matches!(
            compiler.compile(&request, &fields()),
            Err(QueryError::ExpressionTooComplex { max: 3, .. })
        ));
    }

    #[test]
    fn test_and_filter_narrows_the_result() {
        let query = compiler()
            .compile(&QueryRequest::default(), &fields())
            .unwrap()
            .and_filter(Predicate::new(|room: &Room| room.seats % 2 == 0));
        assert_eq!(
            rooms()
                .iter()
                .filter(|room| query.predicate.evaluate(room))
                .count(),
            12
        );
    }
}
