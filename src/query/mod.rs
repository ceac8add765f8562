//! # Query Engine
//!
//! Lookups over the loaded course collection:
//!
//! - `find_courses`: filter by the supplied predicates, then optionally sort
//! - `FilterOptions`: distinct values for each filterable field
//! - `CatalogStats`: aggregate counts
//!
//! Everything here is pure over a borrowed slice of records; callers own
//! the collection.

pub mod collation;
pub mod distinct;
pub mod filter;
pub mod params;
pub mod sorter;

pub use distinct::{distinct_values, CatalogStats, FilterOptions};
pub use filter::{filter_courses, Predicate};
pub use params::{CourseQuery, SortDirection, SortSpec};
pub use sorter::ResultSorter;

use crate::catalog::CourseRecord;

/// Run a course lookup: filter, then sort when a known key is given.
pub fn find_courses<'a>(records: &'a [CourseRecord], query: &CourseQuery) -> Vec<&'a CourseRecord> {
    let mut results = filter_courses(records, &query.predicates());

    if let Some(spec) = query.sort_spec() {
        ResultSorter::sort(&mut results, &spec);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, title: &str, school: &str) -> CourseRecord {
        CourseRecord {
            id: Some(id),
            foreign_course_title: Some(title.to_string()),
            pace_school: Some(school.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_without_params_returns_everything_in_order() {
        let records = vec![course(1, "b", "Lubin"), course(2, "a", "Dyson")];
        let found = find_courses(&records, &CourseQuery::default());
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_find_filters_then_sorts() {
        let records = vec![
            course(1, "Marketing", "Lubin"),
            course(2, "Accounting", "Lubin"),
            course(3, "Painting", "Dyson"),
        ];
        let query = CourseQuery {
            school: Some("Lubin".to_string()),
            sort: Some("foreign_course_title".to_string()),
            ..Default::default()
        };

        let ids: Vec<_> = find_courses(&records, &query).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
    }
}
