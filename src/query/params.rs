//! Query parameters for course lookups
//!
//! Built from the `/api/courses` query string pairs. Unknown
//! parameters are ignored and empty values count as absent.

use super::filter::Predicate;
use crate::catalog::CourseField;

/// Raw lookup parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub search: Option<String>,
    pub program: Option<String>,
    pub credits: Option<String>,
    pub aok: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl CourseQuery {
    /// Build from raw query-string pairs.
    ///
    /// Unknown keys are ignored; a repeated key keeps its first value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut query.search,
                "program" => &mut query.program,
                "credits" => &mut query.credits,
                "aok" => &mut query.aok,
                "school" => &mut query.school,
                "department" => &mut query.department,
                "sort" => &mut query.sort,
                "order" => &mut query.order,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        query
    }

    /// Predicates for every supplied filter, in a fixed order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(term) = present(&self.search) {
            predicates.push(Predicate::search(term));
        }
        if let Some(program) = present(&self.program) {
            predicates.push(Predicate::Program(program.to_string()));
        }
        if let Some(credits) = present(&self.credits) {
            predicates.push(Predicate::Credits(credits.to_string()));
        }
        if let Some(aok) = present(&self.aok) {
            predicates.push(Predicate::Aok(aok.to_string()));
        }
        if let Some(school) = present(&self.school) {
            predicates.push(Predicate::School(school.to_string()));
        }
        if let Some(department) = present(&self.department) {
            predicates.push(Predicate::Department(department.to_string()));
        }

        predicates
    }

    /// Sort requested by the client, if its key names a known field.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        let field = present(&self.sort)?.parse::<CourseField>().ok()?;
        let direction = match present(&self.order) {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Some(SortSpec { field, direction })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: CourseField,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: CourseField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: CourseField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_predicates() {
        assert!(CourseQuery::default().predicates().is_empty());
        assert_eq!(CourseQuery::default().sort_spec(), None);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let query = CourseQuery {
            search: Some(String::new()),
            program: Some(String::new()),
            sort: Some(String::new()),
            ..Default::default()
        };
        assert!(query.predicates().is_empty());
        assert_eq!(query.sort_spec(), None);
    }

    #[test]
    fn test_predicates_follow_parameters() {
        let query = CourseQuery {
            search: Some("Econ".to_string()),
            credits: Some("3".to_string()),
            department: Some("Economics".to_string()),
            ..Default::default()
        };

        assert_eq!(
            query.predicates(),
            vec![
                Predicate::Search("econ".to_string()),
                Predicate::Credits("3".to_string()),
                Predicate::Department("Economics".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_spec_direction() {
        let mut query = CourseQuery {
            sort: Some("home_course_code".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.sort_spec(),
            Some(SortSpec::asc(CourseField::HomeCourseCode))
        );

        query.order = Some("desc".to_string());
        assert_eq!(
            query.sort_spec(),
            Some(SortSpec::desc(CourseField::HomeCourseCode))
        );

        query.order = Some("DESC".to_string());
        assert_eq!(query.sort_spec().map(|s| s.direction), Some(SortDirection::Asc));
    }

    #[test]
    fn test_from_pairs() {
        let pairs = vec![
            ("search".to_string(), "econ".to_string()),
            ("page".to_string(), "2".to_string()),
            ("search".to_string(), "art".to_string()),
            ("order".to_string(), "desc".to_string()),
        ];

        let query = CourseQuery::from_pairs(pairs);

        assert_eq!(query.search.as_deref(), Some("econ"));
        assert_eq!(query.order.as_deref(), Some("desc"));
        assert_eq!(query.program, None);
    }

    #[test]
    fn test_unknown_sort_key_is_ignored() {
        let query = CourseQuery {
            sort: Some("id".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort_spec(), None);
    }
}
