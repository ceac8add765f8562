//! # Course Filters
//!
//! Predicates over course records. A lookup keeps the records that satisfy
//! every supplied predicate; missing record fields read as the empty string,
//! so they never satisfy a non-empty term.

use crate::catalog::{CourseField, CourseRecord};

/// A single filter predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring over the searchable fields.
    /// Holds the already lower-cased term.
    Search(String),
    /// Exact program match
    Program(String),
    /// Credits compared through their string form
    Credits(String),
    /// Substring of the (possibly comma-separated) AOK value
    Aok(String),
    /// Exact school match
    School(String),
    /// Exact department match
    Department(String),
}

impl Predicate {
    /// Build a search predicate from a raw term
    pub fn search(term: &str) -> Self {
        Predicate::Search(term.to_lowercase())
    }

    /// Check if a record satisfies this predicate
    pub fn matches(&self, record: &CourseRecord) -> bool {
        match self {
            Predicate::Search(term) => CourseField::SEARCHABLE
                .iter()
                .any(|&field| record.field_text(field).to_lowercase().contains(term.as_str())),
            Predicate::Program(program) => {
                record.field_text(CourseField::StudyAbroadProgram) == program.as_str()
            }
            Predicate::Credits(credits) => {
                record.field_text(CourseField::ForeignCourseCredits) == credits.as_str()
            }
            Predicate::Aok(aok) => record.field_text(CourseField::Aok).contains(aok.as_str()),
            Predicate::School(school) => {
                record.field_text(CourseField::PaceSchool) == school.as_str()
            }
            Predicate::Department(department) => {
                record.field_text(CourseField::PaceDepartment) == department.as_str()
            }
        }
    }
}

/// Records satisfying all predicates, in their original order
pub fn filter_courses<'a>(
    records: &'a [CourseRecord],
    predicates: &[Predicate],
) -> Vec<&'a CourseRecord> {
    records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Credits;

    fn economics() -> CourseRecord {
        CourseRecord {
            id: Some(1),
            foreign_course_title: Some("Intro to Economics".to_string()),
            foreign_course_code: Some("ECON 101".to_string()),
            foreign_course_credits: Some(Credits::from(3_i64)),
            aok: Some("AOK 2, AOK 4".to_string()),
            pace_school: Some("Lubin".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert!(Predicate::search("econ").matches(&economics()));
        assert!(Predicate::search("ECONOMICS").matches(&economics()));
        assert!(!Predicate::search("physics").matches(&economics()));
    }

    #[test]
    fn test_search_covers_extended_fields() {
        assert!(Predicate::search("lubin").matches(&economics()));
        assert!(Predicate::search("aok 4").matches(&economics()));
    }

    #[test]
    fn test_search_skips_notes() {
        let record = CourseRecord {
            course_notes: Some("Requires department approval".to_string()),
            ..Default::default()
        };
        assert!(!Predicate::search("approval").matches(&record));
    }

    #[test]
    fn test_credits_compare_as_strings() {
        let three = economics();
        let text_three_point_oh = CourseRecord {
            foreign_course_credits: Some(Credits::from("3.0")),
            ..Default::default()
        };
        let thirty = CourseRecord {
            foreign_course_credits: Some(Credits::from(30_i64)),
            ..Default::default()
        };

        let predicate = Predicate::Credits("3".to_string());
        assert!(predicate.matches(&three));
        assert!(!predicate.matches(&text_three_point_oh));
        assert!(!predicate.matches(&thirty));
    }

    #[test]
    fn test_aok_is_substring() {
        assert!(Predicate::Aok("AOK 4".to_string()).matches(&economics()));
        assert!(Predicate::Aok("AOK 2".to_string()).matches(&economics()));
        assert!(!Predicate::Aok("AOK 3".to_string()).matches(&economics()));
        assert!(!Predicate::Aok("aok 2".to_string()).matches(&economics()));
    }

    #[test]
    fn test_exact_matches_are_case_sensitive() {
        assert!(Predicate::School("Lubin".to_string()).matches(&economics()));
        assert!(!Predicate::School("lubin".to_string()).matches(&economics()));
        assert!(!Predicate::School("Lub".to_string()).matches(&economics()));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let empty = CourseRecord::default();
        assert!(!Predicate::Program("Rome".to_string()).matches(&empty));
        assert!(!Predicate::Department("Art".to_string()).matches(&empty));
        assert!(!Predicate::search("a").matches(&empty));
    }

    #[test]
    fn test_filter_is_conjunction() {
        let records = vec![
            economics(),
            CourseRecord {
                id: Some(2),
                foreign_course_title: Some("Econometrics".to_string()),
                pace_school: Some("Dyson".to_string()),
                ..Default::default()
            },
        ];

        let only_search = filter_courses(&records, &[Predicate::search("econ")]);
        assert_eq!(only_search.len(), 2);

        let both = filter_courses(
            &records,
            &[Predicate::search("econ"), Predicate::School("Dyson".to_string())],
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, Some(2));

        assert_eq!(filter_courses(&records, &[]).len(), 2);
    }
}
