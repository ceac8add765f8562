//! # Distinct-value extraction
//!
//! Filter-option lists for the browser client: every non-empty value a field
//! takes across the collection, deduplicated and sorted.
//!
//! AOK values are split on commas so a course tagged `"AOK 2, AOK 4"`
//! contributes both `"AOK 2"` and `"AOK 4"`. Credits sort numerically.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::catalog::{CourseField, CourseRecord};

/// Sorted distinct non-empty values of one field
pub fn distinct_values(records: &[CourseRecord], field: CourseField) -> Vec<String> {
    match field {
        CourseField::Aok => {
            let values: BTreeSet<String> = records
                .iter()
                .flat_map(|r| split_aok(&r.field_text(CourseField::Aok)))
                .collect();
            values.into_iter().collect()
        }
        CourseField::ForeignCourseCredits => {
            let unique: HashSet<String> = records
                .iter()
                .map(|r| r.field_text(field).into_owned())
                .filter(|v| !v.is_empty())
                .collect();
            let mut values: Vec<String> = unique.into_iter().collect();
            values.sort_by(|a, b| compare_credits(a, b));
            values
        }
        _ => {
            let values: BTreeSet<String> = records
                .iter()
                .map(|r| r.field_text(field))
                .filter(|v| !v.is_empty())
                .map(|v| v.into_owned())
                .collect();
            values.into_iter().collect()
        }
    }
}

/// Individual AOK tags in a comma-separated value
pub fn split_aok(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numbers ascending first, then non-numeric text lexicographically.
/// Equal numbers (`"3"`, `"3.0"`) fall back to text order.
fn compare_credits(a: &str, b: &str) -> Ordering {
    match (parse_credit(a), parse_credit(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_credit(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Option lists for every filterable field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub programs: Vec<String>,
    pub credits: Vec<String>,
    pub aoks: Vec<String>,
    pub schools: Vec<String>,
    pub departments: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[CourseRecord]) -> Self {
        Self {
            programs: distinct_values(records, CourseField::StudyAbroadProgram),
            credits: distinct_values(records, CourseField::ForeignCourseCredits),
            aoks: distinct_values(records, CourseField::Aok),
            schools: distinct_values(records, CourseField::PaceSchool),
            departments: distinct_values(records, CourseField::PaceDepartment),
        }
    }
}

/// Aggregate counts for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_courses: usize,
    pub total_programs: usize,
}

impl CatalogStats {
    pub fn from_records(records: &[CourseRecord]) -> Self {
        let programs: HashSet<_> = records
            .iter()
            .filter_map(|r| r.study_abroad_program.as_deref())
            .filter(|p| !p.is_empty())
            .collect();

        Self {
            total_courses: records.len(),
            total_programs: programs.len(),
        }
    }
}
