//! Result sorting for course lookups
//!
//! Orders matches by the lower-cased string form of one field.

use super::collation::collate;
use super::params::{SortDirection, SortSpec};
use crate::catalog::CourseRecord;

/// Sorts lookup results
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to the sort specification.
    ///
    /// Stable in both directions: records with equal keys keep their input
    /// order, descending included.
    pub fn sort(records: &mut Vec<&CourseRecord>, sort_spec: &SortSpec) {
        let mut keyed: Vec<(String, &CourseRecord)> = records
            .iter()
            .map(|r| (r.field_text(sort_spec.field).to_lowercase(), *r))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = collate(a, b);
            match sort_spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        records.clear();
        records.extend(keyed.into_iter().map(|(_, r)| r));
    }
}
