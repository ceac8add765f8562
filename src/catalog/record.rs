//! Course equivalency records
//!
//! One `CourseRecord` is one row of the equivalency table: a foreign course
//! and the home-institution course it transfers as.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Credit value as it appears in the source, either a JSON number or text.
///
/// Equality and filtering go through the string form (`to_string()`), which
/// prints integral numbers without a fraction: `3.0` and `3` both become `"3"`,
/// while the text `"3.0"` stays `"3.0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credits {
    Number(Number),
    Text(String),
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credits::Text(s) => f.write_str(s),
            Credits::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{}", i)
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{}", u)
                } else {
                    write_js_number(f, n.as_f64().unwrap_or(0.0))
                }
            }
        }
    }
}

/// Number formatting used by JavaScript's `String(x)`: `-0` prints as `0`,
/// magnitudes at or above `1e21` or below `1e-6` use exponent form
/// (`1e+21`, `1.5e-7`), everything else the shortest plain decimal.
fn write_js_number(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x == 0.0 {
        return f.write_str("0");
    }

    let abs = x.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{:e}", x);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => f.write_str(&exp),
        }
    } else {
        // f64 Display drops the ".0" of integral values
        write!(f, "{}", x)
    }
}

impl From<&str> for Credits {
    fn from(s: &str) -> Self {
        Credits::Text(s.to_string())
    }
}

impl From<i64> for Credits {
    fn from(n: i64) -> Self {
        Credits::Number(n.into())
    }
}

/// One row of the equivalency table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Assigned at load time, unique within one loaded collection
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub foreign_course_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub foreign_course_code: Option<String>,

    #[serde(default)]
    pub foreign_course_credits: Option<Credits>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub home_course_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub home_course_code: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub study_abroad_program: Option<String>,

    /// Area of Knowledge; may hold several comma-separated values
    #[serde(default, deserialize_with = "lenient_text")]
    pub aok: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub course_notes: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pace_school: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pace_department: Option<String>,
}

impl CourseRecord {
    /// Spreadsheet column that marks a repeated header row.
    pub const HEADER_MARKER: &'static str = "Foreign Course Title";

    /// Build a record from a spreadsheet row.
    ///
    /// Columns: foreign title, foreign code, credits, home title, aok,
    /// home code, program, notes, school, department.
    pub fn from_row(id: u64, row: &[Value]) -> Self {
        let text = |i: usize| row.get(i).and_then(cell_text);

        let credits = match row.get(2).filter(|v| !is_blank_cell(v)) {
            Some(Value::Number(n)) => Some(Credits::Number(n.clone())),
            Some(Value::String(s)) => Some(Credits::Text(s.clone())),
            Some(Value::Bool(b)) => Some(Credits::Text(b.to_string())),
            _ => None,
        };

        Self {
            id: Some(id),
            foreign_course_title: text(0),
            foreign_course_code: text(1),
            foreign_course_credits: credits,
            home_course_title: text(3),
            aok: text(4),
            home_course_code: text(5),
            study_abroad_program: text(6),
            course_notes: text(7),
            pace_school: text(8),
            pace_department: text(9),
        }
    }

    /// String form of a field; missing values read as the empty string.
    pub fn field_text(&self, field: CourseField) -> Cow<'_, str> {
        let text = match field {
            CourseField::ForeignCourseCredits => {
                return self
                    .foreign_course_credits
                    .as_ref()
                    .map(|c| Cow::Owned(c.to_string()))
                    .unwrap_or(Cow::Borrowed(""));
            }
            CourseField::ForeignCourseTitle => &self.foreign_course_title,
            CourseField::ForeignCourseCode => &self.foreign_course_code,
            CourseField::HomeCourseTitle => &self.home_course_title,
            CourseField::HomeCourseCode => &self.home_course_code,
            CourseField::StudyAbroadProgram => &self.study_abroad_program,
            CourseField::Aok => &self.aok,
            CourseField::CourseNotes => &self.course_notes,
            CourseField::PaceSchool => &self.pace_school,
            CourseField::PaceDepartment => &self.pace_department,
        };
        Cow::Borrowed(text.as_deref().unwrap_or(""))
    }
}

/// Text-valued attributes of a record, by their wire names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    ForeignCourseTitle,
    ForeignCourseCode,
    ForeignCourseCredits,
    HomeCourseTitle,
    HomeCourseCode,
    StudyAbroadProgram,
    Aok,
    CourseNotes,
    PaceSchool,
    PaceDepartment,
}

impl CourseField {
    /// Every field a client may sort on
    pub const ALL: [CourseField; 10] = [
        CourseField::ForeignCourseTitle,
        CourseField::ForeignCourseCode,
        CourseField::ForeignCourseCredits,
        CourseField::HomeCourseTitle,
        CourseField::HomeCourseCode,
        CourseField::StudyAbroadProgram,
        CourseField::Aok,
        CourseField::CourseNotes,
        CourseField::PaceSchool,
        CourseField::PaceDepartment,
    ];

    /// Fields matched by free-text search (notes are excluded)
    pub const SEARCHABLE: [CourseField; 9] = [
        CourseField::ForeignCourseTitle,
        CourseField::ForeignCourseCode,
        CourseField::HomeCourseTitle,
        CourseField::HomeCourseCode,
        CourseField::StudyAbroadProgram,
        CourseField::ForeignCourseCredits,
        CourseField::Aok,
        CourseField::PaceSchool,
        CourseField::PaceDepartment,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseField::ForeignCourseTitle => "foreign_course_title",
            CourseField::ForeignCourseCode => "foreign_course_code",
            CourseField::ForeignCourseCredits => "foreign_course_credits",
            CourseField::HomeCourseTitle => "home_course_title",
            CourseField::HomeCourseCode => "home_course_code",
            CourseField::StudyAbroadProgram => "study_abroad_program",
            CourseField::Aok => "aok",
            CourseField::CourseNotes => "course_notes",
            CourseField::PaceSchool => "pace_school",
            CourseField::PaceDepartment => "pace_department",
        }
    }
}

impl FromStr for CourseField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourseField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown course field: {}", s))
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a spreadsheet cell counts as empty: missing, `""`, `0` or `false`.
pub fn is_blank_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Spreadsheet cell to text; blank cells become `None`.
fn cell_text(value: &Value) -> Option<String> {
    if is_blank_cell(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(Credits::Number(n.clone()).to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts a non-negative integer or a numeric string; anything else reads
/// as no id so the loader renumbers the collection.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(id)
}

/// Accepts strings, numbers and booleans for text attributes.
///
/// Spreadsheet exports turn numeric-looking codes into JSON numbers.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(Credits::Number(n).to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected text value, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credits_string_form() {
        let integral: Credits = serde_json::from_value(json!(3)).unwrap();
        let float_integral: Credits = serde_json::from_value(json!(3.0)).unwrap();
        let fractional: Credits = serde_json::from_value(json!(3.5)).unwrap();
        let text: Credits = serde_json::from_value(json!("3.0")).unwrap();

        assert_eq!(integral.to_string(), "3");
        assert_eq!(float_integral.to_string(), "3");
        assert_eq!(fractional.to_string(), "3.5");
        assert_eq!(text.to_string(), "3.0");
    }

    #[test]
    fn test_credits_serialize_back_unchanged() {
        let record: CourseRecord =
            serde_json::from_value(json!({"foreign_course_credits": 4})).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["foreign_course_credits"], json!(4));

        let record: CourseRecord =
            serde_json::from_value(json!({"foreign_course_credits": "4 ECTS"})).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["foreign_course_credits"], json!("4 ECTS"));
    }

    #[test]
    fn test_missing_and_null_fields() {
        let record: CourseRecord = serde_json::from_value(json!({
            "foreign_course_title": "Intro to Economics",
            "aok": null
        }))
        .unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.aok, None);
        assert_eq!(record.field_text(CourseField::Aok), "");
        assert_eq!(record.field_text(CourseField::ForeignCourseCredits), "");
        assert_eq!(
            record.field_text(CourseField::ForeignCourseTitle),
            "Intro to Economics"
        );
    }

    #[test]
    fn test_numeric_codes_become_text() {
        let record: CourseRecord =
            serde_json::from_value(json!({"foreign_course_code": 101})).unwrap();
        assert_eq!(record.foreign_course_code.as_deref(), Some("101"));
    }

    #[test]
    fn test_object_text_is_rejected() {
        let result: Result<CourseRecord, _> =
            serde_json::from_value(json!({"pace_school": {"name": "Lubin"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_row_column_order() {
        let row = vec![
            json!("Microeconomics"),
            json!("ECO 201"),
            json!(3),
            json!("Principles of Microeconomics"),
            json!("AOK 4"),
            json!("ECO 105"),
            json!("Florence Semester"),
            json!(""),
            json!("Lubin"),
            json!("Economics"),
        ];

        let record = CourseRecord::from_row(7, &row);

        assert_eq!(record.id, Some(7));
        assert_eq!(record.foreign_course_title.as_deref(), Some("Microeconomics"));
        assert_eq!(record.foreign_course_credits, Some(Credits::from(3_i64)));
        assert_eq!(record.home_course_code.as_deref(), Some("ECO 105"));
        assert_eq!(record.aok.as_deref(), Some("AOK 4"));
        assert_eq!(record.course_notes, None);
        assert_eq!(record.pace_department.as_deref(), Some("Economics"));
    }

    #[test]
    fn test_from_short_row() {
        let record = CourseRecord::from_row(1, &[json!("Only a title")]);
        assert_eq!(record.foreign_course_title.as_deref(), Some("Only a title"));
        assert_eq!(record.pace_school, None);
    }

    #[test]
    fn test_credits_number_edge_forms() {
        let cases = [
            (json!(-0.0), "0"),
            (json!(1e21), "1e+21"),
            (json!(-2.5e22), "-2.5e+22"),
            (json!(1.5e-7), "1.5e-7"),
            (json!(0.000001), "0.000001"),
            (json!(123456789.5), "123456789.5"),
        ];
        for (value, expected) in cases {
            let credits: Credits = serde_json::from_value(value).unwrap();
            assert_eq!(credits.to_string(), expected);
        }
    }

    #[test]
    fn test_lenient_ids() {
        let parse = |value: Value| -> Option<u64> {
            serde_json::from_value::<CourseRecord>(json!({ "id": value }))
                .unwrap()
                .id
        };

        assert_eq!(parse(json!(12)), Some(12));
        assert_eq!(parse(json!("7")), Some(7));
        assert_eq!(parse(json!(" 8 ")), Some(8));
        assert_eq!(parse(json!(-3)), None);
        assert_eq!(parse(json!(2.5)), None);
        assert_eq!(parse(json!("seven")), None);
        assert_eq!(parse(json!({"n": 1})), None);
        assert_eq!(parse(Value::Null), None);
    }

    #[test]
    fn test_from_row_blank_cells() {
        let row = vec![
            json!("Statistics"),
            json!(0),
            json!(0),
            json!(false),
            json!(true),
        ];

        let record = CourseRecord::from_row(3, &row);
        assert_eq!(record.foreign_course_code, None);
        assert_eq!(record.foreign_course_credits, None);
        assert_eq!(record.home_course_title, None);
        assert_eq!(record.aok.as_deref(), Some("true"));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in CourseField::ALL {
            assert_eq!(field.as_str().parse::<CourseField>(), Ok(field));
        }
        assert!("id".parse::<CourseField>().is_err());
    }
}
