use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// A field in a partial update: either left alone or replaced.
///
/// When deserialized, a missing key and an explicit `null` both mean
/// `Unchanged`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    SetTo(T),
}

impl<T> FieldUpdate<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Unchanged => None,
            FieldUpdate::SetTo(value) => Some(value),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::SetTo(v),
            None => FieldUpdate::Unchanged,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(FieldUpdate::from)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub name: FieldUpdate<String>,
    #[serde(default)]
    pub start_date: FieldUpdate<String>,
    #[serde(default)]
    pub end_date: FieldUpdate<String>,
}

/// Validated columns to write on update. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Case-insensitive name substring used by list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: if name.is_empty() { None } else { Some(name) },
        }
    }
}

/// Query string of `GET /courses`. Non-numeric `limit`/`page` read as 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCoursesQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: i64,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_set() {
        let req: UpdateCourseRequest =
            serde_json::from_str(r#"{"name": "Geometry", "end_date": null}"#).unwrap();
        assert_eq!(req.name, FieldUpdate::SetTo("Geometry".to_string()));
        assert!(req.start_date.is_unchanged());
        assert!(req.end_date.is_unchanged());
    }

    #[test]
    fn update_request_keeps_empty_strings() {
        let req: UpdateCourseRequest = serde_json::from_str(r#"{"start_date": ""}"#).unwrap();
        assert_eq!(req.start_date.as_set().map(String::as_str), Some(""));
    }

    #[test]
    fn empty_name_filter_is_no_filter() {
        assert_eq!(CourseFilter::by_name(""), CourseFilter::default());
        assert_eq!(CourseFilter::by_name("alg").name.as_deref(), Some("alg"));
    }

    #[test]
    fn course_serializes_plain_dates() {
        let now = Utc::now();
        let course = Course {
            id: "c1".into(),
            name: "Algebra".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-06-01");
    }
}
