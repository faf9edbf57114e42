use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Body-mass index, `weight / height^2`, rounded to two decimals.
///
/// Exact halves go to the even digit: 22.625 becomes 22.62, not 22.63.
pub fn calculate_bmi(height: f64, weight: f64) -> f64 {
    (weight / (height * height) * 100.0).round_ties_even() / 100.0
}

/// Height (m) and weight (kg) that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiMeasurement {
    pub height: f64,
    pub weight: f64,
}

impl BmiMeasurement {
    pub fn bmi(&self) -> f64 {
        calculate_bmi(self.height, self.weight)
    }

    pub fn into_record(self) -> NewBmiRecord {
        NewBmiRecord {
            height: self.height,
            weight: self.weight,
            bmi: self.bmi(),
        }
    }
}

/// Row to insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewBmiRecord {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiRecord {
    pub id: i64,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// POST /bmi success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub message: String,
}

/// History row as the client sees it on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BmiHistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub created_at: String,
}

fn serialize_timestamp<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}
