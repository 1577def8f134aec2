use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Text layout used for every timestamp written to or read from a record file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_timestamp_text(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
}

/// Header of the delimited readings file, in column order.
pub const READING_COLUMNS: [&str; 6] = [
    "date_time",
    "systolic",
    "diastolic",
    "heart_rate",
    "age",
    "activity",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Resting,
    Exercising,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Resting => "resting",
            Activity::Exercising => "exercising",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Activity {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resting" => Ok(Activity::Resting),
            "exercising" => Ok(Activity::Exercising),
            other => Err(format!("unknown activity '{other}'")),
        }
    }
}

/// One timestamped vitals record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub date_time: NaiveDateTime,
    pub systolic: u32,
    pub diastolic: u32,
    pub heart_rate: u32,
    pub age: u32,
    pub activity: Activity,
}

impl Reading {
    pub fn new(
        date_time: NaiveDateTime,
        systolic: u32,
        diastolic: u32,
        heart_rate: u32,
        age: u32,
        activity: Activity,
    ) -> Self {
        Self {
            date_time,
            systolic,
            diastolic,
            heart_rate,
            age,
            activity,
        }
    }
}

/// Pickup as produced by the generator, before its timestamp text is typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupRecord {
    pub pickup_time: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Pickup with a parsed timestamp. `cluster` is filled in after clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupEvent {
    pub pickup_time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub cluster: Option<usize>,
}

impl PickupEvent {
    pub fn coordinates(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}
