use pulsemap_records::{parse_timestamp_text, Activity, Reading, RecordError};

const TABLE: &str = "sample readings";

type SampleRow = (&'static str, u32, u32, u32, u32, Activity);

const SAMPLE_ROWS: [SampleRow; 9] = [
    ("2024-01-01 08:00:00", 120, 80, 72, 35, Activity::Resting),
    ("2024-01-01 14:30:00", 125, 82, 75, 35, Activity::Exercising),
    ("2024-01-02 09:00:00", 115, 78, 70, 35, Activity::Resting),
    ("2024-01-03 08:00:00", 130, 85, 78, 35, Activity::Exercising),
    ("2024-01-04 14:30:00", 128, 83, 77, 35, Activity::Resting),
    ("2024-01-05 09:00:00", 119, 79, 73, 35, Activity::Resting),
    ("2024-01-06 08:00:00", 121, 81, 74, 35, Activity::Exercising),
    ("2024-01-07 14:30:00", 126, 84, 76, 35, Activity::Resting),
    ("2024-01-08 09:00:00", 118, 80, 71, 35, Activity::Resting),
];

/// The fixed nine-reading blood pressure table.
pub fn sample_readings() -> Result<Vec<Reading>, RecordError> {
    SAMPLE_ROWS
        .iter()
        .enumerate()
        .map(
            |(idx, &(timestamp, systolic, diastolic, heart_rate, age, activity))| {
                let date_time =
                    parse_timestamp_text(timestamp).map_err(|err| RecordError::DataRow {
                        table: TABLE,
                        line_index: idx + 1,
                        message: format!("invalid timestamp '{timestamp}': {err}"),
                    })?;
                Ok(Reading::new(
                    date_time, systolic, diastolic, heart_rate, age, activity,
                ))
            },
        )
        .collect()
}
