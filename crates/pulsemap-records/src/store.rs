use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::errors::RecordError;
use crate::model::{parse_timestamp_text, Activity, Reading, READING_COLUMNS, TIMESTAMP_FORMAT};

const TABLE: &str = "readings";

/// Write readings to `path`, replacing whatever was there.
pub fn write_readings(path: impl AsRef<Path>, readings: &[Reading]) -> Result<(), RecordError> {
    let file = File::create(path.as_ref()).map_err(|err| RecordError::io(TABLE, err))?;
    write_readings_to(file, readings)
}

pub fn write_readings_to<W: Write>(writer: W, readings: &[Reading]) -> Result<(), RecordError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer
        .write_record(READING_COLUMNS)
        .map_err(|err| RecordError::csv(TABLE, err))?;

    for reading in readings {
        let timestamp = reading.date_time.format(TIMESTAMP_FORMAT).to_string();
        csv_writer
            .write_record([
                timestamp,
                reading.systolic.to_string(),
                reading.diastolic.to_string(),
                reading.heart_rate.to_string(),
                reading.age.to_string(),
                reading.activity.as_str().to_string(),
            ])
            .map_err(|err| RecordError::csv(TABLE, err))?;
    }

    csv_writer.flush().map_err(|err| RecordError::io(TABLE, err))
}

/// Load readings from `path` and order them by timestamp.
pub fn read_readings(path: impl AsRef<Path>) -> Result<Vec<Reading>, RecordError> {
    let file = File::open(path.as_ref()).map_err(|err| RecordError::io(TABLE, err))?;
    read_readings_from(file)
}

pub fn read_readings_from<R: Read>(reader: R) -> Result<Vec<Reading>, RecordError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| RecordError::csv(TABLE, err))?
        .clone();
    validate_header(&headers)?;

    let mut readings = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let line_index = index + 1;
        let row = row.map_err(|err| RecordError::csv(TABLE, err))?;
        readings.push(parse_reading(&row, line_index)?);
    }

    if readings.is_empty() {
        return Err(RecordError::EmptyData { table: TABLE });
    }

    readings.sort_by_key(|reading| reading.date_time);
    Ok(readings)
}

fn validate_header(headers: &StringRecord) -> Result<(), RecordError> {
    let found: Vec<&str> = headers.iter().collect();
    if found != READING_COLUMNS {
        return Err(RecordError::InvalidHeader {
            table: TABLE,
            message: format!("expected columns {READING_COLUMNS:?}, found {found:?}"),
        });
    }
    Ok(())
}

fn parse_reading(row: &StringRecord, line_index: usize) -> Result<Reading, RecordError> {
    if row.len() != READING_COLUMNS.len() {
        return Err(RecordError::DataRow {
            table: TABLE,
            line_index,
            message: format!(
                "expected {} fields but found {}",
                READING_COLUMNS.len(),
                row.len()
            ),
        });
    }

    let date_time = parse_timestamp(TABLE, &row[0], line_index)?;
    let systolic = parse_required_u32(&row[1], line_index, "systolic")?;
    let diastolic = parse_required_u32(&row[2], line_index, "diastolic")?;
    let heart_rate = parse_required_u32(&row[3], line_index, "heart_rate")?;
    let age = parse_required_u32(&row[4], line_index, "age")?;
    let activity = Activity::try_from(&row[5]).map_err(|message| RecordError::DataRow {
        table: TABLE,
        line_index,
        message,
    })?;

    Ok(Reading::new(
        date_time, systolic, diastolic, heart_rate, age, activity,
    ))
}

pub fn parse_timestamp(
    table: &'static str,
    value: &str,
    line_index: usize,
) -> Result<NaiveDateTime, RecordError> {
    let trimmed = value.trim();
    parse_timestamp_text(trimmed).map_err(|err| RecordError::DataRow {
        table,
        line_index,
        message: format!("invalid timestamp '{trimmed}': {err}"),
    })
}

fn parse_required_u32(value: &str, line_index: usize, column: &str) -> Result<u32, RecordError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|err| RecordError::DataRow {
            table: TABLE,
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}
