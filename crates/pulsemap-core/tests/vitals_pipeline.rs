use std::fs;

use chrono::NaiveDateTime;
use pulsemap_core::outputs::{
    DECOMPOSITION_SVG, PRESSURE_BY_HOUR_SVG, PRESSURE_DISTRIBUTION_SVG, PRESSURE_OVER_TIME_SVG,
    READINGS_CSV, ROLLING_AVERAGE_SVG, SUMMARY_TXT,
};
use pulsemap_core::vitals::{self, format_summary, sample_readings};
use pulsemap_core::{OutputDir, VitalsConfig};
use pulsemap_records::{read_readings, Activity};

#[test]
fn sample_table_has_nine_fixed_rows() -> anyhow::Result<()> {
    let readings = sample_readings()?;

    assert_eq!(readings.len(), 9);
    let first = &readings[0];
    assert_eq!(
        first.date_time,
        NaiveDateTime::parse_from_str("2024-01-01 08:00:00", "%Y-%m-%d %H:%M:%S")?
    );
    assert_eq!(first.systolic, 120);
    assert_eq!(first.diastolic, 80);
    assert_eq!(first.heart_rate, 72);
    assert_eq!(first.age, 35);
    assert_eq!(first.activity, Activity::Resting);

    let last = &readings[8];
    assert_eq!((last.systolic, last.diastolic, last.heart_rate), (118, 80, 71));
    assert!(readings.iter().all(|reading| reading.age == 35));
    assert!(readings
        .windows(2)
        .all(|pair| pair[0].date_time <= pair[1].date_time));
    Ok(())
}

#[test]
fn summary_text_matches_report_layout() {
    let summary = format_summary(0.961_184_75, 3);
    assert_eq!(
        summary,
        "\nBlood Pressure Data Analysis Summary:\n\
         1. Correlation between Systolic and Diastolic: 0.96\n\
         2. Observed Daily Patterns and Trends in Blood Pressure.\n\
         3. 3-Day Rolling Average of Systolic and Diastolic shows longer-term trends.\n"
    );
}

#[test]
fn pipeline_writes_every_artifact() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = OutputDir::create(dir.path().join("out"))?;

    let report = vitals::run(&VitalsConfig::default(), &output)?;

    for name in [
        READINGS_CSV,
        SUMMARY_TXT,
        PRESSURE_OVER_TIME_SVG,
        PRESSURE_DISTRIBUTION_SVG,
        DECOMPOSITION_SVG,
        ROLLING_AVERAGE_SVG,
        PRESSURE_BY_HOUR_SVG,
    ] {
        assert!(report.artifacts.contains(name), "missing artifact {name}");
        let path = output.path(name);
        assert!(fs::metadata(&path)?.len() > 0, "{name} is empty");
    }

    let svg = fs::read_to_string(output.path(PRESSURE_OVER_TIME_SVG))?;
    assert!(svg.contains("<svg"));

    assert_eq!(format!("{:.2}", report.correlation), "0.96");
    assert_eq!(fs::read_to_string(output.path(SUMMARY_TXT))?, report.summary);
    assert!(report.summary.contains("Correlation between Systolic and Diastolic: 0.96"));

    assert_eq!(report.hourly.height(), 3);
    assert_eq!(report.decomposition.period, 1);
    assert!(report.decomposition.seasonal.iter().all(|value| *value == 0.0));

    let rolling = report.frame.column("systolic_rolling")?.f64()?;
    assert!(rolling.get(0).is_none());
    assert!(rolling.get(1).is_none());
    assert!((rolling.get(2).unwrap() - 120.0).abs() < 1e-9);
    assert!(report.frame.column("hour").is_ok());

    Ok(())
}

#[test]
fn persisted_table_round_trips_vital_signs() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = OutputDir::create(dir.path())?;
    vitals::run(&VitalsConfig::default(), &output)?;

    let reloaded = read_readings(output.path(READINGS_CSV))?;
    let original = sample_readings()?;
    assert_eq!(reloaded.len(), original.len());
    for (a, b) in original.iter().zip(&reloaded) {
        assert_eq!(
            (a.systolic, a.diastolic, a.heart_rate),
            (b.systolic, b.diastolic, b.heart_rate)
        );
    }
    Ok(())
}

#[test]
fn oversized_decomposition_period_fails_fast() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = OutputDir::create(dir.path())?;
    let config = VitalsConfig {
        decomposition_period: 5,
        ..VitalsConfig::default()
    };

    let err = vitals::run(&config, &output).unwrap_err();
    assert!(err.to_string().contains("need at least 10 samples"));
    Ok(())
}
