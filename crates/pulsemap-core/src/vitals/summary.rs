use std::fs;
use std::path::Path;

use crate::error::Result;

pub fn format_summary(correlation: f64, rolling_window: usize) -> String {
    format!(
        "
Blood Pressure Data Analysis Summary:
1. Correlation between Systolic and Diastolic: {correlation:.2}
2. Observed Daily Patterns and Trends in Blood Pressure.
3. {rolling_window}-Day Rolling Average of Systolic and Diastolic shows longer-term trends.
"
    )
}

pub fn write_summary(path: &Path, summary: &str) -> Result<()> {
    fs::write(path, summary)?;
    Ok(())
}
