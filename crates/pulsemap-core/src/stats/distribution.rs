use std::f64::consts::PI;

use super::{ensure_finite, mean, StatsError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram with `bins` bins (Sturges' rule when `None`).
///
/// The last bin is closed on the right so the maximum lands in it.
pub fn histogram(values: &[f64], bins: Option<usize>) -> Result<Vec<HistogramBin>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::TooFewSamples {
            required: 1,
            actual: 0,
        });
    }
    ensure_finite(values)?;

    let bins = bins
        .unwrap_or_else(|| (values.len() as f64).log2().ceil() as usize + 1)
        .max(1);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (high - low) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|idx| HistogramBin {
            start: low + width * idx as f64,
            end: low + width * (idx + 1) as f64,
            count: 0,
        })
        .collect();

    for value in values {
        let idx = (((value - low) / width).floor() as usize).min(bins - 1);
        result[idx].count += 1;
    }

    Ok(result)
}

/// Gaussian kernel density of `values` evaluated at `points`.
///
/// Bandwidth follows Scott's rule: sample standard deviation times `n^(-1/5)`.
pub fn gaussian_kde(values: &[f64], points: &[f64]) -> Result<Vec<f64>, StatsError> {
    if values.len() < 2 {
        return Err(StatsError::TooFewSamples {
            required: 2,
            actual: values.len(),
        });
    }
    ensure_finite(values)?;

    let n = values.len() as f64;
    let center = mean(values);
    let variance = values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / (n - 1.0);
    if variance == 0.0 {
        return Err(StatsError::ZeroVariance {
            series: "sample".into(),
        });
    }

    let bandwidth = variance.sqrt() * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());

    Ok(points
        .iter()
        .map(|point| {
            values
                .iter()
                .map(|value| {
                    let z = (point - value) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect())
}
