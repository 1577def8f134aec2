use super::{ensure_finite, StatsError};

/// Additive split of a series into trend, seasonal and residual parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub period: usize,
    pub observed: Vec<f64>,
    /// Centered moving average; `None` where the window runs off either edge.
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

/// Classical additive decomposition with a fixed `period`.
///
/// The trend is a centered moving average over `period` samples (a 2x`period`
/// weighted average for even periods). The seasonal component is the per-phase
/// mean of the detrended series, shifted to zero mean. Needs at least two full
/// cycles of data.
pub fn seasonal_decompose(values: &[f64], period: usize) -> Result<Decomposition, StatsError> {
    if period == 0 {
        return Err(StatsError::ZeroPeriod);
    }
    let required = 2 * period;
    if values.len() < required {
        return Err(StatsError::TooFewSamples {
            required,
            actual: values.len(),
        });
    }
    ensure_finite(values)?;

    let trend = centered_moving_average(values, period);

    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];
    for (idx, (value, trend_value)) in values.iter().zip(&trend).enumerate() {
        if let Some(trend_value) = trend_value {
            phase_sums[idx % period] += value - trend_value;
            phase_counts[idx % period] += 1;
        }
    }

    let mut phase_means: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect();
    let offset = phase_means.iter().sum::<f64>() / period as f64;
    for phase_mean in &mut phase_means {
        *phase_mean -= offset;
    }

    let seasonal: Vec<f64> = (0..values.len())
        .map(|idx| phase_means[idx % period])
        .collect();

    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((value, trend_value), seasonal_value)| {
            trend_value.map(|trend_value| value - trend_value - seasonal_value)
        })
        .collect();

    Ok(Decomposition {
        period,
        observed: values.to_vec(),
        trend,
        seasonal,
        residual,
    })
}

fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = period / 2;
    let len = values.len();
    let mut trend = vec![None; len];

    for (idx, slot) in trend.iter_mut().enumerate().take(len - half).skip(half) {
        let window = &values[idx - half..=idx + half];
        let total: f64 = if period % 2 == 1 {
            window.iter().sum()
        } else {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        };
        *slot = Some(total / period as f64);
    }

    trend
}
