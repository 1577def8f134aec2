use polars::prelude::*;
use pulsemap_core::stats::{
    gaussian_kde, histogram, pearson, rolling_column, seasonal_decompose, with_rolling_means,
    StatsError,
};
use pulsemap_core::AnalysisError;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn sample_pressures() -> DataFrame {
    df!(
        "systolic" => [120i64, 125, 115, 130, 128, 119, 121, 126, 118],
        "diastolic" => [80i64, 82, 78, 85, 83, 79, 81, 84, 80],
    )
    .unwrap()
}

fn stats_error(result: Result<impl std::fmt::Debug, AnalysisError>) -> StatsError {
    match result {
        Err(AnalysisError::Stats(err)) => err,
        other => panic!("expected a statistics error, got {other:?}"),
    }
}

#[test]
fn pearson_matches_hand_computed_value() -> anyhow::Result<()> {
    let r = pearson(&sample_pressures(), "systolic", "diastolic")?;
    assert!((r - 0.961_184_750_126_698_6).abs() < 1e-12);
    assert_eq!(format!("{r:.2}"), "0.96");
    Ok(())
}

#[test]
fn pearson_of_perfectly_linear_columns_is_one() -> anyhow::Result<()> {
    let df = df!(
        "x" => [1.0, 2.0, 3.0, 4.0],
        "y" => [10.0, 8.0, 6.0, 4.0],
    )?;
    assert_close(pearson(&df, "x", "x")?, 1.0);
    assert_close(pearson(&df, "x", "y")?, -1.0);
    Ok(())
}

#[test]
fn pearson_rejects_degenerate_columns() -> anyhow::Result<()> {
    let constant = df!(
        "flat" => [5.0; 6],
        "rising" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )?;
    assert_eq!(
        stats_error(pearson(&constant, "rising", "flat")),
        StatsError::ZeroVariance {
            series: "flat".into()
        }
    );

    let single = df!("a" => [1.0], "b" => [2.0])?;
    assert_eq!(
        stats_error(pearson(&single, "a", "b")),
        StatsError::TooFewSamples {
            required: 2,
            actual: 1
        }
    );

    let with_nan = df!("a" => [1.0, f64::NAN], "b" => [1.0, 2.0])?;
    assert_eq!(
        stats_error(pearson(&with_nan, "a", "b")),
        StatsError::NonFinite { index: 1 }
    );

    let with_null = df!("a" => [Some(1.0), None, Some(3.0)], "b" => [1.0, 2.0, 3.0])?;
    assert!(matches!(
        pearson(&with_null, "a", "b"),
        Err(AnalysisError::Polars(_))
    ));
    assert!(matches!(
        pearson(&sample_pressures(), "systolic", "missing"),
        Err(AnalysisError::Polars(_))
    ));
    Ok(())
}

#[test]
fn rolling_means_leave_leading_gaps() -> anyhow::Result<()> {
    let rolled = with_rolling_means(&sample_pressures(), &["systolic", "diastolic"], 3)?;

    assert_eq!(rolled.height(), 9);
    assert_eq!(rolling_column("systolic"), "systolic_rolling");
    assert_eq!(rolled.column("systolic")?.i64()?.get(0), Some(120));

    let systolic = rolled.column("systolic_rolling")?.f64()?;
    assert_eq!(systolic.null_count(), 2);
    assert!(systolic.get(0).is_none());
    assert!(systolic.get(1).is_none());
    assert_close(systolic.get(2).unwrap(), 120.0);
    assert_close(systolic.get(3).unwrap(), 370.0 / 3.0);
    assert_close(systolic.get(8).unwrap(), 365.0 / 3.0);

    let diastolic = rolled.column("diastolic_rolling")?.f64()?;
    assert_close(diastolic.get(2).unwrap(), 80.0);
    Ok(())
}

#[test]
fn rolling_means_edge_windows() -> anyhow::Result<()> {
    let df = df!("v" => [4.0, 6.0])?;

    assert_eq!(
        stats_error(with_rolling_means(&df, &["v"], 0)),
        StatsError::ZeroWindow
    );

    let wide = with_rolling_means(&df, &["v"], 5)?;
    assert_eq!(wide.column("v_rolling")?.null_count(), 2);

    let unit = with_rolling_means(&df, &["v"], 1)?;
    let values: Vec<Option<f64>> = unit.column("v_rolling")?.f64()?.into_iter().collect();
    assert_eq!(values, vec![Some(4.0), Some(6.0)]);
    Ok(())
}

#[test]
fn period_one_decomposition_is_all_trend() {
    let values = [120.0, 125.0, 115.0, 130.0];
    let decomposition = seasonal_decompose(&values, 1).unwrap();

    assert_eq!(
        decomposition.trend,
        values.iter().copied().map(Some).collect::<Vec<_>>()
    );
    assert!(decomposition.seasonal.iter().all(|value| *value == 0.0));
    assert!(decomposition
        .residual
        .iter()
        .all(|value| *value == Some(0.0)));
}

#[test]
fn even_period_decomposition_recovers_alternation() {
    let values = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
    let decomposition = seasonal_decompose(&values, 2).unwrap();

    assert_eq!(decomposition.trend[0], None);
    assert_eq!(decomposition.trend[5], None);
    for idx in 1..5 {
        assert_close(decomposition.trend[idx].unwrap(), 2.0);
        assert_close(decomposition.residual[idx].unwrap(), 0.0);
    }
    assert_eq!(decomposition.seasonal, vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
}

#[test]
fn odd_period_decomposition_centers_seasonal_component() {
    let values = [1.0, 2.0, 3.0, 1.0, 2.0, 3.0];
    let decomposition = seasonal_decompose(&values, 3).unwrap();

    let expected = [-1.0, 0.0, 1.0, -1.0, 0.0, 1.0];
    for (actual, expected) in decomposition.seasonal.iter().zip(expected) {
        assert_close(*actual, expected);
    }
    assert_close(decomposition.seasonal.iter().take(3).sum::<f64>(), 0.0);
}

#[test]
fn decomposition_requires_two_cycles() {
    assert_eq!(seasonal_decompose(&[1.0, 2.0], 0), Err(StatsError::ZeroPeriod));
    assert_eq!(
        seasonal_decompose(&[1.0, 2.0, 3.0], 2),
        Err(StatsError::TooFewSamples {
            required: 4,
            actual: 3
        })
    );
}

#[test]
fn histogram_counts_every_value() {
    let bins = histogram(&[1.0, 2.0, 2.0, 3.0], Some(2)).unwrap();
    let counts: Vec<usize> = bins.iter().map(|bin| bin.count).collect();
    assert_eq!(counts, vec![1, 3]);
    assert_close(bins[0].start, 1.0);
    assert_close(bins[1].end, 3.0);

    let sturges = histogram(&[120.0, 125.0, 115.0, 130.0, 128.0, 119.0, 121.0, 126.0, 118.0], None)
        .unwrap();
    assert_eq!(sturges.len(), 5);
    assert_eq!(sturges.iter().map(|bin| bin.count).sum::<usize>(), 9);
}

#[test]
fn kde_integrates_to_one() {
    let values = [120.0, 125.0, 115.0, 130.0, 128.0, 119.0, 121.0, 126.0, 118.0];
    let step = 0.1;
    let grid: Vec<f64> = (0..2500).map(|idx| idx as f64 * step).collect();
    let density = gaussian_kde(&values, &grid).unwrap();

    let area: f64 = density.iter().sum::<f64>() * step;
    assert!((area - 1.0).abs() < 1e-3, "area was {area}");
    assert_eq!(
        gaussian_kde(&[3.0, 3.0], &grid),
        Err(StatsError::ZeroVariance {
            series: "sample".into()
        })
    );
}
