use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use super::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansParams {
    pub clusters: usize,
    pub max_iterations: usize,
    /// Convergence threshold on total squared centroid shift, relative to the
    /// mean per-dimension variance of the input.
    pub tolerance: f64,
    /// `None` draws the initial centroids from OS entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            clusters: 5,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansModel<const D: usize> {
    pub centers: Vec<[f64; D]>,
    /// Index into `centers` for every input point.
    pub labels: Vec<usize>,
    /// Sum of squared distances from each point to its center.
    pub inertia: f64,
    pub iterations: usize,
}

/// Lloyd's k-means with k-means++ seeding.
///
/// Fails when `clusters` is zero or exceeds the number of points; the cluster
/// count is never reduced. Clusters that lose all their points keep their
/// previous centroid.
pub fn kmeans<const D: usize>(
    points: &[[f64; D]],
    params: &KMeansParams,
) -> Result<KMeansModel<D>, StatsError> {
    let k = params.clusters;
    if k == 0 {
        return Err(StatsError::ZeroClusters);
    }
    if points.len() < k {
        return Err(StatsError::InsufficientPoints {
            points: points.len(),
            clusters: k,
        });
    }
    for (index, point) in points.iter().enumerate() {
        if point.iter().any(|value| !value.is_finite()) {
            return Err(StatsError::NonFinite { index });
        }
    }

    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut centers = kmeans_plus_plus_init(points, k, &mut rng);
    let threshold = params.tolerance * mean_variance(points);
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;

    for iteration in 1..=params.max_iterations.max(1) {
        iterations = iteration;

        let mut changed = false;
        for (label, point) in labels.iter_mut().zip(points) {
            let nearest = nearest_center(point, &centers);
            if *label != nearest {
                *label = nearest;
                changed = true;
            }
        }

        let mut sums = vec![[0.0; D]; k];
        let mut counts = vec![0usize; k];
        for (&label, point) in labels.iter().zip(points) {
            for (sum, value) in sums[label].iter_mut().zip(point) {
                *sum += value;
            }
            counts[label] += 1;
        }

        let mut shift = 0.0;
        for ((center, sum), &count) in centers.iter_mut().zip(&sums).zip(&counts) {
            if count == 0 {
                continue;
            }
            let mut updated = [0.0; D];
            for (slot, total) in updated.iter_mut().zip(sum) {
                *slot = total / count as f64;
            }
            shift += squared_distance(center, &updated);
            *center = updated;
        }

        debug!(iteration, shift, changed, "k-means iteration");

        if !changed || shift <= threshold {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, point) in labels.iter_mut().zip(points) {
        *label = nearest_center(point, &centers);
        inertia += squared_distance(point, &centers[*label]);
    }

    Ok(KMeansModel {
        centers,
        labels,
        inertia,
        iterations,
    })
}

fn kmeans_plus_plus_init<const D: usize>(
    points: &[[f64; D]],
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<[f64; D]> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| {
                centers
                    .iter()
                    .map(|center| squared_distance(point, center))
                    .fold(f64::MAX, f64::min)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            warn!(
                requested = k,
                distinct = centers.len(),
                "fewer distinct points than clusters; duplicating centroids"
            );
            centers.push(points[rng.gen_range(0..points.len())]);
            continue;
        }

        // Roulette wheel over squared distances; already-chosen points weigh zero.
        let target = rng.gen_range(0.0..total);
        let mut cumulative = 0.0;
        let mut selected = None;
        for (idx, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            selected = Some(idx);
            if cumulative > target {
                break;
            }
        }

        if let Some(idx) = selected {
            centers.push(points[idx]);
        }
    }

    centers
}

fn nearest_center<const D: usize>(point: &[f64; D], centers: &[[f64; D]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::MAX;
    for (idx, center) in centers.iter().enumerate() {
        let distance = squared_distance(point, center);
        if distance < best_distance {
            best_distance = distance;
            best = idx;
        }
    }
    best
}

fn squared_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn mean_variance<const D: usize>(points: &[[f64; D]]) -> f64 {
    if D == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mut total = 0.0;
    for dim in 0..D {
        let mean = points.iter().map(|point| point[dim]).sum::<f64>() / n;
        total += points
            .iter()
            .map(|point| (point[dim] - mean).powi(2))
            .sum::<f64>()
            / n;
    }
    total / D as f64
}
