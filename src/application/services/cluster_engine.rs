use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{ClusterAssignment, RequestedClusters};

const RANDOM_SEED: u64 = 42;
const N_INIT: usize = 10;
const MAX_ITERATIONS: usize = 100;
const MAX_AUTO_CLUSTERS: usize = 10;
const SILHOUETTE_SAMPLE_CAP: usize = 5000;

/// Vectors must be L2-normalized upstream. Returned labels are dense:
/// every label in `0..k` is used at least once.
pub fn cluster(
    vectors: &[Vec<f32>],
    requested: RequestedClusters,
) -> Result<ClusterAssignment, ClusterEngineError> {
    if vectors.is_empty() {
        return Err(ClusterEngineError::EmptyInput);
    }

    let k = match requested {
        RequestedClusters::Fixed(k) => {
            if k == 0 || k > vectors.len() {
                return Err(ClusterEngineError::InvalidClusterCount {
                    requested: k,
                    available: vectors.len(),
                });
            }
            k
        }
        RequestedClusters::Auto => auto_detect_k(vectors),
    };

    let fit = kmeans(vectors, k);
    Ok(ClusterAssignment {
        labels: fit.labels,
        k,
    })
}

fn auto_detect_k(vectors: &[Vec<f32>]) -> usize {
    let n = vectors.len();
    if n < 3 {
        // No valid candidate range; everything becomes one cluster.
        return 1;
    }

    let upper = (MAX_AUTO_CLUSTERS + 1).min(n);
    let mut best_k = 2;
    let mut best_score = f32::NEG_INFINITY;

    for k in 2..upper {
        let fit = kmeans(vectors, k);
        let score = sampled_silhouette(vectors, &fit.labels);
        tracing::debug!(k, score, "Scored candidate cluster count");
        if score > best_score {
            best_score = score;
            best_k = k;
        }
    }

    tracing::info!(k = best_k, "Auto-detected optimal cluster count");
    best_k
}

struct KMeansFit {
    labels: Vec<usize>,
    inertia: f32,
}

fn kmeans(vectors: &[Vec<f32>], k: usize) -> KMeansFit {
    let mut best = lloyd(vectors, k, &mut StdRng::seed_from_u64(RANDOM_SEED));
    for init in 1..N_INIT {
        let mut rng = StdRng::seed_from_u64(RANDOM_SEED.wrapping_add(init as u64));
        let candidate = lloyd(vectors, k, &mut rng);
        if candidate.inertia < best.inertia {
            best = candidate;
        }
    }
    best
}

fn lloyd(vectors: &[Vec<f32>], k: usize, rng: &mut StdRng) -> KMeansFit {
    let n = vectors.len();
    let mut centroids = kmeans_pp_init(vectors, k, rng);
    let mut labels = vec![0usize; n];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, vector) in vectors.iter().enumerate() {
            let nearest = nearest_centroid(vector, &centroids);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        refill_empty_clusters(vectors, &centroids, &mut labels, k);
        update_centroids(vectors, &labels, &mut centroids);

        if !changed {
            break;
        }
    }

    let inertia = vectors
        .iter()
        .zip(labels.iter())
        .map(|(v, &label)| squared_distance(v, &centroids[label]))
        .sum();

    KMeansFit { labels, inertia }
}

fn kmeans_pp_init(vectors: &[Vec<f32>], k: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let n = vectors.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(vectors[rng.gen_range(0..n)].clone());

    while centroids.len() < k {
        let weights: Vec<f32> = vectors
            .iter()
            .map(|v| {
                centroids
                    .iter()
                    .map(|c| squared_distance(v, c))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect();

        let total: f32 = weights.iter().sum();
        let chosen = if total <= f32::EPSILON {
            // All-identical vectors; uniform pick.
            rng.gen_range(0..n)
        } else {
            let mut target = rng.gen_range(0.0f32..total);
            let mut index = n - 1;
            for (i, w) in weights.iter().enumerate() {
                target -= w;
                if target <= 0.0 {
                    index = i;
                    break;
                }
            }
            index
        };
        centroids.push(vectors[chosen].clone());
    }

    centroids
}

fn nearest_centroid(vector: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(vector, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

fn refill_empty_clusters(
    vectors: &[Vec<f32>],
    centroids: &[Vec<f32>],
    labels: &mut [usize],
    k: usize,
) {
    for empty in 0..k {
        let mut counts = vec![0usize; k];
        for &label in labels.iter() {
            counts[label] += 1;
        }
        if counts[empty] > 0 {
            continue;
        }

        let mut farthest = 0;
        let mut farthest_dist = f32::NEG_INFINITY;
        for (i, vector) in vectors.iter().enumerate() {
            // Only steal from clusters that keep at least one member.
            if counts[labels[i]] <= 1 {
                continue;
            }
            let dist = squared_distance(vector, &centroids[labels[i]]);
            if dist > farthest_dist {
                farthest_dist = dist;
                farthest = i;
            }
        }
        labels[farthest] = empty;
    }
}

fn update_centroids(vectors: &[Vec<f32>], labels: &[usize], centroids: &mut [Vec<f32>]) {
    let dims = vectors[0].len();
    let k = centroids.len();
    let mut sums = vec![vec![0.0f32; dims]; k];
    let mut counts = vec![0usize; k];

    for (vector, &label) in vectors.iter().zip(labels.iter()) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(vector.iter()) {
            *sum += value;
        }
    }

    for (label, centroid) in centroids.iter_mut().enumerate() {
        if counts[label] == 0 {
            continue;
        }
        for (c, sum) in centroid.iter_mut().zip(sums[label].iter()) {
            *c = sum / counts[label] as f32;
        }
    }
}

fn sampled_silhouette(vectors: &[Vec<f32>], labels: &[usize]) -> f32 {
    let n = vectors.len();
    let mut indices: Vec<usize> = (0..n).collect();
    if n > SILHOUETTE_SAMPLE_CAP {
        indices.shuffle(&mut StdRng::seed_from_u64(RANDOM_SEED));
        indices.truncate(SILHOUETTE_SAMPLE_CAP);
    }

    let sample_labels: Vec<usize> = indices.iter().map(|&i| labels[i]).collect();
    let distinct = {
        let mut seen = sample_labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    };
    if distinct < 2 {
        return -1.0;
    }

    let m = indices.len();
    let mut total = 0.0f32;
    for a_pos in 0..m {
        let own = sample_labels[a_pos];
        let mut intra_sum = 0.0f32;
        let mut intra_count = 0usize;
        let mut inter: Vec<(f32, usize)> = Vec::new();

        for b_pos in 0..m {
            if a_pos == b_pos {
                continue;
            }
            let dist = squared_distance(&vectors[indices[a_pos]], &vectors[indices[b_pos]]).sqrt();
            let other = sample_labels[b_pos];
            if other == own {
                intra_sum += dist;
                intra_count += 1;
            } else {
                match inter.iter_mut().find(|(_, label)| *label == other) {
                    Some((sum, _)) => *sum += dist,
                    None => inter.push((dist, other)),
                }
            }
        }

        if intra_count == 0 {
            // Singleton cluster within the sample scores zero.
            continue;
        }

        let a = intra_sum / intra_count as f32;
        let b = inter
            .iter()
            .map(|(sum, label)| {
                let count = sample_labels.iter().filter(|&&l| l == *label).count();
                sum / count as f32
            })
            .fold(f32::INFINITY, f32::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    total / m as f32
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[derive(Debug, thiserror::Error)]
pub enum ClusterEngineError {
    #[error("cannot cluster an empty vector set")]
    EmptyInput,
    #[error("invalid cluster count {requested} for {available} vectors")]
    InvalidClusterCount { requested: usize, available: usize },
}
