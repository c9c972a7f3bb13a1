use sibu::application::services::{cluster, ClusterEngineError};
use sibu::domain::RequestedClusters;

/// Two tight, well-separated blobs of 2-d points.
fn two_blobs(per_blob: usize) -> Vec<Vec<f32>> {
    let mut vectors = Vec::with_capacity(per_blob * 2);
    for i in 0..per_blob {
        vectors.push(vec![1.0, i as f32 * 0.01]);
    }
    for i in 0..per_blob {
        vectors.push(vec![i as f32 * 0.01, 1.0]);
    }
    vectors
}

#[test]
fn given_separated_blobs_when_clustering_with_fixed_k_then_blobs_land_in_distinct_clusters() {
    let vectors = two_blobs(8);
    let assignment = cluster(&vectors, RequestedClusters::Fixed(2)).unwrap();

    assert_eq!(assignment.k, 2);
    assert_eq!(assignment.labels.len(), 16);

    let first_blob = assignment.labels[0];
    assert!(assignment.labels[..8].iter().all(|&l| l == first_blob));
    assert!(assignment.labels[8..].iter().all(|&l| l != first_blob));
}

#[test]
fn given_fixed_k_when_clustering_then_every_label_is_used() {
    let vectors = two_blobs(6);
    let assignment = cluster(&vectors, RequestedClusters::Fixed(4)).unwrap();

    for label in 0..assignment.k {
        assert!(
            assignment.labels.contains(&label),
            "label {} unused in {:?}",
            label,
            assignment.labels
        );
    }
    assert!(assignment.labels.iter().all(|&l| l < assignment.k));
}

#[test]
fn given_separated_blobs_when_auto_detecting_then_finds_two_clusters() {
    let vectors = two_blobs(10);
    let assignment = cluster(&vectors, RequestedClusters::Auto).unwrap();

    assert_eq!(assignment.k, 2);
}

#[test]
fn given_auto_mode_when_clustering_then_k_stays_within_search_range() {
    let vectors = two_blobs(12);
    let assignment = cluster(&vectors, RequestedClusters::Auto).unwrap();

    assert!((2..=10).contains(&assignment.k));
}

#[test]
fn given_fewer_than_three_vectors_when_auto_detecting_then_falls_back_to_one_cluster() {
    let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let assignment = cluster(&vectors, RequestedClusters::Auto).unwrap();

    assert_eq!(assignment.k, 1);
    assert_eq!(assignment.labels, vec![0, 0]);
}

#[test]
fn given_same_input_when_clustering_twice_then_labels_are_identical() {
    let vectors = two_blobs(10);
    let first = cluster(&vectors, RequestedClusters::Auto).unwrap();
    let second = cluster(&vectors, RequestedClusters::Auto).unwrap();

    assert_eq!(first.k, second.k);
    assert_eq!(first.labels, second.labels);
}

#[test]
fn given_no_vectors_when_clustering_then_rejects_input() {
    let error = cluster(&[], RequestedClusters::Fixed(2)).unwrap_err();
    assert!(matches!(error, ClusterEngineError::EmptyInput));
}

#[test]
fn given_zero_requested_clusters_when_clustering_then_rejects_count() {
    let vectors = two_blobs(4);
    let error = cluster(&vectors, RequestedClusters::Fixed(0)).unwrap_err();
    assert!(matches!(
        error,
        ClusterEngineError::InvalidClusterCount { requested: 0, .. }
    ));
}

#[test]
fn given_more_clusters_than_vectors_when_clustering_then_rejects_count() {
    let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
    let error = cluster(&vectors, RequestedClusters::Fixed(4)).unwrap_err();
    assert!(matches!(
        error,
        ClusterEngineError::InvalidClusterCount {
            requested: 4,
            available: 3
        }
    ));
}

#[test]
fn given_k_equal_to_vector_count_when_clustering_then_each_vector_gets_own_cluster() {
    let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
    let assignment = cluster(&vectors, RequestedClusters::Fixed(3)).unwrap();

    let mut labels = assignment.labels.clone();
    labels.sort_unstable();
    assert_eq!(labels, vec![0, 1, 2]);
}
