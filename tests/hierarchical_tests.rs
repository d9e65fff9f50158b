#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use aggloclust::clustering::{ClusterId, ClusteringParams, HierarchicalClustering};
    use aggloclust::core::ClusteringError;
    use aggloclust::distances::DistanceKind;
    use aggloclust::sample::read_sample;
    use ndarray::{array, Array2};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    // simple1.txt is the 10-point two-group sample; simple2..5 and hepta are seeded
    // synthetic blobs built with the same group sizes.
    fn sample_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("samples")
            .join(name)
    }

    fn cluster(data: &Array2<f64>, params: ClusteringParams) -> Vec<Vec<usize>> {
        let mut clustering = HierarchicalClustering::new(data.view(), params).unwrap();
        clustering.process().expect("Clustering failed");
        clustering.get_clusters().unwrap()
    }

    fn sorted_partition(mut clusters: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        clusters.sort();
        clusters
    }

    fn template_clustering_results(name: &str, number_clusters: usize, expected_sizes: &[usize], optimized: bool) {
        let sample = read_sample(sample_path(name)).unwrap();
        let clusters = cluster(&sample, ClusteringParams::new(number_clusters, optimized));

        let total: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(total, sample.nrows());
        assert_eq!(total, expected_sizes.iter().sum::<usize>());

        let mut sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, expected_sizes, "{} with {} clusters", name, number_clusters);

        let unique: HashSet<usize> = clusters.iter().flatten().copied().collect();
        assert_eq!(unique.len(), sample.nrows());
    }

    fn check_both_engines(name: &str, number_clusters: usize, expected_sizes: &[usize]) {
        template_clustering_results(name, number_clusters, expected_sizes, false);
        template_clustering_results(name, number_clusters, expected_sizes, true);
    }

    #[test]
    fn test_clustering_sample_simple1() {
        check_both_engines("simple1.txt", 2, &[5, 5]);
        check_both_engines("simple1.txt", 1, &[10]);
    }

    #[test]
    fn test_clustering_sample_simple2() {
        check_both_engines("simple2.txt", 3, &[5, 8, 10]);
        check_both_engines("simple2.txt", 1, &[23]);
    }

    #[test]
    fn test_clustering_sample_simple3() {
        check_both_engines("simple3.txt", 4, &[10, 10, 10, 30]);
        check_both_engines("simple3.txt", 1, &[60]);
    }

    #[test]
    fn test_clustering_sample_simple4() {
        check_both_engines("simple4.txt", 5, &[15, 15, 15, 15, 15]);
        check_both_engines("simple4.txt", 1, &[75]);
    }

    #[test]
    fn test_clustering_sample_simple5() {
        check_both_engines("simple5.txt", 4, &[15, 15, 15, 15]);
        check_both_engines("simple5.txt", 1, &[60]);
    }

    #[test]
    fn test_clustering_hepta() {
        check_both_engines("hepta.txt", 7, &[30, 30, 30, 30, 30, 30, 32]);
        check_both_engines("hepta.txt", 1, &[212]);
    }

    #[test]
    fn test_simple1_exact_partition() {
        let sample = read_sample(sample_path("simple1.txt")).unwrap();
        let clusters = sorted_partition(cluster(&sample, ClusteringParams::new(2, false)));
        assert_eq!(clusters, vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7, 8, 9]]);
    }

    #[test]
    fn test_engines_agree_on_random_samples() {
        let mut rng = SmallRng::seed_from_u64(42);
        for round in 0..6 {
            let n = 20 + round * 17;
            let dim = 1 + round % 4;
            let data = Array2::from_shape_fn((n, dim), |_| rng.random_range(-10.0..10.0));

            for target in [1, 2, 3, n / 4, n / 2, n - 1] {
                let reference = sorted_partition(cluster(&data, ClusteringParams::new(target, false)));
                let optimized = sorted_partition(cluster(&data, ClusteringParams::new(target, true)));
                assert_eq!(reference, optimized, "n={} dim={} target={}", n, dim, target);
            }
        }
    }

    #[test]
    fn test_engines_agree_with_exact_ties() {
        // Integer-grid points give many identical distances.
        let mut rng = SmallRng::seed_from_u64(7);
        let data = Array2::from_shape_fn((64, 2), |_| rng.random_range(0..6) as f64);

        for target in 1..=16 {
            let reference = ClusteringParams::new(target, false).with_history(true);
            let optimized = ClusteringParams::new(target, true).with_history(true);

            let mut a = HierarchicalClustering::new(data.view(), reference).unwrap();
            let mut b = HierarchicalClustering::new(data.view(), optimized).unwrap();
            a.process().unwrap();
            b.process().unwrap();

            assert_eq!(a.history(), b.history(), "target={}", target);
            assert_eq!(a.get_clusters().unwrap(), b.get_clusters().unwrap());
        }
    }

    #[test]
    fn test_engines_agree_on_parallel_scan_path() {
        // 400 grid points keep the reference scan above PARALLEL_SCAN_THRESHOLD
        // for most rounds, with many exact ties.
        let data = Array2::from_shape_fn((400, 2), |(i, j)| if j == 0 { (i % 20) as f64 } else { (i / 20) as f64 });
        assert!(data.nrows() > aggloclust::clustering::selector::PARALLEL_SCAN_THRESHOLD);

        for distance in [DistanceKind::Euclidean, DistanceKind::SquaredEuclidean] {
            let mut a = HierarchicalClustering::new(
                data.view(),
                ClusteringParams::new(1, false).with_distance(distance).with_history(true),
            )
            .unwrap();
            let mut b = HierarchicalClustering::new(
                data.view(),
                ClusteringParams::new(1, true).with_distance(distance).with_history(true),
            )
            .unwrap();
            a.process().unwrap();
            b.process().unwrap();

            assert_eq!(a.history().len(), 399);
            assert_eq!(a.history(), b.history(), "{:?}", distance);
        }
    }

    #[test]
    fn test_squared_metric_same_partition_on_separated_blobs() {
        let sample = read_sample(sample_path("hepta.txt")).unwrap();
        let euclidean = sorted_partition(cluster(&sample, ClusteringParams::new(7, true)));
        let squared = sorted_partition(cluster(
            &sample,
            ClusteringParams::new(7, true).with_distance(DistanceKind::SquaredEuclidean),
        ));
        assert_eq!(euclidean, squared);
    }

    #[test]
    fn test_results_are_reproducible() {
        let sample = read_sample(sample_path("simple3.txt")).unwrap();
        let first = cluster(&sample, ClusteringParams::new(4, true));
        for _ in 0..3 {
            assert_eq!(cluster(&sample, ClusteringParams::new(4, true)), first);
        }
    }

    #[test]
    fn test_coarser_targets_contain_finer_groups() {
        let sample = read_sample(sample_path("simple2.txt")).unwrap();
        let mut previous: Option<Vec<Vec<usize>>> = None;

        for target in (1..=8).rev() {
            let coarse = cluster(&sample, ClusteringParams::new(target, true));
            if let Some(fine) = &previous {
                for group in fine {
                    let containing = coarse
                        .iter()
                        .filter(|c| group.iter().all(|p| c.contains(p)))
                        .count();
                    assert_eq!(containing, 1, "group {:?} split at target {}", group, target);
                }
            }
            previous = Some(coarse);
        }
    }

    #[test]
    fn test_target_equal_to_sample_size_keeps_singletons() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [3.0, 3.0]];
        let mut clustering = HierarchicalClustering::new(data.view(), ClusteringParams::new(3, false)).unwrap();
        clustering.process().unwrap();

        assert_eq!(clustering.rounds(), 0);
        assert_eq!(clustering.get_clusters().unwrap(), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_single_point_sample() {
        let data = array![[4.2, -1.0]];
        for optimized in [false, true] {
            let clusters = cluster(&data, ClusteringParams::new(1, optimized));
            assert_eq!(clusters, vec![vec![0]]);
        }
    }

    #[test]
    fn test_duplicate_points() {
        let data = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [9.0, 9.0], [9.0, 9.0]];
        for optimized in [false, true] {
            let clusters = sorted_partition(cluster(&data, ClusteringParams::new(2, optimized)));
            assert_eq!(clusters, vec![vec![0, 1, 2], vec![3, 4]]);
        }
    }

    #[test]
    fn test_f32_samples() {
        let data: Array2<f32> = array![[0.0, 0.0], [0.1, 0.0], [5.0, 5.0], [5.0, 5.1]];
        let mut clustering = HierarchicalClustering::new(data.view(), ClusteringParams::new(2, true)).unwrap();
        clustering.process().unwrap();

        let clusters = sorted_partition(clustering.get_clusters().unwrap());
        assert_eq!(clusters, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_invalid_inputs_fail_identically() {
        for optimized in [false, true] {
            let empty: Vec<Vec<f64>> = Vec::new();
            assert!(matches!(
                HierarchicalClustering::from_rows(&empty, ClusteringParams::new(1, optimized)),
                Err(ClusteringError::EmptySample)
            ));

            let ragged = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]];
            assert!(matches!(
                HierarchicalClustering::from_rows(&ragged, ClusteringParams::new(1, optimized)),
                Err(ClusteringError::DimensionMismatch { index: 2, expected: 2, actual: 1 })
            ));

            let dimensionless = vec![Vec::<f64>::new(), Vec::new()];
            assert!(matches!(
                HierarchicalClustering::from_rows(&dimensionless, ClusteringParams::new(1, optimized)),
                Err(ClusteringError::ZeroDimension)
            ));

            let non_finite = vec![vec![1.0, 2.0], vec![f64::NAN, 0.0]];
            assert!(matches!(
                HierarchicalClustering::from_rows(&non_finite, ClusteringParams::new(1, optimized)),
                Err(ClusteringError::NonFiniteCoordinate { index: 1 })
            ));

            let valid = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
            assert!(matches!(
                HierarchicalClustering::from_rows(&valid, ClusteringParams::new(0, optimized)),
                Err(ClusteringError::InvalidTarget(0))
            ));
        }
    }

    #[test]
    fn test_history_describes_each_round() {
        let sample = read_sample(sample_path("simple1.txt")).unwrap();
        let mut clustering =
            HierarchicalClustering::new(sample.view(), ClusteringParams::new(1, true).with_history(true)).unwrap();
        clustering.process().unwrap();

        let history = clustering.history();
        assert_eq!(history.len(), 9);
        assert_eq!(history.last().unwrap().size, 10);
        for (round, record) in history.iter().enumerate() {
            assert_eq!(record.merged, ClusterId(10 + round));
        }
        // the last merge joins the two groups, which are the most distant
        let last = history.last().unwrap();
        assert!(history[..8].iter().all(|r| r.distance < last.distance));
    }
}
