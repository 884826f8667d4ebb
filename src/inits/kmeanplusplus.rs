use crate::api::checked_distance;
use crate::{Cluster, KMeans, KMeansError, Metric};
use rand::prelude::*;
use tracing::debug;

#[inline(always)]
pub fn calculate<T, M>(kmean: &KMeans<'_, T, M>, k: usize) -> Result<Vec<Cluster<T>>, KMeansError<M::Error>>
where
    T: Clone,
    M: Metric<T>,
{
    let observations = kmean.observations;
    let mut chosen = vec![false; observations.len()];
    // Distance of each observation to its nearest, already chosen centroid
    let mut nearest_distances = vec![f64::INFINITY; observations.len()];
    let mut clusters = Vec::with_capacity(k);

    {
        // Randomly select first centroid
        let first_idx = kmean.config.rnd.borrow_mut().gen_range(0..observations.len());
        chosen[first_idx] = true;
        clusters.push(Cluster::new(observations[first_idx].clone()));
        debug!(first_idx, k, "k-means++: selected first centroid");
    }
    while clusters.len() < k {
        let newest_centroid = &clusters[clusters.len() - 1].centroid;
        let mut farthest: Option<(usize, f64)> = None;
        for (idx, observation) in observations.iter().enumerate() {
            if chosen[idx] {
                continue;
            }
            // Only the newest centroid can have moved the nearest distance
            let dist = checked_distance(&kmean.metric, observation, newest_centroid)?;
            if dist < nearest_distances[idx] {
                nearest_distances[idx] = dist;
            }
            match farthest {
                Some((_, farthest_dist)) if farthest_dist >= nearest_distances[idx] => {}
                _ => farthest = Some((idx, nearest_distances[idx])),
            }
        }
        let (next_idx, _) = farthest.ok_or(KMeansError::InconsistentCluster { requested: k, available: observations.len() })?;
        chosen[next_idx] = true;
        clusters.push(Cluster::new(observations[next_idx].clone()));
    }
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use crate::helpers::testing::*;
    use crate::{FnMetric, KMeans, KMeansError, Metric};
    use std::convert::Infallible;

    type Labeled = (usize, f64);

    /// Observations carrying their position, compared by value only.
    fn labeled(values: &[f64]) -> Vec<Labeled> {
        values.iter().cloned().enumerate().collect()
    }

    fn label_metric() -> impl Metric<Labeled, Error = Infallible> {
        FnMetric::new(
            |a: &Labeled, b: &Labeled| (a.1 - b.1).abs(),
            |m: &[Labeled]| (usize::MAX, m.iter().map(|o| o.1).sum::<f64>() / m.len() as f64),
            |a: &Labeled, b: &Labeled| a.1 == b.1,
        )
    }

    #[test]
    fn seeds_are_distinct_positions() {
        let samples = labeled(&[1.0, 1.0, 2.0, 2.0, 2.0, 7.0]);
        for seed in 0..20 {
            let kmean = KMeans::with_config(&samples, label_metric(), seeded_config(seed)).unwrap();
            let clusters = kmean.seed(samples.len()).unwrap();
            let mut ids: Vec<usize> = clusters.iter().map(|c| c.centroid.0).collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..samples.len()).collect::<Vec<_>>());
            assert!(clusters.iter().all(|c| c.members.is_empty()));
        }
    }

    #[test]
    fn farthest_observation_is_chosen() {
        let samples = vec![0.0, 1.0, 2.0, 100.0];
        for seed in 0..20 {
            let kmean = KMeans::with_config(&samples, abs_metric(), seeded_config(seed)).unwrap();
            let clusters = kmean.seed(2).unwrap();
            let first = clusters[0].centroid;
            let expected = if first == 100.0 { 0.0 } else { 100.0 };
            assert_eq!(clusters[1].centroid, expected);
        }
    }

    #[test]
    fn farthest_point_uses_nearest_chosen_centroid() {
        // After 0 and 100 are chosen, 40 is nearer to 0 than 70 is to 100
        let samples = vec![0.0, 40.0, 70.0, 100.0];
        for seed in 0..20 {
            let kmean = KMeans::with_config(&samples, abs_metric(), seeded_config(seed)).unwrap();
            let clusters = kmean.seed(3).unwrap();
            let mut centroids: Vec<f64> = clusters.iter().map(|c| c.centroid).collect();
            if centroids[0] == 0.0 || centroids[0] == 100.0 {
                centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
                assert_eq!(centroids, vec![0.0, 40.0, 100.0]);
            }
        }
    }

    #[test]
    fn ties_prefer_lower_position() {
        let samples = labeled(&[0.0, 10.0, -10.0]);
        for seed in 0..20 {
            let kmean = KMeans::with_config(&samples, label_metric(), seeded_config(seed)).unwrap();
            let clusters = kmean.seed(2).unwrap();
            let expected = match clusters[0].centroid.0 {
                0 => 1, // 10 and -10 are equally far away
                1 => 2,
                _ => 1,
            };
            assert_eq!(clusters[1].centroid.0, expected);
        }
    }

    #[test]
    fn duplicate_values_are_chosen_with_zero_distance() {
        let samples = labeled(&[3.0, 3.0, 3.0]);
        let kmean = KMeans::with_config(&samples, label_metric(), seeded_config(7)).unwrap();
        let clusters = kmean.seed(2).unwrap();
        let first = clusters[0].centroid.0;
        let expected = if first == 0 { 1 } else { 0 };
        assert_eq!(clusters[1].centroid.0, expected);
    }

    #[test]
    fn seeding_is_reproducible() {
        let samples: Vec<f64> = (0..100).map(|i| ((i * 37) % 101) as f64).collect();
        let a = KMeans::with_config(&samples, abs_metric(), seeded_config(1337)).unwrap().seed(10).unwrap();
        let b = KMeans::with_config(&samples, abs_metric(), seeded_config(1337)).unwrap().seed(10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seeding_rejects_invalid_cluster_counts() {
        let samples = vec![1.0, 2.0];
        let kmean = KMeans::new(&samples, abs_metric()).unwrap();
        assert!(matches!(kmean.seed(0), Err(KMeansError::InconsistentCluster { requested: 0, available: 2 })));
        assert!(matches!(kmean.seed(3), Err(KMeansError::InconsistentCluster { requested: 3, available: 2 })));
    }
}
