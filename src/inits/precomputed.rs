use crate::{Cluster, KMeans, KMeansError, Metric};

#[inline(always)]
pub fn calculate<T, M>(kmean: &KMeans<'_, T, M>, computed: Vec<T>) -> Result<Vec<Cluster<T>>, KMeansError<M::Error>>
where
    T: Clone,
    M: Metric<T>,
{
    kmean.check_cluster_count(computed.len())?;
    Ok(computed.into_iter().map(Cluster::new).collect())
}

#[cfg(test)]
mod tests {
    use crate::helpers::testing::*;
    use crate::{EuclideanDistance, KMeans, KMeansError};

    #[test]
    fn train_with_precomputed_centroids() {
        let samples = vec![vec![0.0f32], vec![1.0], vec![10.0], vec![11.0], vec![20.0], vec![21.0]];
        let centroids = vec![vec![0.0], vec![10.0], vec![20.0]];

        let kmean = KMeans::new(&samples, EuclideanDistance).unwrap();
        let result = kmean.calculate_from(centroids).unwrap();

        assert!(result.converged);
        assert_eq!(result.centroids().cloned().collect::<Vec<_>>(), vec![vec![0.5], vec![10.5], vec![20.5]]);
        assert_eq!(result.assignments, vec![0, 0, 1, 1, 2, 2]);
        assert_partition(&samples, &result);
        assert_consistent(&EuclideanDistance, &result);
    }

    #[test]
    fn precomputed_centroid_count_is_validated() {
        let samples = vec![1.0, 2.0];
        let kmean = KMeans::new(&samples, abs_metric()).unwrap();
        assert!(matches!(kmean.calculate_from(vec![]), Err(KMeansError::InconsistentCluster { requested: 0, available: 2 })));
        assert!(matches!(kmean.calculate_from(vec![1.0, 1.5, 2.0]), Err(KMeansError::InconsistentCluster { requested: 3, available: 2 })));
    }
}
