use super::{check_dims, component_mean, to_distance, Primitive};
use crate::{Metric, MetricError};

/// Squared euclidean distance on float vectors, with the component-wise mean as centroid.
pub struct EuclideanDistance;

impl<F: Primitive> Metric<Vec<F>> for EuclideanDistance {
    type Error = MetricError;

    #[inline(always)]
    fn distance(&self, a: &Vec<F>, b: &Vec<F>) -> Result<f64, MetricError> {
        check_dims(a, b)?;
        let dist = a.iter().zip(b.iter())
            .map(|(&sp, &cp)| sp - cp)         // <sample> - <centroid>
            .map(|v| v * v)                    // <vec_components> ^2
            .sum::<F>();                       // sum(<vec_components>^2)
        Ok(to_distance(dist))
    }

    fn mean(&self, members: &[Vec<F>]) -> Result<Vec<F>, MetricError> {
        component_mean(members)
    }

    fn equals(&self, a: &Vec<F>, b: &Vec<F>) -> Result<bool, MetricError> {
        check_dims(a, b)?;
        Ok(a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance() {
        let (a, b) = (vec![1.0f64, 2.0, 3.0], vec![4.0, 6.0, 3.0]);
        assert_eq!(EuclideanDistance.distance(&a, &b), Ok(25.0));
        assert_eq!(EuclideanDistance.distance(&b, &a), Ok(25.0));
        assert_eq!(EuclideanDistance.distance(&a, &a), Ok(0.0));
    }

    #[test]
    fn f32_vectors() {
        let (a, b) = (vec![0.5f32, -1.5], vec![1.0f32, 0.5]);
        assert_approx_eq!(EuclideanDistance.distance(&a, &b).unwrap(), 4.25, 1e-6);
        assert_eq!(EuclideanDistance.mean(&[a.clone(), b.clone()][..]), Ok(vec![0.75, -0.5]));
        assert_eq!(EuclideanDistance.equals(&a, &a), Ok(true));
        assert_eq!(EuclideanDistance.equals(&a, &b), Ok(false));
    }

    #[test]
    fn dimension_mismatch() {
        let (a, b) = (vec![1.0f64, 2.0], vec![1.0f64]);
        assert_eq!(EuclideanDistance.distance(&a, &b), Err(MetricError::DimensionMismatch(2, 1)));
        assert_eq!(EuclideanDistance.equals(&b, &a), Err(MetricError::DimensionMismatch(1, 2)));
    }
}
