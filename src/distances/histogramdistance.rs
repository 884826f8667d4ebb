use super::{check_dims, component_mean, to_distance, Primitive};
use crate::{Metric, MetricError};

/// Earth mover's distance between one-dimensional histograms (sum of absolute differences of
/// their cumulative distributions), with the component-wise mean histogram as centroid.
pub struct HistogramDistance;

impl<F: Primitive> Metric<Vec<F>> for HistogramDistance {
    type Error = MetricError;

    #[inline(always)]
    fn distance(&self, a: &Vec<F>, b: &Vec<F>) -> Result<f64, MetricError> {
        check_dims(a, b)?;
        let mut total = F::zero();
        let mut cdf_a = F::zero();
        let mut cdf_b = F::zero();
        for (x, y) in a.iter().zip(b.iter()) {
            cdf_a += x;
            cdf_b += y;
            total += (cdf_a - cdf_b).abs();
        }
        Ok(to_distance(total))
    }

    fn mean(&self, members: &[Vec<F>]) -> Result<Vec<F>, MetricError> {
        component_mean(members)
    }

    fn equals(&self, a: &Vec<F>, b: &Vec<F>) -> Result<bool, MetricError> {
        check_dims(a, b)?;
        Ok(a == b)
    }
}
