use crate::MetricError;
use num::Float;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::AddAssign;

mod euclideandistance;
mod histogramdistance;

pub use euclideandistance::EuclideanDistance;
pub use histogramdistance::HistogramDistance;

/// Float primitives the shipped metrics work on.
pub trait Primitive: Float + Sum + AddAssign + Default + Display + Debug + Send + Sync + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

pub(crate) fn check_dims<F>(a: &[F], b: &[F]) -> Result<(), MetricError> {
    if a.len() != b.len() {
        return Err(MetricError::DimensionMismatch(a.len(), b.len()));
    }
    Ok(())
}

/// Component-wise mean of equally sized vectors.
pub(crate) fn component_mean<F: Primitive>(members: &[Vec<F>]) -> Result<Vec<F>, MetricError> {
    let first = members.first().ok_or(MetricError::EmptyCluster)?;
    let mut sum = vec![F::zero(); first.len()];
    let mut cnt = F::zero();
    for member in members {
        check_dims(&sum, member)?;
        sum.iter_mut().zip(member.iter()).for_each(|(s, v)| *s += v);
        cnt += F::one();
    }
    sum.iter_mut().for_each(|s| *s = *s / cnt);
    Ok(sum)
}

/// Convert a distance to `f64`. Values that can not be represented become `NaN`, and are then
/// rejected by the calculation.
pub(crate) fn to_distance<F: Primitive>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_mean_of_vectors() {
        let members = vec![vec![1.0f64, 10.0], vec![2.0, 20.0], vec![6.0, 0.0]];
        assert_eq!(component_mean(&members).unwrap(), vec![3.0, 10.0]);
    }

    #[test]
    fn component_mean_errors() {
        let empty: Vec<Vec<f32>> = Vec::new();
        assert_eq!(component_mean(&empty), Err(MetricError::EmptyCluster));
        let ragged = vec![vec![1.0f32, 2.0], vec![1.0]];
        assert_eq!(component_mean(&ragged), Err(MetricError::DimensionMismatch(2, 1)));
    }
}
