use thiserror::Error;

/// Error type of a k-means calculation.
///
/// ## Generics
/// - **E**: Error type of the injected [`Metric`](crate::Metric)
#[derive(Error, Debug)]
pub enum KMeansError<E> {
    /// The observation collection passed at construction was empty
    #[error("Invalid input: no observations provided")]
    InvalidInput,

    /// The requested amount of clusters can not be seeded from the available observations
    /// (it has to be within `1..=observations`)
    #[error("Inconsistent cluster count: requested {requested} clusters for {available} observations")]
    InconsistentCluster { requested: usize, available: usize },

    /// The distance function returned a value that is not a non-negative number
    #[error("Invalid distance: {0}")]
    InvalidDistance(f64),

    /// The calculation was cancelled through the configured cancellation flag
    #[error("Calculation cancelled before iteration {iteration}")]
    Cancelled { iteration: usize },

    /// One of the injected functions (distance, mean, equals) failed
    #[error("Metric function failed: {0}")]
    Metric(#[source] E),
}

/// Error type of the reference metrics shipped with this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// The mean of an empty cluster was requested
    #[error("Mean of an empty cluster is undefined")]
    EmptyCluster,

    /// Two vectors of differing length were compared
    #[error("Dimension mismatch: {0} != {1}")]
    DimensionMismatch(usize, usize),
}
