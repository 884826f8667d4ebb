//! # kmeans-generic - API documentation
//!
//! Kmeans-generic is a small rust library for the calculation of k-means-clustering on observations
//! of any type.
//!
//! ## Design target
//! The library does not know anything about the observations it clusters. The caller describes them
//! using a [`Metric`]: a distance function, a mean function (calculating the representative value
//! of a group of observations) and an equality function (used to detect convergence). The library
//! supplies the partitioning procedure: a k-means++ seeding, followed by Lloyd's algorithm.
//!
//! ## Supported variants
//! - k-Means clustering (Lloyd) [`KMeans::calculate`], iterating until no centroid changes anymore
//! - The same, with a parallel assignment step [`KMeans::calculate_par`]
//!
//! ## Supported centroid initializations
//! - K-Means++ [`KMeans::seed`]. **Note**: This is the *farthest-point* variant. After the first,
//! randomly chosen centroid, each following centroid is the observation farthest away from its nearest
//! centroid, instead of being drawn with a probability proportional to `D(x)²`.
//! - Precomputed centroids [`KMeans::calculate_from`]
//!
//! ## Shipped metrics
//! - [`EuclideanDistance`] on `Vec<f32>` / `Vec<f64>`
//! - [`HistogramDistance`] on `Vec<f32>` / `Vec<f64>`
//! - [`FnMetric`] for three plain closures
//!
//! ## Example
//! ```rust
//! use kmeans_generic::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let samples = vec![1.0f64, 2.0, 3.0, 10.0, 11.0, 12.0];
//!     let metric = FnMetric::new(
//!         |a: &f64, b: &f64| (a - b).abs(),
//!         |m: &[f64]| m.iter().sum::<f64>() / m.len() as f64,
//!         |a: &f64, b: &f64| a == b,
//!     );
//!
//!     // Use a seeded generator for reproducible results
//!     let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
//!     let kmean = KMeans::with_config(&samples, metric, conf).unwrap();
//!     let result = kmean.calculate(2).unwrap();
//!
//!     for cluster in result.clusters.iter() {
//!         println!("Centroid: {} - Members: {:?}", cluster.centroid, cluster.members);
//!     }
//!     println!("Error: {}", result.distsum);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_generic::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k) = (2000, 8, 4);
//!
//!     // Generate some random data
//!     let samples: Vec<Vec<f64>> = (0..sample_cnt)
//!         .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
//!         .collect();
//!
//!     let init_done = |_: &[Cluster<Vec<f64>>]| println!("Initialization completed.");
//!     let iteration_done = |_: &[Cluster<Vec<f64>>], nr: usize, changed: usize|
//!         println!("Iteration {} - Changed centroids: {}", nr, changed);
//!     let conf = KMeansConfig::build()
//!         .init_done(&init_done)
//!         .iteration_done(&iteration_done)
//!         .max_iter(500)
//!         .build();
//!
//!     let kmean = KMeans::with_config(&samples, EuclideanDistance, conf).unwrap();
//!     let result = kmean.calculate(k).unwrap();
//!
//!     println!("Converged: {} after {} iterations", result.converged, result.iterations);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. This struct is generic over the observation type and
//! the [`Metric`] describing it. It borrows the observations, and can be used for any amount of calculations.
//!
//! Calling a calculation method (e.g. [`KMeans::calculate`]) does not mutate the struct. Each call reseeds from
//! the configured random number generator and returns a new [`KMeansState`], holding the clusters (centroid and
//! members), the cluster assignment of each observation and some statistics.
//!
//! Errors raised by the [`Metric`] abort the calculation and are returned as [`KMeansError::Metric`]. If a cluster
//! ends up without members, the mean function is called with an empty slice; what happens then is defined by the
//! metric. Calculations do not log anything on their own, apart from emitting [`tracing`] events.

#[macro_use] mod helpers;
mod api;
mod distances;
mod error;
mod inits;
mod variants;

pub use api::{Cluster, FnMetric, InitDoneCallbackFn, IterationDoneCallbackFn, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState, Metric};
pub use distances::{EuclideanDistance, HistogramDistance, Primitive};
pub use error::{KMeansError, MetricError};
