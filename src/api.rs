use crate::KMeansError;
use std::cell::RefCell;
use std::convert::Infallible;
use std::num::NonZeroUsize;
use std::sync::atomic::AtomicBool;
use rand::prelude::*;
use rayon::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&[Cluster<T>]);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&[Cluster<T>], usize, usize);

/// Capability trait, describing the space the observations live in.
///
/// The k-means implementation never inspects observations itself. Everything it needs to know
/// about them is asked through this trait: how far two observations are apart, what the
/// representative (mean) of a group of observations is, and whether two representatives are
/// considered identical.
///
/// All three functions are fallible. Any error returned from them aborts the running calculation
/// and is handed to the caller as [`KMeansError::Metric`].
///
/// For the common case of three plain (infallible) closures, see [`FnMetric`].
pub trait Metric<T> {
    /// Error type of the three functions
    type Error;

    /// Distance between the two given observations.
    /// Has to be a non-negative number, and `distance(x, x)` is expected to be `0`.
    fn distance(&self, a: &T, b: &T) -> Result<f64, Self::Error>;

    /// Representative value of the given group of observations.
    /// ## Note
    /// This may be called with an empty slice, when a cluster did not receive any members during
    /// an assignment step (e.g. because of duplicate observations). What to do in that case is
    /// up to the implementation.
    fn mean(&self, members: &[T]) -> Result<T, Self::Error>;

    /// Whether the two given centroids are identical. Used to detect convergence.
    fn equals(&self, a: &T, b: &T) -> Result<bool, Self::Error>;
}

/// [`Metric`] implementation built from three infallible closures.
///
/// ## Example
/// ```rust
/// use kmeans_generic::*;
///
/// let metric = FnMetric::new(
///     |a: &f64, b: &f64| (a - b).abs(),
///     |m: &[f64]| m.iter().sum::<f64>() / m.len() as f64,
///     |a: &f64, b: &f64| a == b,
/// );
/// assert_eq!(metric.distance(&1.0f64, &3.5f64).unwrap(), 2.5);
/// ```
pub struct FnMetric<D, M, Q> {
    distance: D,
    mean: M,
    equals: Q
}
impl<D, M, Q> FnMetric<D, M, Q> {
    /// ## Arguments
    /// - **distance**: `(a, b) -> distance`
    /// - **mean**: `members -> representative`
    /// - **equals**: `(a, b) -> identical?`
    pub fn new<T>(distance: D, mean: M, equals: Q) -> Self
            where D: Fn(&T, &T) -> f64, M: Fn(&[T]) -> T, Q: Fn(&T, &T) -> bool {
        Self { distance, mean, equals }
    }
}
impl<T, D, M, Q> Metric<T> for FnMetric<D, M, Q>
        where D: Fn(&T, &T) -> f64, M: Fn(&[T]) -> T, Q: Fn(&T, &T) -> bool {
    type Error = Infallible;

    fn distance(&self, a: &T, b: &T) -> Result<f64, Infallible> { Ok((self.distance)(a, b)) }
    fn mean(&self, members: &[T]) -> Result<T, Infallible> { Ok((self.mean)(members)) }
    fn equals(&self, a: &T, b: &T) -> Result<bool, Infallible> { Ok((self.equals)(a, b)) }
}


/// This is a structure holding various configuration options for the a k-means calculations, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **clusters**: Seeded clusters (centroids only, no members yet)
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **clusters**: Clusters after the iteration (members from the assignment step, updated centroids)
    /// - **iteration_id**: Number of the current iteration (starting at 1)
    /// - **changed**: Amount of centroids that changed within this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Upper bound for the amount of iterations (`None` = iterate until converged)
    pub(crate) max_iter: Option<NonZeroUsize>,
    /// Flag that aborts a running calculation once it is set
    pub(crate) cancel_flag: Option<&'a AtomicBool>
}
impl<'a, T> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            max_iter: None,
            cancel_flag: None
        }
    }
}
impl<'a, T> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("max_iter", &self.max_iter)
            .field("cancellable", &self.cancel_flag.is_some())
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T> {
    config: KMeansConfig<'a, T>
}
impl<'a, T> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Limit the amount of iterations. When the limit is reached before the calculation converged,
    /// the current state is returned with [`KMeansState::converged`] set to `false`.
    /// ## Default
    /// `0` (no limit)
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = NonZeroUsize::new(max_iter); self
    }
    /// Set a flag, that is checked before each iteration. Once it is set, the running calculation
    /// is aborted with [`KMeansError::Cancelled`].
    pub fn cancel_flag(mut self, cancel_flag: &'a AtomicBool) -> Self {
        self.config.cancel_flag = Some(cancel_flag); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// One cluster: its representative value and the observations currently assigned to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<T> {
    pub centroid: T,
    pub members: Vec<T>
}
impl<T> Cluster<T> {
    /// Create a cluster without any members.
    pub fn new(centroid: T) -> Self {
        Self { centroid, members: Vec::new() }
    }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable during a calculation.
///
/// ## Generics
/// - **T**: Type of the clustered observations
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of distances from all observations to their respective centroids
/// - **clusters**: Calculated clusters (centroid + members)
/// - **assignments**: Vector mapping each observation (by index) to its cluster
/// - **centroid_distances**: Vector containing each observation's distance to its centroid
/// - **iterations**: Amount of assignment/update iterations that were run
/// - **converged**: Whether the last iteration left every centroid unchanged
#[derive(Clone, Debug)]
pub struct KMeansState<T> {
    pub k: usize,
    pub distsum: f64,
    pub clusters: Vec<Cluster<T>>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<f64>,
    pub iterations: usize,
    pub converged: bool
}
impl<T> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, clusters: Vec<Cluster<T>>) -> Self {
        Self {
            k: clusters.len(),
            distsum: f64::INFINITY,
            clusters,
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![f64::INFINITY;sample_cnt],
            iterations: 0,
            converged: false
        }
    }

    /// The centroids of all clusters, in cluster order.
    pub fn centroids(&self) -> impl Iterator<Item = &T> {
        self.clusters.iter().map(|c| &c.centroid)
    }
}


/// Distance between **a** and **b**, rejecting values that violate the [`Metric::distance`] contract.
pub(crate) fn checked_distance<T, M: Metric<T>>(metric: &M, a: &T, b: &T) -> Result<f64, KMeansError<M::Error>> {
    let dist = metric.distance(a, b).map_err(KMeansError::Metric)?;
    if dist.is_nan() || dist < 0.0 {
        return Err(KMeansError::InvalidDistance(dist));
    }
    Ok(dist)
}

/// Index of (and distance to) the cluster whose centroid is nearest to **observation**.
/// Ties are resolved in favor of the lower cluster index.
pub(crate) fn nearest_cluster<T, M: Metric<T>>(metric: &M, observation: &T, clusters: &[Cluster<T>])
        -> Result<(usize, f64), KMeansError<M::Error>> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, cluster) in clusters.iter().enumerate() {
        let dist = checked_distance(metric, observation, &cluster.centroid)?;
        match best {
            Some((_, best_dist)) if best_dist <= dist => {},
            _ => best = Some((idx, dist))
        }
    }
    best.ok_or(KMeansError::InconsistentCluster { requested: 0, available: clusters.len() })
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the observations you want to operate on, as well as
/// the [`Metric`] describing them. The instance only borrows the observations, and is not mutated
/// by a calculation, so it can be used for any amount of calculations.
///
/// ## Supported variants
/// - k-Means clustering (Lloyd) [`KMeans::calculate`]
/// - k-Means clustering (Lloyd) with parallel assignment step [`KMeans::calculate_par`]
///
/// ## Supported initialization methods
/// - K-Means++ (farthest-point variant) [`KMeans::seed`]
/// - Precomputed centroids [`KMeans::calculate_from`]
pub struct KMeans<'a, T, M> {
    pub(crate) observations: &'a [T],
    pub(crate) metric: M,
    pub(crate) config: KMeansConfig<'a, T>
}
impl<'a, T: Clone, M: Metric<T>> KMeans<'a, T, M> {
    /// Create a new instance of the [`KMeans`] structure, using the default [`KMeansConfig`].
    ///
    /// ## Arguments
    /// - **observations**: Observations to cluster
    /// - **metric**: Distance, mean and equality functions for the observations
    ///
    /// ## Errors
    /// [`KMeansError::InvalidInput`], if **observations** is empty.
    pub fn new(observations: &'a [T], metric: M) -> Result<Self, KMeansError<M::Error>> {
        Self::with_config(observations, metric, KMeansConfig::default())
    }

    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **observations**: Observations to cluster
    /// - **metric**: Distance, mean and equality functions for the observations
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculations.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidInput`], if **observations** is empty.
    pub fn with_config(observations: &'a [T], metric: M, config: KMeansConfig<'a, T>) -> Result<Self, KMeansError<M::Error>> {
        if observations.is_empty() {
            return Err(KMeansError::InvalidInput);
        }
        Ok(Self { observations, metric, config })
    }

    /// The observations this instance operates on.
    pub fn observations(&self) -> &'a [T] { self.observations }

    /// The metric this instance operates with.
    pub fn metric(&self) -> &M { &self.metric }

    pub(crate) fn check_cluster_count(&self, k: usize) -> Result<(), KMeansError<M::Error>> {
        if k == 0 || k > self.observations.len() {
            return Err(KMeansError::InconsistentCluster { requested: k, available: self.observations.len() });
        }
        Ok(())
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>) -> Result<(), KMeansError<M::Error>> {
        let nearest = self.observations.iter()
            .map(|o| nearest_cluster(&self.metric, o, &state.clusters))
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_cluster_assignments(state, nearest);
        Ok(())
    }

    /// Rebuild all member lists from the given (cluster index, distance) pairs, one per observation.
    pub(crate) fn apply_cluster_assignments(&self, state: &mut KMeansState<T>, nearest: Vec<(usize, f64)>) {
        state.clusters.iter_mut().for_each(|c| c.members.clear());
        for (i, (observation, (best_idx, best_dist))) in self.observations.iter().zip(nearest).enumerate() {
            state.assignments[i] = best_idx;
            state.centroid_distances[i] = best_dist;
            state.clusters[best_idx].members.push(observation.clone());
        }
    }

    pub(crate) fn update_centroid_distances(&self, state: &mut KMeansState<T>) -> Result<(), KMeansError<M::Error>> {
        for ((observation, &assignment), centroid_dist) in self.observations.iter()
                .zip(state.assignments.iter())
                .zip(state.centroid_distances.iter_mut()) {
            *centroid_dist = checked_distance(&self.metric, observation, &state.clusters[assignment].centroid)?;
        }
        Ok(())
    }


    /// Normal K-Means algorithm implementation (Lloyd), seeded with [`KMeans::seed`].
    ///
    /// Every call draws a new seeding from the configured random number generator, and iterates until no
    /// centroid changes anymore (or the configured iteration limit is reached).
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for (`1..=observations`)
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_generic::*;
    ///
    /// let samples = vec![1.0f64, 2.0, 3.0, 10.0, 11.0, 12.0];
    /// let metric = FnMetric::new(
    ///     |a: &f64, b: &f64| (a - b).abs(),
    ///     |m: &[f64]| m.iter().sum::<f64>() / m.len() as f64,
    ///     |a: &f64, b: &f64| a == b,
    /// );
    ///
    /// let kmean = KMeans::new(&samples, metric).unwrap();
    /// let result = kmean.calculate(2).unwrap();
    ///
    /// let mut centroids: Vec<f64> = result.centroids().cloned().collect();
    /// centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(centroids, vec![2.0, 11.0]);
    /// ```
    pub fn calculate(&self, k: usize) -> Result<KMeansState<T>, KMeansError<M::Error>> {
        let clusters = self.seed(k)?;
        self.refine(clusters)
    }

    /// Normal K-Means algorithm implementation (Lloyd), starting from the given centroids instead
    /// of a random seeding.
    ///
    /// ## Arguments
    /// - **centroids**: Initial centroids (`1..=observations` of them)
    pub fn calculate_from(&self, centroids: Vec<T>) -> Result<KMeansState<T>, KMeansError<M::Error>> {
        let clusters = crate::inits::precomputed::calculate(self, centroids)?;
        self.refine(clusters)
    }

    /// Run assignment/update iterations on the given clusters, until no centroid changes anymore.
    /// Member lists of the given clusters are discarded.
    pub fn refine(&self, clusters: Vec<Cluster<T>>) -> Result<KMeansState<T>, KMeansError<M::Error>> {
        self.check_cluster_count(clusters.len())?;
        crate::variants::Lloyd::calculate(self, clusters, Self::update_cluster_assignments)
    }

    /// K-Means++ initialization method (farthest-point variant)
    ///
    /// ## Description
    /// This initialization method starts by selecting one observation uniformly at random as first centroid.
    /// Proceeding from there, the method iteratively selects the observation that is farthest away from its
    /// nearest, already chosen centroid. Ties are resolved in favor of the observation with the lower index.
    ///
    /// Unlike the textbook variant, the next centroid is not drawn randomly with a probability proportional
    /// to `D(x)²`, but greedily. Only the first centroid is random.
    ///
    /// Observations are distinguished by their position, so duplicate values at different positions may
    /// all become centroids.
    ///
    /// ## Returns
    /// **k** clusters, without members.
    pub fn seed(&self, k: usize) -> Result<Vec<Cluster<T>>, KMeansError<M::Error>> {
        self.check_cluster_count(k)?;
        crate::inits::kmeanplusplus::calculate(self, k)
    }
}
impl<'a, T, M> KMeans<'a, T, M>
        where T: Clone + Send + Sync, M: Metric<T> + Sync, M::Error: Send {
    pub(crate) fn update_cluster_assignments_par(&self, state: &mut KMeansState<T>) -> Result<(), KMeansError<M::Error>> {
        let (metric, clusters) = (&self.metric, &state.clusters);
        let nearest = self.observations.par_iter()
            .map(|o| nearest_cluster(metric, o, clusters))
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_cluster_assignments(state, nearest);
        Ok(())
    }

    /// Same as [`KMeans::calculate`], but searching each observation's nearest centroid in parallel.
    /// Results (including the order of members within a cluster) are identical to [`KMeans::calculate`].
    pub fn calculate_par(&self, k: usize) -> Result<KMeansState<T>, KMeansError<M::Error>> {
        let clusters = self.seed(k)?;
        crate::variants::Lloyd::calculate(self, clusters, Self::update_cluster_assignments_par)
    }
}
