use crate::{Cluster, KMeans, KMeansError, KMeansState, Metric};
use std::sync::atomic::Ordering;
use tracing::{debug, trace, warn};

pub(crate) struct Lloyd<T, M> {
    _p: std::marker::PhantomData<(T, M)>
}
impl<T: Clone, M: Metric<T>> Lloyd<T, M> {
    /// Recompute every centroid as the mean of its members.
    /// ## Returns
    /// Amount of centroids, whose new value is not equal to the previous one.
    fn update_centroids(data: &KMeans<'_, T, M>, state: &mut KMeansState<T>) -> Result<usize, KMeansError<M::Error>> {
        let mut changed = 0;
        for cluster in state.clusters.iter_mut() {
            // Empty clusters are handed to the metric as they are
            let centroid = data.metric.mean(&cluster.members).map_err(KMeansError::Metric)?;
            if !data.metric.equals(&cluster.centroid, &centroid).map_err(KMeansError::Metric)? {
                changed += 1;
            }
            cluster.centroid = centroid;
        }
        Ok(changed)
    }

    #[inline(always)]
    pub fn calculate<'a, F>(data: &KMeans<'a, T, M>, clusters: Vec<Cluster<T>>, assign: F) -> Result<KMeansState<T>, KMeansError<M::Error>>
            where F: Fn(&KMeans<'a, T, M>, &mut KMeansState<T>) -> Result<(), KMeansError<M::Error>> {
        let config = &data.config;
        let mut state = KMeansState::new(data.observations.len(), clusters);

        // Notify subscriber about the seeded clusters
        (config.init_done)(&state.clusters);
        debug!(k = state.k, observations = data.observations.len(), "k-means: starting iterations");

        loop {
            if config.cancel_flag.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
                debug!(iteration = state.iterations + 1, "k-means: cancelled");
                return Err(KMeansError::Cancelled { iteration: state.iterations + 1 });
            }

            assign(data, &mut state)?;
            let changed = Self::update_centroids(data, &mut state)?;
            state.iterations += 1;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state.clusters, state.iterations, changed);
            trace!(iteration = state.iterations, changed, "k-means: iteration done");

            if changed == 0 {
                state.converged = true;
                break;
            }
            if config.max_iter.map_or(false, |max_iter| state.iterations >= max_iter.get()) {
                warn!(iterations = state.iterations, "k-means: iteration limit reached before convergence");
                break;
            }
        }

        data.update_centroid_distances(&mut state)?;
        state.distsum = state.centroid_distances.iter().sum();
        debug!(iterations = state.iterations, converged = state.converged, distsum = state.distsum, "k-means: finished");
        Ok(state)
    }
}
