#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::convert::Infallible;
	use std::fmt::Debug;
	use rand::prelude::*;
	use crate::{api::nearest_cluster, FnMetric, KMeansConfig, KMeansState, Metric};

	/// `|a - b|` on plain numbers, arithmetic mean, exact equality.
	pub fn abs_metric() -> impl Metric<f64, Error = Infallible> + Sync {
		FnMetric::new(
			|a: &f64, b: &f64| (a - b).abs(),
			|m: &[f64]| m.iter().sum::<f64>() / m.len() as f64,
			|a: &f64, b: &f64| a == b,
		)
	}

	pub fn seeded_config<'a, T>(seed: u64) -> KMeansConfig<'a, T> {
		KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
	}

	/// Every observation is member of exactly the cluster it is assigned to, in observation order.
	pub fn assert_partition<T: PartialEq + Debug>(observations: &[T], state: &KMeansState<T>) {
		assert_eq!(state.assignments.len(), observations.len());
		assert_eq!(state.clusters.len(), state.k);
		for (cid, cluster) in state.clusters.iter().enumerate() {
			let should_members: Vec<&T> = observations.iter()
				.zip(state.assignments.iter())
				.filter(|(_, assignment)| **assignment == cid)
				.map(|(o, _)| o)
				.collect();
			let actual_members: Vec<&T> = cluster.members.iter().collect();
			assert_eq!(actual_members, should_members, "Members of cluster {} do not match the assignments", cid);
		}
		let member_cnt: usize = state.clusters.iter().map(|c| c.members.len()).sum();
		assert_eq!(member_cnt, observations.len());
	}

	/// Reassigning the final members with the same metric yields the identical partition.
	pub fn assert_consistent<T, M>(metric: &M, state: &KMeansState<T>) where M: Metric<T>, M::Error: Debug {
		for (cid, cluster) in state.clusters.iter().enumerate() {
			for member in cluster.members.iter() {
				let (nearest, _) = nearest_cluster(metric, member, &state.clusters).unwrap();
				assert_eq!(nearest, cid, "Member would move from cluster {} to cluster {}", cid, nearest);
			}
		}
	}
}
