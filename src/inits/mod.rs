pub(crate) mod kmeanplusplus;
pub(crate) mod precomputed;
