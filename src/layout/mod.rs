pub(crate) mod solver;
pub(crate) mod units;
