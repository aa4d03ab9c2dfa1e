

/// Way x set x block storage and block fills.
pub mod store;
