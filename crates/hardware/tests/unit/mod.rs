//! # Unit Components
//!
//! Tests for each simulator component, organized like the source tree.


/// Field decoding, storage and the PLRU policy.
pub mod cache;


/// Load classification and trace ingestion.
pub mod sim;
