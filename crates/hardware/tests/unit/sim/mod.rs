/// Trace ingestion.
pub mod loader;
