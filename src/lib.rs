//! drawgen - novel draw generation from a historical archive
//!
//! drawgen ingests past draws of `k` distinct numbers from `[1, N]` and
//! proposes new draws that match the archive's sum distribution while obeying
//! explicit structural rules. It reproduces the population's summary
//! statistics; it does not predict outcomes.
//!
//! # Architecture
//!
//! - **Archive**: validated, immutable historical draws (`archive`)
//! - **Statistics**: sum mean / sample std dev plus frequency reports (`stats`)
//! - **Sampler**: seeded rejection sampling under a hard attempt ceiling (`sampler`)
//! - **Enrichment**: sum, parity split, gaps, triangular count per draw (`enrich`)
//! - **Surfaces**: CSV ingestion, TOML/CLI config, text/CSV/JSON output

pub mod archive;
pub mod config;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod sampler;
pub mod stats;

// Re-export commonly used types
pub use archive::{Draw, HistoricalArchive, RawRecord};
pub use config::{Config, SamplingConfig};
pub use enrich::GeneratedDraw;
pub use error::{DrawError, DrawResult, ValidationError};
pub use sampler::{DrawSampler, GenerationOutcome};
pub use stats::SumStatistics;

/// Result type used by the I/O-facing layers of drawgen
pub type Result<T> = anyhow::Result<T>;
