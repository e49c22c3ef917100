//! Candidate storage.
//!
//! - [`types`]: the candidate record and its create/patch inputs
//! - [`memory`]: the in-memory collection and its operations
//! - [`seed`]: the sample candidates loaded at start-up

pub mod memory;
pub mod seed;
pub mod types;

pub use memory::CandidateStore;
pub use seed::sample_candidates;
pub use types::{Candidate, CandidateId, CandidatePatch, NewCandidate};
