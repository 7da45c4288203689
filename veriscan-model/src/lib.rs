//! Core data model definitions shared across Veriscan crates.
//!
//! Everything here is plain serde-derived data mirroring the backend's wire
//! format; no I/O, no policy. The client crate owns all behavior.

pub mod envelope;
pub mod scan;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use envelope::ErrorEnvelope;
pub use scan::{AnalyzeTextRequest, ScanReport, SentenceVerdict};
pub use user::{Credentials, Profile, RegisterRequest, TokenResponse, UserRole};
