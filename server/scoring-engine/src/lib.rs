//! Legal text scoring engine — deterministic, rule-based.
//!
//! Classifies legal text into a document type, scores its risk from a fixed
//! rule table with explanatory evidence, and aggregates eight rated
//! dimensions into a weighted Complexity Index.
//!
//! Every entrypoint is pure: no I/O, no logging, no shared mutable state.

pub mod classify;
pub mod complexity;
pub mod config;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod report;
pub mod request;
pub mod risk;
pub mod types;

pub use complexity::{ComplexityLevel, ComplexityResult, Dimension, DimensionScores};
pub use config::{EngineSettings, ScoringConfig};
pub use engine::Engine;
pub use error::ScoringError;
pub use patterns::{DocumentTypeProfile, PatternLibrary, UniversalRiskRule, UNKNOWN_TYPE_ID};
pub use report::ComplexityReport;
pub use request::Request;
pub use types::{
  Analysis, ClassificationResult, Output, RiskAssessment, RiskEvidence, RiskLevel, Severity,
};
