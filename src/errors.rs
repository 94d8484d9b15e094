//! Error Types
//!
//! This module defines the error type used throughout the crate.
//!
//! # Overview
//!
//! [`ElasticaError`] covers the failure modes of the pipeline:
//! - Malformed interpolation input (fatal contract violations)
//! - Degenerate cross-section outlines (recovered locally by the extruder)
//! - Index-space overflow of the 16-bit vertex/joint indices
//! - Misuse of a finalized animation encoder
//! - Settings parsing and scene file emission
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, ElasticaError>`.
//!
//! ```rust
//! use elastica::errors::{ElasticaError, Result};
//! use elastica::EndDisplacements;
//!
//! fn parse(v: &[f32]) -> Result<EndDisplacements> {
//!     EndDisplacements::from_slice(v)
//! }
//!
//! assert!(matches!(parse(&[0.0; 3]), Err(ElasticaError::ContractViolation { .. })));
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum ElasticaError {
    // ========================================================================
    // Interpolation
    // ========================================================================
    /// An end-displacement vector had a length the beam interpolation does not accept.
    #[error("Contract violation: expected {expected}, found {found} components")]
    ContractViolation {
        /// Description of the accepted shapes.
        expected: &'static str,
        /// The length that was supplied.
        found: usize,
    },

    // ========================================================================
    // Geometry
    // ========================================================================
    /// A cross-section outline is not a simple polygon.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A vertex or joint count does not fit the 16-bit index space.
    #[error("Index overflow: {count} {what} exceed the 16-bit index range")]
    IndexOverflow {
        /// What was being counted (`"vertices"` or `"joints"`).
        what: &'static str,
        /// The count that overflowed.
        count: usize,
    },

    // ========================================================================
    // Animation
    // ========================================================================
    /// The encoder was mutated after `finalize()`.
    #[error("Animation encoder has already been finalized")]
    AnimationFinalized,

    // ========================================================================
    // I/O & Serialization
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// glTF container framing or document validation failed.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
}

/// Alias for `Result<T, ElasticaError>`.
pub type Result<T> = std::result::Result<T, ElasticaError>;
