//! Geometric kernels: the elastic curve solver and polygon triangulation.

pub mod earcut;
pub mod elastic;

pub use earcut::triangulate;
pub use elastic::{CurveSamples, ElasticCurve, EndDisplacements, hermite, hermite_slope};
