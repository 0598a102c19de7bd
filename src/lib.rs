//! TOPSIS ranking of aircraft configurations against weighted criteria.
//!
//! The [`engine`] module holds the pure ranking function; the other modules
//! supply its inputs (criteria catalog, weight checks, matrix sources) and
//! present its output.

pub mod config;
pub mod criteria;
pub mod engine;
pub mod output;
pub mod source;
pub mod weights;
