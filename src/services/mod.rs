//! Data sources
//!
//! - `Backend` - the seam every reference-data request goes through
//! - `reference` - typed loaders returning `FetchSnapshot`s

pub mod backend;
pub mod reference;

pub use backend::{Backend, FixtureBackend};
