//! Content catalog
//!
//! Read-mostly in-memory index of video records with category tags,
//! popularity/quality scores, an emotional-fit vector, and view counters.
//! Persistence is out of scope; the index is built at load and append-only
//! at runtime.

pub mod index;
pub mod models;
pub mod sample;

pub use index::ContentIndex;
pub use models::ContentRecord;
pub use sample::seed_demo_catalog;
