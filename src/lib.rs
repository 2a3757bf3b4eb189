//! Turns a textual directory layout, either a flat list of paths or a
//! box-drawing tree, into real directories and empty files.
//!
//! ```text
//! raw text -> detector -> parser (tree, via normalizer | flat)
//!          -> classifier + depth sort (plan) -> materializer
//! ```
pub mod api;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod errors;
pub mod materializer;
pub mod normalizer;
pub mod parser;
pub mod plan;
pub mod source;
pub mod transactions;
pub mod utils;

pub use api::{create_from_text, run, MkstructError};
pub use classifier::EntryKind;
pub use config::Policy;
pub use plan::{ClassifiedPath, Plan};
pub use source::InputSource;
