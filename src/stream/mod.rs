//! Lazy, single-consumption pull streams
//!
//! A [`Stream`] owns exactly one pull [`Source`]. Intermediate operations
//! hand that source to a new stream wrapping it; terminal operations drain
//! it. Nothing is pulled until a terminal call or iteration asks for it.

pub mod core;
pub mod streamable;
pub mod constructors;
pub mod advanced;
pub mod utility;

// Re-export core types
pub use self::core::{BoxSource, Source, Stream, StreamState};

pub use self::streamable::{IterSource, Streamable};

// Re-export constructors
pub use self::constructors::{
    concat, count, count_from, element, empty, of, of_elements, range, range_from, range_step,
    zip, zip_all, Progression,
};

pub use self::advanced::{TeeBranch, Truthy};
