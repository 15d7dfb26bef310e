//! Field validators for submitted forms

pub mod rules;

pub use rules::*;
