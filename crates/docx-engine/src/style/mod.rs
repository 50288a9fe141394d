//! Unit conversion and style cascade

pub mod cascade;
pub mod units;

pub use cascade::{
    ColorRole, FontRole, PageMargins, ResolvedFont, ResolvedSpacing, StyleCascade,
};
