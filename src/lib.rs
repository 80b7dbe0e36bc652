//! List-processing parser functions for wiki markup.
//!
//! Lists are delimited text. The functions split them into values, transform
//! or reorder the values, and join them again. Anything that needs markup
//! expanded goes through an [`expander::Expander`], which [`host::Host`]
//! provides for standalone use.

pub mod config;
pub mod error;
pub mod escape;
pub mod expander;
pub mod functions;
pub mod host;
pub mod markup;
pub mod operation;
pub mod options;
pub mod params;
pub mod pattern;
pub mod registry;
pub mod sorter;
pub mod value;
