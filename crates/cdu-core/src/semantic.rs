//! Semantic diagram model types.
//!
//! This module contains the representation of one CDU diagram after its
//! physical lines have been decoded and assembled.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ extract
//! Diagram sections (lines between the header and FIMCDU)
//!     ↓ decode + assemble
//! Semantic Model (these types) - blocks, parameters, default values
//!     ↓ project
//! Graph (nodes and edges)
//! ```
//!
//! # Organization
//!
//! - [`block`] - A single functional block and the decoded line records it is built from
//! - [`diagram`] - The diagram aggregate: [`Dcdu`], [`Param`], [`DefaultValue`], [`BlockContext`]

pub mod block;
pub mod diagram;

pub use block::*;
pub use diagram::*;
