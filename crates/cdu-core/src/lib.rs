//! CDU Core Types and Definitions
//!
//! This crate provides the foundational types for the CDU control-diagram
//! format. It includes:
//!
//! - **Block types**: The block-type vocabulary and continuation-line rules
//!   ([`block_type`] module)
//! - **Numbers**: The numeric literal grammar shared by every numeric field
//!   ([`number`] module)
//! - **Semantic**: The parsed diagram model ([`semantic`] module)
//! - **Graph**: The node/edge JSON schema consumed by graph editors
//!   ([`graph`] module)
//! - **Descriptor**: The reduced block list accepted by the text generator
//!   ([`descriptor`] module)

pub mod block_type;
pub mod descriptor;
pub mod graph;
pub mod number;
pub mod semantic;
