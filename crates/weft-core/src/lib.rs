//! Weft Core Types and Definitions
//!
//! This crate provides the foundational types for the Weft network
//! visualization engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Scales**: Data-to-visual mappings ([`scale`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod scale;
