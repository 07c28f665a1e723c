//! Flowtier Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Flowtier parser,
//! the layout engine and any renderer that consumes a finished layout:
//!
//! - **Identifiers**: Cheaply cloned, reference-counted node identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling for renderers ([`color::Color`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Semantic**: The parsed flow model: [`semantic::NodeKind`], [`semantic::Node`], [`semantic::Edge`]
//! - **Diagram**: The immutable laid-out artifact ([`diagram::Diagram`])

pub mod color;
pub mod diagram;
pub mod geometry;
pub mod identifier;
pub mod semantic;
