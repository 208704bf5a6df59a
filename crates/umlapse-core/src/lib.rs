//! Umlapse Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Umlapse
//! pipeline. It includes:
//!
//! - **Identifiers**: reference-marker handling for element ids ([`identifier`] module)
//! - **Tree**: the parsed revision tree consumed by the diff engine ([`tree::TreeNode`])
//! - **Drawables**: typed diagram elements with change tracking ([`drawable::Drawable`])
//! - **Animation**: the incremental graph animation state machine ([`animation::Animation`])
//! - **Style**: colours and fonts used when serializing frames ([`style::FrameStyle`])

pub mod animation;
pub mod drawable;
pub mod identifier;
pub mod style;
pub mod tree;
