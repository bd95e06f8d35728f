//! Astrolabe Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Astrolabe
//! pipelines. It includes:
//!
//! - **Identifiers**: Typed ids for syntax-tree nodes and automaton states ([`identifier`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Backend-agnostic draw directives and scenes ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
