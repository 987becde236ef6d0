//! Stride Core - Foundational types for the Stride engine
//!
//! This crate provides the core types that all other Stride crates depend on:
//! - `Vec3`, `Quat`, `Mat4` - Spatial math (row-vector convention)
//! - `Color` - Debug-draw colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, StrideError};
pub use types::{Color, Mat4, Quat, Vec3};
