//! CLI command implementations

pub mod clip;
pub mod inspect;
pub mod pose;
pub mod simulate;
