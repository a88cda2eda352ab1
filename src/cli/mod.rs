//! CLI command implementations

pub mod check;
pub mod gui;
pub mod stub;
pub mod submit;
