//! Command implementations for the wavtone CLI

pub mod json_output;
pub mod process;
