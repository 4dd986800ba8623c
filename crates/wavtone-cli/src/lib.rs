//! wavtone CLI library.
//!
//! File handling, configuration resolution, logging setup and console
//! reporting around the `wavtone` transform pipeline.

pub mod commands;
pub mod config;
pub mod logging;
