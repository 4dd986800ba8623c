//! CLI argument definitions for the wavtone command-line interface.
//!
//! The `#[derive(Parser)]` type lives here, keeping `main.rs` focused on
//! dispatch.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use wavtone_cli::config::ConfigOverrides;

/// wavtone - average adjacent PCM samples and mix in a constant tone offset
#[derive(Parser, Debug)]
#[command(name = "wavtone")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Canonical 44-byte-header PCM WAVE file to read
    pub input: PathBuf,

    /// Path of the WAVE file to write
    pub output: PathBuf,

    /// JSON transform configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tone amplitude in sample units (default: 8000)
    #[arg(long, allow_hyphen_values = true)]
    pub amplitude: Option<f64>,

    /// Tone frequency in Hz (default: 2400)
    #[arg(long, allow_hyphen_values = true)]
    pub frequency: Option<f64>,

    /// Legacy compatibility: header per frame and per-sample seeding
    #[arg(long)]
    pub legacy: bool,

    /// Write the header before every output frame
    #[arg(long)]
    pub per_frame_header: bool,

    /// Average each sample with itself instead of the previous sample
    #[arg(long)]
    pub every_sample_seed: bool,

    /// Reject inputs whose RIFF/WAVE/fmt/data tags do not match
    #[arg(long)]
    pub strict_tags: bool,

    /// Print every decoded header field
    #[arg(long)]
    pub show_header: bool,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            amplitude: self.amplitude,
            tone_frequency_hz: self.frequency,
            legacy: self.legacy,
            per_frame_header: self.per_frame_header,
            every_sample_seed: self.every_sample_seed,
            strict_tags: self.strict_tags,
        }
    }
}
