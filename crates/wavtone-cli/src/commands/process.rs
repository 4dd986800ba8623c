//! Process command implementation
//!
//! Opens the input and output files, runs the transform pipeline and reports
//! the outcome either as colored console output or as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::process::ExitCode;
use wavtone::{Pipeline, PipelineReport, PipelineStage, TransformConfig, WaveHeader};

use super::json_output::{error_codes, JsonError, ProcessOutput};

/// Options for one transform run.
#[derive(Debug, Clone)]
pub struct ProcessRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub config: TransformConfig,
    /// Print every decoded header field
    pub show_header: bool,
    /// Print machine-readable JSON instead of colored text
    pub json: bool,
}

/// Run the process command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(request: &ProcessRequest) -> Result<ExitCode> {
    if request.json {
        run_json(request)
    } else {
        run_human(request)
    }
}

/// Run with human-readable (colored) output
fn run_human(request: &ProcessRequest) -> Result<ExitCode> {
    println!("{} {}", "Reading".cyan().bold(), request.input.display());

    let reader = File::open(request.input)
        .with_context(|| format!("Failed to open input file: {}", request.input.display()))?;
    let writer = File::create(request.output)
        .with_context(|| format!("Failed to create output file: {}", request.output.display()))?;

    let mut pipeline = Pipeline::new(request.config);
    match pipeline.run(BufReader::new(reader), BufWriter::new(writer)) {
        Ok(report) => {
            if request.show_header {
                print_header(&report.header);
            }
            print_summary(&report, request.output);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let stage = pipeline.failed_at().unwrap_or(PipelineStage::Init);
            eprintln!(
                "  {} {} is incomplete and should be discarded",
                "!".yellow(),
                request.output.display()
            );
            let code = err.code();
            Err(anyhow::Error::new(err)
                .context(format!("Transform failed during {stage} stage [{code}]")))
        }
    }
}

/// Run with machine-readable JSON output
fn run_json(request: &ProcessRequest) -> Result<ExitCode> {
    let input_name = request.input.display().to_string();
    let output_name = request.output.display().to_string();
    let failure = |error: JsonError| -> Result<ExitCode> {
        let output = ProcessOutput::failure(&input_name, &output_name, request.config, error);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(ExitCode::from(1))
    };

    let reader = match File::open(request.input) {
        Ok(file) => file,
        Err(e) => {
            return failure(JsonError::new(
                error_codes::FILE_OPEN,
                format!("Failed to open input file {}: {}", input_name, e),
            ))
        }
    };
    let writer = match File::create(request.output) {
        Ok(file) => file,
        Err(e) => {
            return failure(JsonError::new(
                error_codes::FILE_CREATE,
                format!("Failed to create output file {}: {}", output_name, e),
            ))
        }
    };

    let mut pipeline = Pipeline::new(request.config);
    match pipeline.run(BufReader::new(reader), BufWriter::new(writer)) {
        Ok(report) => {
            let output = ProcessOutput::success(&input_name, &output_name, *pipeline.config(), report);
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => failure(JsonError::from_wav(&err, pipeline.failed_at())),
    }
}

/// Print every header field, one per line.
fn print_header(header: &WaveHeader) {
    let tag = |bytes: &[u8; 4]| String::from_utf8_lossy(bytes).into_owned();

    println!("\n{}", "WAVE header:".cyan().bold());
    println!("  {:<20} {:?}", "RIFF tag:".dimmed(), tag(&header.riff_tag));
    println!("  {:<20} {}", "File size:".dimmed(), header.file_size);
    println!("  {:<20} {:?}", "WAVE tag:".dimmed(), tag(&header.wave_tag));
    println!("  {:<20} {:?}", "Format tag:".dimmed(), tag(&header.format_tag));
    println!("  {:<20} {}", "Format chunk size:".dimmed(), header.format_chunk_size);
    println!(
        "  {:<20} {} ({})",
        "Format type:".dimmed(),
        header.format_type,
        header.format_name()
    );
    println!("  {:<20} {}", "Channels:".dimmed(), header.channel_count);
    println!("  {:<20} {} Hz", "Sample rate:".dimmed(), header.sample_rate);
    println!("  {:<20} {}", "Byte rate:".dimmed(), header.byte_rate);
    println!("  {:<20} {}", "Block align:".dimmed(), header.block_align);
    println!("  {:<20} {}", "Bits per sample:".dimmed(), header.bits_per_sample);
    println!("  {:<20} {:?}", "Data tag:".dimmed(), tag(&header.data_tag));
    println!("  {:<20} {}", "Data size:".dimmed(), header.data_size);
}

fn print_summary(report: &PipelineReport, output: &Path) {
    println!("\n{}", "Transform:".cyan().bold());
    println!(
        "  {} {} of {} frames ({:.3}s)",
        "Frames:".dimmed(),
        report.frames_written,
        report.frame_count,
        report.duration_seconds()
    );
    println!(
        "  {} {} bytes x {} channels",
        "Layout:".dimmed(),
        report.bytes_per_channel_sample,
        report.header.channel_count
    );
    println!(
        "  {} {}..={}",
        "Range:".dimmed(),
        report.amplitude_range.lower,
        report.amplitude_range.upper
    );
    println!("  {} {:+}", "Tone offset:".dimmed(), report.tone_offset);
    if report.clamped_samples > 0 {
        println!(
            "  {} {} samples clamped",
            "!".yellow(),
            report.clamped_samples
        );
    }
    let short_hash = report.pcm_hash.get(..16).unwrap_or(&report.pcm_hash);
    println!("  {} {}", "PCM hash:".dimmed(), short_hash);
    println!(
        "\n{} {} ({} bytes)",
        "Wrote".green().bold(),
        output.display(),
        report.bytes_written
    );
}
