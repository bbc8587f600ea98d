//! File-based processing command.

use super::common::{apply_overrides, apply_state_file, display_value, parse_key_val};
use crate::wav::{read_wav, write_wav};
use clap::Args;
use crunch_core::linear_to_db;
use crunch_effects::DistortionProcessor;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (32-bit float)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// State file to apply before the overrides (TOML or JSON)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Parameter overrides as actual values (e.g., "drive=15")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)?;
    let frames = audio.frames();
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        audio.channels.len(),
        audio.sample_rate,
        frames as f32 / audio.sample_rate as f32
    );

    let mut processor = DistortionProcessor::new()?;
    if let Some(path) = &args.state {
        apply_state_file(&processor, path)?;
    }
    apply_overrides(&processor, &args.param)?;

    for param in processor.params() {
        println!("  {:10} {}", param.name(), display_value(param));
    }

    let input_rms = rms(&audio.channels);
    let input_peak = peak(&audio.channels);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let mut block: Vec<&mut [f32]> = audio
            .channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        processor.process_block(&mut block);
        pb.set_position(end as u64);
        start = end;
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&audio.channels)),
        linear_to_db(peak(&audio.channels))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio)?;
    tracing::info!(
        output = %args.output.display(),
        frames,
        "processing complete"
    );
    println!("Done!");

    Ok(())
}

fn rms(channels: &[Vec<f32>]) -> f32 {
    let count: usize = channels.iter().map(Vec::len).sum();
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = channels.iter().flatten().map(|s| s * s).sum();
    (sum / count as f32).sqrt()
}

fn peak(channels: &[Vec<f32>]) -> f32 {
    channels.iter().flatten().map(|s| s.abs()).fold(0.0, f32::max)
}
