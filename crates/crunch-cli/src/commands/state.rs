//! State snapshot command.

use super::common::{apply_overrides, apply_state_file, parse_key_val};
use clap::Args;
use crunch_config::{PluginState, StateFormat};
use crunch_effects::DistortionProcessor;
use std::path::PathBuf;

#[derive(Args)]
pub struct StateArgs {
    /// Start from an existing state file instead of the defaults
    #[arg(long)]
    from: Option<PathBuf>,

    /// Parameter overrides as actual values (e.g., "threshold=0.5")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    set: Vec<(String, String)>,

    /// Output format (json or toml); defaults to the output file's
    /// extension, or toml when printing
    #[arg(long)]
    format: Option<StateFormat>,

    /// Write the state to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: StateArgs) -> anyhow::Result<()> {
    let processor = DistortionProcessor::new()?;
    if let Some(path) = &args.from {
        apply_state_file(&processor, path)?;
    }
    apply_overrides(&processor, &args.set)?;

    let state = PluginState::capture(processor.params());

    match &args.output {
        Some(path) => {
            let format = args.format.unwrap_or_else(|| StateFormat::from_path(path));
            state.save_as(path, format)?;
            println!("Saved {} parameter(s) to {}", state.len(), path.display());
        }
        None => {
            let text = state.render(args.format.unwrap_or_default())?;
            println!("{}", text.trim_end());
        }
    }

    Ok(())
}
