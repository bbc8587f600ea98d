//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use super::common::{apply_overrides, apply_state_file, display_value, parse_key_val};
use clap::Args;
use crunch_core::format_fixed;
use crunch_effects::DistortionProcessor;
use std::path::PathBuf;

/// Width the name column truncates to.
const NAME_WIDTH: usize = 10;

#[derive(Args)]
pub struct ParamsArgs {
    /// State file to apply before listing (TOML or JSON)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Parameter overrides as actual values (e.g., "drive=12")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let processor = DistortionProcessor::new()?;
    if let Some(path) = &args.state {
        apply_state_file(&processor, path)?;
    }
    apply_overrides(&processor, &args.param)?;

    println!(
        "  {:>3}  {:10}  {:10}  {:16}  {:10}  {}",
        "#", "Id", "Name", "Range", "Default", "Value"
    );
    println!(
        "  {:>3}  {:10}  {:10}  {:16}  {:10}  {}",
        "-", "--", "----", "-----", "-------", "-----"
    );

    for (index, param) in processor.params().iter().enumerate() {
        let precision = param.precision();
        let range = format!(
            "{} .. {}",
            format_fixed(param.actual_minimum(), precision),
            format_fixed(param.actual_maximum(), precision)
        );
        println!(
            "  {:>3}  {:10}  {:10}  {:16}  {:10}  {}",
            index,
            param.id().as_str(),
            param.display_name(NAME_WIDTH),
            range,
            param.format_value(param.default_value()),
            display_value(param)
        );
    }

    Ok(())
}
