//! Shared CLI helpers used across multiple commands.

use crunch_config::PluginState;
use crunch_core::{ParamDescriptor, discrete_index};
use crunch_effects::{DistortionProcessor, WaveShape, ids};
use std::path::Path;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Restore a state file onto the processor's parameters.
pub fn apply_state_file(processor: &DistortionProcessor, path: &Path) -> anyhow::Result<()> {
    let state = PluginState::load(path)?;
    let report = state.restore(processor.params())?;
    if !report.unknown.is_empty() {
        eprintln!(
            "Warning: ignored unknown parameter(s) in {}: {}",
            path.display(),
            report.unknown.join(", ")
        );
    }
    tracing::info!(
        path = %path.display(),
        applied = report.applied.len(),
        "state applied"
    );
    Ok(())
}

/// Apply `id=text` overrides, parsing each text as an actual value.
///
/// Parsed values outside the parameter's range are pinned to its ends.
pub fn apply_overrides(
    processor: &DistortionProcessor,
    overrides: &[(String, String)],
) -> anyhow::Result<()> {
    for (id, text) in overrides {
        let Some(param) = processor.params().by_id(id) else {
            let known: Vec<&str> = processor.params().iter().map(|p| p.id().as_str()).collect();
            anyhow::bail!(
                "unknown parameter '{}' (available: {})",
                id,
                known.join(", ")
            );
        };

        let normalized = param.parse_text(text);
        let clamped = normalized.clamp(0.0, 1.0);
        if clamped != normalized {
            tracing::warn!(id = %id, text = %text, "value outside range, clamped");
        }
        param.set_value(clamped);
        tracing::debug!(
            id = %id,
            normalized = clamped,
            actual = param.actual_value(),
            "parameter set"
        );
    }
    Ok(())
}

/// Render a parameter's current actual value with its label.
///
/// The mode selector shows the shape the engine is running, using the same
/// truncation as its bridge, followed by the shape's name.
pub fn display_value(param: &ParamDescriptor) -> String {
    if param.id().as_str() == ids::MODE {
        let index = discrete_index(param.actual_value());
        return format!("{} ({})", index, WaveShape::from_index(index).name());
    }
    let text = param.format_value(param.value());
    if param.label().is_empty() {
        text
    } else {
        format!("{} {}", text, param.label())
    }
}
