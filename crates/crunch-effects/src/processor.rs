//! Plugin-level distortion processor.
//!
//! [`DistortionProcessor`] owns the parameter registry and the kernel. Each
//! parameter carries a bridge that writes its actual value into the shared
//! [`DistortionControls`]; the kernel picks the new values up at the start
//! of the next block.
//!
//! | Index | Id | Range | Precision | Default |
//! |-------|----|-------|-----------|---------|
//! | 0 | `mode` | 0 to 8 | 0 | 0 (soft clip) |
//! | 1 | `drive` | 1 to 25 | 2 | 1 |
//! | 2 | `threshold` | 0.01 to 1 | 2 | 1 |
//! | 3 | `mix` | 0 to 1 | 2 | 1 |

use std::sync::Arc;

use crunch_core::{ParamDescriptor, ParamError, ParamRegistry, discrete_index};

use crate::controls::DistortionControls;
use crate::distortion::Distortion;

/// Stable parameter identifiers.
pub mod ids {
    /// Waveshaper selection.
    pub const MODE: &str = "mode";
    /// Input gain factor.
    pub const DRIVE: &str = "drive";
    /// Clipping ceiling.
    pub const THRESHOLD: &str = "threshold";
    /// Wet/dry ratio.
    pub const MIX: &str = "mix";
}

/// Distortion plugin: parameters, controls and kernel.
///
/// # Example
///
/// ```rust
/// use crunch_effects::DistortionProcessor;
///
/// let mut processor = DistortionProcessor::new()?;
/// processor.params().by_id("drive").unwrap().set_value(0.5);
/// assert_eq!(processor.controls().drive(), 13.0);
///
/// let mut left = [0.1f32; 64];
/// let mut right = [-0.1f32; 64];
/// processor.process_block(&mut [&mut left, &mut right]);
/// # Ok::<(), crunch_core::ParamError>(())
/// ```
#[derive(Debug)]
pub struct DistortionProcessor {
    params: ParamRegistry,
    controls: Arc<DistortionControls>,
    kernel: Distortion,
}

impl DistortionProcessor {
    /// Builds the four parameters, wires their bridges into fresh controls,
    /// and creates the kernel.
    pub fn new() -> Result<Self, ParamError> {
        let controls = Arc::new(DistortionControls::new());
        let params = build_params(&controls)?;
        let kernel = Distortion::new(Arc::clone(&controls));

        tracing::debug!(params = params.len(), "distortion processor ready");

        Ok(Self {
            params,
            controls,
            kernel,
        })
    }

    /// Host-visible parameters, in host index order.
    pub fn params(&self) -> &ParamRegistry {
        &self.params
    }

    /// Engine controls the parameter bridges write into.
    pub fn controls(&self) -> &Arc<DistortionControls> {
        &self.controls
    }

    /// The kernel, for inspection.
    pub fn kernel(&self) -> &Distortion {
        &self.kernel
    }

    /// Processes non-interleaved channels in place.
    ///
    /// Controls are read once per call, so a block sees one consistent set of
    /// settings.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        self.kernel.refresh_controls();
        for channel in channels.iter_mut() {
            for sample in channel.iter_mut() {
                *sample = self.kernel.shape_sample(*sample);
            }
        }
    }
}

fn build_params(controls: &Arc<DistortionControls>) -> Result<ParamRegistry, ParamError> {
    let mut params = ParamRegistry::with_capacity(4);

    let sink = Arc::clone(controls);
    params.add(
        ParamDescriptor::ranged(ids::MODE, 0.0, 0.0, 8.0, "Mode")
            .with_bridge(move |actual: f32| sink.set_mode(discrete_index(actual)))
            .build()?,
    )?;

    let sink = Arc::clone(controls);
    params.add(
        ParamDescriptor::ranged(ids::DRIVE, 1.0, 1.0, 25.0, "Drive")
            .with_precision(2)
            .with_bridge(move |actual: f32| sink.set_drive(actual))
            .build()?,
    )?;

    let sink = Arc::clone(controls);
    params.add(
        ParamDescriptor::ranged(ids::THRESHOLD, 1.0, 0.01, 1.0, "Threshold")
            .with_precision(2)
            .with_bridge(move |actual: f32| sink.set_threshold(actual))
            .build()?,
    )?;

    let sink = Arc::clone(controls);
    params.add(
        ParamDescriptor::normalized(ids::MIX, 1.0, "Mix")
            .with_precision(2)
            .with_bridge(move |actual: f32| sink.set_mix(actual))
            .build()?,
    )?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortion::WaveShape;

    #[test]
    fn parameter_layout() {
        let processor = DistortionProcessor::new().unwrap();
        let ids: Vec<&str> = processor.params().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, [ids::MODE, ids::DRIVE, ids::THRESHOLD, ids::MIX]);

        let drive = processor.params().by_id(ids::DRIVE).unwrap();
        assert_eq!(drive.value(), 0.0);
        assert_eq!(drive.actual_value(), 1.0);
        assert_eq!(drive.precision(), 2);

        let threshold = processor.params().by_id(ids::THRESHOLD).unwrap();
        assert_eq!(threshold.value(), 1.0);
        assert_eq!(threshold.actual_minimum(), 0.01);
    }

    #[test]
    fn construction_pushes_defaults_into_controls() {
        let processor = DistortionProcessor::new().unwrap();
        let controls = processor.controls();
        assert_eq!(controls.mode(), 0);
        assert_eq!(controls.drive(), 1.0);
        assert_eq!(controls.threshold(), 1.0);
        assert_eq!(controls.mix(), 1.0);
    }

    #[test]
    fn mode_bridge_truncates() {
        let processor = DistortionProcessor::new().unwrap();
        let mode = processor.params().by_id(ids::MODE).unwrap();

        mode.set_value(0.5);
        assert_eq!(mode.actual_value(), 4.0);
        assert_eq!(processor.controls().mode(), 4);

        // 0.6 * 8 = 4.8, truncated toward zero
        mode.set_value(0.6);
        assert_eq!(processor.controls().mode(), 4);

        mode.set_value(1.0);
        assert_eq!(processor.controls().mode(), 8);
    }

    #[test]
    fn block_uses_latest_parameters() {
        let mut processor = DistortionProcessor::new().unwrap();
        let params = processor.params();
        params
            .by_id(ids::MODE)
            .unwrap()
            .set_value(params.by_id(ids::MODE).unwrap().to_normalized(1.0));
        params.by_id(ids::DRIVE).unwrap().set_value(1.0);
        params
            .by_id(ids::THRESHOLD)
            .unwrap()
            .set_value(params.by_id(ids::THRESHOLD).unwrap().to_normalized(0.5));

        let mut left = [0.5f32, -0.5];
        let mut right = [0.01f32, 0.0];
        processor.process_block(&mut [&mut left, &mut right]);

        assert_eq!(processor.kernel().waveshape(), WaveShape::HardClip);
        assert!((left[0] - 0.5).abs() < 1e-6);
        assert!((left[1] + 0.5).abs() < 1e-6);
        assert!((right[0] - 0.25).abs() < 1e-5);
        assert_eq!(right[1], 0.0);
    }
}
