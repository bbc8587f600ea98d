//! Multi-mode distortion kernel.
//!
//! [`Distortion`] reads its settings from shared [`DistortionControls`] and
//! shapes the driven signal with one of nine waveshapers. Each shaper is
//! scaled so its ceiling sits at the threshold:
//!
//! ```text
//! driven = input * drive
//! shaped = threshold * curve(driven / threshold)
//! output = dry + (shaped - dry) * mix
//! ```

use std::sync::Arc;

use crunch_core::{
    Effect, arctan_clip, asymmetric_clip, cubic_clip, exp_clip, foldback, hard_clip, soft_clip,
    wet_dry_mix,
};

use crate::controls::DistortionControls;

/// Lowest threshold the kernel will divide by.
const MIN_THRESHOLD: f32 = 1e-3;

/// Waveshaping algorithm selection.
///
/// The discriminant is the mode index carried by the `mode` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveShape {
    /// Hyperbolic tangent soft clipping - smooth, tube-like
    #[default]
    SoftClip = 0,
    /// Hard clipping at ±threshold - aggressive, transistor-like
    HardClip = 1,
    /// Foldback distortion - rich harmonics, synth-style
    Foldback = 2,
    /// Asymmetric soft clipping - even harmonics, tube-like
    Asymmetric = 3,
    /// Half-wave rectifier - negative half removed
    HalfWave = 4,
    /// Full-wave rectifier - negative half flipped, octave-up character
    FullWave = 5,
    /// Cubic polynomial - gentle, few harmonics
    Cubic = 6,
    /// Arctangent - slow knee
    Arctan = 7,
    /// Exponential fuzz
    Exponential = 8,
}

impl WaveShape {
    /// Every shape in mode-index order.
    pub const ALL: [WaveShape; 9] = [
        WaveShape::SoftClip,
        WaveShape::HardClip,
        WaveShape::Foldback,
        WaveShape::Asymmetric,
        WaveShape::HalfWave,
        WaveShape::FullWave,
        WaveShape::Cubic,
        WaveShape::Arctan,
        WaveShape::Exponential,
    ];

    /// Maps a mode index to a shape, clamping out-of-range indices to the
    /// nearest valid mode.
    pub fn from_index(index: i32) -> Self {
        let clamped = index.clamp(0, Self::ALL.len() as i32 - 1);
        Self::ALL[clamped as usize]
    }

    /// Mode index of this shape.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            WaveShape::SoftClip => "Soft Clip",
            WaveShape::HardClip => "Hard Clip",
            WaveShape::Foldback => "Foldback",
            WaveShape::Asymmetric => "Asymmetric",
            WaveShape::HalfWave => "Half-Wave",
            WaveShape::FullWave => "Full-Wave",
            WaveShape::Cubic => "Cubic",
            WaveShape::Arctan => "Arctan",
            WaveShape::Exponential => "Fuzz",
        }
    }

    /// Applies the shape to an already driven sample.
    #[inline]
    pub fn apply(self, driven: f32, threshold: f32) -> f32 {
        let scaled = driven / threshold;
        match self {
            WaveShape::SoftClip => threshold * soft_clip(scaled),
            WaveShape::HardClip => hard_clip(driven, threshold),
            WaveShape::Foldback => foldback(driven, threshold),
            WaveShape::Asymmetric => threshold * asymmetric_clip(scaled),
            WaveShape::HalfWave => hard_clip(driven.max(0.0), threshold),
            WaveShape::FullWave => hard_clip(driven.abs(), threshold),
            WaveShape::Cubic => threshold * cubic_clip(scaled),
            WaveShape::Arctan => threshold * arctan_clip(scaled),
            WaveShape::Exponential => threshold * exp_clip(scaled),
        }
    }
}

/// Distortion kernel driven by shared controls.
///
/// # Example
///
/// ```rust
/// use crunch_core::Effect;
/// use crunch_effects::{Distortion, DistortionControls, WaveShape};
/// use std::sync::Arc;
///
/// let controls = Arc::new(DistortionControls::new());
/// let mut dist = Distortion::new(Arc::clone(&controls));
///
/// controls.set_mode(WaveShape::HardClip.index());
/// controls.set_drive(10.0);
/// controls.set_threshold(0.5);
///
/// assert_eq!(dist.process(0.2), 0.5);
/// ```
#[derive(Debug)]
pub struct Distortion {
    controls: Arc<DistortionControls>,

    // Sanitized snapshot of the controls
    shape: WaveShape,
    drive: f32,
    threshold: f32,
    mix: f32,
}

impl Distortion {
    /// Creates a kernel reading from `controls`.
    pub fn new(controls: Arc<DistortionControls>) -> Self {
        let mut dist = Self {
            controls,
            shape: WaveShape::default(),
            drive: 1.0,
            threshold: 1.0,
            mix: 1.0,
        };
        dist.refresh_controls();
        dist
    }

    /// Re-reads the shared controls.
    ///
    /// Out-of-range values are pulled back into range here: the mode index is
    /// clamped to a valid shape, the threshold is floored above zero, mix is
    /// clamped to \[0, 1\], and non-finite values fall back to neutral.
    pub fn refresh_controls(&mut self) {
        self.shape = WaveShape::from_index(self.controls.mode());

        let drive = self.controls.drive();
        self.drive = if drive.is_finite() { drive.max(0.0) } else { 1.0 };

        let threshold = self.controls.threshold();
        self.threshold = if threshold.is_finite() {
            threshold.max(MIN_THRESHOLD)
        } else {
            1.0
        };

        let mix = self.controls.mix();
        self.mix = if mix.is_finite() { mix.clamp(0.0, 1.0) } else { 1.0 };
    }

    /// Shape currently in use.
    pub fn waveshape(&self) -> WaveShape {
        self.shape
    }

    /// Drive factor currently in use.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Threshold currently in use.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Mix currently in use.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Shared controls this kernel reads.
    pub fn controls(&self) -> &Arc<DistortionControls> {
        &self.controls
    }

    /// Shapes one sample with the settings from the last refresh.
    #[inline]
    pub fn shape_sample(&self, input: f32) -> f32 {
        let shaped = self.shape.apply(input * self.drive, self.threshold);
        wet_dry_mix(input, shaped, self.mix)
    }
}

impl Effect for Distortion {
    fn process(&mut self, input: f32) -> f32 {
        self.refresh_controls();
        self.shape_sample(input)
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        self.refresh_controls();
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.shape_sample(*inp);
        }
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        self.refresh_controls();
        for sample in buffer.iter_mut() {
            *sample = self.shape_sample(*sample);
        }
    }
}
