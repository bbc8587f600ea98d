//! Core Effect trait.
//!
//! The [`Effect`] trait is what the audio thread drives. Effects read their
//! controls from lock-free state, never from a [`ParamDescriptor`]'s bridge,
//! so every method here must be real-time safe: no allocation, no locks.
//!
//! [`ParamDescriptor`]: crate::ParamDescriptor

/// Core trait for audio effects.
///
/// Mono, sample-based processing with a block helper. Object-safe, so
/// `dyn Effect` works where runtime dispatch is needed.
///
/// # Example
///
/// ```rust
/// use crunch_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
/// }
///
/// let mut gain = Gain { gain: 2.0 };
/// let mut buffer = [0.25, -0.5];
/// gain.process_block_inplace(&mut buffer);
/// assert_eq!(buffer, [0.5, -1.0]);
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: f32) -> f32 {
            input * self.0
        }
    }

    #[test]
    fn block_matches_per_sample() {
        let mut effect = Gain(3.0);
        let input = [1.0, -2.0, 0.5];
        let mut output = [0.0; 3];
        effect.process_block(&input, &mut output);
        assert_eq!(output, [3.0, -6.0, 1.5]);
    }

    #[test]
    fn dyn_effect_needs_only_process() {
        let mut gain = Gain(0.5);
        let effect: &mut dyn Effect = &mut gain;
        let mut buffer = [2.0, -4.0];
        effect.process_block_inplace(&mut buffer);
        assert_eq!(buffer, [1.0, -2.0]);
        assert_eq!(effect.process(8.0), 4.0);
    }
}
