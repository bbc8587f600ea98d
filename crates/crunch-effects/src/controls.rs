//! Engine-side control values written by parameter bridges.
//!
//! [`DistortionControls`] holds the actual-domain values the kernel reads on
//! the audio thread. Every field is an atomic, so bridges on the host thread
//! and the kernel never share a lock.

use core::sync::atomic::{AtomicI32, Ordering};

use crunch_core::AtomicF32;

/// Actual-domain controls shared between parameter bridges and the kernel.
///
/// Values are stored as given. Sanitizing (mode range, threshold floor, mix
/// clamp) happens when the kernel reads them.
#[derive(Debug)]
pub struct DistortionControls {
    mode: AtomicI32,
    drive: AtomicF32,
    threshold: AtomicF32,
    mix: AtomicF32,
}

impl DistortionControls {
    /// Controls at their neutral settings: soft clip, unity drive, full
    /// threshold, fully wet.
    pub const fn new() -> Self {
        Self {
            mode: AtomicI32::new(0),
            drive: AtomicF32::new(1.0),
            threshold: AtomicF32::new(1.0),
            mix: AtomicF32::new(1.0),
        }
    }

    /// Waveshaper index.
    #[inline]
    pub fn mode(&self) -> i32 {
        self.mode.load(Ordering::Acquire)
    }

    /// Sets the waveshaper index.
    #[inline]
    pub fn set_mode(&self, mode: i32) {
        self.mode.store(mode, Ordering::Release);
    }

    /// Input gain factor.
    #[inline]
    pub fn drive(&self) -> f32 {
        self.drive.load()
    }

    /// Sets the input gain factor.
    #[inline]
    pub fn set_drive(&self, drive: f32) {
        self.drive.store(drive);
    }

    /// Clipping ceiling.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold.load()
    }

    /// Sets the clipping ceiling.
    #[inline]
    pub fn set_threshold(&self, threshold: f32) {
        self.threshold.store(threshold);
    }

    /// Wet/dry ratio, 0 = dry.
    #[inline]
    pub fn mix(&self) -> f32 {
        self.mix.load()
    }

    /// Sets the wet/dry ratio.
    #[inline]
    pub fn set_mix(&self, mix: f32) {
        self.mix.store(mix);
    }
}

impl Default for DistortionControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn neutral_defaults() {
        let controls = DistortionControls::default();
        assert_eq!(controls.mode(), 0);
        assert_eq!(controls.drive(), 1.0);
        assert_eq!(controls.threshold(), 1.0);
        assert_eq!(controls.mix(), 1.0);
    }

    #[test]
    fn writes_are_visible_across_threads() {
        let controls = Arc::new(DistortionControls::new());
        let writer = Arc::clone(&controls);
        thread::spawn(move || {
            writer.set_mode(6);
            writer.set_drive(12.5);
            writer.set_threshold(0.3);
            writer.set_mix(0.25);
        })
        .join()
        .unwrap();

        assert_eq!(controls.mode(), 6);
        assert_eq!(controls.drive(), 12.5);
        assert_eq!(controls.threshold(), 0.3);
        assert_eq!(controls.mix(), 0.25);
    }
}
