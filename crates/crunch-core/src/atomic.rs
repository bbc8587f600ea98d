//! Lock-free `f32` cell.
//!
//! Stores the float's bit pattern in an [`AtomicU32`], so a load always
//! returns exactly one previously stored value. Stores use `Release` and
//! loads use `Acquire`, pairing a control write on the host thread with the
//! audio thread's next read.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// An `f32` that can be shared between threads without locking.
///
/// # Example
///
/// ```rust
/// use crunch_core::AtomicF32;
///
/// let gain = AtomicF32::new(0.5);
/// gain.store(0.75);
/// assert_eq!(gain.load(), 0.75);
/// ```
#[derive(Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Creates a new cell holding `value`.
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Reads the current value. Never blocks.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replaces the current value. Never blocks.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

}

impl fmt::Debug for AtomicF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.load(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_exact_bits() {
        let cell = AtomicF32::new(0.0);
        for v in [-0.0, 1.0e-38, f32::MAX, f32::MIN_POSITIVE, 0.1] {
            cell.store(v);
            assert_eq!(cell.load().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(AtomicF32::default().load(), 0.0);
    }
}
