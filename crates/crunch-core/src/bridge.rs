//! Callback path from a parameter change to the processing engine.
//!
//! A [`ControlBridge`] is attached to a [`ParamDescriptor`](crate::ParamDescriptor)
//! and invoked synchronously every time the descriptor's normalized value is
//! set, including once during construction. It receives the **actual**
//! value and writes it into the engine's control state.
//!
//! ```text
//! host / UI thread                       audio thread
//! ───────────────                        ────────────
//! set_value(0.5) ─► store normalized
//!                └► bridge.on_value_changed(4.0)
//!                       └► controls.mode.store(4) ──► controls.mode.load()
//! ```
//!
//! Any `Fn(f32) + Send + Sync` closure is a bridge, so wiring a parameter is
//! usually a one-liner capturing an `Arc` of the controls struct.
//!
//! # Contract
//!
//! Bridges must not panic, allocate or block. They run on whichever thread
//! called `set_value`; that thread is expected to be a non-real-time one,
//! but naive hosts may still call from the audio thread.

/// Receives actual-domain values whenever a parameter changes.
pub trait ControlBridge: Send + Sync {
    /// Called once per `set_value` with the new actual value.
    fn on_value_changed(&self, actual: f32);
}

impl<F> ControlBridge for F
where
    F: Fn(f32) + Send + Sync,
{
    #[inline]
    fn on_value_changed(&self, actual: f32) {
        self(actual)
    }
}

/// Converts an actual value to a discrete index by truncating toward zero.
///
/// Used by bridges of stepped parameters such as a mode selector. NaN maps
/// to `0` and values beyond the `i32` range saturate.
///
/// # Example
///
/// ```rust
/// use crunch_core::discrete_index;
///
/// assert_eq!(discrete_index(3.99), 3);
/// assert_eq!(discrete_index(-1.5), -1);
/// ```
#[inline]
pub fn discrete_index(actual: f32) -> i32 {
    actual as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtomicF32;
    use core::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn closures_are_bridges() {
        let sink = AtomicF32::new(0.0);
        let bridge = |v: f32| sink.store(v);
        bridge.on_value_changed(12.5);
        assert_eq!(sink.load(), 12.5);
    }

    #[test]
    fn discrete_index_truncates_toward_zero() {
        assert_eq!(discrete_index(0.0), 0);
        assert_eq!(discrete_index(0.999), 0);
        assert_eq!(discrete_index(8.0), 8);
        assert_eq!(discrete_index(-0.7), 0);
        assert_eq!(discrete_index(f32::NAN), 0);
        assert_eq!(discrete_index(1.0e12), i32::MAX);
    }

    #[test]
    fn bridge_writes_discrete_controls() {
        let mode = AtomicI32::new(-1);
        let bridge = |v: f32| mode.store(discrete_index(v), Ordering::Release);
        bridge.on_value_changed(4.0);
        assert_eq!(mode.load(Ordering::Acquire), 4);
    }
}
