//! Crunch Core - parameter mapping and lock-free control plane
//!
//! Plugin hosts automate parameters as normalized values in \[0.0, 1.0\];
//! DSP code wants drive factors, thresholds and mode indices. This crate
//! sits between the two.
//!
//! # Core Abstractions
//!
//! - [`ParamDescriptor`] - one parameter: identity, actual range, display
//!   precision, and an atomically stored normalized value
//! - [`ControlBridge`] - callback run on every value change, writing the
//!   actual value into engine controls
//! - [`ParamRegistry`] - ordered, duplicate-free collection of a processor's
//!   parameters
//! - [`AtomicF32`] - lock-free float cell used for values and engine controls
//! - [`Effect`] - audio-thread processing trait
//!
//! # Data Flow
//!
//! ```text
//! host thread: set_value(n) ─► AtomicF32 store ─► bridge(to_actual(n))
//!                                                    │
//!                                          engine controls (atomics)
//!                                                    │
//! audio thread:                      Effect::process reads controls
//! ```
//!
//! # Example
//!
//! ```rust
//! use crunch_core::{AtomicF32, ParamDescriptor, ParamRegistry};
//! use std::sync::Arc;
//!
//! let drive_control = Arc::new(AtomicF32::new(0.0));
//! let sink = Arc::clone(&drive_control);
//!
//! let mut registry = ParamRegistry::new();
//! registry.add(
//!     ParamDescriptor::ranged("drive", 1.0, 1.0, 25.0, "Drive")
//!         .with_precision(2)
//!         .with_bridge(move |actual: f32| sink.store(actual))
//!         .build()?,
//! )?;
//!
//! registry.by_id("drive").unwrap().set_value(0.5);
//! assert_eq!(drive_control.load(), 13.0);
//! # Ok::<(), crunch_core::ParamError>(())
//! ```
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets; the crate then
//! needs only `alloc`:
//!
//! ```toml
//! [dependencies]
//! crunch-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod atomic;
pub mod bridge;
pub mod effect;
pub mod error;
pub mod format;
pub mod math;
pub mod param;
pub mod registry;

// Re-export main types at crate root
pub use atomic::AtomicF32;
pub use bridge::{ControlBridge, discrete_index};
pub use effect::Effect;
pub use error::ParamError;
pub use format::{format_fixed, parse_leading_float};
pub use math::{
    arctan_clip, asymmetric_clip, cubic_clip, exp_clip, foldback, hard_clip, linear_to_db,
    soft_clip, wet_dry_mix,
};
pub use param::{ParamBuilder, ParamDescriptor, ParamId};
pub use registry::ParamRegistry;
