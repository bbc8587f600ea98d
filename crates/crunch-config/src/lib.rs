//! State persistence for crunch processors.
//!
//! Captures a [`ParamRegistry`](crunch_core::ParamRegistry)'s normalized
//! values into a [`PluginState`], writes it as JSON or TOML, and restores it
//! onto a registry through each parameter's `set_value`, so engine controls
//! follow.
//!
//! # Example
//!
//! ```rust,no_run
//! use crunch_config::PluginState;
//! use crunch_effects::DistortionProcessor;
//!
//! let processor = DistortionProcessor::new().unwrap();
//! processor.params().by_id("drive").unwrap().set_value(0.5);
//!
//! PluginState::capture(processor.params()).save("presets/warm.toml").unwrap();
//!
//! let fresh = DistortionProcessor::new().unwrap();
//! let report = PluginState::load("presets/warm.toml")
//!     .unwrap()
//!     .restore(fresh.params())
//!     .unwrap();
//! assert!(report.is_complete());
//! ```

mod error;
mod state;

pub use error::ConfigError;
pub use state::{PluginState, RestoreReport, STATE_VERSION, StateFormat};
