//! Crunch Effects - multi-mode distortion engine
//!
//! Wires `crunch-core` parameters to a waveshaping kernel:
//!
//! - [`DistortionControls`] - atomic actual-domain controls written by
//!   parameter bridges
//! - [`Distortion`] - the kernel, an [`Effect`](crunch_core::Effect) reading
//!   those controls
//! - [`DistortionProcessor`] - owns the registry and the kernel, processes
//!   multichannel blocks
//!
//! ```rust
//! use crunch_effects::{DistortionProcessor, WaveShape};
//!
//! let mut processor = DistortionProcessor::new()?;
//! let mode = processor.params().by_id("mode").unwrap();
//! mode.set_value(mode.to_normalized(WaveShape::Foldback.index() as f32));
//!
//! let mut mono = [0.2f32; 128];
//! processor.process_block(&mut [&mut mono]);
//! assert_eq!(processor.kernel().waveshape(), WaveShape::Foldback);
//! # Ok::<(), crunch_core::ParamError>(())
//! ```

pub mod controls;
pub mod distortion;
pub mod processor;

pub use controls::DistortionControls;
pub use distortion::{Distortion, WaveShape};
pub use processor::{DistortionProcessor, ids};
