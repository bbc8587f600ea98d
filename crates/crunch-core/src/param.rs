//! Host-automatable parameters with a normalized/actual value mapping.
//!
//! Plugin hosts see every parameter as a normalized `f32` in \[0.0, 1.0\].
//! DSP code wants the value in its own domain: a drive factor, a threshold,
//! a mode index. [`ParamDescriptor`] stores the normalized value and converts
//! between the two domains with a linear map:
//!
//! - **to actual**: `actual = min + (max - min) * normalized`
//! - **to normalized**: `normalized = (actual - min) / (max - min)`
//!
//! Both maps are total and extrapolate outside the range; callers that need
//! hard bounds clamp first. A reversed range (`min > max`) is allowed and
//! yields a decreasing map. Equal or non-finite bounds are rejected when the
//! parameter is built.
//!
//! # Threading
//!
//! The normalized value lives in an [`AtomicF32`]. [`value`](ParamDescriptor::value),
//! [`actual_value`](ParamDescriptor::actual_value) and the mapping functions are
//! lock-free and allocation-free, safe for the audio thread.
//! [`set_value`](ParamDescriptor::set_value) stores the value and then runs the
//! attached [`ControlBridge`] on the caller's thread; call it from the host or
//! UI thread only.
//!
//! # Example
//!
//! ```rust
//! use crunch_core::ParamDescriptor;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! let seen = Arc::new(AtomicU32::new(0));
//! let sink = Arc::clone(&seen);
//!
//! let drive = ParamDescriptor::ranged("drive", 1.0, 1.0, 25.0, "Drive")
//!     .with_precision(2)
//!     .with_bridge(move |actual: f32| sink.store(actual.to_bits(), Ordering::Release))
//!     .build()
//!     .unwrap();
//!
//! // The bridge already fired once during construction.
//! assert_eq!(f32::from_bits(seen.load(Ordering::Acquire)), 1.0);
//!
//! drive.set_value(0.5);
//! assert_eq!(drive.actual_value(), 13.0);
//! assert_eq!(drive.format_value(drive.value()), "13.00");
//! ```

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
};

use core::fmt;

use crate::atomic::AtomicF32;
use crate::bridge::ControlBridge;
use crate::error::ParamError;
use crate::format::{format_fixed, parse_leading_float};

/// Stable symbolic parameter identifier.
///
/// Used to correlate saved state with parameters, so once shipped an
/// identifier must never change or be reused. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(String);

impl ParamId {
    /// Creates an identifier, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, ParamError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ParamError::EmptyId);
        }
        Ok(Self(id))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the default value was given to the builder.
#[derive(Debug, Clone, Copy)]
enum DefaultSpec {
    Normalized(f32),
    Actual { value: f32, min: f32, max: f32 },
}

/// Builder returned by [`ParamDescriptor::normalized`] and
/// [`ParamDescriptor::ranged`].
///
/// Nothing is validated and no bridge runs until [`build`](Self::build).
pub struct ParamBuilder {
    id: String,
    name: String,
    label: String,
    precision: usize,
    default: DefaultSpec,
    bridge: Option<Box<dyn ControlBridge>>,
}

impl ParamBuilder {
    /// Sets the unit label shown next to the value (e.g. `"dB"`).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the number of fractional digits used by
    /// [`ParamDescriptor::format_value`]. Defaults to `0`.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Attaches the bridge invoked on every value change.
    pub fn with_bridge(mut self, bridge: impl ControlBridge + 'static) -> Self {
        self.bridge = Some(Box::new(bridge));
        self
    }

    /// Validates the configuration, creates the parameter and sets it to its
    /// default, which runs the bridge exactly once.
    pub fn build(self) -> Result<ParamDescriptor, ParamError> {
        let id = ParamId::new(self.id)?;

        let (actual_min, actual_max) = match self.default {
            DefaultSpec::Normalized(_) => (0.0, 1.0),
            DefaultSpec::Actual { min, max, .. } => (min, max),
        };

        if !actual_min.is_finite() || !actual_max.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = %id, actual_min, actual_max, "rejected non-finite parameter range");
            return Err(ParamError::NonFiniteRange {
                id: id.to_string(),
                min: actual_min,
                max: actual_max,
            });
        }
        if actual_min == actual_max {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = %id, actual_min, actual_max, "rejected degenerate parameter range");
            return Err(ParamError::DegenerateRange {
                id: id.to_string(),
                min: actual_min,
                max: actual_max,
            });
        }

        let default_value = match self.default {
            DefaultSpec::Normalized(v) => v,
            DefaultSpec::Actual { value, min, max } => (value - min) / (max - min),
        };

        let param = ParamDescriptor {
            id,
            name: self.name,
            label: self.label,
            default_value,
            value: AtomicF32::new(default_value),
            actual_min,
            actual_max,
            precision: self.precision,
            on_change: self.bridge,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = %param.id,
            default = param.actual_default_value(),
            min = actual_min,
            max = actual_max,
            "parameter created"
        );

        // Establishes the engine's initial control state before any audio runs.
        param.set_value(default_value);
        Ok(param)
    }
}

/// One automatable parameter: identity, range, display metadata and the
/// current normalized value.
///
/// Built through [`normalized`](Self::normalized) or [`ranged`](Self::ranged).
/// Everything except the value (and the name, through `&mut`) is fixed after
/// construction.
pub struct ParamDescriptor {
    id: ParamId,
    name: String,
    label: String,
    default_value: f32,
    value: AtomicF32,
    actual_min: f32,
    actual_max: f32,
    precision: usize,
    on_change: Option<Box<dyn ControlBridge>>,
}

impl ParamDescriptor {
    /// Starts a parameter expressed directly in normalized terms.
    ///
    /// The actual range is \[0.0, 1.0\], so actual and normalized values coincide.
    pub fn normalized(
        id: impl Into<String>,
        default_value: f32,
        name: impl Into<String>,
    ) -> ParamBuilder {
        ParamBuilder {
            id: id.into(),
            name: name.into(),
            label: String::new(),
            precision: 0,
            default: DefaultSpec::Normalized(default_value),
            bridge: None,
        }
    }

    /// Starts a parameter from an actual default and actual range.
    ///
    /// The normalized default is `to_normalized(actual_default)`.
    pub fn ranged(
        id: impl Into<String>,
        actual_default: f32,
        actual_min: f32,
        actual_max: f32,
        name: impl Into<String>,
    ) -> ParamBuilder {
        ParamBuilder {
            id: id.into(),
            name: name.into(),
            label: String::new(),
            precision: 0,
            default: DefaultSpec::Actual {
                value: actual_default,
                min: actual_min,
                max: actual_max,
            },
            bridge: None,
        }
    }

    /// The stable identifier.
    pub fn id(&self) -> &ParamId {
        &self.id
    }

    /// Full display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the parameter. Requires exclusive access, so it can only
    /// happen before the parameter is shared with other threads.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Unit label, possibly empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fractional digits used for text rendering.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Whether a bridge is attached.
    pub fn has_bridge(&self) -> bool {
        self.on_change.is_some()
    }

    /// Maps an actual value to normalized space. Pure; extrapolates.
    #[inline]
    pub fn to_normalized(&self, actual: f32) -> f32 {
        (actual - self.actual_min) / (self.actual_max - self.actual_min)
    }

    /// Maps a normalized value to the actual range. Pure; extrapolates.
    #[inline]
    pub fn to_actual(&self, normalized: f32) -> f32 {
        self.actual_min + (self.actual_max - self.actual_min) * normalized
    }

    /// Current normalized value. Lock-free; safe on the audio thread.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value.load()
    }

    /// Current value in the actual range. Lock-free; safe on the audio thread.
    #[inline]
    pub fn actual_value(&self) -> f32 {
        self.to_actual(self.value())
    }

    /// Stores a new normalized value, then runs the bridge with the matching
    /// actual value.
    ///
    /// Values outside \[0.0, 1.0\] are stored as given. Concurrent writers
    /// race with last-writer-wins semantics. Do not call from the audio
    /// thread: the bridge body is engine-defined.
    pub fn set_value(&self, normalized: f32) {
        self.value.store(normalized);
        if let Some(bridge) = &self.on_change {
            bridge.on_value_changed(self.to_actual(normalized));
        }
    }

    /// Normalized default, fixed at construction.
    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Default in the actual range.
    pub fn actual_default_value(&self) -> f32 {
        self.to_actual(self.default_value)
    }

    /// Lower bound of the actual range.
    pub fn actual_minimum(&self) -> f32 {
        self.actual_min
    }

    /// Upper bound of the actual range.
    pub fn actual_maximum(&self) -> f32 {
        self.actual_max
    }

    /// The name cut to at most `max_len` characters, keeping the start.
    ///
    /// Counts Unicode scalar values, not bytes. Returns the full name when it
    /// already fits.
    pub fn display_name(&self, max_len: usize) -> &str {
        match self.name.char_indices().nth(max_len) {
            Some((end, _)) => &self.name[..end],
            None => &self.name,
        }
    }

    /// Renders `to_actual(normalized)` with [`precision`](Self::precision)
    /// fractional digits, without the label.
    ///
    /// See [`format_fixed`] for the rounding rule.
    pub fn format_value(&self, normalized: f32) -> String {
        format_fixed(self.to_actual(normalized), self.precision)
    }

    /// Parses text typed by a user into a normalized value.
    ///
    /// The text is read as an **actual** value, the inverse of
    /// [`format_value`](Self::format_value), using its leading number so unit
    /// suffixes are ignored. Text without a number yields `0.0`. Never fails
    /// and never clamps.
    ///
    /// Some hosts hand typed text over as a normalized position instead.
    /// This method does not: `"0.5"` on a 1..25 range means an actual value
    /// of 0.5, which lies below the range and maps to a negative normalized
    /// value. Callers holding a normalized number should use
    /// [`set_value`](Self::set_value) directly.
    pub fn parse_text(&self, text: &str) -> f32 {
        parse_leading_float(text).map_or(0.0, |actual| self.to_normalized(actual))
    }
}

impl fmt::Debug for ParamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value())
            .field("default_value", &self.default_value)
            .field("actual_min", &self.actual_min)
            .field("actual_max", &self.actual_max)
            .field("precision", &self.precision)
            .field("has_bridge", &self.has_bridge())
            .finish()
    }
}

/// One-line state summary for logs, e.g.
/// `drive "Drive": 0.5 (13.00) default 0 (1.00) range [1.00, 25.00]`.
impl fmt::Display for ParamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.is_empty() { "" } else { " " };
        write!(
            f,
            "{} \"{}\": {} ({}{label}{}) default {} ({}{label}{}) range [{}, {}]",
            self.id,
            self.name,
            self.value(),
            self.format_value(self.value()),
            self.label,
            self.default_value,
            self.format_value(self.default_value),
            self.label,
            format_fixed(self.actual_min, self.precision),
            format_fixed(self.actual_max, self.precision),
        )
    }
}
