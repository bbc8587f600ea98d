//! Waveshaping and mixing helpers for the distortion kernel.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! Every clipper maps onto the unit ceiling ±1; callers scale the input and
//! output by a threshold to move the ceiling.
//!
//! | Function | Character | Harmonics |
//! |----------|-----------|-----------|
//! | [`soft_clip`] | Smooth, warm | Odd |
//! | [`hard_clip`] | Harsh, buzzy | Odd (many) |
//! | [`foldback`] | Complex, synthy | Even + Odd |
//! | [`asymmetric_clip`] | Warm, tube-like | Even + Odd |
//! | [`cubic_clip`] | Gentle, rounded | Odd (few) |
//! | [`arctan_clip`] | Soft, slow knee | Odd |
//! | [`exp_clip`] | Fuzzy | Odd |

use libm::{atanf, expf, fmodf, logf, tanhf};

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored there, so silence reads as -200 dB.
///
/// ```rust
/// use crunch_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Soft clip using hyperbolic tangent. Output in (-1, 1).
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to ±`threshold`.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Foldback distortion.
///
/// When |x| exceeds threshold, the signal folds back instead of clipping.
/// Repeated folds form a triangle wave of period `4 * threshold`, computed
/// in closed form so high drive costs the same as low drive.
#[inline]
pub fn foldback(x: f32, threshold: f32) -> f32 {
    if x.abs() <= threshold {
        return x;
    }
    let period = 4.0 * threshold;
    let mut phase = fmodf(x + threshold, period);
    if phase < 0.0 {
        phase += period;
    }
    if phase < 2.0 * threshold {
        phase - threshold
    } else {
        3.0 * threshold - phase
    }
}

/// Asymmetric soft clipping.
///
/// Positive and negative halves clip differently, producing both even and
/// odd harmonics.
#[inline]
pub fn asymmetric_clip(x: f32) -> f32 {
    if x >= 0.0 {
        tanhf(x)
    } else {
        tanhf(x * 1.5) / 1.5 * 1.2
    }
}

/// Cubic soft clipper: `x - x³/3` inside ±1, flat at ±2/3 outside,
/// rescaled so the ceiling is ±1.
#[inline]
pub fn cubic_clip(x: f32) -> f32 {
    let x = x.clamp(-1.0, 1.0);
    (x - x * x * x / 3.0) * 1.5
}

/// Arctangent clipper scaled to (-1, 1).
#[inline]
pub fn arctan_clip(x: f32) -> f32 {
    atanf(x) * core::f32::consts::FRAC_2_PI
}

/// Exponential fuzz: `sign(x) * (1 - e^-|x|)`.
#[inline]
pub fn exp_clip(x: f32) -> f32 {
    x.signum() * (1.0 - expf(-x.abs()))
}

/// Crossfade between dry and wet signals.
///
/// `dry * (1 - mix) + wet * mix`. Exact at both endpoints: `mix = 0`
/// returns `dry` and `mix = 1` returns `wet` bit for bit.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}
