//! Property-based tests for the parameter mapping.
//!
//! Covers round-trips between normalized and actual space, monotonicity,
//! default consistency, bridge invocation counts and display-name
//! truncation, using proptest for randomized ranges and values.

use crunch_core::{ParamDescriptor, format_fixed, parse_leading_float};
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Finite ranges with a span large enough that f32 error stays relative.
fn valid_range() -> impl Strategy<Value = (f32, f32)> {
    (-1000.0f32..1000.0f32, 0.1f32..1000.0f32, any::<bool>()).prop_map(|(min, span, reversed)| {
        if reversed {
            (min + span, min)
        } else {
            (min, min + span)
        }
    })
}

fn tolerance(min: f32, max: f32) -> f32 {
    let magnitude = min.abs().max(max.abs());
    1e-4 * (1.0 + magnitude / (max - min).abs())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// to_normalized(to_actual(v)) recovers v for any valid range.
    #[test]
    fn normalized_round_trip((min, max) in valid_range(), v in 0.0f32..=1.0f32) {
        let param = ParamDescriptor::ranged("p", min, min, max, "P").build().unwrap();
        let back = param.to_normalized(param.to_actual(v));
        prop_assert!(
            (back - v).abs() <= tolerance(min, max),
            "range [{}, {}]: {} -> {} -> {}", min, max, v, param.to_actual(v), back
        );
    }

    /// Ranged construction reproduces the actual default.
    #[test]
    fn default_consistency((min, max) in valid_range(), t in 0.0f32..=1.0f32) {
        let actual_default = min + (max - min) * t;
        let param = ParamDescriptor::ranged("p", actual_default, min, max, "P").build().unwrap();
        let span = (max - min).abs();
        prop_assert!(
            (param.actual_default_value() - actual_default).abs() <= 1e-4 * (1.0 + span + min.abs()),
            "expected {}, got {}", actual_default, param.actual_default_value()
        );
        prop_assert_eq!(param.value(), param.default_value());
    }

    /// to_actual increases with its input for min < max and decreases for min > max.
    #[test]
    fn mapping_is_monotonic((min, max) in valid_range(), a in 0.0f32..=1.0f32, gap in 0.01f32..0.5f32) {
        let param = ParamDescriptor::ranged("p", min, min, max, "P").build().unwrap();
        let b = a + gap;
        if min < max {
            prop_assert!(param.to_actual(b) > param.to_actual(a));
        } else {
            prop_assert!(param.to_actual(b) < param.to_actual(a));
        }
    }

    /// Every set_value runs the bridge exactly once with to_actual(new value).
    #[test]
    fn bridge_fires_once_per_set((min, max) in valid_range(), values in prop::collection::vec(0.0f32..=1.0f32, 1..20)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicU32::new(0));
        let (count, sink) = (Arc::clone(&calls), Arc::clone(&last));

        let param = ParamDescriptor::ranged("p", min, min, max, "P")
            .with_bridge(move |actual: f32| {
                count.fetch_add(1, Ordering::Relaxed);
                sink.store(actual.to_bits(), Ordering::Relaxed);
            })
            .build()
            .unwrap();
        prop_assert_eq!(calls.load(Ordering::Relaxed), 1);

        for (i, &v) in values.iter().enumerate() {
            param.set_value(v);
            prop_assert_eq!(calls.load(Ordering::Relaxed), i + 2);
            prop_assert_eq!(f32::from_bits(last.load(Ordering::Relaxed)), param.to_actual(v));
        }
    }

    /// display_name(n) never exceeds n characters and keeps short names intact.
    #[test]
    fn display_name_truncation(name in "\\PC{0,24}", n in 1usize..32) {
        let param = ParamDescriptor::normalized("p", 0.5, name.clone()).build().unwrap();
        let shown = param.display_name(n);
        prop_assert!(shown.chars().count() <= n);
        prop_assert!(name.starts_with(shown));
        if n >= name.chars().count() {
            prop_assert_eq!(shown, name.as_str());
        }
    }

    /// Formatted text parses back to within half a display step.
    #[test]
    fn format_parse_round_trip(value in -1000.0f32..1000.0f32, precision in 0usize..5) {
        let text = format_fixed(value, precision);
        let parsed = parse_leading_float(&text).unwrap();
        let half_step = 0.5 * 10f32.powi(-(precision as i32));
        prop_assert!(
            (parsed - value).abs() <= half_step + 1e-3,
            "{} rendered as {} parsed as {}", value, text, parsed
        );
    }

    /// parse_text never panics, whatever the user types.
    #[test]
    fn parse_text_is_total(text in "\\PC*") {
        let param = ParamDescriptor::ranged("p", 1.0, 1.0, 25.0, "P").build().unwrap();
        let _ = param.parse_text(&text);
    }
}
