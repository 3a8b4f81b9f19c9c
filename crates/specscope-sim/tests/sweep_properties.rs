//! Property tests over the generator and detector.
//!
//! Run:
//! ```bash
//! cargo test -p specscope-sim --test sweep_properties
//! ```

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use specscope_common::models::{TimePeriod, in_wifi_band};
use specscope_sim::detector::detect;
use specscope_sim::spectrum::{Sweep, generate};

/// Sweeps spanning the AM broadcast band up to past 2.4 GHz Wi-Fi.
fn sweep_strategy() -> impl Strategy<Value = (usize, f64, f64)> {
    (1usize..400, 0.0f64..3000.0, 0.5f64..3000.0)
        .prop_map(|(samples, start, width)| (samples, start, start + width))
}

proptest! {
    #[test]
    fn proptest_sweep_shape((samples, start, end) in sweep_strategy(), seed in any::<u64>()) {
        let sweep = Sweep::new(samples, start, end).unwrap();
        let reference = Utc.with_ymd_and_hms(2025, 7, 4, 16, 0, 0).unwrap();
        let readings = generate(&sweep, reference, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(readings.len(), samples);
        prop_assert_eq!(readings[0].frequency, start);
        for pair in readings.windows(2) {
            prop_assert!(pair[1].frequency > pair[0].frequency);
            prop_assert!(pair[1].timestamp > pair[0].timestamp);
        }
        prop_assert!(readings[samples - 1].frequency < end);

        let step = (end - start) / samples as f64;
        for (i, r) in readings.iter().enumerate() {
            prop_assert!((r.frequency - (start + i as f64 * step)).abs() < 1e-9);
            prop_assert_eq!(r.wifi_proximity, in_wifi_band(r.frequency));
            prop_assert_eq!(r.time_period, TimePeriod::from_hour(r.hour));
        }
    }

    #[test]
    fn proptest_detect_is_ordered_subsequence(
        (samples, start, end) in sweep_strategy(),
        seed in any::<u64>(),
        threshold in -90.0f64..60.0,
        proximity in 0.0f64..50.0,
    ) {
        let sweep = Sweep::new(samples, start, end).unwrap();
        let reference = Utc.with_ymd_and_hms(2025, 7, 4, 3, 0, 0).unwrap();
        let readings = generate(&sweep, reference, &mut StdRng::seed_from_u64(seed));
        let flagged = detect(&readings, threshold, proximity);

        prop_assert!(flagged.len() < readings.len().max(1));

        // Every flagged reading appears in the input after the previous one.
        let mut cursor = 0;
        for f in &flagged {
            let pos = readings[cursor..].iter().position(|r| r == f);
            prop_assert!(pos.is_some(), "flagged reading not in input");
            cursor += pos.unwrap_or(0) + 1;
        }
        if let Some(last) = readings.last() {
            prop_assert!(flagged.last() != Some(last));
        }
    }
}
