//! Post-processing over generated or replayed readings.

use std::collections::BTreeMap;

use specscope_common::models::{HourlyTrend, Reading};

/// Readings whose frequency lies in `[start_mhz, end_mhz]`, order kept.
pub fn filter_band(readings: &[Reading], start_mhz: f64, end_mhz: f64) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| r.frequency >= start_mhz && r.frequency <= end_mhz)
        .cloned()
        .collect()
}

/// Share of `flagged` readings per hour of day, relative to all `readings`
/// taken in that hour.
///
/// Rows are sorted by hour. Hours without readings are omitted; flagged
/// readings from an hour absent in `readings` are ignored.
pub fn hourly_trends(readings: &[Reading], flagged: &[Reading]) -> Vec<HourlyTrend> {
    let mut totals: BTreeMap<u32, usize> = BTreeMap::new();
    for r in readings {
        *totals.entry(r.hour).or_default() += 1;
    }

    let mut hits: BTreeMap<u32, usize> = BTreeMap::new();
    for r in flagged {
        *hits.entry(r.hour).or_default() += 1;
    }

    totals
        .into_iter()
        .map(|(hour, total)| {
            let flagged = hits.get(&hour).copied().unwrap_or(0).min(total);
            HourlyTrend {
                hour,
                total,
                flagged,
                percentage: flagged as f64 / total as f64 * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, frequency: f64) -> Reading {
        let ts = Utc.with_ymd_and_hms(2025, 2, 3, hour, 0, 0).unwrap();
        Reading::recorded(ts, frequency, -50.0, 37.03, -121.9)
    }

    #[test]
    fn band_filter_is_inclusive() {
        let input: Vec<Reading> = [2399.0, 2400.0, 2450.0, 2485.0, 2486.0]
            .into_iter()
            .map(|f| at(10, f))
            .collect();
        let kept = filter_band(&input, 2400.0, 2485.0);
        let freqs: Vec<f64> = kept.iter().map(|r| r.frequency).collect();
        assert_eq!(freqs, vec![2400.0, 2450.0, 2485.0]);
    }

    #[test]
    fn band_filter_outside_sweep_is_empty() {
        let input = vec![at(10, 300.0), at(10, 800.0)];
        assert!(filter_band(&input, 5000.0, 6000.0).is_empty());
    }

    #[test]
    fn trends_by_hour() {
        let readings = vec![at(8, 100.0), at(8, 200.0), at(8, 300.0), at(8, 400.0), at(21, 500.0)];
        let flagged = vec![readings[0].clone(), readings[2].clone()];

        let trends = hourly_trends(&readings, &flagged);
        assert_eq!(
            trends,
            vec![
                HourlyTrend {
                    hour: 8,
                    total: 4,
                    flagged: 2,
                    percentage: 50.0
                },
                HourlyTrend {
                    hour: 21,
                    total: 1,
                    flagged: 0,
                    percentage: 0.0
                },
            ]
        );
    }

    #[test]
    fn trends_of_nothing() {
        assert!(hourly_trends(&[], &[]).is_empty());
    }
}
