//! # Band Plan
//!
//! Maps a sweep frequency to the band whose noise model sets its power.
//!
//! | Priority | Band        | Range (MHz)              | Power model (dBm)            |
//! |----------|-------------|--------------------------|------------------------------|
//! | 1        | FM          | 88–108                   | 35 + U(0,5)                  |
//! | 2        | Wi-Fi       | 2400–2485                | 25 + 10·sin(0.2t) + U(0,5)   |
//! | 3        | AM          | 0.53–1.7                 | 10 + U(0,5)                  |
//! | 4        | Bluetooth   | 2402–2480, p = 0.3       | 20 + U(0,10)                 |
//! | 5        | Cellular    | 850–900 or 1800–1900     | 30 + 5·sin(0.5t) + U(0,5)    |
//! | 6        | GPS         | 1574–1576                | −60 + U(0,3)                 |
//! | 7        | Weather     | 162.4–162.55             | 45 + U(0,2)                  |
//! | 8        | Quiet zone  | 300–350                  | −80 + U(0,5)                 |
//! | 9        | Spike       | anywhere, p = 0.01       | 50 + U(0,10)                 |
//! | 10       | Background  | anywhere                 | −50 + 10·sin(0.1t) + U(0,10) |
//!
//! Rules are evaluated top to bottom and the first match wins. Ranges are
//! inclusive at both edges. The order is part of the contract even where it
//! shadows a rule: Bluetooth lies entirely inside Wi-Fi and is never
//! selected.
//!
//! A probabilistic rule consumes its Bernoulli draw only when it is reached,
//! so the number of draws per sample depends on the frequency.

use std::fmt;

use rand::{Rng, RngExt};

// ─── Band Catalog ───────────────────────────────────────────────────────────

/// A band rule of the synthetic sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Fm,
    Wifi,
    Am,
    Bluetooth,
    Cellular,
    Gps,
    Weather,
    QuietZone,
    /// Rare broadband interference burst.
    Spike,
    /// Low-level noise floor.
    Background,
}

const FM_MHZ: (f64, f64) = (88.0, 108.0);
const WIFI_MHZ: (f64, f64) = (2400.0, 2485.0);
const AM_MHZ: (f64, f64) = (0.53, 1.7);
const BLUETOOTH_MHZ: (f64, f64) = (2402.0, 2480.0);
const CELLULAR_LOW_MHZ: (f64, f64) = (850.0, 900.0);
const CELLULAR_HIGH_MHZ: (f64, f64) = (1800.0, 1900.0);
const GPS_MHZ: (f64, f64) = (1574.0, 1576.0);
const WEATHER_MHZ: (f64, f64) = (162.4, 162.55);
const QUIET_ZONE_MHZ: (f64, f64) = (300.0, 350.0);

/// Probability that a Bluetooth hop is active when its rule is reached.
pub const BLUETOOTH_ACTIVITY: f64 = 0.3;
/// Probability of a random spike at a sample no band rule claimed.
pub const SPIKE_PROBABILITY: f64 = 0.01;

fn within(frequency: f64, (lo, hi): (f64, f64)) -> bool {
    frequency >= lo && frequency <= hi
}

/// Uniform draw on `[0, width)`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    rng.random::<f64>() * width
}

impl Band {
    /// Select the band for `frequency` (MHz) by walking the rule table in
    /// priority order.
    pub fn select<R: Rng + ?Sized>(frequency: f64, rng: &mut R) -> Band {
        if within(frequency, FM_MHZ) {
            Band::Fm
        } else if within(frequency, WIFI_MHZ) {
            Band::Wifi
        } else if within(frequency, AM_MHZ) {
            Band::Am
        } else if within(frequency, BLUETOOTH_MHZ) && rng.random::<f64>() < BLUETOOTH_ACTIVITY {
            Band::Bluetooth
        } else if within(frequency, CELLULAR_LOW_MHZ) || within(frequency, CELLULAR_HIGH_MHZ) {
            Band::Cellular
        } else if within(frequency, GPS_MHZ) {
            Band::Gps
        } else if within(frequency, WEATHER_MHZ) {
            Band::Weather
        } else if within(frequency, QUIET_ZONE_MHZ) {
            Band::QuietZone
        } else if rng.random::<f64>() < SPIKE_PROBABILITY {
            Band::Spike
        } else {
            Band::Background
        }
    }

    /// Sample this band's power (dBm) at synthetic time `t`.
    pub fn power<R: Rng + ?Sized>(self, t: f64, rng: &mut R) -> f64 {
        match self {
            Band::Fm => 35.0 + uniform(rng, 5.0),
            Band::Wifi => 25.0 + 10.0 * (0.2 * t).sin() + uniform(rng, 5.0),
            Band::Am => 10.0 + uniform(rng, 5.0),
            Band::Bluetooth => 20.0 + uniform(rng, 10.0),
            Band::Cellular => 30.0 + 5.0 * (0.5 * t).sin() + uniform(rng, 5.0),
            Band::Gps => -60.0 + uniform(rng, 3.0),
            Band::Weather => 45.0 + uniform(rng, 2.0),
            Band::QuietZone => -80.0 + uniform(rng, 5.0),
            Band::Spike => 50.0 + uniform(rng, 10.0),
            Band::Background => -50.0 + 10.0 * (0.1 * t).sin() + uniform(rng, 10.0),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::Fm => "fm",
            Band::Wifi => "wifi",
            Band::Am => "am",
            Band::Bluetooth => "bluetooth",
            Band::Cellular => "cellular",
            Band::Gps => "gps",
            Band::Weather => "weather",
            Band::QuietZone => "quiet_zone",
            Band::Spike => "spike",
            Band::Background => "background",
        };
        f.write_str(name)
    }
}
