// Orbital elements and epoch handling
// Already-parsed numeric inputs only; no text scanning happens here

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Minutes in one day
pub const MINUTES_PER_DAY: f64 = 1440.0;

// =============================================================================
// EPOCH
// =============================================================================

/// Satellite epoch as a split Julian date.
///
/// The split (whole day, day fraction) form preserves sub-microsecond
/// precision that a single f64 Julian date cannot. The fraction is kept
/// in [0, 1); construction re-normalizes any overflow into the day part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    /// Whole Julian day (conventionally ends in .5, i.e. midnight)
    pub jd: f64,
    /// Fraction of the day, in [0, 1)
    pub fraction: f64,
}

impl Epoch {
    pub fn new(jd: f64, fraction: f64) -> Self {
        let mut whole = jd;
        let mut frac = fraction;
        if !(0.0..1.0).contains(&frac) {
            let carry = frac.floor();
            whole += carry;
            frac -= carry;
        }
        Self {
            jd: whole,
            fraction: frac,
        }
    }

    /// Days since 1950 January 0.0 (JD 2433281.5), the time origin the
    /// propagator's sidereal-time and lunar/solar polynomials use.
    pub fn days_since_1950(&self) -> f64 {
        self.jd + self.fraction - 2433281.5
    }

    /// Minutes from this epoch to the instant (jd, fraction).
    pub fn minutes_to(&self, jd: f64, fraction: f64) -> f64 {
        (jd - self.jd) * MINUTES_PER_DAY + (fraction - self.fraction) * MINUTES_PER_DAY
    }
}

// =============================================================================
// OPERATING MODE
// =============================================================================

/// Propagator operating mode.
///
/// `Afspc` reproduces the legacy Air Force Space Command behavior
/// (old sidereal-time polynomial, historical Lyddane node handling);
/// `Improved` uses the modern conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationMode {
    Afspc,
    Improved,
}

// =============================================================================
// MEAN ELEMENTS AT EPOCH
// =============================================================================

/// One satellite's mean orbital elements at epoch, plus TLE identity
/// fields. Angles are radians, mean motion is radians per minute in the
/// Kozai convention, B* is in inverse Earth radii.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Catalog number; either the legacy 5-digit form or Alpha-5
    pub catalog_number: String,
    /// International designator (launch year/number/piece)
    pub international_designator: String,
    /// Security classification character
    pub classification: char,
    pub epoch: Epoch,
    /// Drag term B* (1/Earth radii)
    pub bstar: f64,
    /// First derivative of mean motion (rad/min²); carried, not used
    pub ndot: f64,
    /// Second derivative of mean motion (rad/min³); carried, not used
    pub nddot: f64,
    /// Eccentricity (0-1)
    pub eccentricity: f64,
    /// Argument of perigee (radians)
    pub arg_perigee: f64,
    /// Inclination (radians)
    pub inclination: f64,
    /// Mean anomaly (radians)
    pub mean_anomaly: f64,
    /// Mean motion, Kozai convention (radians/minute)
    pub mean_motion: f64,
    /// Right ascension of ascending node (radians)
    pub raan: f64,
    pub element_set_number: u32,
    pub ephemeris_type: u8,
    /// Revolution number at epoch
    pub rev_at_epoch: u32,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            catalog_number: "00000".to_string(),
            international_designator: String::new(),
            classification: 'U',
            epoch: Epoch::new(2451544.5, 0.0),
            bstar: 0.0,
            ndot: 0.0,
            nddot: 0.0,
            eccentricity: 0.0,
            arg_perigee: 0.0,
            inclination: 0.0,
            mean_anomaly: 0.0,
            mean_motion: 0.0,
            raan: 0.0,
            element_set_number: 0,
            ephemeris_type: 0,
            rev_at_epoch: 0,
        }
    }
}

impl OrbitalElements {
    /// Catalog number as an integer, decoding Alpha-5 if needed.
    pub fn catalog_number_value(&self) -> Option<u32> {
        from_alpha5(&self.catalog_number)
    }
}

// =============================================================================
// ALPHA-5 CATALOG NUMBERS
// =============================================================================

/// Decode a catalog number string; a leading letter selects the Alpha-5
/// extension (letters I and O are skipped to avoid digit confusion).
pub fn from_alpha5(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let first = chars.next()?;
    if first.is_ascii_digit() {
        return s.trim().parse().ok();
    }
    if !first.is_ascii_uppercase() || first == 'I' || first == 'O' {
        return None;
    }
    let mut n = first as u32 - 'A' as u32 + 10;
    if first > 'I' {
        n -= 1;
    }
    if first > 'O' {
        n -= 1;
    }
    let rest: u32 = chars.as_str().parse().ok()?;
    if rest > 9999 {
        return None;
    }
    Some(n * 10000 + rest)
}

/// Encode a catalog number into its 5-character form. Numbers above
/// 339999 (Alpha-5 'Z9999') do not fit.
pub fn to_alpha5(n: u32) -> Option<String> {
    if n < 100000 {
        return Some(format!("{:05}", n));
    }
    if n > 339999 {
        return None;
    }
    let mut i = (n / 10000) as u8 + b'A' - 10;
    if i >= b'I' {
        i += 1;
    }
    if i >= b'O' {
        i += 1;
    }
    Some(format!("{}{:04}", i as char, n % 10000))
}

// =============================================================================
// SIDEREAL TIME
// =============================================================================

/// Greenwich sidereal time (radians, 0..2π) from a UT1 Julian date,
/// IAU-82 polynomial.
pub fn gstime(jdut1: f64) -> f64 {
    let tut1 = (jdut1 - 2451545.0) / 36525.0;
    let mut temp = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841; // seconds
    // 360/86400 = 1/240 converts seconds of time to degrees
    temp = (temp * (PI / 180.0) / 240.0) % TWO_PI;
    if temp < 0.0 {
        temp += TWO_PI;
    }
    temp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_fraction_normalized() {
        let e = Epoch::new(2451723.5, 1.25);
        assert!((e.jd - 2451724.5).abs() < 1e-12);
        assert!((e.fraction - 0.25).abs() < 1e-12);

        let e = Epoch::new(2451723.5, -0.25);
        assert!((e.jd - 2451722.5).abs() < 1e-12);
        assert!((e.fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_epoch_minutes_to() {
        let e = Epoch::new(2451723.5, 0.5);
        // one day later
        assert!((e.minutes_to(2451724.5, 0.5) - 1440.0).abs() < 1e-9);
        // half a day earlier
        assert!((e.minutes_to(2451723.5, 0.0) + 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_gstime_j2000() {
        // GST at the J2000 epoch (JD 2451545.0) is about 280.46 degrees
        let g = gstime(2451545.0);
        let deg = g.to_degrees();
        assert!((deg - 280.46).abs() < 0.01, "gst at J2000: {} deg", deg);
    }

    #[test]
    fn test_gstime_range() {
        for jd in [2433281.5, 2451723.28495062, 2460000.0] {
            let g = gstime(jd);
            assert!((0.0..TWO_PI).contains(&g));
        }
    }

    #[test]
    fn test_alpha5_legacy_digits() {
        assert_eq!(from_alpha5("25544"), Some(25544));
        assert_eq!(to_alpha5(25544).unwrap(), "25544");
    }

    #[test]
    fn test_alpha5_extended() {
        // 'A' = 10, so A0000 is 100000; letters I and O are skipped
        assert_eq!(from_alpha5("A0000"), Some(100000));
        assert_eq!(from_alpha5("J2345"), Some(182345));
        assert_eq!(from_alpha5("Z9999"), Some(339999));
        assert_eq!(to_alpha5(100000).unwrap(), "A0000");
        assert_eq!(to_alpha5(182345).unwrap(), "J2345");
        assert_eq!(to_alpha5(339999).unwrap(), "Z9999");
        assert_eq!(to_alpha5(340000), None);
    }

    #[test]
    fn test_alpha5_round_trip() {
        for n in [0, 99999, 100000, 148493, 245000, 339999] {
            let s = to_alpha5(n).unwrap();
            assert_eq!(from_alpha5(&s), Some(n), "round trip of {}", n);
        }
    }

    #[test]
    fn test_elements_serde_round_trip() {
        // Persistence is the caller's job; the derives must preserve
        // every field exactly.
        let mut elements = OrbitalElements::default();
        elements.catalog_number = "00005".to_string();
        elements.eccentricity = 0.1859667;
        elements.mean_motion = 0.047206302;
        elements.epoch = Epoch::new(2451722.5, 0.78495062);
        let json = serde_json::to_string(&elements).unwrap();
        let back: OrbitalElements = serde_json::from_str(&json).unwrap();
        assert_eq!(back.catalog_number, elements.catalog_number);
        assert_eq!(back.eccentricity, elements.eccentricity);
        assert_eq!(back.mean_motion, elements.mean_motion);
        assert_eq!(back.epoch, elements.epoch);
    }
}
