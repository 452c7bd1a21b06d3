// Gravity Model - Earth constant bundles for the propagator
// Three named presets; pure data, never mutated after construction

use serde::{Deserialize, Serialize};

/// Earth constants consumed by the propagator.
///
/// `xke` is the square root of the gravitational parameter expressed in
/// Earth radii and minutes (60/sqrt(r³/μ)); `tumin` is its reciprocal,
/// the length of one canonical time unit in minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GravityModel {
    /// Minutes in one time unit
    pub tumin: f64,
    /// Earth gravitational parameter (km³/s²)
    pub mu: f64,
    /// Earth equatorial radius (km)
    pub radius_earth_km: f64,
    /// Reciprocal of tumin
    pub xke: f64,
    /// Un-normalized second zonal harmonic
    pub j2: f64,
    /// Un-normalized third zonal harmonic
    pub j3: f64,
    /// Un-normalized fourth zonal harmonic
    pub j4: f64,
    /// J3 divided by J2
    pub j3oj2: f64,
}

/// Selector for the constant bundle. WGS-72 is the common choice for
/// TLE work; WGS-72-old keeps the historical hard-coded xke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityVariant {
    Wgs72Old,
    Wgs72,
    Wgs84,
}

impl GravityVariant {
    pub fn constants(self) -> GravityModel {
        match self {
            GravityVariant::Wgs72Old => {
                let mu = 398600.79964;
                let radius_earth_km = 6378.135;
                // historical value, not re-derived from mu
                let xke = 0.0743669161;
                let j2 = 0.001082616;
                let j3 = -0.00000253881;
                GravityModel {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4: -0.00000165597,
                    j3oj2: j3 / j2,
                }
            }
            GravityVariant::Wgs72 => {
                let mu = 398600.8;
                let radius_earth_km = 6378.135_f64;
                let xke = 60.0
                    / (radius_earth_km * radius_earth_km * radius_earth_km / mu).sqrt();
                let j2 = 0.001082616;
                let j3 = -0.00000253881;
                GravityModel {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4: -0.00000165597,
                    j3oj2: j3 / j2,
                }
            }
            GravityVariant::Wgs84 => {
                let mu = 398600.5;
                let radius_earth_km = 6378.137_f64;
                let xke = 60.0
                    / (radius_earth_km * radius_earth_km * radius_earth_km / mu).sqrt();
                let j2 = 0.00108262998905;
                let j3 = -0.00000253215306;
                GravityModel {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4: -0.00000161098761,
                    j3oj2: j3 / j2,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs72_xke_matches_mu() {
        let g = GravityVariant::Wgs72.constants();
        let expected = 60.0 / (g.radius_earth_km.powi(3) / g.mu).sqrt();
        assert!((g.xke - expected).abs() < 1e-15);
        assert!((g.tumin * g.xke - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_wgs72old_keeps_historical_xke() {
        let g = GravityVariant::Wgs72Old.constants();
        assert!((g.xke - 0.0743669161).abs() < 1e-15);
    }

    #[test]
    fn test_j3oj2_ratio() {
        for variant in [
            GravityVariant::Wgs72Old,
            GravityVariant::Wgs72,
            GravityVariant::Wgs84,
        ] {
            let g = variant.constants();
            assert!((g.j3oj2 - g.j3 / g.j2).abs() < 1e-18);
            assert!(g.j3oj2 < 0.0);
        }
    }

    #[test]
    fn test_variants_differ() {
        let w72 = GravityVariant::Wgs72.constants();
        let w84 = GravityVariant::Wgs84.constants();
        assert!(w72.radius_earth_km != w84.radius_earth_km);
        assert!(w72.j2 != w84.j2);
    }
}
