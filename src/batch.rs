// Batch propagation over a shared time grid
// Shapes are validated up front; per-satellite failures stay soft and
// land in the individual predictions, never aborting the rest

use crate::error::ShapeError;
use crate::propagator::{Prediction, Satellite};

impl Satellite {
    /// Propagate one satellite across a series of split Julian dates.
    ///
    /// `jd` and `fraction` are parallel arrays; a length mismatch is
    /// rejected before any propagation runs.
    pub fn propagate_series(
        &mut self,
        jd: &[f64],
        fraction: &[f64],
    ) -> Result<Vec<Prediction>, ShapeError> {
        if jd.len() != fraction.len() {
            return Err(ShapeError::TimeLengthMismatch {
                jd: jd.len(),
                fraction: fraction.len(),
            });
        }
        Ok(jd
            .iter()
            .zip(fraction)
            .map(|(&j, &f)| self.propagate_at(j, f))
            .collect())
    }
}

/// Propagate every satellite over every instant of a shared time grid.
///
/// The result is satellite-major: `grid[i][j]` is satellite `i` at
/// instant `j`, identical to what the single-satellite calls would
/// produce in the same order. Records are independent, so callers that
/// want parallelism can split the slice across threads and call this
/// (or `propagate_series`) per chunk.
pub fn propagate_grid(
    satellites: &mut [Satellite],
    jd: &[f64],
    fraction: &[f64],
) -> Result<Vec<Vec<Prediction>>, ShapeError> {
    if jd.len() != fraction.len() {
        return Err(ShapeError::TimeLengthMismatch {
            jd: jd.len(),
            fraction: fraction.len(),
        });
    }
    log::debug!(
        "propagating {} satellites over {} instants",
        satellites.len(),
        jd.len()
    );
    Ok(satellites
        .iter_mut()
        .map(|sat| {
            jd.iter()
                .zip(fraction)
                .map(|(&j, &f)| sat.propagate_at(j, f))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Epoch, OperationMode, OrbitalElements};
    use crate::error::ErrorCode;
    use crate::gravity::GravityVariant;
    use std::f64::consts::PI;

    fn sample_fleet() -> Vec<Satellite> {
        let two_pi = 2.0 * PI;
        let epoch = Epoch::new(2451722.5, 0.78495062);
        let vanguard = OrbitalElements {
            catalog_number: "00005".to_string(),
            epoch,
            bstar: 2.8098e-5,
            eccentricity: 0.1859667,
            arg_perigee: 331.7664_f64.to_radians(),
            inclination: 34.2682_f64.to_radians(),
            mean_anomaly: 19.3264_f64.to_radians(),
            mean_motion: 10.82419157 * two_pi / 1440.0,
            raan: 348.7242_f64.to_radians(),
            ..Default::default()
        };
        let geo = OrbitalElements {
            epoch,
            eccentricity: 0.001,
            inclination: 0.05,
            mean_motion: two_pi / 1436.0,
            raan: 1.0,
            ..Default::default()
        };
        let molniya = OrbitalElements {
            epoch,
            eccentricity: 0.7,
            inclination: 63.4_f64.to_radians(),
            arg_perigee: 270.0_f64.to_radians(),
            mean_anomaly: 0.1,
            mean_motion: 2.0 * two_pi / 1440.0,
            ..Default::default()
        };
        [vanguard, geo, molniya]
            .into_iter()
            .map(|el| Satellite::new(el, GravityVariant::Wgs72, OperationMode::Improved))
            .collect()
    }

    fn grid_times(epoch: Epoch) -> (Vec<f64>, Vec<f64>) {
        let jd = vec![epoch.jd; 4];
        let fraction = (0..4)
            .map(|i| epoch.fraction + i as f64 * 0.25)
            .collect::<Vec<_>>();
        (jd, fraction)
    }

    #[test]
    fn test_grid_matches_single_calls() {
        let mut fleet = sample_fleet();
        let epoch = fleet[0].elements.epoch;
        let (jd, fraction) = grid_times(epoch);
        let grid = propagate_grid(&mut fleet, &jd, &fraction).unwrap();
        assert_eq!(grid.len(), 3);

        let mut fresh = sample_fleet();
        for (i, sat) in fresh.iter_mut().enumerate() {
            assert_eq!(grid[i].len(), 4);
            for (j, (&j_day, &j_frac)) in jd.iter().zip(&fraction).enumerate() {
                let single = sat.propagate_at(j_day, j_frac);
                assert_eq!(grid[i][j].position, single.position, "sat {} time {}", i, j);
                assert_eq!(grid[i][j].velocity, single.velocity, "sat {} time {}", i, j);
                assert_eq!(grid[i][j].error, single.error);
            }
        }
    }

    #[test]
    fn test_series_matches_grid_row() {
        let mut fleet = sample_fleet();
        let epoch = fleet[0].elements.epoch;
        let (jd, fraction) = grid_times(epoch);
        let row = fleet[1].propagate_series(&jd, &fraction).unwrap();
        let grid = propagate_grid(&mut sample_fleet(), &jd, &fraction).unwrap();
        for (a, b) in row.iter().zip(&grid[1]) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut fleet = sample_fleet();
        let jd = vec![2451722.5; 3];
        let fraction = vec![0.5; 2];
        assert!(propagate_grid(&mut fleet, &jd, &fraction).is_err());
        assert!(fleet[0].propagate_series(&jd, &fraction).is_err());
    }

    #[test]
    fn test_bad_satellite_does_not_poison_batch() {
        let mut fleet = sample_fleet();
        // a record rejected at init still occupies its row
        let broken = OrbitalElements {
            epoch: fleet[0].elements.epoch,
            mean_motion: 0.0,
            ..Default::default()
        };
        fleet.push(Satellite::new(
            broken,
            GravityVariant::Wgs72,
            OperationMode::Improved,
        ));
        let epoch = fleet[0].elements.epoch;
        let (jd, fraction) = grid_times(epoch);
        let grid = propagate_grid(&mut fleet, &jd, &fraction).unwrap();
        assert_eq!(grid.len(), 4);
        for p in &grid[3] {
            assert_eq!(p.error, ErrorCode::SubOrbital);
            assert!(p.position[0].is_nan());
        }
        for p in &grid[0] {
            assert!(p.error.is_ok());
            assert!(p.position[0].is_finite());
        }
    }

    #[test]
    fn test_records_propagate_across_threads() {
        let fleet = sample_fleet();
        let epoch = fleet[0].elements.epoch;
        let (jd, fraction) = grid_times(epoch);

        let sequential = propagate_grid(&mut sample_fleet(), &jd, &fraction).unwrap();
        let handles: Vec<_> = fleet
            .into_iter()
            .map(|mut sat| {
                let jd = jd.clone();
                let fraction = fraction.clone();
                std::thread::spawn(move || sat.propagate_series(&jd, &fraction).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let row = handle.join().unwrap();
            for (a, b) in row.iter().zip(&sequential[i]) {
                assert_eq!(a.position, b.position);
                assert_eq!(a.velocity, b.velocity);
            }
        }
    }
}
