use std::f64::consts::PI;

use crate::error::HydroError;

/// Parabolic orbit of the external point mass around the star, `t = 0` at pericentre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParabolicOrbit {
    pub pericenter: f64,
    pub black_hole_mass: f64,
}
impl ParabolicOrbit {
    const TOLERANCE: f64 = 1e-6;
    const MAX_BISECTIONS: usize = 200;

    pub fn new(pericenter: f64, black_hole_mass: f64) -> Self {
        Self {
            pericenter,
            black_hole_mass,
        }
    }
    /// Barker's equation, `t(f) = sqrt(2 Rp^3 / M) tan(f/2) (3 + tan^2(f/2)) / 3`.
    pub fn time_from_anomaly(&self, anomaly: f64) -> f64 {
        let tan_half = (0.5 * anomaly).tan();
        (2.0 * self.pericenter.powi(3) / self.black_hole_mass).sqrt()
            * tan_half
            * (3.0 + tan_half * tan_half)
            / 3.0
    }
    /// Inverts [`Self::time_from_anomaly`] by bisection on `[-pi, pi]`.
    pub fn true_anomaly(&self, time: f64) -> Result<f64, HydroError> {
        self.bisect_anomaly(time, Self::MAX_BISECTIONS)
    }
    fn bisect_anomaly(&self, time: f64, max_bisections: usize) -> Result<f64, HydroError> {
        let residual = |f: f64| time - self.time_from_anomaly(f);
        let (mut lower, mut upper) = (-PI, PI);
        let mut lower_residual = residual(lower);
        if !time.is_finite() || lower_residual * residual(upper) > 0.0 {
            return Err(HydroError::OrbitNotConverged { time });
        }
        for _ in 0..max_bisections {
            let middle = 0.5 * (lower + upper);
            if upper - lower <= Self::TOLERANCE {
                return Ok(middle);
            }
            let middle_residual = residual(middle);
            if middle_residual == 0.0 {
                return Ok(middle);
            }
            if (middle_residual > 0.0) == (lower_residual > 0.0) {
                lower = middle;
                lower_residual = middle_residual;
            } else {
                upper = middle;
            }
        }
        Err(HydroError::OrbitNotConverged { time })
    }
    /// Distance between the star and the point mass at the given anomaly.
    pub fn separation(&self, anomaly: f64) -> f64 {
        2.0 * self.pericenter / (1.0 + anomaly.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn orbit() -> ParabolicOrbit {
        // Rt for a solar star around 1e6 solar masses, beta = 1
        ParabolicOrbit::new(100.0, 1e6)
    }

    #[test]
    fn test_pericentre_passage() {
        let orbit = orbit();
        let anomaly = orbit.true_anomaly(0.0).unwrap();
        assert!(anomaly.abs() <= 1e-6);
        assert!(orbit.time_from_anomaly(anomaly).abs() <= 1e-6);
        assert_relative_eq!(orbit.separation(anomaly), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_inverts_barker_equation() {
        let orbit = orbit();
        for f in [-2.5, -1.0, -0.1, 0.7, 2.0] {
            let t = orbit.time_from_anomaly(f);
            let anomaly = orbit.true_anomaly(t).unwrap();
            assert!((anomaly - f).abs() <= 1e-6, "f = {f}, got {anomaly}");
        }
    }

    #[test]
    fn test_approach_before_pericentre() {
        let orbit = orbit();
        let beta = 2.0;
        let f0 = -(2.0 / beta - 1.0_f64).acos();
        let t0 = orbit.time_from_anomaly(f0);
        assert!(t0 < 0.0);
        assert_relative_eq!(orbit.separation(f0), 200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_nan_time() {
        assert!(matches!(
            orbit().true_anomaly(f64::NAN),
            Err(HydroError::OrbitNotConverged { .. })
        ));
    }

    #[test]
    fn test_bisection_limit_is_reported() {
        let orbit = orbit();
        let t = orbit.time_from_anomaly(-1.0);
        // [-pi, pi] is below the tolerance only after 23 halvings
        for limit in [3, 23] {
            assert!(matches!(
                orbit.bisect_anomaly(t, limit),
                Err(HydroError::OrbitNotConverged { .. })
            ));
        }
        let anomaly = orbit.bisect_anomaly(t, 24).unwrap();
        assert!((anomaly + 1.0).abs() <= 1e-6);
    }
}
