//! Exact solution of the Riemann problem for an ideal gas.
//!
//! The star-region pressure is found by Newton iteration on the sum of the left and right
//! wave functions (shock or rarefaction branch depending on the trial pressure). The
//! solution is then sampled on the interface `x / t = 0`. A pair of rarefactions that
//! would need negative pressure produces a vacuum region, which carries no flux.
use super::RiemannSolver;
use crate::{
    disc::{
        flux::flux1d,
        state::{Extensive, Primitive},
    },
    error::HydroError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarState {
    pub pressure: f64,
    pub velocity: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct ExactRiemannSolver {
    pub hcr: f64,
    /// Relative pressure change at which the iteration stops.
    pub tolerance: f64,
    pub max_iterations: usize,
}
impl ExactRiemannSolver {
    pub fn new(hcr: f64) -> Self {
        Self {
            hcr,
            tolerance: 1e-6,
            max_iterations: 200,
        }
    }
    fn sound_speed(&self, w: &Primitive) -> f64 {
        (self.hcr * w.pressure / w.density).sqrt()
    }
    fn check_input(w: &Primitive) -> Result<(), HydroError> {
        if w.is_physical() {
            Ok(())
        } else {
            Err(HydroError::InvalidRiemannInput {
                density: w.density,
                pressure: w.pressure,
            })
        }
    }
    /// Wave function of one side and its derivative with respect to `p`.
    fn pressure_function(&self, p: f64, w: &Primitive, c: f64) -> (f64, f64) {
        let g = self.hcr;
        if p <= w.pressure {
            let ratio = p / w.pressure;
            let f = 2.0 / (g - 1.0) * c * (ratio.powf((g - 1.0) / (2.0 * g)) - 1.0);
            let df = ratio.powf(-(g + 1.0) / (2.0 * g)) / (w.density * c);
            (f, df)
        } else {
            let a = 2.0 / ((g + 1.0) * w.density);
            let b = (g - 1.0) / (g + 1.0) * w.pressure;
            let q = (a / (b + p)).sqrt();
            let f = (p - w.pressure) * q;
            let df = (1.0 - 0.5 * (p - w.pressure) / (b + p)) * q;
            (f, df)
        }
    }
    /// Starting pressure from the primitive-variable, two-rarefaction or two-shock
    /// approximation.
    fn guess_pressure(&self, l: &Primitive, r: &Primitive, cl: f64, cr: f64, floor: f64) -> f64 {
        let g = self.hcr;
        let z = (g - 1.0) / (2.0 * g);
        let cup = 0.25 * (l.density + r.density) * (cl + cr);
        let ppv = (0.5 * (l.pressure + r.pressure) + 0.5 * (l.velocity - r.velocity) * cup).max(0.0);
        let pmin = l.pressure.min(r.pressure);
        let pmax = l.pressure.max(r.pressure);
        let guess = if pmax / pmin <= 2.0 && pmin <= ppv && ppv <= pmax {
            ppv
        } else if ppv < pmin {
            let pq = (l.pressure / r.pressure).powf(z);
            let um = (pq * l.velocity / cl + r.velocity / cr + 2.0 / (g - 1.0) * (pq - 1.0))
                / (pq / cl + 1.0 / cr);
            let ptl = 1.0 + 0.5 * (g - 1.0) * (l.velocity - um) / cl;
            let ptr = 1.0 + 0.5 * (g - 1.0) * (um - r.velocity) / cr;
            0.5 * (l.pressure * ptl.powf(1.0 / z) + r.pressure * ptr.powf(1.0 / z))
        } else {
            let gel = (2.0 / ((g + 1.0) * l.density) / ((g - 1.0) / (g + 1.0) * l.pressure + ppv)).sqrt();
            let ger = (2.0 / ((g + 1.0) * r.density) / ((g - 1.0) / (g + 1.0) * r.pressure + ppv)).sqrt();
            (gel * l.pressure + ger * r.pressure - (r.velocity - l.velocity)) / (gel + ger)
        };
        if guess.is_finite() { guess.max(floor) } else { ppv.max(floor) }
    }
    /// Pressure and velocity between the two nonlinear waves, or `None` when the two
    /// rarefactions separate into vacuum.
    pub fn star_state(&self, l: &Primitive, r: &Primitive) -> Result<Option<StarState>, HydroError> {
        Self::check_input(l)?;
        Self::check_input(r)?;
        let cl = self.sound_speed(l);
        let cr = self.sound_speed(r);
        let du = r.velocity - l.velocity;
        if 2.0 / (self.hcr - 1.0) * (cl + cr) <= du {
            return Ok(None);
        }
        let floor = self.tolerance * l.pressure.min(r.pressure);
        let mut p_old = self.guess_pressure(l, r, cl, cr, floor);
        for _ in 0..self.max_iterations {
            let (fl, dfl) = self.pressure_function(p_old, l, cl);
            let (fr, dfr) = self.pressure_function(p_old, r, cr);
            let mut p = p_old - (fl + fr + du) / (dfl + dfr);
            if !(p > 0.0) {
                p = floor;
            }
            let change = 2.0 * (p - p_old).abs() / (p + p_old);
            if change <= self.tolerance {
                let (fl, _) = self.pressure_function(p, l, cl);
                let (fr, _) = self.pressure_function(p, r, cr);
                return Ok(Some(StarState {
                    pressure: p,
                    velocity: 0.5 * (l.velocity + r.velocity + fr - fl),
                }));
            }
            p_old = p;
        }
        Err(HydroError::RiemannNotConverged {
            iterations: self.max_iterations,
            pressure: p_old,
        })
    }
    fn left_fan(&self, l: &Primitive, cl: f64, s: f64) -> Primitive {
        let g = self.hcr;
        let c = 2.0 / (g + 1.0) * (cl + 0.5 * (g - 1.0) * (l.velocity - s));
        let u = 2.0 / (g + 1.0) * (cl + 0.5 * (g - 1.0) * l.velocity + s);
        self.state(
            l.density * (c / cl).powf(2.0 / (g - 1.0)),
            l.pressure * (c / cl).powf(2.0 * g / (g - 1.0)),
            u,
        )
    }
    fn right_fan(&self, r: &Primitive, cr: f64, s: f64) -> Primitive {
        let g = self.hcr;
        let c = 2.0 / (g + 1.0) * (cr - 0.5 * (g - 1.0) * (r.velocity - s));
        let u = 2.0 / (g + 1.0) * (-cr + 0.5 * (g - 1.0) * r.velocity + s);
        self.state(
            r.density * (c / cr).powf(2.0 / (g - 1.0)),
            r.pressure * (c / cr).powf(2.0 * g / (g - 1.0)),
            u,
        )
    }
    fn state(&self, density: f64, pressure: f64, velocity: f64) -> Primitive {
        Primitive::new(density, pressure, velocity, pressure * density.powf(-self.hcr))
    }
    /// Self-similar solution at `x / t = s`. Vacuum is returned as the all-zero state.
    pub fn sample(&self, l: &Primitive, r: &Primitive, s: f64) -> Result<Primitive, HydroError> {
        let g = self.hcr;
        let cl = self.sound_speed(l);
        let cr = self.sound_speed(r);
        let Some(star) = self.star_state(l, r)? else {
            let head_left = l.velocity - cl;
            let front_left = l.velocity + 2.0 * cl / (g - 1.0);
            let front_right = r.velocity - 2.0 * cr / (g - 1.0);
            let head_right = r.velocity + cr;
            return Ok(if s <= head_left {
                *l
            } else if s < front_left {
                self.left_fan(l, cl, s)
            } else if s <= front_right {
                Primitive::default()
            } else if s < head_right {
                self.right_fan(r, cr, s)
            } else {
                *r
            });
        };
        let (pm, um) = (star.pressure, star.velocity);
        let w = if s <= um {
            if pm <= l.pressure {
                let ratio = pm / l.pressure;
                let head = l.velocity - cl;
                let tail = um - cl * ratio.powf((g - 1.0) / (2.0 * g));
                if s <= head {
                    *l
                } else if s > tail {
                    self.state(l.density * ratio.powf(1.0 / g), pm, um)
                } else {
                    self.left_fan(l, cl, s)
                }
            } else {
                let ratio = pm / l.pressure;
                let speed = l.velocity
                    - cl * ((g + 1.0) / (2.0 * g) * ratio + (g - 1.0) / (2.0 * g)).sqrt();
                if s <= speed {
                    *l
                } else {
                    let g6 = (g - 1.0) / (g + 1.0);
                    self.state(l.density * (ratio + g6) / (ratio * g6 + 1.0), pm, um)
                }
            }
        } else if pm > r.pressure {
            let ratio = pm / r.pressure;
            let speed =
                r.velocity + cr * ((g + 1.0) / (2.0 * g) * ratio + (g - 1.0) / (2.0 * g)).sqrt();
            if s >= speed {
                *r
            } else {
                let g6 = (g - 1.0) / (g + 1.0);
                self.state(r.density * (ratio + g6) / (ratio * g6 + 1.0), pm, um)
            }
        } else {
            let ratio = pm / r.pressure;
            let head = r.velocity + cr;
            let tail = um + cr * ratio.powf((g - 1.0) / (2.0 * g));
            if s >= head {
                *r
            } else if s <= tail {
                self.state(r.density * ratio.powf(1.0 / g), pm, um)
            } else {
                self.right_fan(r, cr, s)
            }
        };
        Ok(w)
    }
}
impl RiemannSolver for ExactRiemannSolver {
    fn solve(&self, left: &Primitive, right: &Primitive) -> Result<Extensive, HydroError> {
        let w = self.sample(left, right, 0.0)?;
        if w.density == 0.0 {
            return Ok(Extensive::default());
        }
        Ok(flux1d(&w, self.hcr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn prim(density: f64, velocity: f64, pressure: f64) -> Primitive {
        Primitive::new(density, pressure, velocity, 0.0)
    }

    #[test]
    fn test_sod_star_state() {
        let rs = ExactRiemannSolver::new(1.4);
        let star = rs
            .star_state(&prim(1.0, 0.0, 1.0), &prim(0.125, 0.0, 0.1))
            .unwrap()
            .unwrap();
        assert_relative_eq!(star.pressure, 0.30313, max_relative = 1e-4);
        assert_relative_eq!(star.velocity, 0.92745, max_relative = 1e-4);
        let w = rs.sample(&prim(1.0, 0.0, 1.0), &prim(0.125, 0.0, 0.1), 0.0).unwrap();
        assert_relative_eq!(w.density, 0.42632, max_relative = 1e-4);
    }

    #[test]
    fn test_strong_rarefactions() {
        let rs = ExactRiemannSolver::new(1.4);
        let star = rs
            .star_state(&prim(1.0, -2.0, 0.4), &prim(1.0, 2.0, 0.4))
            .unwrap()
            .unwrap();
        assert_relative_eq!(star.pressure, 0.00189, max_relative = 1e-2);
        assert!(star.velocity.abs() < 1e-12);
    }

    #[test]
    fn test_vacuum_generation_carries_no_flux() {
        let rs = ExactRiemannSolver::new(1.4);
        let l = prim(1.0, -10.0, 0.4);
        let r = prim(1.0, 10.0, 0.4);
        assert_eq!(rs.star_state(&l, &r).unwrap(), None);
        assert_eq!(rs.solve(&l, &r).unwrap(), Extensive::default());
    }

    #[test]
    fn test_uniform_state_flux() {
        let rs = ExactRiemannSolver::new(5.0 / 3.0);
        for w in [
            prim(1.0, 0.0, 1.0),
            prim(0.3, 0.4, 2.0),
            prim(2.0, -3.0, 0.5),
            prim(1e-3, 5.0, 1e-4),
        ] {
            let flux = rs.solve(&w, &w).unwrap();
            let expected = flux1d(&w, 5.0 / 3.0);
            assert_relative_eq!(flux.mass, expected.mass, max_relative = 1e-12);
            assert_relative_eq!(flux.momentum, expected.momentum, max_relative = 1e-12);
            assert_relative_eq!(flux.energy, expected.energy, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_reflected_state_has_no_mass_flux() {
        let rs = ExactRiemannSolver::new(5.0 / 3.0);
        let wall = prim(1.5, 0.7, 2.0);
        let mut ghost = wall;
        ghost.velocity = -wall.velocity;
        let flux = rs.solve(&ghost, &wall).unwrap();
        assert_eq!(flux.mass, 0.0);
        assert_eq!(flux.energy, 0.0);
        assert!(flux.momentum > 0.0);
    }

    #[test]
    fn test_near_vacuum_exterior() {
        let rs = ExactRiemannSolver::new(5.0 / 3.0);
        let flux = rs
            .solve(&prim(1e-3, 0.0, 1e-4), &prim(1e-25, 0.0, 1e-26))
            .unwrap();
        assert!(flux.mass.is_finite() && flux.mass > 0.0);
        assert!(flux.energy.is_finite() && flux.energy > 0.0);
    }

    #[test]
    fn test_rejects_negative_pressure() {
        let rs = ExactRiemannSolver::new(1.4);
        assert!(matches!(
            rs.solve(&prim(1.0, 0.0, -1.0), &prim(1.0, 0.0, 1.0)),
            Err(HydroError::InvalidRiemannInput { .. })
        ));
    }

    #[test]
    fn test_iteration_limit_is_reported() {
        let rs = ExactRiemannSolver {
            max_iterations: 3,
            ..ExactRiemannSolver::new(1.4)
        };
        assert!(matches!(
            rs.star_state(&prim(1.0, 0.0, 1.0), &prim(0.125, 0.0, 0.1)),
            Err(HydroError::RiemannNotConverged { iterations: 3, .. })
        ));
    }
}
