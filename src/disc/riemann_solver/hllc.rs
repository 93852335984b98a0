use super::RiemannSolver;
use crate::{
    disc::{
        flux::flux1d,
        state::{Extensive, Primitive},
    },
    error::HydroError,
};

/// HLLC approximate solver with pressure-based wave speed estimates.
#[derive(Clone, Copy, Debug)]
pub struct Hllc {
    pub hcr: f64,
}
impl Hllc {
    pub fn new(hcr: f64) -> Self {
        Self { hcr }
    }
}
impl RiemannSolver for Hllc {
    fn solve(&self, left: &Primitive, right: &Primitive) -> Result<Extensive, HydroError> {
        let hcr = self.hcr;
        for w in [left, right] {
            if !w.is_physical() {
                return Err(HydroError::InvalidRiemannInput {
                    density: w.density,
                    pressure: w.pressure,
                });
            }
        }
        let (ul, ur) = (left.velocity, right.velocity);
        let (pl, pr) = (left.pressure, right.pressure);
        let (dl, dr) = (left.density, right.density);
        let el = 0.5 * dl * ul * ul + pl / (hcr - 1.0);
        let er = 0.5 * dr * ur * ur + pr / (hcr - 1.0);
        let cl = (hcr * pl / dl).sqrt();
        let cr = (hcr * pr / dr).sqrt();
        let fl = flux1d(left, hcr);
        let fr = flux1d(right, hcr);
        let p_star = {
            let zeta = (hcr - 1.0) / (2.0 * hcr);
            let numerator = (cl + cr - 0.5 * (hcr - 1.0) * (ur - ul)).max(0.0);
            (numerator / (cl / pl.powf(zeta) + cr / pr.powf(zeta))).powf(1.0 / zeta)
        };
        let sl = {
            let ql_lower = if p_star <= pl {
                1.0
            } else {
                (1.0 + (hcr + 1.0) / (2.0 * hcr) * (p_star / pl - 1.0)).sqrt()
            };
            ul - cl * ql_lower
        };
        let sr = {
            let qr_lower = if p_star <= pr {
                1.0
            } else {
                (1.0 + (hcr + 1.0) / (2.0 * hcr) * (p_star / pr - 1.0)).sqrt()
            };
            ur + cr * qr_lower
        };
        if sl >= 0.0 {
            return Ok(fl);
        }
        if sr <= 0.0 {
            return Ok(fr);
        }
        let s_star = (pr - pl + dl * ul * (sl - ul) - dr * ur * (sr - ur))
            / (dl * (sl - ul) - dr * (sr - ur));
        let star = |d: f64, u: f64, p: f64, e: f64, s: f64| {
            let factor = d * (s - u) / (s - s_star);
            Extensive::new(
                factor,
                factor * s_star,
                factor * (e / d + (s_star - u) * (s_star + p / (d * (s - u)))),
            )
        };
        if s_star >= 0.0 {
            let q_star = star(dl, ul, pl, el, sl);
            let ql = Extensive::new(dl, dl * ul, el);
            Ok(fl + (q_star - ql) * sl)
        } else {
            let q_star = star(dr, ur, pr, er, sr);
            let qr = Extensive::new(dr, dr * ur, er);
            Ok(fr + (q_star - qr) * sr)
        }
    }
}
