use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1};

use super::{SourceTerm, orbit::ParabolicOrbit};
use crate::{
    disc::state::{Extensive, Primitive},
    error::HydroError,
    lane_emden::{LaneEmdenTable, linear_interpolation},
};

/// Self-gravity of the unperturbed polytrope plus the tidal pull of a point mass on a
/// parabolic orbit.
///
/// The self-gravity profile is frozen at construction: it is the hydrostatic field of the
/// initial star evaluated at the cell centres. The point mass sits at distance `R(f)` on
/// the axis perpendicular to the radial coordinate, so its pull is
/// `-M_bh x / (R^2 + x^2)^(3/2)`.
#[derive(Clone, Debug)]
pub struct Gravity {
    self_acceleration: Array1<f64>,
    self_gravity: bool,
    orbit: Option<ParabolicOrbit>,
}
impl Gravity {
    pub fn new(
        table: &LaneEmdenTable,
        star_mass: f64,
        star_radius: f64,
        edges: ArrayView1<f64>,
        self_gravity: bool,
        orbit: Option<ParabolicOrbit>,
    ) -> Result<Self, HydroError> {
        let central_density = table.central_density(star_mass, star_radius);
        let (xi_surface, _) = table.surface();
        let alpha = star_radius / xi_surface;
        let cell_num = edges.len() - 1;
        let mut self_acceleration = Array1::zeros(cell_num);
        for i in 0..cell_num {
            let x = 0.5 * (edges[i + 1] + edges[i]);
            let xi = (x / alpha).min(xi_surface - 1e-6);
            let dtheta = linear_interpolation(&table.xi, &table.dtheta, xi)?;
            let enclosed_mass = -central_density * alpha.powi(3) * 4.0 * PI * dtheta * xi * xi;
            self_acceleration[i] = -enclosed_mass / (x * x);
        }
        Ok(Self {
            self_acceleration,
            self_gravity,
            orbit,
        })
    }
    pub fn self_acceleration(&self) -> ArrayView1<f64> {
        self.self_acceleration.view()
    }
    pub fn orbit(&self) -> Option<&ParabolicOrbit> {
        self.orbit.as_ref()
    }
    /// Acceleration of cell `i` centred at `x`, with the point mass at true anomaly
    /// `anomaly` (ignored without an orbit).
    pub fn acceleration(&self, i: usize, x: f64, anomaly: f64) -> f64 {
        let mut acc = if self.self_gravity {
            self.self_acceleration[i]
        } else {
            0.0
        };
        if let Some(orbit) = &self.orbit {
            let separation = orbit.separation(anomaly);
            acc -= orbit.black_hole_mass * x * (separation * separation + x * x).sqrt().powi(-3);
        }
        acc
    }
    /// Kicks `extensives` with the force at a known anomaly.
    ///
    /// The work term uses the velocity of `cells`, i.e. before the kick.
    pub fn apply_at_anomaly(
        &self,
        edges: ArrayView1<f64>,
        cells: ArrayView1<Primitive>,
        anomaly: f64,
        extensives: &mut Array1<Extensive>,
        dt: f64,
    ) {
        for (i, (extensive, cell)) in extensives.iter_mut().zip(cells.iter()).enumerate() {
            let x = 0.5 * (edges[i + 1] + edges[i]);
            let impulse = extensive.mass * self.acceleration(i, x, anomaly) * dt;
            extensive.momentum += impulse;
            extensive.energy += impulse * cell.velocity;
        }
    }
}
impl SourceTerm for Gravity {
    fn calc_force(
        &self,
        edges: ArrayView1<f64>,
        cells: ArrayView1<Primitive>,
        time: f64,
        extensives: &mut Array1<Extensive>,
        dt: f64,
    ) -> Result<(), HydroError> {
        let anomaly = match &self.orbit {
            Some(orbit) => orbit.true_anomaly(time)?,
            None => 0.0,
        };
        self.apply_at_anomaly(edges, cells, anomaly, extensives, dt);
        Ok(())
    }
}
