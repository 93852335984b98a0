//! Hydrostatic reference profile of a polytropic star.
//!
//! The Lane-Emden solution `theta(xi)` (and `dtheta/dxi`) of index `n` is either read
//! from three whitespace-separated tables or integrated numerically. Units are G = 1.
use std::{f64::consts::PI, fs, path::Path};

use crate::error::HydroError;

#[derive(Clone, Debug)]
pub struct LaneEmdenTable {
    pub xi: Vec<f64>,
    pub theta: Vec<f64>,
    pub dtheta: Vec<f64>,
}
impl LaneEmdenTable {
    pub fn from_files<P: AsRef<Path>>(
        xi_path: P,
        theta_path: P,
        dtheta_path: P,
    ) -> Result<Self, HydroError> {
        let table = Self {
            xi: read_vector(xi_path)?,
            theta: read_vector(theta_path)?,
            dtheta: read_vector(dtheta_path)?,
        };
        if table.xi.len() != table.theta.len() || table.xi.len() != table.dtheta.len() {
            return Err(HydroError::InvalidConfig(format!(
                "Lane-Emden tables have different lengths ({}, {}, {})",
                table.xi.len(),
                table.theta.len(),
                table.dtheta.len()
            )));
        }
        if table.xi.len() < 2 {
            return Err(HydroError::InvalidConfig(
                "Lane-Emden table needs at least two samples".to_string(),
            ));
        }
        Ok(table)
    }
    /// Loads `xsi.txt`, `theta.txt`, `dtheta.txt` from `dir`, or their `n3` variants for
    /// stars softer than `gamma = 1.6`.
    pub fn from_dir<P: AsRef<Path>>(dir: P, star_gamma: f64) -> Result<Self, HydroError> {
        let suffix = if star_gamma < 1.6 { "n3" } else { "" };
        let dir = dir.as_ref();
        Self::from_files(
            dir.join(format!("xsi{suffix}.txt")),
            dir.join(format!("theta{suffix}.txt")),
            dir.join(format!("dtheta{suffix}.txt")),
        )
    }
    /// Integrates `theta'' + 2 theta' / xi + theta^n = 0` with classical RK4 up to the
    /// last step before the first zero of `theta`.
    pub fn integrate(n: f64, step: f64) -> Result<Self, HydroError> {
        if !(0.0..5.0).contains(&n) || !(step > 0.0) {
            return Err(HydroError::InvalidConfig(format!(
                "Lane-Emden integration needs 0 <= n < 5 and a positive step (n = {n}, step = {step})"
            )));
        }
        let rhs = |xi: f64, y: [f64; 2]| [y[1], -y[0].max(0.0).powf(n) - 2.0 * y[1] / xi];
        let mut xi = step;
        let mut y = [
            1.0 - xi * xi / 6.0 + n * xi.powi(4) / 120.0,
            -xi / 3.0 + n * xi.powi(3) / 30.0,
        ];
        let mut table = Self {
            xi: vec![0.0, xi],
            theta: vec![1.0, y[0]],
            dtheta: vec![0.0, y[1]],
        };
        while xi < 1e3 {
            let k1 = rhs(xi, y);
            let k2 = rhs(xi + 0.5 * step, [y[0] + 0.5 * step * k1[0], y[1] + 0.5 * step * k1[1]]);
            let k3 = rhs(xi + 0.5 * step, [y[0] + 0.5 * step * k2[0], y[1] + 0.5 * step * k2[1]]);
            let k4 = rhs(xi + step, [y[0] + step * k3[0], y[1] + step * k3[1]]);
            let next = [
                y[0] + step / 6.0 * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]),
                y[1] + step / 6.0 * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]),
            ];
            if !(next[0] > 0.0) {
                return Ok(table);
            }
            xi += step;
            y = next;
            table.xi.push(xi);
            table.theta.push(y[0]);
            table.dtheta.push(y[1]);
        }
        Err(HydroError::InvalidConfig(format!(
            "Lane-Emden solution of index {n} has no surface"
        )))
    }
    pub fn surface(&self) -> (f64, f64) {
        let last = self.xi.len() - 1;
        (self.xi[last], self.dtheta[last])
    }
    /// `rho_c = -M xi_1 / (4 pi R^3 theta'(xi_1))`
    pub fn central_density(&self, mass: f64, radius: f64) -> f64 {
        let (xi1, dtheta1) = self.surface();
        -mass * xi1 / (4.0 * PI * radius.powi(3) * dtheta1)
    }
    /// `K` in `p = K rho^((n + 1) / n)` for a star of the given mass and radius.
    pub fn polytropic_constant(&self, mass: f64, radius: f64, n: f64) -> f64 {
        let (xi1, dtheta1) = self.surface();
        mass * mass
            * (4.0 * PI).powf(1.0 / n)
            * (-mass * xi1 / (dtheta1 * radius.powi(3))).powf(-(n + 1.0) / n)
            / (dtheta1 * dtheta1 * (1.0 + n) * radius.powi(4))
    }
}

/// Reads all whitespace-separated numbers of a file.
pub fn read_vector<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, HydroError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let values = content
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| HydroError::TableParse {
                path: path.display().to_string(),
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, HydroError>>()?;
    if values.is_empty() {
        return Err(HydroError::EmptyTable {
            path: path.display().to_string(),
        });
    }
    Ok(values)
}

/// Piecewise-linear interpolation on increasing abscissae `xs`.
///
/// `x` has to lie within `[xs[0], xs[last]]`.
pub fn linear_interpolation(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, HydroError> {
    let last = xs.len() - 1;
    if !(x >= xs[0] && x <= xs[last]) {
        return Err(HydroError::InterpolationOutOfRange {
            x,
            lower: xs[0],
            upper: xs[last],
        });
    }
    let upper = xs.partition_point(|&v| v <= x).min(last).max(1);
    let lower = upper - 1;
    Ok(ys[lower] + (x - xs[lower]) * (ys[upper] - ys[lower]) / (xs[upper] - xs[lower]))
}
