use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{
    disc::{boundary::BoundarySpec, riemann_solver::RiemannSolverKind},
    error::HydroError,
};

/// Run configuration, read from a JSON file. Units are G = 1, solar mass and radius.
#[derive(Deserialize, Debug, Clone)]
pub struct SimulationParamParser {
    /// Penetration factor `R_t / R_p`.
    pub beta: f64,
    pub star_gamma: f64,
    pub gas_gamma: f64,
    pub self_gravity: bool,
    pub output_dir: PathBuf,
    #[serde(default = "default_cfl")]
    pub cfl: f64,
    #[serde(default = "default_cell_num")]
    pub cell_num: usize,
    #[serde(default = "one")]
    pub star_mass: f64,
    #[serde(default = "one")]
    pub star_radius: f64,
    #[serde(default = "default_black_hole_mass")]
    pub black_hole_mass: f64,
    /// Domain length in units of the stellar radius.
    #[serde(default = "default_domain_factor")]
    pub domain_factor: f64,
    #[serde(default = "default_final_time")]
    pub final_time: f64,
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval: f64,
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,
    #[serde(default = "default_true")]
    pub external_gravity: bool,
    #[serde(default)]
    pub riemann_solver: RiemannSolverKind,
    #[serde(default = "default_left_boundary")]
    pub left_boundary: BoundarySpec,
    #[serde(default = "default_right_boundary")]
    pub right_boundary: BoundarySpec,
    /// Directory with `xsi.txt`, `theta.txt`, `dtheta.txt` (or the `n3` set). The profile
    /// is integrated on the fly when absent.
    #[serde(default)]
    pub lane_emden_dir: Option<PathBuf>,
}
fn default_cfl() -> f64 {
    0.2
}
fn default_cell_num() -> usize {
    512
}
fn one() -> f64 {
    1.0
}
fn default_black_hole_mass() -> f64 {
    1e6
}
fn default_domain_factor() -> f64 {
    1.01
}
fn default_final_time() -> f64 {
    0.6
}
fn default_snapshot_interval() -> f64 {
    0.05
}
fn default_log_interval() -> usize {
    100
}
fn default_true() -> bool {
    true
}
fn default_left_boundary() -> BoundarySpec {
    BoundarySpec::RigidWall
}
fn default_right_boundary() -> BoundarySpec {
    BoundarySpec::Constant {
        density: 1e-25,
        pressure: 1e-26,
        velocity: 0.0,
    }
}
impl SimulationParamParser {
    pub fn parse<P: AsRef<Path>>(file_path: P) -> Result<Self, HydroError> {
        let file_content = fs::read_to_string(file_path)?;
        let param: SimulationParamParser = serde_json::from_str(&file_content)?;
        param.validate()?;
        Ok(param)
    }
    pub fn validate(&self) -> Result<(), HydroError> {
        let invalid = |msg: String| Err(HydroError::InvalidConfig(msg));
        if !(self.beta >= 1.0) {
            // acos(2 / beta - 1) is undefined below 1
            return invalid(format!("beta must be at least 1, got {}", self.beta));
        }
        for (name, gamma) in [("star_gamma", self.star_gamma), ("gas_gamma", self.gas_gamma)] {
            if !(gamma > 1.0) {
                return invalid(format!("{name} must exceed 1, got {gamma}"));
            }
        }
        if !(self.star_gamma > 1.2) {
            return invalid(format!(
                "star_gamma must exceed 1.2 for a star of finite radius, got {}",
                self.star_gamma
            ));
        }
        if !(self.cfl > 0.0 && self.cfl <= 1.0) {
            return invalid(format!("cfl must lie in (0, 1], got {}", self.cfl));
        }
        if self.cell_num < 3 {
            return Err(HydroError::TooFewCells {
                cells: self.cell_num,
            });
        }
        for (name, value) in [
            ("star_mass", self.star_mass),
            ("star_radius", self.star_radius),
            ("black_hole_mass", self.black_hole_mass),
            ("domain_factor", self.domain_factor),
            ("snapshot_interval", self.snapshot_interval),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if self.log_interval == 0 {
            return invalid("log_interval must be positive".to_string());
        }
        for (side, boundary) in [("left", &self.left_boundary), ("right", &self.right_boundary)] {
            if let BoundarySpec::Constant {
                density, pressure, ..
            } = boundary
            {
                if !(*density > 0.0 && *pressure > 0.0) {
                    return invalid(format!(
                        "{side} boundary state needs positive density and pressure"
                    ));
                }
            }
        }
        if (self.left_boundary == BoundarySpec::Periodic) != (self.right_boundary == BoundarySpec::Periodic) {
            return invalid("periodic boundaries must be used on both sides".to_string());
        }
        Ok(())
    }
}
