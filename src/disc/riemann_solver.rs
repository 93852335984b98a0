pub mod exact;
pub mod hllc;

use serde::Deserialize;

pub use exact::ExactRiemannSolver;
pub use hllc::Hllc;

use super::state::{Extensive, Primitive};
use crate::error::HydroError;

/// Interface flux on a fixed (non-moving) interface.
pub trait RiemannSolver {
    fn solve(&self, left: &Primitive, right: &Primitive) -> Result<Extensive, HydroError>;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiemannSolverKind {
    #[default]
    Exact,
    Hllc,
}
impl RiemannSolverKind {
    pub fn build(&self, hcr: f64) -> Box<dyn RiemannSolver> {
        match self {
            RiemannSolverKind::Exact => Box::new(ExactRiemannSolver::new(hcr)),
            RiemannSolverKind::Hllc => Box::new(Hllc::new(hcr)),
        }
    }
}
