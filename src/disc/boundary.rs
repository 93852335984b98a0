//! Boundary conditions expressed as extrapolated states.
//!
//! A boundary condition never touches fluxes directly. For the requested side it returns
//! three states ordered by coordinate:
//!
//! * [`BoundaryPosition::Left`]: `[ghost, cell 0 at edge 0, cell 0 at edge 1]`
//! * [`BoundaryPosition::Right`]: `[last cell at edge n-1, last cell at edge n, ghost]`
//!
//! The first two (left) or last two (right) states pose the Riemann problem on the domain
//! edge; the remaining one is the reconstructed value of the boundary cell on its inner
//! face. All variants require at least three cells.
pub mod constant;
pub mod open;
pub mod periodic;
pub mod wall;

use ndarray::ArrayView1;
use serde::Deserialize;

pub use constant::ConstantPrimitive;
pub use open::FreeFlow;
pub use periodic::Periodic;
pub use wall::RigidWall;

use super::{eos::IdealGas, state::Primitive};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPosition {
    Left,
    Right,
}

pub trait BoundaryCondition {
    fn get_boundary_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
        position: BoundaryPosition,
    ) -> [Primitive; 3];
}

/// Different conditions on the two ends of the domain.
pub struct TwoSidedBoundary {
    pub left: Box<dyn BoundaryCondition>,
    pub right: Box<dyn BoundaryCondition>,
}
impl TwoSidedBoundary {
    pub fn new(left: Box<dyn BoundaryCondition>, right: Box<dyn BoundaryCondition>) -> Self {
        Self { left, right }
    }
}
impl BoundaryCondition for TwoSidedBoundary {
    fn get_boundary_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
        position: BoundaryPosition,
    ) -> [Primitive; 3] {
        match position {
            BoundaryPosition::Left => self.left.get_boundary_values(cells, edges, position),
            BoundaryPosition::Right => self.right.get_boundary_values(cells, edges, position),
        }
    }
}

/// Configuration-level description of a boundary condition.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundarySpec {
    RigidWall,
    FreeFlow,
    Periodic,
    Constant {
        density: f64,
        pressure: f64,
        #[serde(default)]
        velocity: f64,
    },
}
impl BoundarySpec {
    pub fn build(&self, eos: &IdealGas) -> Box<dyn BoundaryCondition> {
        match self {
            BoundarySpec::RigidWall => Box::new(RigidWall),
            BoundarySpec::FreeFlow => Box::new(FreeFlow),
            BoundarySpec::Periodic => Box::new(Periodic),
            BoundarySpec::Constant {
                density,
                pressure,
                velocity,
            } => Box::new(ConstantPrimitive::new(
                eos.primitive(*density, *pressure, *velocity),
            )),
        }
    }
}

/// One-sided slope of the two cells nearest to `position`, normalised by the distance
/// between their midpoints. Returns `(boundary cell, slope, half width of boundary cell)`.
pub(crate) fn one_sided_slope(
    cells: ArrayView1<Primitive>,
    edges: ArrayView1<f64>,
    position: BoundaryPosition,
) -> (Primitive, Primitive, f64) {
    match position {
        BoundaryPosition::Left => {
            let slope = (cells[1] - cells[0]) / (0.5 * (edges[2] - edges[0]));
            (cells[0], slope, 0.5 * (edges[1] - edges[0]))
        }
        BoundaryPosition::Right => {
            let n = cells.len();
            let slope = (cells[n - 1] - cells[n - 2]) / (0.5 * (edges[n] - edges[n - 2]));
            (cells[n - 1], slope, 0.5 * (edges[n] - edges[n - 1]))
        }
    }
}

/// Linear extrapolation of the boundary cell to its two faces, returned as
/// `(face on the domain edge, face towards the interior)`.
pub(crate) fn extrapolate_faces(
    cell: Primitive,
    slope: Primitive,
    half_width: f64,
    position: BoundaryPosition,
) -> (Primitive, Primitive) {
    match position {
        BoundaryPosition::Left => (cell - slope * half_width, cell + slope * half_width),
        BoundaryPosition::Right => (cell + slope * half_width, cell - slope * half_width),
    }
}
