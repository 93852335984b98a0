use ndarray::ArrayView1;

use super::{BoundaryCondition, BoundaryPosition, extrapolate_faces, one_sided_slope};
use crate::disc::state::Primitive;

/// Outflow boundary: the ghost state is the unlimited linear extrapolation of the
/// boundary cell to the domain edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeFlow;

impl BoundaryCondition for FreeFlow {
    fn get_boundary_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
        position: BoundaryPosition,
    ) -> [Primitive; 3] {
        let (cell, slope, half_width) = one_sided_slope(cells, edges, position);
        let (outer, inner) = extrapolate_faces(cell, slope, half_width, position);
        match position {
            BoundaryPosition::Left => [outer, outer, inner],
            BoundaryPosition::Right => [inner, outer, outer],
        }
    }
}
