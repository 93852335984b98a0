use ndarray::ArrayView1;

use super::{BoundaryCondition, BoundaryPosition};
use crate::disc::{reconstruction::limited_slope, state::Primitive};

/// Periodic domain: the first and last cells are neighbours across a wrap of length
/// `edges[n] - edges[0]`.
///
/// Limited slopes are computed for both end cells, and each side's ghost state is the
/// opposite end cell extrapolated with its own slope.
#[derive(Clone, Copy, Debug, Default)]
pub struct Periodic;

impl Periodic {
    /// Distance from the centre of cell `from` rightwards to the centre of cell `to`,
    /// crossing the wrap when `to` is not to the right of `from`.
    fn center_gap(edges: ArrayView1<f64>, from: usize, to: usize) -> f64 {
        let center = |i: usize| 0.5 * (edges[i] + edges[i + 1]);
        let gap = center(to) - center(from);
        if to > from {
            gap
        } else {
            gap + edges[edges.len() - 1] - edges[0]
        }
    }
    /// Limited slopes of the first and last cells.
    pub fn end_slopes(
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
    ) -> (Primitive, Primitive) {
        let n = cells.len();
        let gap = |from, to| Self::center_gap(edges, from, to);
        let wrap = (cells[0] - cells[n - 1]) / gap(n - 1, 0);

        let first_right = (cells[1] - cells[0]) / gap(0, 1);
        let first_center = (cells[1] - cells[n - 1]) / gap(n - 1, 1);
        let first_slope = limited_slope(wrap, first_right, first_center);

        let last_left = (cells[n - 1] - cells[n - 2]) / gap(n - 2, n - 1);
        let last_center = (cells[0] - cells[n - 2]) / gap(n - 2, 0);
        let last_slope = limited_slope(last_left, wrap, last_center);
        (first_slope, last_slope)
    }
}

impl BoundaryCondition for Periodic {
    fn get_boundary_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
        position: BoundaryPosition,
    ) -> [Primitive; 3] {
        let n = cells.len();
        let (first_slope, last_slope) = Self::end_slopes(cells, edges);
        let first_half = 0.5 * (edges[1] - edges[0]);
        let last_half = 0.5 * (edges[n] - edges[n - 1]);
        match position {
            BoundaryPosition::Left => [
                cells[n - 1] + last_slope * last_half,
                cells[0] - first_slope * first_half,
                cells[0] + first_slope * first_half,
            ],
            BoundaryPosition::Right => [
                cells[n - 1] - last_slope * last_half,
                cells[n - 1] + last_slope * last_half,
                cells[0] - first_slope * first_half,
            ],
        }
    }
}
