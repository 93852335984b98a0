use ndarray::{Array1, ArrayView1};

use super::{
    boundary::{BoundaryCondition, BoundaryPosition},
    state::Primitive,
};

/// Min-mod choice between a left, right and centred slope of one field.
///
/// Zero when the one-sided slopes disagree in sign, otherwise the smallest magnitude of
/// the three candidates carrying the sign of the left slope.
pub fn minmod(left: f64, right: f64, center: f64) -> f64 {
    if left * right < 0.0 {
        0.0
    } else {
        let magnitude = left.abs().min(right.abs()).min(center.abs());
        if left > 0.0 { magnitude } else { -magnitude }
    }
}

/// Applies [`minmod`] to density, pressure and velocity. The entropy slope is zero.
pub fn limited_slope(left: Primitive, right: Primitive, center: Primitive) -> Primitive {
    Primitive {
        density: minmod(left.density, right.density, center.density),
        velocity: minmod(left.velocity, right.velocity, center.velocity),
        pressure: minmod(left.pressure, right.pressure, center.pressure),
        entropy: 0.0,
    }
}

/// Piecewise-linear reconstruction with a min-mod limiter on a non-uniform mesh.
///
/// The two boundary cells and the two domain edges are handled entirely by the boundary
/// condition.
pub struct MinModReconstruction {
    pub boundary: Box<dyn BoundaryCondition>,
}
impl MinModReconstruction {
    pub fn new(boundary: Box<dyn BoundaryCondition>) -> Self {
        Self { boundary }
    }
    /// Left and right states at each of the `n + 1` interfaces.
    pub fn interface_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
    ) -> Array1<[Primitive; 2]> {
        let n = cells.len();
        let lower = self
            .boundary
            .get_boundary_values(cells, edges, BoundaryPosition::Left);
        let upper = self
            .boundary
            .get_boundary_values(cells, edges, BoundaryPosition::Right);
        let mut values = Array1::from_elem(n + 1, [Primitive::default(); 2]);
        values[0] = [lower[0], lower[1]];
        values[1][0] = lower[2];
        values[n - 1][1] = upper[0];
        values[n] = [upper[1], upper[2]];
        for i in 1..n - 1 {
            let x_left = 0.5 * (edges[i - 1] + edges[i]);
            let x = 0.5 * (edges[i] + edges[i + 1]);
            let x_right = 0.5 * (edges[i + 1] + edges[i + 2]);
            let slope = limited_slope(
                (cells[i] - cells[i - 1]) / (x - x_left),
                (cells[i + 1] - cells[i]) / (x_right - x),
                (cells[i + 1] - cells[i - 1]) / (x_right - x_left),
            );
            values[i][1] = cells[i] - slope * (x - edges[i]);
            values[i + 1][0] = cells[i] + slope * (edges[i + 1] - x);
        }
        values
    }
}
