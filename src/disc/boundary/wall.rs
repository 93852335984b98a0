use ndarray::ArrayView1;

use super::{BoundaryCondition, BoundaryPosition, extrapolate_faces, one_sided_slope};
use crate::disc::state::Primitive;

/// Reflecting wall with zero normal velocity.
///
/// Density, pressure and entropy are held constant across the boundary cell; only the
/// velocity keeps its one-sided slope. The ghost state mirrors the wall state with the
/// velocity reversed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RigidWall;

impl BoundaryCondition for RigidWall {
    fn get_boundary_values(
        &self,
        cells: ArrayView1<Primitive>,
        edges: ArrayView1<f64>,
        position: BoundaryPosition,
    ) -> [Primitive; 3] {
        let (cell, mut slope, half_width) = one_sided_slope(cells, edges, position);
        slope.density = 0.0;
        slope.entropy = 0.0;
        slope.pressure = 0.0;
        let (wall, inner) = extrapolate_faces(cell, slope, half_width, position);
        let mut ghost = wall;
        ghost.velocity = -wall.velocity;
        match position {
            BoundaryPosition::Left => [ghost, wall, inner],
            BoundaryPosition::Right => [inner, wall, ghost],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    fn cells_and_edges() -> (Array1<Primitive>, Array1<f64>) {
        let edges = array![0.0, 0.1, 0.3, 0.4, 0.7];
        let cells = array![
            Primitive::new(1.0, 1.0, 0.2, 1.0),
            Primitive::new(0.8, 0.7, 0.6, 1.2),
            Primitive::new(0.6, 0.5, 0.9, 1.3),
            Primitive::new(0.5, 0.2, 1.5, 1.1),
        ];
        (cells, edges)
    }

    #[test]
    fn test_left_wall_reflects_velocity() {
        let (cells, edges) = cells_and_edges();
        let [ghost, wall, inner] =
            RigidWall.get_boundary_values(cells.view(), edges.view(), BoundaryPosition::Left);
        assert_eq!(ghost.velocity, -wall.velocity);
        assert_eq!(ghost.density, wall.density);
        assert_eq!(ghost.pressure, wall.pressure);
        assert_eq!(wall.density, cells[0].density);
        assert_eq!(wall.pressure, cells[0].pressure);
        assert_eq!(inner.density, cells[0].density);
        // velocity slope (0.6 - 0.2) / 0.15, half width 0.05
        let slope = 0.4 / 0.15;
        assert_relative_eq!(wall.velocity, 0.2 - slope * 0.05, max_relative = 1e-12);
        assert_relative_eq!(inner.velocity, 0.2 + slope * 0.05, max_relative = 1e-12);
    }

    #[test]
    fn test_right_wall_reflects_velocity() {
        let (cells, edges) = cells_and_edges();
        let [inner, wall, ghost] =
            RigidWall.get_boundary_values(cells.view(), edges.view(), BoundaryPosition::Right);
        assert_eq!(ghost.velocity, -wall.velocity);
        assert_eq!(ghost.density, cells[3].density);
        assert_eq!(ghost.pressure, cells[3].pressure);
        assert_eq!(ghost.entropy, cells[3].entropy);
        let slope = (1.5 - 0.9) / (0.5 * (0.7 - 0.3));
        assert_relative_eq!(wall.velocity, 1.5 + slope * 0.15, max_relative = 1e-12);
        assert_relative_eq!(inner.velocity, 1.5 - slope * 0.15, max_relative = 1e-12);
    }
}
