use ndarray::{Array, Array1, Ix1};

use crate::error::HydroError;

/// Fixed one-dimensional finite-volume mesh given by its `n + 1` edges.
#[derive(Clone, Debug)]
pub struct Mesh1d {
    pub edges: Array<f64, Ix1>,
    pub volumes: Array<f64, Ix1>,
    pub centers: Array<f64, Ix1>,
}
impl Mesh1d {
    pub fn new(edges: Array1<f64>) -> Result<Mesh1d, HydroError> {
        Self::check_edges(&edges)?;
        let cell_num = edges.len() - 1;
        let volumes = Array1::from_shape_fn(cell_num, |i| edges[i + 1] - edges[i]);
        let centers = Array1::from_shape_fn(cell_num, |i| 0.5 * (edges[i + 1] + edges[i]));
        Ok(Mesh1d {
            edges,
            volumes,
            centers,
        })
    }
    /// Validates the three-cell minimum and strict monotonicity.
    pub fn check_edges(edges: &Array1<f64>) -> Result<(), HydroError> {
        if edges.len() < 4 {
            return Err(HydroError::TooFewCells {
                cells: edges.len().saturating_sub(1),
            });
        }
        for i in 0..edges.len() - 1 {
            if !(edges[i + 1] > edges[i]) {
                return Err(HydroError::DegenerateMesh { index: i });
            }
        }
        Ok(())
    }
    pub fn cell_num(&self) -> usize {
        self.volumes.len()
    }
    pub fn length(&self) -> f64 {
        self.edges[self.edges.len() - 1] - self.edges[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mesh_geometry() {
        let mesh = Mesh1d::new(array![0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(mesh.cell_num(), 3);
        assert_relative_eq!(mesh.volumes[2], 0.5);
        assert_relative_eq!(mesh.centers[0], 0.125);
        assert_relative_eq!(mesh.centers[2], 0.75);
        assert_relative_eq!(mesh.length(), 1.0);
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(matches!(
            Mesh1d::new(array![0.0, 1.0, 2.0]),
            Err(HydroError::TooFewCells { cells: 2 })
        ));
        assert!(matches!(
            Mesh1d::new(array![0.0, 1.0, 1.0, 2.0]),
            Err(HydroError::DegenerateMesh { index: 1 })
        ));
    }
}
