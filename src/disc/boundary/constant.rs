use ndarray::ArrayView1;

use super::{BoundaryCondition, BoundaryPosition};
use crate::disc::state::Primitive;

/// Fixed exterior state, e.g. a near-vacuum surrounding medium.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPrimitive {
    pub value: Primitive,
}
impl ConstantPrimitive {
    pub fn new(value: Primitive) -> Self {
        Self { value }
    }
}
impl BoundaryCondition for ConstantPrimitive {
    fn get_boundary_values(
        &self,
        _cells: ArrayView1<Primitive>,
        _edges: ArrayView1<f64>,
        _position: BoundaryPosition,
    ) -> [Primitive; 3] {
        [self.value; 3]
    }
}
