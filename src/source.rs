//! Body forces applied after the conservative flux update (operator splitting).
pub mod gravity;
pub mod orbit;

use ndarray::{Array1, ArrayView1};

use crate::{
    disc::state::{Extensive, Primitive},
    error::HydroError,
};

pub use gravity::Gravity;
pub use orbit::ParabolicOrbit;

pub trait SourceTerm {
    /// Adds the contribution of the force over `dt` to `extensives` in place.
    ///
    /// `cells` are the primitives the flux update started from.
    fn calc_force(
        &self,
        edges: ArrayView1<f64>,
        cells: ArrayView1<Primitive>,
        time: f64,
        extensives: &mut Array1<Extensive>,
        dt: f64,
    ) -> Result<(), HydroError>;
}

/// Force-free evolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSource;
impl SourceTerm for NoSource {
    fn calc_force(
        &self,
        _edges: ArrayView1<f64>,
        _cells: ArrayView1<Primitive>,
        _time: f64,
        _extensives: &mut Array1<Extensive>,
        _dt: f64,
    ) -> Result<(), HydroError> {
        Ok(())
    }
}
