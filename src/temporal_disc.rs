use ndarray::ArrayView1;

use crate::{
    disc::{eos::IdealGas, state::Primitive},
    error::HydroError,
};

/// Largest stable explicit time step: `cfl * min_i dx_i / (|u_i| + c_i)`.
///
/// A non-finite or non-positive result is an error rather than a step size.
pub fn compute_time_step(
    cells: ArrayView1<Primitive>,
    edges: ArrayView1<f64>,
    eos: &IdealGas,
    cfl: f64,
) -> Result<f64, HydroError> {
    let mut time_step = f64::INFINITY;
    for (ielem, cell) in cells.iter().enumerate() {
        let dx = edges[ielem + 1] - edges[ielem];
        let speed = cell.velocity.abs() + eos.dp2c(cell.density, cell.pressure);
        let dt = cfl * dx / speed;
        // NaN must not be swallowed by `min`
        if dt.is_nan() {
            return Err(HydroError::InvalidTimeStep { dt });
        }
        time_step = time_step.min(dt);
    }
    if !time_step.is_finite() || time_step <= 0.0 {
        return Err(HydroError::InvalidTimeStep { dt: time_step });
    }
    Ok(time_step)
}
