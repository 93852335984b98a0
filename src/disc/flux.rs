use super::state::{Extensive, Primitive};

/// Physical Euler flux of a single state for an ideal gas.
pub fn flux1d(w: &Primitive, hcr: f64) -> Extensive {
    let momentum = w.density * w.velocity;
    let energy = 0.5 * momentum * w.velocity + w.pressure / (hcr - 1.0);
    Extensive::new(
        momentum,
        momentum * w.velocity + w.pressure,
        w.velocity * (energy + w.pressure),
    )
}
