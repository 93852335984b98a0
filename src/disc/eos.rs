use super::state::{Extensive, Primitive};

/// Ideal gas with a fixed adiabatic index.
///
/// Entropy here is the adiabat `s = p / rho^gamma`.
#[derive(Clone, Copy, Debug)]
pub struct IdealGas {
    pub gamma: f64,
}
impl IdealGas {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
    pub fn dp2s(&self, density: f64, pressure: f64) -> f64 {
        pressure * density.powf(-self.gamma)
    }
    pub fn sd2p(&self, entropy: f64, density: f64) -> f64 {
        entropy * density.powf(self.gamma)
    }
    /// Specific internal energy.
    pub fn dp2e(&self, density: f64, pressure: f64) -> f64 {
        pressure / (density * (self.gamma - 1.0))
    }
    pub fn de2p(&self, density: f64, energy: f64) -> f64 {
        (self.gamma - 1.0) * density * energy
    }
    pub fn dp2c(&self, density: f64, pressure: f64) -> f64 {
        (self.gamma * pressure / density).sqrt()
    }
    /// Builds a primitive state with the entropy field filled in.
    pub fn primitive(&self, density: f64, pressure: f64, velocity: f64) -> Primitive {
        Primitive::new(density, pressure, velocity, self.dp2s(density, pressure))
    }
    pub fn to_extensive(&self, cell: &Primitive, volume: f64) -> Extensive {
        let mass = cell.density * volume;
        let energy = mass
            * (self.dp2e(cell.density, cell.pressure) + 0.5 * cell.velocity * cell.velocity);
        Extensive::new(mass, mass * cell.velocity, energy)
    }
    /// Inverse of [`IdealGas::to_extensive`]. The result is not checked for positivity.
    pub fn to_primitive(&self, extensive: &Extensive, volume: f64) -> Primitive {
        let density = extensive.mass / volume;
        let velocity = extensive.momentum / extensive.mass;
        let thermal = extensive.energy / extensive.mass - 0.5 * velocity * velocity;
        let pressure = self.de2p(density, thermal);
        self.primitive(density, pressure, velocity)
    }
}
