use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Cell description in terms of physical quantities.
///
/// `entropy` is redundant with `(density, pressure)` and is kept consistent with them by
/// the equation of state whenever a state is rebuilt from conserved quantities. The
/// arithmetic operators act component-wise and exist for slope construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Primitive {
    pub density: f64,
    pub velocity: f64,
    pub pressure: f64,
    pub entropy: f64,
}
impl Primitive {
    pub fn new(density: f64, pressure: f64, velocity: f64, entropy: f64) -> Self {
        Self {
            density,
            velocity,
            pressure,
            entropy,
        }
    }
    pub fn is_physical(&self) -> bool {
        self.density.is_finite()
            && self.pressure.is_finite()
            && self.velocity.is_finite()
            && self.density > 0.0
            && self.pressure > 0.0
    }
}
impl Add for Primitive {
    type Output = Primitive;
    fn add(self, rhs: Primitive) -> Primitive {
        Primitive {
            density: self.density + rhs.density,
            velocity: self.velocity + rhs.velocity,
            pressure: self.pressure + rhs.pressure,
            entropy: self.entropy + rhs.entropy,
        }
    }
}
impl Sub for Primitive {
    type Output = Primitive;
    fn sub(self, rhs: Primitive) -> Primitive {
        Primitive {
            density: self.density - rhs.density,
            velocity: self.velocity - rhs.velocity,
            pressure: self.pressure - rhs.pressure,
            entropy: self.entropy - rhs.entropy,
        }
    }
}
impl Mul<f64> for Primitive {
    type Output = Primitive;
    fn mul(self, a: f64) -> Primitive {
        Primitive {
            density: self.density * a,
            velocity: self.velocity * a,
            pressure: self.pressure * a,
            entropy: self.entropy * a,
        }
    }
}
impl Div<f64> for Primitive {
    type Output = Primitive;
    fn div(self, a: f64) -> Primitive {
        Primitive {
            density: self.density / a,
            velocity: self.velocity / a,
            pressure: self.pressure / a,
            entropy: self.entropy / a,
        }
    }
}

/// Conserved totals of a cell: per-volume conserved quantities times the cell length.
///
/// The same triple doubles as an interface flux (mass, momentum and energy per unit time).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extensive {
    pub mass: f64,
    pub momentum: f64,
    pub energy: f64,
}
impl Extensive {
    pub fn new(mass: f64, momentum: f64, energy: f64) -> Self {
        Self {
            mass,
            momentum,
            energy,
        }
    }
}
impl Add for Extensive {
    type Output = Extensive;
    fn add(self, rhs: Extensive) -> Extensive {
        Extensive {
            mass: self.mass + rhs.mass,
            momentum: self.momentum + rhs.momentum,
            energy: self.energy + rhs.energy,
        }
    }
}
impl Sub for Extensive {
    type Output = Extensive;
    fn sub(self, rhs: Extensive) -> Extensive {
        Extensive {
            mass: self.mass - rhs.mass,
            momentum: self.momentum - rhs.momentum,
            energy: self.energy - rhs.energy,
        }
    }
}
impl Mul<f64> for Extensive {
    type Output = Extensive;
    fn mul(self, a: f64) -> Extensive {
        Extensive {
            mass: self.mass * a,
            momentum: self.momentum * a,
            energy: self.energy * a,
        }
    }
}
impl Neg for Extensive {
    type Output = Extensive;
    fn neg(self) -> Extensive {
        self * -1.0
    }
}
impl AddAssign for Extensive {
    fn add_assign(&mut self, rhs: Extensive) {
        *self = *self + rhs;
    }
}
impl SubAssign for Extensive {
    fn sub_assign(&mut self, rhs: Extensive) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_slope_arithmetic() {
        let a = Primitive::new(2.0, 4.0, 1.0, 0.5);
        let b = Primitive::new(1.0, 1.0, -1.0, 0.25);
        let slope = (a - b) / 0.5;
        assert_eq!(slope, Primitive::new(2.0, 6.0, 4.0, 0.5));
        let back = b + slope * 0.5;
        assert_eq!(back, a);
    }

    #[test]
    fn test_extensive_accumulation() {
        let mut e = Extensive::new(1.0, 0.0, 2.0);
        e += Extensive::new(0.5, 1.0, 0.5);
        e -= Extensive::new(0.5, 0.0, 0.0) * 2.0;
        assert_eq!(e, Extensive::new(0.5, 1.0, 2.5));
        assert_eq!(-e, Extensive::new(-0.5, -1.0, -2.5));
    }

    #[test]
    fn test_is_physical() {
        assert!(Primitive::new(1.0, 1.0, 0.0, 1.0).is_physical());
        assert!(!Primitive::new(0.0, 1.0, 0.0, 1.0).is_physical());
        assert!(!Primitive::new(1.0, -1e-12, 0.0, 1.0).is_physical());
        assert!(!Primitive::new(1.0, f64::NAN, 0.0, 1.0).is_physical());
    }
}
