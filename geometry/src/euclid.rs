use crate::{
    affine::{Affine, IDENTITY_AFFINE},
    transform::Transform,
};

#[derive(Clone, Copy, Debug)]
pub enum Euclid {
    Translate((f64, f64)), // (dx, dy) offset applied to the object
    Rotate(f64),           // counter-clockwise turn about the origin, in radians
}

impl Transform for Euclid {
    fn as_affine(&self) -> Affine {
        match self {
            Euclid::Translate((dx, dy)) => Affine(IDENTITY_AFFINE.0, [*dx, *dy]),
            Euclid::Rotate(radians) => {
                let (sin, cos) = radians.sin_cos();
                Affine([[cos, -sin], [sin, cos]], IDENTITY_AFFINE.1)
            }
        }
    }
}
