use crate::transform::{Transform, Transformable};

pub const IDENTITY_AFFINE: Affine = Affine([[1., 0.], [0., 1.]], [0., 0.]);

// Affine holds a row-major transform matrix and a translation vector
#[derive(Clone, Copy, Debug)]
pub struct Affine(pub [[f64; 2]; 2], pub [f64; 2]);

impl Affine {
    // mul_0 computes the dot product between the ith row vector of lhs.0 and the jth column vector of rhs.0
    pub(crate) fn mul_0(lhs: &Affine, rhs: &Affine, i: usize, j: usize) -> f64 {
        lhs.0[i][0] * rhs.0[0][j] + lhs.0[i][1] * rhs.0[1][j]
    }

    // mul_1 computes the dot product between the ith row vector of lhs.0 and rhs.1
    pub(crate) fn mul_1(lhs: &Affine, rhs: &Affine, i: usize) -> f64 {
        lhs.0[i][0] * rhs.1[0] + lhs.0[i][1] * rhs.1[1] + lhs.1[i]
    }
}

impl Transform for Affine {
    fn as_affine(&self) -> Affine {
        *self
    }
}

impl<'a> Transformable<'a> for Affine {
    fn transform<T: Transform>(&self, transform: &'a T) -> Self {
        let lhs = &transform.as_affine();
        let rhs = self;
        Affine(
            [
                [Affine::mul_0(lhs, rhs, 0, 0), Affine::mul_0(lhs, rhs, 0, 1)],
                [Affine::mul_0(lhs, rhs, 1, 0), Affine::mul_0(lhs, rhs, 1, 1)],
            ],
            [Affine::mul_1(lhs, rhs, 0), Affine::mul_1(lhs, rhs, 1)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::approx_eq;

    #[test]
    fn test_affine_transform() {
        // https://www.wolframalpha.com/input/?i=%7B%7B1%2C2%7D%2C%7B3%2C4%7D%7D*%7B%7B0%2C1%7D%2C%7B1%2C0%7D%7D
        let lhs = Affine([[1., 2.], [3., 4.]], [0., 1.]);
        let affine = Affine([[0., 1.], [1., 0.]], [1., 0.]).transform(&lhs);
        approx_eq!(f64, 2., affine.0[0][0]);
        approx_eq!(f64, 1., affine.0[0][1]);
        approx_eq!(f64, 4., affine.0[1][0]);
        approx_eq!(f64, 3., affine.0[1][1]);
        approx_eq!(f64, 1., affine.1[0]);
        approx_eq!(f64, 4., affine.1[1]);
    }
}
