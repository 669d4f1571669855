use crate::affine::{Affine, IDENTITY_AFFINE};

pub trait Transform {
    fn as_affine(&self) -> Affine;
}

pub trait Transformable<'a> {
    fn transform<T: Transform>(&self, transform: &'a T) -> Self;
}

// reduce_transforms folds transforms into one affine which applies them first to last:
// p.transform(&reduce_transforms(vec![&a, &b])) =~ p.transform(&a).transform(&b)
pub fn reduce_transforms<T: Transform>(transforms: Vec<&T>) -> Affine {
    transforms
        .into_iter()
        .fold(IDENTITY_AFFINE, |affine, transform| affine.transform(transform))
}
