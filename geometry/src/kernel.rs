use crate::{
    error::GeometryError,
    euclid::Euclid,
    point::Point,
    transform::{reduce_transforms, Transformable},
};
use common::TOLERANCE;

// rotate turns point counter-clockwise by angle radians about origin
pub fn rotate(point: &Point, angle: f64, origin: &Point) -> Point {
    point.transform(&reduce_transforms(vec![
        &Euclid::Translate(origin.neg().values()),
        &Euclid::Rotate(angle),
        &Euclid::Translate(origin.values()),
    ]))
}

// reflect mirrors point across the infinite line through start and end
pub fn reflect(point: &Point, start: &Point, end: &Point) -> Result<Point, GeometryError> {
    let direction = end - start;
    if direction.norm() <= TOLERANCE {
        return Err(GeometryError::DegenerateLine(*start, *end));
    }
    let t = (point - start).dot(&direction) / direction.norm_squared();
    let foot = start.lerp(end, t);
    Ok(&foot.mul(2.) - point)
}

// signed_angle returns the angle in (-π, π] swept from reference to vector, negative when clockwise
pub fn signed_angle(reference: &Point, vector: &Point) -> f64 {
    reference.cross(vector).atan2(reference.dot(vector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{ORIGIN, X};
    use common::{approx_eq, to_rad};
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_rotate() {
        approx_eq!(&Point, &Point(0., 1.), &rotate(&X, TAU / 4., &ORIGIN));
        approx_eq!(&Point, &Point(1., 2.), &rotate(&Point(2., 1.), TAU / 4., &Point(1., 1.)));
        let point = rotate(&X, -to_rad(72.), &ORIGIN);
        approx_eq!(&Point, &Point(0.309016994, -0.951056516), &point);
    }

    #[test]
    fn test_rotate_full_turn() {
        let point = Point(0.3, -4.2);
        approx_eq!(&Point, &point, &rotate(&point, TAU, &Point(-1., 7.)));
    }

    #[test]
    fn test_reflect() {
        let point = reflect(&Point(0., 1.), &ORIGIN, &X).unwrap();
        approx_eq!(&Point, &Point(0., -1.), &point);

        let point = reflect(&Point(2., 0.), &Point(1., -5.), &Point(1., 5.)).unwrap();
        approx_eq!(&Point, &ORIGIN, &point);

        // points on the line are fixed
        let point = reflect(&Point(3., 3.), &ORIGIN, &Point(1., 1.)).unwrap();
        approx_eq!(&Point, &Point(3., 3.), &point);
    }

    #[test]
    fn test_reflect_is_involution() {
        let start = Point(-0.4, 1.1);
        let end = rotate(&X, to_rad(36.), &start);
        let point = Point(0.7, -0.2);
        let mirrored = reflect(&point, &start, &end).unwrap();
        approx_eq!(f64, point.distance(&start), mirrored.distance(&start));
        approx_eq!(&Point, &point, &reflect(&mirrored, &start, &end).unwrap());
    }

    #[test]
    fn test_reflect_degenerate_line() {
        let start = Point(1., 1.);
        let end = Point(1. + TOLERANCE / 2., 1.);
        assert_eq!(
            Err(GeometryError::DegenerateLine(start, end)),
            reflect(&ORIGIN, &start, &end)
        );
    }

    #[test]
    fn test_signed_angle() {
        approx_eq!(f64, PI / 2., signed_angle(&X, &Point(0., 1.)));
        approx_eq!(f64, -PI / 2., signed_angle(&X, &Point(0., -1.)));
        approx_eq!(f64, PI, signed_angle(&X, &Point(-1., 0.)));
        approx_eq!(f64, 0., signed_angle(&Point(2., 2.), &Point(1., 1.)));
    }
}
