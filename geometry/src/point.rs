use crate::{
    affine::{Affine, IDENTITY_AFFINE},
    edge::Edge,
    transform::{Transform, Transformable},
};
use common::{fmt_float, rad, DEFAULT_F64_MARGIN, TOLERANCE};
use float_cmp::{ApproxEq, F64Margin};
use itertools::izip;
use std::ops::{Add, Neg, Sub};

pub const ORIGIN: Point = Point(0., 0.);
pub const X: Point = Point(1., 0.);

pub const DISPLAY_PRECISION: usize = 2;

#[derive(Clone, Copy, Debug)]
pub struct Point(pub f64, pub f64);

impl Point {
    // edges pairs each point with its successor, wrapping the last point back to the first
    pub fn edges<'a>(points: &'a [Point]) -> Vec<Edge<'a>> {
        izip!(
            points.iter(),
            points.iter().cycle().skip(1).take(points.len()),
        )
            .map(|(point1, point2)| Edge(point1, point2))
            .collect()
    }

    pub fn new(values: (f64, f64)) -> Point {
        Point(values.0, values.1)
    }

    // angle returns the counter-clockwise angle in [0, τ) swept from ray b->c to ray b->a
    pub fn angle(a: &Point, b: &Point, c: &Point) -> f64 {
        rad((a - b).arg() - (c - b).arg())
    }

    pub fn arg(&self) -> f64 {
        rad(self.1.atan2(self.0))
    }

    // cross returns the z component of the 3d cross product of self and other
    pub fn cross(&self, other: &Point) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self - other).norm()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    // is_near reports whether other lies within TOLERANCE of self
    pub fn is_near(&self, other: &Point) -> bool {
        self.distance(other) <= TOLERANCE
    }

    // lerp returns the point a fraction t of the way from self to other
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        self + &(other - self).mul(t)
    }

    pub fn mul(&self, val: f64) -> Point {
        Point(self.0 * val, self.1 * val)
    }

    pub fn neg(&self) -> Point {
        Point(-self.0, -self.1)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.powi(2) + self.1.powi(2)
    }

    pub fn values(&self) -> (f64, f64) {
        (self.0, self.1)
    }
}

impl Add for &Point {
    type Output = Point;
    fn add(self, other: &Point) -> Self::Output {
        Point(self.0 + other.0, self.1 + other.1)
    }
}

impl ApproxEq for Point {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        0_f64.approx_eq((&self - &other).norm(), margin)
    }
}

impl ApproxEq for &Point {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        0_f64.approx_eq((self - other).norm(), margin)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        Point(-self.0, -self.1)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.approx_eq(other.0, DEFAULT_F64_MARGIN)
            && self.1.approx_eq(other.1, DEFAULT_F64_MARGIN)
    }
}

impl Sub for &Point {
    type Output = Point;
    fn sub(self, other: &Point) -> Self::Output {
        Point(self.0 - other.0, self.1 - other.1)
    }
}

impl<'a> Transformable<'a> for Point {
    fn transform<T: Transform>(&self, transform: &'a T) -> Self {
        let lhs = transform.as_affine();
        let rhs = Affine(IDENTITY_AFFINE.0, [self.0, self.1]);
        Point(Affine::mul_1(&lhs, &rhs, 0), Affine::mul_1(&lhs, &rhs, 1))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]",
            fmt_float(self.0, DISPLAY_PRECISION),
            fmt_float(self.1, DISPLAY_PRECISION)
        )
    }
}
