mod factory;

pub use self::factory::*;

use common::{to_rad, DEFAULT_F64_MARGIN, TOLERANCE};
use float_cmp::ApproxEq;
use geometry::{Edge, GeometryError, Point};
use itertools::Itertools;
use serde::Serialize;
use std::{cmp::Ordering, f64::consts::PI};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TileKind {
    Thick,
    Thin,
}

impl TileKind {
    pub fn acute_angle(&self) -> f64 {
        match self {
            TileKind::Thick => to_rad(72.),
            TileKind::Thin => to_rad(36.),
        }
    }

    pub fn obtuse_angle(&self) -> f64 {
        PI - self.acute_angle()
    }

    pub fn angle(&self, corner: Corner) -> f64 {
        match corner {
            Corner::Acute => self.acute_angle(),
            Corner::Obtuse => self.obtuse_angle(),
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileKind::Thick => write!(f, "TKR"),
            TileKind::Thin => write!(f, "TNR"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Corner {
    Acute,
    Obtuse,
}

// Shape distinguishes full rhombi from the Robinson half triangles left unpaired by inflation
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Shape {
    Rhombus,
    Half,
}

// ProtoTile is a classified, clockwise sequence of corner positions
#[derive(Clone, Debug)]
pub struct ProtoTile {
    pub kind: TileKind,
    pub shape: Shape,
    pub points: Vec<Point>,
}

impl ProtoTile {
    // new classifies the provided corners by comparing their angles and edge lengths against the canonical prototiles
    pub fn new(points: Vec<Point>) -> Result<ProtoTile, GeometryError> {
        if points.len() != 3 && points.len() != 4 {
            return Err(GeometryError::Unrecognized(points));
        }
        if points.iter().tuple_combinations().any(|(a, b)| a.is_near(b)) {
            return Err(GeometryError::CoincidentCorners(points));
        }
        if signed_area(&points) >= 0. {
            return Err(GeometryError::Unrecognized(points));
        }

        let angles = (0..points.len()).map(|i| interior_angle(&points, i)).collect_vec();
        let lengths = Point::edges(&points).iter().map(Edge::length).collect_vec();
        let classification = match points.len() {
            4 => classify_rhombus(&angles, &lengths).map(|kind| (kind, Shape::Rhombus)),
            _ => classify_half(&angles, &lengths).map(|kind| (kind, Shape::Half)),
        };

        match classification {
            Some((kind, shape)) => Ok(ProtoTile { kind, shape, points }),
            None => Err(GeometryError::Unrecognized(points)),
        }
    }

    // angle returns the interior angle in radians at point_index
    pub fn angle(&self, point_index: usize) -> f64 {
        interior_angle(&self.points, point_index)
    }

    pub fn angles(&self) -> Vec<f64> {
        (0..self.size()).map(|point_index| self.angle(point_index)).collect()
    }

    // apex returns the index of the distinguished corner of a half tile:
    // the 108° corner of a thick half, the 36° corner of a thin half
    pub fn apex(&self) -> Option<usize> {
        if !self.is_half() {
            return None;
        }
        let angles = self.angles().into_iter().enumerate();
        let apex = match self.kind {
            TileKind::Thick => angles.max_by(|(_, a), (_, b)| compare(a, b)),
            TileKind::Thin => angles.min_by(|(_, a), (_, b)| compare(a, b)),
        };
        apex.map(|(i, _)| i)
    }

    pub fn area(&self) -> f64 {
        -self.signed_area()
    }

    pub fn edges<'a>(&'a self) -> Vec<Edge<'a>> {
        Point::edges(&self.points)
    }

    // first_acute returns the index of the first corner whose angle is the kind's acute angle
    pub fn first_acute(&self) -> usize {
        let acute = self.kind.acute_angle();
        self.angles()
            .into_iter()
            .position(|angle| angle.approx_eq(acute, DEFAULT_F64_MARGIN))
            .unwrap_or(0)
    }

    pub fn is_half(&self) -> bool {
        self.shape == Shape::Half
    }

    pub fn is_thick(&self) -> bool {
        self.kind == TileKind::Thick
    }

    // overlaps runs a separating axis test over both tiles' edge normals.
    // Tiles which only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &ProtoTile) -> bool {
        self.edges()
            .iter()
            .chain(other.edges().iter())
            .map(Edge::normal)
            .all(|axis| {
                let (min0, max0) = project(&self.points, &axis);
                let (min1, max1) = project(&other.points, &axis);
                max0 - min1 > TOLERANCE && max1 - min0 > TOLERANCE
            })
    }

    // signed_area is negative for the clockwise traversal every ProtoTile holds
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }
}

impl std::fmt::Display for ProtoTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = if self.is_half() { "/2" } else { "" };
        write!(f, "{}{} {}", self.kind, suffix, self.points.iter().join(" "))
    }
}

fn compare(lhs: &f64, rhs: &f64) -> Ordering {
    lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal)
}

// interior_angle assumes a clockwise traversal: the interior at a corner is swept counter-clockwise
// from the ray towards the preceding corner to the ray towards the succeeding corner
fn interior_angle(points: &[Point], point_index: usize) -> f64 {
    let size = points.len();
    let prev = &points[(point_index + size - 1) % size];
    let next = &points[(point_index + 1) % size];
    Point::angle(next, &points[point_index], prev)
}

fn signed_area(points: &[Point]) -> f64 {
    Point::edges(points).iter().map(Edge::shoelace).sum::<f64>() / 2.
}

fn project(points: &[Point], axis: &Point) -> (f64, f64) {
    points
        .iter()
        .map(|point| point.dot(axis))
        .fold((f64::MAX, f64::MIN), |(min, max), value| (min.min(value), max.max(value)))
}

fn is_close(lhs: f64, rhs: f64) -> bool {
    lhs.approx_eq(rhs, DEFAULT_F64_MARGIN)
}

fn classify_rhombus(angles: &[f64], lengths: &[f64]) -> Option<TileKind> {
    if !lengths.iter().all(|length| is_close(*length, lengths[0])) {
        return None;
    }
    if !is_close(angles[0], angles[2]) || !is_close(angles[1], angles[3]) {
        return None;
    }
    let acute = angles[0].min(angles[1]);
    [TileKind::Thick, TileKind::Thin]
        .iter()
        .copied()
        .find(|kind| is_close(acute, kind.acute_angle()) && is_close(angles[0] + angles[1], PI))
}

// classify_half recognizes the two Robinson triangles: {36°, 36°, 108°} halves a thick rhombus
// and {36°, 72°, 72°} halves a thin one. The legs adjacent to the apex are equal.
fn classify_half(angles: &[f64], lengths: &[f64]) -> Option<TileKind> {
    let sorted = angles.iter().copied().sorted_by(|a, b| compare(a, b)).collect_vec();
    let (kind, apex_angle) = if is_close(sorted[0], to_rad(36.))
        && is_close(sorted[1], to_rad(36.))
        && is_close(sorted[2], to_rad(108.))
    {
        (TileKind::Thick, sorted[2])
    } else if is_close(sorted[0], to_rad(36.))
        && is_close(sorted[1], to_rad(72.))
        && is_close(sorted[2], to_rad(72.))
    {
        (TileKind::Thin, sorted[0])
    } else {
        return None;
    };
    let apex = angles.iter().position(|angle| *angle == apex_angle)?;
    // lengths[i] is the edge leaving corner i
    let legs = (lengths[(apex + 2) % 3], lengths[apex]);
    if is_close(legs.0, legs.1) { Some(kind) } else { None }
}
