use crate::{Corner, TileKind};
use geometry::{rotate, Point, ORIGIN, X};
use std::iter;

// rhombus chains three unit edges from anchor, the first along +x, turning clockwise by the
// exterior angle of each corner passed, then rotates the result by orientation about anchor.
// corner selects which of the kind's two angles sits at anchor.
pub fn rhombus(kind: TileKind, corner: Corner, anchor: &Point, orientation: f64) -> Vec<Point> {
    let turns = match corner {
        Corner::Acute => [-kind.acute_angle(), -kind.obtuse_angle()],
        Corner::Obtuse => [-kind.obtuse_angle(), -kind.acute_angle()],
    };

    let mut heading = 0.;
    let mut cursor = *anchor;
    let mut points = Vec::with_capacity(4);
    points.push(cursor);
    for turn in iter::once(0.).chain(turns.iter().copied()) {
        heading += turn;
        cursor = &cursor + &rotate(&X, heading, &ORIGIN);
        points.push(cursor);
    }

    points
        .iter()
        .map(|point| rotate(point, orientation, anchor))
        .collect()
}

pub fn make_thick_rhombus(anchor: &Point, orientation: f64) -> Vec<Point> {
    rhombus(TileKind::Thick, Corner::Acute, anchor, orientation)
}

pub fn make_thin_rhombus(anchor: &Point, orientation: f64) -> Vec<Point> {
    rhombus(TileKind::Thin, Corner::Acute, anchor, orientation)
}
