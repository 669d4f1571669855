use crate::error::Result;
use common::{to_rad, TOLERANCE};
use geometry::{rotate, GeometryError, Point, ORIGIN, X};
use itertools::Itertools;
use tile::ProtoTile;

pub const FAMILIES: usize = 5;

// Pentagrid is five families of parallel lines, family j holding the lines x·e_j + γ_j = k for every
// integer k, where e_j is the unit vector at j fifths of a turn and γ_j the family's offset.
// Every crossing of two lines is dual to one unit rhombus of the tiling.
#[derive(Clone, Debug)]
pub struct Pentagrid {
    directions: [Point; FAMILIES],
    offsets: [f64; FAMILIES],
    radius: f64,
}

impl Pentagrid {
    // only crossings within radius of the origin produce tiles
    pub fn new(offsets: [f64; FAMILIES], radius: f64) -> Pentagrid {
        let mut directions = [ORIGIN; FAMILIES];
        for (j, direction) in directions.iter_mut().enumerate() {
            *direction = rotate(&X, j as f64 * to_rad(72.), &ORIGIN);
        }
        Pentagrid { directions, offsets, radius }
    }

    // pairs lists the unordered pairs of families in the order they are laid
    pub fn pairs() -> Vec<(usize, usize)> {
        (0..FAMILIES).tuple_combinations().collect()
    }

    pub fn directions(&self) -> &[Point; FAMILIES] {
        &self.directions
    }

    // intersection returns the crossing of line kr of family r with line ks of family s
    pub fn intersection(&self, (r, s): (usize, usize), (kr, ks): (i64, i64)) -> Result<Point> {
        let (er, es) = (&self.directions[r], &self.directions[s]);
        let det = er.cross(es);
        if det.abs() <= TOLERANCE {
            return Err(GeometryError::DegenerateLine(*er, *es).into());
        }
        let a = kr as f64 - self.offsets[r];
        let b = ks as f64 - self.offsets[s];
        Ok(Point((a * es.1 - b * er.1) / det, (b * er.0 - a * es.0) / det))
    }

    // region returns, per family, the index of the strip between grid lines containing point
    pub fn region(&self, point: &Point) -> [i64; FAMILIES] {
        let mut region = [0; FAMILIES];
        for (j, strip) in region.iter_mut().enumerate() {
            *strip = (point.dot(&self.directions[j]) + self.offsets[j]).ceil() as i64;
        }
        region
    }

    pub fn vertex(&self, region: &[i64; FAMILIES]) -> Point {
        region
            .iter()
            .zip(self.directions.iter())
            .fold(ORIGIN, |sum, (k, direction)| &sum + &direction.mul(*k as f64))
    }

    // rhombus returns the clockwise tile dual to the crossing of line kr of family r with line ks of family s.
    // Its corners are the four regions meeting at the crossing.
    pub fn rhombus(&self, (r, s): (usize, usize), (kr, ks): (i64, i64)) -> Result<ProtoTile> {
        let crossing = self.intersection((r, s), (kr, ks))?;
        let mut region = self.region(&crossing);
        // the crossing lies on both lines, so its strips in r and s are fixed by the line indices
        region[r] = kr;
        region[s] = ks;

        let (er, es) = (&self.directions[r], &self.directions[s]);
        let base = self.vertex(&region);
        let mut points = vec![base, &base + er, &(&base + er) + es, &base + es];
        if er.cross(es) > 0. {
            points[1..].reverse();
        }
        Ok(ProtoTile::new(points)?)
    }

    // rhombi returns the tiles of one pair of families whose crossings lie within radius of the origin
    pub fn rhombi(&self, pair: (usize, usize)) -> Result<Vec<ProtoTile>> {
        let widest = self.offsets.iter().fold(0_f64, |widest, offset| widest.max(offset.abs()));
        let extent = (self.radius + widest).ceil() as i64;
        let mut rhombi = vec![];
        for lines in (-extent..=extent).cartesian_product(-extent..=extent) {
            if self.intersection(pair, lines)?.norm() <= self.radius {
                rhombi.push(self.rhombus(pair, lines)?);
            }
        }
        Ok(rhombi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GRID_OFFSETS;
    use crate::error::Error;
    use common::approx_eq;
    use tile::{Shape, TileKind};

    fn grid() -> Pentagrid {
        Pentagrid::new(DEFAULT_GRID_OFFSETS, 3.)
    }

    #[test]
    fn test_pentagrid_directions() {
        let grid = grid();
        approx_eq!(&Point, &X, &grid.directions()[0]);
        approx_eq!(&Point, &Point(to_rad(144.).cos(), to_rad(144.).sin()), &grid.directions()[2]);
        let sum = grid.directions().iter().fold(ORIGIN, |sum, direction| &sum + direction);
        approx_eq!(&Point, &ORIGIN, &sum);
        assert_eq!(10, Pentagrid::pairs().len());
        assert_eq!((0, 1), Pentagrid::pairs()[0]);
    }

    #[test]
    fn test_pentagrid_intersection() {
        let grid = grid();
        let point = grid.intersection((1, 3), (2, -1)).unwrap();
        approx_eq!(f64, 2., point.dot(&grid.directions()[1]) + DEFAULT_GRID_OFFSETS[1]);
        approx_eq!(f64, -1., point.dot(&grid.directions()[3]) + DEFAULT_GRID_OFFSETS[3]);

        assert!(matches!(
            grid.intersection((2, 2), (0, 1)),
            Err(Error::DegenerateGeometry(GeometryError::DegenerateLine(_, _)))
        ));
    }

    #[test]
    fn test_pentagrid_region_vertex() {
        let grid = grid();
        assert_eq!([1, 1, 0, 1, 0], grid.region(&ORIGIN));
        let directions = grid.directions();
        let expected = &(&directions[0] + &directions[1]) + &directions[3];
        approx_eq!(&Point, &expected, &grid.vertex(&[1, 1, 0, 1, 0]));
    }

    #[test]
    fn test_pentagrid_rhombus() {
        let rhombus = grid().rhombus((0, 1), (0, 0)).unwrap();
        assert_eq!(TileKind::Thick, rhombus.kind);
        let expected = vec![
            Point(-0.809016994, -0.587785252),
            Point(-0.5, 0.363271264),
            Point(0.5, 0.363271264),
            Point(0.190983006, -0.587785252),
        ];
        for (expected, point) in expected.iter().zip(rhombus.points.iter()) {
            approx_eq!(&Point, expected, point);
        }
    }

    #[test]
    fn test_pentagrid_rhombus_kinds() {
        let grid = grid();
        for (r, s) in Pentagrid::pairs() {
            let rhombus = grid.rhombus((r, s), (1, -2)).unwrap();
            let expected = if s - r == 1 || s - r == 4 { TileKind::Thick } else { TileKind::Thin };
            assert_eq!(expected, rhombus.kind, "families {} and {}", r, s);
            assert_eq!(Shape::Rhombus, rhombus.shape);
            assert!(rhombus.signed_area() < 0.);
        }
    }

    #[test]
    fn test_pentagrid_rhombi_are_disjoint() {
        let grid = grid();
        let counts = Pentagrid::pairs()
            .into_iter()
            .map(|pair| grid.rhombi(pair).unwrap().len())
            .collect_vec();
        assert_eq!(vec![28, 17, 18, 27, 27, 18, 16, 27, 17, 27], counts);

        let rhombi = Pentagrid::pairs()
            .into_iter()
            .map(|pair| grid.rhombi(pair).unwrap())
            .concat();
        assert_eq!(222, rhombi.len());
        for (lhs, rhs) in rhombi.iter().tuple_combinations() {
            assert!(!lhs.overlaps(rhs), "{} overlaps {}", lhs, rhs);
        }
    }
}
