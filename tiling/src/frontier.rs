use crate::{
    error::Result,
    patch::{Patch, Tile},
    vertex::{Registry, VertexIndex, VertexStatus},
};
use common::TOLERANCE;
use geometry::{signed_angle, X};
use itertools::Itertools;
use std::{collections::BTreeSet, f64::consts::TAU};
use tile::{rhombus, Corner, ProtoTile, TileKind};

// CANDIDATES is the order in which (kind, corner at anchor) pairs are tried
const CANDIDATES: [(TileKind, Corner); 4] = [
    (TileKind::Thin, Corner::Obtuse),
    (TileKind::Thick, Corner::Obtuse),
    (TileKind::Thick, Corner::Acute),
    (TileKind::Thin, Corner::Acute),
];

// next_clockwise_vertex finds, among the other Active vertices, the one whose direction from `from`
// makes the smallest clockwise turn away from +x
pub fn next_clockwise_vertex(registry: &Registry, from: VertexIndex) -> Option<VertexIndex> {
    let origin = registry.get(from)?.position;
    registry
        .active()
        .filter(|index| *index != from)
        .filter_map(|index| {
            let direction = &registry.get(index)?.position - &origin;
            let angle = signed_angle(&X, &direction);
            if angle < 0. { Some((index, angle)) } else { None }
        })
        .fold(None, |best: Option<(VertexIndex, f64)>, (index, angle)| match best {
            Some((_, best_angle)) if best_angle >= angle => best,
            _ => Some((index, angle)),
        })
        .map(|(index, _)| index)
}

// anchors lists the Active vertices eligible to anchor the next tile: those with a next clockwise
// vertex first, then the rest, each group in ascending index order
pub fn anchors(registry: &Registry) -> Vec<VertexIndex> {
    let (reachable, stranded): (Vec<VertexIndex>, Vec<VertexIndex>) = registry
        .active()
        .partition(|index| next_clockwise_vertex(registry, *index).is_some());
    reachable.into_iter().chain(stranded.into_iter()).collect()
}

// open_edges returns the vertices which bound an unclaimed wedge clockwise of anchor.
// A clockwise tile covers the wedge at anchor swept counter-clockwise from its preceding corner
// to its succeeding corner, so a preceding corner that no tile succeeds with is open.
pub fn open_edges(tiles: &[Tile], anchor: VertexIndex) -> Vec<VertexIndex> {
    let mut prevs = BTreeSet::new();
    let mut nexts = BTreeSet::new();
    for tile in tiles.iter() {
        let size = tile.size();
        for (i, index) in tile.vertices.iter().enumerate() {
            if *index == anchor {
                prevs.insert(tile.vertices[(i + size - 1) % size]);
                nexts.insert(tile.vertices[(i + 1) % size]);
            }
        }
    }
    prevs.difference(&nexts).copied().collect()
}

// propose searches the anchors in order for the first candidate rhombus whose corners all fit within
// their vertices' remaining angle and which overlaps no placed tile. None means no placement exists.
pub fn propose(patch: &Patch) -> Result<Option<(VertexIndex, ProtoTile)>> {
    let registry = patch.registry();
    let placed: Vec<ProtoTile> = patch
        .tiles()
        .iter()
        .map(|tile| patch.proto_tile(tile))
        .collect::<Result<_>>()?;

    for anchor in anchors(registry) {
        let vertex = registry.vertex(anchor)?;
        let remaining = TAU - vertex.angle;

        let mut headings = vec![];
        for start in open_edges(patch.tiles(), anchor) {
            headings.push((&registry.position(start)? - &vertex.position).arg());
        }
        if headings.is_empty() {
            headings.push(match next_clockwise_vertex(registry, anchor) {
                Some(next) => (&registry.position(next)? - &vertex.position).arg(),
                None => 0.,
            });
        }

        let candidates = CANDIDATES
            .iter()
            .filter(|(kind, corner)| kind.angle(*corner) <= remaining + TOLERANCE)
            .sorted_by_key(|(kind, corner)| (kind.angle(*corner) - remaining).abs() > TOLERANCE)
            .collect_vec();

        for heading in headings.iter() {
            for (kind, corner) in candidates.iter() {
                let points = rhombus(*kind, *corner, &vertex.position, *heading);
                let proto_tile = ProtoTile::new(points)?;
                if fits(registry, &placed, &proto_tile)? {
                    return Ok(Some((anchor, proto_tile)));
                }
            }
        }
    }

    Ok(None)
}

fn fits(registry: &Registry, placed: &[ProtoTile], proto_tile: &ProtoTile) -> Result<bool> {
    for (point_index, point) in proto_tile.points.iter().enumerate() {
        if let Some(index) = registry.find(point)? {
            let vertex = registry.vertex(index)?;
            if vertex.status == VertexStatus::Retired {
                return Ok(false);
            }
            if vertex.angle + proto_tile.angle(point_index) > TAU + TOLERANCE {
                return Ok(false);
            }
        }
    }
    Ok(!placed.iter().any(|tile| tile.overlaps(proto_tile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::to_rad;
    use geometry::{Point, ORIGIN};
    use tile::make_thick_rhombus;

    fn star() -> Patch {
        let mut patch = Patch::new();
        let seeds = (0..5)
            .map(|k| ProtoTile::new(make_thick_rhombus(&ORIGIN, to_rad(-72. * k as f64))).unwrap())
            .collect();
        let staged = patch.stage(seeds, 0, false).unwrap();
        patch.commit(staged);
        patch
    }

    #[test]
    fn test_next_clockwise_vertex() {
        let mut registry = Registry::new();
        let from = registry.resolve_or_insert(Point(0., 0.)).unwrap();
        let above = registry.resolve_or_insert(Point(1., 1.)).unwrap();
        assert_eq!(None, next_clockwise_vertex(&registry, from));
        assert_eq!(Some(from), next_clockwise_vertex(&registry, above));

        let steep = registry.resolve_or_insert(Point(0.1, -1.)).unwrap();
        let shallow = registry.resolve_or_insert(Point(1., -0.1)).unwrap();
        assert_eq!(Some(shallow), next_clockwise_vertex(&registry, from));

        registry.mark_retired(shallow).unwrap();
        assert_eq!(Some(steep), next_clockwise_vertex(&registry, from));
    }

    #[test]
    fn test_anchors() {
        let patch = star();
        let anchors = anchors(patch.registry());
        // the origin is retired after five seeds
        assert!(!anchors.contains(&VertexIndex(0)));
        assert_eq!(VertexIndex(1), anchors[0]);
        assert_eq!(10, anchors.len());

        // the lowest vertex of the star has nothing clockwise of it and is tried last
        assert_eq!(None, next_clockwise_vertex(patch.registry(), VertexIndex(4)));
        assert_eq!(Some(&VertexIndex(4)), anchors.last());
        assert!(anchors[..9]
            .iter()
            .all(|index| next_clockwise_vertex(patch.registry(), *index).is_some()));
    }

    #[test]
    fn test_open_edges() {
        let patch = star();
        assert_eq!(vec![VertexIndex(10)], open_edges(patch.tiles(), VertexIndex(1)));
        assert_eq!(vec![VertexIndex(1)], open_edges(patch.tiles(), VertexIndex(2)));
        assert!(open_edges(patch.tiles(), VertexIndex(0)).is_empty());
    }

    #[test]
    fn test_propose_closes_anchor() {
        let patch = star();
        let (anchor, proto_tile) = propose(&patch).unwrap().unwrap();
        assert_eq!(VertexIndex(1), anchor);
        assert_eq!(TileKind::Thin, proto_tile.kind);
        assert_eq!(Point(1., 0.), proto_tile.points[0]);
        assert_eq!(Point(1.309017, 0.951057), proto_tile.points[1]);
        assert_eq!(Point(1.618034, 0.), proto_tile.points[2]);
        assert_eq!(Point(1.309017, -0.951057), proto_tile.points[3]);
    }

    #[test]
    fn test_propose_empty() {
        assert!(propose(&Patch::new()).unwrap().is_none());
    }
}
