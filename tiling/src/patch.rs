use crate::{
    error::Result,
    vertex::{Edge, Registry, VertexIndex},
};
use geometry::{GeometryError, Point};
use itertools::{izip, Itertools};
use serde::Serialize;
use std::collections::BTreeSet;
use tile::{ProtoTile, TileKind};

// Tile is an immutable, clockwise cycle of registry indices
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub kind: TileKind,
    pub vertices: Vec<VertexIndex>,
    pub generation: usize,
}

impl Tile {
    // edges pairs each vertex with its successor, wrapping the last vertex back to the first
    pub fn edges(&self) -> Vec<Edge> {
        izip!(
            self.vertices.iter(),
            self.vertices.iter().cycle().skip(1).take(self.vertices.len()),
        )
            .map(|(a, b)| Edge::new(*a, *b))
            .collect()
    }

    pub fn is_half(&self) -> bool {
        self.vertices.len() == 3
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = if self.is_half() { "/2" } else { "" };
        write!(f, "{}{} [{}]", self.kind, suffix, self.vertices.iter().join(","))
    }
}

// Patch owns the vertex registry and the append-only tile list
#[derive(Clone, Debug, Default)]
pub struct Patch {
    registry: Registry,
    tiles: Vec<Tile>,
}

// Staged is a step resolved and booked against a scratch copy of the registry.
// Committing it swaps the copy in, so a step that fails to stage leaves the patch untouched.
#[derive(Debug)]
pub(crate) struct Staged {
    registry: Registry,
    committed: Committed,
}

#[derive(Debug, Default)]
pub(crate) struct Committed {
    pub new_tiles: Vec<Tile>,
    pub new_vertices: Vec<(VertexIndex, Point)>,
    pub touched: BTreeSet<VertexIndex>,
    pub retired: Vec<VertexIndex>,
}

impl Patch {
    pub fn new() -> Patch {
        Patch::default()
    }

    pub fn positions(&self, tile: &Tile) -> Result<Vec<Point>> {
        tile.vertices.iter().map(|index| self.registry.position(*index)).collect()
    }

    pub fn proto_tile(&self, tile: &Tile) -> Result<ProtoTile> {
        Ok(ProtoTile::new(self.positions(tile)?)?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    // stage resolves every corner of every proto tile through resolve_or_insert on a copy of the registry,
    // so vertices shared by tiles of the same step are allocated once. It then accumulates angles and
    // adjacency on the copy and retires the vertices the step surrounds.
    // An epoch stage rebuilds vertex bookkeeping from the staged tiles alone.
    pub(crate) fn stage(
        &self,
        proto_tiles: Vec<ProtoTile>,
        generation: usize,
        epoch: bool,
    ) -> Result<Staged> {
        let mut registry = self.registry.clone();
        let first_new = registry.next_index().0;
        let mut resolved = Vec::with_capacity(proto_tiles.len());

        for proto_tile in proto_tiles.into_iter() {
            let indices = proto_tile
                .points
                .iter()
                .map(|point| registry.resolve_or_insert(*point))
                .collect::<Result<Vec<VertexIndex>>>()?;
            if !indices.iter().all_unique() {
                return Err(GeometryError::CoincidentCorners(proto_tile.points).into());
            }
            resolved.push((proto_tile, indices));
        }

        let mut committed = Committed {
            new_vertices: registry
                .iter()
                .skip(first_new)
                .map(|(index, vertex)| (*index, vertex.position))
                .collect(),
            ..Committed::default()
        };

        if epoch {
            registry.reset_bookkeeping();
        }

        for (proto_tile, indices) in resolved.into_iter() {
            let tile = Tile { kind: proto_tile.kind, vertices: indices, generation };
            for (point_index, index) in tile.vertices.iter().enumerate() {
                registry.add_angle(*index, proto_tile.angle(point_index))?;
                committed.touched.insert(*index);
            }
            for edge in tile.edges().into_iter() {
                let (a, b) = edge.endpoints();
                registry.record_adjacency(a, b)?;
            }
            committed.new_tiles.push(tile);
        }

        for index in committed.touched.iter() {
            if registry.retire_if_surrounded(*index)? {
                committed.retired.push(*index);
            }
        }

        Ok(Staged { registry, committed })
    }

    pub(crate) fn commit(&mut self, staged: Staged) -> Committed {
        let Staged { registry, committed } = staged;
        self.registry = registry;
        for tile in committed.new_tiles.iter() {
            console::debug!("placed {}", tile);
            self.tiles.push(tile.clone());
        }
        committed
    }

    #[cfg(test)]
    pub(crate) fn push_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, vertex::VertexStatus};
    use common::{approx_eq, to_rad, TOLERANCE};
    use geometry::ORIGIN;
    use tile::make_thick_rhombus;

    fn seed(orientations: &[f64]) -> Vec<ProtoTile> {
        seed_at(&ORIGIN, orientations)
    }

    fn seed_at(anchor: &Point, orientations: &[f64]) -> Vec<ProtoTile> {
        orientations
            .iter()
            .map(|orientation| make_thick_rhombus(anchor, to_rad(*orientation)))
            .map(|points| ProtoTile::new(points).unwrap())
            .collect()
    }

    fn indices(values: &[usize]) -> Vec<VertexIndex> {
        values.iter().map(|value| VertexIndex(*value)).collect()
    }

    #[test]
    fn test_patch_stage_dedups_within_step() {
        let patch = Patch::new();
        let staged = patch.stage(seed(&[0., -72.]), 0, false).unwrap();
        assert_eq!(6, staged.committed.new_vertices.len());
        assert_eq!(indices(&[0, 1, 2, 3]), staged.committed.new_tiles[0].vertices);
        assert_eq!(indices(&[0, 3, 4, 5]), staged.committed.new_tiles[1].vertices);
    }

    #[test]
    fn test_patch_stage_is_read_only() {
        let patch = Patch::new();
        patch.stage(seed(&[0.]), 0, false).unwrap();
        assert!(patch.registry().is_empty());
        assert!(patch.tiles().is_empty());
    }

    #[test]
    fn test_patch_stage_rejects_ambiguous_corner() {
        let mut patch = Patch::new();
        let staged = patch.stage(seed(&[0.]), 0, false).unwrap();
        patch.commit(staged);
        let staged = patch.stage(seed_at(&Point(1.5 * TOLERANCE, 0.), &[0.]), 0, false).unwrap();
        patch.commit(staged);
        assert_eq!(8, patch.registry().len());

        // halfway between two registered corners
        match patch.stage(seed_at(&Point(0.75 * TOLERANCE, 0.), &[0.]), 0, false) {
            Err(Error::AmbiguousVertexMatch(_, matches)) => assert_eq!(indices(&[0, 4]), matches),
            result => panic!("expected AmbiguousVertexMatch, got {:?}", result.map(|_| ())),
        }
        assert_eq!(8, patch.registry().len());
        assert_eq!(2, patch.tiles().len());
    }

    #[test]
    fn test_patch_commit() {
        let mut patch = Patch::new();
        let staged = patch.stage(seed(&[0., -72.]), 0, false).unwrap();
        let committed = patch.commit(staged);

        assert_eq!(2, committed.new_tiles.len());
        assert_eq!(6, committed.new_vertices.len());
        assert_eq!(6, patch.registry().len());
        assert_eq!(2, patch.tiles().len());
        assert!(committed.retired.is_empty());

        let origin = patch.registry().vertex(VertexIndex(0)).unwrap();
        approx_eq!(f64, to_rad(144.), origin.angle);
        assert_eq!(3, origin.connections);

        // a later step resolves against the committed vertices
        let staged = patch.stage(seed(&[-144.]), 0, false).unwrap();
        assert_eq!(2, staged.committed.new_vertices.len());
        assert_eq!(indices(&[0, 5, 6, 7]), staged.committed.new_tiles[0].vertices);
    }

    #[test]
    fn test_patch_commit_retires() {
        let mut patch = Patch::new();
        let staged = patch.stage(seed(&[0., -72., -144., -216., -288.]), 0, false).unwrap();
        let committed = patch.commit(staged);
        assert_eq!(vec![VertexIndex(0)], committed.retired);
        assert_eq!(11, patch.registry().len());
        let origin = patch.registry().vertex(VertexIndex(0)).unwrap();
        assert_eq!(VertexStatus::Retired, origin.status);
        assert_eq!(5, origin.connections);
    }

    #[test]
    fn test_patch_commit_epoch_resets_bookkeeping() {
        let mut patch = Patch::new();
        let staged = patch.stage(seed(&[0., -72.]), 0, false).unwrap();
        patch.commit(staged);

        let staged = patch.stage(seed(&[0.]), 1, true).unwrap();
        assert!(staged.committed.new_vertices.is_empty());
        patch.commit(staged);

        let origin = patch.registry().vertex(VertexIndex(0)).unwrap();
        approx_eq!(f64, to_rad(72.), origin.angle);
        assert_eq!(2, origin.connections);
        assert_eq!(4, patch.registry().edges().count());
        assert_eq!(3, patch.tiles().len());
        assert_eq!(1, patch.tiles()[2].generation);
    }

    #[test]
    fn test_tile_edges() {
        let tile = Tile {
            kind: TileKind::Thin,
            vertices: indices(&[1, 10, 11, 2]),
            generation: 0,
        };
        assert_eq!(
            vec![
                Edge::new(VertexIndex(1), VertexIndex(10)),
                Edge::new(VertexIndex(10), VertexIndex(11)),
                Edge::new(VertexIndex(11), VertexIndex(2)),
                Edge::new(VertexIndex(2), VertexIndex(1)),
            ],
            tile.edges()
        );
        assert!(!tile.is_half());
        assert_eq!("TNR [1,10,11,2]", format!("{}", tile));
    }
}
