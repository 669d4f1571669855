use crate::{
    config::{Config, Mode},
    error::Result,
    frontier::propose,
    patch::{Committed, Patch, Tile},
    pentagrid::Pentagrid,
    substitution::inflate_all,
    vertex::{Edge, Registry, Vertex, VertexIndex, VertexStatus},
};
use geometry::{Point, ORIGIN};
use itertools::Itertools;
use serde::Serialize;
use tile::{make_thick_rhombus, ProtoTile, TileKind};

// SEED_COUNT thick rhombi are placed around the origin before growth begins
pub const SEED_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum TilingState {
    Empty,
    Seeding,
    Growing,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VertexUpdate {
    pub index: VertexIndex,
    pub angle: f64,
    pub connections: usize,
    pub status: VertexStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdvanceResult {
    pub new_tiles: Vec<Tile>,
    pub new_vertices: Vec<(VertexIndex, Point)>,
    pub updated_vertices: Vec<VertexUpdate>,
    pub state: TilingState,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexRecord {
    pub index: VertexIndex,
    pub position: (f64, f64),
    pub status: VertexStatus,
    pub angle: f64,
    pub connections: usize,
}

// Snapshot is a read-only copy of everything a renderer needs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub vertices: Vec<VertexRecord>,
    pub tiles: Vec<Tile>,
    pub edges: Vec<Edge>,
}

pub struct Tiling {
    config: Config,
    patch: Patch,
    state: TilingState,
    generation: usize,
    grid_pair: usize,
}

impl Tiling {
    pub fn new(config: Config) -> Tiling {
        Tiling {
            config,
            patch: Patch::new(),
            state: TilingState::Empty,
            generation: 0,
            grid_pair: 0,
        }
    }

    // advance performs one step: a seed tile, an inflation epoch, a frontier tile or the rhombi of one
    // pair of grid families depending on state and mode. A failed step leaves the tiling exactly as it was.
    pub fn advance(&mut self) -> Result<AdvanceResult> {
        let result = match (self.state, self.config.mode) {
            (TilingState::Complete, _) => Ok(self.complete()),
            (_, Mode::Pentagrid) => self.lay_grid(),
            (TilingState::Empty, _) | (TilingState::Seeding, _) => self.seed(),
            (TilingState::Growing, Mode::Inflation) => self.inflate(),
            (TilingState::Growing, Mode::Frontier) => self.grow(),
        };
        if let Err(err) = &result {
            console::warning!("advance rolled back: {}", err);
        }
        result
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // generation is the index of the latest inflation epoch, 0 for the seeds
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn registry(&self) -> &Registry {
        self.patch.registry()
    }

    pub fn reset(&mut self) {
        self.patch = Patch::new();
        self.generation = 0;
        self.grid_pair = 0;
        self.transition(TilingState::Empty);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vertices: self
                .registry()
                .iter()
                .map(|(index, vertex)| VertexRecord {
                    index: *index,
                    position: vertex.position.values(),
                    status: vertex.status,
                    angle: vertex.angle,
                    connections: vertex.connections,
                })
                .collect(),
            tiles: self.patch.tiles().to_vec(),
            edges: self.registry().edges().copied().collect(),
        }
    }

    pub fn state(&self) -> TilingState {
        self.state
    }

    pub fn tiles(&self) -> &[Tile] {
        self.patch.tiles()
    }

    fn complete(&mut self) -> AdvanceResult {
        self.transition(TilingState::Complete);
        AdvanceResult {
            new_tiles: vec![],
            new_vertices: vec![],
            updated_vertices: vec![],
            state: self.state,
        }
    }

    fn grow(&mut self) -> Result<AdvanceResult> {
        if let Some(max_tiles) = self.config.max_tiles {
            if self.tiles().len() >= max_tiles {
                return Ok(self.complete());
            }
        }
        let (anchor, proto_tile) = match propose(&self.patch)? {
            Some(proposal) => proposal,
            None => return Ok(self.complete()),
        };
        console::debug!("anchoring {} at vertex {}", proto_tile, anchor);
        let staged = self.patch.stage(vec![proto_tile], self.generation, false)?;
        let committed = self.patch.commit(staged);
        Ok(self.result(committed, false))
    }

    // inflate substitutes every tile of the latest generation as one epoch
    fn inflate(&mut self) -> Result<AdvanceResult> {
        if let Some(max_generations) = self.config.max_generations {
            if self.generation >= max_generations {
                return Ok(self.complete());
            }
        }
        let parents = self
            .tiles()
            .iter()
            .filter(|tile| tile.generation == self.generation)
            .map(|tile| self.patch.proto_tile(tile))
            .collect::<Result<Vec<ProtoTile>>>()?;
        let staged = self.patch.stage(inflate_all(&parents)?, self.generation + 1, true)?;
        let committed = self.patch.commit(staged);
        self.generation += 1;
        console::log!(
            "committed generation {}: {} tiles, {} new vertices",
            self.generation,
            committed.new_tiles.len(),
            committed.new_vertices.len(),
        );
        Ok(self.result(committed, true))
    }

    // lay_grid places the rhombi of the next pair of grid families. The grid needs no seeds.
    fn lay_grid(&mut self) -> Result<AdvanceResult> {
        if let Some(max_tiles) = self.config.max_tiles {
            if self.tiles().len() >= max_tiles {
                return Ok(self.complete());
            }
        }
        let pair = match Pentagrid::pairs().get(self.grid_pair) {
            Some(pair) => *pair,
            None => return Ok(self.complete()),
        };
        let grid = Pentagrid::new(self.config.grid_offsets, self.config.grid_radius);
        let staged = self.patch.stage(grid.rhombi(pair)?, self.generation, false)?;
        let committed = self.patch.commit(staged);
        self.grid_pair += 1;
        console::debug!("laid families {:?}: {} tiles", pair, committed.new_tiles.len());
        self.transition(TilingState::Growing);
        Ok(self.result(committed, false))
    }

    fn result(&self, committed: Committed, epoch: bool) -> AdvanceResult {
        if !committed.retired.is_empty() {
            console::debug!("retired vertices {}", committed.retired.iter().join(", "));
        }
        let registry = self.registry();
        let update = |(index, vertex): (&VertexIndex, &Vertex)| VertexUpdate {
            index: *index,
            angle: vertex.angle,
            connections: vertex.connections,
            status: vertex.status,
        };
        // an epoch rewrites the bookkeeping of every vertex
        let updated_vertices = if epoch {
            registry.iter().map(update).collect()
        } else {
            committed
                .touched
                .iter()
                .filter_map(|index| registry.get(*index).map(|vertex| update((index, vertex))))
                .collect()
        };
        AdvanceResult {
            new_tiles: committed.new_tiles,
            new_vertices: committed.new_vertices,
            updated_vertices,
            state: self.state,
        }
    }

    fn seed(&mut self) -> Result<AdvanceResult> {
        let placed = self.tiles().len();
        let orientation = -(placed as f64) * TileKind::Thick.acute_angle();
        let proto_tile = ProtoTile::new(make_thick_rhombus(&ORIGIN, orientation))?;
        let staged = self.patch.stage(vec![proto_tile], self.generation, false)?;
        let committed = self.patch.commit(staged);
        if placed + 1 >= SEED_COUNT {
            self.transition(TilingState::Growing);
        } else {
            self.transition(TilingState::Seeding);
        }
        Ok(self.result(committed, false))
    }

    fn transition(&mut self, state: TilingState) {
        if self.state != state {
            console::log!("tiling {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

impl Default for Tiling {
    fn default() -> Tiling {
        Tiling::new(Config::default())
    }
}
