use crate::error::{Error, Result};
use common::TOLERANCE;
use geometry::Point;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::{collections::BTreeSet, f64::consts::TAU};

// VertexIndex is allocated sequentially by the Registry and never reused
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct VertexIndex(pub usize);

impl std::fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum VertexStatus {
    Active,
    Retired,
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub position: Point,
    pub status: VertexStatus,
    pub angle: f64, // radians of tile interior accumulated at this vertex
    pub connections: usize,
    pub adjacency: BTreeSet<VertexIndex>,
}

impl Vertex {
    fn new(position: Point) -> Vertex {
        Vertex {
            position,
            status: VertexStatus::Active,
            angle: 0.,
            connections: 0,
            adjacency: BTreeSet::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == VertexStatus::Active
    }

    // is_surrounded reports whether the accumulated angle covers the full turn
    pub fn is_surrounded(&self) -> bool {
        self.angle >= TAU - TOLERANCE
    }
}

// Edge is an unordered pair of vertex indices, stored with the lower index first
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Edge(VertexIndex, VertexIndex);

impl Edge {
    pub fn new(a: VertexIndex, b: VertexIndex) -> Edge {
        if a <= b { Edge(a, b) } else { Edge(b, a) }
    }

    pub fn endpoints(&self) -> (VertexIndex, VertexIndex) {
        (self.0, self.1)
    }
}

// Registry is the single source of truth for vertex identity: positions within TOLERANCE of each other
// are the same vertex, and the first position seen is the one kept.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    vertices: IndexMap<VertexIndex, Vertex>,
    edges: IndexSet<Edge>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    // active returns the indices of all Active vertices in ascending order
    pub fn active<'a>(&'a self) -> impl Iterator<Item = VertexIndex> + 'a {
        self.vertices
            .iter()
            .filter(|(_, vertex)| vertex.is_active())
            .map(|(index, _)| *index)
    }

    // add_angle accumulates a tile's interior angle at index
    pub fn add_angle(&mut self, index: VertexIndex, angle: f64) -> Result<()> {
        self.vertex_mut(index)?.angle += angle;
        Ok(())
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    // find scans every vertex, active and retired, for one within TOLERANCE of position.
    // More than one match means the dedup invariant was broken upstream.
    pub fn find(&self, position: &Point) -> Result<Option<VertexIndex>> {
        let matches: Vec<VertexIndex> = self
            .vertices
            .iter()
            .filter(|(_, vertex)| vertex.position.is_near(position))
            .map(|(index, _)| *index)
            .collect();
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            _ => Err(Error::AmbiguousVertexMatch(*position, matches)),
        }
    }

    pub fn get(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VertexIndex, &Vertex)> {
        self.vertices.iter()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    // mark_retired is idempotent, returning whether the vertex was Active before the call
    pub fn mark_retired(&mut self, index: VertexIndex) -> Result<bool> {
        let vertex = self.vertex_mut(index)?;
        let was_active = vertex.is_active();
        vertex.status = VertexStatus::Retired;
        Ok(was_active)
    }

    pub fn next_index(&self) -> VertexIndex {
        VertexIndex(self.vertices.len())
    }

    pub fn position(&self, index: VertexIndex) -> Result<Point> {
        Ok(self.vertex(index)?.position)
    }

    // record_adjacency links a and b once per unordered pair, returning whether the pair was new
    pub fn record_adjacency(&mut self, a: VertexIndex, b: VertexIndex) -> Result<bool> {
        self.vertex(a)?;
        self.vertex(b)?;
        if a == b || !self.edges.insert(Edge::new(a, b)) {
            return Ok(false);
        }
        for (index, neighbor) in [(a, b), (b, a)].iter() {
            let vertex = self.vertex_mut(*index)?;
            if vertex.adjacency.insert(*neighbor) {
                vertex.connections += 1;
            }
        }
        Ok(true)
    }

    // reset_bookkeeping zeroes every vertex's angle, connections and adjacency and forgets all claimed edges.
    // Status is untouched: retirement is final.
    pub fn reset_bookkeeping(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.angle = 0.;
            vertex.connections = 0;
            vertex.adjacency.clear();
        }
        self.edges.clear();
    }

    // resolve_or_insert returns the index of the vertex within TOLERANCE of position,
    // allocating the next index when there is none
    pub fn resolve_or_insert(&mut self, position: Point) -> Result<VertexIndex> {
        match self.find(&position)? {
            Some(index) => Ok(index),
            None => Ok(self.insert(position)),
        }
    }

    // retire_if_surrounded retires an Active vertex whose angle covers the full turn,
    // returning whether it was retired by this call
    pub fn retire_if_surrounded(&mut self, index: VertexIndex) -> Result<bool> {
        let vertex = self.vertex(index)?;
        if vertex.is_active() && vertex.is_surrounded() {
            return self.mark_retired(index);
        }
        Ok(false)
    }

    pub fn vertex(&self, index: VertexIndex) -> Result<&Vertex> {
        self.vertices.get(&index).ok_or(Error::UnknownVertex(index))
    }

    // insert allocates the next index without checking for nearby vertices
    fn insert(&mut self, position: Point) -> VertexIndex {
        let index = self.next_index();
        self.vertices.insert(index, Vertex::new(position));
        index
    }

    fn vertex_mut(&mut self, index: VertexIndex) -> Result<&mut Vertex> {
        self.vertices.get_mut(&index).ok_or(Error::UnknownVertex(index))
    }
}
