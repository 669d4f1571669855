use crate::error::Result;
use geometry::{reflect, Point};
use itertools::Itertools;
use tile::{ProtoTile, Shape, TileKind};

// PHI is the golden ratio, the scale factor between successive generations
pub const PHI: f64 = 1.618_033_988_749_895;

// Triangle is a Robinson triangle: half of a rhombus, split along the diagonal joining its acute
// corners (thick) or its obtuse corners (thin). apex is the corner off the split diagonal b -> c.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub kind: TileKind,
    pub apex: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    fn new(kind: TileKind, apex: Point, b: Point, c: Point) -> Triangle {
        Triangle { kind, apex, b, c }
    }

    // is_twin reports whether other is this triangle mirrored across their shared base
    fn is_twin(&self, other: &Triangle, mirrored_apex: &Point) -> bool {
        self.kind == other.kind
            && self.b.is_near(&other.b)
            && self.c.is_near(&other.c)
            && other.apex.is_near(mirrored_apex)
    }

    // join returns the clockwise rhombus formed with twin, starting at an acute corner
    fn join(&self, twin: &Triangle) -> Vec<Point> {
        let (a, b, c, twin_apex) = (self.apex, self.b, self.c, twin.apex);
        match self.kind {
            TileKind::Thick if is_clockwise(&b, &a, &c) => vec![b, a, c, twin_apex],
            TileKind::Thick => vec![b, twin_apex, c, a],
            TileKind::Thin if is_clockwise(&a, &b, &c) => vec![a, b, twin_apex, c],
            TileKind::Thin => vec![twin_apex, b, a, c],
        }
    }

    // half returns the clockwise corners of this triangle as an unpaired half tile
    fn half(&self) -> Vec<Point> {
        if is_clockwise(&self.apex, &self.b, &self.c) {
            vec![self.apex, self.b, self.c]
        } else {
            vec![self.b, self.apex, self.c]
        }
    }
}

fn is_clockwise(a: &Point, b: &Point, c: &Point) -> bool {
    (b - a).cross(&(c - a)) < 0.
}

// decompose splits a tile into its Robinson triangles
pub fn decompose(tile: &ProtoTile) -> Vec<Triangle> {
    let kind = tile.kind;
    match tile.shape {
        Shape::Rhombus => {
            let mut p = tile.points.clone();
            p.rotate_left(tile.first_acute());
            match kind {
                TileKind::Thick => vec![
                    Triangle::new(kind, p[1], p[0], p[2]),
                    Triangle::new(kind, p[3], p[0], p[2]),
                ],
                TileKind::Thin => vec![
                    Triangle::new(kind, p[0], p[1], p[3]),
                    Triangle::new(kind, p[2], p[1], p[3]),
                ],
            }
        }
        Shape::Half => {
            let p = &tile.points;
            let triangle = match tile.apex().unwrap_or(0) {
                0 => Triangle::new(kind, p[0], p[1], p[2]),
                1 => Triangle::new(kind, p[1], p[0], p[2]),
                _ => Triangle::new(kind, p[2], p[0], p[1]),
            };
            vec![triangle]
        }
    }
}

// subdivide replaces a triangle with the triangles one generation down, each edge scaled by 1/φ
pub fn subdivide(triangle: &Triangle) -> Vec<Triangle> {
    let Triangle { kind, apex, b, c } = *triangle;
    match kind {
        TileKind::Thin => {
            let p = apex.lerp(&b, 1. / PHI);
            vec![
                Triangle::new(TileKind::Thin, c, p, b),
                Triangle::new(TileKind::Thick, p, c, apex),
            ]
        }
        TileKind::Thick => {
            let q = b.lerp(&apex, 1. / PHI);
            let r = b.lerp(&c, 1. / PHI);
            vec![
                Triangle::new(TileKind::Thick, r, c, apex),
                Triangle::new(TileKind::Thick, q, r, b),
                Triangle::new(TileKind::Thin, r, q, apex),
            ]
        }
    }
}

// recombine pairs mirror twin triangles back into full rhombi, in order of each pair's first member.
// Triangles without a twin become half tiles.
pub fn recombine(triangles: &[Triangle]) -> Result<Vec<ProtoTile>> {
    let mut paired = vec![false; triangles.len()];
    let mut tiles = Vec::with_capacity(triangles.len());

    for (i, triangle) in triangles.iter().enumerate() {
        if paired[i] {
            continue;
        }
        let mirrored_apex = reflect(&triangle.apex, &triangle.b, &triangle.c)?;
        let twin = (i + 1..triangles.len())
            .find(|j| !paired[*j] && triangle.is_twin(&triangles[*j], &mirrored_apex));

        let points = match twin {
            Some(j) => {
                paired[j] = true;
                triangle.join(&triangles[j])
            }
            None => triangle.half(),
        };
        tiles.push(ProtoTile::new(points)?);
    }

    Ok(tiles)
}

// inflate substitutes a single tile
pub fn inflate(tile: &ProtoTile) -> Result<Vec<ProtoTile>> {
    inflate_all(std::slice::from_ref(tile))
}

// inflate_all substitutes a whole generation at once so that twin triangles produced by
// neighboring parents are rejoined into full rhombi
pub fn inflate_all(tiles: &[ProtoTile]) -> Result<Vec<ProtoTile>> {
    let triangles = tiles
        .iter()
        .flat_map(decompose)
        .flat_map(|triangle| subdivide(&triangle))
        .collect_vec();
    recombine(&triangles)
}
