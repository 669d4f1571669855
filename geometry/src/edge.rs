use crate::point::Point;

#[derive(Clone, Debug)]
pub struct Edge<'a>(pub &'a Point, pub &'a Point);

impl<'a> Edge<'a> {
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    // normal returns the unit vector perpendicular to the edge, pointing to its left
    pub fn normal(&self) -> Point {
        let vector = self.vector();
        Point(-vector.1, vector.0).mul(1. / vector.norm())
    }

    pub fn vector(&self) -> Point {
        self.1 - self.0
    }

    // shoelace returns this edge's term of the shoelace formula for signed polygon area
    pub fn shoelace(&self) -> f64 {
        self.0.cross(self.1)
    }
}
