use crate::point::Point;
use itertools::Itertools;

#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    // DegenerateLine is raised when reflecting across a line whose endpoints coincide
    DegenerateLine(Point, Point),
    // CoincidentCorners is raised when two corners of one tile lie within tolerance of each other
    CoincidentCorners(Vec<Point>),
    // Unrecognized is raised when a polygon is neither a unit rhombus nor half of one
    Unrecognized(Vec<Point>),
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DegenerateLine(start, end) => {
                write!(f, "cannot reflect across degenerate line {} -> {}", start, end)
            }
            GeometryError::CoincidentCorners(points) => {
                write!(f, "tile has coincident corners: {}", points.iter().join(" "))
            }
            GeometryError::Unrecognized(points) => {
                write!(f, "unrecognized tile: {}", points.iter().join(" "))
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_fmt() {
        let err = GeometryError::DegenerateLine(Point(1., 1.), Point(1., 1.));
        assert_eq!(
            "cannot reflect across degenerate line [1.00,1.00] -> [1.00,1.00]",
            format!("{}", err)
        );

        let err = GeometryError::Unrecognized(vec![Point(0., 0.), Point(2., 0.), Point(2., 2.)]);
        assert_eq!("unrecognized tile: [0.00,0.00] [2.00,0.00] [2.00,2.00]", format!("{}", err));
    }
}
