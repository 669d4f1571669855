use crate::vertex::VertexIndex;
use geometry::{GeometryError, Point};
use itertools::Itertools;
use serde_json::Error as SerdeError;

#[derive(Debug)]
pub enum Error {
    // AmbiguousVertexMatch is raised when a position lies within tolerance of more than one registered vertex
    AmbiguousVertexMatch(Point, Vec<VertexIndex>),
    Config(SerdeError),
    DegenerateGeometry(GeometryError),
    UnknownVertex(VertexIndex),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::AmbiguousVertexMatch(position, indices) => write!(
                f,
                "position {} matches multiple vertices: {}",
                position,
                indices.iter().join(", "),
            ),
            Error::Config(err) => write!(f, "invalid config: {}", err),
            Error::DegenerateGeometry(err) => write!(f, "degenerate geometry: {}", err),
            Error::UnknownVertex(index) => write!(f, "unknown vertex {}", index),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::DegenerateGeometry(err) => Some(err),
            _ => None,
        }
    }
}

macro_rules! error_type {
    ($($variant:ident: $name:ident),*) => {
        paste! {
            $(
                impl From<[<$name Error>]> for Error {
                    fn from(err: [<$name Error>]) -> Error {
                        Error::$variant(err)
                    }
                }
            )*
        }
    }
}

error_type! {
    Config: Serde,
    DegenerateGeometry: Geometry
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_from_geometry() {
        let err: Error = GeometryError::DegenerateLine(Point(0., 0.), Point(0., 0.)).into();
        assert!(matches!(err, Error::DegenerateGeometry(GeometryError::DegenerateLine(_, _))));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_fmt() {
        let err = Error::AmbiguousVertexMatch(Point(0.5, 0.), vec![VertexIndex(2), VertexIndex(7)]);
        assert_eq!("position [0.50,0.00] matches multiple vertices: 2, 7", format!("{}", err));
        assert_eq!("unknown vertex 4", format!("{}", Error::UnknownVertex(VertexIndex(4))));
    }
}
