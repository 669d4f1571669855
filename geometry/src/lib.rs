mod affine;
mod edge;
mod error;
mod euclid;
mod kernel;
mod point;
mod transform;

pub use self::affine::*;
pub use self::edge::*;
pub use self::error::*;
pub use self::euclid::*;
pub use self::kernel::*;
pub use self::point::*;
pub use self::transform::*;
