#[macro_use]
extern crate paste;

mod config;
mod error;
mod frontier;
mod patch;
mod pentagrid;
mod substitution;
mod tiling;
mod vertex;

pub use self::config::*;
pub use self::error::*;
pub use self::frontier::*;
pub use self::patch::*;
pub use self::pentagrid::*;
pub use self::substitution::*;
pub use self::tiling::*;
pub use self::vertex::*;
