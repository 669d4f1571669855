use crate::{error::Result, pentagrid::FAMILIES};
use serde::{Deserialize, Serialize};

// DEFAULT_GRID_OFFSETS sum to zero and none is an integer, so no three grid lines meet
// and the dual of the grid is a Penrose tiling
pub const DEFAULT_GRID_OFFSETS: [f64; FAMILIES] = [0.2, 0.3, -0.45, 0.15, -0.2];
pub const DEFAULT_GRID_RADIUS: f64 = 3.;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Mode {
    #[serde(rename = "inflation")]
    Inflation,
    #[serde(rename = "frontier")]
    Frontier,
    #[serde(rename = "pentagrid")]
    Pentagrid,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Inflation
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    // inflation stops after this many epochs
    #[serde(rename = "maxGenerations")]
    pub max_generations: Option<usize>,
    // frontier and pentagrid growth stop once this many tiles have been placed, seeds included
    #[serde(rename = "maxTiles")]
    pub max_tiles: Option<usize>,
    #[serde(rename = "gridOffsets")]
    pub grid_offsets: [f64; FAMILIES],
    // only grid crossings within this distance of the origin are laid
    #[serde(rename = "gridRadius")]
    pub grid_radius: f64,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn frontier() -> Config {
        Config { mode: Mode::Frontier, ..Config::default() }
    }

    pub fn inflation() -> Config {
        Config { mode: Mode::Inflation, ..Config::default() }
    }

    pub fn pentagrid() -> Config {
        Config { mode: Mode::Pentagrid, ..Config::default() }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            mode: Mode::default(),
            max_generations: None,
            max_tiles: None,
            grid_offsets: DEFAULT_GRID_OFFSETS,
            grid_radius: DEFAULT_GRID_RADIUS,
        }
    }
}
