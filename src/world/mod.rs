pub mod cell;
pub mod generator;
pub mod grid;
pub mod parser;
pub mod shape;

pub use cell::{Cell, CellKind};
pub use generator::generate_world;
pub use grid::WorldGrid;
pub use parser::{load_world, parse_world, ParsedWorld, Token};
