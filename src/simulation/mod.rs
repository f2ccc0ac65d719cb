pub mod combat;
pub mod engine;
pub mod events;

pub use engine::{AntView, CellView, Game, Score, TeamScore};
pub use events::{GameEvent, GameObserver};
