//! # AntWorld
//!
//! Two ant colonies, each driven by a small state-machine "brain", compete
//! for food on a hexagonal grid.
//!
//! This library provides the brain compiler, the world parser and contest
//! validator, a random contest-world generator and the tick-based simulation.

pub mod ant;
pub mod brain;
pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod rng;
pub mod simulation;
pub mod world;

pub use ant::{Ant, Color};
pub use brain::{compile, Brain};
pub use cli::{Args, Command};
pub use direction::Direction;
pub use error::{CompileError, Error, ParseError, Result};
pub use rng::AntRng;
pub use simulation::{Game, GameEvent, GameObserver, Score};
pub use world::{generate_world, parse_world, WorldGrid};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        compile, generate_world, parse_world, Ant, AntRng, Args, Brain, Color, Command,
        CompileError, Direction, Error, Game, GameEvent, GameObserver, ParseError, Result, Score,
        WorldGrid,
    };
}
