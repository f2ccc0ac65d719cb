//! Game constants shared by the compiler, the world validator and the engine.

/// Upper bound on the number of states in a compiled brain.
pub const MAX_STATES: usize = 10_000;

/// Marker ids per colour (0..=5).
pub const MARKER_COUNT: u8 = 6;

/// Ticks an ant sleeps after a successful move.
pub const REST_TICKS: u8 = 14;

/// Food left on a cell when an ant dies there (plus whatever it carried).
pub const DEATH_FOOD: u32 = 3;

/// Number of adjacent enemies that kills an ant.
pub const SURROUND_LIMIT: usize = 5;

pub const CONTEST_WIDTH: usize = 150;
pub const CONTEST_HEIGHT: usize = 150;

/// Rock regions in a contest world, counting the border as one.
pub const CONTEST_ROCK_REGIONS: usize = 15;

pub const CONTEST_FOOD_BLOBS: usize = 11;
pub const FOOD_BLOB_CELLS: usize = 25;
pub const CONTEST_FOOD_QUANTITY: u8 = 5;

/// Rock blobs painted by the generator (the border is the fifteenth region).
pub const GENERATOR_ROCKS: usize = 14;

/// Placement attempts before world generation starts over.
pub const PLACEMENT_ATTEMPTS: u32 = 10_000;
