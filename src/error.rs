use crate::ant::Color;
use thiserror::Error;

/// Errors raised while compiling brain source. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("malformed instruction '{text}' at line {line}")]
    MalformedInstruction { line: usize, text: String },

    #[error("no states given")]
    EmptyBrain,

    #[error("too many states at line {line}; limit is {limit}")]
    TooManyStates { line: usize, limit: usize },

    #[error("pointer to state {referenced} which doesn't exist at line {line}")]
    StateOutOfRange { line: usize, referenced: u32 },

    #[error("marker id {marker} too high at line {line}")]
    MarkerOutOfRange { line: usize, marker: u32 },
}

/// Errors raised while parsing or validating world source. Rows are 0-based
/// grid rows (not counting the two dimension lines).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("too few lines")]
    TooFewLines,

    #[error("could not parse world dimensions")]
    InvalidDimensions,

    #[error("contest grids must be 150x150, got {width}x{height}")]
    ContestDimensions { width: usize, height: usize },

    #[error("grid height does not match specified value: expected {expected}, found {found}")]
    HeightMismatch { expected: usize, found: usize },

    #[error("no space at start of odd row {row}")]
    MissingOddRowSpace { row: usize },

    #[error("too much space at start of odd row {row}")]
    ExtraOddRowSpace { row: usize },

    #[error("unexpected space at start of even row {row}")]
    UnexpectedEvenRowSpace { row: usize },

    #[error("grid width mismatch at row {row}: expected {expected}, found {found}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognised cell identifier '{token}' at row {row}")]
    UnrecognizedCellIdentifier { row: usize, token: String },

    #[error("the ant world must be enclosed by rock")]
    NotEnclosedByRock,

    #[error("the ant world must contain at least one {0} hill")]
    MissingHill(Color),

    #[error("the ant world must contain at least one source of food")]
    MissingFood,

    #[error("an ant hill cannot be immediately adjacent to a rock or to the other ant hill (cell ({row}, {col}))")]
    HillAdjacency { row: usize, col: usize },

    #[error("incorrect number of {color} hills detected: {found}")]
    HillCount { color: Color, found: usize },

    #[error("{0} hill is of illegal size and shape")]
    HillShape(Color),

    #[error("there must be 14 rocky areas unattached to the edge (found {found} rock regions)")]
    RockRegionCount { found: usize },

    #[error("the cell at ({row}, {col}) has an incorrect amount of food: {found}")]
    FoodQuantity { row: usize, col: usize, found: u8 },

    #[error("expected 275 food cells, found {found}")]
    FoodCount { found: usize },

    #[error("misshapen food blobs discovered")]
    FoodShape,
}

/// Top-level error for loading and running games
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("brain error: {0}")]
    Compile(#[from] CompileError),

    #[error("world error: {0}")]
    World(#[from] ParseError),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
