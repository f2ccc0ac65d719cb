//! Random contest-world generator.
//!
//! Shapes are stamped onto a character grid. `O` cells are painted; every
//! other non-`.` template cell is padding that must land on clear ground so
//! rocks and hills keep their distance from existing content.

use crate::config::{
    CONTEST_FOOD_BLOBS, CONTEST_FOOD_QUANTITY, CONTEST_HEIGHT, CONTEST_WIDTH, GENERATOR_ROCKS,
    PLACEMENT_ATTEMPTS,
};
use crate::direction::Direction;
use crate::rng::AntRng;
use crate::world::parser::parse_world;
use tracing::{debug, warn};

type Stamp = &'static [&'static str];

/// Hill with a padding ring; drawn for a stamp starting on an odd row
const HILL_SHAPE: Stamp = &[
    "...********....",
    "...*OOOOOOO*...",
    "..*OOOOOOOO*...",
    "..*OOOOOOOOO*..",
    ".*OOOOOOOOOO*..",
    ".*OOOOOOOOOOO*.",
    "*OOOOOOOOOOOO*.",
    "*OOOOOOOOOOOOO*",
    "*OOOOOOOOOOOO*.",
    ".*OOOOOOOOOOO*.",
    ".*OOOOOOOOOO*..",
    "..*OOOOOOOOO*..",
    "..*OOOOOOOO*...",
    "...*OOOOOOO*...",
    "...********....",
];

const FOOD_SHAPES: [Stamp; 3] = [
    &["..OOOOO", "..OOOOO", ".OOOOO.", ".OOOOO.", "OOOOO.."],
    &["OOOOO..", ".OOOOO.", ".OOOOO.", "..OOOOO", "..OOOOO"],
    &[
        "..O..", "..OO.", ".OOO.", ".OOOO", "OOOOO", ".OOOO", ".OOO.", "..OO.", "..O..",
    ],
];

const ROCK_SHAPES: [Stamp; 3] = [
    &[".++..", ".+O+.", "+OO+.", ".+++."],
    &[".+++.", ".+OO+", "+OOO+", ".+OO+", ".+++."],
    &[
        ".++++..", ".+OOO+.", "+OOOO+.", "+OOOOO+", "+OOOO+.", ".+OOO+.", ".++++..",
    ],
];

const ROCK: u8 = b'#';
const CLEAR: u8 = b'.';
/// Rock painted by the walk in progress; it may overlap itself
const WET_ROCK: u8 = b't';

type Grid = Vec<Vec<u8>>;

/// Generate contest-legal world source.
///
/// Runs out of placement attempts or produces a world the contest validator
/// rejects only rarely; either way generation starts over.
pub fn generate_world(rng: &mut AntRng) -> String {
    loop {
        let Some(source) = try_generate(rng) else {
            debug!("placement attempts exhausted, regenerating world");
            continue;
        };
        match parse_world(&source, true) {
            Ok(_) => return source,
            Err(err) => warn!(%err, "generated world failed validation, regenerating"),
        }
    }
}

fn try_generate(rng: &mut AntRng) -> Option<String> {
    let mut grid = blank_grid();
    let mut budget = PLACEMENT_ATTEMPTS;

    for _ in 0..GENERATOR_ROCKS {
        draw_rock(&mut grid, rng, &mut budget)?;
    }
    place(&mut grid, HILL_SHAPE, b'+', rng, &mut budget)?;
    place(&mut grid, HILL_SHAPE, b'-', rng, &mut budget)?;

    let food = b'0' + CONTEST_FOOD_QUANTITY;
    for _ in 0..CONTEST_FOOD_BLOBS {
        let shape = FOOD_SHAPES[rng.next(FOOD_SHAPES.len() as u32) as usize];
        place(&mut grid, shape, food, rng, &mut budget)?;
    }
    Some(render(&grid))
}

/// Clear grid walled in by rock
fn blank_grid() -> Grid {
    (0..CONTEST_HEIGHT)
        .map(|row| {
            (0..CONTEST_WIDTH)
                .map(|col| {
                    let edge = row == 0
                        || row == CONTEST_HEIGHT - 1
                        || col == 0
                        || col == CONTEST_WIDTH - 1;
                    if edge {
                        ROCK
                    } else {
                        CLEAR
                    }
                })
                .collect()
        })
        .collect()
}

#[inline]
fn spend(budget: &mut u32) -> Option<()> {
    *budget = budget.checked_sub(1)?;
    Some(())
}

/// Random grid coordinate
#[inline]
fn random_spot(rng: &mut AntRng) -> (i64, i64) {
    let row = rng.next(CONTEST_HEIGHT as u32);
    let col = rng.next(CONTEST_WIDTH as u32);
    (i64::from(row), i64::from(col))
}

/// Rejection-sample a position for the shape until it fits
fn place(grid: &mut Grid, shape: Stamp, paint: u8, rng: &mut AntRng, budget: &mut u32) -> Option<()> {
    loop {
        spend(budget)?;
        let (row, col) = random_spot(rng);
        if superimpose(grid, shape, row, col, paint) {
            return Some(());
        }
    }
}

/// Paint one rock blob by walking a rock stamp across the grid
fn draw_rock(grid: &mut Grid, rng: &mut AntRng, budget: &mut u32) -> Option<()> {
    let shape = ROCK_SHAPES[rng.next(ROCK_SHAPES.len() as u32) as usize];
    let mut heading = Direction::from_index(rng.next(6) as usize);
    let mut steps = 30 + rng.next(50);
    let mut turn_left = true;

    let (mut row, mut col) = loop {
        spend(budget)?;
        let (row, col) = random_spot(rng);
        if superimpose(grid, shape, row, col, WET_ROCK) {
            break (row, col);
        }
    };

    loop {
        // 10% chance of turning, mostly the same way as last time
        if rng.unit() > 0.9 {
            if rng.unit() > 0.9 {
                turn_left = !turn_left;
            }
            heading = if turn_left {
                heading.left()
            } else {
                heading.right()
            };
        }
        (row, col) = heading.step(row, col);
        if !superimpose(grid, shape, row, col, WET_ROCK) {
            break;
        }
        steps -= 1;
        if steps == 0 {
            break;
        }
    }

    for cell in grid.iter_mut().flatten() {
        if *cell == WET_ROCK {
            *cell = ROCK;
        }
    }
    Some(())
}

/// Try to stamp a shape with its top-left corner at `(row, col)`.
///
/// Odd template lines move one column left when the stamp starts on an even
/// row, which keeps the hex geometry of the template intact.
fn superimpose(grid: &mut Grid, shape: Stamp, row: i64, col: i64, paint: u8) -> bool {
    let height = grid.len() as i64;
    let width = grid.first().map_or(0, Vec::len) as i64;
    let shape_width = shape[0].len() as i64;
    let odd_row = row % 2 == 1;
    if row < 0
        || col < 0
        || height - row < shape.len() as i64
        || width - col < shape_width
        || (!odd_row && col == 0)
    {
        return false;
    }

    let target = |r: usize, c: usize| -> (usize, usize) {
        let shift = usize::from(r % 2 == 1 && !odd_row);
        (row as usize + r, col as usize + c - shift)
    };

    for (r, line) in shape.iter().enumerate() {
        for (c, b) in line.bytes().enumerate() {
            if b == b'.' {
                continue;
            }
            let (gr, gc) = target(r, c);
            let cell = grid[gr][gc];
            if cell != CLEAR && cell != WET_ROCK {
                return false;
            }
        }
    }
    for (r, line) in shape.iter().enumerate() {
        for (c, b) in line.bytes().enumerate() {
            if b == b'O' {
                let (gr, gc) = target(r, c);
                grid[gr][gc] = paint;
            }
        }
    }
    true
}

/// World source text for a character grid
fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(2 * CONTEST_WIDTH * CONTEST_HEIGHT + 16);
    out.push_str(&format!("{}\n{}\n", CONTEST_WIDTH, CONTEST_HEIGHT));
    for (row, cells) in grid.iter().enumerate() {
        if row % 2 == 1 {
            out.push(' ');
        }
        for (col, &cell) in cells.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }
            out.push(char::from(cell));
        }
        out.push('\n');
    }
    out
}
