//! Region extraction and shape matching for contest-world validation.
//!
//! A connected region is flood-filled into a cropped boolean "box" that
//! remembers the grid row of its top line, since hex shapes look different
//! on paper depending on whether they start on an even or an odd row.

use crate::ant::Color;
use crate::config::{
    CONTEST_FOOD_BLOBS, CONTEST_FOOD_QUANTITY, CONTEST_ROCK_REGIONS, FOOD_BLOB_CELLS,
};
use crate::direction::Direction;
use crate::error::ParseError;
use crate::world::parser::{ParsedWorld, Token};

/// Shape template: `x` is part of the shape, anything else is not
pub type Template = &'static [&'static str];

/// Legal food blobs, indexed by top-row parity then shape.
pub const FOOD_OVERLAYS: [[Template; 3]; 2] = [
    [
        &["xxxxx..", "xxxxx..", ".xxxxx.", ".xxxxx.", "..xxxxx"],
        &["..xxxxx", ".xxxxx.", ".xxxxx.", "xxxxx..", "xxxxx.."],
        &[
            "..x..", ".xx..", ".xxx.", "xxxx.", "xxxxx", "xxxx.", ".xxx.", ".xx..", "..x..",
        ],
    ],
    [
        &["xxxxx..", ".xxxxx.", ".xxxxx.", "..xxxxx", "..xxxxx"],
        &["..xxxxx", "..xxxxx", ".xxxxx.", ".xxxxx.", "xxxxx.."],
        &[
            "..x..", "..xx.", ".xxx.", ".xxxx", "xxxxx", ".xxxx", ".xxx.", "..xx.", "..x..",
        ],
    ],
];

const HILL_SIZE: usize = 13;

/// Cropped silhouette of one region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeBox {
    rows: Vec<Vec<bool>>,
    /// Grid row of the first line of `rows`
    top_row: usize,
}

impl ShapeBox {
    /// Bound a set of grid coordinates
    pub fn from_coords(coords: &[(usize, usize)]) -> Self {
        let Some(&(r0, c0)) = coords.first() else {
            return Self {
                rows: Vec::new(),
                top_row: 0,
            };
        };
        let (mut min_row, mut max_row, mut min_col, mut max_col) = (r0, r0, c0, c0);
        for &(r, c) in coords {
            min_row = min_row.min(r);
            max_row = max_row.max(r);
            min_col = min_col.min(c);
            max_col = max_col.max(c);
        }
        let mut rows = vec![vec![false; max_col - min_col + 1]; max_row - min_row + 1];
        for &(r, c) in coords {
            rows[r - min_row][c - min_col] = true;
        }
        Self {
            rows,
            top_row: min_row,
        }
    }

    /// Build a box from `x`/`.` rows, mainly for tests
    pub fn from_pattern(pattern: &[&str], top_row: usize) -> Self {
        Self {
            rows: pattern
                .iter()
                .map(|line| line.bytes().map(|b| b == b'x').collect())
                .collect(),
            top_row,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.rows[0].is_empty()
    }

    #[inline]
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&b| b).count()
    }

    /// Strip empty outer rows and columns
    fn crop(&mut self) {
        while !self.is_empty() && !self.rows[0].iter().any(|&b| b) {
            self.rows.remove(0);
            self.top_row += 1;
        }
        while !self.is_empty() && !self.rows[self.rows.len() - 1].iter().any(|&b| b) {
            self.rows.pop();
        }
        while !self.is_empty() && !self.rows.iter().any(|r| r[0]) {
            for r in &mut self.rows {
                r.remove(0);
            }
        }
        while !self.is_empty() && !self.rows.iter().any(|r| r[r.len() - 1]) {
            for r in &mut self.rows {
                r.pop();
            }
        }
    }

    /// Lay a template over the box, aligning the first cells of their top
    /// rows. On success the covered cells are cleared and the remainder is
    /// returned cropped.
    pub fn overlay(&self, template: Template) -> Option<ShapeBox> {
        if self.rows.len() < template.len() {
            return None;
        }
        let box_col = self.rows[0].iter().position(|&b| b)?;
        let tpl_col = template[0].bytes().position(|b| b == b'x')?;
        let tpl_width = template[0].len();
        if box_col < tpl_col || box_col - tpl_col + tpl_width > self.width() {
            return None;
        }
        let offset = box_col - tpl_col;

        let mut rest = self.clone();
        for (r, line) in template.iter().enumerate() {
            for (c, b) in line.bytes().enumerate() {
                if b != b'x' {
                    continue;
                }
                let cell = rest.rows[r].get_mut(c + offset)?;
                if !*cell {
                    return None;
                }
                *cell = false;
            }
        }
        rest.crop();
        Some(rest)
    }

    /// True if the box is exactly the 13-row hexagonal hill.
    ///
    /// Row `n` holds `13 - |n - 6|` cells starting at `|n - 6| / 2`, shifted
    /// one further right on odd rows of a box whose top sits on an odd row.
    pub fn is_legal_hill(&self) -> bool {
        if self.rows.len() != HILL_SIZE || self.rows.iter().any(|r| r.len() != HILL_SIZE) {
            return false;
        }
        self.rows.iter().enumerate().all(|(n, row)| {
            let dist = n.abs_diff(6);
            let count = HILL_SIZE - dist;
            let mut first = dist / 2;
            if self.top_row % 2 == 1 && n % 2 == 1 {
                first += 1;
            }
            row.iter()
                .enumerate()
                .all(|(i, &b)| b == (i >= first && i < first + count))
        })
    }

    /// True if the box can be consumed entirely by legal food blobs.
    ///
    /// Greedy: the first template that fits is taken and never revisited.
    pub fn contains_legal_food_blobs(&self) -> bool {
        // every blob template covers the same number of cells
        if self.cell_count() % FOOD_BLOB_CELLS != 0 {
            return false;
        }
        let mut current = self.clone();
        while !current.rows.is_empty() {
            let overlays = &FOOD_OVERLAYS[current.top_row % 2];
            match overlays.iter().find_map(|&t| current.overlay(t)) {
                Some(rest) => current = rest,
                None => return false,
            }
        }
        true
    }
}

/// Collect the connected region containing `(row, col)`.
///
/// Hill regions fail as soon as the traversal touches rock or the other
/// colour's hill.
pub fn flood_fill(
    world: &ParsedWorld,
    row: usize,
    col: usize,
    seen: &mut [bool],
) -> Result<Vec<(usize, usize)>, ParseError> {
    let target = world.get(row, col);
    let forbidden: &[Token] = match target {
        Token::RedHill => &[Token::Rock, Token::BlackHill],
        Token::BlackHill => &[Token::Rock, Token::RedHill],
        _ => &[],
    };

    let mut coords = Vec::new();
    let mut stack = vec![(row, col)];
    seen[row * world.width + col] = true;
    while let Some((r, c)) = stack.pop() {
        coords.push((r, c));
        for d in Direction::ALL {
            let (nr, nc) = d.step(r as i64, c as i64);
            let Some(token) = world.get_signed(nr, nc) else {
                continue;
            };
            let (nr, nc) = (nr as usize, nc as usize);
            if token.same_kind(target) {
                let idx = nr * world.width + nc;
                if !seen[idx] {
                    seen[idx] = true;
                    stack.push((nr, nc));
                }
            } else if forbidden.contains(&token) {
                return Err(ParseError::HillAdjacency { row: nr, col: nc });
            }
        }
    }
    Ok(coords)
}

/// Boxes of every connected region of the target kind, in scan order
pub fn regions(world: &ParsedWorld, target: Token) -> Result<Vec<ShapeBox>, ParseError> {
    let mut seen = vec![false; world.cells.len()];
    let mut boxes = Vec::new();
    for row in 0..world.height {
        for col in 0..world.width {
            if !seen[row * world.width + col] && world.get(row, col).same_kind(target) {
                let coords = flood_fill(world, row, col, &mut seen)?;
                boxes.push(ShapeBox::from_coords(&coords));
            }
        }
    }
    Ok(boxes)
}

/// Contest checks on an already structurally valid world
pub fn validate_contest(world: &ParsedWorld) -> Result<(), ParseError> {
    let mut hills = Vec::with_capacity(2);
    for color in Color::ALL {
        let mut found = regions(world, Token::hill(color))?;
        if found.len() != 1 {
            return Err(ParseError::HillCount {
                color,
                found: found.len(),
            });
        }
        hills.push((color, found.remove(0)));
    }
    for (color, hill) in &hills {
        if !hill.is_legal_hill() {
            return Err(ParseError::HillShape(*color));
        }
    }

    let rocks = regions(world, Token::Rock)?.len();
    if rocks != CONTEST_ROCK_REGIONS {
        return Err(ParseError::RockRegionCount { found: rocks });
    }

    let mut food_cells = 0;
    for row in 0..world.height {
        for col in 0..world.width {
            if let Token::Food(q) = world.get(row, col) {
                food_cells += 1;
                if q != CONTEST_FOOD_QUANTITY {
                    return Err(ParseError::FoodQuantity { row, col, found: q });
                }
            }
        }
    }
    if food_cells != CONTEST_FOOD_BLOBS * FOOD_BLOB_CELLS {
        return Err(ParseError::FoodCount { found: food_cells });
    }

    for blob in regions(world, Token::Food(CONTEST_FOOD_QUANTITY))? {
        if !blob.contains_legal_food_blobs() {
            return Err(ParseError::FoodShape);
        }
    }
    Ok(())
}
