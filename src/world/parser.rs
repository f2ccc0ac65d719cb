use crate::ant::Color;
use crate::config::{CONTEST_HEIGHT, CONTEST_WIDTH};
use crate::error::{ParseError, Result};
use crate::world::shape;
use std::fmt;
use std::fs;
use std::path::Path;

/// One cell of world source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Rock,
    Clear,
    RedHill,
    BlackHill,
    /// Clear cell holding 1..=9 food
    Food(u8),
}

impl Token {
    fn from_symbol(token: &str) -> Option<Self> {
        match token.as_bytes() {
            b"#" => Some(Token::Rock),
            b"." => Some(Token::Clear),
            b"+" => Some(Token::RedHill),
            b"-" => Some(Token::BlackHill),
            &[d @ b'1'..=b'9'] => Some(Token::Food(d - b'0')),
            _ => None,
        }
    }

    pub const fn hill(color: Color) -> Self {
        match color {
            Color::Red => Token::RedHill,
            Color::Black => Token::BlackHill,
        }
    }

    /// Same terrain, ignoring food quantity
    #[inline]
    pub fn same_kind(self, other: Token) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    fn symbol(self) -> char {
        match self {
            Token::Rock => '#',
            Token::Clear => '.',
            Token::RedHill => '+',
            Token::BlackHill => '-',
            Token::Food(n) => char::from(b'0' + n),
        }
    }
}

/// Rectangular grid of cell tokens, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedWorld {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Token>,
}

impl ParsedWorld {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Token {
        self.cells[row * self.width + col]
    }

    /// Token at a possibly out-of-range coordinate
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> Option<Token> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            None
        } else {
            Some(self.get(row as usize, col as usize))
        }
    }

    fn contains(&self, pred: impl Fn(Token) -> bool) -> bool {
        self.cells.iter().any(|&t| pred(t))
    }

    fn is_surrounded_by_rock(&self) -> bool {
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        (0..self.width).all(|c| self.get(0, c) == Token::Rock && self.get(last_row, c) == Token::Rock)
            && (0..self.height)
                .all(|r| self.get(r, 0) == Token::Rock && self.get(r, last_col) == Token::Rock)
    }
}

/// Prints the world back in source form
impl fmt::Display for ParsedWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.width)?;
        writeln!(f, "{}", self.height)?;
        for row in 0..self.height {
            if row % 2 == 1 {
                f.write_str(" ")?;
            }
            for col in 0..self.width {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a world from a file path
pub fn load_world(path: impl AsRef<Path>, contest_rules: bool) -> Result<ParsedWorld> {
    let source = fs::read_to_string(path)?;
    Ok(parse_world(&source, contest_rules)?)
}

/// Parse and validate world source.
///
/// Structural checks always run; `contest_rules` adds the 150x150 size,
/// hill shape, rock region and food blob checks.
pub fn parse_world(source: &str, contest_rules: bool) -> std::result::Result<ParsedWorld, ParseError> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let min_lines = if contest_rules { 2 + CONTEST_HEIGHT } else { 2 + 3 };
    if lines.len() < min_lines {
        return Err(ParseError::TooFewLines);
    }

    let width = parse_dimension(lines[0])?;
    let height = parse_dimension(lines[1])?;
    if contest_rules && (width != CONTEST_WIDTH || height != CONTEST_HEIGHT) {
        return Err(ParseError::ContestDimensions { width, height });
    }

    let rows = &lines[2..];
    if rows.len() != height {
        return Err(ParseError::HeightMismatch {
            expected: height,
            found: rows.len(),
        });
    }

    let mut cells = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        parse_grid_line(line, row, width, &mut cells)?;
    }
    let world = ParsedWorld {
        width,
        height,
        cells,
    };

    if !world.is_surrounded_by_rock() {
        return Err(ParseError::NotEnclosedByRock);
    }
    if !world.contains(|t| t == Token::RedHill) {
        return Err(ParseError::MissingHill(Color::Red));
    }
    if !world.contains(|t| t == Token::BlackHill) {
        return Err(ParseError::MissingHill(Color::Black));
    }
    if !world.contains(|t| matches!(t, Token::Food(_))) {
        return Err(ParseError::MissingFood);
    }

    if contest_rules {
        shape::validate_contest(&world)?;
    }
    Ok(world)
}

fn parse_dimension(line: &str) -> std::result::Result<usize, ParseError> {
    match line.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidDimensions),
    }
}

/// Parse one grid row; odd rows carry exactly one leading space
fn parse_grid_line(
    line: &str,
    row: usize,
    width: usize,
    out: &mut Vec<Token>,
) -> std::result::Result<(), ParseError> {
    let body = if row % 2 == 1 {
        let rest = line
            .strip_prefix(' ')
            .ok_or(ParseError::MissingOddRowSpace { row })?;
        if rest.starts_with(' ') {
            return Err(ParseError::ExtraOddRowSpace { row });
        }
        rest
    } else {
        if line.starts_with(' ') {
            return Err(ParseError::UnexpectedEvenRowSpace { row });
        }
        line
    };

    let tokens: Vec<&str> = body.trim().split(' ').collect();
    if tokens.len() != width {
        return Err(ParseError::WidthMismatch {
            row,
            expected: width,
            found: tokens.len(),
        });
    }
    out.reserve(width);
    for token in tokens {
        let cell = Token::from_symbol(token).ok_or_else(|| ParseError::UnrecognizedCellIdentifier {
            row,
            token: token.to_string(),
        })?;
        out.push(cell);
    }
    Ok(())
}
