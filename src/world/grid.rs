use crate::ant::Color;
use crate::direction::Direction;
use crate::error::ParseError;
use crate::world::cell::{Cell, CellKind};
use crate::world::parser::{parse_world, ParsedWorld, Token};

/// Hex grid of cells with neighbour links computed once at construction
#[derive(Clone, Debug)]
pub struct WorldGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl WorldGrid {
    /// Build the grid from parsed tokens
    pub fn new(parsed: &ParsedWorld) -> Self {
        let width = parsed.width as u32;
        let height = parsed.height as u32;

        let mut cells: Vec<Cell> = Vec::with_capacity(parsed.cells.len());
        for row in 0..height {
            for col in 0..width {
                let (kind, food) = match parsed.get(row as usize, col as usize) {
                    Token::Rock => (CellKind::Rock, 0),
                    Token::Clear => (CellKind::Clear, 0),
                    Token::RedHill => (CellKind::RedHill, 0),
                    Token::BlackHill => (CellKind::BlackHill, 0),
                    Token::Food(n) => (CellKind::Clear, u32::from(n)),
                };
                cells.push(Cell::new(kind, food, row, col));
            }
        }

        let mut grid = Self {
            width,
            height,
            cells,
        };
        for idx in 0..grid.cells.len() {
            let (row, col) = grid.coords(idx as u32);
            for dir in Direction::ALL {
                let (r, c) = dir.step(i64::from(row), i64::from(col));
                if let Some(n) = grid.index_signed(r, c) {
                    grid.cells[idx].set_neighbor(dir, n);
                }
            }
        }
        grid
    }

    /// Parse, validate and build in one go
    pub fn from_source(source: &str, contest_rules: bool) -> Result<Self, ParseError> {
        Ok(Self::new(&parse_world(source, contest_rules)?))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell index for a coordinate inside the grid
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> Option<u32> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    #[inline]
    fn index_signed(&self, row: i64, col: i64) -> Option<u32> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = u32::try_from(row).ok()?;
        let col = u32::try_from(col).ok()?;
        self.index(row, col)
    }

    /// Row and column of a cell index
    #[inline]
    pub fn coords(&self, idx: u32) -> (u32, u32) {
        (idx / self.width, idx % self.width)
    }

    /// Get a cell by coordinate
    #[inline]
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i as usize])
    }

    /// Get a mutable cell by coordinate
    #[inline]
    pub fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        let idx = self.index(row, col)?;
        self.cells.get_mut(idx as usize)
    }

    /// Get a cell by index; `idx` must come from this grid
    #[inline]
    pub fn cell_at(&self, idx: u32) -> &Cell {
        &self.cells[idx as usize]
    }

    #[inline]
    pub fn cell_at_mut(&mut self, idx: u32) -> &mut Cell {
        &mut self.cells[idx as usize]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell adjacent to `(row, col)` in a direction, if it exists
    pub fn neighbor(&self, row: u32, col: u32, dir: Direction) -> Option<&Cell> {
        let n = self.cell(row, col)?.neighbor(dir)?;
        Some(self.cell_at(n))
    }

    /// Index of the cell adjacent to `idx`
    #[inline]
    pub fn neighbor_index(&self, idx: u32, dir: Direction) -> Option<u32> {
        self.cells[idx as usize].neighbor(dir)
    }

    /// The six cells around `(row, col)`, indexed by direction
    pub fn all_neighbors(&self, row: u32, col: u32) -> [Option<&Cell>; 6] {
        Direction::ALL.map(|d| self.neighbor(row, col, d))
    }

    /// Indices of a colour's hill cells in row-major order
    pub fn hill_cells(&self, color: Color) -> Vec<u32> {
        let kind = CellKind::hill(color);
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (c.kind() == kind).then_some(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open grid of clear cells; structural checks are skipped on purpose
    fn open_grid(width: usize, height: usize) -> WorldGrid {
        WorldGrid::new(&ParsedWorld {
            width,
            height,
            cells: vec![Token::Clear; width * height],
        })
    }

    #[test]
    fn test_grid_creation() {
        let grid = WorldGrid::from_source(
            "5\n5\n# # # # #\n # + . 9 #\n# . 3 - #\n # . . . #\n# # # # #\n",
            false,
        )
        .unwrap();

        assert_eq!((grid.width(), grid.height()), (5, 5));
        assert_eq!(grid.cells().len(), 25);
        assert!(grid.cell(0, 0).unwrap().is_rock());
        assert_eq!(grid.cell(1, 1).unwrap().kind(), CellKind::RedHill);
        assert_eq!(grid.cell(1, 3).unwrap().food(), 9);
        assert_eq!(grid.cell(2, 2).unwrap().kind(), CellKind::Clear);
        assert_eq!(grid.hill_cells(Color::Black), vec![grid.index(2, 3).unwrap()]);
        assert!(grid.cell(5, 0).is_none());
    }

    #[test]
    fn test_neighbors_even_row() {
        let grid = open_grid(6, 6);
        let expected = [(2, 3), (3, 2), (3, 1), (2, 1), (1, 1), (1, 2)];
        for (dir, (r, c)) in Direction::ALL.into_iter().zip(expected) {
            let n = grid.neighbor(2, 2, dir).unwrap();
            assert_eq!((n.row, n.col), (r, c), "direction {}", dir.as_str());
        }
    }

    #[test]
    fn test_neighbors_odd_row() {
        let grid = open_grid(6, 6);
        let expected = [(3, 3), (4, 3), (4, 2), (3, 1), (2, 2), (2, 3)];
        for (dir, (r, c)) in Direction::ALL.into_iter().zip(expected) {
            let n = grid.neighbor(3, 2, dir).unwrap();
            assert_eq!((n.row, n.col), (r, c), "direction {}", dir.as_str());
        }
    }

    #[test]
    fn test_neighbor_round_trip_everywhere() {
        let grid = open_grid(9, 8);
        for row in 1..7 {
            for col in 1..8 {
                for dir in Direction::ALL {
                    let n = grid.neighbor(row, col, dir).unwrap();
                    let back = grid.neighbor(n.row, n.col, dir.opposite()).unwrap();
                    assert_eq!((back.row, back.col), (row, col));
                }
            }
        }
    }

    #[test]
    fn test_border_neighbors_are_absent() {
        let grid = open_grid(4, 4);
        assert!(grid.neighbor(0, 0, Direction::West).is_none());
        assert!(grid.neighbor(0, 0, Direction::NorthEast).is_none());
        assert!(grid.neighbor(0, 0, Direction::SouthWest).is_none());
        assert!(grid.neighbor(0, 0, Direction::SouthEast).is_some());
        // odd row, last column: east and both eastern diagonals fall off
        assert!(grid.neighbor(1, 3, Direction::East).is_none());
        assert!(grid.neighbor(1, 3, Direction::SouthEast).is_none());
        assert!(grid.neighbor(1, 3, Direction::NorthEast).is_none());
        assert!(grid.neighbor(3, 1, Direction::SouthEast).is_none());

        let all = grid.all_neighbors(0, 0);
        assert_eq!(all.iter().filter(|n| n.is_some()).count(), 2);
    }

    #[test]
    fn test_interior_cells_have_six_neighbors() {
        let grid = open_grid(7, 7);
        for row in 1..6 {
            for col in 1..6 {
                assert!(grid.all_neighbors(row, col).iter().all(Option::is_some));
            }
        }
    }

    #[test]
    fn test_cell_mutation_through_grid() {
        let mut grid = open_grid(3, 3);
        let cell = grid.cell_mut(1, 1).unwrap();
        cell.deposit_food(2);
        cell.add_marker(Color::Red, 5);
        let idx = grid.index(1, 1).unwrap();
        assert_eq!(grid.cell_at(idx).food(), 2);
        assert!(grid.cell_at(idx).has_marker(Color::Red, 5));
        assert_eq!(grid.coords(idx), (1, 1));
    }
}
