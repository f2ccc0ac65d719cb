use crate::ant::Color;
use crate::config::MARKER_COUNT;
use crate::direction::Direction;
use std::fmt;

/// Sentinel for a missing neighbour on an open grid edge
pub const NO_CELL: u32 = u32::MAX;

/// Immutable terrain of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Rock,
    Clear,
    RedHill,
    BlackHill,
}

impl CellKind {
    /// Hill kind belonging to a colour
    #[inline]
    pub const fn hill(color: Color) -> Self {
        match color {
            Color::Red => CellKind::RedHill,
            Color::Black => CellKind::BlackHill,
        }
    }

    /// Colour owning this hill, if it is one
    #[inline]
    pub const fn hill_color(self) -> Option<Color> {
        match self {
            CellKind::RedHill => Some(Color::Red),
            CellKind::BlackHill => Some(Color::Black),
            _ => None,
        }
    }
}

/// Hex cell: compact and cache-friendly.
///
/// Rock cells ignore every mutation; the accessors report them as empty.
#[derive(Clone, Debug)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    kind: CellKind,
    food: u32,
    markers: [u8; 2], // one bit per marker id, indexed by colour
    ant: Option<u32>,
    neighbors: [u32; 6], // by direction; NO_CELL if off the grid
}

impl Cell {
    /// Create a cell with no neighbours wired yet
    #[inline]
    pub fn new(kind: CellKind, food: u32, row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            kind,
            food: if kind == CellKind::Rock { 0 } else { food },
            markers: [0; 2],
            ant: None,
            neighbors: [NO_CELL; 6],
        }
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    #[inline]
    pub fn is_rock(&self) -> bool {
        self.kind == CellKind::Rock
    }

    /// Set neighbor in a specific direction
    #[inline]
    pub(crate) fn set_neighbor(&mut self, dir: Direction, idx: u32) {
        self.neighbors[dir.index()] = idx;
    }

    /// Get neighbor in a specific direction
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<u32> {
        let n = self.neighbors[dir.index()];
        if n == NO_CELL {
            None
        } else {
            Some(n)
        }
    }

    #[inline]
    pub fn food(&self) -> u32 {
        self.food
    }

    #[inline]
    pub fn has_food(&self) -> bool {
        self.food > 0
    }

    /// Add food units
    #[inline]
    pub fn deposit_food(&mut self, amount: u32) {
        if !self.is_rock() {
            self.food += amount;
        }
    }

    /// Take one food unit, if there is any
    #[inline]
    pub fn remove_food(&mut self) {
        if self.food > 0 {
            self.food -= 1;
        }
    }

    /// Set one of a colour's markers; out-of-range ids are ignored
    #[inline]
    pub fn add_marker(&mut self, color: Color, marker: u8) {
        if !self.is_rock() && marker < MARKER_COUNT {
            self.markers[color.index()] |= 1 << marker;
        }
    }

    #[inline]
    pub fn remove_marker(&mut self, color: Color, marker: u8) {
        if marker < MARKER_COUNT {
            self.markers[color.index()] &= !(1 << marker);
        }
    }

    #[inline]
    pub fn has_marker(&self, color: Color, marker: u8) -> bool {
        marker < MARKER_COUNT && self.markers[color.index()] & (1 << marker) != 0
    }

    /// True if any marker of the colour is set
    #[inline]
    pub fn has_any_marker(&self, color: Color) -> bool {
        self.markers[color.index()] != 0
    }

    /// Marker flags for a colour, indexed by marker id
    pub fn markers(&self, color: Color) -> [bool; 6] {
        std::array::from_fn(|i| self.has_marker(color, i as u8))
    }

    /// Id of the ant standing here
    #[inline]
    pub fn ant(&self) -> Option<u32> {
        self.ant
    }

    /// True if an ant could step onto this cell
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.is_rock() && self.ant.is_none()
    }

    #[inline]
    pub fn set_ant(&mut self, id: u32) {
        if !self.is_rock() {
            self.ant = Some(id);
        }
    }

    #[inline]
    pub fn remove_ant(&mut self) {
        self.ant = None;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rock() {
            return f.write_str("rock");
        }
        let mut parts: Vec<String> = Vec::new();
        if self.food > 0 {
            parts.push(format!("{} food", self.food));
        }
        if let Some(color) = self.kind.hill_color() {
            parts.push(format!("{} hill", color));
        }
        for color in Color::ALL {
            if self.has_any_marker(color) {
                let ids: String = (0..MARKER_COUNT)
                    .filter(|&m| self.has_marker(color, m))
                    .map(|m| char::from(b'0' + m))
                    .collect();
                parts.push(format!("{} marks: {}", color, ids));
            }
        }
        if let Some(id) = self.ant {
            parts.push(format!("ant {}", id));
        }
        f.write_str(&parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_creation() {
        let cell = Cell::new(CellKind::Clear, 5, 2, 3);

        assert_eq!((cell.row, cell.col), (2, 3));
        assert_eq!(cell.food(), 5);
        assert!(cell.is_available());
        assert_eq!(cell.ant(), None);
        for d in Direction::ALL {
            assert_eq!(cell.neighbor(d), None);
        }
    }

    #[test]
    fn test_cell_neighbors() {
        let mut cell = Cell::new(CellKind::Clear, 0, 0, 0);

        cell.set_neighbor(Direction::East, 10);
        cell.set_neighbor(Direction::NorthWest, 20);

        assert_eq!(cell.neighbor(Direction::East), Some(10));
        assert_eq!(cell.neighbor(Direction::West), None);
        assert_eq!(cell.neighbor(Direction::NorthWest), Some(20));
    }

    #[test]
    fn test_food() {
        let mut cell = Cell::new(CellKind::RedHill, 0, 0, 0);
        assert!(!cell.has_food());
        cell.deposit_food(1);
        cell.deposit_food(3);
        assert_eq!(cell.food(), 4);
        cell.remove_food();
        assert_eq!(cell.food(), 3);

        let mut empty = Cell::new(CellKind::Clear, 0, 0, 0);
        empty.remove_food();
        assert_eq!(empty.food(), 0);
    }

    #[test]
    fn test_markers_are_per_color() {
        let mut cell = Cell::new(CellKind::Clear, 0, 0, 0);
        cell.add_marker(Color::Red, 3);
        assert!(cell.has_marker(Color::Red, 3));
        assert!(!cell.has_marker(Color::Black, 3));
        assert!(cell.has_any_marker(Color::Red));
        assert!(!cell.has_any_marker(Color::Black));
        assert_eq!(cell.markers(Color::Red), [false, false, false, true, false, false]);

        cell.add_marker(Color::Red, 3);
        cell.remove_marker(Color::Red, 3);
        assert!(!cell.has_any_marker(Color::Red));
    }

    #[test]
    fn test_rock_ignores_mutation() {
        let mut rock = Cell::new(CellKind::Rock, 9, 0, 0);
        rock.deposit_food(3);
        rock.add_marker(Color::Black, 1);
        rock.set_ant(7);

        assert_eq!(rock.food(), 0);
        assert!(!rock.has_any_marker(Color::Black));
        assert_eq!(rock.ant(), None);
        assert!(!rock.is_available());
        assert_eq!(rock.to_string(), "rock");
    }

    #[test]
    fn test_occupancy() {
        let mut cell = Cell::new(CellKind::Clear, 0, 0, 0);
        cell.set_ant(4);
        assert_eq!(cell.ant(), Some(4));
        assert!(!cell.is_available());
        cell.remove_ant();
        assert!(cell.is_available());
    }

    #[test]
    fn test_display() {
        let mut cell = Cell::new(CellKind::BlackHill, 2, 0, 0);
        cell.add_marker(Color::Red, 0);
        cell.add_marker(Color::Red, 4);
        cell.set_ant(1);
        assert_eq!(cell.to_string(), "2 food; black hill; red marks: 04; ant 1");
    }
}
