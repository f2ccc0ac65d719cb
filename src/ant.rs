use crate::config::REST_TICKS;
use crate::direction::Direction;
use std::fmt;

/// Team colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ant state packed into a byte (alive/carrying) + aligned fields
#[derive(Clone, Debug)]
pub struct Ant {
    pub id: u32,
    /// Index of the occupied cell in the world grid
    pub pos: u32,
    /// Current brain state
    pub state: u32,
    pub color: Color,
    pub dir: Direction,
    /// Ticks left before the ant acts again
    pub resting: u8,
    flags: u8, // bit 0 = alive, bit 1 = carrying food
}

impl Ant {
    const ALIVE: u8 = 0b01;
    const CARRYING: u8 = 0b10;

    /// Create a new ant facing east in state 0
    pub fn new(id: u32, color: Color, pos: u32) -> Self {
        Self {
            id,
            pos,
            state: 0,
            color,
            dir: Direction::East,
            resting: 0,
            flags: Self::ALIVE,
        }
    }

    /// Check if ant is alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.flags & Self::ALIVE != 0
    }

    /// Check if ant is carrying a unit of food
    #[inline]
    pub fn has_food(&self) -> bool {
        self.flags & Self::CARRYING != 0
    }

    /// Food units held, 0 or 1
    #[inline]
    pub fn food(&self) -> u32 {
        self.has_food() as u32
    }

    /// Set alive state
    #[inline]
    pub fn set_alive(&mut self, alive: bool) {
        if alive {
            self.flags |= Self::ALIVE;
        } else {
            self.flags &= !Self::ALIVE;
        }
    }

    /// Set carrying state
    #[inline]
    pub fn set_food(&mut self, carrying: bool) {
        if carrying {
            self.flags |= Self::CARRYING;
        } else {
            self.flags &= !Self::CARRYING;
        }
    }

    /// Check if the ant is sleeping off a move
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.resting > 0
    }

    /// Start the post-move rest
    #[inline]
    pub fn rest(&mut self) {
        self.resting = REST_TICKS;
    }

    /// Move ant to a new cell
    #[inline]
    pub fn move_to(&mut self, new_pos: u32) {
        self.pos = new_pos;
    }
}

impl fmt::Display for Ant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ant of id {}, dir {}, food {}, state {}, resting {}",
            self.color,
            self.id,
            self.dir.index(),
            self.food(),
            self.state,
            self.resting
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ant_creation() {
        let ant = Ant::new(42, Color::Black, 100);

        assert_eq!(ant.id, 42);
        assert_eq!(ant.pos, 100);
        assert_eq!(ant.state, 0);
        assert_eq!(ant.dir, Direction::East);
        assert!(ant.is_alive());
        assert!(!ant.has_food());
        assert!(!ant.is_resting());
    }

    #[test]
    fn test_ant_flag_management() {
        let mut ant = Ant::new(1, Color::Red, 10);

        ant.set_food(true);
        assert!(ant.has_food());
        assert_eq!(ant.food(), 1);
        assert!(ant.is_alive()); // Should still be alive

        ant.set_alive(false);
        assert!(!ant.is_alive());
        assert!(ant.has_food()); // Carrying state should be unchanged

        ant.set_alive(true);
        ant.set_food(false);
        assert!(ant.is_alive());
        assert_eq!(ant.food(), 0);
    }

    #[test]
    fn test_ant_rest() {
        let mut ant = Ant::new(1, Color::Red, 10);
        ant.rest();
        assert!(ant.is_resting());
        assert_eq!(ant.resting, REST_TICKS);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Color::Red.other(), Color::Black);
        assert_eq!(Color::Black.other(), Color::Red);
        assert_eq!(Color::Black.to_string(), "black");
    }

    #[test]
    fn test_display() {
        let ant = Ant::new(3, Color::Red, 0);
        assert_eq!(
            ant.to_string(),
            "red ant of id 3, dir 0, food 0, state 0, resting 0"
        );
    }
}
