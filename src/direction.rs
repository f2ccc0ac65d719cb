/// Six hex directions, clockwise from east (rows grow downwards)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    SouthEast = 1,
    SouthWest = 2,
    West = 3,
    NorthWest = 4,
    NorthEast = 5,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    /// Get direction index for array indexing
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for any index, wrapped modulo 6
    #[inline]
    pub const fn from_index(idx: usize) -> Self {
        Self::ALL[idx % 6]
    }

    /// One step anticlockwise
    #[inline]
    pub const fn left(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// One step clockwise
    #[inline]
    pub const fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Row/column offset of the neighbour in this direction.
    ///
    /// Odd rows sit half a cell to the right of even rows, so the diagonal
    /// offsets depend on the parity of the starting row.
    #[inline]
    pub const fn offset(self, row: i64) -> (i64, i64) {
        let odd = (row & 1) as i64;
        match self {
            Direction::East => (0, 1),
            Direction::SouthEast => (1, odd),
            Direction::SouthWest => (1, odd - 1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, odd - 1),
            Direction::NorthEast => (-1, odd),
        }
    }

    /// Coordinate of the neighbour in this direction (may be out of bounds)
    #[inline]
    pub const fn step(self, row: i64, col: i64) -> (i64, i64) {
        let (dr, dc) = self.offset(row);
        (row + dr, col + dc)
    }

    /// Get direction name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
            Direction::West => "west",
            Direction::NorthWest => "northwest",
            Direction::NorthEast => "northeast",
        }
    }
}
