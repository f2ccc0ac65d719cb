use std::fmt;
use std::str::FromStr;

/// Cell inspected by `sense`, relative to the ant's facing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SenseDir {
    Here,
    Ahead,
    LeftAhead,
    RightAhead,
}

impl FromStr for SenseDir {
    type Err = ();

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            b"here" => Ok(SenseDir::Here),
            b"ahead" => Ok(SenseDir::Ahead),
            b"leftahead" => Ok(SenseDir::LeftAhead),
            b"rightahead" => Ok(SenseDir::RightAhead),
            _ => Err(()),
        }
    }
}

impl SenseDir {
    pub const fn as_str(self) -> &'static str {
        match self {
            SenseDir::Here => "here",
            SenseDir::Ahead => "ahead",
            SenseDir::LeftAhead => "leftahead",
            SenseDir::RightAhead => "rightahead",
        }
    }
}

/// Condition tested by `sense`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Friend,
    Foe,
    FriendWithFood,
    FoeWithFood,
    Food,
    Rock,
    /// One of the ant's own markers
    Marker(u8),
    /// Any marker of the other colour
    FoeMarker,
    Home,
    FoeHome,
}

impl FromStr for Condition {
    type Err = ();

    /// Parses every condition except `marker N`, which spans two tokens.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            b"friend" => Ok(Condition::Friend),
            b"foe" => Ok(Condition::Foe),
            b"friendwithfood" => Ok(Condition::FriendWithFood),
            b"foewithfood" => Ok(Condition::FoeWithFood),
            b"food" => Ok(Condition::Food),
            b"rock" => Ok(Condition::Rock),
            b"foemarker" => Ok(Condition::FoeMarker),
            b"home" => Ok(Condition::Home),
            b"foehome" => Ok(Condition::FoeHome),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Friend => f.write_str("friend"),
            Condition::Foe => f.write_str("foe"),
            Condition::FriendWithFood => f.write_str("friendwithfood"),
            Condition::FoeWithFood => f.write_str("foewithfood"),
            Condition::Food => f.write_str("food"),
            Condition::Rock => f.write_str("rock"),
            Condition::Marker(m) => write!(f, "marker {}", m),
            Condition::FoeMarker => f.write_str("foemarker"),
            Condition::Home => f.write_str("home"),
            Condition::FoeHome => f.write_str("foehome"),
        }
    }
}

/// Turn direction for `turn`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl FromStr for Turn {
    type Err = ();

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            b"left" => Ok(Turn::Left),
            b"right" => Ok(Turn::Right),
            _ => Err(()),
        }
    }
}

/// One compiled brain state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Sense {
        dir: SenseDir,
        cond: Condition,
        on_true: u32,
        on_false: u32,
    },
    Mark {
        marker: u8,
        next: u32,
    },
    Unmark {
        marker: u8,
        next: u32,
    },
    PickUp {
        on_success: u32,
        on_fail: u32,
    },
    Drop {
        next: u32,
    },
    Turn {
        turn: Turn,
        next: u32,
    },
    Move {
        on_success: u32,
        on_fail: u32,
    },
    Flip {
        p: u32,
        on_zero: u32,
        otherwise: u32,
    },
}

impl Instruction {
    /// Highest state index this instruction can jump to
    pub fn max_target(&self) -> u32 {
        match *self {
            Instruction::Sense {
                on_true, on_false, ..
            } => on_true.max(on_false),
            Instruction::Mark { next, .. }
            | Instruction::Unmark { next, .. }
            | Instruction::Drop { next }
            | Instruction::Turn { next, .. } => next,
            Instruction::PickUp {
                on_success,
                on_fail,
            }
            | Instruction::Move {
                on_success,
                on_fail,
            } => on_success.max(on_fail),
            Instruction::Flip {
                on_zero, otherwise, ..
            } => on_zero.max(otherwise),
        }
    }
}

/// Renders the canonical (lower-case, single-spaced) source form
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Sense {
                dir,
                cond,
                on_true,
                on_false,
            } => write!(f, "sense {} {} {} {}", dir.as_str(), on_true, on_false, cond),
            Instruction::Mark { marker, next } => write!(f, "mark {} {}", marker, next),
            Instruction::Unmark { marker, next } => write!(f, "unmark {} {}", marker, next),
            Instruction::PickUp {
                on_success,
                on_fail,
            } => write!(f, "pickup {} {}", on_success, on_fail),
            Instruction::Drop { next } => write!(f, "drop {}", next),
            Instruction::Turn { turn, next } => {
                let t = match turn {
                    Turn::Left => "left",
                    Turn::Right => "right",
                };
                write!(f, "turn {} {}", t, next)
            }
            Instruction::Move {
                on_success,
                on_fail,
            } => write!(f, "move {} {}", on_success, on_fail),
            Instruction::Flip {
                p,
                on_zero,
                otherwise,
            } => write!(f, "flip {} {} {}", p, on_zero, otherwise),
        }
    }
}
