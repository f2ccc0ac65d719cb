use crate::ant::{Ant, Color};
use crate::brain::{Brain, Condition, Instruction, SenseDir, Turn};
use crate::direction::Direction;
use crate::rng::AntRng;
use crate::simulation::combat::resolve_combat;
use crate::simulation::events::{EventSink, GameEvent, GameObserver};
use crate::world::{CellKind, WorldGrid};
use colored::Colorize;
use std::fmt;
use std::time::Duration;

/// Food and losses of one colony
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamScore {
    /// Food lying on the colony's hill cells
    pub food: u32,
    /// Dead ants of the colony
    pub deaths: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub red: TeamScore,
    pub black: TeamScore,
}

impl Score {
    pub fn team(&self, color: Color) -> TeamScore {
        match color {
            Color::Red => self.red,
            Color::Black => self.black,
        }
    }

    /// Colony with more food at home; `None` on a draw
    pub fn winner(&self) -> Option<Color> {
        match self.red.food.cmp(&self.black.food) {
            std::cmp::Ordering::Greater => Some(Color::Red),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "red: {} food, {} dead | black: {} food, {} dead",
            self.red.food, self.red.deaths, self.black.food, self.black.deaths
        )
    }
}

/// Read-only snapshot of an ant for renderers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AntView {
    pub id: u32,
    pub color: Color,
    pub row: u32,
    pub col: u32,
    pub dir: Direction,
    pub food: u32,
    pub alive: bool,
}

/// Read-only snapshot of a cell for renderers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub row: u32,
    pub col: u32,
    pub kind: CellKind,
    pub food: u32,
    /// Marker flags indexed by colour, then marker id
    pub markers: [[bool; 6]; 2],
}

/// A running game: the world, both colonies and their brains.
///
/// Ants live in a flat vector indexed by id; cells refer to them by id and
/// ants refer to their cell by grid index.
pub struct Game {
    world: WorldGrid,
    ants: Vec<Ant>,
    /// Brains indexed by colour
    brains: [Brain; 2],
    rng: AntRng,
    ticks: u64,
    events: EventSink,
}

impl Game {
    /// New game with an entropy-seeded RNG
    pub fn new(red: Brain, black: Brain, world: WorldGrid) -> Self {
        Self::with_rng(red, black, world, AntRng::new())
    }

    /// Spawn one ant on every hill cell, ids assigned in row-major order
    pub fn with_rng(red: Brain, black: Brain, mut world: WorldGrid, rng: AntRng) -> Self {
        let mut ants = Vec::new();
        for idx in 0..world.cells().len() as u32 {
            if let Some(color) = world.cell_at(idx).kind().hill_color() {
                let id = ants.len() as u32;
                world.cell_at_mut(idx).set_ant(id);
                ants.push(Ant::new(id, color, idx));
            }
        }
        Self {
            world,
            ants,
            brains: [red, black],
            rng,
            ticks: 0,
            events: EventSink::default(),
        }
    }

    /// Install the observer that receives every marker, food and death event
    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.events.set(Box::new(observer));
    }

    /// Remove and return the installed observer
    pub fn take_observer(&mut self) -> Option<Box<dyn GameObserver>> {
        self.events.take()
    }

    pub fn world(&self) -> &WorldGrid {
        &self.world
    }

    pub fn ant(&self, id: u32) -> Option<&Ant> {
        self.ants.get(id as usize)
    }

    /// Completed ticks
    pub fn tick(&self) -> u64 {
        self.ticks
    }

    /// Run several ticks
    pub fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// One tick: every ant steps once, in creation order.
    ///
    /// Ants stepped earlier in the tick can kill ants that have not stepped
    /// yet; those skip their turn.
    pub fn step(&mut self) {
        for id in 0..self.ants.len() as u32 {
            self.step_ant(id);
        }
        self.ticks += 1;
    }

    fn step_ant(&mut self, id: u32) {
        let ant = &mut self.ants[id as usize];
        if !ant.is_alive() {
            return;
        }
        if ant.is_resting() {
            ant.resting -= 1;
            return;
        }
        let instruction = self.brains[ant.color.index()].get(ant.state);
        let next = self.execute(id, instruction);
        self.ants[id as usize].state = next;
    }

    /// Run one instruction for a live, awake ant and return its next state
    fn execute(&mut self, id: u32, instruction: Instruction) -> u32 {
        let (pos, color, dir) = {
            let ant = &self.ants[id as usize];
            (ant.pos, ant.color, ant.dir)
        };

        match instruction {
            Instruction::Sense {
                dir: sense_dir,
                cond,
                on_true,
                on_false,
            } => {
                let target = match sense_dir {
                    SenseDir::Here => Some(pos),
                    SenseDir::Ahead => self.world.neighbor_index(pos, dir),
                    SenseDir::LeftAhead => self.world.neighbor_index(pos, dir.left()),
                    SenseDir::RightAhead => self.world.neighbor_index(pos, dir.right()),
                };
                if self.sense(target, color, cond) {
                    on_true
                } else {
                    on_false
                }
            }
            Instruction::Mark { marker, next } => {
                let cell = self.world.cell_at_mut(pos);
                cell.add_marker(color, marker);
                let (row, col) = (cell.row, cell.col);
                self.events.emit(GameEvent::MarkerPlaced {
                    row,
                    col,
                    color,
                    marker,
                });
                next
            }
            Instruction::Unmark { marker, next } => {
                let cell = self.world.cell_at_mut(pos);
                cell.remove_marker(color, marker);
                let (row, col) = (cell.row, cell.col);
                self.events.emit(GameEvent::MarkerRemoved {
                    row,
                    col,
                    color,
                    marker,
                });
                next
            }
            Instruction::PickUp {
                on_success,
                on_fail,
            } => {
                let cell = self.world.cell_at_mut(pos);
                if self.ants[id as usize].has_food() || !cell.has_food() {
                    return on_fail;
                }
                cell.remove_food();
                let (row, col, food) = (cell.row, cell.col, cell.food());
                self.ants[id as usize].set_food(true);
                self.events.emit(GameEvent::FoodChanged { row, col, food });
                on_success
            }
            Instruction::Drop { next } => {
                if self.ants[id as usize].has_food() {
                    let cell = self.world.cell_at_mut(pos);
                    cell.deposit_food(1);
                    let (row, col, food) = (cell.row, cell.col, cell.food());
                    self.ants[id as usize].set_food(false);
                    self.events.emit(GameEvent::FoodChanged { row, col, food });
                }
                next
            }
            Instruction::Turn { turn, next } => {
                self.ants[id as usize].dir = match turn {
                    Turn::Left => dir.left(),
                    Turn::Right => dir.right(),
                };
                next
            }
            Instruction::Move {
                on_success,
                on_fail,
            } => {
                let Some(dest) = self.world.neighbor_index(pos, dir) else {
                    return on_fail;
                };
                if !self.world.cell_at(dest).is_available() {
                    return on_fail;
                }
                self.world.cell_at_mut(pos).remove_ant();
                self.world.cell_at_mut(dest).set_ant(id);
                let ant = &mut self.ants[id as usize];
                ant.move_to(dest);
                ant.rest();
                resolve_combat(&mut self.world, &mut self.ants, &mut self.events, id);
                on_success
            }
            Instruction::Flip {
                p,
                on_zero,
                otherwise,
            } => {
                if self.rng.next(p) == 0 {
                    on_zero
                } else {
                    otherwise
                }
            }
        }
    }

    /// Evaluate a condition on a cell; a missing cell reads as rock
    fn sense(&self, target: Option<u32>, color: Color, cond: Condition) -> bool {
        let Some(idx) = target else {
            return cond == Condition::Rock;
        };
        let cell = self.world.cell_at(idx);
        let occupant = cell.ant().map(|o| &self.ants[o as usize]);
        match cond {
            Condition::Friend => occupant.is_some_and(|a| a.color == color),
            Condition::Foe => occupant.is_some_and(|a| a.color != color),
            Condition::FriendWithFood => occupant.is_some_and(|a| a.color == color && a.has_food()),
            Condition::FoeWithFood => occupant.is_some_and(|a| a.color != color && a.has_food()),
            Condition::Food => cell.has_food(),
            Condition::Rock => cell.is_rock(),
            Condition::Marker(m) => cell.has_marker(color, m),
            Condition::FoeMarker => cell.has_any_marker(color.other()),
            Condition::Home => cell.kind() == CellKind::hill(color),
            Condition::FoeHome => cell.kind() == CellKind::hill(color.other()),
        }
    }

    /// Hill food and deaths for both colonies
    pub fn score(&self) -> Score {
        let mut score = Score::default();
        let hill_food = |color| -> u32 {
            self.world
                .hill_cells(color)
                .into_iter()
                .map(|idx| self.world.cell_at(idx).food())
                .sum()
        };
        score.red.food = hill_food(Color::Red);
        score.black.food = hill_food(Color::Black);
        for ant in self.ants.iter().filter(|a| !a.is_alive()) {
            match ant.color {
                Color::Red => score.red.deaths += 1,
                Color::Black => score.black.deaths += 1,
            }
        }
        score
    }

    /// Snapshot of every ant, dead ones included
    pub fn ants(&self) -> impl Iterator<Item = AntView> + '_ {
        self.ants.iter().map(|a| {
            let (row, col) = self.world.coords(a.pos);
            AntView {
                id: a.id,
                color: a.color,
                row,
                col,
                dir: a.dir,
                food: a.food(),
                alive: a.is_alive(),
            }
        })
    }

    /// Snapshot of every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.world.cells().iter().map(|c| CellView {
            row: c.row,
            col: c.col,
            kind: c.kind(),
            food: c.food(),
            markers: [c.markers(Color::Red), c.markers(Color::Black)],
        })
    }

    /// Print the final score
    pub fn print_summary(&self, elapsed: Duration) {
        let score = self.score();
        let verdict = match score.winner() {
            Some(Color::Red) => "red wins".red().bold(),
            Some(Color::Black) => "black wins".bright_white().bold(),
            None => "draw".yellow().bold(),
        };
        println!(
            "\n{}\n{} {} {} {}",
            "===".bright_blue().bold(),
            "🐜 Score after".green().bold(),
            format!("{} rounds:", self.ticks).cyan(),
            format!(
                "red {} food / {} dead",
                score.red.food, score.red.deaths
            )
            .red(),
            format!(
                "black {} food / {} dead",
                score.black.food, score.black.deaths
            )
            .bright_white(),
        );
        println!(
            "{} {} {}",
            verdict,
            "|".dimmed(),
            format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::compile;
    use std::cell::RefCell;
    use std::rc::Rc;

    const OPEN: &str = "5\n5\n# # # # #\n # + . . #\n# . . . #\n # . - 1 #\n# # # # #\n";

    const ARENA: &str = "9\n7\n\
        # # # # # # # # #\n \
        # . . . . . . . #\n\
        # . . . + + . . #\n \
        # . + 1 - . . . #\n\
        # . . . + + . . #\n \
        # . . . . . . . #\n\
        # # # # # # # # #\n";

    fn game(world: &str, red: &str, black: &str) -> Game {
        Game::with_rng(
            compile(red).unwrap(),
            compile(black).unwrap(),
            WorldGrid::from_source(world, false).unwrap(),
            AntRng::with_seed(42),
        )
    }

    fn view(game: &Game, id: u32) -> AntView {
        game.ants().nth(id as usize).unwrap()
    }

    #[test]
    fn test_spawn_in_scan_order() {
        let g = game(ARENA, "drop 0", "drop 0");
        let ants: Vec<AntView> = g.ants().collect();
        assert_eq!(ants.len(), 6);
        let placed: Vec<(u32, u32, Color)> = ants.iter().map(|a| (a.row, a.col, a.color)).collect();
        assert_eq!(
            placed,
            vec![
                (2, 4, Color::Red),
                (2, 5, Color::Red),
                (3, 2, Color::Red),
                (3, 4, Color::Black),
                (4, 4, Color::Red),
                (4, 5, Color::Red),
            ]
        );
        assert!(ants.iter().all(|a| a.alive && a.dir == Direction::East && a.food == 0));
        assert_eq!(g.world().cell(3, 4).unwrap().ant(), Some(3));
    }

    #[test]
    fn test_move_then_rest_cycle() {
        let mut g = game(OPEN, "move 1 0\nturn right 1", "turn left 0");

        g.run(1);
        let red = view(&g, 0);
        assert_eq!((red.row, red.col), (1, 2));
        assert_eq!(g.ant(0).unwrap().state, 1);
        assert_eq!(g.ant(0).unwrap().resting, 14);
        assert_eq!(g.world().cell(1, 1).unwrap().ant(), None);
        assert_eq!(g.world().cell(1, 2).unwrap().ant(), Some(0));

        // asleep through tick 15
        g.run(14);
        assert_eq!(view(&g, 0).dir, Direction::East);
        assert_eq!(g.ant(0).unwrap().resting, 0);

        g.run(1);
        assert_eq!(view(&g, 0).dir, Direction::SouthEast);
        assert_eq!(g.tick(), 16);
    }

    #[test]
    fn test_blocked_move_takes_fail_branch() {
        // two left turns leave red facing north-west, into the border
        let mut g = game(OPEN, "turn left 1\nturn left 2\nmove 3 4\ndrop 3\ndrop 4", "drop 0");
        g.run(3);
        let red = view(&g, 0);
        assert_eq!((red.row, red.col), (1, 1));
        assert_eq!(red.dir, Direction::NorthWest);
        assert_eq!(g.ant(0).unwrap().state, 4);
        assert!(!g.ant(0).unwrap().is_resting());
    }

    #[test]
    fn test_surrounded_ant_dies_and_drops_food() {
        let mut g = game(ARENA, "sense ahead 1 2 food\nmove 2 2\ndrop 2", "drop 0");

        g.run(2);

        let black = view(&g, 3);
        assert!(!black.alive);
        assert_eq!(g.world().cell(3, 4).unwrap().food(), 3);
        assert_eq!(g.world().cell(3, 4).unwrap().ant(), None);
        assert_eq!(view(&g, 2).col, 3);
        let score = g.score();
        assert_eq!(score.black, TeamScore { food: 3, deaths: 1 });
        assert_eq!(score.red, TeamScore { food: 0, deaths: 0 });
        assert_eq!(score.winner(), Some(Color::Black));
    }

    #[test]
    fn test_food_round_trip_fires_events() {
        let world = "5\n5\n# # # # #\n # + 2 . #\n# . . . #\n # . - . #\n# # # # #\n";
        let red = "move 1 0\npickup 2 1\nturn left 3\nturn left 4\nturn left 5\nmove 6 5\ndrop 7\nmark 2 8\nunmark 2 9\ndrop 9";
        let mut g = game(world, red, "drop 0");
        let log = Rc::new(RefCell::new(Vec::new()));
        g.set_observer(log.clone());

        g.run(40);

        assert_eq!(g.score().red.food, 1);
        assert_eq!(g.world().cell(1, 2).unwrap().food(), 1);
        assert_eq!(
            *log.borrow(),
            vec![
                GameEvent::FoodChanged { row: 1, col: 2, food: 1 },
                GameEvent::FoodChanged { row: 1, col: 1, food: 1 },
                GameEvent::MarkerPlaced { row: 1, col: 1, color: Color::Red, marker: 2 },
                GameEvent::MarkerRemoved { row: 1, col: 1, color: Color::Red, marker: 2 },
            ]
        );
    }

    #[test]
    fn test_pickup_only_when_empty_handed() {
        let mut g = game(OPEN, "drop 0", "pickup 1 2\npickup 2 3\ndrop 2\ndrop 3");
        g.world.cell_mut(3, 2).unwrap().deposit_food(2);

        g.run(2);

        assert_eq!(g.ant(1).unwrap().state, 3);
        assert!(g.ant(1).unwrap().has_food());
        assert_eq!(g.world().cell(3, 2).unwrap().food(), 1);
    }

    #[test]
    fn test_sensing() {
        let world = "7\n5\n# # # # # # #\n # . . . . . #\n# . + - 2 . #\n # . . . . . #\n# # # # # # #\n";
        // every check that comes out as expected moves on; anything else lands in 9
        let red = "sense here 1 9 home\n\
                   sense ahead 2 9 foe\n\
                   sense ahead 3 9 foehome\n\
                   sense rightahead 9 4 rock\n\
                   sense ahead 9 5 foewithfood\n\
                   sense ahead 6 9 foemarker\n\
                   sense here 9 7 foemarker\n\
                   sense leftahead 9 8 marker 0\n\
                   drop 8\n\
                   drop 9";
        let mut g = game(world, red, "mark 3 1\ndrop 1");

        g.run(9);

        assert_eq!(g.ant(0).unwrap().state, 8);
        let marked: Vec<(u32, u32)> = g
            .cells()
            .filter(|c| c.markers[Color::Black.index()][3])
            .map(|c| (c.row, c.col))
            .collect();
        assert_eq!(marked, vec![(2, 3)]);
    }

    #[test]
    fn test_missing_neighbour_reads_as_rock() {
        let mut g = Game::with_rng(
            compile("sense ahead 1 2 rock\ndrop 1\ndrop 2").unwrap(),
            compile("move 1 2\ndrop 1\ndrop 2").unwrap(),
            WorldGrid::new(&crate::world::ParsedWorld {
                width: 2,
                height: 1,
                cells: vec![crate::world::Token::Clear, crate::world::Token::RedHill],
            }),
            AntRng::with_seed(1),
        );
        g.ants.push(Ant::new(1, Color::Black, 0));
        g.world.cell_at_mut(0).set_ant(1);
        g.ants[1].dir = Direction::West;

        g.run(1);

        assert_eq!(g.ant(0).unwrap().state, 1);
        assert_eq!(g.ant(1).unwrap().state, 2);
    }

    #[test]
    fn test_flip_is_seeded() {
        let brain = "flip 3 1 2\nflip 3 1 2\nflip 3 1 2";
        let states = |seed| {
            let mut g = Game::with_rng(
                compile(brain).unwrap(),
                compile("flip 0 0 1\ndrop 1").unwrap(),
                WorldGrid::from_source(OPEN, false).unwrap(),
                AntRng::with_seed(seed),
            );
            let mut seen = Vec::new();
            for _ in 0..20 {
                g.step();
                seen.push(g.ant(0).unwrap().state);
                // flip 0 always takes the first branch
                assert_eq!(g.ant(1).unwrap().state, 0);
            }
            seen
        };
        assert_eq!(states(9), states(9));
    }

    #[test]
    fn test_dead_ants_stay_dead() {
        let mut g = game(ARENA, "sense ahead 1 2 food\nmove 2 2\ndrop 2", "turn left 0");
        g.run(2);
        let before = g.ant(3).unwrap().dir;
        g.run(10);
        assert_eq!(g.ant(3).unwrap().dir, before);
        assert_eq!(g.score().black.deaths, 1);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        assert_eq!(score.winner(), None);
        score.red.food = 2;
        assert_eq!(score.winner(), Some(Color::Red));
        assert_eq!(score.team(Color::Red).food, 2);
        assert_eq!(
            score.to_string(),
            "red: 2 food, 0 dead | black: 0 food, 0 dead"
        );
    }
}
