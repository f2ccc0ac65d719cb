use crate::ant::Ant;
use crate::config::{DEATH_FOOD, SURROUND_LIMIT};
use crate::direction::Direction;
use crate::simulation::events::{EventSink, GameEvent};
use crate::world::WorldGrid;
use tracing::debug;

/// Ids of enemy ants next to an ant, in direction order
pub(crate) fn adjacent_enemies(world: &WorldGrid, ants: &[Ant], id: u32) -> [Option<u32>; 6] {
    let ant = &ants[id as usize];
    Direction::ALL.map(|d| {
        let n = world.neighbor_index(ant.pos, d)?;
        let other = world.cell_at(n).ant()?;
        (ants[other as usize].color != ant.color).then_some(other)
    })
}

/// True if a living ant has at least five enemies around it
pub(crate) fn is_surrounded(world: &WorldGrid, ants: &[Ant], id: u32) -> bool {
    ants[id as usize].is_alive()
        && adjacent_enemies(world, ants, id).iter().flatten().count() >= SURROUND_LIMIT
}

/// Kill an ant: its cell gets the death food plus anything it carried
pub(crate) fn kill(world: &mut WorldGrid, ants: &mut [Ant], events: &mut EventSink, id: u32) {
    let ant = &mut ants[id as usize];
    let cell = world.cell_at_mut(ant.pos);
    cell.deposit_food(DEATH_FOOD + ant.food());
    cell.remove_ant();
    let (row, col, food) = (cell.row, cell.col, cell.food());
    ant.set_food(false);
    ant.set_alive(false);

    debug!(id, color = %ant.color, row, col, "ant killed");
    events.emit(GameEvent::FoodChanged { row, col, food });
    events.emit(GameEvent::AntKilled {
        id,
        color: ant.color,
        row,
        col,
    });
}

/// Death checks after `mover` stepped onto a new cell
pub(crate) fn resolve_combat(
    world: &mut WorldGrid,
    ants: &mut [Ant],
    events: &mut EventSink,
    mover: u32,
) {
    let enemies = adjacent_enemies(world, ants, mover);
    settle(world, ants, events, mover, enemies.into_iter().flatten());
}

/// The mover is checked first, then every enemy it was standing next to,
/// whether or not the mover survived.
fn settle(
    world: &mut WorldGrid,
    ants: &mut [Ant],
    events: &mut EventSink,
    mover: u32,
    enemies: impl IntoIterator<Item = u32>,
) {
    if is_surrounded(world, ants, mover) {
        kill(world, ants, events, mover);
    }
    for enemy in enemies {
        if is_surrounded(world, ants, enemy) {
            kill(world, ants, events, enemy);
        }
    }
}
