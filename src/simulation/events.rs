use crate::ant::Color;
use std::cell::RefCell;
use std::rc::Rc;

/// State change fired while a tick executes, in execution order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    MarkerPlaced {
        row: u32,
        col: u32,
        color: Color,
        marker: u8,
    },
    MarkerRemoved {
        row: u32,
        col: u32,
        color: Color,
        marker: u8,
    },
    /// Food on a cell changed; `food` is the new amount
    FoodChanged { row: u32, col: u32, food: u32 },
    AntKilled {
        id: u32,
        color: Color,
        row: u32,
        col: u32,
    },
}

/// Receives game events as they happen
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Records every event
impl GameObserver for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Shared observer, so the caller can read it back while the game owns a handle
impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Optional observer slot owned by a game
#[derive(Default)]
pub(crate) struct EventSink {
    observer: Option<Box<dyn GameObserver>>,
}

impl EventSink {
    pub(crate) fn set(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    pub(crate) fn take(&mut self) -> Option<Box<dyn GameObserver>> {
        self.observer.take()
    }

    #[inline]
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }
}
