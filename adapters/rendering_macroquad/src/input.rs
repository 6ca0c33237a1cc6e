use macroquad::input::{is_key_pressed, KeyCode};
use maze_trail_core::Direction;

/// Arrow keys pressed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    /// `Up` was pressed.
    pub up: bool,
    /// `Right` was pressed.
    pub right: bool,
    /// `Down` was pressed.
    pub down: bool,
    /// `Left` was pressed.
    pub left: bool,
}

impl ArrowKeys {
    /// Moves requested by the pressed keys, in top, right, bottom, left order.
    ///
    /// Every arrow pressed during the frame yields one move.
    #[must_use]
    pub fn directions(self) -> Vec<Direction> {
        let pressed = [self.up, self.right, self.down, self.left];
        Direction::ALL
            .into_iter()
            .zip(pressed)
            .filter_map(|(direction, pressed)| pressed.then_some(direction))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    pub(crate) quit_requested: bool,
    /// Arrow keys steering the player.
    pub(crate) arrows: ArrowKeys,
}

impl KeyboardShortcuts {
    pub(crate) fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let arrows = ArrowKeys {
            up: is_key_pressed(KeyCode::Up),
            right: is_key_pressed(KeyCode::Right),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
        };

        Self {
            quit_requested,
            arrows,
        }
    }
}
