//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default size of the grid, in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 30,
    height: 18,
};

/// Largest grid that still fits inside [`DISPLAY_SIZE`] together with its
/// border, the score bar, and the two message lines beneath it
pub(crate) const MAX_GRID_SIZE: Size = Size {
    width: DISPLAY_SIZE.width - 2,
    height: DISPLAY_SIZE.height - 5,
};

/// Smallest grid that can hold [`INITIAL_SNAKE`]
pub(crate) const MIN_GRID_SIZE: Size = Size {
    width: 4,
    height: 4,
};

/// Number of steps per second at the start of a session
pub(crate) const BASE_SPEED: f64 = 10.0;

/// Factor by which the speed is multiplied every time food is eaten
pub(crate) const SPEED_GROWTH: f64 = 1.01;

/// Slowest allowed speed, in steps per second
pub(crate) const MIN_SPEED: f64 = 0.1;

/// Fastest base speed accepted from the configuration file, in steps per
/// second.  Eating food may push the speed beyond this.
pub(crate) const MAX_BASE_SPEED: f64 = 100.0;

/// Time between steps at [`MIN_SPEED`]
pub(crate) const MAX_INTERVAL: Duration = Duration::from_secs(10);

/// Largest allowed value for the speed growth factor
pub(crate) const MAX_SPEED_GROWTH: f64 = 2.0;

/// The snake's body at the start of a session as `(row, column)` pairs, head
/// first
pub(crate) const INITIAL_SNAKE: [(i32, i32); 3] = [(3, 3), (3, 2), (3, 1)];

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with itself or a wall
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Name of the environment variable that enables logging.  Its value is used
/// as the log filter.
pub(crate) const LOG_ENV_VAR: &str = "GRIDSNAKE_LOG";
