use super::grid::Coord;
use crate::consts;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the coordinate one cell away from `pos` in this direction.  The
    /// result may lie outside the grid.
    pub(crate) fn advance(self, pos: Coord) -> Coord {
        match self {
            Direction::Up => pos.offset(-1, 0),
            Direction::Down => pos.offset(1, 0),
            Direction::Left => pos.offset(0, -1),
            Direction::Right => pos.offset(0, 1),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Return the direction one would move in to get from `from` to the
    /// adjacent cell `to`
    pub(crate) fn between(from: Coord, to: Coord) -> Option<Direction> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .find(|d| d.advance(from) == to)
    }

    /// Return the glyph to use for drawing the snake's head when moving in
    /// this direction
    pub(crate) fn head_symbol(self) -> char {
        match self {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }
}

/// The direction the snake is moving in, as far as input validation is
/// concerned
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Heading {
    /// No direction has been chosen yet.  The snake is lying still, facing
    /// the given direction (if its body is long enough to face anywhere).
    Unset { facing: Option<Direction> },

    /// The snake is moving in the given direction
    Moving(Direction),
}

impl Heading {
    /// Decide whether the snake may turn to `new`.
    ///
    /// A moving snake may only turn onto the other axis.  A snake that has not
    /// moved yet may go anywhere except backwards into its own neck.
    pub(crate) fn accepts(self, new: Direction) -> bool {
        match self {
            Heading::Unset { facing } => facing.is_none_or(|f| new != f.reverse()),
            Heading::Moving(current) => current.is_vertical() != new.is_vertical(),
        }
    }

    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Heading::Unset { .. } => None,
            Heading::Moving(d) => Some(d),
        }
    }

    /// The direction to draw the snake's head as pointing in
    pub(crate) fn orientation(self) -> Option<Direction> {
        match self {
            Heading::Unset { facing } => facing,
            Heading::Moving(d) => Some(d),
        }
    }
}
