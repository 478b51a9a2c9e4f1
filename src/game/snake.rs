use super::direction::Direction;
use super::grid::Coord;
use std::collections::VecDeque;

/// The snake, which may stick out past the border after a fatal step
///
/// The body is stored head first.  It is never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Coord>,
}

/// What happened during a call to [`Snake::step()`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct StepOutcome {
    /// The new head landed on the food and the snake grew by one cell
    pub(crate) ate_food: bool,

    /// The new head landed on the snake's own body.  The snake was left
    /// without its new head, and the step should be treated as fatal.
    pub(crate) self_collision: bool,
}

impl Snake {
    /// Create a snake from the given coordinates, head first.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub(crate) fn new<I: IntoIterator<Item = Coord>>(body: I) -> Snake {
        let body = body.into_iter().collect::<VecDeque<_>>();
        assert!(!body.is_empty(), "a snake must have at least one cell");
        Snake { body }
    }

    pub(crate) fn head(&self) -> Coord {
        self.body[0]
    }

    /// Return the positions of the cells in the snake's body, head first
    pub(crate) fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn contains(&self, pos: Coord) -> bool {
        self.body.contains(&pos)
    }

    /// Return the direction from the second cell of the snake to its head, if
    /// the two are adjacent
    pub(crate) fn facing(&self) -> Option<Direction> {
        let neck = self.body.get(1)?;
        Direction::between(*neck, self.head())
    }

    /// Move the snake one cell in `direction`.
    ///
    /// The tail is released before checking for a self-collision, so
    /// following one's own tail into the cell it is vacating is safe.  The
    /// new head is not checked against the grid's bounds; that is left to
    /// [`Grid::project()`](super::grid::Grid::project).
    pub(crate) fn step(&mut self, direction: Direction, food: Option<Coord>) -> StepOutcome {
        let new_head = direction.advance(self.head());
        let ate_food = Some(new_head) == food;
        let mut released = None;
        if !ate_food {
            released = self.body.pop_back();
        }
        if self.body.contains(&new_head) {
            // Put the tail back so that the body is left as it was.
            self.body.extend(released);
            return StepOutcome {
                ate_food,
                self_collision: true,
            };
        }
        self.body.push_front(new_head);
        StepOutcome {
            ate_food,
            self_collision: false,
        }
    }
}
