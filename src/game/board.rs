use super::direction::Direction;
use super::grid::{CellState, Coord};
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect, Size},
    style::Style,
    widgets::{Block, Widget},
};
use std::collections::HashMap;

/// The drawing surface a [`Session`](super::session::Session) reports its
/// changes to
pub(crate) trait Renderer {
    /// Prepare an empty grid of the given size, discarding everything drawn
    /// before
    fn init_grid(&mut self, size: Size);

    /// Show the cell at `pos` as being in the given state
    fn draw_cell(&mut self, pos: Coord, state: CellState);

    /// Mark `pos` as the snake's head, pointing in `direction`
    fn draw_head(&mut self, pos: Coord, direction: Direction);

    /// Remove the head marker from `pos`
    fn clear_head(&mut self, pos: Coord);
}

/// A [`Renderer`] that remembers what it was told to draw so that it can be
/// rendered as a widget
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct BoardView {
    size: Size,
    /// The non-empty cells
    cells: HashMap<Coord, CellState>,
    head: Option<(Coord, Direction)>,
    crash: Option<Coord>,
}

impl BoardView {
    pub(crate) fn new() -> BoardView {
        BoardView::default()
    }

    /// Size of the widget including its border
    pub(crate) fn outer_size(&self) -> Size {
        Size {
            width: self.size.width.saturating_add(2),
            height: self.size.height.saturating_add(2),
        }
    }

    /// Mark the cell where the snake died, or unmark it
    pub(crate) fn set_crash(&mut self, pos: Option<Coord>) {
        self.crash = pos;
    }
}

impl Renderer for BoardView {
    fn init_grid(&mut self, size: Size) {
        self.size = size;
        self.cells.clear();
        self.head = None;
        self.crash = None;
    }

    fn draw_cell(&mut self, pos: Coord, state: CellState) {
        if state == CellState::Empty {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state);
        }
    }

    fn draw_head(&mut self, pos: Coord, direction: Direction) {
        self.head = Some((pos, direction));
    }

    fn clear_head(&mut self, pos: Coord) {
        if self.head.is_some_and(|(p, _)| p == pos) {
            self.head = None;
        }
    }
}

impl Widget for &BoardView {
    // `area` is the area in which to center the board, not the area of the
    // board proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_area = center_rect(area, self.outer_size());
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for (&pos, &state) in &self.cells {
            match state {
                CellState::Empty => (),
                CellState::Snake => {
                    canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
                }
                CellState::Food => canvas.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
            }
        }
        // Draw the head & crash site last so that they overwrite the body
        if let Some((pos, direction)) = self.head {
            canvas.draw_cell(pos, direction.head_symbol(), consts::SNAKE_STYLE);
        }
        if let Some(pos) = self.crash {
            canvas.draw_cell(pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Coord, symbol: char, style: Style) {
        let (Ok(row), Ok(col)) = (u16::try_from(pos.row), u16::try_from(pos.col)) else {
            return;
        };
        if row >= self.area.height || col >= self.area.width {
            return;
        }
        let Some(x) = self.area.x.checked_add(col) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
