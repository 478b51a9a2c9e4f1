use super::snake::Snake;
use ratatui::layout::Size;

/// A `(row, column)` position on (or just off) the grid.
///
/// Components are signed so that a step off the top or left edge is
/// representable; such coordinates are only ever reported as border
/// collisions by [`Grid::project()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Coord {
    pub(crate) row: i32,
    pub(crate) col: i32,
}

impl Coord {
    pub(crate) const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub(crate) fn offset(self, drow: i32, dcol: i32) -> Coord {
        Coord {
            row: self.row.saturating_add(drow),
            col: self.col.saturating_add(dcol),
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord { row, col }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum CellState {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Classification of every cell of the playing field.  The grid is never
/// edited cell by cell; it is rebuilt from the snake & food by
/// [`Grid::project()`] after every step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: Size,
    cells: Vec<CellState>,
}

impl Grid {
    pub(crate) fn new(size: Size) -> Grid {
        Grid {
            size,
            cells: vec![CellState::Empty; usize::from(size.width) * usize::from(size.height)],
        }
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contains(&self, pos: Coord) -> bool {
        self.get(pos).is_some()
    }

    /// Return the state of the cell at `pos`, or `None` if `pos` is off the
    /// grid
    pub(crate) fn get(&self, pos: Coord) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Rebuild the grid from `snake` and `food`.
    ///
    /// Snake coordinates outside the grid are skipped.  Returns `true` if
    /// there were any, i.e., if the snake has run into the border.
    pub(crate) fn project(&mut self, snake: &Snake, food: Option<Coord>) -> bool {
        self.cells.fill(CellState::Empty);
        let mut hit_border = false;
        for &pos in snake.body() {
            match self.index(pos) {
                Some(i) => self.cells[i] = CellState::Snake,
                None => hit_border = true,
            }
        }
        if let Some(i) = food.and_then(|pos| self.index(pos)) {
            self.cells[i] = CellState::Food;
        }
        hit_border
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        let width = usize::from(self.size.width).max(1);
        self.cells.iter().enumerate().filter_map(move |(i, &st)| {
            let row = i32::try_from(i / width).ok()?;
            let col = i32::try_from(i % width).ok()?;
            Some((Coord::new(row, col), st))
        })
    }

    /// Iterate over the cells whose state differs from that in `previous`.
    /// If the grids differ in size, every cell is yielded.
    pub(crate) fn changes<'a>(
        &'a self,
        previous: &'a Grid,
    ) -> impl Iterator<Item = (Coord, CellState)> + 'a {
        let resized = self.size != previous.size;
        self.cells()
            .zip(
                previous
                    .cells
                    .iter()
                    .copied()
                    .chain(std::iter::repeat(CellState::Empty)),
            )
            .filter_map(move |((pos, st), old)| (resized || st != old).then_some((pos, st)))
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        let width = usize::from(self.size.width);
        (row < usize::from(self.size.height) && col < width).then(|| row * width + col)
    }
}
