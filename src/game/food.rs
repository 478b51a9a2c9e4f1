use super::grid::Coord;
use super::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Size;

/// How many random cells to try before falling back to picking among the
/// free cells directly
const MAX_SAMPLES: usize = 64;

/// Pick a cell of a grid of the given size that is not occupied by `snake`,
/// uniformly at random.  Returns `None` if there is no such cell.
///
/// Cells are first sampled at random and retried while they land on the
/// snake; once the snake covers most of the grid, the free cells are
/// enumerated instead so that the search always ends.
pub(crate) fn place_food<R: Rng>(rng: &mut R, size: Size, snake: &Snake) -> Option<Coord> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    for _ in 0..MAX_SAMPLES {
        let pos = Coord::new(
            rng.random_range(0..i32::from(size.height)),
            rng.random_range(0..i32::from(size.width)),
        );
        if !snake.contains(pos) {
            return Some(pos);
        }
    }
    (0..i32::from(size.height))
        .flat_map(|row| (0..i32::from(size.width)).map(move |col| Coord::new(row, col)))
        .filter(|&pos| !snake.contains(pos))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn never_on_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::new([(1, 1), (1, 2), (1, 3), (2, 3)].map(Coord::from));
        let size = Size::new(4, 4);
        for _ in 0..500 {
            let pos = place_food(&mut rng, size, &snake).expect("grid has free cells");
            assert!(!snake.contains(pos), "food placed on snake at {pos:?}");
            assert!((0..4).contains(&pos.row), "row out of range: {pos:?}");
            assert!((0..4).contains(&pos.col), "column out of range: {pos:?}");
        }
    }

    #[test]
    fn reaches_every_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::new([Coord::new(0, 0)]);
        let size = Size::new(3, 2);
        let seen = (0..500)
            .filter_map(|_| place_food(&mut rng, size, &snake))
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), 5);
        assert!(!seen.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn single_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::new([(0, 0), (0, 1), (0, 2), (1, 2), (1, 1)].map(Coord::from));
        assert_eq!(
            place_food(&mut rng, Size::new(3, 2), &snake),
            Some(Coord::new(1, 0))
        );
    }

    #[test]
    fn full_grid() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::new([(0, 0), (0, 1), (1, 1), (1, 0)].map(Coord::from));
        assert_eq!(place_food(&mut rng, Size::new(2, 2), &snake), None);
    }
}
