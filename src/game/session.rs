//! Rules of a single playthrough: start, steps, scoring, and the end
use super::board::Renderer;
use super::direction::{Direction, Heading};
use super::food::place_food;
use super::grid::{Coord, Grid};
use super::scheduler::{Clock, LoopState, Scheduler, SystemClock};
use super::snake::Snake;
use crate::config::GameConfig;
use crate::consts;
use crate::highscore::{SaveError, ScoreStore};
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How fast the snake moves, in steps per second
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Speed(f64);

impl Speed {
    /// Create a speed of at least [`consts::MIN_SPEED`].  NaN is treated as
    /// the minimum and infinity as the largest finite `f64`.
    pub(crate) fn new(steps_per_sec: f64) -> Speed {
        if steps_per_sec.is_nan() {
            return Speed(consts::MIN_SPEED);
        }
        Speed(steps_per_sec.clamp(consts::MIN_SPEED, f64::MAX))
    }

    /// Time between two steps.  Very high speeds round down to zero, in which
    /// case steps run back to back.
    pub(crate) fn interval(self) -> Duration {
        Duration::try_from_secs_f64(self.0.recip()).unwrap_or(consts::MAX_INTERVAL)
    }

    pub(crate) fn accelerate(&mut self, factor: f64) {
        *self = Speed::new(self.0 * factor);
    }
}

/// The bookkeeping of a session, apart from the board itself
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SessionState {
    pub(crate) speed: Speed,
    pub(crate) heading: Heading,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) playing: bool,
    pub(crate) paused: bool,
}

/// How a session ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The snake ran into itself
    SelfCollision,

    /// The snake ran into the edge of the grid
    BorderCollision,

    /// The snake fills the entire grid
    Won,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SelfCollision => write!(f, "hit itself"),
            Outcome::BorderCollision => write!(f, "hit the border"),
            Outcome::Won => write!(f, "filled the grid"),
        }
    }
}

/// A step waiting to be run by the [`Scheduler`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StepJob {
    /// Number of the step within the session, starting at 1
    pub(crate) tick: u64,
}

#[derive(Debug)]
pub(crate) struct Session<S, R = rand::rngs::ThreadRng, C = SystemClock> {
    config: GameConfig,
    store: S,
    rng: R,
    grid: Grid,
    snake: Snake,
    food: Option<Coord>,
    state: SessionState,
    scheduler: Scheduler<StepJob, C>,
    outcome: Option<Outcome>,
    /// Most recent failure to save the high score, waiting to be shown to the
    /// user
    save_error: Option<SaveError>,
}

impl<S: ScoreStore, R: Rng, C: Clock> Session<S, R, C> {
    /// Create a session that has not started yet.  The high score is read from
    /// `store` here and never again.
    pub(crate) fn new(config: GameConfig, store: S, rng: R, clock: C) -> Self {
        let high_score = store.get().unwrap_or(0);
        let snake = initial_snake();
        Session {
            grid: Grid::new(config.grid_size()),
            state: SessionState {
                speed: Speed::new(config.base_speed),
                heading: Heading::Unset {
                    facing: snake.facing(),
                },
                score: 0,
                high_score,
                playing: false,
                paused: false,
            },
            config,
            store,
            rng,
            snake,
            food: None,
            scheduler: Scheduler::new(clock),
            outcome: None,
            save_error: None,
        }
    }

    /// Begin a new playthrough: reset the snake, the score, & the speed, place
    /// the food, draw everything, and wait for the player to choose a
    /// direction.
    pub(crate) fn start<D: Renderer>(&mut self, renderer: &mut D) {
        let size = self.config.grid_size();
        self.snake = initial_snake();
        self.state = SessionState {
            speed: Speed::new(self.config.base_speed),
            heading: Heading::Unset {
                facing: self.snake.facing(),
            },
            score: 0,
            high_score: self.state.high_score,
            playing: true,
            paused: false,
        };
        self.outcome = None;
        self.food = place_food(&mut self.rng, size, &self.snake);
        self.grid = Grid::new(size);
        self.grid.project(&self.snake, self.food);
        renderer.init_grid(size);
        for (pos, state) in self.grid.cells() {
            renderer.draw_cell(pos, state);
        }
        if let Some(d) = self.state.heading.orientation() {
            renderer.draw_head(self.snake.head(), d);
        }
        self.scheduler.hold(StepJob { tick: 1 });
        info!(
            width = size.width,
            height = size.height,
            high_score = self.state.high_score,
            "Session started"
        );
    }

    /// Start over after the previous session has ended.  Does nothing and
    /// returns `false` if a session is still in progress.
    pub(crate) fn retry<D: Renderer>(&mut self, renderer: &mut D) -> bool {
        if self.state.playing {
            return false;
        }
        self.start(renderer);
        true
    }

    /// Turn the snake to face `direction`.  If the turn is allowed, the next
    /// step is taken right away instead of when its timer fires.  Returns
    /// `false` if the turn was ignored.
    pub(crate) fn turn<D: Renderer>(&mut self, direction: Direction, renderer: &mut D) -> bool {
        if !self.state.playing || self.state.paused || !self.state.heading.accepts(direction) {
            return false;
        }
        self.state.heading = Heading::Moving(direction);
        if let Some(job) = self.scheduler.fire_now() {
            debug!(tick = job.tick, ?direction, "Turned; stepping immediately");
            self.run_step(job, renderer);
        }
        true
    }

    /// Pause if running, resume if paused.  Returns `false` if neither was
    /// possible.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        if self.state.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Cancel the pending step & hold on to it.  Only possible once the snake
    /// is moving.
    pub(crate) fn pause(&mut self) -> bool {
        if !self.state.playing || self.state.paused || !self.scheduler.pause() {
            return false;
        }
        self.state.paused = true;
        info!(score = self.state.score, "Paused");
        true
    }

    pub(crate) fn resume(&mut self) -> bool {
        if !self.state.paused || !self.scheduler.resume(self.state.speed.interval()) {
            return false;
        }
        self.state.paused = false;
        info!("Resumed");
        true
    }

    /// Run the pending step if its time has come.  Returns `true` if a step
    /// was run.
    pub(crate) fn tick<D: Renderer>(&mut self, renderer: &mut D) -> bool {
        match self.scheduler.take_due() {
            Some(job) => {
                self.run_step(job, renderer);
                true
            }
            None => false,
        }
    }

    /// How long until the pending step should run, or `None` if nothing is
    /// scheduled (not started yet, waiting for the first input, paused, or
    /// over)
    pub(crate) fn until_next_step(&self) -> Option<Duration> {
        self.scheduler.until_due()
    }

    fn run_step<D: Renderer>(&mut self, job: StepJob, renderer: &mut D) {
        let Some(direction) = self.state.heading.direction() else {
            // Not moving yet; nothing to do but keep holding the step.
            self.scheduler.hold(job);
            return;
        };
        renderer.clear_head(self.snake.head());
        let previous = self.grid.clone();
        let outcome = self.snake.step(direction, self.food);
        if outcome.self_collision {
            self.finish(Outcome::SelfCollision);
            return;
        }
        if outcome.ate_food {
            self.eat();
        }
        if self.grid.project(&self.snake, self.food) {
            self.finish(Outcome::BorderCollision);
            return;
        }
        for (pos, state) in self.grid.changes(&previous) {
            renderer.draw_cell(pos, state);
        }
        renderer.draw_head(self.snake.head(), direction);
        if self.food.is_none() {
            self.finish(Outcome::Won);
            return;
        }
        self.scheduler.schedule(
            StepJob { tick: job.tick + 1 },
            self.state.speed.interval(),
        );
    }

    /// Score a point, speed up, and place new food, unless the snake has
    /// taken up the whole grid, in which case `self.food` is left as `None`.
    fn eat(&mut self) {
        self.state.score += 1;
        debug!(score = self.state.score, "Ate food");
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            match self.store.set(self.state.score) {
                Ok(()) => debug!(high_score = self.state.score, "Saved new high score"),
                Err(e) => {
                    warn!(error = %e, "Failed to save new high score");
                    self.save_error = Some(e);
                }
            }
        }
        self.state.speed.accelerate(self.config.speed_growth);
        self.food = if self.snake.len() >= self.grid.cell_count() {
            None
        } else {
            place_food(&mut self.rng, self.grid.size(), &self.snake)
        };
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.playing = false;
        self.state.paused = false;
        self.scheduler.stop();
        self.outcome = Some(outcome);
        info!(score = self.state.score, "Session over: snake {outcome}");
    }

    /// Return (and forget) the most recent error from saving the high score
    pub(crate) fn take_save_error(&mut self) -> Option<SaveError> {
        self.save_error.take()
    }
}

impl<S, R, C> Session<S, R, C> {
    pub(crate) fn state(&self) -> &SessionState {
        &self.state
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub(crate) fn loop_state(&self) -> LoopState {
        self.scheduler.state()
    }

    #[cfg(test)]
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Option<Coord> {
        self.food
    }

    /// Move the food to `pos` and bring the grid up to date with it
    #[cfg(test)]
    pub(crate) fn put_food(&mut self, pos: Coord) {
        self.food = Some(pos);
        self.grid.project(&self.snake, self.food);
    }

    /// Where to draw the wreck after a collision: the foremost part of the
    /// snake that is still on the grid
    pub(crate) fn crash_site(&self) -> Option<Coord> {
        match self.outcome? {
            Outcome::SelfCollision | Outcome::BorderCollision => self
                .snake
                .body()
                .iter()
                .copied()
                .find(|&pos| self.grid.contains(pos)),
            Outcome::Won => None,
        }
    }
}

fn initial_snake() -> Snake {
    Snake::new(consts::INITIAL_SNAKE.map(Coord::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::CellState;
    use crate::game::scheduler::ManualClock;
    use crate::highscore::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Size;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const TICK: Duration = Duration::from_millis(100);

    #[derive(Clone, Debug, Eq, PartialEq)]
    enum Call {
        Init(Size),
        Cell(Coord, CellState),
        Head(Coord, Direction),
        ClearHead(Coord),
    }

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder(Vec<Call>);

    impl Renderer for Recorder {
        fn init_grid(&mut self, size: Size) {
            self.0.push(Call::Init(size));
        }

        fn draw_cell(&mut self, pos: Coord, state: CellState) {
            self.0.push(Call::Cell(pos, state));
        }

        fn draw_head(&mut self, pos: Coord, direction: Direction) {
            self.0.push(Call::Head(pos, direction));
        }

        fn clear_head(&mut self, pos: Coord) {
            self.0.push(Call::ClearHead(pos));
        }
    }

    type TestSession = Session<MemoryStore, ChaCha12Rng, ManualClock>;

    fn session(width: u16, height: u16, store: MemoryStore) -> (TestSession, ManualClock) {
        let config = GameConfig {
            width,
            height,
            ..GameConfig::default()
        };
        let clock = ManualClock::new();
        let session = Session::new(
            config,
            store,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            clock.clone(),
        );
        (session, clock)
    }

    fn started(width: u16, height: u16) -> (TestSession, ManualClock, Recorder) {
        let (mut s, clock) = session(width, height, MemoryStore::default());
        let mut r = Recorder::default();
        s.start(&mut r);
        (s, clock, r)
    }

    /// Put the food at `pos` and bring the grid up to date with any changes
    /// the test has made to the snake
    fn set_food(s: &mut TestSession, pos: (i32, i32)) {
        s.put_food(Coord::from(pos));
    }

    fn coords(body: &[(i32, i32)]) -> Vec<Coord> {
        body.iter().copied().map(Coord::from).collect()
    }

    fn body(s: &TestSession) -> Vec<Coord> {
        s.snake().body().iter().copied().collect()
    }

    #[test]
    fn new_session_reads_high_score() {
        let (s, _) = session(10, 10, MemoryStore::with_score(12));
        assert_eq!(s.state().high_score, 12);
        assert!(!s.state().playing);
        assert_eq!(s.loop_state(), LoopState::Stopped);
    }

    #[test]
    fn start_draws_and_waits() {
        let (mut s, clock, r) = started(10, 8);
        assert!(s.state().playing);
        assert!(!s.state().paused);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.loop_state(), LoopState::WaitingForFirstInput);
        assert_eq!(s.until_next_step(), None);
        assert_eq!(body(&s), coords(&[(3, 3), (3, 2), (3, 1)]));
        let food = s.food().unwrap();
        assert!(!s.snake().contains(food));
        assert_eq!(r.0[0], Call::Init(Size::new(10, 8)));
        assert_eq!(r.0.len(), 1 + 80 + 1);
        assert!(r.0.contains(&Call::Cell(Coord::new(3, 1), CellState::Snake)));
        assert!(r.0.contains(&Call::Cell(food, CellState::Food)));
        assert_eq!(
            r.0.last(),
            Some(&Call::Head(Coord::new(3, 3), Direction::Right))
        );
        clock.advance(Duration::from_secs(5));
        let mut r = Recorder::default();
        assert!(!s.tick(&mut r));
        assert_eq!(body(&s), coords(&[(3, 3), (3, 2), (3, 1)]));
        assert!(r.0.is_empty());
    }

    #[test]
    fn first_move_cannot_be_left() {
        let (mut s, _, mut r) = started(10, 8);
        assert!(!s.turn(Direction::Left, &mut r));
        assert_eq!(s.loop_state(), LoopState::WaitingForFirstInput);
        assert_eq!(body(&s), coords(&[(3, 3), (3, 2), (3, 1)]));
    }

    #[test]
    fn first_turn_steps_immediately() {
        let (mut s, _, _) = started(10, 8);
        set_food(&mut s, (7, 9));
        let mut r = Recorder::default();
        assert!(s.turn(Direction::Down, &mut r));
        assert_eq!(s.loop_state(), LoopState::Running);
        assert_eq!(body(&s), coords(&[(4, 3), (3, 3), (3, 2)]));
        assert_eq!(
            r.0,
            [
                Call::ClearHead(Coord::new(3, 3)),
                Call::Cell(Coord::new(3, 1), CellState::Empty),
                Call::Cell(Coord::new(4, 3), CellState::Snake),
                Call::Head(Coord::new(4, 3), Direction::Down),
            ]
        );
        assert_eq!(s.until_next_step(), Some(TICK));
    }

    #[test]
    fn steps_follow_timer() {
        let (mut s, clock, mut r) = started(10, 8);
        set_food(&mut s, (7, 9));
        assert!(s.turn(Direction::Right, &mut r));
        assert_eq!(s.snake().head(), Coord::new(3, 4));
        clock.advance(Duration::from_millis(99));
        assert!(!s.tick(&mut r));
        assert_eq!(s.snake().head(), Coord::new(3, 4));
        clock.advance(Duration::from_millis(1));
        assert!(s.tick(&mut r));
        assert_eq!(s.snake().head(), Coord::new(3, 5));
        assert_eq!(s.until_next_step(), Some(TICK));
    }

    #[test]
    fn turn_replaces_pending_step() {
        let (mut s, clock, mut r) = started(10, 8);
        set_food(&mut s, (7, 9));
        assert!(s.turn(Direction::Right, &mut r));
        clock.advance(Duration::from_millis(50));
        assert!(s.turn(Direction::Down, &mut r));
        assert_eq!(body(&s), coords(&[(4, 4), (3, 4), (3, 3)]));
        // The old timer is gone; a fresh one starts from now.
        assert_eq!(s.until_next_step(), Some(TICK));
        clock.advance(Duration::from_millis(50));
        assert!(!s.tick(&mut r));
        clock.advance(Duration::from_millis(50));
        assert!(s.tick(&mut r));
        assert_eq!(s.snake().head(), Coord::new(5, 4));
        assert!(!s.tick(&mut r));
    }

    #[test]
    fn reversal_is_ignored() {
        let (mut s, _, mut r) = started(10, 8);
        set_food(&mut s, (7, 9));
        assert!(s.turn(Direction::Up, &mut r));
        let before = body(&s);
        assert!(!s.turn(Direction::Down, &mut r));
        assert!(!s.turn(Direction::Up, &mut r));
        assert_eq!(body(&s), before);
        assert_eq!(s.state().heading, Heading::Moving(Direction::Up));
    }

    #[test]
    fn eating_scores_and_speeds_up() {
        let (mut s, _, mut r) = started(10, 8);
        set_food(&mut s, (3, 4));
        assert!(s.turn(Direction::Right, &mut r));
        assert_eq!(body(&s), coords(&[(3, 4), (3, 3), (3, 2), (3, 1)]));
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().high_score, 1);
        assert_eq!(s.store.get(), Some(1));
        assert_eq!(s.state().speed, Speed::new(10.0 * 1.01));
        let food = s.food().unwrap();
        assert_ne!(food, Coord::new(3, 4));
        assert!(!s.snake().contains(food));
        assert!(s.until_next_step().unwrap() < TICK);
    }

    #[test]
    fn lower_score_keeps_high_score() {
        let (mut s, _) = session(10, 8, MemoryStore::with_score(5));
        let mut r = Recorder::default();
        s.start(&mut r);
        set_food(&mut s, (3, 4));
        assert!(s.turn(Direction::Right, &mut r));
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().high_score, 5);
        assert_eq!(s.store.get(), Some(5));
    }

    #[test]
    fn border_collision() {
        let (mut s, _, mut r) = started(10, 8);
        set_food(&mut s, (7, 9));
        for _ in 0..3 {
            assert!(s.turn(Direction::Up, &mut r));
            assert!(s.turn(Direction::Right, &mut r));
        }
        // Head is now at (0, 6); one more step up leaves the grid.
        assert_eq!(s.snake().head(), Coord::new(0, 6));
        assert!(s.turn(Direction::Up, &mut r));
        assert_eq!(s.outcome(), Some(Outcome::BorderCollision));
        assert!(!s.state().playing);
        assert_eq!(s.loop_state(), LoopState::Stopped);
        assert_eq!(s.until_next_step(), None);
        assert_eq!(s.snake().head(), Coord::new(-1, 6));
        assert_eq!(s.crash_site(), Some(Coord::new(0, 6)));
        assert!(!s.turn(Direction::Left, &mut r));
    }

    #[test]
    fn self_collision() {
        let (mut s, _, mut r) = started(10, 8);
        s.snake = Snake::new(coords(&[(3, 3), (3, 4), (2, 4), (2, 3), (2, 2)]));
        set_food(&mut s, (7, 9));
        s.state.heading = Heading::Moving(Direction::Left);
        s.scheduler.schedule(StepJob { tick: 9 }, TICK);
        assert!(s.turn(Direction::Up, &mut r));
        assert_eq!(s.outcome(), Some(Outcome::SelfCollision));
        assert_eq!(
            body(&s),
            coords(&[(3, 3), (3, 4), (2, 4), (2, 3), (2, 2)])
        );
        assert_eq!(s.crash_site(), Some(Coord::new(3, 3)));
        assert!(!s.state().playing);
    }

    #[test]
    fn win_when_grid_is_full() {
        let (mut s, _, mut r) = started(4, 4);
        // Snake covers all but one cell of the 4×4 grid, with the food in the
        // last free cell right in front of its head.
        s.snake = Snake::new(coords(&[
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 3),
            (1, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (2, 3),
            (3, 3),
            (3, 2),
            (3, 1),
            (3, 0),
        ]));
        set_food(&mut s, (0, 0));
        s.state.heading = Heading::Moving(Direction::Down);
        s.scheduler.schedule(StepJob { tick: 40 }, TICK);
        let mut r2 = Recorder::default();
        assert!(s.turn(Direction::Left, &mut r2));
        assert_eq!(s.outcome(), Some(Outcome::Won));
        assert_eq!(s.snake().len(), 16);
        assert_eq!(s.food(), None);
        assert_eq!(s.state().score, 1);
        assert_eq!(s.loop_state(), LoopState::Stopped);
        assert_eq!(s.crash_site(), None);
        assert_eq!(
            r2.0,
            [
                Call::ClearHead(Coord::new(0, 1)),
                Call::Cell(Coord::new(0, 0), CellState::Snake),
                Call::Head(Coord::new(0, 0), Direction::Left),
            ]
        );
        assert!(s.retry(&mut r));
    }

    #[test]
    fn pause_keeps_everything() {
        let (mut s, clock, mut r) = started(10, 8);
        set_food(&mut s, (7, 9));
        assert!(s.turn(Direction::Down, &mut r));
        let before = body(&s);
        let job = s.scheduler.job().copied();
        assert!(s.toggle_pause());
        assert!(s.state().paused);
        assert_eq!(s.loop_state(), LoopState::Paused);
        assert_eq!(s.until_next_step(), None);
        clock.advance(Duration::from_secs(10));
        assert!(!s.tick(&mut r));
        assert!(!s.turn(Direction::Left, &mut r));
        assert_eq!(body(&s), before);
        assert_eq!(s.food(), Some(Coord::new(7, 9)));
        assert_eq!(s.state().score, 0);
        assert!(s.toggle_pause());
        assert!(!s.state().paused);
        assert_eq!(s.scheduler.job().copied(), job);
        assert_eq!(s.until_next_step(), Some(TICK));
        clock.advance(TICK);
        assert!(s.tick(&mut r));
        assert_eq!(s.snake().head(), Coord::new(5, 3));
    }

    #[test]
    fn cannot_pause_before_moving() {
        let (mut s, _, _) = started(10, 8);
        assert!(!s.toggle_pause());
        assert!(!s.state().paused);
        assert_eq!(s.loop_state(), LoopState::WaitingForFirstInput);
    }

    #[test]
    fn retry_only_when_over() {
        let (mut s, _, mut r) = started(10, 8);
        assert!(!s.retry(&mut r));
        set_food(&mut s, (3, 4));
        assert!(s.turn(Direction::Right, &mut r));
        set_food(&mut s, (7, 9));
        for _ in 0..3 {
            assert!(s.turn(Direction::Up, &mut r));
            assert!(s.turn(Direction::Right, &mut r));
        }
        while s.state().playing {
            assert!(s.turn(Direction::Up, &mut r) || s.turn(Direction::Right, &mut r));
        }
        assert_eq!(s.outcome(), Some(Outcome::BorderCollision));
        assert_eq!(s.state().high_score, 1);
        assert!(s.retry(&mut r));
        assert!(s.state().playing);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().high_score, 1);
        assert_eq!(s.outcome(), None);
        assert_eq!(s.state().speed, Speed::new(10.0));
        assert_eq!(body(&s), coords(&[(3, 3), (3, 2), (3, 1)]));
    }

    #[test]
    fn at_most_one_pending_step() {
        let (mut s, clock, mut r) = started(20, 16);
        set_food(&mut s, (15, 19));
        let turns = [
            Direction::Down,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for d in turns {
            assert!(s.turn(d, &mut r));
            assert!(s.scheduler.is_pending());
            clock.advance(Duration::from_millis(30));
            assert!(!s.tick(&mut r));
        }
        clock.advance(TICK);
        assert!(s.tick(&mut r));
        assert!(!s.tick(&mut r));
    }

    #[test]
    fn speed_interval() {
        let mut speed = Speed::new(10.0);
        assert_eq!(speed.interval(), TICK);
        speed.accelerate(2.0);
        assert_eq!(speed.interval(), Duration::from_millis(50));
    }

    #[rstest]
    #[case(1e-20, Duration::from_secs(10))]
    #[case(0.0, Duration::from_secs(10))]
    #[case(-5.0, Duration::from_secs(10))]
    #[case(f64::NAN, Duration::from_secs(10))]
    #[case(1000.0, Duration::from_millis(1))]
    #[case(f64::INFINITY, Duration::ZERO)]
    #[case(1e300, Duration::ZERO)]
    fn speed_is_clamped(#[case] steps_per_sec: f64, #[case] interval: Duration) {
        assert_eq!(Speed::new(steps_per_sec).interval(), interval);
    }

    #[test]
    fn acceleration_has_no_ceiling_and_never_panics() {
        let mut speed = Speed::new(50.0);
        speed.accelerate(4.0);
        assert_eq!(speed.interval(), Duration::from_millis(5));
        for _ in 0..2000 {
            speed.accelerate(1e10);
        }
        assert_eq!(speed, Speed::new(f64::MAX));
        assert_eq!(speed.interval(), Duration::ZERO);
    }

    #[test]
    fn tiny_base_speed_steps_slowly() {
        let config = GameConfig {
            width: 10,
            height: 8,
            base_speed: 1e-20,
            ..GameConfig::default()
        };
        let clock = ManualClock::new();
        let mut s = Session::new(
            config,
            MemoryStore::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            clock.clone(),
        );
        let mut r = Recorder::default();
        s.start(&mut r);
        set_food(&mut s, (7, 9));
        assert!(s.turn(Direction::Down, &mut r));
        assert_eq!(s.until_next_step(), Some(Duration::from_secs(10)));
        clock.advance(Duration::from_secs(10));
        assert!(s.tick(&mut r));
    }
}
