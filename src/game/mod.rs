mod board;
mod direction;
mod food;
mod grid;
mod paused;
mod scheduler;
mod session;
mod snake;
pub(crate) use self::scheduler::SystemClock;
pub(crate) use self::session::Session;
use self::board::BoardView;
use self::direction::Direction;
use self::paused::Paused;
use self::scheduler::{Clock, LoopState};
use self::session::Outcome;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscore::{AnyStore, ScoreStore};
use crate::util::{center_rect, get_display_area};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Size},
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The game screen: a [`Session`] together with what it has drawn and any
/// warning waiting to be acknowledged
#[derive(Debug)]
pub(crate) struct Game<S = AnyStore, R = rand::rngs::ThreadRng, C = SystemClock> {
    session: Session<S, R, C>,
    board: BoardView,
    warning: Option<Warning>,
    /// The session was paused in order to show `warning` and should carry on
    /// once it is dismissed
    resume_after_warning: bool,
}

impl<S: ScoreStore, R: Rng, C: Clock> Game<S, R, C> {
    /// Start `session` and show `warning` on top of it, if any
    pub(crate) fn new(mut session: Session<S, R, C>, warning: Option<Warning>) -> Self {
        let mut board = BoardView::new();
        session.start(&mut board);
        Game {
            session,
            board,
            warning,
            resume_after_warning: false,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if let Some(wait) = self.session.until_next_step() {
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?))
    }

    fn advance(&mut self) {
        if self.session.tick(&mut self.board) {
            self.after_step();
        }
    }

    fn turn(&mut self, direction: Direction) {
        if self.session.turn(direction, &mut self.board) {
            self.after_step();
        }
    }

    fn after_step(&mut self) {
        self.board.set_crash(self.session.crash_site());
        if let Some(e) = self.session.take_save_error() {
            self.resume_after_warning = self.session.pause();
            self.warning = Some(Warning::from(e));
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(ref warning) = self.warning {
            let cmd = Command::from_key_event(event.as_key_press_event()?)?;
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => {
                    self.warning = None;
                    if std::mem::take(&mut self.resume_after_warning) {
                        self.session.resume();
                    }
                }
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        if event == Event::FocusLost {
            self.session.pause();
            return None;
        }
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::Up => self.turn(Direction::Up),
            Command::Down => self.turn(Direction::Down),
            Command::Left => self.turn(Direction::Left),
            Command::Right => self.turn(Direction::Right),
            Command::Pause => {
                self.session.toggle_pause();
            }
            Command::Retry | Command::Enter => {
                self.session.retry(&mut self.board);
            }
        }
        None
    }
}

impl<S, R, C> Game<S, R, C> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

impl<S, R, C> Widget for &Game<S, R, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let state = self.session.state();
        Line::styled(
            format!(
                " Score: {}  High Score: {}",
                state.score, state.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        self.board.render(board_area, buf);

        match self.session.outcome() {
            None if self.session.loop_state() == LoopState::WaitingForFirstInput => {
                Span::from(" Press a direction key to start").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            None => (),
            Some(outcome) => {
                if outcome == Outcome::Won {
                    Span::from(" — YOU WIN! —").render(msg1_area, buf);
                } else {
                    Span::from(" — GAME OVER —").render(msg1_area, buf);
                }
                Line::from_iter([
                    Span::raw(" Retry ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }

        if state.paused {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            Paused.render(pause_area, buf);
        }
        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}
