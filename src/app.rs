use crate::game::Game;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    state: Screen,
}

impl App {
    pub(crate) fn new(game: Game) -> App {
        App {
            state: Screen::Game(Box::new(game)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.state {
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.state {
            Screen::Game(ref mut game) => {
                if let Some(state) = game.process_input()? {
                    self.state = state;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.state, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Game(Box<Game>),
    Quit,
}
