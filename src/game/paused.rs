use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying the pop-up shown while the game is paused
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Paused;

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 4;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Paused {
    /*
     * ┌───── PAUSED ─────┐
     * │ Resume (p / Esc) │
     * │ Quit (q)         │
     * └──────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let lines = [
            Line::from_iter([
                Span::raw("Resume ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(" / "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Line::from_iter([
                Span::raw("Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
