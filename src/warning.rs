use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up telling the user about an error that did not stop the game, such
/// as a high score file that could not be read or written
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    /// The wrapped text, at most `MAX_LINES` long
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Handle a command.  Returns `Some` once the user is done with the
    /// warning.
    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter => Some(WarningOutcome::Dismissed),
            Command::Quit | Command::Q => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(first) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
            };
        };
        let causes = msgs.collect::<Vec<_>>();
        let mut lines = wrap(&first, textwrap::Options::new(usize::from(Warning::TEXT_WIDTH)));
        match causes.as_slice() {
            [] => (),
            [cause] => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(wrap(cause, opts));
            }
            causes => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, cause) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    lines.extend(wrap(cause, opts));
                }
            }
        }
        let max_lines = usize::from(Warning::MAX_LINES);
        if lines.len() > max_lines {
            lines.truncate(max_lines - 1);
            lines.push(String::from("…"));
        }
        Warning { lines }
    }
}

fn wrap(s: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(s, opts.break_words(true))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Text, a blank line, and the button, inside a border
        let height = u16::try_from(self.lines.len())
            .unwrap_or(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let mut rows = inner.rows();
        for (line, row) in self.lines.iter().zip(rows.by_ref()) {
            Line::raw(line.as_str()).render(row, buf);
        }
        if let Some(ok_row) = rows.last() {
            Line::from("[OK]").centered().render(ok_row, buf);
        }
    }
}
