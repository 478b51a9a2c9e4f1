use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return the area of the terminal in which the game is drawn, centered in
/// `buffer_area`
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered inside `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}
