//! Loading placeholder shown between tearing down one view and rendering the next.

use crate::dom::Container;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

pub const LOADING_TEXT: &str = "Loading...";

/// Replace the container's content with the loading placeholder.
pub fn display_loader(container: &mut Container) {
    container.clear();
    container.push_line(Line::styled(
        LOADING_TEXT,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ));
}

/// Whether the container currently shows only the placeholder.
pub fn is_loading(container: &Container) -> bool {
    container.title().is_none() && container.lines().len() == 1 && container.text() == LOADING_TEXT
}
