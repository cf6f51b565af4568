mod dialog;
mod loading;
mod quiz;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let screen = app.screen();
    match screen.step() {
        Some(step) => quiz::render(frame, area, step, screen),
        None => loading::render(frame, area),
    }

    if let Some(alert) = screen.alert() {
        dialog::render(frame, area, alert);
    }
}
