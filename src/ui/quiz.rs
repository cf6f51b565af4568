use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::QuizStepViewModel;
use crate::screen::Screen;

pub fn render(frame: &mut Frame, area: Rect, step: &QuizStepViewModel, screen: &Screen) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], &step.position_label, screen.is_loading());
    render_poster(frame, chunks[1], &step.image, screen.highlight());
    render_question_text(frame, chunks[2], &step.question_text);
    render_controls(frame, chunks[3], screen.accepts_input());
}

fn render_progress(frame: &mut Frame, area: Rect, label: &str, loading: bool) {
    let text = if loading {
        format!("loading...  {}", label)
    } else {
        label.to_string()
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// Posters aren't decoded in the terminal; the panel stands in for the image
/// and its border shows whether the last answer was right.
fn render_poster(frame: &mut Frame, area: Rect, image: &[u8], highlight: Option<bool>) {
    let border_color = match highlight {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::DarkGray,
    };

    let caption = if image.is_empty() {
        "no poster".to_string()
    } else {
        format!("poster · {} KiB", image.len().div_ceil(1024))
    };

    let inner_height = area.height.saturating_sub(2);
    let mut lines: Vec<Line> = vec![Line::from(""); (inner_height / 2) as usize];
    lines.push(Line::from(Span::styled(
        caption,
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .border_type(if highlight.is_some() {
                BorderType::Thick
            } else {
                BorderType::Rounded
            }),
    );
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, enabled: bool) {
    let color = if enabled { Color::Gray } else { Color::DarkGray };
    let widget = Paragraph::new("n no  ·  y yes  ·  q quit")
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}
