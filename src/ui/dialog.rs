use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::models::{AlertAction, AlertModel};

const DIALOG_WIDTH: u16 = 52;

pub fn render(frame: &mut Frame, area: Rect, alert: &AlertModel) {
    let message_lines = alert.message.lines().count().max(1) as u16;
    let popup = centered(area, DIALOG_WIDTH, message_lines + 6);

    let title_color = match alert.action {
        AlertAction::PlayAgain => Color::Cyan,
        AlertAction::Retry => Color::Red,
    };

    let mut content: Vec<Line> = alert
        .message
        .lines()
        .map(|line| Line::from(line.fg(Color::Gray)))
        .collect();
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("[enter] ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            alert.button_text.as_str(),
            Style::default().fg(Color::Green).bold(),
        ),
    ]));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(format!(" {} ", alert.title))
                .title_style(Style::default().fg(title_color).bold())
                .padding(Padding::uniform(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
