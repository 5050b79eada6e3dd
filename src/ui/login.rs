use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::{centered_rect, spinner};
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use crate::app::{LoginField, LoginForm};

const LOGO: &str = "S P H E R A G";

pub(super) fn render_login_screen(frame: &mut Frame, area: Rect, form: &LoginForm, tick: u64) {
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, area);

    let dialog = centered_rect(48, 14, area.inner(Margin::new(2, 1)));
    let [logo, subtitle, _, username, password, _, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(dialog);

    frame.render_widget(
        Paragraph::new(LOGO)
            .style(Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        logo,
    );
    frame.render_widget(
        Paragraph::new("Sign in to continue")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        subtitle,
    );

    let buf = frame.buffer_mut();
    form.username.render_with_title(
        username,
        buf,
        "Username",
        form.focus == LoginField::Username,
    );
    form.password.render_with_title(
        password,
        buf,
        "Password",
        form.focus == LoginField::Password,
    );

    let status_line = if form.submitting {
        Line::from(Span::styled(
            format!("{} Signing in...", spinner(tick)),
            Style::default().fg(COLOR_HEADER),
        ))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(COLOR_ERROR),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(
        Paragraph::new(status_line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        status,
    );
}
