use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    session::{Direction, SessionState},
    ui::card::{slide, Card, NextCardEdge, CARD_HEIGHT},
};

/// A UI Screen boundary: responsible for rendering the body below the header
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Shown when the catalog dealt no cards
pub struct EmptyScreen;

impl Screen for EmptyScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        let message = Paragraph::new(Span::styled(
            "Loading amazing images...",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);

        message.render(vertically_centered(area, 1), buf);
    }
}

/// The card stack while cards remain
pub struct BrowsingScreen;

impl Screen for BrowsingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.session();
        let Some(current) = session.current_item() else {
            return;
        };

        let width = Card::preferred_width(current).min(area.width);
        let height = CARD_HEIGHT.min(area.height.saturating_sub(1));
        let card_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + area.height.saturating_sub(height + 1) / 2,
            width,
            height,
        );

        if let Some(next) = session.peek_next() {
            let edge = Rect::new(
                card_area.x + 1,
                card_area.y + 1,
                card_area.width.saturating_sub(2),
                card_area.height,
            )
            .intersection(area);
            NextCardEdge { record: next }.render(edge, buf);
        }

        let verdict = session.pending_direction();
        let dx = match (verdict, app.transition_progress()) {
            (Some(direction), Some(progress)) => {
                let travel = (progress * f64::from(area.width)) as i32;
                match direction {
                    Direction::Like => travel,
                    Direction::Pass => -travel,
                }
            }
            _ => 0,
        };

        if let Some(visible) = slide(card_area, dx, area) {
            Card {
                record: current,
                verdict,
            }
            .render(visible, buf);
        }
    }
}

/// Tally shown after the last card
pub struct CompleteScreen;

impl Screen for CompleteScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.session();
        let progress = session.progress();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled("♥", bold.fg(Color::Magenta))),
            Line::from(""),
            Line::from(Span::styled("All Done!", bold)),
            Line::from(format!(
                "You've swiped through all {} images",
                progress.total
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{}", progress.liked), bold.fg(Color::Green)),
                Span::raw(" Liked    "),
                Span::styled(format!("{}", progress.passed), bold.fg(Color::Red)),
                Span::raw(" Passed"),
            ]),
            Line::from(""),
        ];

        let liked = session.liked_records();
        if !liked.is_empty() {
            lines.push(Line::from(Span::styled(
                "Liked",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
            lines.extend(liked.iter().map(|r| {
                Line::from(Span::styled(
                    format!("{} by {}", r.title, r.photographer),
                    Style::default().fg(Color::Green),
                ))
            }));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "(r) start over / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        )));

        let height = lines.len() as u16;
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(vertically_centered(area, height), buf);
    }
}

fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect::new(
        area.x,
        area.y + (area.height - height) / 2,
        area.width,
        height,
    )
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(app: &App) -> Box<dyn Screen> {
    let session = app.session();
    if session.is_empty() {
        return Box::new(EmptyScreen);
    }
    match session.state() {
        SessionState::Browsing => Box::new(BrowsingScreen),
        SessionState::Complete => Box::new(CompleteScreen),
    }
}
