pub mod card;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{app::App, session::Progress};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let screen = screen::current_screen(self);

        // Nothing to browse: the whole area is the loading message
        if session.is_empty() {
            screen.render(self, area, buf);
            return;
        }

        let browsing = !session.is_complete();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(0),    // cards / summary
                Constraint::Length(if browsing { 1 } else { 0 }), // tally
                Constraint::Length(if browsing { 1 } else { 0 }), // legend
            ])
            .split(area);

        render_header(session.progress(), chunks[0], buf);
        screen.render(self, chunks[1], buf);

        if browsing {
            render_tally(session.progress(), chunks[2], buf);
            render_legend(session.is_busy(), chunks[3], buf);
        }
    }
}

/// 1-based position of the card on screen, never past the deck size
pub fn display_position(progress: Progress) -> usize {
    (progress.cursor + 1).min(progress.total)
}

fn render_header(progress: Progress, area: Rect, buf: &mut Buffer) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "♥ ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("SwipeDeck", Style::default().add_modifier(Modifier::BOLD)),
    ]));
    title.render(area, buf);

    let counter = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} / {}", display_position(progress), progress.total),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled("   (r)eset", Style::default().add_modifier(Modifier::ITALIC)),
    ]))
    .alignment(Alignment::Right);
    counter.render(area, buf);
}

fn render_tally(progress: Progress, area: Rect, buf: &mut Buffer) {
    let tally = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::raw(format!("{} liked", progress.liked)),
        Span::raw("      "),
        Span::styled("● ", Style::default().fg(Color::Red)),
        Span::raw(format!("{} passed", progress.passed)),
    ]))
    .alignment(Alignment::Center);
    tally.render(area, buf);
}

fn render_legend(busy: bool, area: Rect, buf: &mut Buffer) {
    let mut style = Style::default().add_modifier(Modifier::ITALIC);
    if busy {
        style = style.add_modifier(Modifier::DIM);
    }
    Paragraph::new(Span::styled(
        "(←) pass   (→) like   (esc)ape",
        style,
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}
