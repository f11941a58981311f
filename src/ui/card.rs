use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{deck::ImageRecord, session::Direction};

pub const MIN_CARD_WIDTH: u16 = 30;
pub const MAX_CARD_WIDTH: u16 = 56;
pub const CARD_HEIGHT: u16 = 11;

/// The face-up card. `verdict` is set while the card is swiping away.
pub struct Card<'a> {
    pub record: &'a ImageRecord,
    pub verdict: Option<Direction>,
}

impl Card<'_> {
    /// Width that fits the title and credit line, within the card bounds
    pub fn preferred_width(record: &ImageRecord) -> u16 {
        let credit = format!("by {}", record.photographer);
        let widest = record.title.width().max(credit.width()) as u16;
        (widest + 8).clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH)
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.verdict {
            Some(Direction::Like) => Style::default().fg(Color::Green),
            Some(Direction::Pass) => Style::default().fg(Color::Red),
            None => Style::default().fg(Color::White),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.record.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("by {}", self.record.photographer),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];

        match self.verdict {
            Some(direction) => lines.push(verdict_badge(direction)),
            None => lines.push(Line::from(Span::styled(
                self.record.url.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ))),
        }

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

fn verdict_badge(direction: Direction) -> Line<'static> {
    let (text, color) = match direction {
        Direction::Like => (" ♥ LIKE ", Color::Green),
        Direction::Pass => (" ✕ PASS ", Color::Red),
    };
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    ))
}

/// The card waiting underneath: only its lower edge peeks out
pub struct NextCardEdge<'a> {
    pub record: &'a ImageRecord,
}

impl Widget for NextCardEdge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(
                Line::from(Span::styled(
                    format!(" up next: {} ", self.record.title),
                    Style::default().add_modifier(Modifier::DIM),
                ))
                .centered(),
            )
            .render(area, buf);
    }
}

/// Slide `rect` sideways by `dx` columns, clipped to `bounds`.
/// Returns `None` once the card has left the visible area.
pub fn slide(rect: Rect, dx: i32, bounds: Rect) -> Option<Rect> {
    let left = (i32::from(rect.x) + dx).max(i32::from(bounds.x));
    let right = (i32::from(rect.right()) + dx).min(i32::from(bounds.right()));
    if right <= left {
        return None;
    }
    Some(Rect::new(
        left as u16,
        rect.y,
        (right - left) as u16,
        rect.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ImageRecord {
        ImageRecord {
            id: 0,
            url: "https://example.com/a.jpg".to_string(),
            title: title.to_string(),
            photographer: "Jane Smith".to_string(),
        }
    }

    fn rendered(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_slide_without_offset_is_identity() {
        let bounds = Rect::new(0, 0, 80, 20);
        let card = Rect::new(20, 2, 40, 10);
        assert_eq!(slide(card, 0, bounds), Some(card));
    }

    #[test]
    fn test_slide_clips_at_right_edge() {
        let bounds = Rect::new(0, 0, 80, 20);
        let card = Rect::new(20, 2, 40, 10);
        assert_eq!(slide(card, 30, bounds), Some(Rect::new(50, 2, 30, 10)));
    }

    #[test]
    fn test_slide_clips_at_left_edge() {
        let bounds = Rect::new(5, 0, 75, 20);
        let card = Rect::new(20, 2, 40, 10);
        assert_eq!(slide(card, -25, bounds), Some(Rect::new(5, 2, 30, 10)));
    }

    #[test]
    fn test_slide_fully_offscreen() {
        let bounds = Rect::new(0, 0, 80, 20);
        let card = Rect::new(20, 2, 40, 10);
        assert_eq!(slide(card, 80, bounds), None);
        assert_eq!(slide(card, -60, bounds), None);
    }

    #[test]
    fn test_preferred_width_bounds() {
        assert_eq!(Card::preferred_width(&record("x")), MIN_CARD_WIDTH);
        let long = "a".repeat(200);
        assert_eq!(Card::preferred_width(&record(&long)), MAX_CARD_WIDTH);
    }

    #[test]
    fn test_card_shows_title_and_credit() {
        let r = record("Forest Path");
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        Card {
            record: &r,
            verdict: None,
        }
        .render(area, &mut buf);

        let text = rendered(&buf);
        assert!(text.contains("Forest Path"));
        assert!(text.contains("by Jane Smith"));
        assert!(!text.contains("LIKE"));
    }

    #[test]
    fn test_card_shows_verdict_badge() {
        let r = record("Forest Path");
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);

        let mut liked = Buffer::empty(area);
        Card {
            record: &r,
            verdict: Some(Direction::Like),
        }
        .render(area, &mut liked);
        assert!(rendered(&liked).contains("LIKE"));

        let mut passed = Buffer::empty(area);
        Card {
            record: &r,
            verdict: Some(Direction::Pass),
        }
        .render(area, &mut passed);
        assert!(rendered(&passed).contains("PASS"));
    }
}
