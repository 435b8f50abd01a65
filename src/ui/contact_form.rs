//! Contact section: three fields, a send button and the acknowledgment.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::core::contact::{ContactForm, Field};

const FORM_WIDTH: u16 = 56;

/// Clickable regions of the form.
#[derive(Debug, Clone, Default)]
pub struct ContactHitZones {
    pub fields: Vec<(Field, Rect)>,
    pub submit: Option<Rect>,
}

pub struct ContactFormWidget<'a> {
    pub form: &'a ContactForm,
}

impl<'a> ContactFormWidget<'a> {
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> ContactHitZones {
        buf.set_style(area, Theme::backdrop_style());
        let width = FORM_WIDTH.min(area.width);
        let x = area.x + (area.width - width) / 2;
        let mut y = area.y + 1;
        let bottom = area.y + area.height;
        let mut zones = ContactHitZones::default();

        let title = Line::from(Span::styled("GET IN TOUCH", Theme::headline_style(1.0)));
        buf.set_line(x, area.y, &title, width);

        if let Some(ack) = self.form.acknowledgment() {
            let msg = format!(
                "✓ Message sent at {}. Thanks!",
                ack.sent_at.format("%H:%M:%S")
            );
            let mid = area.y + area.height / 2;
            buf.set_line(x, mid, &Line::from(Span::styled(msg, Theme::success_style())), width);
            return zones;
        }

        for field in Field::ALL {
            let rows: u16 = if field == Field::Message { 6 } else { 3 };
            if y + rows > bottom {
                break;
            }
            let rect = Rect::new(x, y, width, rows);
            let focused = self.form.focus() == field;
            let block = Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::input_style(focused));
            let mut value = self.form.value(field).to_string();
            if focused {
                value.push('▏');
            }
            Paragraph::new(value)
                .wrap(Wrap { trim: false })
                .block(block)
                .render(rect, buf);
            zones.fields.push((field, rect));
            y += rows;
        }

        if y < bottom {
            let label = " SEND ";
            let submit = Rect::new(x, y, label.len() as u16, 1);
            buf.set_string(
                submit.x,
                submit.y,
                label,
                Style::default()
                    .fg(Theme::shade(Theme::BACKDROP, 1.0))
                    .bg(Theme::shade(Theme::ACCENT, 1.0))
                    .add_modifier(Modifier::BOLD),
            );
            zones.submit = Some(submit);

            if let Some(err) = self.form.last_error() {
                let offset = label.len() as u16 + 2;
                buf.set_string(x + offset, y, err.message(), Theme::error_style());
            }
        }
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn fields_and_submit_get_hit_zones() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let form = ContactForm::new();
        let zones = ContactFormWidget { form: &form }.render_and_hit(area, &mut buf);
        assert_eq!(zones.fields.len(), 3);
        assert_eq!(zones.fields[2].1.height, 6);
        assert_eq!(zones.submit.map(|r| r.y), Some(13));
    }

    #[test]
    fn rejection_and_acknowledgment_are_shown() {
        let area = Rect::new(0, 0, 60, 20);
        let mut form = ContactForm::new();
        assert!(form.submit(Instant::now()).is_err());
        let mut buf = Buffer::empty(area);
        ContactFormWidget { form: &form }.render_and_hit(area, &mut buf);
        assert!(row(&buf, 13).contains("Please enter your name"));

        form.name = "Ada".into();
        form.email = "ada@example.org".into();
        form.message = "Hello".into();
        assert!(form.submit(Instant::now()).is_ok());
        let mut buf = Buffer::empty(area);
        let zones = ContactFormWidget { form: &form }.render_and_hit(area, &mut buf);
        assert!(zones.fields.is_empty());
        assert!(row(&buf, 10).contains("Message sent"));
    }
}
