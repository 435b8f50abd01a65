//! Contact form model.  Nothing is delivered anywhere: a valid submit shows
//! an acknowledgment for [`ACK_DURATION`] and then clears the fields.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

pub const ACK_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "NAME",
            Field::Email => "EMAIL",
            Field::Message => "MESSAGE",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

/// Why a submit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingName,
    InvalidEmail,
    MissingMessage,
    /// A previous submission is still being acknowledged.
    Busy,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::MissingName => "Please enter your name",
            Rejection::InvalidEmail => "Please enter a valid email",
            Rejection::MissingMessage => "Please write a message",
            Rejection::Busy => "Already sent",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Acknowledgment {
    pub shown_at: Instant,
    pub sent_at: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    focus: Field,
    ack: Option<Acknowledgment>,
    last_error: Option<Rejection>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Typing is ignored while the acknowledgment is showing.
    pub fn insert_char(&mut self, c: char) {
        if self.ack.is_some() {
            return;
        }
        if c == '\n' && self.focus != Field::Message {
            return;
        }
        self.last_error = None;
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        if self.ack.is_some() {
            return;
        }
        self.focused_mut().pop();
    }

    pub fn acknowledgment(&self) -> Option<&Acknowledgment> {
        self.ack.as_ref()
    }

    pub fn last_error(&self) -> Option<Rejection> {
        self.last_error
    }

    fn validate(&self) -> Result<(), Rejection> {
        if self.ack.is_some() {
            return Err(Rejection::Busy);
        }
        if self.name.trim().is_empty() {
            return Err(Rejection::MissingName);
        }
        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(user, host)| !user.is_empty() && !host.is_empty());
        if !valid_email {
            return Err(Rejection::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(Rejection::MissingMessage);
        }
        Ok(())
    }

    pub fn submit(&mut self, now: Instant) -> Result<(), Rejection> {
        if let Err(rejection) = self.validate() {
            self.last_error = Some(rejection);
            // Focus the offending field.
            match rejection {
                Rejection::MissingName => self.focus = Field::Name,
                Rejection::InvalidEmail => self.focus = Field::Email,
                Rejection::MissingMessage => self.focus = Field::Message,
                Rejection::Busy => {}
            }
            return Err(rejection);
        }
        tracing::info!("contact form submitted by {}", self.name.trim());
        self.last_error = None;
        self.ack = Some(Acknowledgment {
            shown_at: now,
            sent_at: Local::now(),
        });
        Ok(())
    }

    /// Clears everything once the acknowledgment has been up long enough.
    /// Returns `true` when the form was reset.
    pub fn update(&mut self, now: Instant) -> bool {
        let expired = self
            .ack
            .as_ref()
            .is_some_and(|ack| now.saturating_duration_since(ack.shown_at) >= ACK_DURATION);
        if expired {
            *self = Self::default();
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.name = "Ada".into();
        form.email = "ada@example.org".into();
        form.message = "Hello".into();
        form
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut form = ContactForm::new();
        assert_eq!(form.focus(), Field::Name);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), Field::Message);
        form.focus_next();
        assert_eq!(form.focus(), Field::Name);
        form.focus_prev();
        assert_eq!(form.focus(), Field::Message);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = ContactForm::new();
        for c in "Bo".chars() {
            form.insert_char(c);
        }
        form.insert_char('\n');
        form.focus_next();
        form.insert_char('x');
        form.backspace();
        assert_eq!(form.name, "Bo");
        assert_eq!(form.email, "");
    }

    #[test]
    fn rejects_incomplete_forms() {
        let now = Instant::now();

        let mut form = filled();
        form.name = "  ".into();
        assert_eq!(form.submit(now), Err(Rejection::MissingName));

        let mut form = filled();
        form.email = "nobody".into();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.submit(now), Err(Rejection::InvalidEmail));
        assert_eq!(form.focus(), Field::Email);
        assert_eq!(form.last_error(), Some(Rejection::InvalidEmail));

        let mut form = filled();
        form.message.clear();
        assert_eq!(form.submit(now), Err(Rejection::MissingMessage));
        assert!(form.acknowledgment().is_none());
    }

    #[test]
    fn acknowledgment_clears_after_three_seconds() {
        let t0 = Instant::now();
        let mut form = filled();
        assert_eq!(form.submit(t0), Ok(()));
        assert!(form.acknowledgment().is_some());
        assert_eq!(form.submit(t0), Err(Rejection::Busy));

        form.insert_char('!');
        assert_eq!(form.name, "Ada");

        assert!(!form.update(t0 + Duration::from_millis(2999)));
        assert!(form.acknowledgment().is_some());

        assert!(form.update(t0 + ACK_DURATION));
        assert!(form.acknowledgment().is_none());
        assert!(form.name.is_empty() && form.email.is_empty() && form.message.is_empty());
    }
}
