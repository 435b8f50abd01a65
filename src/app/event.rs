//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The same
//! channel carries frame ticks and notifications from the engine and the
//! asset decoder.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::core::error::Error;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Animation frame.
    Tick,
    /// The mounted carousel's active index changed.
    IndexChanged(usize),
    /// A background decode finished.
    AssetLoaded {
        path: PathBuf,
        result: Result<Arc<image::RgbaImage>, Error>,
    },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel, interleaved with a `Tick` every `tick_rate`.
/// The sender half is returned too so other producers can share the channel.
pub fn spawn_event_reader(
    tick_rate: Duration,
) -> (EventSender, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let reader_tx = tx.clone();

    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            // Poll only until the next tick is due so input floods (mouse
            // motion) never starve the animation.
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            let has_event = event::poll(timeout).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if reader_tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }
            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                if reader_tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });

    (tx, rx)
}
