use std::{
    io::stdin,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM},
    iterator::Signals,
};
use termion::{event::Key, input::TermRead};

use crate::{Grid, Result, Size};

/// Signals that end the session instead of killing the process outright.
pub const TERMINATING_SIGNALS: [i32; 4] = [SIGTERM, SIGHUP, SIGINT, SIGQUIT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Timeout,
    /// the input stream ended, nothing more will arrive.
    Closed,
    /// a terminating signal was caught.
    Signal(i32),
}

/// Render sink and display geometry.
pub trait Screen {
    /// area left for the grid once the header row is taken.
    fn grid_size(&self) -> Result<Size>;

    /// full redraw of a centered text block, the first line is the title.
    fn show_menu(&mut self, lines: &[String]) -> Result<()>;

    /// full redraw of the grid under a one line header.
    fn show_grid(&mut self, grid: &Grid, header: &str) -> Result<()>;
}

/// Source of key events, blocking at most `timeout` when given.
pub trait Keys {
    fn next_event(&mut self, timeout: Option<Duration>) -> Event;
}

/// Keys read from stdin and caught signals, both delivered on one channel.
pub struct KeyReader {
    receiver: mpsc::Receiver<Event>,
}

impl KeyReader {
    pub fn spawn() -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let signals = Signals::new(TERMINATING_SIGNALS)?;
        let signal_sender = sender.clone();
        thread::spawn(move || signal_loop(signals, signal_sender));
        // blocked on stdin for the rest of the process, never joined
        thread::spawn(move || input_loop(sender));
        Ok(Self { receiver })
    }
}

fn input_loop(sender: mpsc::Sender<Event>) {
    for key in stdin().keys() {
        match key {
            Ok(key) => {
                if sender.send(Event::Key(key)).is_err() {
                    return;
                }
            }
            Err(error) => {
                tracing::error!(%error, "failed to read key");
                break;
            }
        }
    }
    tracing::debug!("input closed");
    // the signal thread keeps the channel open, so say it explicitly
    let _ = sender.send(Event::Closed);
}

fn signal_loop(mut signals: Signals, sender: mpsc::Sender<Event>) {
    for signal in signals.forever() {
        tracing::info!(signal, "caught signal");
        if sender.send(Event::Signal(signal)).is_err() {
            break;
        }
    }
}

impl Keys for KeyReader {
    fn next_event(&mut self, timeout: Option<Duration>) -> Event {
        match timeout {
            Some(timeout) => match self.receiver.recv_timeout(timeout) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => Event::Timeout,
                Err(RecvTimeoutError::Disconnected) => Event::Closed,
            },
            None => self.receiver.recv().unwrap_or(Event::Closed),
        }
    }
}

pub use canvas::{restore_screen, Canvas};
mod canvas;

#[test]
fn test_key_reader_channel() {
    let (sender, receiver) = mpsc::channel();
    let mut reader = KeyReader { receiver };
    sender.send(Event::Key(Key::Char(' '))).unwrap();
    assert_eq!(
        reader.next_event(Some(Duration::from_millis(5))),
        Event::Key(Key::Char(' '))
    );
    assert_eq!(reader.next_event(Some(Duration::from_millis(5))), Event::Timeout);
    drop(sender);
    assert_eq!(reader.next_event(Some(Duration::from_millis(5))), Event::Closed);
    assert_eq!(reader.next_event(None), Event::Closed);
}

#[test]
fn test_signal_reaches_reader() {
    use signal_hook::{consts::signal::SIGUSR1, low_level::raise};

    let (sender, receiver) = mpsc::channel();
    let mut reader = KeyReader { receiver };
    let signals = Signals::new([SIGUSR1]).unwrap();
    thread::spawn(move || signal_loop(signals, sender));

    raise(SIGUSR1).unwrap();
    assert_eq!(
        reader.next_event(Some(Duration::from_secs(5))),
        Event::Signal(SIGUSR1)
    );
}
