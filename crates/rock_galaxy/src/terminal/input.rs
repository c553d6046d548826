//! Keyboard input from crossterm events
//!
//! A dedicated thread blocks on `event::read` and forwards events over a
//! channel, so polling never blocks the tick. A key counts as held while
//! its press or repeat events keep arriving within the hold window; on
//! terminals that report releases the key is dropped immediately.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sprite_engine::input::{InputSource, InputState, Keys};
use sprite_engine::StopHandle;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Map a terminal key to a game control
pub fn map_key(code: KeyCode) -> Option<Keys> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Keys::LEFT),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Keys::RIGHT),
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Keys::THRUST),
        KeyCode::Char(' ') => Some(Keys::FIRE),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Keys::SHIELD),
        KeyCode::Char('b' | 'B') => Some(Keys::TOGGLE_BOUNDS),
        KeyCode::Char('c' | 'C') => Some(Keys::TOGGLE_COLLISION),
        KeyCode::Enter => Some(Keys::CONFIRM),
        KeyCode::Esc => Some(Keys::ESCAPE),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q' | 'Q'))
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Held-key tracker fed by a background reader thread
pub struct TerminalInput {
    events: Receiver<Event>,
    last_seen: HashMap<Keys, u64>,
    hold_window: u64,
    tick: u64,
    // Pressed since the last poll, even if already released again
    tapped: Keys,
    previous: Keys,
    stop: StopHandle,
}

impl TerminalInput {
    /// Start the reader thread
    ///
    /// `hold_window` is in ticks. `q` and Ctrl-C trigger `stop`.
    pub fn spawn(stop: StopHandle, hold_window: u64) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx, stop, hold_window)
    }

    /// Track events arriving on an existing channel
    pub fn from_receiver(events: Receiver<Event>, stop: StopHandle, hold_window: u64) -> Self {
        Self {
            events,
            last_seen: HashMap::new(),
            hold_window,
            tick: 0,
            tapped: Keys::empty(),
            previous: Keys::empty(),
            stop,
        }
    }

    fn record(&mut self, key_event: KeyEvent) {
        let KeyEvent { code, kind, modifiers, .. } = key_event;
        if kind == KeyEventKind::Press && is_quit(code, modifiers) {
            log::info!("Quit requested from the keyboard");
            self.stop.stop();
            return;
        }
        let Some(key) = map_key(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.tapped |= key;
                self.last_seen.insert(key, self.tick);
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(key, self.tick);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputState {
        self.tick += 1;
        while let Ok(ev) = self.events.try_recv() {
            if let Event::Key(key_event) = ev {
                self.record(key_event);
            }
        }

        let (tick, window) = (self.tick, self.hold_window);
        self.last_seen.retain(|_, seen| tick.saturating_sub(*seen) <= window);
        let tapped = std::mem::take(&mut self.tapped);
        let held = self.last_seen.keys().fold(tapped, |acc, key| acc | *key);

        let state = InputState::from_transition(self.previous, held);
        self.previous = held;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use sprite_engine::{Engine, EngineConfig};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn input(window: u64) -> (mpsc::Sender<Event>, TerminalInput, Engine<u8>) {
        let engine: Engine<u8> = Engine::new(EngineConfig::default());
        let (tx, rx) = mpsc::channel();
        (tx, TerminalInput::from_receiver(rx, engine.stop_handle(), window), engine)
    }

    #[test]
    fn test_press_expires_after_window() {
        let (tx, mut input, _engine) = input(2);
        tx.send(key(KeyCode::Char(' '), KeyEventKind::Press)).unwrap();

        assert!(input.poll().was_pressed(Keys::FIRE));
        assert!(input.poll().is_held(Keys::FIRE));
        assert!(input.poll().is_held(Keys::FIRE));
        assert!(input.poll().was_released(Keys::FIRE));
    }

    #[test]
    fn test_release_event_drops_key_at_once() {
        let (tx, mut input, _engine) = input(10);
        tx.send(key(KeyCode::Left, KeyEventKind::Press)).unwrap();
        assert!(input.poll().is_held(Keys::LEFT));

        tx.send(key(KeyCode::Left, KeyEventKind::Release)).unwrap();
        assert!(input.poll().was_released(Keys::LEFT));
    }

    #[test]
    fn test_tap_within_one_poll_is_seen() {
        let (tx, mut input, _engine) = input(10);
        tx.send(key(KeyCode::Enter, KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Enter, KeyEventKind::Release)).unwrap();

        assert!(input.poll().was_pressed(Keys::CONFIRM));
        assert!(input.poll().was_released(Keys::CONFIRM));
        assert_eq!(input.poll(), InputState::default());
    }

    #[test]
    fn test_repeat_keeps_key_held() {
        let (tx, mut input, _engine) = input(1);
        tx.send(key(KeyCode::Up, KeyEventKind::Press)).unwrap();
        input.poll();
        for _ in 0..5 {
            tx.send(key(KeyCode::Up, KeyEventKind::Repeat)).unwrap();
            let state = input.poll();
            assert!(state.is_held(Keys::THRUST) && !state.was_pressed(Keys::THRUST));
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Enter), Some(Keys::CONFIRM));
        assert_eq!(map_key(KeyCode::Char('b')), Some(Keys::TOGGLE_BOUNDS));
        assert_eq!(map_key(KeyCode::Tab), None);
        assert!(is_quit(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_quit(KeyCode::Char('c'), KeyModifiers::NONE));
    }
}
