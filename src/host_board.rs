//! A scripted, instantaneous [`Board`](crate::hardware::Board) for running the game on the host.
//!
//! `HostBoard` keeps a virtual clock that only advances through its delays, replays
//! scripted joystick samples and button presses, and records everything the game does
//! as a list of [`Event`]s for tests to inspect.
//!
//! # Scripting
//!
//! - Joystick: each [`Axis::Horizontal`] read pops the next `(horizontal, vertical)`
//!   sample and counts one *tick*; the following [`Axis::Vertical`] read returns the
//!   same sample's vertical value. With no samples left both axes read centered.
//! - Buttons: presses wait in a queue per button. The front press arms the first time
//!   its button is polled once at least `after_ticks` ticks have happened. It then
//!   reads pressed from `wait` after arming until `wait + hold` after arming, and
//!   leaves the queue when that window has passed.
//!
//! ```rust
//! use embassy_futures::block_on;
//! use embassy_time::Duration;
//! use memory_matrix::hardware::{ButtonId, Buttons, Joystick, Axis};
//! use memory_matrix::host_board::{HostBoard, ScriptedPress};
//!
//! let mut board = HostBoard::new();
//! board.push_stick(0, 2048);
//! board.push_press(ButtonId::Confirm, ScriptedPress::at_tick(1));
//!
//! assert!(!board.is_pressed(ButtonId::Confirm)); // no tick yet
//! assert_eq!(block_on(board.read_axis(Axis::Horizontal)), 0);
//! assert!(board.is_pressed(ButtonId::Confirm));
//! ```

use std::collections::VecDeque;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::config::AXIS_CENTER;
use crate::hardware::{
    Axis, ButtonId, Buttons, Buzzer, Indicator, Indicators, Joystick, LedMatrix, StatusDisplay,
    Tone,
};
use crate::matrix::Frame;

/// Something the game did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A full frame was flushed to the matrix.
    Frame(Frame),
    /// A tone was played.
    Tone(Tone),
    /// A status LED changed.
    Indicator(Indicator, bool),
    /// The status display was rewritten.
    Text(String, String),
    /// The game waited this many microseconds.
    Delay(u64),
}

/// One scripted button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedPress {
    /// Ticks that must have happened before the press can arm.
    pub after_ticks: usize,
    /// Time from arming until the button goes down.
    pub wait: Duration,
    /// How long the button stays down.
    pub hold: Duration,
}

impl ScriptedPress {
    /// Default hold for scripted presses.
    pub const HOLD: Duration = Duration::from_millis(30);

    /// A press that goes down as soon as it is polled after `ticks` ticks.
    #[must_use]
    pub const fn at_tick(ticks: usize) -> Self {
        Self {
            after_ticks: ticks,
            wait: Duration::from_millis(0),
            hold: Self::HOLD,
        }
    }

    /// A press that goes down `wait` after it is first polled, with no tick requirement
    /// beyond `ticks`.
    #[must_use]
    pub const fn after(ticks: usize, wait: Duration) -> Self {
        Self {
            after_ticks: ticks,
            wait,
            hold: Self::HOLD,
        }
    }

    /// Same press, held for `hold`.
    #[must_use]
    pub const fn held_for(self, hold: Duration) -> Self {
        Self { hold, ..self }
    }
}

#[derive(Debug, Default)]
struct PressQueue {
    pending: VecDeque<ScriptedPress>,
    armed_at_us: Option<u64>,
}

impl PressQueue {
    fn poll(&mut self, ticks: usize, now_us: u64) -> bool {
        loop {
            let Some(front) = self.pending.front() else {
                return false;
            };
            let armed_at_us = match self.armed_at_us {
                Some(armed_at_us) => armed_at_us,
                None if ticks >= front.after_ticks => {
                    self.armed_at_us = Some(now_us);
                    now_us
                }
                None => return false,
            };
            let down_us = armed_at_us.saturating_add(front.wait.as_micros());
            let up_us = down_us.saturating_add(front.hold.as_micros());
            if now_us < down_us {
                return false;
            }
            if now_us < up_us {
                return true;
            }
            // This press is over; the next one may arm on this same poll.
            self.pending.pop_front();
            self.armed_at_us = None;
        }
    }
}

/// Scripted board with a virtual clock and an event log.
#[derive(Debug, Default)]
pub struct HostBoard {
    events: Vec<Event>,
    now_us: u64,
    ticks: usize,
    stick: VecDeque<(u16, u16)>,
    current_vertical: Option<u16>,
    confirm: PressQueue,
    cancel: PressQueue,
}

impl HostBoard {
    /// A board with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one joystick sample, consumed by the next tick.
    pub fn push_stick(&mut self, horizontal: u16, vertical: u16) {
        self.stick.push_back((horizontal, vertical));
    }

    /// Queue `count` centered joystick samples.
    pub fn push_idle(&mut self, count: usize) {
        for _ in 0..count {
            self.push_stick(AXIS_CENTER, AXIS_CENTER);
        }
    }

    /// Queue a press of `button`.
    pub fn push_press(&mut self, button: ButtonId, press: ScriptedPress) {
        self.queue(button).pending.push_back(press);
    }

    /// Queue the full cancel gesture (press, release, press, release) after `ticks` ticks.
    pub fn push_cancel_gesture(&mut self, ticks: usize) {
        self.push_press(ButtonId::Cancel, ScriptedPress::at_tick(ticks));
        self.push_press(
            ButtonId::Cancel,
            ScriptedPress::after(ticks, Duration::from_millis(200)),
        );
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Forget recorded events. The clock and scripts are untouched.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Frames flushed to the matrix, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Frame(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    /// Tones played, oldest first.
    #[must_use]
    pub fn tones(&self) -> Vec<Tone> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Tone(tone) => Some(*tone),
                _ => None,
            })
            .collect()
    }

    /// Status LED changes, oldest first.
    #[must_use]
    pub fn indicator_changes(&self) -> Vec<(Indicator, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Indicator(indicator, on) => Some((*indicator, *on)),
                _ => None,
            })
            .collect()
    }

    /// Status texts shown, oldest first.
    #[must_use]
    pub fn texts(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Text(line1, line2) => Some((line1.clone(), line2.clone())),
                _ => None,
            })
            .collect()
    }

    /// Virtual time spent in delays, in whole milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.now_us / 1000
    }

    /// Joystick ticks so far.
    #[must_use]
    pub const fn ticks(&self) -> usize {
        self.ticks
    }

    /// Scripted joystick samples not yet consumed.
    #[must_use]
    pub fn stick_remaining(&self) -> usize {
        self.stick.len()
    }

    /// Scripted presses of `button` not yet finished.
    #[must_use]
    pub fn presses_remaining(&self, button: ButtonId) -> usize {
        match button {
            ButtonId::Confirm => self.confirm.pending.len(),
            ButtonId::Cancel => self.cancel.pending.len(),
        }
    }

    fn queue(&mut self, button: ButtonId) -> &mut PressQueue {
        match button {
            ButtonId::Confirm => &mut self.confirm,
            ButtonId::Cancel => &mut self.cancel,
        }
    }

    fn advance(&mut self, micros: u64) {
        self.now_us = self.now_us.saturating_add(micros);
        self.events.push(Event::Delay(micros));
    }
}

impl LedMatrix for HostBoard {
    async fn write_frame(&mut self, frame: &Frame) {
        self.events.push(Event::Frame(*frame));
    }
}

impl Joystick for HostBoard {
    async fn read_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => {
                self.ticks = self.ticks.saturating_add(1);
                let (horizontal, vertical) =
                    self.stick.pop_front().unwrap_or((AXIS_CENTER, AXIS_CENTER));
                self.current_vertical = Some(vertical);
                horizontal
            }
            Axis::Vertical => self.current_vertical.take().unwrap_or(AXIS_CENTER),
        }
    }
}

impl Buttons for HostBoard {
    fn is_pressed(&mut self, button: ButtonId) -> bool {
        let (ticks, now_us) = (self.ticks, self.now_us);
        self.queue(button).poll(ticks, now_us)
    }
}

impl Indicators for HostBoard {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.events.push(Event::Indicator(indicator, on));
    }
}

impl Buzzer for HostBoard {
    async fn play_tone(&mut self, tone: Tone) {
        self.events.push(Event::Tone(tone));
        self.now_us = self.now_us.saturating_add(tone.duration.as_micros());
    }
}

impl StatusDisplay for HostBoard {
    async fn show_text(&mut self, line1: &str, line2: &str) {
        self.events
            .push(Event::Text(line1.to_string(), line2.to_string()));
    }
}

impl DelayNs for HostBoard {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns).div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms).saturating_mul(1000));
    }
}
