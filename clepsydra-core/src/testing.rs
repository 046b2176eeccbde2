//! Simulated board for host tests
//!
//! Every collaborator shares one [`Sim`]: a virtual clock that only moves
//! when the controller delays, a script of timed operator actions replayed
//! as the clock passes them, and a log of everything the controller did to
//! the hardware.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;

use crate::input::{Gesture, GestureLatch};
use crate::state::TimerController;
use crate::traits::{Actuator, Board, Clock, Encoder, PowerManager, TimeDisplay, ToneSequencer};

/// Virtual time after which a test is considered hung
pub(crate) const TIME_LIMIT_MS: u64 = 4 * 3600 * 1000;

/// Operator action replayed at a scripted time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// A single gesture flag
    Gesture(Gesture),
    /// Plain tap: press and release
    Tap,
    /// Held button: press and long press
    Hold,
    /// Knob turned to this raw position (clamped to the encoder range)
    Turn(i32),
}

/// Something the controller did to the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HwEvent {
    Render(u16),
    Clear(bool),
    Invert(bool),
    DisplayPower(bool),
    ToneStart,
    Vibrate(bool),
    Sleep,
    EncoderSet(i32),
    EncoderReset,
}

/// Display failure injected by [`SimHandle::fail_display`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusError;

struct Sim {
    now_us: u64,
    script: VecDeque<(u64, Action)>,
    events: Vec<(u64, HwEvent)>,
    position: i32,
    min: i32,
    max: i32,
    tone_ticks: u32,
    tone_left: u32,
    vibrating: bool,
    display_fails: bool,
    gestures: &'static GestureLatch,
}

impl Sim {
    fn now_ms(&self) -> u64 {
        self.now_us / 1000
    }

    fn log(&mut self, event: HwEvent) {
        let now = self.now_ms();
        self.events.push((now, event));
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Gesture(g) => self.gestures.set(g),
            Action::Tap => {
                self.gestures.set(Gesture::Press);
                self.gestures.set(Gesture::Release);
            }
            Action::Hold => {
                self.gestures.set(Gesture::Press);
                self.gestures.set(Gesture::LongPress);
            }
            Action::Turn(position) => self.position = position.clamp(self.min, self.max),
        }
    }

    /// Move the clock forward, replaying every action it passes
    fn advance_us(&mut self, us: u64) {
        let target = self.now_us + us;
        while let Some(&(at_ms, action)) = self.script.front() {
            if at_ms * 1000 > target {
                break;
            }
            self.script.pop_front();
            self.now_us = self.now_us.max(at_ms * 1000);
            self.apply(action);
        }
        self.now_us = target;
        assert!(
            self.now_ms() <= TIME_LIMIT_MS,
            "simulation ran past {} ms",
            TIME_LIMIT_MS
        );
    }

    /// Jump to the next scripted action; it is the wake edge
    fn wake(&mut self) {
        let (at_ms, action) = self
            .script
            .pop_front()
            .unwrap_or_else(|| panic!("device slept at {} ms and never woke", self.now_ms()));
        self.now_us = self.now_us.max(at_ms * 1000);
        self.apply(action);
    }
}

/// Shared handle to the simulation
#[derive(Clone)]
pub(crate) struct SimHandle(Rc<RefCell<Sim>>);

impl SimHandle {
    /// New simulation at t = 0 with the default encoder range
    pub(crate) fn new() -> Self {
        let gestures: &'static GestureLatch = Box::leak(Box::new(GestureLatch::new()));
        Self(Rc::new(RefCell::new(Sim {
            now_us: 0,
            script: VecDeque::new(),
            events: Vec::new(),
            position: 0,
            min: 0,
            max: i32::from(crate::MAX_SECONDS),
            tone_ticks: 3,
            tone_left: 0,
            vibrating: false,
            display_fails: false,
            gestures,
        })))
    }

    /// Gesture latch shared with the controller
    pub(crate) fn gestures(&self) -> &'static GestureLatch {
        self.0.borrow().gestures
    }

    /// Schedule an operator action at an absolute virtual time
    ///
    /// Actions must be scheduled in time order.
    pub(crate) fn at(&self, at_ms: u64, action: Action) -> &Self {
        let mut sim = self.0.borrow_mut();
        if let Some(&(last, _)) = sim.script.back() {
            assert!(at_ms >= last, "script out of order");
        }
        sim.script.push_back((at_ms, action));
        drop(sim);
        self
    }

    /// Number of sequencer ticks per tone playback
    pub(crate) fn set_tone_ticks(&self, ticks: u32) {
        self.0.borrow_mut().tone_ticks = ticks;
    }

    /// Make every display call fail
    pub(crate) fn fail_display(&self) {
        self.0.borrow_mut().display_fails = true;
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.0.borrow().now_ms()
    }

    /// Raw encoder position
    pub(crate) fn position(&self) -> i32 {
        self.0.borrow().position
    }

    pub(crate) fn is_vibrating(&self) -> bool {
        self.0.borrow().vibrating
    }

    pub(crate) fn events(&self) -> Vec<HwEvent> {
        self.0.borrow().events.iter().map(|(_, e)| *e).collect()
    }

    pub(crate) fn timed_events(&self) -> Vec<(u64, HwEvent)> {
        self.0.borrow().events.clone()
    }

    /// Values rendered, in order
    pub(crate) fn renders(&self) -> Vec<u16> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HwEvent::Render(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, event: HwEvent) -> usize {
        self.events().into_iter().filter(|e| *e == event).count()
    }

    /// Forget the events logged so far
    pub(crate) fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// A board whose collaborators all share this simulation
    pub(crate) fn board(&self) -> SimBoard {
        Board {
            encoder: SimEncoder(self.clone()),
            display: SimDisplay(self.clone()),
            tone: SimTone(self.clone()),
            vibration: SimVibration(self.clone()),
            power: SimPower(self.clone()),
            clock: SimClock(self.clone()),
        }
    }
}

pub(crate) type SimBoard = Board<SimEncoder, SimDisplay, SimTone, SimVibration, SimPower, SimClock>;

pub(crate) type SimController =
    TimerController<'static, SimEncoder, SimDisplay, SimTone, SimVibration, SimPower, SimClock>;

pub(crate) struct SimEncoder(SimHandle);

impl Encoder for SimEncoder {
    fn read(&self) -> i32 {
        (self.0).0.borrow().position
    }

    fn set(&mut self, value: i32) {
        let mut sim = (self.0).0.borrow_mut();
        sim.position = value.clamp(sim.min, sim.max);
        sim.log(HwEvent::EncoderSet(value));
    }

    fn reset(&mut self) {
        let mut sim = (self.0).0.borrow_mut();
        sim.position = 0;
        sim.log(HwEvent::EncoderReset);
    }
}

pub(crate) struct SimDisplay(SimHandle);

impl SimDisplay {
    fn record(&mut self, event: HwEvent) -> Result<(), BusError> {
        let mut sim = (self.0).0.borrow_mut();
        if sim.display_fails {
            return Err(BusError);
        }
        sim.log(event);
        Ok(())
    }
}

impl TimeDisplay for SimDisplay {
    type Error = BusError;

    async fn render(&mut self, seconds: u16) -> Result<(), BusError> {
        self.record(HwEvent::Render(seconds))
    }

    async fn clear(&mut self, on: bool) -> Result<(), BusError> {
        self.record(HwEvent::Clear(on))
    }

    async fn invert(&mut self, on: bool) -> Result<(), BusError> {
        self.record(HwEvent::Invert(on))
    }

    async fn power(&mut self, on: bool) -> Result<(), BusError> {
        self.record(HwEvent::DisplayPower(on))
    }
}

pub(crate) struct SimTone(SimHandle);

impl ToneSequencer for SimTone {
    fn restart(&mut self) {
        let mut sim = (self.0).0.borrow_mut();
        sim.tone_left = sim.tone_ticks;
        sim.log(HwEvent::ToneStart);
    }

    fn advance_tick(&mut self) -> bool {
        let mut sim = (self.0).0.borrow_mut();
        if sim.tone_left == 0 {
            return false;
        }
        sim.tone_left -= 1;
        true
    }
}

pub(crate) struct SimVibration(SimHandle);

impl Actuator for SimVibration {
    fn set(&mut self, on: bool) {
        let mut sim = (self.0).0.borrow_mut();
        sim.vibrating = on;
        sim.log(HwEvent::Vibrate(on));
    }
}

pub(crate) struct SimPower(SimHandle);

impl PowerManager for SimPower {
    async fn sleep_until_wake(&mut self) {
        let mut sim = (self.0).0.borrow_mut();
        sim.log(HwEvent::Sleep);
        sim.wake();
    }
}

pub(crate) struct SimClock(SimHandle);

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.now_ms()
    }
}

impl DelayNs for SimClock {
    async fn delay_ns(&mut self, ns: u32) {
        (self.0).0.borrow_mut().advance_us(u64::from(ns).div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        (self.0).0.borrow_mut().advance_us(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        (self.0).0.borrow_mut().advance_us(u64::from(ms) * 1000);
    }
}
