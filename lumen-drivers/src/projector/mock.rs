//! Test doubles for the projector driver
//!
//! Bus, frame buffer and delay all record into one [`Recorder`] so tests
//! can assert on the interleaving of register traffic and frame buffer
//! calls, and on simulated elapsed time.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use lumen_core::config::ProjectorConfig;
use lumen_core::traits::{FrameBuffer, FrameBufferError};
use lumen_hal::RegisterBus;

use super::device::Dlpc350;
use super::reg::{addr, status, value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Read(u8),
    Poll(u8),
    Write(u8, u8),
    Block(u8, Vec<u8>),
    Blit,
    Fill(u32),
    Swap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
    elapsed_ns: Cell<u64>,
}

impl Recorder {
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn writes(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Write(..) | Event::Block(..)))
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events.borrow().iter().position(|e| e == event)
    }

    pub fn last_position(&self, event: &Event) -> Option<usize> {
        self.events.borrow().iter().rposition(|e| e == event)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }

    /// Forget recorded events and reset the clock
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.elapsed_ns.set(0);
    }
}

/// Gamma behaviour of the simulated controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gamma {
    /// Gamma off
    Off,
    /// Gamma on until a disable command arrives
    On,
    /// Gamma on and ignores disable commands
    Stuck,
}

/// Scripted register bus
///
/// Ready-polls consume the per-register script first and then fall back
/// to the per-register default. Plain reads (the construction probe) only
/// see the default. MAIN_STATUS reflects the simulated gamma state.
pub struct MockBus<'r> {
    rec: &'r Recorder,
    scripts: HashMap<u8, VecDeque<Result<u8, BusFault>>>,
    defaults: HashMap<u8, Result<u8, BusFault>>,
    gamma: Gamma,
    fail_writes: bool,
}

impl<'r> MockBus<'r> {
    pub fn new(rec: &'r Recorder) -> Self {
        Self {
            rec,
            scripts: HashMap::new(),
            defaults: HashMap::new(),
            gamma: Gamma::Off,
            fail_writes: false,
        }
    }

    pub fn respond(&mut self, reg: u8, reply: Result<u8, BusFault>) -> &mut Self {
        self.defaults.insert(reg, reply);
        self
    }

    pub fn script(&mut self, reg: u8, replies: &[Result<u8, BusFault>]) -> &mut Self {
        self.scripts
            .entry(reg)
            .or_default()
            .extend(replies.iter().copied());
        self
    }

    pub fn gamma(&mut self, gamma: Gamma) -> &mut Self {
        self.gamma = gamma;
        self
    }

    pub fn fail_writes(&mut self, fail: bool) -> &mut Self {
        self.fail_writes = fail;
        self
    }

    fn default_reply(&self, reg: u8) -> Result<u8, BusFault> {
        let reply = self.defaults.get(&reg).copied().unwrap_or(Ok(0));
        if reg == addr::MAIN_STATUS && self.gamma != Gamma::Off {
            reply.map(|v| v | status::MAIN_GAMMA_ENABLED)
        } else {
            reply
        }
    }

    fn write_result(&self) -> Result<(), BusFault> {
        if self.fail_writes {
            Err(BusFault)
        } else {
            Ok(())
        }
    }
}

impl RegisterBus for MockBus<'_> {
    type Error = BusFault;

    fn read(&mut self, reg: u8) -> Result<u8, BusFault> {
        self.rec.push(Event::Read(reg));
        self.default_reply(reg)
    }

    fn write(&mut self, reg: u8, byte: u8) -> Result<(), BusFault> {
        self.rec.push(Event::Write(reg, byte));
        if reg == addr::GAMMA && byte == value::GAMMA_DISABLE && self.gamma == Gamma::On {
            self.gamma = Gamma::Off;
        }
        self.write_result()
    }

    fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), BusFault> {
        self.rec.push(Event::Block(reg, data.to_vec()));
        self.write_result()
    }

    fn read_when_ready(&mut self, reg: u8, _ready_mask: u8) -> Result<u8, BusFault> {
        self.rec.push(Event::Poll(reg));
        match self.scripts.get_mut(&reg).and_then(|q| q.pop_front()) {
            Some(reply) => reply,
            None => self.default_reply(reg),
        }
    }
}

/// Bus with nothing attached
///
/// Fails the probe, then panics on any further transaction.
#[derive(Default)]
pub struct AbsentBus {
    probed: bool,
}

impl RegisterBus for AbsentBus {
    type Error = BusFault;

    fn read(&mut self, reg: u8) -> Result<u8, BusFault> {
        assert!(!self.probed, "read of 0x{reg:02X} on absent bus");
        self.probed = true;
        Err(BusFault)
    }

    fn write(&mut self, reg: u8, _value: u8) -> Result<(), BusFault> {
        panic!("write to 0x{reg:02X} on absent bus");
    }

    fn write_block(&mut self, reg: u8, _data: &[u8]) -> Result<(), BusFault> {
        panic!("block write to 0x{reg:02X} on absent bus");
    }

    fn read_when_ready(&mut self, reg: u8, _ready_mask: u8) -> Result<u8, BusFault> {
        panic!("ready-poll of 0x{reg:02X} on absent bus");
    }
}

pub struct MockFrameBuffer<'r> {
    rec: &'r Recorder,
    failure: Option<FrameBufferError>,
}

impl<'r> MockFrameBuffer<'r> {
    pub fn new(rec: &'r Recorder) -> Self {
        Self { rec, failure: None }
    }

    pub fn failing(rec: &'r Recorder, error: FrameBufferError) -> Self {
        Self {
            rec,
            failure: Some(error),
        }
    }

    fn result(&self) -> Result<(), FrameBufferError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl FrameBuffer for MockFrameBuffer<'_> {
    type Image = [u8];

    fn blit(&mut self, _image: &[u8]) -> Result<(), FrameBufferError> {
        self.rec.push(Event::Blit);
        self.result()
    }

    fn fill(&mut self, color: u32) -> Result<(), FrameBufferError> {
        self.rec.push(Event::Fill(color));
        self.result()
    }

    fn swap(&mut self) -> Result<(), FrameBufferError> {
        self.rec.push(Event::Swap);
        self.result()
    }
}

/// Delay that advances the recorder's simulated clock
pub struct MockDelay<'r> {
    rec: &'r Recorder,
}

impl<'r> MockDelay<'r> {
    pub fn new(rec: &'r Recorder) -> Self {
        Self { rec }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let now = self.rec.elapsed_ns.get();
        self.rec.elapsed_ns.set(now + ns as u64);
    }
}

/// Connected controller with the construction probe already cleared
pub fn device<'b, 'r>(
    bus: &'b mut MockBus<'r>,
    rec: &'r Recorder,
    config: ProjectorConfig,
) -> Dlpc350<&'b mut MockBus<'r>, MockDelay<'r>> {
    let device = Dlpc350::new(bus, MockDelay::new(rec), config);
    assert!(device.is_controllable());
    rec.clear();
    device
}
