//! Recording mocks for the hardware capabilities
//!
//! Every mock appends to one shared trace so tests can assert on the exact
//! order of pin and bus operations.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use restouch_hal::{ClockedBus, InputPin, OutputPin, SpiBus};

use crate::bus::SharedBus;

/// One observed hardware operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    DisplayCs(bool),
    TouchCs(bool),
    Dc(bool),
    Reset(bool),
    Frequency(u32),
    Write(Vec<u8>),
    Read(usize),
}

pub type Trace = Rc<RefCell<Vec<Op>>>;

#[derive(Debug, Clone, Copy)]
pub enum PinRole {
    DisplayCs,
    TouchCs,
    Dc,
    Reset,
}

/// Output pin that records level changes
pub struct MockPin {
    role: PinRole,
    high: bool,
    trace: Trace,
}

impl MockPin {
    pub fn new(role: PinRole, trace: &Trace) -> Self {
        Self {
            role,
            high: false,
            trace: trace.clone(),
        }
    }

    fn record(&mut self, high: bool) {
        self.high = high;
        let op = match self.role {
            // Chip selects are active low: record "asserted"
            PinRole::DisplayCs => Op::DisplayCs(!high),
            PinRole::TouchCs => Op::TouchCs(!high),
            PinRole::Dc => Op::Dc(high),
            PinRole::Reset => Op::Reset(high),
        };
        self.trace.borrow_mut().push(op);
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.record(true);
    }

    fn set_low(&mut self) {
        self.record(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Touch interrupt line (active low)
pub struct MockIrq {
    pub touched: bool,
}

impl InputPin for MockIrq {
    fn is_high(&self) -> bool {
        !self.touched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

/// SPI bus that records writes and frequency changes and replays responses
pub struct MockSpi {
    trace: Trace,
    hz: u32,
    responses: VecDeque<u8>,
    writes: usize,
    /// Writes with this index or later fail
    pub fail_writes_from: Option<usize>,
    /// Switching to this frequency fails
    pub fail_frequency: Option<u32>,
}

impl MockSpi {
    pub fn new(hz: u32, trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            hz,
            responses: VecDeque::new(),
            writes: 0,
            fail_writes_from: None,
            fail_frequency: None,
        }
    }

    /// Queue the two response bytes for one touch axis read
    pub fn queue_response(&mut self, bytes: [u8; 2]) {
        self.responses.extend(bytes);
    }
}

impl SpiBus for MockSpi {
    type Error = MockSpiError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_writes_from.is_some_and(|from| index >= from) {
            return Err(MockSpiError);
        }
        self.trace.borrow_mut().push(Op::Write(data.to_vec()));
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buf.iter_mut() {
            *byte = self.responses.pop_front().unwrap_or(0);
        }
        self.trace.borrow_mut().push(Op::Read(buf.len()));
        Ok(())
    }
}

impl ClockedBus for MockSpi {
    fn frequency(&self) -> u32 {
        self.hz
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        if self.fail_frequency == Some(hz) {
            return Err(MockSpiError);
        }
        self.hz = hz;
        self.trace.borrow_mut().push(Op::Frequency(hz));
        Ok(())
    }
}

/// Delay that only accumulates the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

pub type MockBus = SharedBus<MockSpi, MockPin, MockPin>;

/// Shared bus at display speed with an empty trace
pub fn mock_bus(hz: u32) -> (MockBus, Trace) {
    let trace = Trace::default();
    let bus = SharedBus::new(
        MockSpi::new(hz, &trace),
        MockPin::new(PinRole::DisplayCs, &trace),
        MockPin::new(PinRole::TouchCs, &trace),
    );
    trace.borrow_mut().clear();
    (bus, trace)
}

/// Assert the trace never shows both chip selects asserted at once
pub fn assert_exclusive(trace: &Trace) {
    let (mut display, mut touch) = (false, false);
    for op in trace.borrow().iter() {
        match op {
            Op::DisplayCs(asserted) => display = *asserted,
            Op::TouchCs(asserted) => touch = *asserted,
            Op::Frequency(_) => assert!(
                !display && !touch,
                "bus clock changed while a chip select was asserted"
            ),
            _ => {}
        }
        assert!(!(display && touch), "both chip selects asserted");
    }
}

/// All bytes written while the display chip select was asserted, per write
pub fn display_writes(trace: &Trace) -> Vec<Vec<u8>> {
    let mut selected = false;
    let mut writes = Vec::new();
    for op in trace.borrow().iter() {
        match op {
            Op::DisplayCs(asserted) => selected = *asserted,
            Op::Write(bytes) if selected => writes.push(bytes.clone()),
            _ => {}
        }
    }
    writes
}
