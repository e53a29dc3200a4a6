//! I2C bus abstractions
//!
//! Provides the raw I2C master trait implemented by chip-specific HALs and
//! a register-oriented layer on top of it. Most peripherals on the printer
//! (the projector controller in particular) are addressed as a bank of
//! byte-wide command registers, so drivers talk to a [`RegisterBus`]
//! rather than to the raw bus.

use embedded_hal::delay::DelayNs;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Register-addressed command bus
///
/// A device exposing byte-wide registers behind a single bus address.
/// An `Err` from any method is the communication-failure outcome: the
/// transaction did not complete and no status byte is available.
pub trait RegisterBus {
    /// Error type for register transactions
    type Error: core::fmt::Debug;

    /// Read one byte from a register
    fn read(&mut self, reg: u8) -> Result<u8, Self::Error>;

    /// Write one byte to a register
    fn write(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Write a multi-byte value to a register in one transaction
    fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read a register once the device reports ready
    ///
    /// Blocks until the byte read back has every bit of `ready_mask` set,
    /// or until the implementation's poll budget is spent.
    fn read_when_ready(&mut self, reg: u8, ready_mask: u8) -> Result<u8, Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read(&mut self, reg: u8) -> Result<u8, Self::Error> {
        (**self).read(reg)
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write(reg, value)
    }

    fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_block(reg, data)
    }

    fn read_when_ready(&mut self, reg: u8, ready_mask: u8) -> Result<u8, Self::Error> {
        (**self).read_when_ready(reg, ready_mask)
    }
}

/// Largest payload accepted by [`RegisterBus::write_block`] on an
/// [`I2cRegisterDevice`]
pub const MAX_BLOCK_LEN: usize = 32;

/// Errors from [`I2cRegisterDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterBusError<E> {
    /// Underlying I2C transaction failed
    Bus(E),
    /// Block payload longer than [`MAX_BLOCK_LEN`]
    PayloadTooLong,
    /// Ready bits never came up within the poll budget
    NotReady,
}

impl<E: core::fmt::Debug> core::fmt::Display for RegisterBusError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterBusError::Bus(e) => write!(f, "I2C error: {e:?}"),
            RegisterBusError::PayloadTooLong => {
                write!(f, "Payload exceeds {MAX_BLOCK_LEN} bytes")
            }
            RegisterBusError::NotReady => write!(f, "Device not ready"),
        }
    }
}

/// Ready-poll tuning for [`I2cRegisterDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadyPollConfig {
    /// Maximum number of reads before giving up
    pub max_polls: u8,
    /// Delay between reads in microseconds
    pub poll_interval_us: u32,
}

impl Default for ReadyPollConfig {
    fn default() -> Self {
        Self {
            max_polls: 10,
            poll_interval_us: 10_000,
        }
    }
}

/// [`RegisterBus`] over a raw [`I2cBus`] at a fixed device address
///
/// Writes go out as `[reg, data..]`, reads as a one-byte write-read.
pub struct I2cRegisterDevice<B, D> {
    bus: B,
    delay: D,
    address: u8,
    poll: ReadyPollConfig,
}

impl<B, D> I2cRegisterDevice<B, D>
where
    B: I2cBus,
    B::Error: core::fmt::Debug,
    D: DelayNs,
{
    /// Create a register device with the default ready-poll budget
    pub fn new(bus: B, delay: D, address: u8) -> Self {
        Self::with_poll_config(bus, delay, address, ReadyPollConfig::default())
    }

    /// Create a register device with an explicit ready-poll budget
    pub fn with_poll_config(bus: B, delay: D, address: u8, poll: ReadyPollConfig) -> Self {
        Self {
            bus,
            delay,
            address,
            poll,
        }
    }

    /// Device address on the bus
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> RegisterBus for I2cRegisterDevice<B, D>
where
    B: I2cBus,
    B::Error: core::fmt::Debug,
    D: DelayNs,
{
    type Error = RegisterBusError<B::Error>;

    fn read(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.bus
            .write_read(self.address, &[reg], &mut buf)
            .map_err(RegisterBusError::Bus)?;
        Ok(buf[0])
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.bus
            .write(self.address, &[reg, value])
            .map_err(RegisterBusError::Bus)
    }

    fn write_block(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame: heapless::Vec<u8, { MAX_BLOCK_LEN + 1 }> = heapless::Vec::new();
        frame.push(reg).map_err(|_| RegisterBusError::PayloadTooLong)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| RegisterBusError::PayloadTooLong)?;
        self.bus
            .write(self.address, &frame)
            .map_err(RegisterBusError::Bus)
    }

    fn read_when_ready(&mut self, reg: u8, ready_mask: u8) -> Result<u8, Self::Error> {
        for attempt in 0..self.poll.max_polls {
            if attempt > 0 {
                self.delay.delay_us(self.poll.poll_interval_us);
            }
            // A NAK while the device is busy counts as not ready yet
            if let Ok(status) = self.read(reg) {
                if status & ready_mask == ready_mask {
                    return Ok(status);
                }
            }
        }
        Err(RegisterBusError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nak;

    /// Mock I2C bus that records writes and replays read bytes
    struct MockI2c {
        writes: heapless::Vec<heapless::Vec<u8, 40>, 8>,
        replies: heapless::Deque<Result<u8, Nak>, 16>,
    }

    impl MockI2c {
        fn new(replies: &[Result<u8, Nak>]) -> Self {
            let mut queue = heapless::Deque::new();
            for r in replies {
                queue.push_back(*r).unwrap();
            }
            Self {
                writes: heapless::Vec::new(),
                replies: queue,
            }
        }
    }

    impl I2cBus for MockI2c {
        type Error = Nak;

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), Nak> {
            let mut frame = heapless::Vec::new();
            frame.extend_from_slice(data).unwrap();
            self.writes.push(frame).unwrap();
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Nak> {
            Err(Nak)
        }

        fn write_read(&mut self, _address: u8, _w: &[u8], buf: &mut [u8]) -> Result<(), Nak> {
            let value = self.replies.pop_front().unwrap_or(Err(Nak))?;
            buf[0] = value;
            Ok(())
        }
    }

    /// Delay that only counts calls
    #[derive(Default)]
    struct CountingDelay {
        calls: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_write_frames_register_first() {
        let mut dev = I2cRegisterDevice::new(MockI2c::new(&[]), CountingDelay::default(), 0x1B);
        dev.write(0x10, 0x07).unwrap();
        dev.write_block(0x4B, &[9, 9, 9]).unwrap();

        let (bus, _) = dev.release();
        assert_eq!(bus.writes[0].as_slice(), &[0x10, 0x07]);
        assert_eq!(bus.writes[1].as_slice(), &[0x4B, 9, 9, 9]);
    }

    #[test]
    fn test_block_too_long() {
        let mut dev = I2cRegisterDevice::new(MockI2c::new(&[]), CountingDelay::default(), 0x1B);
        let data = [0u8; MAX_BLOCK_LEN + 1];
        assert_eq!(
            dev.write_block(0x66, &data),
            Err(RegisterBusError::PayloadTooLong)
        );
    }

    #[test]
    fn test_read_when_ready_waits_for_mask() {
        let bus = MockI2c::new(&[Err(Nak), Ok(0x00), Ok(0x81)]);
        let mut dev = I2cRegisterDevice::new(bus, CountingDelay::default(), 0x1B);

        assert_eq!(dev.read_when_ready(0x22, 0x01), Ok(0x81));
        let (_, delay) = dev.release();
        assert_eq!(delay.calls, 2);
    }

    #[test]
    fn test_read_when_ready_gives_up() {
        let poll = ReadyPollConfig {
            max_polls: 3,
            poll_interval_us: 1,
        };
        let bus = MockI2c::new(&[Ok(0), Ok(0), Ok(0), Ok(1)]);
        let mut dev =
            I2cRegisterDevice::with_poll_config(bus, CountingDelay::default(), 0x1B, poll);

        assert_eq!(dev.read_when_ready(0x20, 0x01), Err(RegisterBusError::NotReady));
    }

    #[test]
    fn test_plain_read_surfaces_bus_error() {
        let mut dev = I2cRegisterDevice::new(MockI2c::new(&[]), CountingDelay::default(), 0x1B);
        assert_eq!(dev.read(0x20), Err(RegisterBusError::Bus(Nak)));
    }
}
