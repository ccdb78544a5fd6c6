use crate::core::{ControllerType, CONFIG_STEP_DELAY_US, INTERPHASE_DELAY_US, POST_READ_DELAY_US};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Errors in this crate
#[cfg_attr(feature = "defmt_print", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I²C bus communication error
    Bus(E),
    /// The identity blob is outside the decoder table, or the attached
    /// peripheral has no status decoder
    UnsupportedPeripheral,
    /// Configuration attempts exhausted; the caller may retry later
    NotInitialized,
    /// Identity read succeeded but did not match the expected peripheral;
    /// carries the observed kind so callers may adapt
    IdMismatch(ControllerType),
    /// Caller requested a register the driver does not model
    UnknownParameter,
    /// Payload consisted entirely of the 0xFF not-ready sentinel
    InvalidData,
    /// Reserved for future use by the payload codec
    DescrambleFailed,
    /// Too many consecutive failures; the caller must re-initialise
    DeviceDisabled,
    /// Home capture requested while relative tracking is off
    RelativeDisabled,
}

/// Bus port for a Wii extension peripheral.
///
/// Owns the i2c device and the delay service and speaks the peripheral's
/// register protocol: two-byte configuration writes and the
/// register-select-then-read parameter transaction.
pub struct Interface<I2C, DELAY> {
    i2cdev: I2C,
    delay: DELAY,
    address: SevenBitAddress,
}

impl<I2C, E, DELAY> Interface<I2C, DELAY>
where
    I2C: I2c<SevenBitAddress, Error = E>,
    DELAY: DelayNs,
{
    pub fn new(i2cdev: I2C, delay: DELAY, address: SevenBitAddress) -> Interface<I2C, DELAY> {
        Interface {
            i2cdev,
            delay,
            address,
        }
    }

    /// Recover data members
    pub fn destroy(self) -> (I2C, DELAY) {
        (self.i2cdev, self.delay)
    }

    pub(super) fn delay_us(&mut self, micros: u32) {
        self.delay.delay_us(micros);
    }

    /// Set a single register at target address
    pub(super) fn set_register(&mut self, addr: u8, byte1: u8) -> Result<(), Error<E>> {
        self.i2cdev
            .write(self.address, &[addr, byte1])
            .map_err(Error::Bus)
    }

    /// Send the clear-text handshake to the extension controller.
    ///
    /// Extension controllers power up in scrambled mode, as that is what a
    /// Wii expects. Writing these magic values switches the peripheral to
    /// plain reports, described at
    /// https://wiibrew.org/wiki/Wiimote/Extension_Controllers#The_New_Way
    pub(super) fn disable_encryption(&mut self) -> Result<(), Error<E>> {
        self.set_register(0xF0, 0x55)?;
        self.delay.delay_us(CONFIG_STEP_DELAY_US);
        self.set_register(0xFB, 0x00)?;
        self.delay.delay_us(CONFIG_STEP_DELAY_US);
        Ok(())
    }

    /// Send the legacy handshake that leaves the peripheral scrambled.
    ///
    /// Only used when the caller explicitly asked for scrambled operation;
    /// every payload then goes through the descramble transform.
    pub(super) fn init_encrypted(&mut self) -> Result<(), Error<E>> {
        self.set_register(0x40, 0x00)?;
        self.delay.delay_us(CONFIG_STEP_DELAY_US);
        Ok(())
    }

    /// Read `buf.len()` bytes of the parameter stored at `reg`.
    ///
    /// The write phase is closed with an explicit STOP and the read phase
    /// started fresh after a short gap - the peripheral holds SDA low for
    /// 7-8 ms after a repeated START, which collides with the next
    /// transaction. A post-read delay keeps the bus idle long enough for
    /// the peripheral to latch the next sample.
    pub(super) fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.i2cdev.write(self.address, &[reg]).map_err(Error::Bus)?;
        self.delay.delay_us(INTERPHASE_DELAY_US);
        self.i2cdev.read(self.address, buf).map_err(Error::Bus)?;
        self.delay.delay_us(POST_READ_DELAY_US);
        Ok(())
    }
}
