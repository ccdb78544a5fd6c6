// Lifecycle layer over the bus interface: bring-up with retries, identity
// confirmation, periodic status polling, home/relative tracking, and the
// failure-counter maintenance policy.
//
// Controller handshakes:
// https://wiibrew.org/wiki/Wiimote/Extension_Controllers#The_New_Way

use crate::blocking_impl::interface::{Error, Interface};
use crate::core::{
    codec, decode_status, identify_peripheral, ControllerType, DeviceStatus, ExtReading, ExtReport,
    IdReport, CONNECT_RETRY_DELAY_US, DISABLE_THRESHOLD, ID_CONFIRM_DELAY_US, MAX_CONNECT_ATTEMPTS,
    MAX_PAYLOAD, RECONFIG_THRESHOLD, REG_CALIBRATION, REG_DEVICE_TYPE, REG_STATUS,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// A Wii extension peripheral with its connection state.
///
/// Created uninitialized; [`Device::initialize`] brings the peripheral up,
/// confirms its identity and captures the home position. After that, each
/// successful [`Device::poll_status`] refreshes the current and relative
/// readings, while consecutive failures feed the maintenance policy: a few
/// are tolerated, a longer run triggers reconfiguration, and a run past
/// the disable threshold takes the device offline until it is initialized
/// again.
pub struct Device<I2C, DELAY> {
    interface: Interface<I2C, DELAY>,
    expected: ControllerType,
    observed: ControllerType,
    scrambled: bool,
    payload: [u8; MAX_PAYLOAD],
    current: ExtReading,
    home: ExtReading,
    relative: ExtReading,
    relative_enabled: bool,
    failures: u8,
    status: DeviceStatus,
}

impl<I2C, E, DELAY> Device<I2C, DELAY>
where
    I2C: I2c<SevenBitAddress, Error = E>,
    DELAY: DelayNs,
{
    /// Create an uninitialized device expecting the given peripheral.
    ///
    /// Pass [`ControllerType::Unknown`] to accept whatever is attached;
    /// the identity check is skipped but the observed kind is still
    /// recorded. The peripheral will be switched to clear-text reports
    /// during bring-up.
    pub fn new(i2cdev: I2C, delay: DELAY, expected: ControllerType) -> Device<I2C, DELAY> {
        Self::build(i2cdev, delay, expected, false)
    }

    /// Create an uninitialized device that keeps the peripheral in its
    /// legacy scrambled mode and descrambles every payload.
    pub fn new_scrambled(i2cdev: I2C, delay: DELAY, expected: ControllerType) -> Device<I2C, DELAY> {
        Self::build(i2cdev, delay, expected, true)
    }

    fn build(i2cdev: I2C, delay: DELAY, expected: ControllerType, scrambled: bool) -> Device<I2C, DELAY> {
        Device {
            interface: Interface::new(i2cdev, delay, expected.bus_address()),
            expected,
            observed: ControllerType::Unknown,
            scrambled,
            payload: [0; MAX_PAYLOAD],
            current: ExtReading::default(),
            home: ExtReading::default(),
            relative: ExtReading::default(),
            relative_enabled: true,
            failures: 0,
            status: DeviceStatus::Uninitialized,
        }
    }

    /// Recover data members
    pub fn destroy(self) -> (I2C, DELAY) {
        self.interface.destroy()
    }

    /// Bring the peripheral up from scratch.
    ///
    /// Resets the failure counter and the lifecycle state, then runs the
    /// connection sequence. This is also the only way back from
    /// [`DeviceStatus::Disabled`].
    pub fn initialize(&mut self) -> Result<(), Error<E>> {
        self.failures = 0;
        self.observed = ControllerType::Unknown;
        self.status = DeviceStatus::Uninitialized;
        self.do_maintenance()
    }

    /// Poll the peripheral for the latest input state
    pub fn poll_status(&mut self) -> Result<ExtReading, Error<E>> {
        self.query(REG_STATUS)?;
        Ok(self.current)
    }

    /// Capture the current input state as the new home position.
    ///
    /// Polls once so the capture reflects the peripheral as it rests right
    /// now, then re-bases the relative reading on it.
    pub fn set_home(&mut self) -> Result<(), Error<E>> {
        if !self.relative_enabled {
            return Err(Error::RelativeDisabled);
        }
        self.query(REG_STATUS)?;
        self.capture_home();
        Ok(())
    }

    /// Resume re-computing the relative reading on every status poll
    pub fn enable_relative(&mut self) {
        self.relative_enabled = true;
    }

    /// Freeze the relative reading at its last computed value
    pub fn disable_relative(&mut self) {
        self.relative_enabled = false;
    }

    /// Run the failure-count-driven maintenance policy.
    ///
    /// Recommended once per polling cycle or after a failed poll. From
    /// [`DeviceStatus::Uninitialized`] this is the connection sequence;
    /// while connected it reconfigures the peripheral once the failure
    /// counter leaves the tolerated band.
    pub fn do_maintenance(&mut self) -> Result<(), Error<E>> {
        match self.status {
            DeviceStatus::Disabled => Err(Error::DeviceDisabled),
            DeviceStatus::Uninitialized => self.try_connect(),
            DeviceStatus::Configuring | DeviceStatus::Active => {
                if self.failures > DISABLE_THRESHOLD {
                    self.status = DeviceStatus::Disabled;
                    return Err(Error::DeviceDisabled);
                }
                if self.failures > RECONFIG_THRESHOLD {
                    self.status = DeviceStatus::Configuring;
                    if let Err(err) = self.reconfigure() {
                        self.note_failure();
                        return Err(err);
                    }
                    self.status = DeviceStatus::Active;
                }
                Ok(())
            }
        }
    }

    /// Query one of the peripheral's parameter registers into the raw
    /// payload buffer.
    ///
    /// Status queries additionally decode the report and refresh the
    /// relative reading. Any successful query clears the failure counter;
    /// bus errors and not-ready payloads charge it.
    pub fn query(&mut self, register: u8) -> Result<(), Error<E>> {
        if self.status == DeviceStatus::Disabled {
            return Err(Error::DeviceDisabled);
        }
        let len = match register {
            REG_STATUS | REG_DEVICE_TYPE => 6,
            REG_CALIBRATION => MAX_PAYLOAD,
            _ => return Err(Error::UnknownParameter),
        };
        if register == REG_STATUS && self.observed.is_classic() {
            // Classic variants wedge into stale/scrambled reports unless the
            // clear-text handshake precedes every status read
            if let Err(err) = self.reconfigure() {
                self.note_failure();
                return Err(err);
            }
        }
        let mut rx = [0u8; MAX_PAYLOAD];
        if let Err(err) = self.interface.read_register(register, &mut rx[..len]) {
            self.note_failure();
            return Err(err);
        }
        if !codec::payload_is_valid(&rx[..len]) {
            self.payload = [0; MAX_PAYLOAD];
            self.note_failure();
            return Err(Error::InvalidData);
        }
        if self.scrambled {
            codec::descramble(&mut rx[..len]);
        }
        self.payload = rx;
        self.failures = 0;
        if register == REG_STATUS {
            let mut report = ExtReport::default();
            let report_len = report.len();
            report.copy_from_slice(&self.payload[..report_len]);
            self.current =
                decode_status(self.observed, &report).ok_or(Error::UnsupportedPeripheral)?;
            if self.relative_enabled {
                self.relative = self.current.relative_to(&self.home);
            }
        }
        Ok(())
    }

    /// Latest decoded input state
    pub fn current(&self) -> &ExtReading {
        &self.current
    }

    /// Input state captured as the origin for relative reporting
    pub fn home(&self) -> &ExtReading {
        &self.home
    }

    /// Difference between the current and home input states
    pub fn relative(&self) -> &ExtReading {
        &self.relative
    }

    /// Response of the most recent successful parameter query
    pub fn raw_payload(&self) -> &[u8; MAX_PAYLOAD] {
        &self.payload
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Peripheral kind reported by the identity read
    pub fn controller_type(&self) -> ControllerType {
        self.observed
    }

    /// Peripheral kind this device was created for
    pub fn expected_type(&self) -> ControllerType {
        self.expected
    }

    /// Consecutive failed parameter queries since the last success
    pub fn failure_count(&self) -> u8 {
        self.failures
    }

    fn note_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
        if self.failures > DISABLE_THRESHOLD {
            self.status = DeviceStatus::Disabled;
        }
    }

    fn capture_home(&mut self) {
        self.home = self.current;
        if self.relative_enabled {
            self.relative = self.current.relative_to(&self.home);
        }
    }

    fn reconfigure(&mut self) -> Result<(), Error<E>> {
        if self.scrambled {
            self.interface.init_encrypted()
        } else {
            self.interface.disable_encryption()
        }
    }

    fn try_connect(&mut self) -> Result<(), Error<E>> {
        self.status = DeviceStatus::Configuring;
        self.failures = 0;
        let mut attempt = 0;
        loop {
            match self.connect_once() {
                Ok(()) => {
                    self.status = DeviceStatus::Active;
                    return Ok(());
                }
                Err(err @ (Error::IdMismatch(_) | Error::UnsupportedPeripheral)) => {
                    // connected, but to the wrong hardware - retrying cannot
                    // change what is attached
                    self.status = DeviceStatus::Uninitialized;
                    return Err(err);
                }
                Err(_) => {
                    attempt += 1;
                    if attempt >= MAX_CONNECT_ATTEMPTS {
                        self.status = DeviceStatus::Uninitialized;
                        return Err(Error::NotInitialized);
                    }
                    self.interface.delay_us(CONNECT_RETRY_DELAY_US);
                }
            }
        }
    }

    /// One connection attempt: configure, confirm identity, capture home
    fn connect_once(&mut self) -> Result<(), Error<E>> {
        self.reconfigure()?;
        if let Err(err) = self.query(REG_DEVICE_TYPE) {
            self.observed = ControllerType::Unknown;
            return Err(err);
        }
        let mut id = IdReport::default();
        let id_len = id.len();
        id.copy_from_slice(&self.payload[..id_len]);
        let mut observed = identify_peripheral(&id);
        if observed == ControllerType::Unsupported && !self.scrambled {
            // a peripheral that never completed reconfiguration may still
            // answer with a scrambled identity - decrypt and retry the match
            codec::descramble(&mut id);
            observed = identify_peripheral(&id);
        }
        self.observed = observed;
        if observed == ControllerType::Unsupported {
            return Err(Error::UnsupportedPeripheral);
        }
        if self.expected != ControllerType::Unknown && observed != self.expected {
            return Err(Error::IdMismatch(observed));
        }
        self.interface.delay_us(ID_CONFIRM_DELAY_US);
        if observed.has_status_decoder() {
            self.query(REG_STATUS)?;
            self.capture_home();
        }
        Ok(())
    }
}
