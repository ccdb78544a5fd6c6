/// Payload validation and descrambling
pub mod codec;
/// Classic Controller data decoding
pub mod classic;
/// Nunchuk data decoding
pub mod nunchuk;
/// Uniform controller reading + relative tracking
pub mod snapshot;

pub use snapshot::ExtReading;

/// Standard input report
pub type ExtReport = [u8; 6];
/// Controller ID report
pub type IdReport = [u8; 6];

/// Largest parameter response the driver models (the calibration block)
pub const MAX_PAYLOAD: usize = 20;

/// All Wii extension controllers use i2c address 0x52
pub const EXT_I2C_ADDR: u8 = 0x52;
/// The Motion Plus base device answers at 0x53 instead
pub const MOTION_PLUS_I2C_ADDR: u8 = 0x53;

/// Status report register, 6 byte response
pub const REG_STATUS: u8 = 0x00;
/// Calibration block register, 20 byte response
pub const REG_CALIBRATION: u8 = 0x20;
/// Identity blob register, 6 byte response
pub const REG_DEVICE_TYPE: u8 = 0xFA;

/// The peripheral needs an explicit STOP between the register-select write
/// and the read phase, plus a short gap - it holds SDA low for several
/// milliseconds after a repeated START
pub const INTERPHASE_DELAY_US: u32 = 1_000;
/// Idle time after the read phase before the next transaction may start
pub const POST_READ_DELAY_US: u32 = 10_000;
/// Settle time after each configuration register write
pub const CONFIG_STEP_DELAY_US: u32 = 20_000;
/// Settle time between a confirmed identity read and the first status poll
pub const ID_CONFIRM_DELAY_US: u32 = 10_000;
/// Gap between connection attempts
pub const CONNECT_RETRY_DELAY_US: u32 = 500_000;

/// Connection attempts before giving up on bring-up
pub const MAX_CONNECT_ATTEMPTS: u8 = 5;
/// Consecutive query failures tolerated before the peripheral is reconfigured
pub const RECONFIG_THRESHOLD: u8 = 3;
/// Consecutive query failures tolerated before the device is taken offline
pub const DISABLE_THRESHOLD: u8 = 20;

#[cfg_attr(feature = "defmt_print", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerType {
    /// Nothing identified yet (also the "accept whatever is attached" wildcard
    /// when used as the expected kind)
    Unknown,
    /// Identity read succeeded but the blob is not in the identity table
    Unsupported,
    Nunchuk,
    Classic,
    MotionPlus,
    /// Motion Plus relaying an attached Nunchuk
    MotionPlusNunchuk,
    /// Motion Plus relaying an attached Classic Controller
    MotionPlusClassic,
}

impl ControllerType {
    /// Bus address the peripheral answers at
    pub fn bus_address(&self) -> u8 {
        match self {
            ControllerType::MotionPlus => MOTION_PLUS_I2C_ADDR,
            _ => EXT_I2C_ADDR,
        }
    }

    /// Classic variants need the clear-text handshake re-issued before every
    /// status poll, or they intermittently return stale data
    pub fn is_classic(&self) -> bool {
        matches!(
            self,
            ControllerType::Classic | ControllerType::MotionPlusClassic
        )
    }

    /// Whether a status report from this peripheral can be decoded.
    ///
    /// A Motion Plus without a relayed extension reports gyro data in a
    /// format this driver does not decode yet.
    pub fn has_status_decoder(&self) -> bool {
        matches!(
            self,
            ControllerType::Nunchuk
                | ControllerType::Classic
                | ControllerType::MotionPlusNunchuk
                | ControllerType::MotionPlusClassic
        )
    }
}

/// Driver lifecycle state
#[cfg_attr(feature = "defmt_print", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceStatus {
    #[default]
    Uninitialized,
    Configuring,
    Active,
    Disabled,
}

/// Map the identity blob read from register 0xFA to a controller type
pub fn identify_peripheral(id: &IdReport) -> ControllerType {
    match *id {
        [0x00, 0x00, 0xA4, 0x20, 0x00, 0x00] => ControllerType::Nunchuk,
        [0x00, 0x00, 0xA4, 0x20, 0x01, 0x01] => ControllerType::Classic,
        [0x00, 0x00, 0xA4, 0x20, 0x04, 0x05] => ControllerType::MotionPlus,
        [0x00, 0x00, 0xA4, 0x20, 0x05, 0x05] => ControllerType::MotionPlusNunchuk,
        [0x00, 0x00, 0xA4, 0x20, 0x07, 0x05] => ControllerType::MotionPlusClassic,
        _ => ControllerType::Unsupported,
    }
}

/// Decode a status report for the given controller type.
///
/// Returns `None` for types without a status decoder.
pub fn decode_status(kind: ControllerType, data: &ExtReport) -> Option<ExtReading> {
    match kind {
        ControllerType::Nunchuk => Some(nunchuk::decode_nunchuk_report(data)),
        ControllerType::MotionPlusNunchuk => Some(nunchuk::decode_nunchuk_passthrough_report(data)),
        ControllerType::Classic => Some(classic::decode_classic_report(data)),
        ControllerType::MotionPlusClassic => Some(classic::decode_classic_passthrough_report(data)),
        _ => None,
    }
}
