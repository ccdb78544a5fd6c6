/// Controller data after it has been deserialized, in a shape shared by
/// every supported peripheral.
///
/// Buttons are active-high here: the wire format is active-low and the
/// decoders invert it. Analog axes are stored as signed integers wide
/// enough to hold both the raw wire value and a signed difference from a
/// home position, so the same type serves the current, home and relative
/// views of a device.
///
/// Peripherals without a given input leave its field at the default: a
/// Nunchuk never sets the d-pad, a Classic Controller never sets the C
/// button, and nothing sets the gyro axes today.
#[cfg_attr(feature = "defmt_print", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtReading {
    pub joystick_left_x: i16,
    pub joystick_left_y: i16,
    pub joystick_right_x: i16,
    pub joystick_right_y: i16,
    pub trigger_left: i8,
    pub trigger_right: i8,
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
    pub gyro_x: i16,
    pub gyro_y: i16,
    pub gyro_z: i16,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub button_a: bool,
    pub button_b: bool,
    pub button_c: bool,
    pub button_x: bool,
    pub button_y: bool,
    pub button_zl: bool,
    pub button_zr: bool,
    pub button_minus: bool,
    pub button_home: bool,
    pub button_plus: bool,
    pub button_trigger_l: bool,
    pub button_trigger_r: bool,
}

impl ExtReading {
    /// Express this reading relative to a home position.
    ///
    /// Every analog axis becomes `self - home`, which means deflecting an
    /// axis below its resting point goes negative. Digital buttons carry no
    /// meaningful difference, so the relative reading mirrors the home
    /// state; consumers of relative data are expected to read only the
    /// analog fields.
    pub fn relative_to(&self, home: &ExtReading) -> ExtReading {
        /// Just in case `data` minus `home` is out of range, perform the
        /// trigger subtraction on i16 and clamp to i8 limits before returning
        fn ext_i8_sub(a: i8, b: i8) -> i8 {
            let res = (a as i16) - (b as i16);
            res.clamp(i8::MIN as i16, i8::MAX as i16) as i8
        }

        ExtReading {
            joystick_left_x: self.joystick_left_x.saturating_sub(home.joystick_left_x),
            joystick_left_y: self.joystick_left_y.saturating_sub(home.joystick_left_y),
            joystick_right_x: self.joystick_right_x.saturating_sub(home.joystick_right_x),
            joystick_right_y: self.joystick_right_y.saturating_sub(home.joystick_right_y),
            trigger_left: ext_i8_sub(self.trigger_left, home.trigger_left),
            trigger_right: ext_i8_sub(self.trigger_right, home.trigger_right),
            accel_x: self.accel_x.saturating_sub(home.accel_x),
            accel_y: self.accel_y.saturating_sub(home.accel_y),
            accel_z: self.accel_z.saturating_sub(home.accel_z),
            gyro_x: self.gyro_x.saturating_sub(home.gyro_x),
            gyro_y: self.gyro_y.saturating_sub(home.gyro_y),
            gyro_z: self.gyro_z.saturating_sub(home.gyro_z),
            dpad_up: home.dpad_up,
            dpad_down: home.dpad_down,
            dpad_left: home.dpad_left,
            dpad_right: home.dpad_right,
            button_a: home.button_a,
            button_b: home.button_b,
            button_c: home.button_c,
            button_x: home.button_x,
            button_y: home.button_y,
            button_zl: home.button_zl,
            button_zr: home.button_zr,
            button_minus: home.button_minus,
            button_home: home.button_home,
            button_plus: home.button_plus,
            button_trigger_l: home.button_trigger_l,
            button_trigger_r: home.button_trigger_r,
        }
    }
}
