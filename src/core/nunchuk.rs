// Nunchuk report layouts:
// http://wiibrew.org/wiki/Wiimote/Extension_Controllers/Nunchuck
//
// The Nunchuk reports a 10-bit accelerometer: eight high bits per axis in
// bytes 2-4, low bit pairs packed into byte 5 next to the C/Z buttons.
// When relayed through a Motion Plus, one low bit per axis is given up to
// make room for the extension-connected flag.

use crate::core::{ExtReading, ExtReport};

/// Convert raw data as returned from a directly-attached Nunchuk into
/// buttons and axis fields
#[rustfmt::skip]
pub(crate) fn decode_nunchuk_report(data: &ExtReport) -> ExtReading {
    // Direct mode:
    //  Bit  7   6   5   4   3   2   1   0
    //  Byte
    //  0    SX<7:0>
    //  1    SY<7:0>
    //  2    AX<9:2>
    //  3    AY<9:2>
    //  4    AZ<9:2>
    //  5    AZ<1:0>  AY<1:0>  AX<1:0>  BC  BZ
    let button_z = data[5] & 0b0000_0001 == 0;
    let joystick_x = data[0] as i16;
    let joystick_y = data[1] as i16;
    ExtReading {
        joystick_left_x:  joystick_x,
        joystick_left_y:  joystick_y,
        // mirror the only stick onto both sides so consumers stay uniform
        joystick_right_x: joystick_x,
        joystick_right_y: joystick_y,
        accel_x: ((data[2] as i16) << 2) | ((data[5] >> 2) & 0b11) as i16,
        accel_y: ((data[3] as i16) << 2) | ((data[5] >> 4) & 0b11) as i16,
        accel_z: ((data[4] as i16) << 2) | ((data[5] >> 6) & 0b11) as i16,
        button_c: data[5] & 0b0000_0010 == 0,
        // Z acts as the shoulder trigger, mirrored like the stick
        button_zl: button_z,
        button_zr: button_z,
        ..ExtReading::default()
    }
}

/// Convert raw data as returned from a Nunchuk relayed through a Motion
/// Plus into buttons and axis fields
#[rustfmt::skip]
pub(crate) fn decode_nunchuk_passthrough_report(data: &ExtReport) -> ExtReading {
    // Pass-through mode trades the accelerometer LSBs for the
    // extension-connected flag (EXT):
    //  Bit  7   6   5   4   3   2   1   0
    //  Byte
    //  0    SX<7:0>
    //  1    SY<7:0>
    //  2    AX<9:2>
    //  3    AY<9:2>
    //  4    AZ<9:3> (7 bits)
    //  5    AZ<2:1>  -  AY<1>  AX<1>  EXT  BC  BZ
    // Reconstructed axes keep bit 0 clear - that is the bit sacrificed
    // for pass-through.
    let button_z = data[5] & 0b0000_0001 == 0;
    let joystick_x = data[0] as i16;
    let joystick_y = data[1] as i16;
    ExtReading {
        joystick_left_x:  joystick_x,
        joystick_left_y:  joystick_y,
        joystick_right_x: joystick_x,
        joystick_right_y: joystick_y,
        accel_x: ((data[2] as i16) << 2) | ((((data[5] >> 3) & 0b1) as i16) << 1),
        accel_y: ((data[3] as i16) << 2) | ((((data[5] >> 4) & 0b1) as i16) << 1),
        accel_z: (((data[4] & 0x7F) as i16) << 2) | ((((data[5] >> 6) & 0b11) as i16) << 1),
        button_c: data[5] & 0b0000_0010 == 0,
        button_zl: button_z,
        button_zr: button_z,
        ..ExtReading::default()
    }
}
