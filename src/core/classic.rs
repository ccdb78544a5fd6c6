// Classic Controller report layout:
// http://wiibrew.org/wiki/Wiimote/Extension_Controllers/Classic_Controller
//
// Axis values are kept at wire resolution (6-bit left stick, 5-bit right
// stick and triggers); consumers that want deflection work from the
// relative reading, not from a rescaled absolute value.

use crate::core::{ExtReading, ExtReport};

/// Convert raw data as returned from a directly-attached Classic
/// Controller into buttons and axis fields
#[rustfmt::skip]
pub(crate) fn decode_classic_report(data: &ExtReport) -> ExtReading {
    // Direct mode:
    //  Bit  7   6   5   4   3   2   1   0
    //  Byte
    //  0    RX<4:3>  LX<5:0>
    //  1    RX<2:1>  LY<5:0>
    //  2    RX<0>  LT<4:3>  RY<4:0>
    //  3    LT<2:0>  RT<4:0>
    //  4    BDR  BDD  BLT  B-  BH  B+  BRT  1
    //  5    BZL  BB  BY  BA  BX  BZR  BDL  BDU
    ExtReading {
        joystick_left_x:  (data[0] & 0b0011_1111) as i16,
        joystick_left_y:  (data[1] & 0b0011_1111) as i16,
        joystick_right_x: ((((data[0] >> 6) & 0b11) << 3)
                         | (((data[1] >> 6) & 0b11) << 1)
                         | ((data[2] >> 7) & 0b1)) as i16,
        joystick_right_y: (data[2] & 0b0001_1111) as i16,
        trigger_left:     ((((data[2] >> 5) & 0b11) << 3)
                         | ((data[3] >> 5) & 0b111)) as i8,
        trigger_right:    (data[3] & 0b0001_1111) as i8,
        dpad_right:       data[4] & 0b1000_0000 == 0,
        dpad_down:        data[4] & 0b0100_0000 == 0,
        button_trigger_l: data[4] & 0b0010_0000 == 0,
        button_minus:     data[4] & 0b0001_0000 == 0,
        button_home:      data[4] & 0b0000_1000 == 0,
        button_plus:      data[4] & 0b0000_0100 == 0,
        button_trigger_r: data[4] & 0b0000_0010 == 0,
        button_zl:        data[5] & 0b1000_0000 == 0,
        button_b:         data[5] & 0b0100_0000 == 0,
        button_y:         data[5] & 0b0010_0000 == 0,
        button_a:         data[5] & 0b0001_0000 == 0,
        button_x:         data[5] & 0b0000_1000 == 0,
        button_zr:        data[5] & 0b0000_0100 == 0,
        dpad_left:        data[5] & 0b0000_0010 == 0,
        dpad_up:          data[5] & 0b0000_0001 == 0,
        ..ExtReading::default()
    }
}

/// Convert raw data as returned from a Classic Controller relayed through
/// a Motion Plus into buttons and axis fields
#[rustfmt::skip]
pub(crate) fn decode_classic_passthrough_report(data: &ExtReport) -> ExtReading {
    // Pass-through mode moves d-pad up/left into the low bits of the left
    // stick bytes, which lose their own bit 0:
    //  Bit  7   6   5   4   3   2   1   0
    //  Byte
    //  0    RX<4:3>  LX<5:1>  BDU
    //  1    RX<2:1>  LY<5:1>  BDL
    //  2    RX<0>  LT<4:3>  RY<4:0>
    //  3    LT<2:0>  RT<4:0>
    //  4    BDR  BDD  BLT  B-  BH  B+  BRT  1
    //  5    BZL  BB  BY  BA  BX  BZR  -  -
    ExtReading {
        joystick_left_x:  (data[0] & 0b0011_1110) as i16,
        joystick_left_y:  (data[1] & 0b0011_1110) as i16,
        joystick_right_x: ((((data[0] >> 6) & 0b11) << 3)
                         | (((data[1] >> 6) & 0b11) << 1)
                         | ((data[2] >> 7) & 0b1)) as i16,
        joystick_right_y: (data[2] & 0b0001_1111) as i16,
        trigger_left:     ((((data[2] >> 5) & 0b11) << 3)
                         | ((data[3] >> 5) & 0b111)) as i8,
        trigger_right:    (data[3] & 0b0001_1111) as i8,
        dpad_up:          data[0] & 0b0000_0001 == 0,
        dpad_left:        data[1] & 0b0000_0001 == 0,
        dpad_right:       data[4] & 0b1000_0000 == 0,
        dpad_down:        data[4] & 0b0100_0000 == 0,
        button_trigger_l: data[4] & 0b0010_0000 == 0,
        button_minus:     data[4] & 0b0001_0000 == 0,
        button_home:      data[4] & 0b0000_1000 == 0,
        button_plus:      data[4] & 0b0000_0100 == 0,
        button_trigger_r: data[4] & 0b0000_0010 == 0,
        button_zl:        data[5] & 0b1000_0000 == 0,
        button_b:         data[5] & 0b0100_0000 == 0,
        button_y:         data[5] & 0b0010_0000 == 0,
        button_a:         data[5] & 0b0001_0000 == 0,
        button_x:         data[5] & 0b0000_1000 == 0,
        button_zr:        data[5] & 0b0000_0100 == 0,
        ..ExtReading::default()
    }
}
