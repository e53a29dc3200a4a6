//! DLPC350 register catalog
//!
//! Addresses, command values and status bit masks from the PRO DLPC350
//! Programmer's Guide. Where the guide disagrees with what the hardware
//! actually does, the values here follow the hardware and say so.

/// Command register addresses
pub mod addr {
    /// LED PWM output polarity
    pub const LED_PWM_POLARITY: u8 = 0x0B;
    /// LED enable control
    pub const LED_ENABLE: u8 = 0x10;
    /// Hardware status (read only)
    pub const HW_STATUS: u8 = 0x20;
    /// System status (read only)
    pub const SYSTEM_STATUS: u8 = 0x21;
    /// Main status (read only)
    pub const MAIN_STATUS: u8 = 0x22;
    /// LED driver current, one byte per channel (R, G, B)
    pub const LED_CURRENT: u8 = 0x4B;
    /// Pattern sequence start/stop/pause
    pub const PATTERN_START: u8 = 0x65;
    /// Pattern exposure time and frame period
    pub const PATTERN_TIMES: u8 = 0x66;
    /// Display mode selection (video or pattern)
    pub const DISPLAY_MODE: u8 = 0x69;
    /// Pattern display data input source
    pub const PATTERN_SOURCE: u8 = 0x6F;
    /// Pattern trigger mode
    pub const PATTERN_TRIGGER: u8 = 0x70;
    /// Pattern LUT control (entry count, repeat, pattern count)
    pub const PATTERN_LUT_CTL: u8 = 0x75;
    /// Mailbox offset into the open LUT
    pub const PATTERN_LUT_OFFSET: u8 = 0x76;
    /// Mailbox access control
    pub const PATTERN_LUT_ACCESS: u8 = 0x77;
    /// Mailbox data for the open LUT
    pub const PATTERN_LUT_DATA: u8 = 0x78;
    /// Validate the pattern sequence / validation status
    pub const VALIDATE: u8 = 0x7D;
    /// Gamma correction control
    pub const GAMMA: u8 = 0x7E;
}

/// Set on a command address to start the validation command
pub const VALIDATE_COMMAND_FLAG: u8 = 0x80;

/// Command values written to the registers in [`addr`]
pub mod value {
    /// DISPLAY_MODE: continuous video from the frame buffer
    pub const DISPLAY_MODE_VIDEO: u8 = 0;
    /// DISPLAY_MODE: LUT-driven pattern sequence
    pub const DISPLAY_MODE_PATTERN: u8 = 1;

    /// PATTERN_SOURCE: patterns come from the video port
    pub const PATTERN_SOURCE_VIDEO: u8 = 0;

    /// PATTERN_TRIGGER: trigger mode 0, VSYNC drives the sequence
    pub const TRIGGER_MODE_0: u8 = 0;

    /// PATTERN_LUT_ACCESS: close the mailbox
    pub const LUT_ACCESS_CLOSED: u8 = 0;
    /// PATTERN_LUT_ACCESS: open the pattern LUT mailbox
    pub const LUT_ACCESS_PATTERN: u8 = 2;

    /// PATTERN_START: start the sequence
    ///
    /// The guide gives 0x10 here, but only the two low bits are decoded
    /// and 0b10 is what starts the sequence.
    pub const PATTERN_START: u8 = 0b10;

    /// LED_ENABLE: software control with every LED off
    pub const LEDS_DISABLED: u8 = 0x08;
    /// LED_ENABLE: LEDs driven by the sequencer
    pub const LEDS_ENABLED: u8 = 0x00;

    /// LED_PWM_POLARITY: normal polarity on this hardware
    ///
    /// The guide documents this value as inverted. It must also be written
    /// before the LED current, not after as the guide says.
    pub const PWM_POLARITY_NORMAL: u8 = 0x01;

    /// GAMMA: turn gamma correction off
    pub const GAMMA_DISABLE: u8 = 0x00;
}

/// Status bit masks
pub mod status {
    /// Ready mask passed to the bus ready-poll
    ///
    /// The DLPC350 NAKs while it is busy, so any byte it returns is a
    /// ready byte.
    pub const READY: u8 = 0x00;

    /// HW_STATUS: internal initialization completed successfully
    pub const HW_INIT_DONE: u8 = 0x01;
    /// HW_STATUS: controller/DMD mismatch, DMD reset error, forced swap
    /// error, sequencer abort or sequencer error
    pub const HW_ERROR: u8 = 0xCE;

    /// SYSTEM_STATUS: internal memory test passed
    pub const SYSTEM_MEMORY_OK: u8 = 0x01;

    /// MAIN_STATUS: DMD micromirrors parked
    pub const MAIN_DMD_PARKED: u8 = 0x01;
    /// MAIN_STATUS: sequencer running
    pub const MAIN_SEQUENCER_RUN: u8 = 0x02;
    /// MAIN_STATUS: frame buffer swap pending (video frozen)
    pub const MAIN_FB_SWAP: u8 = 0x04;
    /// MAIN_STATUS: gamma correction enabled
    pub const MAIN_GAMMA_ENABLED: u8 = 0x40;

    /// VALIDATE: validation still in progress
    pub const VALIDATE_BUSY: u8 = 0x80;
    /// VALIDATE: invalid exposure/period or invalid pattern number
    ///
    /// Bits 2-4 are warnings (trigger overlap, post-vector not inserted,
    /// period close to exposure) and do not stop the sequence.
    pub const VALIDATE_INVALID: u8 = 0x03;
    /// VALIDATE: warning flags reported alongside a valid sequence
    pub const VALIDATE_WARNINGS: u8 = 0x1C;
}

/// Pattern sequence programmed by a full pattern-mode configure
pub mod pattern {
    /// LUT control: one entry, repeat, one pattern, unused
    pub const LUT_CONTROL: [u8; 4] = [0, 1, 0, 0];

    /// Exposure time and frame period in microseconds (one 60 Hz frame)
    pub const PERIOD_US: u32 = 16_667;

    /// Internal trigger in bits 0-1
    const TRIGGER_INTERNAL: u8 = 0;
    /// Pattern number in bits 2-7
    const PATTERN_INDEX: u8 = 2;
    /// Bit depth in bits 0-3
    const BIT_DEPTH: u8 = 8;
    /// LED select in bits 4-6
    const LED_RED: u8 = 1;

    /// LUT entry: internal trigger, pattern 2, 8-bit, red LED, no options
    pub const LUT_ENTRY: [u8; 3] = [
        TRIGGER_INTERNAL | (PATTERN_INDEX << 2),
        BIT_DEPTH | (LED_RED << 4),
        0,
    ];

    /// Exposure time followed by frame period, little-endian
    pub fn times() -> [u8; 8] {
        let period = PERIOD_US.to_le_bytes();
        let mut times = [0u8; 8];
        times[..4].copy_from_slice(&period);
        times[4..].copy_from_slice(&period);
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_times_encoding() {
        assert_eq!(
            pattern::times(),
            [0x1B, 0x41, 0x00, 0x00, 0x1B, 0x41, 0x00, 0x00]
        );
    }

    #[test]
    fn test_lut_entry_encoding() {
        assert_eq!(pattern::LUT_ENTRY, [0x08, 0x18, 0x00]);
    }

    #[test]
    fn test_validate_flags_disjoint() {
        assert_eq!(status::VALIDATE_BUSY & status::VALIDATE_INVALID, 0);
        assert_eq!(status::VALIDATE_WARNINGS & status::VALIDATE_INVALID, 0);
    }
}
