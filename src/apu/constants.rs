//! APU constants and lookup tables

/// Length counter lookup table
/// Maps the 5-bit load value written to a channel's length register to the
/// actual counter value
pub const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Duty cycle patterns for the pulse channels
/// Each row is one full 8-step cycle of the square wave
pub const DUTY_PATTERNS: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0], // 12.5%
    [0, 1, 1, 0, 0, 0, 0, 0], // 25%
    [0, 1, 1, 1, 1, 0, 0, 0], // 50%
    [1, 0, 0, 1, 1, 1, 1, 1], // 25% inverted
];

/// Triangle output sequence: 15 down to 0, then back up
pub const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11,
    12, 13, 14, 15,
];

/// Noise channel timer periods (NTSC), indexed by the 4-bit rate field
pub const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// DMC timer periods (NTSC, in divide-by-2 ticks), indexed by the rate field
pub const DMC_PERIOD_TABLE: [u8; 16] = [
    214, 190, 170, 160, 143, 127, 113, 107, 95, 80, 71, 64, 53, 42, 36, 27,
];

/// Frame sequencer step boundaries in CPU cycles, 4-step mode
pub const FRAME_4_STEP_CYCLES: [u32; 4] = [7457, 14913, 22371, 29829];

/// Total length of the 4-step sequence
pub const FRAME_4_STEP_PERIOD: u32 = 29830;

/// Frame sequencer step boundaries in CPU cycles, 5-step mode
pub const FRAME_5_STEP_CYCLES: [u32; 5] = [7457, 14913, 22371, 29829, 37281];

/// Total length of the 5-step sequence
pub const FRAME_5_STEP_PERIOD: u32 = 37282;
