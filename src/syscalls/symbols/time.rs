// Time constants for macOS/Darwin

use super::ConstMap;

/// Interval timer kinds for setitimer/getitimer.
pub const ITIMER_CONSTANTS: ConstMap = &[
    (0, "ITIMER_REAL"),
    (1, "ITIMER_VIRTUAL"),
    (2, "ITIMER_PROF"),
];
