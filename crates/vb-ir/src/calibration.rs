//! Note to pitch-CV calibration tables.
//!
//! Measured by hand on the prototype for notes 36-71. Entries outside that
//! range are zero, which parks the oscillator at the bottom of its range.

use core::ops::RangeInclusive;

/// Notes covered by the calibration measurements.
pub const CALIBRATED_NOTES: RangeInclusive<u8> = 36..=71;

const FIRST_CALIBRATED: usize = 36;

const MEASURED: [u16; 36] = [
    442, 483, 525, 570, 612, 657, 701, 745, 787, 833, 874, 918, // 36-47
    961, 1003, 1048, 1091, 1134, 1179, 1222, 1265, 1311, 1357, 1396, 1441, // 48-59
    1486, 1530, 1575, 1613, 1658, 1703, 1746, 1792, 1838, 1881, 1917, 1963, // 60-71
];

const fn expand(measured: [u16; 36]) -> [u16; 128] {
    let mut table = [0u16; 128];
    let mut i = 0;
    while i < measured.len() {
        table[FIRST_CALIBRATED + i] = measured[i];
        i += 1;
    }
    table
}

/// DAC codes for VCO-A (13700).
pub static VCO_13700_CV: [u16; 128] = expand(MEASURED);

/// DAC codes for VCO-B (3340).
pub static VCO_3340_CV: [u16; 128] = expand(MEASURED);

/// DAC code for `note`; 0 for anything outside the table.
pub fn resolve_cv(table: &[u16; 128], note: u8) -> u16 {
    table.get(note as usize).copied().unwrap_or(0)
}
