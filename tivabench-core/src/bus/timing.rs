//! Bus clock-divisor computation
//!
//! The master clock period register divides the system clock down to the
//! SCL toggle rate:
//!
//! ```text
//! divisor = system_clock / (2 * (SCL_LP + SCL_HP) * scl_clock) - 1
//! ```
//!
//! with the fixed standard-mode low/high periods `SCL_LP = 6` and
//! `SCL_HP = 4`. For a 40 MHz system clock and 100 kHz bus this yields 19.

/// Fixed SCL low period in clock units (standard mode)
pub const SCL_LP: u32 = 6;
/// Fixed SCL high period in clock units (standard mode)
pub const SCL_HP: u32 = 4;

/// The divisor register field is 7 bits wide.
const DIVISOR_MAX: u32 = 0x7F;

/// Standard-mode bus frequency (100 kHz)
pub const STANDARD_HZ: u32 = 100_000;

/// Compute the clock-divisor register value for a target bus frequency.
///
/// Pure and idempotent. When the division is inexact the divisor rounds
/// up, so the resulting SCL frequency rounds down: the bus may run slower
/// than requested but never faster than device timing margins allow.
pub const fn clock_period(system_hz: u32, bus_hz: u32) -> u8 {
    assert!(bus_hz > 0);
    let denom = 2 * (SCL_LP + SCL_HP) * bus_hz;
    let mut div = system_hz / denom;
    if system_hz % denom != 0 {
        div += 1;
    }
    // A system clock below the bus rate still needs a valid field value.
    if div == 0 {
        div = 1;
    }
    let tpr = div - 1;
    if tpr > DIVISOR_MAX {
        DIVISOR_MAX as u8
    } else {
        tpr as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_divisor_40mhz_100khz() {
        // The worked example from the peripheral documentation.
        assert_eq!(clock_period(40_000_000, STANDARD_HZ), 19);
    }

    #[test]
    fn test_other_exact_system_clocks() {
        assert_eq!(clock_period(16_000_000, STANDARD_HZ), 7);
        assert_eq!(clock_period(80_000_000, STANDARD_HZ), 39);
        // 400 kHz fast mode on a 40 MHz core
        assert_eq!(clock_period(40_000_000, 400_000), 4);
    }

    #[test]
    fn test_idempotent() {
        let a = clock_period(50_000_000, STANDARD_HZ);
        let b = clock_period(50_000_000, STANDARD_HZ);
        assert_eq!(a, b);
    }

    #[test]
    fn test_inexact_division_never_exceeds_target() {
        // 25 MHz / (20 * 100 kHz) = 12.5: divisor must round up to 13 - 1,
        // giving SCL = 25 MHz / (20 * 13) ≈ 96.2 kHz (slower, never faster).
        let tpr = clock_period(25_000_000, STANDARD_HZ);
        assert_eq!(tpr, 12);
        let actual = 25_000_000 / (2 * (SCL_LP + SCL_HP) * (tpr as u32 + 1));
        assert!(actual <= STANDARD_HZ);
    }

    #[test]
    fn test_divisor_saturates_at_field_width() {
        assert_eq!(clock_period(u32::MAX, 1_000), 0x7F);
    }
}
