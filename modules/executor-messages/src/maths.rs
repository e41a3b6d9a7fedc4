//! Fee arithmetic.

/// Fee scale: 100_000 deci-basis-points = 100%.
pub const DBPS_SCALE: u64 = 100_000;

/// Calculates the percentage fee amount.
///
/// `dbps` is the fee in tenths of basis points. The intermediate
/// product is computed in `u128` so the result is exact for the full
/// `u64` amount range.
pub fn calculate_fee(amount: u64, dbps: u16) -> u64 {
    ((amount as u128 * dbps as u128) / DBPS_SCALE as u128) as u64
}
