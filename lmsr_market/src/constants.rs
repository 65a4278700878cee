/// Scale of the prices returned by the contract (10^7 = probability 1).
/// Share counts and token amounts are plain base units.
pub const SCALE_FACTOR: i128 = 10_000_000; // 10^7

/// Internal fixed-point scale for the ratios `q / b`, prices, and the
/// results of `exp`/`ln` (10^18 = 1.0).
pub const PRECISION: i128 = 1_000_000_000_000_000_000; // 10^18

/// Natural log of 2 scaled (ln(2) * PRECISION).
/// ln(2) ≈ 0.693147180559945309
pub const LN2_PRECISE: i128 = 693_147_180_559_945_309;

/// Euler's number scaled (e * PRECISION).
pub const E_PRECISE: i128 = 2_718_281_828_459_045_235;

/// Inverse of Euler's number scaled (1/e * PRECISION).
pub const E_INV_PRECISE: i128 = 367_879_441_171_442_322;

/// Largest magnitude of a negative scaled exponent accepted by `exp`.
/// e^-42 is below one unit of PRECISION.
pub const MAX_EXP_INPUT: i128 = 42 * PRECISION;
