//! small numeric helpers

/// rounds `x` to `digits` significant figures
pub fn round_significant(x: f64, digits: u32) -> f64 {
    if x == 0.0 || !x.is_finite() || digits == 0 {
        return x;
    }
    let magnitude = x.abs().log10().floor() as i32;
    let exponent = digits as i32 - 1 - magnitude;
    // scale by an exact power of ten in both directions
    if exponent >= 0 {
        let factor = 10f64.powi(exponent);
        (x * factor).round() / factor
    } else {
        let factor = 10f64.powi(-exponent);
        (x / factor).round() * factor
    }
}
