//! Conversions from user units to OOXML native units

/// Twips per centimeter (1 twip = 1/20 pt, 1 cm ≈ 567 twips)
pub const TWIPS_PER_CM: f64 = 567.0;

/// Twips per point
pub const TWIPS_PER_POINT: f64 = 20.0;

/// `w:spacing/@w:line` value for single line height
pub const SINGLE_LINE: f64 = 240.0;

/// Centimeters to twips, truncated toward negative infinity
pub fn cm_to_twips(cm: f64) -> i32 {
    (cm * TWIPS_PER_CM).floor() as i32
}

/// Font size in points to half-points (`w:sz`)
pub fn pt_to_half_points(pt: f64) -> u32 {
    (pt * 2.0).round().max(0.0) as u32
}

/// Paragraph spacing in points to twips
pub fn pt_to_twips(pt: f64) -> u32 {
    (pt * TWIPS_PER_POINT).round().max(0.0) as u32
}

/// Line height multiplier to 240ths of a line
pub fn line_height_to_native(multiplier: f64) -> u32 {
    (multiplier * SINGLE_LINE).round().max(0.0) as u32
}

/// Hex color without its leading `#`. Not validated.
pub fn bare_hex(color: &str) -> &str {
    color.strip_prefix('#').unwrap_or(color)
}
