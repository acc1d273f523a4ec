use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour scale for correlation coefficients
// ---------------------------------------------------------------------------

/// Endpoints of the "coolwarm" scale at -1, 0 and +1.
const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Fill used for undefined (NaN) coefficients.
pub const UNDEFINED_COLOR: Color32 = Color32::from_gray(90);

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Map a coefficient in `[-1, 1]` to a blue → grey → red colour.
/// Values outside the range are clamped.
pub fn coolwarm(value: f64) -> Color32 {
    if !value.is_finite() {
        return UNDEFINED_COLOR;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let mixed = if t < 0.0 {
        linear(NEUTRAL).mix(linear(COOL), -t)
    } else {
        linear(NEUTRAL).mix(linear(WARM), t)
    };
    let srgb: Srgb = Srgb::from_linear(mixed);
    let rgb: Srgb<u8> = srgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Annotation colour that stays readable on top of `coolwarm(value)`.
pub fn label_color(value: f64) -> Color32 {
    if !value.is_finite() || value.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
