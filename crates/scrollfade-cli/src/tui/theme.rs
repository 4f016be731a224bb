//! Page colours and opacity blending
//!
//! Terminals have no alpha channel, so opacity is rendered by mixing the
//! foreground towards the background in linear light.

use palette::{LinSrgb, Mix, Srgb};
use ratatui::style::Color;

pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub bg: Rgb,
    pub text: Rgb,
    pub heading: Rgb,
    pub accent: Rgb,
    pub dim: Rgb,
    pub status_bg: Rgb,
    pub scrollbar_thumb: Rgb,
    pub scrollbar_track: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: (14, 16, 22),
            text: (198, 204, 214),
            heading: (245, 247, 250),
            accent: (255, 153, 102),
            dim: (110, 118, 132),
            status_bg: (26, 29, 38),
            scrollbar_thumb: (150, 158, 172),
            scrollbar_track: (44, 48, 60),
        }
    }
}

impl Theme {
    /// `color` faded against the page background
    pub fn faded(&self, color: Rgb, opacity: f64) -> Color {
        blend(color, self.bg, opacity)
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Mix `fg` over `bg`; `opacity` 0 is pure background, 1 is pure foreground
pub fn blend(fg: Rgb, bg: Rgb, opacity: f64) -> Color {
    if opacity.is_nan() || opacity <= 0.0 {
        return rgb(bg);
    }
    if opacity >= 1.0 {
        return rgb(fg);
    }

    let fg: LinSrgb<f32> = Srgb::new(fg.0, fg.1, fg.2).into_format::<f32>().into_linear();
    let bg: LinSrgb<f32> = Srgb::new(bg.0, bg.1, bg.2).into_format::<f32>().into_linear();
    let mixed: Srgb<f32> = Srgb::from_linear(bg.mix(fg, opacity as f32));
    let out: Srgb<u8> = mixed.into_format();
    Color::Rgb(out.red, out.green, out.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(color: Color) -> Rgb {
        match color {
            Color::Rgb(r, g, b) => (r, g, b),
            other => panic!("expected rgb, got {other:?}"),
        }
    }

    #[test]
    fn test_blend_endpoints() {
        let fg = (240, 120, 60);
        let bg = (10, 10, 10);
        assert_eq!(channels(blend(fg, bg, 1.0)), fg);
        assert_eq!(channels(blend(fg, bg, 0.0)), bg);
        assert_eq!(channels(blend(fg, bg, f64::NAN)), bg);
    }

    #[test]
    fn test_blend_midpoint_is_between() {
        let (r, g, b) = channels(blend((255, 255, 255), (0, 0, 0), 0.5));
        assert!(r > 0 && r < 255);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_more_opacity_is_closer_to_foreground() {
        let theme = Theme::default();
        let low = channels(theme.faded(theme.heading, 0.2)).0;
        let high = channels(theme.faded(theme.heading, 0.8)).0;
        assert!(high > low);
    }
}
