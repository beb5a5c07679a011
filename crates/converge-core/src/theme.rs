// File: crates/converge-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use skia_safe as skia;

use crate::config::ThemeName;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub point: skia::Color,
    pub target_line: skia::Color,
    pub probe: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            point: skia::Color::from_argb(255, 64, 160, 255),
            target_line: skia::Color::from_argb(160, 40, 200, 120),
            probe: skia::Color::from_argb(255, 255, 230, 70),
        }
    }

    pub fn light() -> Self {
        Self {
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            point: skia::Color::from_argb(255, 32, 120, 200),
            target_line: skia::Color::from_argb(160, 20, 160, 90),
            probe: skia::Color::from_argb(255, 200, 60, 60),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}
