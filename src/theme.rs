//! Figure themes.
//!
//! A theme decides the canvas and axes backgrounds, the colors of frames,
//! ticks and titles, and the color cycle given to series without an
//! explicit color. Names follow the terminal plotting convention:
//! `default`, `clear`, `pro`, `matrix`, `windows`, `girly`, `dark`, `retro`.

use crate::color::{spread_hues, Rgba};
use crate::error::{Error, Result};

/// Names of the built-in themes.
pub const THEME_NAMES: [&str; 8] =
    ["default", "clear", "pro", "matrix", "windows", "girly", "dark", "retro"];

/// Colors and flags applied when a figure is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Background of the whole figure (`None` = terminal default).
    pub canvas_bg: Option<Rgba>,
    /// Background inside the axes frame.
    pub axes_bg: Option<Rgba>,
    /// Frame and tick mark color.
    pub axes_fg: Option<Rgba>,
    /// Tick labels and axis labels.
    pub ticks_fg: Option<Rgba>,
    /// Title color.
    pub title_fg: Option<Rgba>,
    /// Color cycle for series without an explicit color.
    pub cycle: Vec<Rgba>,
    /// Strip every color from the output.
    pub monochrome: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            canvas_bg: None,
            axes_bg: None,
            axes_fg: None,
            ticks_fg: None,
            title_fg: None,
            cycle: vec![
                Rgba::BLUE.brighten(),
                Rgba::GREEN.brighten(),
                Rgba::RED.brighten(),
                Rgba::CYAN.brighten(),
                Rgba::MAGENTA.brighten(),
                Rgba::YELLOW,
                Rgba::ORANGE,
            ],
            monochrome: false,
        }
    }
}

impl Theme {
    /// Look up a built-in theme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] for names outside [`THEME_NAMES`].
    pub fn by_name(name: &str) -> Result<Self> {
        let base = Self { name: name.to_string(), ..Self::default() };
        let theme = match name {
            "default" => base,
            "clear" => Self { monochrome: true, ..base },
            "pro" => Self {
                canvas_bg: Some(Rgba::rgb(24, 24, 27)),
                axes_bg: Some(Rgba::rgb(24, 24, 27)),
                axes_fg: Some(Rgba::rgb(110, 110, 120)),
                ticks_fg: Some(Rgba::rgb(200, 200, 205)),
                title_fg: Some(Rgba::WHITE),
                cycle: vec![
                    Rgba::RED.brighten(),
                    Rgba::CYAN.brighten(),
                    Rgba::YELLOW,
                    Rgba::GREEN.brighten(),
                    Rgba::MAGENTA.brighten(),
                ],
                ..base
            },
            "matrix" => {
                let green = Rgba::rgb(0, 255, 65);
                Self {
                    canvas_bg: Some(Rgba::BLACK),
                    axes_bg: Some(Rgba::BLACK),
                    axes_fg: Some(Rgba::rgb(0, 143, 17)),
                    ticks_fg: Some(green),
                    title_fg: Some(green),
                    cycle: vec![green, Rgba::rgb(0, 190, 50), Rgba::rgb(150, 255, 150)],
                    ..base
                }
            }
            "windows" => Self {
                canvas_bg: Some(Rgba::rgb(0, 120, 215)),
                axes_bg: Some(Rgba::WHITE),
                axes_fg: Some(Rgba::rgb(0, 60, 120)),
                ticks_fg: Some(Rgba::WHITE),
                title_fg: Some(Rgba::WHITE),
                cycle: vec![Rgba::rgb(0, 90, 180), Rgba::RED, Rgba::GREEN, Rgba::MAGENTA],
                ..base
            },
            "girly" => Self {
                canvas_bg: Some(Rgba::rgb(255, 228, 240)),
                axes_bg: Some(Rgba::rgb(255, 240, 246)),
                axes_fg: Some(Rgba::rgb(214, 112, 170)),
                ticks_fg: Some(Rgba::rgb(150, 40, 110)),
                title_fg: Some(Rgba::rgb(150, 40, 110)),
                cycle: vec![
                    Rgba::rgb(235, 60, 150),
                    Rgba::rgb(150, 80, 220),
                    Rgba::rgb(255, 120, 120),
                ],
                ..base
            },
            "dark" => Self {
                canvas_bg: Some(Rgba::BLACK),
                axes_bg: Some(Rgba::BLACK),
                axes_fg: Some(Rgba::GRAY),
                ticks_fg: Some(Rgba::WHITE),
                title_fg: Some(Rgba::WHITE),
                ..base
            },
            "retro" => {
                let amber = Rgba::rgb(255, 176, 0);
                Self {
                    canvas_bg: Some(Rgba::rgb(30, 20, 0)),
                    axes_bg: Some(Rgba::rgb(30, 20, 0)),
                    axes_fg: Some(Rgba::rgb(160, 110, 0)),
                    ticks_fg: Some(amber),
                    title_fg: Some(amber),
                    cycle: vec![amber, Rgba::rgb(255, 220, 120), Rgba::rgb(200, 120, 0)],
                    ..base
                }
            }
            other => return Err(Error::UnknownTheme(other.to_string())),
        };
        Ok(theme)
    }

    /// Color for the `index`-th series without an explicit color.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Rgba {
        if self.cycle.is_empty() {
            return Rgba::WHITE;
        }
        if index < self.cycle.len() {
            return self.cycle[index];
        }
        // Past the cycle: extra hues instead of repeating the first colors.
        let extra = spread_hues(index + 1, 0.7, 0.6);
        extra[index]
    }

    /// Apply the monochrome flag to a color.
    #[must_use]
    pub fn paint(&self, color: Option<Rgba>) -> Option<Rgba> {
        if self.monochrome {
            None
        } else {
            color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_named_themes_resolve() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).expect("built-in theme should exist");
            assert_eq!(theme.name, name);
            assert!(!theme.cycle.is_empty());
        }
    }

    #[test]
    fn test_unknown_theme() {
        assert!(matches!(Theme::by_name("neon"), Err(Error::UnknownTheme(n)) if n == "neon"));
    }

    #[test]
    fn test_clear_theme_strips_color() {
        let theme = Theme::by_name("clear").unwrap();
        assert_eq!(theme.paint(Some(Rgba::RED)), None);
        assert_eq!(Theme::default().paint(Some(Rgba::RED)), Some(Rgba::RED));
    }

    #[test]
    fn test_pro_theme_is_dark() {
        let theme = Theme::by_name("pro").unwrap();
        assert!(theme.canvas_bg.unwrap().luma() < 0.2);
    }

    #[test]
    fn test_series_color_cycle_extends() {
        let theme = Theme::by_name("retro").unwrap();
        assert_eq!(theme.series_color(0), theme.cycle[0]);
        let far = theme.series_color(10);
        assert!(!theme.cycle.contains(&far));
    }
}
