// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt, str::FromStr};

use ratatui::style::{Color, Modifier, Style};

use crate::model::FaultIndicator;
use crate::ui::Severity;

const PALETTE_ENV: &str = "BMS_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: TuiPalette,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?.unwrap_or_default();
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg)
    }

    pub(crate) fn panel_border_style(&self, front: bool, dragging: bool) -> Style {
        if dragging {
            self.base_style().fg(self.palette.accent).add_modifier(Modifier::BOLD)
        } else if front {
            self.base_style().fg(self.palette.warning)
        } else {
            self.base_style().fg(self.palette.muted)
        }
    }

    pub(crate) fn minimized_style(&self, front: bool) -> Style {
        let style = self.base_style().add_modifier(Modifier::REVERSED);
        if front {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub(crate) fn button_style(&self) -> Style {
        self.base_style().fg(self.palette.accent)
    }

    pub(crate) fn indicator_style(&self, indicator: FaultIndicator) -> Style {
        match indicator {
            FaultIndicator::Normal => self.base_style().fg(self.palette.normal),
            FaultIndicator::Fault => {
                self.base_style().fg(self.palette.fault).add_modifier(Modifier::BOLD)
            }
        }
    }

    pub(crate) fn severity_style(&self, severity: Severity) -> Style {
        let fg = match severity {
            Severity::Success => self.palette.normal,
            Severity::Info => self.palette.accent,
            Severity::Warning => self.palette.warning,
            Severity::Danger => self.palette.fault,
        };
        self.base_style().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn dim_style(&self) -> Style {
        self.base_style().fg(self.palette.muted)
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style().fg(self.palette.accent).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn header_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }
}

/// Semantic colors. `BMS_TUI_PALETTE` overrides all of them at once.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    normal: Color,
    fault: Color,
    warning: Color,
    accent: Color,
    muted: Color,
}

impl Default for TuiPalette {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            normal: Color::LightGreen,
            fault: Color::LightRed,
            warning: Color::Yellow,
            accent: Color::Cyan,
            muted: Color::DarkGray,
        }
    }
}

impl TuiPalette {
    const FIELDS: [&'static str; 7] = ["fg", "bg", "normal", "fault", "warning", "accent", "muted"];

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::FIELDS.len() {
            return Err(format!(
                "expected {} comma-separated colors ({}), got {}",
                Self::FIELDS.len(),
                Self::FIELDS.join(","),
                parts.len()
            ));
        }

        let mut colors = [Color::Reset; 7];
        for ((slot, part), field) in colors.iter_mut().zip(&parts).zip(Self::FIELDS) {
            *slot = Color::from_str(part).map_err(|_| format!("invalid {field} color: {part}"))?;
        }
        let [fg, bg, normal, fault, warning, accent, muted] = colors;
        Ok(Self { fg, bg, normal, fault, warning, accent, muted })
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_string(),
                value: "<non-unicode>".to_string(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    TuiPalette::parse_csv(trimmed).map(Some).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_string(),
        value: format!("{trimmed} ({error})"),
    })
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{TuiPalette, TuiTheme};
    use crate::model::FaultIndicator;

    #[test]
    fn palette_override_parses_names_and_hex() {
        let palette =
            TuiPalette::parse_csv("white, #101010, green, #ff0000, yellow, cyan, darkgray")
                .expect("palette");

        assert_eq!(palette.fg, Color::White);
        assert_eq!(palette.bg, Color::Rgb(0x10, 0x10, 0x10));
        assert_eq!(palette.fault, Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.muted, Color::DarkGray);
    }

    #[test]
    fn palette_override_rejects_wrong_arity_and_bad_colors() {
        let err = TuiPalette::parse_csv("red,green").unwrap_err();
        assert!(err.contains("expected 7"));

        let err = TuiPalette::parse_csv("white,black,green,nope,yellow,cyan,gray").unwrap_err();
        assert!(err.contains("invalid fault color"));
    }

    #[test]
    fn fault_indicator_colors_differ() {
        let theme = TuiTheme::default();
        assert_ne!(
            theme.indicator_style(FaultIndicator::Fault),
            theme.indicator_style(FaultIndicator::Normal)
        );
    }
}
