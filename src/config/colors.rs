//! Color configuration for the TUI.

use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

/// A ratatui color that deserializes from a named color ("Cyan",
/// "darkgray") or a hex code ("#RRGGBB" / "#RGB").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ConfigColor(pub Color);

impl From<Color> for ConfigColor {
    fn from(color: Color) -> Self {
        Self(color)
    }
}

impl TryFrom<String> for ConfigColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for ConfigColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("Invalid hex color: #{hex}"));
        }
        let named = match s.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "gray" | "grey" => Color::Gray,
            "darkgray" | "darkgrey" => Color::DarkGray,
            "lightred" => Color::LightRed,
            "lightgreen" => Color::LightGreen,
            "lightyellow" => Color::LightYellow,
            "lightblue" => Color::LightBlue,
            "lightmagenta" => Color::LightMagenta,
            "lightcyan" => Color::LightCyan,
            "white" => Color::White,
            "reset" => Color::Reset,
            other => return Err(format!("Unknown color: {other}")),
        };
        Ok(Self(named))
    }
}

fn parse_hex(hex: &str) -> Option<ConfigColor> {
    let channel = |range: &str| u8::from_str_radix(range, 16).ok();
    match hex.len() {
        6 => Some(ConfigColor(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ))),
        // #RGB expands each nibble, e.g. #f00 -> #ff0000
        3 => Some(ConfigColor(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        ))),
        _ => None,
    }
}

/// All configurable TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub border: ConfigColor,
    pub tab_active: ConfigColor,
    pub tab_inactive: ConfigColor,
    pub selection_bg: ConfigColor,
    pub selection_fg: ConfigColor,
    pub title: ConfigColor,
    pub metadata: ConfigColor,
    pub host: ConfigColor,
    pub comment_author: ConfigColor,
    pub banner_fg: ConfigColor,
    pub banner_bg: ConfigColor,
    pub status_fg: ConfigColor,
    pub status_bg: ConfigColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::DarkGray.into(),
            tab_active: Color::Yellow.into(),
            tab_inactive: Color::DarkGray.into(),
            selection_bg: Color::Yellow.into(),
            selection_fg: Color::Black.into(),
            title: Color::White.into(),
            metadata: Color::DarkGray.into(),
            host: Color::Cyan.into(),
            comment_author: Color::Yellow.into(),
            banner_fg: Color::Black.into(),
            banner_bg: Color::LightYellow.into(),
            status_fg: Color::White.into(),
            status_bg: Color::DarkGray.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!("Cyan".parse::<ConfigColor>().unwrap().0, Color::Cyan);
        assert_eq!("cyan".parse::<ConfigColor>().unwrap().0, Color::Cyan);
        assert_eq!("DARKGREY".parse::<ConfigColor>().unwrap().0, Color::DarkGray);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            "#FF8800".parse::<ConfigColor>().unwrap().0,
            Color::Rgb(255, 136, 0)
        );
        assert_eq!(
            "#f00".parse::<ConfigColor>().unwrap().0,
            Color::Rgb(255, 0, 0)
        );
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("sunset".parse::<ConfigColor>().is_err());
        assert!("#GG0000".parse::<ConfigColor>().is_err());
        assert!("#12345".parse::<ConfigColor>().is_err());
    }

    #[test]
    fn deserializes_inside_a_struct() {
        #[derive(Deserialize)]
        struct Wrapper {
            c: ConfigColor,
        }
        let w: Wrapper = toml::from_str(r##"c = "#0000ff""##).unwrap();
        assert_eq!(w.c.0, Color::Rgb(0, 0, 255));
    }
}
