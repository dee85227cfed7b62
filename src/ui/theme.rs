use ratatui::style::Color;

use crate::config::ColorsConfig;

/// Resolved palette for all widgets. Chart line colors come from config;
/// the rest follows the chosen base theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub table_header_fg: Color,
    pub row_highlight_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub cpu_line: Color,
    pub mem_line: Color,
}

impl Theme {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        let mut theme = match colors.theme.as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        };
        if let Some(cpu) = parse_hex_color(&colors.cpu_line) {
            theme.cpu_line = cpu;
        }
        if let Some(mem) = parse_hex_color(&colors.mem_line) {
            theme.mem_line = mem;
        }
        theme
    }

    fn dark() -> Self {
        Theme {
            surface_bg: Color::Rgb(24, 24, 32),
            text_primary: Color::Rgb(220, 220, 228),
            text_secondary: Color::Rgb(140, 140, 156),
            overlay_border: Color::Rgb(90, 90, 110),
            header_accent_fg: Color::Rgb(24, 24, 32),
            header_accent_bg: Color::Rgb(137, 180, 250),
            gauge_filled: Color::Rgb(76, 175, 80),
            gauge_unfilled: Color::Rgb(50, 50, 62),
            table_header_fg: Color::Rgb(137, 180, 250),
            row_highlight_bg: Color::Rgb(55, 55, 75),
            pill_key_fg: Color::Rgb(24, 24, 32),
            pill_key_bg: Color::Rgb(140, 140, 156),
            pill_desc_fg: Color::Rgb(170, 170, 184),
            status_ok: Color::Rgb(120, 200, 120),
            status_err: Color::Rgb(220, 110, 110),
            cpu_line: Color::Rgb(33, 150, 243),
            mem_line: Color::Rgb(76, 175, 80),
        }
    }

    fn light() -> Self {
        Theme {
            surface_bg: Color::Rgb(245, 245, 248),
            text_primary: Color::Rgb(30, 30, 38),
            text_secondary: Color::Rgb(110, 110, 126),
            overlay_border: Color::Rgb(160, 160, 176),
            header_accent_fg: Color::Rgb(245, 245, 248),
            header_accent_bg: Color::Rgb(25, 118, 210),
            gauge_filled: Color::Rgb(56, 142, 60),
            gauge_unfilled: Color::Rgb(210, 210, 220),
            table_header_fg: Color::Rgb(25, 118, 210),
            row_highlight_bg: Color::Rgb(200, 210, 230),
            pill_key_fg: Color::Rgb(245, 245, 248),
            pill_key_bg: Color::Rgb(110, 110, 126),
            pill_desc_fg: Color::Rgb(70, 70, 86),
            status_ok: Color::Rgb(46, 125, 50),
            status_err: Color::Rgb(183, 28, 28),
            cpu_line: Color::Rgb(33, 150, 243),
            mem_line: Color::Rgb(76, 175, 80),
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_prefixed_and_bare() {
        assert_eq!(parse_hex_color("#2196f3"), Some(Color::Rgb(33, 150, 243)));
        assert_eq!(parse_hex_color("4caf50"), Some(Color::Rgb(76, 175, 80)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("nonsense"), None);
    }

    #[test]
    fn config_overrides_chart_lines() {
        let colors = ColorsConfig {
            theme: "dark".to_string(),
            cpu_line: "#ff0000".to_string(),
            mem_line: "bogus".to_string(),
        };
        let theme = Theme::from_config(&colors);
        assert_eq!(theme.cpu_line, Color::Rgb(255, 0, 0));
        // Unparsable override keeps the theme default.
        assert_eq!(theme.mem_line, Color::Rgb(76, 175, 80));
    }
}
