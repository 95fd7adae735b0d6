//! Colors and text attributes as painted into cells.
//!
//! `Color` deliberately stays a small closed enum: the terminal default, the
//! 256-color palette, and truecolor. Conversion to escape-sequence bytes is a
//! pure function living in `render::ansi` so nothing here touches I/O.

use std::str::FromStr;

use crate::error::StyleError;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Let the terminal pick its configured default.
    #[default]
    Default,
    /// Palette color 0-255.
    Ansi(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Ansi(0);
    pub const RED: Self = Self::Ansi(1);
    pub const GREEN: Self = Self::Ansi(2);
    pub const YELLOW: Self = Self::Ansi(3);
    pub const BLUE: Self = Self::Ansi(4);
    pub const MAGENTA: Self = Self::Ansi(5);
    pub const CYAN: Self = Self::Ansi(6);
    pub const WHITE: Self = Self::Ansi(7);

    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || StyleError::BadValue {
            property: "color".into(),
            value: s.into(),
        };

        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "default" | "inherit" => return Ok(Color::Default),
            "black" => return Ok(Color::BLACK),
            "red" => return Ok(Color::RED),
            "green" => return Ok(Color::GREEN),
            "yellow" => return Ok(Color::YELLOW),
            "blue" => return Ok(Color::BLUE),
            "magenta" => return Ok(Color::MAGENTA),
            "cyan" => return Ok(Color::CYAN),
            "white" => return Ok(Color::WHITE),
            _ => {}
        }

        if let Some(hex) = t.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(bad());
            }
            let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| bad())?;
            let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| bad())?;
            let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| bad())?;
            return Ok(Color::Rgb(r, g, b));
        }

        t.parse::<u8>().map(Color::Ansi).map_err(|_| bad())
    }
}

bitflags::bitflags! {
    /// Text attributes (SGR).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE      = 0;
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK     = 1 << 4;
        const INVERSE   = 1 << 5;
        const STRIKE    = 1 << 6;
    }
}

/// The resolved visual style of one screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl CellStyle {
    pub const DEFAULT: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attr::NONE,
    };

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::NONE,
        }
    }

    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("Default".parse::<Color>().unwrap(), Color::Default);
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::Rgb(255, 128, 0));
        assert_eq!("208".parse::<Color>().unwrap(), Color::Ansi(208));
    }

    #[test]
    fn rejects_garbage() {
        assert!("#ff80".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }
}
