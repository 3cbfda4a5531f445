use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Display name, shown when cycling themes
    pub name: &'static str,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Inert (black) cell fill
    pub block: Color,
    /// Typed letter color
    pub letter: Color,
    /// Letters filled by a hint
    pub revealed: Color,
    /// Clue number color
    pub number: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Highlighted cells (active word)
    pub highlight_bg: Color,
    /// Error color
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            block: Color::Rgb { r: 45, g: 48, b: 60 },
            letter: Color::Rgb { r: 255, g: 255, b: 255 },
            revealed: Color::Rgb { r: 200, g: 150, b: 255 },
            number: Color::Rgb { r: 130, g: 140, b: 170 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 35, g: 40, b: 55 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            block: Color::Rgb { r: 60, g: 60, b: 80 },
            letter: Color::Rgb { r: 0, g: 0, b: 0 },
            revealed: Color::Rgb { r: 120, g: 60, b: 180 },
            number: Color::Rgb { r: 110, g: 110, b: 130 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            highlight_bg: Color::Rgb { r: 225, g: 230, b: 250 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "High contrast",
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            block: Color::DarkGrey,
            letter: Color::White,
            revealed: Color::Magenta,
            number: Color::Yellow,
            selected_bg: Color::Blue,
            highlight_bg: Color::Rgb { r: 30, g: 30, b: 30 },
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// The theme after this one, wrapping around
    pub fn next(&self) -> Self {
        match self.name {
            "Dark" => Self::light(),
            "Light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}
