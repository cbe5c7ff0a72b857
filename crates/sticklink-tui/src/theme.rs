use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Lattice dot and grid line color
    pub lattice: Color,
    /// Target (active) point color
    pub target: Color,
    /// Placed stick color
    pub stick: Color,
    /// Selected anchor point color
    pub selected: Color,
    /// Highlighted candidate neighbor color
    pub highlight: Color,
    /// Error/rejection color
    pub error: Color,
    /// Win/success color
    pub success: Color,
    /// Panel text color
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
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            lattice: Color::Rgb { r: 90, g: 95, b: 110 },
            target: Color::Rgb { r: 235, g: 90, b: 80 },
            stick: Color::Rgb { r: 80, g: 150, b: 230 },
            selected: Color::Rgb { r: 255, g: 210, b: 100 },
            highlight: Color::Rgb { r: 120, g: 200, b: 160 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            lattice: Color::Rgb { r: 170, g: 170, b: 185 },
            target: Color::Rgb { r: 200, g: 50, b: 40 },
            stick: Color::Rgb { r: 30, g: 100, b: 200 },
            selected: Color::Rgb { r: 200, g: 120, b: 20 },
            highlight: Color::Rgb { r: 30, g: 140, b: 90 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            lattice: Color::Grey,
            target: Color::Red,
            stick: Color::Cyan,
            selected: Color::Yellow,
            highlight: Color::Green,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
