//! Win celebration: a short-lived field of sparkles over the board.

use crossterm::style::Color;
use rand::Rng;

pub const SPARKLE_CHARS: &[char] = &['✦', '✧', '*', '+', '·', '˚'];

/// One sparkle, in terminal cell coordinates.
pub struct Sparkle {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub color: Color,
    ttl: u8,
}

/// Tick-driven sparkle field filling a rectangle.
pub struct Celebration {
    sparkles: Vec<Sparkle>,
    area: (u16, u16, u16, u16),
    pub frame: u32,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            sparkles: Vec::new(),
            area: (0, 0, 0, 0),
            frame: 0,
        }
    }

    /// Restart the effect over the given rectangle.
    pub fn reset(&mut self, x: u16, y: u16, width: u16, height: u16) {
        self.area = (x, y, width, height);
        self.frame = 0;
        self.sparkles.clear();
        let count = (width as usize * height as usize / 18).clamp(8, 60);
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            self.sparkles.push(Self::spawn(&mut rng, self.area));
        }
    }

    fn spawn(rng: &mut impl Rng, (x, y, w, h): (u16, u16, u16, u16)) -> Sparkle {
        let hue: (u8, u8, u8) = match rng.gen_range(0..4) {
            0 => (255, 210, 100),
            1 => (120, 200, 160),
            2 => (80, 150, 230),
            _ => (235, 120, 180),
        };
        Sparkle {
            x: x + rng.gen_range(0..w.max(1)),
            y: y + rng.gen_range(0..h.max(1)),
            ch: SPARKLE_CHARS[rng.gen_range(0..SPARKLE_CHARS.len())],
            color: Color::Rgb {
                r: hue.0,
                g: hue.1,
                b: hue.2,
            },
            ttl: rng.gen_range(4..14),
        }
    }

    /// Age every sparkle, respawning the expired ones elsewhere.
    pub fn update(&mut self) {
        self.frame += 1;
        let mut rng = rand::thread_rng();
        for sparkle in &mut self.sparkles {
            if sparkle.ttl == 0 {
                *sparkle = Self::spawn(&mut rng, self.area);
            } else {
                sparkle.ttl -= 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sparkle> + '_ {
        self.sparkles.iter()
    }
}
