use crate::error::Error;
use crate::level::{per_level, Level};

const PLAIN_LABELS: [&str; 4] = per_level!("[", "]");

/// Colored labels, indexed by color then level.
const COLORED_LABELS: [[&str; 4]; 8] = [
    per_level!("[\x1b[0;30m", "\x1b[0m]"),
    per_level!("[\x1b[0;31m", "\x1b[0m]"),
    per_level!("[\x1b[0;32m", "\x1b[0m]"),
    per_level!("[\x1b[0;33m", "\x1b[0m]"),
    per_level!("[\x1b[0;34m", "\x1b[0m]"),
    per_level!("[\x1b[0;35m", "\x1b[0m]"),
    per_level!("[\x1b[0;36m", "\x1b[0m]"),
    per_level!("[\x1b[0;37m", "\x1b[0m]"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Purple = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
        Color::White,
    ];

    /// Regular-weight foreground escape sequence.
    pub fn ansi(self) -> &'static str {
        match self {
            Color::Black => "\x1b[0;30m",
            Color::Red => "\x1b[0;31m",
            Color::Green => "\x1b[0;32m",
            Color::Yellow => "\x1b[0;33m",
            Color::Blue => "\x1b[0;34m",
            Color::Purple => "\x1b[0;35m",
            Color::Cyan => "\x1b[0;36m",
            Color::White => "\x1b[0;37m",
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Color::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidColor(value))
    }
}

/// Per-level colors plus the switch that turns them off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorConfig {
    colors: [Color; 4],
    pub enabled: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            colors: [Color::Green, Color::Yellow, Color::Red, Color::Cyan],
            enabled: true,
        }
    }
}

impl ColorConfig {
    pub fn color(&self, level: Level) -> Color {
        self.colors[level.index()]
    }

    pub fn set(&mut self, level: Level, color: Color) {
        self.colors[level.index()] = color;
    }

    /// Bracketed label for `level`, e.g. `[INFO]`, with the word wrapped in
    /// the level's color when colors are enabled.
    pub fn resolve_label(&self, level: Level) -> &'static str {
        if self.enabled {
            COLORED_LABELS[self.color(level) as usize][level.index()]
        } else {
            PLAIN_LABELS[level.index()]
        }
    }
}
