//! Styling helpers for the inspector's terminal output.
//!
//! The [`LootStyle`] trait applies ANSI styling via the `colored` crate.
//! Implementations for `&str` and `String` are provided so string literals
//! can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait LootStyle {
    fn container_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn stolen_style(&self) -> ColoredString;
    fn enchant_style(&self) -> ColoredString;
    fn field_style(&self) -> ColoredString;
    fn dim_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl LootStyle for &str {
    fn container_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn stolen_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30).bold()
    }
    fn enchant_style(&self) -> ColoredString {
        self.italic().truecolor(75, 180, 255)
    }
    fn field_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75)
    }
    fn dim_style(&self) -> ColoredString {
        self.dimmed()
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl LootStyle for String {
    fn container_style(&self) -> ColoredString {
        self.as_str().container_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn stolen_style(&self) -> ColoredString {
        self.as_str().stolen_style()
    }
    fn enchant_style(&self) -> ColoredString {
        self.as_str().enchant_style()
    }
    fn field_style(&self) -> ColoredString {
        self.as_str().field_style()
    }
    fn dim_style(&self) -> ColoredString {
        self.as_str().dim_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}
