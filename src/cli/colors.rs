//! To maintain a theme of colors, I will add colors here as constants so
//! the UI does not look bad at any point.
//!
//! - RELALG_TEAL: Main Color
//! - WARN_AMBER: Warnings and errors

use colored::Color;

pub(crate) const RELALG_TEAL: Color = Color::TrueColor {
    r: 0,
    g: 170,
    b: 170,
};

pub(crate) const WARN_AMBER: Color = Color::TrueColor {
    r: 255,
    g: 176,
    b: 0,
};
