//! General message formatting functions for prettifying the CLI.
//! Includes basic utility functions such as:
//!
//! - Highlight Text (make the text teal but not bold)
//! - System message formatting functions that produce the same
//! format messages, in the main color or the warning color.

use colored::{Color, Colorize};

use crate::cli::colors::{RELALG_TEAL, WARN_AMBER};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the main color to make it obvious.
    //!
    //! Returns a formatted string.

    format!("{}", argument.color(RELALG_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a system message according to the command line theme.
    //!
    //! Takes in a source name (like 'relalg') and the message as a formatted
    //! text; output of [`format!`].

    tagged_message(source_name, RELALG_TEAL, message)
}

pub fn warning_message(source_name: &str, message: String) -> String {
    //! Same as [`system_message`], with the source tag in the warning color.

    tagged_message(source_name, WARN_AMBER, message)
}

fn tagged_message(source_name: &str, color: Color, message: String) -> String {
    let source_formatted = format!("{:6}", source_name.color(color).bold());

    format!("[{}] {}", source_formatted, message)
}
