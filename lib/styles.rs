//! CLI styles for clap.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

pub fn styles() -> Styles {
    let bold = |c: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(c)));
    let plain = |c: AnsiColor| Style::new().fg_color(Some(Color::Ansi(c)));

    Styles::styled()
        .header(bold(AnsiColor::Yellow))
        .usage(bold(AnsiColor::Green))
        .literal(plain(AnsiColor::Cyan))
        .placeholder(plain(AnsiColor::Cyan))
        .error(bold(AnsiColor::Red))
        .invalid(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
}
