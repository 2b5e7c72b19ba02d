//! User-facing status lines: `[tag] message`.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, StyledContent, Stylize};

fn line(out: &mut impl Write, tag: StyledContent<&str>, msg: &str) -> io::Result<()> {
    queue!(out, Print("["), PrintStyledContent(tag), Print("] "), Print(msg), Print("\n"))?;
    out.flush()
}

pub fn info(out: &mut impl Write, msg: &str) -> io::Result<()> {
    line(out, "*".cyan(), msg)
}

pub fn success(out: &mut impl Write, msg: &str) -> io::Result<()> {
    line(out, "!".green(), msg)
}

pub fn warning(out: &mut impl Write, msg: &str) -> io::Result<()> {
    line(out, "Warn".yellow(), msg)
}

pub fn error(out: &mut impl Write, msg: &str) -> io::Result<()> {
    line(out, "Error".red(), msg)
}

/// An indented continuation line under a notice.
pub fn detail(out: &mut impl Write, msg: &str) -> io::Result<()> {
    queue!(out, Print("   "), Print(msg), Print("\n"))?;
    out.flush()
}
