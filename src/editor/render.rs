//! Terminal output for the editor.
//!
//! Every function only queues commands; the editor flushes once per key.
//! Line breaks are written as `\r\n` because the terminal is in raw mode
//! while a prompt is active.

use std::io::{self, Write};

use crossterm::cursor::{MoveLeft, MoveRight};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

/// Display columns taken by `chars`.
pub fn columns(chars: &[char]) -> u16 {
    let width: usize = chars.iter().map(|c| c.width().unwrap_or(0)).sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn char_columns(c: char) -> u16 {
    columns(&[c])
}

fn move_left(out: &mut impl Write, cols: u16) -> io::Result<()> {
    // a zero count still moves one column on most terminals
    if cols > 0 {
        queue!(out, MoveLeft(cols))?;
    }
    Ok(())
}

fn move_right(out: &mut impl Write, cols: u16) -> io::Result<()> {
    if cols > 0 {
        queue!(out, MoveRight(cols))?;
    }
    Ok(())
}

fn print_chars(out: &mut impl Write, chars: &[char]) -> io::Result<()> {
    if !chars.is_empty() {
        queue!(out, Print(chars.iter().collect::<String>()))?;
    }
    Ok(())
}

pub fn prompt(out: &mut impl Write, prompt: &str) -> io::Result<()> {
    queue!(out, Print(prompt))
}

pub fn newline(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Print("\r\n"))
}

pub fn interrupted(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Print("^C\r\n"))
}

/// Echo a character inserted before `tail`, then step back over the tail.
pub fn inserted(out: &mut impl Write, c: char, tail: &[char]) -> io::Result<()> {
    queue!(out, Print(c))?;
    print_chars(out, tail)?;
    move_left(out, columns(tail))
}

/// Erase `removed` before the cursor and shift `tail` left over it.
pub fn erased(out: &mut impl Write, removed: char, tail: &[char]) -> io::Result<()> {
    move_left(out, char_columns(removed))?;
    print_chars(out, tail)?;
    queue!(out, Clear(ClearType::UntilNewLine))?;
    move_left(out, columns(tail))
}

pub fn cursor_left(out: &mut impl Write, over: char) -> io::Result<()> {
    move_left(out, char_columns(over))
}

pub fn cursor_right(out: &mut impl Write, over: char) -> io::Result<()> {
    move_right(out, char_columns(over))
}

/// Redraw the input in place. `before_cursor` is how many columns the
/// visible cursor currently sits after the prompt.
pub fn replace_line(out: &mut impl Write, before_cursor: u16, line: &[char]) -> io::Result<()> {
    move_left(out, before_cursor)?;
    queue!(out, Clear(ClearType::UntilNewLine))?;
    print_chars(out, line)
}

/// List completion candidates below the input, then start a fresh prompt.
pub fn candidates(out: &mut impl Write, names: &[String], prompt: &str, line: &[char]) -> io::Result<()> {
    queue!(out, Print("\r\n"), Print(names.join("\t")), Print("\r\n"), Print(prompt))?;
    print_chars(out, line)
}
