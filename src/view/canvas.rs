use std::io::{stdout, Stdout, Write};

use termion::{
    clear, color, cursor,
    raw::{IntoRawMode, RawTerminal},
    screen::{AlternateScreen, ToMainScreen},
    style,
};

use crate::{config::HEADER_HEIGHT, Grid, Result, Screen, Size};

const ALIVE: char = '▓';
const DEAD: char = ' ';
const DARK_GREEN: color::Rgb = color::Rgb(0, 100, 0);
const MENU_LIFT: u16 = 5;

type Out = cursor::HideCursor<AlternateScreen<RawTerminal<Stdout>>>;

/// The real terminal. Raw mode, the alternate screen and the hidden cursor
/// are held for the canvas' lifetime and restored when it drops.
pub struct Canvas {
    out: Out,
}

impl Canvas {
    pub fn open() -> Result<Self> {
        let raw = stdout().into_raw_mode()?;
        let out = cursor::HideCursor::from(AlternateScreen::from(raw));
        Ok(Self { out })
    }

    fn width(&self) -> Result<usize> {
        let (width, _) = termion::terminal_size()?;
        Ok(width as usize)
    }
}

fn restore_sequence() -> String {
    format!("{}{}{}\r\n", style::Reset, cursor::Show, ToMainScreen)
}

/// Leaves the alternate screen and shows the cursor without waiting for the
/// canvas to drop, for output that must land on the main screen.
pub fn restore_screen() {
    let mut out = stdout();
    let _ = write!(out, "{}", restore_sequence());
    let _ = out.flush();
}

/// pads `text` on both sides to `width` columns, like a centered label.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

impl Screen for Canvas {
    fn grid_size(&self) -> Result<Size> {
        let (width, height) = termion::terminal_size()?;
        Ok(Size::new(
            height.saturating_sub(HEADER_HEIGHT) as usize,
            width as usize,
        ))
    }

    fn show_menu(&mut self, lines: &[String]) -> Result<()> {
        let (width, height) = termion::terminal_size()?;
        let top = (height / 2).saturating_sub(MENU_LIFT).max(1);

        let mut result = format!("{}", clear::All);
        for (index, line) in lines.iter().enumerate() {
            let goto = cursor::Goto(1, top + index as u16);
            let weight = if index == 0 { format!("{}", style::Bold) } else { String::new() };
            let line = center(line, width as usize);
            result += &format!(
                "{goto}{weight}{}{}{line}{}",
                color::Fg(color::White),
                color::Bg(DARK_GREEN),
                style::Reset
            );
        }
        write!(self.out, "{result}")?;
        self.out.flush()?;
        Ok(())
    }

    fn show_grid(&mut self, grid: &Grid, header: &str) -> Result<()> {
        let width = self.width()?;
        let mut result = format!(
            "{}{}{}{}{}{}{}",
            clear::All,
            cursor::Goto(1, 1),
            style::Bold,
            color::Fg(color::White),
            color::Bg(DARK_GREEN),
            center(header, width),
            style::Reset
        );
        for (index, row) in grid.rows().enumerate() {
            let goto = cursor::Goto(1, HEADER_HEIGHT + 1 + index as u16);
            result += &format!(
                "{goto}{}{}{}",
                style::Bold,
                color::Fg(DARK_GREEN),
                color::Bg(color::White)
            );
            result.extend(row.iter().map(|cell| if cell.is_alive() { ALIVE } else { DEAD }));
            result += &format!("{}", style::Reset);
        }
        write!(self.out, "{result}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[test]
fn test_center() {
    assert_eq!(center("ab", 6), "  ab  ");
    assert_eq!(center("abc", 6), " abc  ");
    assert_eq!(center("abcdef", 4), "abcd");
    assert_eq!(center("", 0), "");
}

#[test]
fn test_restore_sequence() {
    let sequence = restore_sequence();
    assert!(sequence.contains(&cursor::Show.to_string()));
    assert!(sequence.contains(&ToMainScreen.to_string()));
    assert!(sequence.ends_with("\r\n"));
}
