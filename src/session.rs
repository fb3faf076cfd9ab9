use std::time::Duration;

use termion::event::Key;

use crate::{
    config::MENU_POLL_INTERVAL,
    seeds::{self, CATALOG},
    sim::Speed,
    Error, Event, Keys, Pattern, Result, Screen, Sim, Size,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Intro,
    SeedSelect,
    SpeedSelect,
    Running,
    Terminated,
}

/// Drives menus and stepping from key events. Owns the simulation, borrows it
/// to the screen only for drawing.
pub struct Session<S, K>
where
    S: Screen,
    K: Keys,
{
    screen: S,
    keys: K,
    sim: Sim,
    mode: Mode,
    seed: Option<&'static Pattern>,
    auto: bool,
    notice: Option<String>,
    drawn_size: Option<Size>,
}

impl<S, K> Session<S, K>
where
    S: Screen,
    K: Keys,
{
    pub fn new(screen: S, keys: K) -> Self {
        Self {
            screen,
            keys,
            sim: Sim::new(),
            mode: Mode::Intro,
            seed: None,
            auto: false,
            notice: None,
            drawn_size: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sim(&self) -> &Sim {
        &self.sim
    }

    /// Runs until the user quits or the input closes.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("session started");
        self.enter(Mode::Intro)?;
        while self.mode != Mode::Terminated {
            self.check_geometry()?;
            let event = self.keys.next_event(Some(self.timeout()));
            self.handle(event)?;
        }
        tracing::info!(generation = self.sim.generation(), "session ended");
        Ok(())
    }

    fn timeout(&self) -> Duration {
        match self.mode {
            Mode::Running => self.sim.speed().interval(),
            _ => MENU_POLL_INTERVAL,
        }
    }

    /// A seeded grid no longer matching the display restarts from the intro,
    /// a menu is only redrawn.
    pub fn check_geometry(&mut self) -> Result<()> {
        let size = self.screen.grid_size()?;
        match self.mode {
            Mode::SpeedSelect | Mode::Running => {
                if self.sim.size().is_some_and(|current| current != size) {
                    tracing::info!(from = ?self.sim.size(), to = %size, "display resized, restarting");
                    self.enter(Mode::Intro)?;
                }
            }
            Mode::Intro | Mode::SeedSelect => {
                if self.drawn_size != Some(size) {
                    self.redraw()?;
                }
            }
            Mode::Terminated => (),
        }
        Ok(())
    }

    pub fn handle(&mut self, event: Event) -> Result<()> {
        let key = match event {
            Event::Key(key) => key,
            Event::Closed => return self.enter(Mode::Terminated),
            Event::Signal(signal) => {
                tracing::info!(signal, "terminating on signal");
                return self.enter(Mode::Terminated);
            }
            Event::Timeout => return self.on_timeout(),
        };
        if key == Key::Ctrl('c') {
            return self.enter(Mode::Terminated);
        }

        let result = match self.mode {
            Mode::Intro => self.enter(Mode::SeedSelect),
            Mode::SeedSelect => self.choose_seed(key),
            Mode::SpeedSelect => self.choose_speed(key),
            Mode::Running => self.on_running_key(key),
            Mode::Terminated => Ok(()),
        };
        match result {
            Err(error) if error.is_recoverable() => self.reprompt(error),
            result => result,
        }
    }

    fn on_timeout(&mut self) -> Result<()> {
        if self.mode == Mode::Running && self.auto {
            self.advance()?;
        }
        Ok(())
    }

    fn choose_seed(&mut self, key: Key) -> Result<()> {
        let pattern = digit(key)
            .and_then(seeds::by_key)
            .ok_or(Error::UnrecognizedInput(key))?;
        let size = self.screen.grid_size()?;
        self.sim.reset(size, pattern)?;
        self.seed = Some(pattern);
        self.enter(Mode::SpeedSelect)
    }

    fn choose_speed(&mut self, key: Key) -> Result<()> {
        let level = digit(key)
            .and_then(|digit| digit.to_digit(10))
            .ok_or(Error::UnrecognizedInput(key))?;
        self.sim.set_speed(level as u8)?;
        self.enter(Mode::Running)
    }

    fn on_running_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Char(' ') => self.advance(),
            Key::Char('a' | 'A') => {
                self.auto = !self.auto;
                tracing::info!(auto = self.auto, "auto-run toggled");
                self.render()
            }
            Key::Char('m' | 'M') => self.enter(Mode::SeedSelect),
            Key::Char('q' | 'Q') => self.enter(Mode::Terminated),
            _ => Err(Error::UnrecognizedInput(key)),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.sim.advance()?;
        self.render()
    }

    fn reprompt(&mut self, error: Error) -> Result<()> {
        match &error {
            Error::PatternTooLarge { .. } => tracing::warn!(%error, "seed rejected"),
            _ => tracing::debug!(%error, mode = ?self.mode, "input rejected"),
        }
        match self.mode {
            // the header already lists the keys
            Mode::Running => Ok(()),
            _ => {
                self.notice = Some(notice_for(&error));
                self.redraw()
            }
        }
    }

    fn enter(&mut self, mode: Mode) -> Result<()> {
        tracing::debug!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
        self.notice = None;
        match mode {
            Mode::Intro | Mode::SeedSelect => {
                self.sim.discard();
                self.seed = None;
                self.auto = false;
            }
            Mode::SpeedSelect | Mode::Running | Mode::Terminated => (),
        }
        self.redraw()
    }

    fn redraw(&mut self) -> Result<()> {
        let mut lines = match self.mode {
            Mode::Intro => intro_lines(),
            Mode::SeedSelect => seed_lines(),
            Mode::SpeedSelect => speed_lines(),
            Mode::Running => return self.render(),
            Mode::Terminated => return Ok(()),
        };
        if let Some(notice) = &self.notice {
            lines.push(notice.clone());
        }
        lines.push(String::new());
        self.screen.show_menu(&lines)?;
        self.drawn_size = Some(self.screen.grid_size()?);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let header = self.header();
        let grid = self.sim.grid().ok_or(Error::NotSeeded)?;
        self.screen.show_grid(grid, &header)
    }

    fn header(&self) -> String {
        let auto = if self.auto { "Stop: A" } else { "Auto: A" };
        let seed = self.seed.map_or("", |pattern| pattern.name);
        let mut header = format!(
            "Generate Life: Hold Spacebar    {auto}    Main Menu: M    Quit: Q    {seed} gen {}",
            self.sim.generation()
        );
        match self.sim.period() {
            Some(1) => header += " (still)",
            Some(period) => header += &format!(" (period {period})"),
            None => (),
        }
        header
    }
}

fn digit(key: Key) -> Option<char> {
    match key {
        Key::Char(c) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

fn notice_for(error: &Error) -> String {
    match error {
        Error::PatternTooLarge { name, .. } => format!("{name} does not fit this window."),
        _ => "Press one of the listed keys.".to_string(),
    }
}

const TITLE: &str = "Conway's Game of Life";

fn intro_lines() -> Vec<String> {
    vec![
        TITLE.to_string(),
        "\u{25A0} \u{25A0} \u{25A0} \u{25A0} \u{25A0} \u{25A0} \u{25A0}".to_string(),
        "Press any key to continue.".to_string(),
    ]
}

fn seed_lines() -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), "Choose your starting seed.".to_string()];
    lines.extend(
        CATALOG
            .iter()
            .enumerate()
            .map(|(index, pattern)| format!("{}    {:<20}", index + 1, pattern.name)),
    );
    lines
}

fn speed_lines() -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), "Choose your speed.".to_string()];
    lines.extend(
        Speed::ALL
            .iter()
            .enumerate()
            .map(|(index, speed)| format!("{}    {:<7}", index + 1, speed.name())),
    );
    lines
}
