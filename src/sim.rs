use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};

use metrohash::MetroBuildHasher;

use crate::{seeds::place_seed, Error, Grid, Pattern, Result, Size};

const SLOW_INTERVAL: Duration = Duration::from_millis(80);
const MEDIUM_INTERVAL: Duration = Duration::from_millis(60);
const FAST_INTERVAL: Duration = Duration::from_millis(40);
/// Longest cycle that can be confirmed cell by cell, and so reported.
const MAX_PERIOD: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Medium, Speed::Fast];

    /// levels start at 1, matching the menu keys.
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Speed::Slow),
            2 => Ok(Speed::Medium),
            3 => Ok(Speed::Fast),
            _ => Err(Error::InvalidSpeed(level)),
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Speed::Slow => SLOW_INTERVAL,
            Speed::Medium => MEDIUM_INTERVAL,
            Speed::Fast => FAST_INTERVAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Medium => "Medium",
            Speed::Fast => "Fast",
        }
    }
}

/// One seeded run: the current generation and every fingerprint seen since seeding.
/// One seeded run: the current generation, the last fingerprint of every
/// generation since seeding and the most recent grids to confirm a repeat.
#[derive(Debug)]
struct State {
    grid: Grid,
    generation: u64,
    seen: HashMap<u64, u64, MetroBuildHasher>,
    recent: VecDeque<Grid>,
    period: Option<u64>,
}

impl State {
    fn new(grid: Grid) -> Self {
        let mut seen = HashMap::default();
        seen.insert(grid.fingerprint(), 0);
        Self {
            grid,
            generation: 0,
            seen,
            recent: VecDeque::with_capacity(MAX_PERIOD),
            period: None,
        }
    }

    /// grid from `back` generations ago, if still kept.
    fn recent_grid(&self, back: u64) -> Option<&Grid> {
        let back = usize::try_from(back).ok()?;
        self.recent.len().checked_sub(back).and_then(|index| self.recent.get(index))
    }

    fn advance(&mut self) {
        let next = self.grid.step();
        self.recent.push_back(std::mem::replace(&mut self.grid, next));
        if self.recent.len() > MAX_PERIOD {
            self.recent.pop_front();
        }
        self.generation += 1;

        let fingerprint = self.grid.fingerprint();
        if let Some(last) = self.seen.insert(fingerprint, self.generation) {
            let period = self.generation - last;
            // equal fingerprints alone could be a collision
            let repeats = self.recent_grid(period) == Some(&self.grid);
            if repeats && self.period.is_none() {
                tracing::debug!(generation = self.generation, period, "run settled");
                self.period = Some(period);
            } else if !repeats {
                tracing::debug!(generation = self.generation, period, "unconfirmed repeat");
            }
        }
        tracing::trace!(generation = self.generation, fingerprint, "advanced");
    }
}

/// Owns the simulation state between the menus and the running view.
#[derive(Debug, Default)]
pub struct Sim {
    state: Option<State>,
    speed: Speed,
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run on an empty grid of `size` with `pattern` centered in it.
    /// On error the previous run, if any, is kept.
    pub fn reset(&mut self, size: Size, pattern: &Pattern) -> Result<&Grid> {
        let mut grid = Grid::new(size);
        place_seed(&mut grid, pattern)?;
        tracing::info!(pattern = pattern.name, %size, "seeded");
        let state = self.state.insert(State::new(grid));
        Ok(&state.grid)
    }

    pub fn advance(&mut self) -> Result<&Grid> {
        let state = self.state.as_mut().ok_or(Error::NotSeeded)?;
        state.advance();
        Ok(&state.grid)
    }

    pub fn set_speed(&mut self, level: u8) -> Result<Speed> {
        self.speed = Speed::from_level(level)?;
        tracing::info!(speed = self.speed.name(), "speed set");
        Ok(self.speed)
    }

    /// drops the current run, `advance` fails until the next `reset`.
    pub fn discard(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::debug!(generation = state.generation, "run discarded");
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.state.as_ref().map(|state| &state.grid)
    }

    pub fn size(&self) -> Option<Size> {
        self.grid().map(Grid::size)
    }

    pub fn generation(&self) -> u64 {
        self.state.as_ref().map_or(0, |state| state.generation)
    }

    /// cycle length once a generation repeats an earlier one, 1 for a still life.
    pub fn period(&self) -> Option<u64> {
        self.state.as_ref().and_then(|state| state.period)
    }
}
