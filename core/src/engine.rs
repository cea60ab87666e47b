use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Win/lose state machine. Starts at `Playing`; `Won` and `Lost` are terminal
/// until the next `reset`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Owns the board and runs the game rules. Mines are not placed at
/// construction; the first `reveal` asks the generator for a layout, which is
/// how the first click is guaranteed to be safe.
///
/// Out-of-bounds coordinates are signaled as errors. Moves that cannot apply
/// (terminal phase, re-revealing, flagging a revealed cell) are silent no-ops
/// reported through the outcome value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine<G = DensityGenerator> {
    config: GameConfig,
    generator: G,
    board: Array2<Cell>,
    mines_generated: bool,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, DensityGenerator::new())
    }

    /// Engine with reproducible mine layouts.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, DensityGenerator::seeded(seed))
    }
}

impl<G: MineGenerator> GameEngine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            board: Array2::default(config.size().to_nd_index()),
            config,
            generator,
            mines_generated: false,
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
            phase: Phase::default(),
        }
    }

    /// Throws away the whole game state and starts over with a fresh board of
    /// the given size, keeping the configured density and generator.
    pub fn reset(&mut self, size: Coord2) -> Result<()> {
        self.config = GameConfig::new(size, self.config.mine_density())?;
        self.board = Array2::default(size.to_nd_index());
        self.mines_generated = false;
        self.mine_count = 0;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.phase = Phase::Playing;
        Ok(())
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub const fn mines_generated(&self) -> bool {
        self.mines_generated
    }

    /// Total mines on the board, unknown before the first reveal.
    pub fn mine_count(&self) -> Option<CellCount> {
        self.mines_generated.then_some(self.mine_count)
    }

    /// Mines minus flags, the number a mine counter display shows.
    pub fn mines_left(&self) -> Option<isize> {
        self.mines_generated
            .then(|| self.mine_count as isize - self.flagged_count as isize)
    }

    pub const fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub const fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Panics when `coords` is outside the board.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    /// In-bounds neighbors of `coords`, in a fixed scan order.
    pub fn neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<G> {
        neighbors(coords, self.config.size())
    }

    /// Primary click action, the state machine driving the whole game:
    /// generates mines on first use, reveals the cell, ends the game on a
    /// mine, cascades through zero-adjacency regions otherwise.
    ///
    /// Win detection is not performed here; callers run `check_completion`
    /// after each action.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.mines_generated {
            self.generate_mines(coords);
        }

        let idx = coords.to_nd_index();
        let newly_revealed = !self.board[idx].revealed;
        if newly_revealed {
            self.board[idx].revealed = true;
            self.revealed_count += 1;
        }

        if self.board[idx].is_mine() {
            log::debug!("mine hit at {:?}", coords);
            self.phase = Phase::Lost;
            self.reveal_all_mines();
            return Ok(RevealOutcome::HitMine);
        }

        let flooded = if self.board[idx].adjacent_mines == 0 {
            self.flood_fill(coords)
        } else {
            0
        };

        Ok(if newly_revealed || flooded > 0 {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        })
    }

    /// Right-click action. Flips the flag on an unrevealed cell while the
    /// game is running; otherwise does nothing.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Caller-driven completion check, run after each reveal or flag action.
    ///
    /// The board is complete when every cell is revealed or is a correctly
    /// flagged mine. A complete board with any incorrect flag loses,
    /// otherwise it wins. Does nothing before mines exist or after the game
    /// has ended.
    pub fn check_completion(&mut self) -> Phase {
        if !self.mines_generated || self.phase.is_finished() {
            return self.phase;
        }

        let complete = self
            .board
            .iter()
            .all(|cell| cell.revealed || (cell.flagged && cell.is_mine()));
        if !complete {
            return self.phase;
        }

        let misflagged = self.board.iter().any(|cell| cell.flagged && !cell.is_mine());
        if misflagged {
            log::debug!("board complete with incorrect flags, game lost");
            self.phase = Phase::Lost;
            self.reveal_all_mines();
        } else {
            log::debug!("board complete, game won");
            self.phase = Phase::Won;
        }
        self.phase
    }

    /// Builds the read-only view a renderer consumes.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.config.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn generate_mines(&mut self, origin: Coord2) {
        let mask = self.generator.generate(&self.config, origin);
        debug_assert_eq!(mask.dim(), self.board.dim());

        let mut mine_count: CellCount = 0;
        for (cell, &mine) in self.board.iter_mut().zip(mask.iter()) {
            cell.mine = mine;
            if matches!(mine, Some(true)) {
                mine_count += 1;
            }
        }

        let (width, height) = self.config.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if self.board[coords.to_nd_index()].is_mine() {
                    continue;
                }
                let count = neighbors(coords, (width, height))
                    .filter(|&pos| self.board[pos.to_nd_index()].is_mine())
                    .count() as u8;
                self.board[coords.to_nd_index()].adjacent_mines = count;
            }
        }

        self.mine_count = mine_count;
        self.mines_generated = true;
        log::debug!("generated {} mines on first reveal at {:?}", mine_count, origin);
    }

    /// Breadth-first cascade from a zero-adjacency cell. The visited set
    /// keeps the cyclic neighbor graph from being walked twice, so the pass
    /// touches each cell at most once. Flagged neighbors are revealed like
    /// any other; their flag becomes meaningless.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let bounds = self.config.size();
        let mut flooded: CellCount = 0;
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = neighbors(origin, bounds)
            .filter(|&pos| !self.board[pos.to_nd_index()].revealed)
            .collect();

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            let idx = coords.to_nd_index();
            if self.board[idx].revealed {
                continue;
            }

            self.board[idx].revealed = true;
            self.revealed_count += 1;
            flooded += 1;
            log::trace!(
                "flood revealed {:?}, adjacent mines: {}",
                coords,
                self.board[idx].adjacent_mines
            );

            if self.board[idx].adjacent_mines == 0 {
                to_visit.extend(
                    neighbors(coords, bounds)
                        .filter(|&pos| !self.board[pos.to_nd_index()].revealed)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        flooded
    }

    /// End-of-game disclosure: every mine becomes visible, nothing else moves.
    fn reveal_all_mines(&mut self) {
        for cell in self.board.iter_mut() {
            if cell.is_mine() && !cell.revealed {
                cell.revealed = true;
                self.revealed_count += 1;
            }
        }
    }
}
