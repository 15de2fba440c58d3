use crate::{
    algorithm::cancellation::CancellationToken,
    algorithm::collapse::collapse_cell,
    algorithm::propagation::{Contradiction, propagate},
    algorithm::selection::{Selection, select_next_cell},
    io::configuration::{DEFAULT_MAX_RETRIES, DEFAULT_SEED, MAX_GRID_DIMENSION},
    io::error::{AlgorithmError, Result, invalid_parameter},
    io::prefill::SeedConfiguration,
    spatial::grid::{Grid, Position, TileMatrix},
    spatial::tiles::{CompatibilityTable, TileKind},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Parameters of one solve call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Whole-grid attempts before giving up
    pub max_retries: usize,
    /// Seed for the single random stream used by the whole call
    pub seed: u64,
}

impl SolverConfig {
    /// Configuration with default retry bound and seed
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_retries: DEFAULT_MAX_RETRIES,
            seed: DEFAULT_SEED,
        }
    }

    /// Replace the retry bound
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check dimensions and retry bound
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for a zero width, height or retry bound and
    /// `InvalidParameter` for dimensions above `MAX_GRID_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("width", self.width),
            ("height", self.height),
            ("max_retries", self.max_retries),
        ] {
            if value == 0 {
                return Err(AlgorithmError::InvalidDimensions { parameter, value: 0 });
            }
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Result of one select/collapse/propagate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and propagation reached a fixed point
    Collapsed {
        /// Collapsed cell
        position: Position,
        /// Tile committed to it
        tile: TileKind,
    },
    /// Every cell is resolved
    Solved,
    /// The attempt hit a contradiction and must be discarded
    Failed(Contradiction),
}

/// One solve attempt over a freshly seeded grid
pub struct Attempt<'t> {
    grid: Grid,
    table: &'t CompatibilityTable,
    steps: usize,
}

impl<'t> Attempt<'t> {
    /// Allocate a fresh grid and apply the seed configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the seed configuration does not fit the grid
    pub fn new(
        width: usize,
        height: usize,
        table: &'t CompatibilityTable,
        seeding: Option<&SeedConfiguration>,
    ) -> Result<Self> {
        let mut grid = Grid::new(width, height);
        if let Some(seeding) = seeding {
            seeding.apply(&mut grid)?;
        }
        Ok(Self {
            grid,
            table,
            steps: 0,
        })
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of collapses performed so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Select the lowest-entropy cell, collapse it and propagate
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        let position = match select_next_cell(&self.grid, rng) {
            Selection::Complete => return StepOutcome::Solved,
            Selection::Contradiction(contradiction) => return StepOutcome::Failed(contradiction),
            Selection::Target(position) => position,
        };

        let tile = match collapse_cell(&mut self.grid, position, rng) {
            Ok(tile) => tile,
            Err(contradiction) => return StepOutcome::Failed(contradiction),
        };
        self.steps += 1;

        match propagate(&mut self.grid, self.table) {
            Ok(_) => StepOutcome::Collapsed { position, tile },
            Err(contradiction) => StepOutcome::Failed(contradiction),
        }
    }

    /// Export the grid if every cell is resolved
    pub fn export(&self) -> Option<TileMatrix> {
        self.grid.export()
    }
}

/// Successful solve together with the attempt that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Exported tile ordinals
    pub tiles: TileMatrix,
    /// 1-based attempt number that succeeded
    pub attempts: usize,
}

/// Constraint-propagation tile solver with whole-grid restarts
///
/// Each `solve` call owns its grid and random stream; a `Solver` value only
/// carries the read-only compatibility table and an optional cancellation
/// token, so it can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    table: CompatibilityTable,
    cancellation: Option<CancellationToken>,
}

impl Solver {
    /// Solver using the standard terrain compatibility table
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver using a custom compatibility table
    pub const fn with_table(table: CompatibilityTable) -> Self {
        Self {
            table,
            cancellation: None,
        }
    }

    /// Observe a cancellation token before every attempt and step
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Compatibility table in use
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    fn check_cancelled(&self, attempt: usize) -> Result<()> {
        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Err(AlgorithmError::Cancelled { attempt });
        }
        Ok(())
    }

    /// Generate a grid in which every orthogonal pair respects the table
    ///
    /// A single random stream seeded from `config.seed` is consumed across
    /// all attempts. On contradiction the grid is discarded and a new attempt
    /// starts; no partial grid is ever returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `InvalidDimensions`: width, height or retry bound is zero
    /// - `InvalidConfiguration`: the seed configuration does not fit the grid
    /// - `Cancelled`: the cancellation token was triggered
    /// - `SolveExhausted`: every attempt ended in a contradiction
    pub fn solve(
        &self,
        config: &SolverConfig,
        seeding: Option<&SeedConfiguration>,
    ) -> Result<SolveOutcome> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        for attempt in 1..=config.max_retries {
            self.check_cancelled(attempt)?;
            let mut state = Attempt::new(config.width, config.height, &self.table, seeding)?;

            loop {
                self.check_cancelled(attempt)?;
                match state.step(&mut rng) {
                    StepOutcome::Collapsed { .. } => {}
                    StepOutcome::Solved => {
                        if let Some(tiles) = state.export() {
                            tracing::info!(
                                attempt,
                                width = config.width,
                                height = config.height,
                                "solved tile grid"
                            );
                            return Ok(SolveOutcome {
                                tiles,
                                attempts: attempt,
                            });
                        }
                        break;
                    }
                    StepOutcome::Failed(contradiction) => {
                        tracing::debug!(
                            attempt,
                            x = contradiction.position.x,
                            y = contradiction.position.y,
                            steps = state.steps(),
                            "attempt failed, restarting"
                        );
                        break;
                    }
                }
            }
        }

        tracing::warn!(
            attempts = config.max_retries,
            seed = config.seed,
            "solver exhausted its attempts"
        );
        Err(AlgorithmError::SolveExhausted {
            attempts: config.max_retries,
        })
    }
}

/// Solve with the standard table and no cancellation
///
/// # Errors
///
/// See [`Solver::solve`]
pub fn solve(
    width: usize,
    height: usize,
    max_retries: usize,
    seed: u64,
    seeding: Option<&SeedConfiguration>,
) -> Result<TileMatrix> {
    let config = SolverConfig {
        width,
        height,
        max_retries,
        seed,
    };
    Solver::new()
        .solve(&config, seeding)
        .map(|outcome| outcome.tiles)
}
