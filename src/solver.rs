//! Simulated annealing execution loop.
//!
//! # Algorithm
//!
//! For each iteration:
//!
//! 1. Ask the methods for a move and its error delta
//! 2. Accept it outright if the delta is not positive
//! 3. Otherwise accept with probability `exp(-k * delta / T)`, where `T`
//!    comes from the cooling schedule and `k` is either configured or
//!    learned from the deltas seen early in the run
//! 4. Apply accepted moves, advance the counter, stop if aborted
//!
//! The solver keeps its counters between calls, so a search can be run as
//! a sequence of batches against one iteration budget.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::cooling::CoolingSchedule;
use crate::types::{AnnealingMethods, FnMethods, Proposal};

/// Iterations performed by [`AnnealingSolver::run_batch`].
pub const DEFAULT_RUN_ITERATIONS: u64 = 100;

/// Acceptance probability the learned `k` aims for at temperature 1.
const TARGET_ACCEPTANCE: f64 = 0.7;

/// Portion of the iteration budget during which `k` is learned.
const LEARNING_FRACTION: f64 = 0.4;

/// Shared, sticky request to stop a running solver.
///
/// Clones share the same flag. The solver checks it once after every
/// completed iteration, so the iteration in flight always finishes.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the solver stop after its current iteration.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Result of one [`AnnealingSolver::run`] call.
#[derive(Debug, Clone)]
pub struct RunOutcome<S> {
    /// State after the last accepted move (or the input state).
    pub state: S,

    /// Moves accepted during this call only.
    pub accepted_moves: u64,

    /// Iterations executed during this call.
    pub iterations: u64,

    /// Whether the call stopped early because of an abort request.
    pub aborted: bool,

    /// Solver temperature after the call.
    pub temperature: f64,
}

/// Simulated annealing solver bound to a problem's [`AnnealingMethods`].
///
/// # Examples
///
/// ```
/// use u_anneal::{AnnealingSolver, Proposal};
///
/// let mut solver = AnnealingSolver::from_fns(
///     |_: &String, _| Proposal::new(1, -1.0),
///     |s: String, m: i32| format!("{s}{m}"),
/// );
/// solver.set_iteration_budget(5.0);
///
/// let outcome = solver.run("q".to_string(), 1);
/// assert_eq!(outcome.state, "q1");
/// assert_eq!(outcome.accepted_moves, 1);
/// ```
pub struct AnnealingSolver<P: AnnealingMethods, R = StdRng> {
    methods: P,
    config: SolverConfig,
    rng: R,
    iteration: u64,
    learned_k: f64,
    learned_samples: u64,
    abort: AbortHandle,
}

impl<P: AnnealingMethods> AnnealingSolver<P, StdRng> {
    /// Creates a solver with the default configuration.
    pub fn new(methods: P) -> Self {
        Self::with_config(methods, SolverConfig::default())
    }

    /// Creates a solver whose acceptance draws are seeded from
    /// `config.seed`, or from the OS when unset.
    pub fn with_config(methods: P, config: SolverConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(methods, config, StdRng::seed_from_u64(seed))
    }
}

impl<S, M, C, A> AnnealingSolver<FnMethods<S, M, C, A>, StdRng>
where
    C: FnMut(&S, u64) -> Proposal<M>,
    A: FnMut(S, M) -> S,
{
    /// Creates a solver from a `choose_move` closure and an `apply_move`
    /// closure.
    pub fn from_fns(choose: C, apply: A) -> Self {
        Self::new(FnMethods::new(choose, apply))
    }
}

impl<P: AnnealingMethods, R: Rng> AnnealingSolver<P, R> {
    /// Creates a solver that draws from `rng`. `config.seed` is ignored.
    pub fn with_rng(methods: P, config: SolverConfig, rng: R) -> Self {
        Self {
            methods,
            config,
            rng,
            iteration: 0,
            learned_k: 0.0,
            learned_samples: 0,
            abort: AbortHandle::new(),
        }
    }

    /// Shares `handle`'s flag instead of a private one, so a handle can
    /// be created (and captured by the methods) before the solver exists.
    pub fn with_abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = handle;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_iteration_budget(&mut self, budget: f64) {
        self.config.iteration_budget = budget;
    }

    /// Sets the scale constant. `0` switches back to the learned value.
    pub fn set_k(&mut self, k: f64) {
        self.config.k = k;
    }

    pub fn set_cooling(&mut self, cooling: CoolingSchedule) {
        self.config.cooling = cooling;
    }

    pub fn methods(&self) -> &P {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut P {
        &mut self.methods
    }

    pub fn into_methods(self) -> P {
        self.methods
    }

    /// Iterations consumed since construction or the last reset.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Learned scale constant, used while `config().k` is 0.
    ///
    /// Kept up to date even after a positive `k` is configured, but then
    /// no longer consulted.
    pub fn learned_k(&self) -> f64 {
        self.learned_k
    }

    /// Number of deltas folded into [`learned_k`](Self::learned_k).
    pub fn learned_samples(&self) -> u64 {
        self.learned_samples
    }

    /// Temperature at the current iteration.
    pub fn current_temperature(&self) -> f64 {
        self.temperature_at(self.iteration)
    }

    /// Returns a handle that can abort this solver from inside the methods
    /// or from anywhere else holding a clone.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Requests early termination. Takes effect after the iteration in
    /// flight; if no run is active, the next run performs one iteration.
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Clears run progress: counters, the learned `k` and the abort flag.
    /// Configuration and methods are kept.
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.learned_k = 0.0;
        self.learned_samples = 0;
        self.abort.clear();
    }

    /// Runs [`DEFAULT_RUN_ITERATIONS`] iterations.
    pub fn run_batch(&mut self, state: P::State) -> RunOutcome<P::State> {
        self.run(state, DEFAULT_RUN_ITERATIONS)
    }

    /// Runs up to `iterations` iterations from `state`.
    ///
    /// Returns the resulting state and the number of moves accepted in
    /// this call. Fewer iterations run if the abort flag is set.
    pub fn run(&mut self, state: P::State, iterations: u64) -> RunOutcome<P::State> {
        let start = self.iteration;
        let target = start.saturating_add(iterations);
        let was_learning = self.in_learning_window();

        let mut state = state;
        let mut accepted_moves = 0u64;
        let mut aborted = false;

        while self.iteration < target {
            let Proposal { mv, error_delta } =
                self.methods.choose_move(&state, self.iteration, &mut self.rng);

            if self.accepts(error_delta) {
                state = self.methods.apply_move(state, mv);
                accepted_moves += 1;
            }

            self.iteration += 1;

            if self.abort.is_aborted() {
                aborted = true;
                trace!(iteration = self.iteration, "annealing run aborted");
                break;
            }
        }

        let explicit_k = self.config.k > 0.0;
        if was_learning && !explicit_k && !self.in_learning_window() {
            debug!(
                learned_k = self.learned_k,
                samples = self.learned_samples,
                "scale learning frozen"
            );
        }

        let temperature = self.current_temperature();
        debug!(
            iterations = self.iteration - start,
            accepted_moves,
            temperature,
            learned_k = self.learned_k,
            aborted,
            "annealing run finished"
        );

        RunOutcome {
            state,
            accepted_moves,
            iterations: self.iteration - start,
            aborted,
            temperature,
        }
    }

    fn temperature_at(&self, iteration: u64) -> f64 {
        self.config
            .cooling
            .temperature(iteration as f64, self.config.iteration_budget)
    }

    /// Metropolis-style acceptance test for the current iteration.
    fn accepts(&mut self, error_delta: f64) -> bool {
        if error_delta <= 0.0 {
            return true;
        }

        let temperature = self.temperature_at(self.iteration);
        // NaN temperatures fall through to rejection as well
        if temperature > 0.0 {
            let k = if self.config.k > 0.0 {
                self.config.k
            } else {
                self.learn_k(error_delta)
            };
            let probability = (-k * error_delta / temperature).exp();
            self.rng.random::<f64>() < probability
        } else {
            false
        }
    }

    fn in_learning_window(&self) -> bool {
        self.iteration as f64 <= LEARNING_FRACTION * self.config.iteration_budget
    }

    /// Folds one sample into the running mean of `k` and returns it.
    ///
    /// Each sample is the `k` that accepts this delta with probability
    /// [`TARGET_ACCEPTANCE`] at temperature 1: from `P = exp(-k * delta)`,
    /// `k = -ln(P) / delta`.
    fn learn_k(&mut self, error_delta: f64) -> f64 {
        if !self.in_learning_window() {
            return self.learned_k;
        }

        let sample = -TARGET_ACCEPTANCE.ln() / error_delta;
        self.learned_samples += 1;
        let weight = 1.0 / self.learned_samples as f64;
        self.learned_k = sample * weight + self.learned_k * (1.0 - weight);
        self.learned_k
    }
}
