//! Collaborator contract between the solver and a problem domain.

use std::marker::PhantomData;

use rand::Rng;

/// A candidate move together with the cost change it would cause.
///
/// `error_delta` is `new_cost - old_cost`: negative values are improvements.
/// The solver passes it through unchecked, so non-finite values follow the
/// usual IEEE rules in the acceptance test.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal<M> {
    /// Move to hand back to [`AnnealingMethods::apply_move`] if accepted.
    pub mv: M,
    /// Cost change if the move were applied.
    pub error_delta: f64,
}

impl<M> Proposal<M> {
    pub fn new(mv: M, error_delta: f64) -> Self {
        Self { mv, error_delta }
    }
}

/// Defines how a problem proposes and applies moves.
///
/// The solver knows nothing about states or moves. It asks for one
/// proposal per iteration and applies it only if accepted, so
/// `choose_move` should be cheap. Any side effects it has on `self`
/// are never undone.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_anneal::{AnnealingMethods, Proposal};
///
/// /// Walks an integer toward zero; cost is `|x|`.
/// struct Walk;
///
/// impl AnnealingMethods for Walk {
///     type State = i64;
///     type Move = i64;
///
///     fn choose_move<R: Rng + ?Sized>(&mut self, x: &i64, _iter: u64, rng: &mut R) -> Proposal<i64> {
///         let step: i64 = if rng.random_bool(0.5) { 1 } else { -1 };
///         let delta = ((x + step).abs() - x.abs()) as f64;
///         Proposal::new(step, delta)
///     }
///
///     fn apply_move(&mut self, x: i64, step: i64) -> i64 {
///         x + step
///     }
/// }
/// ```
pub trait AnnealingMethods {
    /// Candidate solution representation.
    type State;

    /// Perturbation description.
    type Move;

    /// Proposes a move from `state` at iteration `iteration`.
    ///
    /// `rng` is the solver's own generator, so a seeded solver makes the
    /// whole search reproducible.
    fn choose_move<R: Rng + ?Sized>(
        &mut self,
        state: &Self::State,
        iteration: u64,
        rng: &mut R,
    ) -> Proposal<Self::Move>;

    /// Applies an accepted move. The returned state replaces the old one.
    fn apply_move(&mut self, state: Self::State, mv: Self::Move) -> Self::State;
}

/// [`AnnealingMethods`] built from a pair of closures.
///
/// Closures that need randomness capture their own generator.
pub struct FnMethods<S, M, C, A> {
    choose: C,
    apply: A,
    _marker: PhantomData<fn(S) -> M>,
}

impl<S, M, C, A> FnMethods<S, M, C, A>
where
    C: FnMut(&S, u64) -> Proposal<M>,
    A: FnMut(S, M) -> S,
{
    pub fn new(choose: C, apply: A) -> Self {
        Self {
            choose,
            apply,
            _marker: PhantomData,
        }
    }
}

impl<S, M, C, A> AnnealingMethods for FnMethods<S, M, C, A>
where
    C: FnMut(&S, u64) -> Proposal<M>,
    A: FnMut(S, M) -> S,
{
    type State = S;
    type Move = M;

    fn choose_move<R: Rng + ?Sized>(&mut self, state: &S, iteration: u64, _rng: &mut R) -> Proposal<M> {
        (self.choose)(state, iteration)
    }

    fn apply_move(&mut self, state: S, mv: M) -> S {
        (self.apply)(state, mv)
    }
}
