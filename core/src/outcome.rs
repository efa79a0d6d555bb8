use crate::error::Panicked;
use futures_util::future::{self, Either};
use std::{
    fmt::Display,
    future::Future,
    panic::{self, AssertUnwindSafe},
};

/// Result of a computation: either a success value or a failure object.
///
/// The failure payload is opaque to every combinator here, the library never
/// looks inside it. It defaults to [`anyhow::Error`].
///
/// Combinators pick their branch from the variant alone:
///
/// * [`Outcome::then`] and [`Outcome::then_async`] run only on success and forward
///   failures untouched.
/// * [`Outcome::map_err`] and [`Outcome::map_err_async`] run only on failure and are
///   the one place a failure can be turned back into a success.
/// * [`Outcome::match_with`] is terminal and has to handle both branches.
///
/// ```
/// use outcome::Outcome;
///
/// let res: Outcome<i32, String> = Outcome::success(42)
///     .then(|x| Outcome::success(x + 1))
///     .then(|_| Outcome::failure(String::from("bad")))
///     .map_err(|_| Outcome::success(0));
///
/// assert_eq!(res, Outcome::success(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<V, E = anyhow::Error> {
    /// Computation succeeded with a value.
    Success(V),
    /// Computation failed.
    Failure(E),
}

impl<V, E> Outcome<V, E> {
    pub const fn success(value: V) -> Self {
        Self::Success(value)
    }

    pub const fn failure(failure: E) -> Self {
        Self::Failure(failure)
    }

    /// Returns true if this outcome holds a failure.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns true if this outcome holds a success value.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrows the success value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the failure, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Takes the success value out without a fallback.
    ///
    /// Only call this after checking [`Outcome::is_error`]. Prefer
    /// [`Outcome::match_with`] or the combinators.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Failure`.
    #[track_caller]
    pub fn unwrap_value(self) -> V {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => panic!("called `Outcome::unwrap_value()` on a `Failure` value"),
        }
    }

    /// Takes the failure out without a fallback.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Success`.
    #[track_caller]
    pub fn unwrap_failure(self) -> E {
        match self {
            Self::Success(_) => panic!("called `Outcome::unwrap_failure()` on a `Success` value"),
            Self::Failure(failure) => failure,
        }
    }

    pub fn as_ref(&self) -> Outcome<&V, &E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Calls exactly one of the two branches and returns what it produced.
    pub fn match_with<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(V) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(failure) => on_failure(failure),
        }
    }

    /// Like [`Outcome::match_with`], but both branches are asynchronous.
    ///
    /// The returned future is the one produced by the chosen branch.
    pub fn match_async<R, S, SF, F, FF>(
        self,
        on_success: S,
        on_failure: F,
    ) -> impl Future<Output = R>
    where
        S: FnOnce(V) -> SF,
        SF: Future<Output = R>,
        F: FnOnce(E) -> FF,
        FF: Future<Output = R>,
    {
        match self {
            Self::Success(value) => Either::Left(on_success(value)),
            Self::Failure(failure) => Either::Right(on_failure(failure)),
        }
    }

    /// Asynchronous success branch, synchronous failure branch.
    ///
    /// The failure branch result is handed back through an already resolved future.
    pub fn match_async_or<R, S, SF, F>(self, on_success: S, on_failure: F) -> impl Future<Output = R>
    where
        S: FnOnce(V) -> SF,
        SF: Future<Output = R>,
        F: FnOnce(E) -> R,
    {
        match self {
            Self::Success(value) => Either::Left(on_success(value)),
            Self::Failure(failure) => Either::Right(future::ready(on_failure(failure))),
        }
    }

    /// Replaces a success with whatever `next` returns.
    ///
    /// A failure is carried forward as is and `next` is never called.
    pub fn then<K, N>(self, next: N) -> Outcome<K, E>
    where
        N: FnOnce(V) -> Outcome<K, E>,
    {
        match self {
            Self::Success(value) => next(value),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Asynchronous [`Outcome::then`].
    ///
    /// On failure the returned future is already resolved and `next` is never called.
    pub fn then_async<K, N, NF>(self, next: N) -> impl Future<Output = Outcome<K, E>>
    where
        N: FnOnce(V) -> NF,
        NF: Future<Output = Outcome<K, E>>,
    {
        match self {
            Self::Success(value) => Either::Left(next(value)),
            Self::Failure(failure) => Either::Right(future::ready(Outcome::Failure(failure))),
        }
    }

    /// Replaces a failure with whatever `map` returns, which may be a success.
    ///
    /// This is the recovery path. A success is carried through unchanged. Unlike
    /// `Result::map_err`, `map` returns a whole outcome; use
    /// [`Outcome::map_failure`] to only transform the failure.
    pub fn map_err<E2, M>(self, map: M) -> Outcome<V, E2>
    where
        M: FnOnce(E) -> Outcome<V, E2>,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(failure) => map(failure),
        }
    }

    /// Asynchronous [`Outcome::map_err`].
    ///
    /// On success the returned future is already resolved and `map` is never called.
    pub fn map_err_async<E2, M, MF>(self, map: M) -> impl Future<Output = Outcome<V, E2>>
    where
        M: FnOnce(E) -> MF,
        MF: Future<Output = Outcome<V, E2>>,
    {
        match self {
            Self::Success(value) => Either::Left(future::ready(Outcome::Success(value))),
            Self::Failure(failure) => Either::Right(map(failure)),
        }
    }

    /// Transforms the success value. Never changes the variant.
    pub fn map<K, F>(self, f: F) -> Outcome<K, E>
    where
        F: FnOnce(V) -> K,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Transforms the failure. Never changes the variant.
    pub fn map_failure<E2, F>(self, f: F) -> Outcome<V, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(failure) => Outcome::Failure(f(failure)),
        }
    }

    /// Calls `f` with a reference to the success value, if any.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&V),
    {
        if let Self::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Calls `f` with a reference to the failure, if any.
    pub fn inspect_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Self::Failure(failure) = &self {
            f(failure);
        }
        self
    }

    pub fn value_or(self, default: V) -> V {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    pub fn value_or_else<F>(self, f: F) -> V
    where
        F: FnOnce(E) -> V,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(failure) => f(failure),
        }
    }

    pub fn into_result(self) -> Result<V, E> {
        self.into()
    }
}

impl<V, E> Outcome<V, E>
where
    E: From<Panicked>,
{
    /// Runs `f`, turning a panic inside it into a [`Panicked`] failure.
    ///
    /// The closure is treated as unwind safe: whatever it captured is gone once it
    /// panicked, only the failure is observed afterwards.
    pub fn catching<F, O>(f: F) -> Self
    where
        F: FnOnce() -> O,
        O: IntoOutcome<V, E>,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(outcome) => outcome.into_outcome(),
            Err(payload) => {
                let panicked = Panicked::from_payload(payload);
                log::warn!("Outcome::catching - captured panic: {}", panicked.message());
                Self::Failure(panicked.into())
            }
        }
    }
}

impl<V> Outcome<V, anyhow::Error> {
    /// Wraps a failure with additional context. Successes pass through.
    pub fn context<C>(self, context: C) -> Self
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_failure(|e| e.context(context))
    }

    /// Like [`Outcome::context`], with the context computed only on failure.
    pub fn with_context<C, F>(self, f: F) -> Self
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_failure(|e| e.context(f()))
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(failure) => Self::Failure(failure),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

/// Allows various types to be turned into an [`Outcome`].
///
/// Used wherever an outcome producer may hand back a plain `Result` instead.
pub trait IntoOutcome<V, E> {
    fn into_outcome(self) -> Outcome<V, E>;
}

impl<V, E> IntoOutcome<V, E> for Outcome<V, E> {
    fn into_outcome(self) -> Outcome<V, E> {
        self
    }
}

impl<V, E> IntoOutcome<V, E> for Result<V, E> {
    fn into_outcome(self) -> Outcome<V, E> {
        self.into()
    }
}

/// Shorthand for [`Outcome::success`].
pub fn success<V, E>(value: V) -> Outcome<V, E> {
    Outcome::Success(value)
}

/// Shorthand for [`Outcome::failure`].
pub fn failure<V, E>(failure: E) -> Outcome<V, E> {
    Outcome::Failure(failure)
}
