use crate::{
    error::Panicked,
    outcome::{IntoOutcome, Outcome},
};
use futures_util::{
    future::{self, Ready, Shared},
    FutureExt,
};
use log::{trace, warn};
use pin_project_lite::pin_project;
use std::{
    fmt::Display,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    task::{Context, Poll},
};

pin_project! {
    /// An [`Outcome`] that is not available yet.
    ///
    /// Wraps exactly one future resolving to an `Outcome<V, E>` and offers the same
    /// combinators as `Outcome`. Every combinator attaches a continuation to the
    /// wrapped future and hands back a new `Pending`; the continuation applies the
    /// synchronous combinator of the same name once the future resolves.
    ///
    /// Awaiting a `Pending` is the suspension point: it yields the resolved
    /// `Outcome` itself, failures included, and never panics on a failure.
    ///
    /// ```
    /// use outcome::{Outcome, Pending};
    ///
    /// let pending = Pending::new(async { Outcome::<i32, String>::success(41) })
    ///     .then(|x| Outcome::success(x + 1));
    ///
    /// let res = futures_executor::block_on(pending);
    /// assert_eq!(res, Outcome::success(42));
    /// ```
    #[derive(Debug, Clone)]
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Pending<F> {
        #[pin]
        future: F,
    }
}

impl<F: Future> Future for Pending<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().future.poll(cx)
    }
}

impl<F, V, E> Pending<F>
where
    F: Future<Output = Outcome<V, E>>,
{
    /// Captures a future of an outcome.
    pub fn new(future: F) -> Self {
        Self { future }
    }

    /// Returns the wrapped future.
    pub fn into_inner(self) -> F {
        self.future
    }

    /// Resolves, then calls exactly one of the branches.
    pub fn match_with<R, S, Fl>(self, on_success: S, on_failure: Fl) -> impl Future<Output = R>
    where
        S: FnOnce(V) -> R,
        Fl: FnOnce(E) -> R,
    {
        self.future
            .map(move |outcome| resolved("match_with", outcome).match_with(on_success, on_failure))
    }

    /// Resolves, then awaits whichever asynchronous branch was chosen.
    pub fn match_async<R, S, SF, Fl, FF>(
        self,
        on_success: S,
        on_failure: Fl,
    ) -> impl Future<Output = R>
    where
        S: FnOnce(V) -> SF,
        SF: Future<Output = R>,
        Fl: FnOnce(E) -> FF,
        FF: Future<Output = R>,
    {
        self.future.then(move |outcome| {
            resolved("match_async", outcome).match_async(on_success, on_failure)
        })
    }

    /// Resolves, then awaits the asynchronous success branch or calls the
    /// synchronous failure branch.
    pub fn match_async_or<R, S, SF, Fl>(
        self,
        on_success: S,
        on_failure: Fl,
    ) -> impl Future<Output = R>
    where
        S: FnOnce(V) -> SF,
        SF: Future<Output = R>,
        Fl: FnOnce(E) -> R,
    {
        self.future.then(move |outcome| {
            resolved("match_async_or", outcome).match_async_or(on_success, on_failure)
        })
    }

    /// Deferred [`Outcome::then`]: `next` runs only if the outcome resolves to a success.
    pub fn then<K, N>(self, next: N) -> Pending<impl Future<Output = Outcome<K, E>>>
    where
        N: FnOnce(V) -> Outcome<K, E>,
    {
        Pending {
            future: self
                .future
                .map(move |outcome| resolved("then", outcome).then(next)),
        }
    }

    /// Deferred [`Outcome::then_async`]. The future returned by `next` is awaited
    /// in place, the result is never a future of a future.
    pub fn then_async<K, N, NF>(self, next: N) -> Pending<impl Future<Output = Outcome<K, E>>>
    where
        N: FnOnce(V) -> NF,
        NF: Future<Output = Outcome<K, E>>,
    {
        Pending {
            future: self
                .future
                .then(move |outcome| resolved("then_async", outcome).then_async(next)),
        }
    }

    /// Deferred [`Outcome::map_err`]: `map` runs only if the outcome resolves to a failure.
    pub fn map_err<E2, M>(self, map: M) -> Pending<impl Future<Output = Outcome<V, E2>>>
    where
        M: FnOnce(E) -> Outcome<V, E2>,
    {
        Pending {
            future: self
                .future
                .map(move |outcome| resolved("map_err", outcome).map_err(map)),
        }
    }

    /// Deferred [`Outcome::map_err_async`].
    pub fn map_err_async<E2, M, MF>(self, map: M) -> Pending<impl Future<Output = Outcome<V, E2>>>
    where
        M: FnOnce(E) -> MF,
        MF: Future<Output = Outcome<V, E2>>,
    {
        Pending {
            future: self
                .future
                .then(move |outcome| resolved("map_err_async", outcome).map_err_async(map)),
        }
    }

    pub fn map<K, M>(self, f: M) -> Pending<impl Future<Output = Outcome<K, E>>>
    where
        M: FnOnce(V) -> K,
    {
        Pending {
            future: self.future.map(move |outcome| outcome.map(f)),
        }
    }

    pub fn map_failure<E2, M>(self, f: M) -> Pending<impl Future<Output = Outcome<V, E2>>>
    where
        M: FnOnce(E) -> E2,
    {
        Pending {
            future: self.future.map(move |outcome| outcome.map_failure(f)),
        }
    }

    pub fn inspect<I>(self, f: I) -> Pending<impl Future<Output = Outcome<V, E>>>
    where
        I: FnOnce(&V),
    {
        Pending {
            future: self.future.map(move |outcome| outcome.inspect(f)),
        }
    }

    pub fn inspect_failure<I>(self, f: I) -> Pending<impl Future<Output = Outcome<V, E>>>
    where
        I: FnOnce(&E),
    {
        Pending {
            future: self.future.map(move |outcome| outcome.inspect_failure(f)),
        }
    }

    /// Lets any number of observers await the same resolution.
    ///
    /// Each clone of the returned `Pending` yields its own copy of the outcome.
    pub fn shared(self) -> Pending<Shared<F>>
    where
        V: Clone,
        E: Clone,
    {
        Pending {
            future: self.future.shared(),
        }
    }

    /// Blocks the current thread until the outcome is resolved.
    ///
    /// Meant for synchronous edges of a program, never call it from inside a task.
    pub fn block(self) -> Outcome<V, E> {
        futures_executor::block_on(self.future)
    }
}

impl<F, V> Pending<F>
where
    F: Future<Output = Outcome<V, anyhow::Error>>,
{
    /// Deferred [`Outcome::context`].
    pub fn context<C>(self, context: C) -> Pending<impl Future<Output = Outcome<V, anyhow::Error>>>
    where
        C: Display + Send + Sync + 'static,
    {
        Pending {
            future: self.future.map(move |outcome| outcome.context(context)),
        }
    }

    /// Deferred [`Outcome::with_context`].
    pub fn with_context<C, W>(
        self,
        f: W,
    ) -> Pending<impl Future<Output = Outcome<V, anyhow::Error>>>
    where
        C: Display + Send + Sync + 'static,
        W: FnOnce() -> C,
    {
        Pending {
            future: self.future.map(move |outcome| outcome.with_context(f)),
        }
    }
}

impl<F: Future> Pending<F> {
    /// Captures a future of anything convertible into an outcome, typically a `Result`.
    pub fn from_fallible<V, E>(future: F) -> Pending<impl Future<Output = Outcome<V, E>>>
    where
        F::Output: IntoOutcome<V, E>,
    {
        Pending {
            future: future.map(<F::Output as IntoOutcome<V, E>>::into_outcome),
        }
    }

    /// Captures a future of an outcome, turning a panic while it is polled into a
    /// [`Panicked`] failure.
    ///
    /// The future is treated as unwind safe: once it panicked it is dropped and
    /// only the failure is observed.
    pub fn catching<V, E>(future: F) -> Pending<impl Future<Output = Outcome<V, E>>>
    where
        F: Future<Output = Outcome<V, E>>,
        E: From<Panicked>,
    {
        Pending {
            future: AssertUnwindSafe(future)
                .catch_unwind()
                .map(|caught| match caught {
                    Ok(outcome) => outcome,
                    Err(payload) => {
                        let panicked = Panicked::from_payload(payload);
                        warn!("Pending::catching - captured panic: {}", panicked.message());
                        Outcome::Failure(panicked.into())
                    }
                }),
        }
    }
}

impl<V, E> Pending<Ready<Outcome<V, E>>> {
    /// An already resolved pending outcome.
    pub fn ready(outcome: Outcome<V, E>) -> Self {
        Self {
            future: future::ready(outcome),
        }
    }

    pub fn success(value: V) -> Self {
        Self::ready(Outcome::Success(value))
    }

    pub fn failure(failure: E) -> Self {
        Self::ready(Outcome::Failure(failure))
    }
}

impl<F, V, E> From<F> for Pending<F>
where
    F: Future<Output = Outcome<V, E>>,
{
    fn from(future: F) -> Self {
        Self::new(future)
    }
}

/// Lifts every future of an [`Outcome`] into a [`Pending`].
///
/// ```
/// use outcome::{IntoPending, Outcome};
///
/// let pending = async { Outcome::<u8, String>::failure("bad".into()) }
///     .into_pending()
///     .map_err(|_| Outcome::<u8, String>::success(0));
///
/// assert_eq!(pending.block(), Outcome::success(0));
/// ```
pub trait IntoPending<V, E>: Future<Output = Outcome<V, E>> + Sized {
    fn into_pending(self) -> Pending<Self> {
        Pending::new(self)
    }
}

impl<F, V, E> IntoPending<V, E> for F where F: Future<Output = Outcome<V, E>> {}

fn resolved<V, E>(stage: &'static str, outcome: Outcome<V, E>) -> Outcome<V, E> {
    if outcome.is_error() {
        trace!("Pending::{} - resolved to failure", stage);
    } else {
        trace!("Pending::{} - resolved to success", stage);
    }
    outcome
}
