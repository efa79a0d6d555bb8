use crate::{error::Cancelled, outcome::Outcome, pending::Pending};
use futures_channel::oneshot;
use log::debug;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// Creates a producer/consumer pair for a single outcome.
///
/// The producer side resolves the outcome exactly once. If it is dropped
/// without resolving, the consumer side resolves to a [`Cancelled`] failure.
///
/// ```
/// use outcome::Outcome;
///
/// let (resolver, pending) = outcome::channel::<u32, anyhow::Error>();
/// std::thread::spawn(move || resolver.succeed(7));
///
/// assert_eq!(pending.then(|v| Outcome::success(v * 2)).block().value(), Some(&14));
/// ```
pub fn channel<V, E>() -> (Resolver<V, E>, Pending<Receiving<V, E>>)
where
    E: From<Cancelled>,
{
    let (sender, receiver) = oneshot::channel();

    (Resolver { sender }, Pending::new(Receiving { receiver }))
}

/// Producer half returned by [`channel`].
#[derive(Debug)]
pub struct Resolver<V, E = anyhow::Error> {
    sender: oneshot::Sender<Outcome<V, E>>,
}

impl<V, E> Resolver<V, E> {
    /// Resolves the paired pending outcome.
    ///
    /// Hands the outcome back if nobody is waiting for it anymore.
    pub fn resolve(self, outcome: Outcome<V, E>) -> Result<(), Outcome<V, E>> {
        self.sender.send(outcome).map_err(|outcome| {
            debug!("Resolver::resolve - consumer dropped, outcome not delivered");
            outcome
        })
    }

    pub fn succeed(self, value: V) -> Result<(), Outcome<V, E>> {
        self.resolve(Outcome::Success(value))
    }

    pub fn fail(self, failure: E) -> Result<(), Outcome<V, E>> {
        self.resolve(Outcome::Failure(failure))
    }

    /// Returns true if the consumer side was dropped.
    pub fn is_canceled(&self) -> bool {
        self.sender.is_canceled()
    }
}

/// Consumer future returned by [`channel`], always wrapped in a [`Pending`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Receiving<V, E = anyhow::Error> {
    receiver: oneshot::Receiver<Outcome<V, E>>,
}

impl<V, E> Future for Receiving<V, E>
where
    E: From<Cancelled>,
{
    type Output = Outcome<V, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| match received {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => {
                debug!("Receiving::poll - resolver dropped without resolving");
                Outcome::Failure(Cancelled.into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_executor::block_on;

    #[test]
    fn test_resolve_delivers() {
        let (resolver, pending) = channel::<i32, anyhow::Error>();
        assert!(resolver.succeed(3).is_ok());
        assert_eq!(block_on(pending).value(), Some(&3));
    }

    #[test]
    fn test_dropped_resolver_cancels() {
        let (resolver, pending) = channel::<i32, anyhow::Error>();
        drop(resolver);

        let failure = block_on(pending).unwrap_failure();
        assert!(failure.is::<Cancelled>());
    }

    #[test]
    fn test_resolve_without_consumer() {
        let (resolver, pending) = channel::<i32, Cancelled>();
        drop(pending);

        assert!(resolver.is_canceled());
        assert_eq!(resolver.fail(Cancelled), Err(Outcome::Failure(Cancelled)));
    }
}
