//! Value based failure handling for synchronous and asynchronous code.
//!
//! [`Outcome`] holds either a success value or a failure object. [`Pending`]
//! wraps a future that will resolve to an `Outcome` and exposes the same
//! combinators, each deferred until the future resolves.
//!
//! Failures are data everywhere, awaiting a `Pending` yields an `Outcome` and
//! never panics because of a failure.
//!
//! ```
//! use outcome::{Outcome, Pending};
//!
//! let pending = Pending::new(async { Outcome::<i32, String>::success(42) })
//!     .then(|x| Outcome::success(x + 1))
//!     .then_async(|x| async move { Outcome::<i32, String>::failure(format!("bad {x}")) })
//!     .map_err(|_| Outcome::<i32, String>::success(0));
//!
//! assert_eq!(pending.block(), Outcome::success(0));
//! ```

mod channel;
mod error;
mod outcome;
mod pending;

pub use crate::channel::{channel, Receiving, Resolver};
pub use crate::error::{Cancelled, Panicked};
pub use crate::outcome::{failure, success, IntoOutcome, Outcome};
pub use crate::pending::{IntoPending, Pending};

/// Turns an `async fn` returning an [`Outcome`] into a plain `fn` returning a [`Pending`].
///
/// ```
/// use outcome::{pending, Outcome};
///
/// #[pending]
/// async fn half(x: u32) -> Outcome<u32, String> {
///     if x % 2 == 0 {
///         Outcome::success(x / 2)
///     } else {
///         Outcome::failure(format!("{x} is odd"))
///     }
/// }
///
/// assert_eq!(half(8).then(|x| Outcome::success(x + 1)).block(), Outcome::success(5));
/// assert!(half(3).block().is_error());
/// ```
///
/// Arguments must be owned, or `'static` references. The body is wrapped in
/// [`Pending::new`], so a panic inside it unwinds through whoever polls the
/// future. `#[pending(catching)]` wraps it in [`Pending::catching`] instead and
/// the panic resolves to a [`Panicked`] failure:
///
/// ```
/// use outcome::{pending, Outcome, Panicked};
///
/// #[pending(catching)]
/// async fn div(a: i32, b: i32) -> Outcome<i32> {
///     Outcome::success(a / b)
/// }
///
/// assert!(div(1, 0).block().unwrap_failure().is::<Panicked>());
/// ```
pub use macros::pending;
