//! Propagation laws of `Outcome` and `Pending`, checked over generated outcomes.


use futures_executor::block_on;
use outcome::{IntoPending, Outcome};
use proptest::prelude::*;
use std::cell::Cell;
use tools::{init_logging, proptest_config, yield_now, CallCounter};

type Out = Outcome<i32, String>;

fn arb_outcome() -> impl Strategy<Value = Out> {
    prop_oneof![
        any::<i32>().prop_map(Out::success),
        "[a-z]{1,8}".prop_map(Out::failure),
    ]
}

/// A continuation picked by `kind`: shift the value, fail, or fail on odd values.
fn step(kind: u8, k: i32) -> impl Fn(i32) -> Out {
    move |x| match kind % 3 {
        0 => Outcome::success(x.wrapping_add(k)),
        1 => Outcome::failure(format!("step {x}")),
        _ if x % 2 == 0 => Outcome::success(x / 2),
        _ => Outcome::failure(String::from("odd")),
    }
}

/// A recovery picked by `kind`: recover with the failure length, or re-fail.
fn recover(kind: u8) -> impl Fn(String) -> Out {
    move |e| {
        if kind % 2 == 0 {
            Outcome::success(e.len() as i32)
        } else {
            Outcome::failure(e.to_uppercase())
        }
    }
}

proptest! {
    #![proptest_config(proptest_config(200))]

    #[test]
    fn then_on_success_applies_next(v in any::<i32>(), kind in any::<u8>(), k in any::<i32>()) {
        init_logging();
        let f = step(kind, k);
        prop_assert_eq!(Out::success(v).then(&f), f(v));
    }

    #[test]
    fn then_on_failure_forwards(e in "[a-z]{1,8}", kind in any::<u8>(), k in any::<i32>()) {
        init_logging();
        let calls = CallCounter::new();
        let f = step(kind, k);

        let res = Out::failure(e.clone()).then(|x| {
            calls.hit();
            f(x)
        });

        prop_assert_eq!(res, Out::failure(e));
        prop_assert_eq!(calls.count(), 0);
    }

    #[test]
    fn map_err_on_failure_applies_map(e in "[a-z]{1,8}", kind in any::<u8>()) {
        init_logging();
        let map = recover(kind);
        prop_assert_eq!(Out::failure(e.clone()).map_err(&map), map(e));
    }

    #[test]
    fn map_err_on_success_is_identity(v in any::<i32>(), kind in any::<u8>()) {
        init_logging();
        let calls = CallCounter::new();
        let map = recover(kind);

        let res = Out::success(v).map_err(|e| {
            calls.hit();
            map(e)
        });

        prop_assert_eq!(res, Out::success(v));
        prop_assert_eq!(calls.count(), 0);
    }

    #[test]
    fn match_with_calls_one_branch(o in arb_outcome()) {
        init_logging();
        let (successes, failures) = (Cell::new(0), Cell::new(0));
        let is_error = o.is_error();

        o.match_with(|_| successes.set(successes.get() + 1), |_| failures.set(failures.get() + 1));

        prop_assert_eq!(successes.get() + failures.get(), 1);
        prop_assert_eq!(failures.get() == 1, is_error);
    }

    #[test]
    fn then_is_associative(
        o in arb_outcome(),
        (fk, fv) in (any::<u8>(), any::<i32>()),
        (gk, gv) in (any::<u8>(), any::<i32>())
    ) {
        init_logging();
        let (f, g) = (step(fk, fv), step(gk, gv));

        let left = o.clone().then(&f).then(&g);
        let right = o.then(|x| f(x).then(&g));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn pending_matches_sync_chain(o in arb_outcome(), kind in any::<u8>(), k in any::<i32>()) {
        init_logging();
        let (f, map) = (step(kind, k), recover(kind));

        let sync = o.clone().then(&f).map_err(&map);
        let deferred = block_on(
            async move {
                yield_now().await;
                o
            }
            .into_pending()
            .then(&f)
            .map_err(&map),
        );

        prop_assert_eq!(sync, deferred);
    }

    #[test]
    fn awaiting_yields_the_outcome(o in arb_outcome()) {
        init_logging();
        let expected = o.clone();

        let res = block_on(async move {
            yield_now().await;
            o
        }.into_pending());

        prop_assert_eq!(res.is_error(), expected.is_error());
        prop_assert_eq!(res, expected);
    }
}
