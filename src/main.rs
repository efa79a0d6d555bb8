use anyhow::{anyhow, Context};
use log::{info, warn};
use outcome::{Outcome, Pending};
use std::{env, thread};

/// Parses the argument on a worker thread and hands the result back through a `Pending`.
fn parse_on_worker(raw: String) -> Pending<outcome::Receiving<u64, anyhow::Error>> {
    let (resolver, pending) = outcome::channel();

    thread::spawn(move || {
        let parsed = raw
            .parse::<u64>()
            .with_context(|| format!("{raw:?} is not a number"));
        if resolver.resolve(parsed.into()).is_err() {
            warn!("parse_on_worker - nobody waits for {raw:?} anymore");
        }
    });

    pending
}

fn collatz_step(n: u64) -> Outcome<u64> {
    match n {
        0 => Outcome::failure(anyhow!("collatz is undefined for 0")),
        n if n % 2 == 0 => Outcome::success(n / 2),
        n => n
            .checked_mul(3)
            .and_then(|n| n.checked_add(1))
            .context("collatz step overflowed")
            .into(),
    }
}

/// Counts the steps needed to reach 1, which is 0 when starting at 1.
fn collatz_length(start: u64) -> Outcome<u64> {
    let mut n = start;
    let mut steps = 0_u64;
    while n != 1 {
        n = match collatz_step(n) {
            Outcome::Success(next) => next,
            Outcome::Failure(e) => return Outcome::Failure(e),
        };
        steps += 1;
    }
    Outcome::success(steps)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let raw = env::args().nth(1).unwrap_or_else(|| String::from("27"));
    info!("main - starting from {raw:?}");

    let steps = parse_on_worker(raw)
        .then_async(|n| async move { collatz_length(n) })
        .context("computing collatz length")
        .inspect_failure(|e| warn!("main - pipeline failed: {e:#}"))
        .block()
        .into_result()?;

    info!("main - reached 1 after {steps} steps");
    println!("{steps}");

    Ok(())
}
