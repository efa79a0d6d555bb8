
use anyhow::Context;
use futures_executor::block_on;
use outcome::{pending, Outcome, Panicked};
use std::fmt::Display;
use tools::{init_logging, yield_now};

#[pending]
async fn parse_port(raw: String) -> Outcome<u16> {
    yield_now().await;
    raw.trim()
        .parse::<u16>()
        .with_context(|| format!("invalid port {raw:?}"))
        .into()
}

#[pending]
async fn describe<T: Display>(value: T) -> Outcome<String, String> {
    if value.to_string().is_empty() {
        return Outcome::failure(String::from("empty"));
    }
    Outcome::success(format!("<{value}>"))
}

#[pending]
pub(crate) async fn nested(raw: String) -> outcome::Outcome<u16> {
    parse_port(raw).then(|port| Outcome::success(port + 1)).await
}

#[pending]
async fn greet(greeting: &'static str, name: String) -> Outcome<String, String> {
    Outcome::success(format!("{greeting}, {name}"))
}

#[pending(catching)]
async fn checked_div(a: i32, b: i32) -> Outcome<i32> {
    yield_now().await;
    Outcome::success(a / b)
}

#[test]
fn test_pending_attribute_success() {
    init_logging();

    let res = parse_port(String::from(" 8080 "))
        .then(|port| Outcome::success(u32::from(port) * 2))
        .block();

    assert_eq!(res.value(), Some(&16160));
}

#[test]
fn test_pending_attribute_failure_is_data() {
    init_logging();

    let res = block_on(parse_port(String::from("eighty")));
    assert!(res.is_error());
    assert!(res.unwrap_failure().to_string().contains("invalid port"));
}

#[test]
fn test_pending_attribute_generic_and_early_return() {
    init_logging();

    assert_eq!(describe(7).block(), Outcome::success(String::from("<7>")));
    assert_eq!(describe("").block(), Outcome::failure(String::from("empty")));
}

#[test]
fn test_pending_attribute_awaits_other_pending() {
    init_logging();

    assert_eq!(nested(String::from("79")).block().value(), Some(&80));
}

#[test]
fn test_pending_attribute_static_borrows() {
    init_logging();

    assert_eq!(
        greet("hello", String::from("port")).block(),
        Outcome::success(String::from("hello, port"))
    );
}

#[test]
fn test_pending_attribute_catching() {
    init_logging();

    assert_eq!(checked_div(9, 3).block().value(), Some(&3));

    let failure = block_on(checked_div(1, 0)).unwrap_failure();
    assert!(failure.is::<Panicked>());
}

#[test]
fn test_pending_attribute_rejections() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/compile_fail/*.rs");
}
