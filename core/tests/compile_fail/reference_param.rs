#[outcome::pending]
async fn parse(raw: &str) -> outcome::Outcome<u16, String> {
    outcome::Outcome::failure(raw.to_owned())
}

fn main() {}
