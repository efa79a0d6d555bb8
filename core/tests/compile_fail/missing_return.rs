#[outcome::pending]
async fn parse(raw: String) {
    drop(raw);
}

fn main() {}
