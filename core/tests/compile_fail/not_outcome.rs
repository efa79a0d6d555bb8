#[outcome::pending]
async fn parse(raw: String) -> Result<u16, String> {
    Err(raw)
}

fn main() {}
