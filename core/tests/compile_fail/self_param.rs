struct Port;

impl Port {
    #[outcome::pending]
    async fn parse(self) -> outcome::Outcome<u16, String> {
        outcome::Outcome::failure(String::new())
    }
}

fn main() {
    let _ = Port;
}
