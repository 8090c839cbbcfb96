use merchload::error::AppResult;

fn main() -> AppResult<()> {
    merchload::run()
}
