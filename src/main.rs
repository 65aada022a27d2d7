//! Category runner CLI entry point

fn main() {
    category_runner::cli::run();
}
