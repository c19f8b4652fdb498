//! ragway gateway binary
//!
//! This is the minimal entrypoint for the ragway server.
//! All logic is in the library; main.rs only invokes cli::run().

#[tokio::main]
async fn main() {
    if let Err(err) = ragway::cli::run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
