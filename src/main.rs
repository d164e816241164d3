#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = homewatch_rust::run().await {
        eprintln!("homewatch-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
