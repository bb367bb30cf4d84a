#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::run_department().await
}
