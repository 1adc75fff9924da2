use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pricebot::run().await
}
