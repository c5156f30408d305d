#[tokio::main]
async fn main() -> anyhow::Result<()> {
    autoseo_server::start().await
}
