#[tokio::main]
async fn main() {
    obdscribe::run().await;
}
