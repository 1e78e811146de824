mod common;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let client = common::client_from_env()?;
    let response = client.balance().await?;
    println!("balance: {}", response.text());

    Ok(())
}
