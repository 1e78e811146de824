mod common;

use alphasms::SendMessage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let recipient = std::env::var("ALPHASMS_RECIPIENT")
        .map_err(|_| "ALPHASMS_RECIPIENT environment variable is required")?;
    let text = std::env::var("ALPHASMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the alphasms demo.".to_owned());

    let client = common::client_from_env()?;
    let response = client.send(SendMessage::new(text, recipient)).await?;

    let msg = response
        .root()
        .child("message")
        .and_then(|it| it.child("msg"));
    match msg {
        Some(msg) => println!(
            "id: {:?}, sms_id: {:?}, result: {}",
            msg.attribute("id"),
            msg.attribute("sms_id"),
            msg.text
        ),
        None => println!("reply: {:?}", response.root()),
    }

    Ok(())
}
