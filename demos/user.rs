//! Example demonstrating how to fetch a user with hfapi
//!
//! This example shows:
//! - Building a client from the `HF_API_KEY` environment variable
//! - Checking that the key is accepted
//! - Fetching a user and printing their name

use hfapi::client::Builder;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This is just for seeing the logs, you may remove it if you wish.
    SimpleLogger::new().env().init()?;

    let client = Builder::from_env().build()?;

    if !client.test_api_key().await? {
        println!("The API key was rejected.");
        return Ok(());
    }

    let user = client.user(2_240_993).await?;
    match user.result().and_then(|r| r["username"].as_str()) {
        Some(name) => println!("Username: {name}"),
        None => println!("No such user: {}", *user),
    }

    Ok(())
}
