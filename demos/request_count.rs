//! Example demonstrating the request counter
//!
//! This example shows:
//! - Sending a few requests for threads and posts
//! - Reading how many requests count against the hourly limit

use hfapi::{client::Builder, Error};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().env().init()?;

    let client = Builder::from_env().build()?;

    // first page of a thread, as raw MyCode
    let thread = client.thread(5_665_556, 1, true).await;
    let post = client.post(54_655_887, false).await;

    for reply in [thread, post] {
        match reply {
            Ok(payload) => println!("success: {:?}", payload.success()),
            Err(Error::InvalidApiKey) => println!("key rejected, not counted"),
            Err(e) => println!("request failed: {e}"),
        }
    }

    println!("Requests in the last hour: {}", client.request_count());
    if let Some(latest) = client.latest_request() {
        println!("Latest request at: {latest} ms");
    }

    Ok(())
}
