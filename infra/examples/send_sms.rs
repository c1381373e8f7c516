//! Send one SMS through the provider the environment selects
//!
//! ```text
//! SMS_PROVIDER=semaphore SEMAPHORE_API_KEY=... \
//!     cargo run -p mn_infra --example send_sms -- 09171234567 "Salam from the masjid"
//! ```

use anyhow::{bail, Context};
use mn_infra::{get_sms_provider, telemetry::init_tracing};
use mn_shared::{mask_phone_number, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(&LoggingConfig::from_env()).context("failed to set up logging")?;

    let mut args = std::env::args().skip(1);
    let to = args.next().context("usage: send_sms <phone> <message>")?;
    let message = args.collect::<Vec<_>>().join(" ");
    if message.trim().is_empty() {
        bail!("message must not be empty");
    }

    let provider = get_sms_provider();
    println!("Sending via {} to {}", provider.name(), mask_phone_number(&to));

    let result = provider.send(&to, &message).await;
    match result.error() {
        None => println!("✓ SMS sent"),
        Some(error) => bail!("SMS failed: {}", error),
    }

    Ok(())
}
