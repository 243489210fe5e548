use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use perk_offers::clients::http::OutboundClient;
use perk_offers::config::AppConfig;
use perk_offers::importer::{replay, HttpSender};

#[derive(Parser)]
#[command(name = "event_streamer", about = "Replay a member transaction CSV into the offer endpoint")]
struct Args {
    /// CSV file with memberId, lastTransactionUtcTs, lastTransactionType,
    /// lastTransactionPointsBought and lastTransactionRevenueUSD columns
    #[arg(long, default_value = "data/member_data.csv")]
    input: String,

    #[arg(long, default_value = "http://localhost:6000/api/requests/v1")]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = AppConfig::from_env();
    perk_offers::logging::init(cfg.log_file.as_deref())?;

    let reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("opening {}", args.input))?;

    let outbound = OutboundClient::open(cfg.outbound_timeout())?;
    let sender = HttpSender {
        endpoint: args.endpoint.clone(),
        outbound: outbound.clone(),
    };

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::with_template("{spinner} {pos} rows {msg}")?);
    progress.set_message(format!("-> {}", args.endpoint));

    let tally = replay(reader, &sender, &progress).await;
    progress.finish_with_message(format!(
        "sent={} skipped={} failed={}",
        tally.sent, tally.skipped, tally.failed
    ));

    outbound.close();
    Ok(())
}
