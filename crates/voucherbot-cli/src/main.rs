mod report;
mod run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "voucherbot-cli")]
#[command(about = "Tests promotional voucher codes against the online ordering flow")]
struct Cli {
    /// Unit or apartment number of the delivery address.
    #[arg(long, default_value = "")]
    unit_number: String,

    /// Street number of the delivery address.
    #[arg(long)]
    street_number: String,

    /// Street name of the delivery address.
    #[arg(long)]
    street_name: String,

    /// Suburb of the delivery address.
    #[arg(long)]
    suburb: String,

    /// Postcode of the delivery address.
    #[arg(long)]
    postcode: String,

    /// Voucher code to test. Repeat the flag to test several codes in one
    /// session.
    #[arg(long = "voucher-code", value_name = "CODE", required = true)]
    voucher_codes: Vec<String>,

    /// Leave applied vouchers and items in the basket instead of cleaning up.
    #[arg(long)]
    keep_basket: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = voucherbot_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    run::run(&config, &cli).await
}
