//! One voucher-test run: login once, then apply/inspect/clean up for each
//! code in order.
//!
//! A rejected code is recorded and the run moves on to the next one; any
//! other session error aborts the whole run, since protocol drift on one
//! call makes every later call untrustworthy.

use anyhow::Context;

use voucherbot_core::AppConfig;
use voucherbot_session::{Address, Basket, EstoreClient, SessionError};

use crate::report::{self, ResultsLog};
use crate::Cli;

pub(crate) async fn run(config: &AppConfig, cli: &Cli) -> anyhow::Result<()> {
    let address = Address {
        unit_number: cli.unit_number.clone(),
        street_number: cli.street_number.clone(),
        street_name: cli.street_name.clone(),
        suburb: cli.suburb.clone(),
        postcode: cli.postcode.clone(),
    };

    let client = EstoreClient::new(
        &config.store_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build session client")?;

    tracing::info!(
        store_url = %config.store_url,
        suburb = %address.suburb,
        postcode = %address.postcode,
        "establishing delivery session"
    );
    client.login(&address).await.context("login failed")?;

    let mut log = ResultsLog::open(&config.results_path).await?;

    let mut applied: usize = 0;
    let mut rejected: usize = 0;

    for code in &cli.voucher_codes {
        println!("[ ] Trying code {code}");

        match client.apply_voucher(code).await {
            Ok(()) => {}
            Err(SessionError::VoucherRejected { message }) => {
                tracing::warn!(code = %code, message = %message, "voucher rejected by store");
                log.append(&report::rejection_block(code, &message)).await?;
                rejected = rejected.saturating_add(1);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to apply voucher {code}"));
            }
        }

        let basket = client
            .get_basket()
            .await
            .with_context(|| format!("failed to fetch basket after applying {code}"))?;

        for voucher in &basket.vouchers {
            println!(
                "[+] Voucher {}: {} {} ({})",
                voucher.order_item_id, voucher.code, voucher.price, voucher.name
            );
        }
        for item in &basket.items {
            println!(
                "[+] Item {}: {} ({})",
                item.order_item_id, item.product_code, item.name
            );
        }

        log.append(&report::basket_block(code, &basket)).await?;
        applied = applied.saturating_add(1);

        if cli.keep_basket {
            tracing::info!(code = %code, "leaving basket contents in place");
        } else {
            clear_basket(&client, basket).await?;
        }
    }

    println!(
        "tested {} codes: {applied} applied, {rejected} rejected",
        cli.voucher_codes.len()
    );
    if applied == 0 {
        anyhow::bail!("every voucher code was rejected");
    }
    Ok(())
}

/// Empties the basket by removing the first item/voucher until none remain.
///
/// Items go first; their removal endpoint returns the next basket state
/// directly. Vouchers only get an acknowledgement, so each removal is
/// followed by a fresh basket fetch. If a removal round does not shrink the
/// basket the remote is not honoring the handle and the loop aborts rather
/// than spinning forever.
async fn clear_basket(client: &EstoreClient, mut basket: Basket) -> anyhow::Result<()> {
    while let Some(item) = basket.items.first() {
        let id = item.order_item_id.clone();
        println!("[!] Removing item {} ({})", id, item.name);
        let next = client
            .remove_item(&id)
            .await
            .with_context(|| format!("failed to remove item {id}"))?;
        if next.items.len() >= basket.items.len() {
            anyhow::bail!("basket did not shrink after removing item {id}");
        }
        basket = next;
    }

    while let Some(voucher) = basket.vouchers.first() {
        let id = voucher.order_item_id.clone();
        println!("[!] Removing voucher {} ({})", id, voucher.name);
        client
            .remove_voucher(&id)
            .await
            .with_context(|| format!("failed to remove voucher {id}"))?;
        let next = client
            .get_basket()
            .await
            .context("failed to fetch basket after voucher removal")?;
        if next.vouchers.len() >= basket.vouchers.len() {
            anyhow::bail!("basket did not shrink after removing voucher {id}");
        }
        basket = next;
    }

    Ok(())
}
