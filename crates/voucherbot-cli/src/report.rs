//! Append-only results file, one block per tested code.
//!
//! Block layout is a pure function over the parsed basket so it can be
//! tested without touching the filesystem; the IO half is a thin append
//! wrapper around `tokio::fs`.

use std::path::Path;

use anyhow::Context;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use voucherbot_session::Basket;

/// Handle to the results file, opened once per run in append mode.
pub(crate) struct ResultsLog {
    file: File,
}

impl ResultsLog {
    /// Opens (creating if absent) the results file at `path`.
    pub(crate) async fn open(path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open results file {}", path.display()))?;
        Ok(Self { file })
    }

    /// Appends one pre-formatted block.
    pub(crate) async fn append(&mut self, block: &str) -> anyhow::Result<()> {
        self.file
            .write_all(block.as_bytes())
            .await
            .context("failed to write to results file")?;
        Ok(())
    }
}

/// Formats the result block for a code the store accepted, listing every
/// voucher and item the basket held afterwards.
pub(crate) fn basket_block(code: &str, basket: &Basket) -> String {
    let mut out = format!("Code: {code}\n");
    for voucher in &basket.vouchers {
        out.push_str(&format!(
            "  Voucher {} {} ({})",
            voucher.code, voucher.price, voucher.name
        ));
        if let Some(count) = &voucher.pizzas_required {
            out.push_str(&format!(" needs {count} pizzas"));
        }
        out.push('\n');
    }
    for item in &basket.items {
        out.push_str(&format!("  Item {} ({})\n", item.product_code, item.name));
    }
    out
}

/// Formats the result block for a code the store refused.
pub(crate) fn rejection_block(code: &str, message: &str) -> String {
    format!("Code: {code}\n  Rejected: {message}\n")
}
