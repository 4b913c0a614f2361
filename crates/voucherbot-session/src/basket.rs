//! Parser for the rendered basket view.
//!
//! All CSS-selector and data-attribute knowledge about the basket template
//! is concentrated here, so a markup change on the store side is a one-file
//! fix. Extraction is best-effort: entries missing their identifying
//! attributes are dropped, and a page with no recognizable entries parses to
//! an empty basket. The underlying HTML parser error-corrects arbitrary
//! input, so this function is total.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{Basket, Item, Voucher};

static VOUCHER_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".voucher-container").expect("valid selector"));
static VOUCHER_REMOVE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".voucher-details a.remove-voucher").expect("valid selector"));
static VOUCHER_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".voucher-details .at-voucher-price").expect("valid selector"));
static VOUCHER_FULFILL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".at-voucher-fulfill").expect("valid selector"));
static ITEM_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".basket-product").expect("valid selector"));
static ITEM_REMOVE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.remove-product").expect("valid selector"));

/// Matches the basket's fulfilment hint, e.g. `"Add a Pizza (3)"`; the
/// capture is the outstanding pizza count.
static PIZZAS_REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Add a Pizza \((\d+)\)").expect("valid regex"));

/// Extracts vouchers and items from a basket view document.
///
/// Document order is preserved. Entries whose remove control is missing or
/// carries empty identifying attributes are template placeholders and are
/// skipped. A document with no matching containers yields an empty basket;
/// that is valid data (an empty basket), not an error.
#[must_use]
pub fn parse_basket(html: &str) -> Basket {
    let doc = Html::parse_document(html);

    let vouchers = doc
        .select(&VOUCHER_CONTAINER)
        .filter_map(parse_voucher)
        .collect();
    let items = doc.select(&ITEM_CONTAINER).filter_map(parse_item).collect();

    Basket { vouchers, items }
}

fn parse_voucher(container: ElementRef<'_>) -> Option<Voucher> {
    let remove = container.select(&VOUCHER_REMOVE).next()?;
    let order_item_id = attr_or_empty(remove, "data-order-item-id");
    let code = attr_or_empty(remove, "data-usr-voucher-code");
    if order_item_id.is_empty() || code.is_empty() {
        return None;
    }

    let price = container
        .select(&VOUCHER_PRICE)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let pizzas_required = container
        .select(&VOUCHER_FULFILL)
        .next()
        .and_then(|el| pizzas_required(&text_of(el)));

    Some(Voucher {
        order_item_id: order_item_id.to_owned(),
        code: code.to_owned(),
        name: attr_or_empty(remove, "data-name").to_owned(),
        price,
        pizzas_required,
    })
}

fn parse_item(container: ElementRef<'_>) -> Option<Item> {
    let remove = container.select(&ITEM_REMOVE).next()?;
    let order_item_id = attr_or_empty(remove, "data-order-item-id");
    if order_item_id.is_empty() {
        return None;
    }

    Some(Item {
        order_item_id: order_item_id.to_owned(),
        name: attr_or_empty(remove, "data-name").to_owned(),
        product_code: attr_or_empty(remove, "data-product-code").to_owned(),
    })
}

/// Pizza count from the fulfilment hint text, when the hint matches.
fn pizzas_required(fulfill_text: &str) -> Option<String> {
    PIZZAS_REQUIRED
        .captures(fulfill_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

fn attr_or_empty<'a>(el: ElementRef<'a>, name: &str) -> &'a str {
    el.value().attr(name).unwrap_or_default()
}

/// Concatenated, trimmed text content of an element.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
#[path = "basket_test.rs"]
mod tests;
