//! Wire and domain types for the eStore ordering flow.
//!
//! ## Observed behavior from the live ordering site
//!
//! ### Basket mutation envelope
//! `ApplyVoucher` and `RemoveVoucher` answer `200 OK` with a small JSON body
//! even when the action is refused:
//!
//! ```json
//! { "Url": "/eStore/en/ProductMenu", "Messages": [], "ResponseMessages": [] }
//! ```
//!
//! A refused action keeps the 200 status and puts one or more human-readable
//! strings into `Messages` (e.g. `"Voucher not valid for this store"`).
//! `ResponseMessages` has never been observed non-empty; it is decoded and
//! kept but nothing branches on it. `Url` looks like a client-side redirect
//! hint and is likewise unused. All three fields are defaulted so an envelope
//! that omits any of them still decodes.
//!
//! ### Basket HTML data attributes
//! The basket view renders each entry's identifiers as `data-*` attributes on
//! its remove control, not as visible text. The template also ships hidden
//! placeholder rows whose attributes are empty strings; rows with an empty
//! `data-order-item-id` (or, for vouchers, empty `data-usr-voucher-code`) are
//! template scaffolding, not content.
//!
//! ### `orderItemId`
//! Server-assigned opaque handle for one basket entry. Only meaningful inside
//! the session that produced it; a fresh login invalidates previous handles.

use serde::Deserialize;

/// A delivery address, submitted verbatim to the store-search form.
///
/// All fields are free-form strings and none are validated locally; an
/// address the remote cannot match simply produces an empty search result.
#[derive(Debug, Clone, Default)]
pub struct Address {
    /// Unit or apartment number. Usually empty.
    pub unit_number: String,
    pub street_number: String,
    pub street_name: String,
    pub suburb: String,
    pub postcode: String,
}

/// A voucher line in the rendered basket.
///
/// Everything here is display-oriented text lifted straight out of the
/// markup; no field is parsed into a numeric type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    /// Basket handle consumed by [`remove_voucher`](crate::EstoreClient::remove_voucher).
    pub order_item_id: String,
    /// The voucher code as the store echoes it back.
    pub code: String,
    /// Display name, e.g. `"10% Off"`.
    pub name: String,
    /// Display price including sign and currency, e.g. `"-$10.00"`.
    pub price: String,
    /// Number of pizzas the voucher still needs before it applies, captured
    /// from the fulfilment hint text. `None` when the voucher is satisfied
    /// or the hint is absent.
    pub pizzas_required: Option<String>,
}

/// A product line in the rendered basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Basket handle consumed by [`remove_item`](crate::EstoreClient::remove_item).
    pub order_item_id: String,
    /// Display name, e.g. `"Margherita"`.
    pub name: String,
    /// The store's catalogue code, e.g. `"PZA01"`.
    pub product_code: String,
}

/// Parsed contents of one basket view, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    pub vouchers: Vec<Voucher>,
    pub items: Vec<Item>,
}

impl Basket {
    /// True when the basket holds neither vouchers nor items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty() && self.items.is_empty()
    }
}

/// JSON acknowledgement returned by the basket mutation endpoints.
///
/// See the module doc for the observed field semantics. A non-empty
/// `messages` is the store's way of refusing the action.
#[derive(Debug, Deserialize)]
pub struct BasketMutationResponse {
    #[serde(rename = "Url", default)]
    pub url: Option<String>,

    #[serde(rename = "Messages", default)]
    pub messages: Vec<String>,

    /// Never observed non-empty; decoded for completeness, not interpreted.
    #[serde(rename = "ResponseMessages", default)]
    pub response_messages: Vec<String>,
}
