//! Stateful HTTP client for the remote ordering flow.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};

use crate::basket::parse_basket;
use crate::error::SessionError;
use crate::types::{Address, Basket, BasketMutationResponse};

// Path casing is the remote's own; the delivery search endpoint really is
// lowercase while its siblings are not.
const DELIVERY_ENTRY_PATH: &str = "/eStore/en/OrderTimeNowOrLater/Delivery";
const DELIVERY_SEARCH_PATH: &str = "/estore/en/DeliverySearch/AllDetails";
const APPLY_VOUCHER_PATH: &str = "/eStore/en/Basket/ApplyVoucher";
const REMOVE_VOUCHER_PATH: &str = "/eStore/en/Basket/RemoveVoucher";
const BASKET_VIEW_PATH: &str = "/eStore/en/Basket/GetBasketView";
const REMOVE_PRODUCT_PATH: &str = "/eStore/en/Basket/RemoveProductAndGetBasket";

/// Title fragment every real ordering page carries. Checked on the first
/// request of a session as a canary for outage pages and silent redirects
/// to maintenance notices.
const ORDERING_BANNER: &str = "Domino's Online Ordering";

const STORE_RESULT_SELECTOR: &str = "#search-items .store-result";

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static STORE_RESULT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(STORE_RESULT_SELECTOR).expect("valid selector"));

/// HTTP client for one logical ordering session.
///
/// The remote is a stateful web application: identity lives in session
/// cookies and the basket lives server-side. Every request goes through one
/// cookie-carrying `reqwest::Client`, so whatever the site sets during
/// [`login`](Self::login) is presented on the basket calls that follow.
///
/// Operations are strictly sequential request/response pairs. One client per
/// logical session; concurrent use of a single session is unsupported, and
/// the basket operations require a prior successful login on the same client.
#[derive(Debug)]
pub struct EstoreClient {
    http: Client,
    base_url: Url,
}

impl EstoreClient {
    /// Creates a client for the store at `store_url` with the given total
    /// request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidUrl`] if `store_url` does not parse.
    /// - [`SessionError::Http`] if the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn new(store_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SessionError> {
        let base_url = Url::parse(store_url).map_err(|e| SessionError::InvalidUrl {
            url: store_url.to_owned(),
            reason: e.to_string(),
        })?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Establishes a delivery session for `address`.
    ///
    /// Three requests, in order: fetch the delivery entry page and check its
    /// title against the expected site banner, submit the address to the
    /// store search, then follow the first store result's confirmation link.
    /// On success the session state lives entirely in the cookie jar; there
    /// is no token to return.
    ///
    /// A failed banner check aborts before the address form is submitted, so
    /// the only side effect of a canary failure is the initial GET.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnexpectedStatus`] — non-200 on any of the three
    ///   steps.
    /// - [`SessionError::UnexpectedPage`] — entry page title does not carry
    ///   the expected banner.
    /// - [`SessionError::MissingElement`] — the search result page has no
    ///   store link, i.e. no store delivers to `address`.
    /// - [`SessionError::Http`] — transport failure.
    pub async fn login(&self, address: &Address) -> Result<(), SessionError> {
        let entry_url = self.endpoint(DELIVERY_ENTRY_PATH)?;
        tracing::debug!(url = %entry_url, "fetching delivery entry page");
        let response = self.http.get(entry_url.clone()).send().await?;
        ensure_ok(&response)?;
        let body = response.text().await?;
        let title = page_title(&body);
        if !title.contains(ORDERING_BANNER) {
            return Err(SessionError::UnexpectedPage {
                url: entry_url.to_string(),
                title,
            });
        }

        let search_url = self.endpoint(DELIVERY_SEARCH_PATH)?;
        let form = [
            ("ordertimenowlater", "now"),
            ("Customer.UnitNo", address.unit_number.as_str()),
            ("Customer.StreetNo", address.street_number.as_str()),
            ("Customer.Street", address.street_name.as_str()),
            ("Customer.Suburb", address.suburb.as_str()),
            ("Customer.Postcode", address.postcode.as_str()),
        ];
        tracing::debug!(
            suburb = %address.suburb,
            postcode = %address.postcode,
            "searching for a delivering store"
        );
        let response = self.http.post(search_url).form(&form).send().await?;
        ensure_ok(&response)?;
        let body = response.text().await?;
        let href = store_confirm_href(&body).ok_or_else(|| SessionError::MissingElement {
            context: "store result for the given address".to_owned(),
            selector: STORE_RESULT_SELECTOR.to_owned(),
        })?;

        let confirm_url = self.endpoint(&href)?;
        tracing::debug!(url = %confirm_url, "confirming delivery store");
        let response = self.http.get(confirm_url).send().await?;
        ensure_ok(&response)?;
        tracing::debug!("delivery session established");
        Ok(())
    }

    /// Applies a voucher code to the session's basket.
    ///
    /// The remote acknowledges with a JSON envelope rather than basket
    /// state; call [`get_basket`](Self::get_basket) afterwards to see what
    /// the code actually produced.
    ///
    /// # Errors
    ///
    /// - [`SessionError::VoucherRejected`] — the store refused the code;
    ///   carries the store's first message verbatim.
    /// - [`SessionError::UnexpectedStatus`] / [`SessionError::Deserialize`] —
    ///   the response is not the known envelope contract.
    /// - [`SessionError::Http`] — transport failure.
    pub async fn apply_voucher(&self, code: &str) -> Result<(), SessionError> {
        let form = [
            ("voucherCode", code),
            ("controllerName", "ProductMenu"),
            ("pageCodeProductMenu", ""),
            ("paymentMethod", ""),
            ("addFromVoucherBox", "true"),
        ];
        tracing::debug!(code = %code, "applying voucher");
        self.basket_mutation(APPLY_VOUCHER_PATH, &form, "apply-voucher envelope")
            .await
    }

    /// Removes a voucher from the basket by its `orderItemId` handle.
    ///
    /// The endpoint only acknowledges; it does not return basket state. Call
    /// [`get_basket`](Self::get_basket) to observe the result.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`apply_voucher`](Self::apply_voucher); a
    /// rejection here usually means the handle is stale.
    pub async fn remove_voucher(&self, order_item_id: &str) -> Result<(), SessionError> {
        let form = [
            ("orderItemId", order_item_id),
            ("controllerName", "ProductMenu"),
            ("pageCodeProductMenu", ""),
            ("paymentMethod", ""),
        ];
        tracing::debug!(order_item_id = %order_item_id, "removing voucher");
        self.basket_mutation(REMOVE_VOUCHER_PATH, &form, "remove-voucher envelope")
            .await
    }

    /// Fetches and parses the current basket view.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnexpectedStatus`] — non-200 response.
    /// - [`SessionError::Http`] — transport failure.
    pub async fn get_basket(&self) -> Result<Basket, SessionError> {
        let url = self.endpoint(BASKET_VIEW_PATH)?;
        tracing::debug!(url = %url, "fetching basket view");
        let response = self.http.get(url).send().await?;
        ensure_ok(&response)?;
        let body = response.text().await?;
        Ok(parse_basket(&body))
    }

    /// Removes a product from the basket by its `orderItemId` handle.
    ///
    /// Unlike the voucher endpoints, this one returns the refreshed basket
    /// view in its response body, so the post-removal state comes back
    /// without a second request.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnexpectedStatus`] — non-200 response.
    /// - [`SessionError::Http`] — transport failure.
    pub async fn remove_item(&self, order_item_id: &str) -> Result<Basket, SessionError> {
        let mut url = self.endpoint(REMOVE_PRODUCT_PATH)?;
        url.query_pairs_mut().append_pair("orderItemId", order_item_id);
        tracing::debug!(order_item_id = %order_item_id, "removing basket item");
        let response = self.http.post(url).send().await?;
        ensure_ok(&response)?;
        let body = response.text().await?;
        Ok(parse_basket(&body))
    }

    /// POSTs a basket mutation and interprets the acknowledgement envelope.
    ///
    /// The site's own client duplicates the form fields into the query
    /// string and the endpoints accept either location; both are sent here.
    /// A non-empty `Messages` in the envelope is the store refusing the
    /// action and maps to [`SessionError::VoucherRejected`] with the first
    /// message.
    async fn basket_mutation(
        &self,
        path: &str,
        form: &[(&str, &str)],
        context: &str,
    ) -> Result<(), SessionError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().extend_pairs(form.iter().copied());
        let response = self.http.post(url).form(form).send().await?;
        ensure_ok(&response)?;
        let body = response.text().await?;
        let envelope = serde_json::from_str::<BasketMutationResponse>(&body).map_err(|e| {
            SessionError::Deserialize {
                context: context.to_owned(),
                source: e,
            }
        })?;
        if let Some(message) = envelope.messages.first() {
            return Err(SessionError::VoucherRejected {
                message: message.clone(),
            });
        }
        Ok(())
    }

    /// Resolves a path or page-relative href against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, SessionError> {
        self.base_url
            .join(path)
            .map_err(|e| SessionError::InvalidUrl {
                url: path.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Returns an error unless the response completed with `200 OK`.
///
/// Every known-good response in this flow is a plain 200 (redirects are
/// followed by the transport first); anything else is protocol drift.
fn ensure_ok(response: &reqwest::Response) -> Result<(), SessionError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(());
    }
    Err(SessionError::UnexpectedStatus {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}

/// Concatenated text of the document's `<title>`, trimmed. Empty when the
/// document has no title element.
fn page_title(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

/// Href of the first store search result, if any.
fn store_confirm_href(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&STORE_RESULT)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
