use super::*;

fn test_client() -> EstoreClient {
    EstoreClient::new("https://order.example.com", 30, "test-agent/0.1").unwrap()
}

// -----------------------------------------------------------------------
// Construction and URL resolution
// -----------------------------------------------------------------------

#[test]
fn new_rejects_invalid_store_url() {
    let result = EstoreClient::new("not-a-url", 30, "test-agent/0.1");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(
        matches!(err, SessionError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn endpoint_joins_absolute_path_preserving_case() {
    let client = test_client();
    let url = client.endpoint(DELIVERY_ENTRY_PATH).unwrap();
    assert_eq!(
        url.as_str(),
        "https://order.example.com/eStore/en/OrderTimeNowOrLater/Delivery"
    );
}

#[test]
fn endpoint_joins_confirmation_href_with_query() {
    let client = test_client();
    let url = client
        .endpoint("/eStore/en/Offer/ConfirmDelivery?storeNo=412")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://order.example.com/eStore/en/Offer/ConfirmDelivery?storeNo=412"
    );
}

#[test]
fn endpoint_tolerates_trailing_slash_on_base() {
    let client = EstoreClient::new("https://order.example.com/", 30, "test-agent/0.1").unwrap();
    let url = client.endpoint(BASKET_VIEW_PATH).unwrap();
    assert_eq!(
        url.as_str(),
        "https://order.example.com/eStore/en/Basket/GetBasketView"
    );
}

// -----------------------------------------------------------------------
// page_title
// -----------------------------------------------------------------------

#[test]
fn page_title_extracts_and_trims() {
    let html = "<html><head><title>  Domino's Online Ordering - Delivery  </title></head></html>";
    assert_eq!(page_title(html), "Domino's Online Ordering - Delivery");
}

#[test]
fn page_title_empty_when_absent() {
    assert_eq!(page_title("<html><head></head><body>x</body></html>"), "");
}

#[test]
fn page_title_contains_banner_fragment() {
    let html = "<html><head><title>Domino's Online Ordering</title></head></html>";
    assert!(page_title(html).contains(ORDERING_BANNER));
}

// -----------------------------------------------------------------------
// store_confirm_href
// -----------------------------------------------------------------------

#[test]
fn store_confirm_href_takes_first_result() {
    let html = r#"<div id="search-items">
        <a class="store-result" href="/eStore/en/Offer/ConfirmDelivery?storeNo=412">Kingsford</a>
        <a class="store-result" href="/eStore/en/Offer/ConfirmDelivery?storeNo=9">Randwick</a>
    </div>"#;
    assert_eq!(
        store_confirm_href(html).as_deref(),
        Some("/eStore/en/Offer/ConfirmDelivery?storeNo=412")
    );
}

#[test]
fn store_confirm_href_none_when_no_results() {
    let html = r#"<div id="search-items"><p>No stores deliver to this address.</p></div>"#;
    assert!(store_confirm_href(html).is_none());
}

#[test]
fn store_confirm_href_ignores_results_outside_search_items() {
    let html = r#"<div id="other"><a class="store-result" href="/x">nope</a></div>"#;
    assert!(store_confirm_href(html).is_none());
}

#[test]
fn store_confirm_href_finds_nested_result() {
    let html = r#"<div id="search-items"><ul><li>
        <a class="store-result" href="/eStore/en/Offer/ConfirmDelivery?storeNo=7">x</a>
    </li></ul></div>"#;
    assert_eq!(
        store_confirm_href(html).as_deref(),
        Some("/eStore/en/Offer/ConfirmDelivery?storeNo=7")
    );
}

#[test]
fn store_confirm_href_none_when_href_missing() {
    let html = r#"<div id="search-items"><a class="store-result">no link</a></div>"#;
    assert!(store_confirm_href(html).is_none());
}

// -----------------------------------------------------------------------
// Mutation envelope decoding
// -----------------------------------------------------------------------

#[test]
fn envelope_decodes_all_fields() {
    let envelope: BasketMutationResponse = serde_json::from_str(
        r#"{"Url":"/eStore/en/ProductMenu","Messages":["Voucher not valid"],"ResponseMessages":["x"]}"#,
    )
    .unwrap();
    assert_eq!(envelope.url.as_deref(), Some("/eStore/en/ProductMenu"));
    assert_eq!(envelope.messages, vec!["Voucher not valid"]);
    assert_eq!(envelope.response_messages, vec!["x"]);
}

#[test]
fn envelope_defaults_missing_fields() {
    let envelope: BasketMutationResponse = serde_json::from_str("{}").unwrap();
    assert!(envelope.url.is_none());
    assert!(envelope.messages.is_empty());
    assert!(envelope.response_messages.is_empty());
}

#[test]
fn envelope_rejects_non_object_body() {
    let result = serde_json::from_str::<BasketMutationResponse>("<html>oops</html>");
    assert!(result.is_err());
}
