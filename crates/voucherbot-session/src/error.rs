use thiserror::Error;

/// Failure modes of a voucher-testing session.
///
/// `UnexpectedStatus`, `UnexpectedPage`, and `Deserialize` mean the remote no
/// longer matches the reverse-engineered contract (endpoint moved, markup
/// changed, outage page). `MissingElement` means a well-formed page simply did
/// not contain the thing the flow needs next, e.g. no store delivers to the
/// given address. `VoucherRejected` is the one expected-failure outcome:
/// the store answered properly and said no.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unexpected page at {url}: title was \"{title}\"")]
    UnexpectedPage { url: String, title: String },

    #[error("no {context} in page (selector \"{selector}\")")]
    MissingElement { context: String, selector: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("voucher action rejected by store: {message}")]
    VoucherRejected { message: String },
}
