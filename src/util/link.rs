use thiserror::Error;
use url::Url;

/// Reasons a record's link text cannot be opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The text is not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host to open.
    #[error("URL has no host")]
    MissingHost,
    /// Leading or trailing whitespace around the URL text.
    #[error("URL has surrounding whitespace")]
    SurroundingWhitespace,
}

/// Validate link text before it is handed to the system opener.
///
/// SEC: only `http`/`https` URLs with a host pass. Anything else (`file://`,
/// `javascript:`, relative paths, bare words) is rejected so arbitrary
/// strings from the data file never reach `open::that()`.
///
/// # Examples
///
/// ```
/// use instacats::util::validate_link;
///
/// let url = validate_link("https://instagram.com/felix").unwrap();
/// assert_eq!(url.host_str(), Some("instagram.com"));
///
/// assert!(validate_link("instagram.com/felix").is_err());
/// assert!(validate_link("file:///etc/passwd").is_err());
/// ```
pub fn validate_link(text: &str) -> Result<Url, LinkError> {
    // Url::parse would silently strip these
    if text.trim() != text {
        return Err(LinkError::SurroundingWhitespace);
    }
    let url = Url::parse(text)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(LinkError::MissingHost),
    }
}
