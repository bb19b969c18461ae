//! Presentation-time scheme normalization for redirect targets.

use std::borrow::Cow;

/// Builds the `Location` for a stored original URL.
///
/// URLs that do not start with `http://` or `https://` get `https://`
/// prepended. The stored value is never rewritten; this runs only when a
/// redirect is answered. Applying it twice yields the same string.
///
/// # Examples
///
/// ```
/// use snipurl::utils::redirect_target::redirect_target;
///
/// assert_eq!(redirect_target("example.com/x"), "https://example.com/x");
/// assert_eq!(redirect_target("http://example.com"), "http://example.com");
/// ```
pub fn redirect_target(original_url: &str) -> Cow<'_, str> {
    if original_url.starts_with("http://") || original_url.starts_with("https://") {
        Cow::Borrowed(original_url)
    } else {
        Cow::Owned(format!("https://{original_url}"))
    }
}
