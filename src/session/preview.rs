//! Preview references for an accepted artifact.

/// `data:` URI that opens the HTML directly in a browser.
pub fn data_uri(html: &str) -> String {
    format!("data:text/html;charset=utf-8,{}", urlencoding::encode(html))
}
