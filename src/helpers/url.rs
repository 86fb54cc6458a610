//! URL helper functions

/// Normalize a possibly protocol-relative asset URL to absolute `https`.
///
/// The CMS delivers asset URLs like `//images.ctfassets.net/...`; anything
/// already absolute is passed through unchanged.
///
/// # Examples
/// ```ignore
/// ensure_https("//images.example/x.jpg") // -> "https://images.example/x.jpg"
/// ```
pub fn ensure_https(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// Join a path onto the configured site base URL without doubling slashes.
pub fn absolute_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}
