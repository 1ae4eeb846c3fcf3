use url::Url;

/// Returns the site key of a URL: its lowercase host, plus `:port` when the
/// URL carries an explicit non-default port
///
/// Two URLs on the same host but different ports are different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use smart_inspector::url::site_key;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(site_key(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(site_key(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn site_key(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Lowercases a host and strips a leading `www.`
fn normalize_host(host: &str) -> String {
    let lower = host.to_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Checks whether `host` belongs to the main site
///
/// Both sides are lowercased and stripped of a leading `www.`; the host then
/// matches when it equals the main host or is a subdomain of it.
///
/// # Examples
///
/// ```
/// use smart_inspector::url::is_same_site;
///
/// assert!(is_same_site("www.Example.com", "example.com"));
/// assert!(is_same_site("sub.example.com", "example.com"));
/// assert!(!is_same_site("example.org", "example.com"));
/// ```
pub fn is_same_site(host: &str, main_host: &str) -> bool {
    let host = normalize_host(host);
    let main_host = normalize_host(main_host);
    host == main_host || host.ends_with(&format!(".{}", main_host))
}

/// Classifies a URL against the main site; URLs without a host are external
pub fn is_external(url: &Url, main_host: &str) -> bool {
    match site_key(url) {
        Some(key) => !is_same_site(&key, main_host),
        None => true,
    }
}
