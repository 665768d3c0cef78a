//! Hostname canonicalization.
//!
//! Whitelist keys and activity domains always pass through [`normalize_host`]
//! so that user-typed input, full URLs, and stored legacy keys compare equal.
//! Normalization never fails observably — unparseable input degrades to a
//! best-effort manual strip.

use url::Url;

/// Canonicalizes a hostname or URL into a comparable key: lowercase, single
/// trailing dot stripped, leading `www.` stripped, explicit port stripped,
/// IDN hosts in punycode form.
///
/// Idempotent: `normalize_host(normalize_host(x)) == normalize_host(x)`.
/// Subdomains stay distinct from their parent domain.
pub fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(&trimmed);

    // Full URL parsing handles IDN/punycode and port stripping; inputs
    // without a scheme get one synthesized so the same parser applies.
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("https://{}", trimmed))
    };

    match parsed.ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => strip_www(&host).to_string(),
        None => fallback_strip(trimmed),
    }
}

/// Extracts and normalizes the host of a full URL. `None` when the input has
/// no host (e.g. `about:blank`).
pub fn host_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(normalize_host(host))
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn fallback_strip(s: &str) -> String {
    let s = strip_www(s);
    match s.rfind(':') {
        Some(i) if !s[i + 1..].is_empty() && s[i + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            s[..i].to_string()
        }
        _ => s.to_string(),
    }
}
