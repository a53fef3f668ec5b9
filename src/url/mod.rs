//! URL handling: seed normalization and link resolution
//!
//! A seed may be given as a bare hostname (`shop.example.com`) or a full URL
//! (`https://shop.example.com/`). The normalized hostname keys all per-domain
//! crawl state; the root URL is where the crawl of that domain starts.

use url::Url;

/// A normalized crawl seed
///
/// `domain` is the hostname with scheme and trailing slash stripped; `root`
/// is the absolute URL the domain crawl starts from. A seed given with an
/// explicit scheme keeps it (so plain-HTTP test servers stay reachable);
/// bare hostnames are rooted at `https://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub domain: String,
    pub root: String,
}

/// Parses a seed string into a normalized domain and its root URL
///
/// # Examples
///
/// ```
/// use shopmap::url::parse_seed;
///
/// let seed = parse_seed("https://Shop.Example.com/");
/// assert_eq!(seed.domain, "shop.example.com");
/// assert_eq!(seed.root, "https://Shop.Example.com");
///
/// let seed = parse_seed("shop.example.com");
/// assert_eq!(seed.root, "https://shop.example.com");
/// ```
pub fn parse_seed(input: &str) -> Seed {
    let trimmed = input.trim().trim_end_matches('/');

    let (had_scheme, stripped) = match trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
    {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let domain = stripped.trim_end_matches('/').to_lowercase();

    let root = if had_scheme {
        trimmed.to_string()
    } else {
        format!("https://{}", domain)
    };

    Seed { domain, root }
}

/// Resolves a link href to an absolute URL against the page it appeared on
///
/// Returns None if the link should be skipped:
/// - `javascript:`, `mailto:`, `tel:` schemes
/// - `data:` URIs
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = base_url.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    Some(resolved)
}
