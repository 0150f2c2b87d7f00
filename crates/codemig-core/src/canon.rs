//! Path canonicalization: maps captured paths to a comparison-stable form.
//!
//! Canonicalization is idempotent: `canonicalize(canonicalize(x)) ==
//! canonicalize(x)` for the canonical component.

/// Sentinel for path pieces built from runtime values that cannot be
/// statically resolved.
pub const DYNAMIC_TOKEN: &str = "<dynamic>";

/// Neutral token substituted for every parameter segment in the
/// comparison pattern.
pub const WILDCARD_TOKEN: &str = "{*}";

/// The comparison-stable form of a captured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPath {
    /// Prefix-stripped path with parameter names retained
    /// (e.g. `/products/:id`).
    pub canonical: String,
    /// Canonical path with every parameter segment replaced by
    /// [`WILDCARD_TOKEN`] (e.g. `/products/{*}`).
    pub pattern: String,
    /// Original `:name` parameter names, in path order.
    pub params: Vec<String>,
}

impl CanonicalPath {
    /// Whether the path contains a statically unresolvable piece.
    #[must_use]
    pub fn has_dynamic(&self) -> bool {
        self.canonical.contains(DYNAMIC_TOKEN)
    }
}

/// Canonicalizes a raw captured path.
///
/// 1. Strips recognized base-URL prefixes, repeatedly, until none match.
/// 2. Lower-cases the scheme and host if present; path segment casing is
///    left untouched (paths may be case-sensitive).
/// 3. Records every `:name` segment in the side list and substitutes
///    [`WILDCARD_TOKEN`] for it in the pattern. `<dynamic>` segments also
///    become wildcards in the pattern but stay literal in the canonical
///    form, so unresolved entries still surface in reports.
#[must_use]
pub fn canonicalize(raw: &str, base_prefixes: &[String]) -> CanonicalPath {
    let mut s = raw.trim().to_owned();

    loop {
        let before = s.len();
        for prefix in base_prefixes {
            if !prefix.is_empty() && s.starts_with(prefix.as_str()) {
                s = s[prefix.len()..].to_owned();
            }
        }
        if s.len() == before {
            break;
        }
    }

    if s.is_empty() {
        s.push('/');
    }

    s = lowercase_authority(&s);

    let mut params = Vec::new();
    let mut canonical_segs = Vec::new();
    let mut pattern_segs = Vec::new();

    for seg in s.split('/') {
        if let Some(name) = seg.strip_prefix(':') {
            if !name.is_empty() {
                params.push(name.to_owned());
                canonical_segs.push(seg.to_owned());
                pattern_segs.push(WILDCARD_TOKEN.to_owned());
                continue;
            }
        }
        if seg == DYNAMIC_TOKEN {
            canonical_segs.push(seg.to_owned());
            pattern_segs.push(WILDCARD_TOKEN.to_owned());
            continue;
        }
        canonical_segs.push(seg.to_owned());
        pattern_segs.push(seg.to_owned());
    }

    CanonicalPath {
        canonical: canonical_segs.join("/"),
        pattern: pattern_segs.join("/"),
        params,
    }
}

/// Lower-cases the `scheme://host` portion of a URL, if one is present.
fn lowercase_authority(s: &str) -> String {
    let Some(scheme_end) = s.find("://") else {
        return s.to_owned();
    };
    let authority_start = scheme_end + 3;
    let path_start = s[authority_start..]
        .find('/')
        .map_or(s.len(), |i| authority_start + i);
    let mut out = s[..path_start].to_lowercase();
    out.push_str(&s[path_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(raw: &str) -> CanonicalPath {
        canonicalize(raw, &[])
    }

    #[test]
    fn plain_path_unchanged() {
        let c = canon("/products");
        assert_eq!(c.canonical, "/products");
        assert_eq!(c.pattern, "/products");
        assert!(c.params.is_empty());
    }

    #[test]
    fn param_segment_recorded_and_wildcarded() {
        let c = canon("/products/:id/reviews/:reviewId");
        assert_eq!(c.canonical, "/products/:id/reviews/:reviewId");
        assert_eq!(c.pattern, "/products/{*}/reviews/{*}");
        assert_eq!(c.params, vec!["id".to_string(), "reviewId".to_string()]);
    }

    #[test]
    fn base_prefix_stripped() {
        let prefixes = vec!["http://localhost:3000".to_string()];
        let c = canonicalize("http://localhost:3000/api/users", &prefixes);
        assert_eq!(c.canonical, "/api/users");
    }

    #[test]
    fn stacked_prefixes_stripped_repeatedly() {
        let prefixes = vec![
            "https://shop.example.com".to_string(),
            "/v2".to_string(),
        ];
        let c = canonicalize("https://shop.example.com/v2/cart", &prefixes);
        assert_eq!(c.canonical, "/cart");
    }

    #[test]
    fn host_lowercased_path_casing_kept() {
        let c = canon("HTTPS://Shop.Example.COM/Products/:id");
        assert_eq!(c.canonical, "https://shop.example.com/Products/:id");
        assert_eq!(c.pattern, "https://shop.example.com/Products/{*}");
    }

    #[test]
    fn dynamic_token_wildcarded_in_pattern_only() {
        let c = canon("/orders/<dynamic>/items");
        assert_eq!(c.canonical, "/orders/<dynamic>/items");
        assert_eq!(c.pattern, "/orders/{*}/items");
        assert!(c.has_dynamic());
        assert!(c.params.is_empty());
    }

    #[test]
    fn empty_after_strip_becomes_root() {
        let prefixes = vec!["http://localhost".to_string()];
        let c = canonicalize("http://localhost", &prefixes);
        assert_eq!(c.canonical, "/");
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let prefixes = vec!["http://localhost:3000".to_string()];
        let inputs = [
            "/products/:id",
            "http://localhost:3000/api/users",
            "HTTP://API.Example.com/Cart/:cartId",
            "/orders/<dynamic>",
            "/",
        ];
        for raw in inputs {
            let once = canonicalize(raw, &prefixes);
            let twice = canonicalize(&once.canonical, &prefixes);
            assert_eq!(once, twice, "canon not idempotent for {raw}");
        }
    }

    #[test]
    fn bare_colon_segment_is_not_a_param() {
        let c = canon("/a/:/b");
        assert_eq!(c.pattern, "/a/:/b");
        assert!(c.params.is_empty());
    }
}
