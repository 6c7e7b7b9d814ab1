//! URL composition.
//!
//! Composition is deliberately string-based: path segments join with a
//! single separator and query pairs join as literal `name=value`, with no
//! percent-encoding or normalization. Callers must pre-encode values
//! containing reserved characters. The `url` crate is used only to decide
//! whether a request URL is absolute, never to rewrite it.

use std::sync::LazyLock;

use tracing::warn;
use url::Url;

use crate::config::NO_DESTINATION;

/// `word.tld`-style pattern: a schemeless URL matching this was probably
/// meant to be absolute.
static BARE_DOMAIN_RE: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*(\.[A-Za-z]{2,})+([/?#].*)?$").unwrap()
});

/// Join ordered name/value pairs as a literal `a=1&b=2` string.
///
/// Crude on purpose, so it works for query strings as well as form-data and
/// `x-www-form-urlencoded` payloads. Values are joined verbatim; pre-encode
/// anything containing `&`, `=`, or other reserved characters.
pub fn crude_query_string<N: AsRef<str>, V: AsRef<str>>(pairs: &[(N, V)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compose the request URL from the client's base URL and the per-request
/// fragments.
///
/// An absolute request `url` replaces `base_url` for this request; a
/// relative one is appended to it. `path_params` are appended in order after
/// the resolved path. `query_params` are applied onto the query component
/// one name at a time — an existing name is overwritten in place, a new one
/// is appended. With neither `url` nor `base_url`, composition degrades to
/// [`NO_DESTINATION`] rather than panicking.
pub fn compose(
    base_url: Option<&str>,
    url: Option<&str>,
    path_params: &[String],
    query_params: &[(String, String)],
) -> String {
    let resolved = match url {
        Some(candidate) if is_absolute(candidate) => candidate.to_string(),
        Some(candidate) => {
            if BARE_DOMAIN_RE.is_match(candidate) {
                warn!(
                    url = candidate,
                    "request URL looks like a bare domain; missing scheme?"
                );
            }
            join_path(base_url.unwrap_or(NO_DESTINATION), candidate)
        }
        None => base_url.unwrap_or(NO_DESTINATION).to_string(),
    };

    let (mut path, existing_query) = split_query(&resolved);
    for segment in path_params {
        path = join_path(&path, segment);
    }

    let mut pairs = parse_query(existing_query);
    for (name, value) in query_params {
        set_pair(&mut pairs, name, value);
    }

    if pairs.is_empty() {
        path
    } else {
        format!("{}?{}", path, crude_query_string(&pairs))
    }
}

/// Absolute means "parses with a host": `https://api.test/v1` is,
/// `/users` and `users.com` are not.
fn is_absolute(candidate: &str) -> bool {
    Url::parse(candidate).map(|url| url.has_host()).unwrap_or(false)
}

/// Join two path pieces with exactly one `/` between them.
fn join_path(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if segment.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{segment}")
    }
}

fn split_query(composed: &str) -> (String, Option<&str>) {
    match composed.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query)),
        None => (composed.to_string(), None),
    }
}

/// Naive inverse of [`crude_query_string`]: a piece without `=` becomes a
/// name with an empty value.
fn parse_query(query: Option<&str>) -> Vec<(String, String)> {
    let Some(query) = query else {
        return Vec::new();
    };
    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (piece.to_string(), String::new()),
        })
        .collect()
}

/// Overwrite an existing name in place, or append a new one.
fn set_pair(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    match pairs.iter_mut().find(|(existing, _)| existing == name) {
        Some(pair) => pair.1 = value.to_string(),
        None => pairs.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_relative_url_appends_to_base() {
        let url = compose(Some("http://localhost:3000/api"), Some("/users"), &[], &[]);
        assert_eq!(url, "http://localhost:3000/api/users");
    }

    #[test]
    fn test_relative_url_without_leading_slash() {
        let url = compose(Some("http://localhost:3000/api/"), Some("users"), &[], &[]);
        assert_eq!(url, "http://localhost:3000/api/users");
    }

    #[test]
    fn test_absolute_url_overrides_base() {
        let url = compose(
            Some("http://localhost:3000/api"),
            Some("https://lol.com/elsewhere"),
            &[],
            &[],
        );
        assert_eq!(url, "https://lol.com/elsewhere");
    }

    #[test]
    fn test_path_params_append_in_order() {
        let url = compose(
            None,
            Some("https://lol.com/base"),
            &["users".to_string(), "123".to_string()],
            &[],
        );
        assert_eq!(url, "https://lol.com/base/users/123");
    }

    #[test]
    fn test_query_params_build_query_string() {
        let url = compose(
            Some("https://api.test/v1"),
            Some("/users"),
            &[],
            &params(&[("firstName", "peter"), ("lastName", "parker")]),
        );
        assert_eq!(
            url,
            "https://api.test/v1/users?firstName=peter&lastName=parker"
        );
    }

    #[test]
    fn test_query_param_overwrites_existing_key() {
        let url = compose(
            None,
            Some("https://api.test/v1/users?page=1&size=10"),
            &[],
            &params(&[("page", "2")]),
        );
        assert_eq!(url, "https://api.test/v1/users?page=2&size=10");
    }

    #[test]
    fn test_path_params_land_before_existing_query() {
        let url = compose(
            None,
            Some("https://api.test/v1?origin=cli"),
            &["users".to_string()],
            &[],
        );
        assert_eq!(url, "https://api.test/v1/users?origin=cli");
    }

    #[test]
    fn test_no_url_uses_base() {
        let url = compose(Some("https://api.test/v1"), None, &[], &[]);
        assert_eq!(url, "https://api.test/v1");
    }

    #[test]
    fn test_no_url_no_base_degrades_to_sentinel() {
        let url = compose(None, None, &[], &[]);
        assert_eq!(url, NO_DESTINATION);
    }

    #[test]
    fn test_bare_domain_composes_anyway() {
        // Warns but proceeds: the schemeless URL is treated as relative.
        let url = compose(Some("https://api.test"), Some("lol.com"), &[], &[]);
        assert_eq!(url, "https://api.test/lol.com");
    }

    #[test]
    fn test_values_are_not_percent_encoded() {
        let url = compose(
            None,
            Some("https://api.test/search"),
            &[],
            &params(&[("q", "a b&c")]),
        );
        assert_eq!(url, "https://api.test/search?q=a b&c");
    }

    #[test]
    fn test_crude_query_string_joins_verbatim() {
        assert_eq!(
            crude_query_string(&[("grant_type", "password"), ("username", "foo")]),
            "grant_type=password&username=foo"
        );
        assert_eq!(crude_query_string::<&str, &str>(&[]), "");
    }
}
