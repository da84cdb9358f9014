//! Read-only view of an incoming request, as seen by the guard.

use axum::extract::OriginalUri;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, Request, Uri};

/// What the guard needs to know about a request.
pub trait RequestInspector {
    /// The request path, e.g. `/api/force-logout`.
    fn path(&self) -> &str;

    /// The token carried in the `Authorization: Bearer ...` header.
    fn bearer_token(&self) -> Option<&str>;

    /// Whether the path matches `pattern` (see [`path_matches`]).
    fn matches_path(&self, pattern: &str) -> bool {
        path_matches(pattern, self.path())
    }
}

impl RequestInspector for Parts {
    fn path(&self) -> &str {
        full_path(&self.extensions, &self.uri)
    }

    fn bearer_token(&self) -> Option<&str> {
        bearer_from_headers(&self.headers)
    }
}

impl<B> RequestInspector for Request<B> {
    fn path(&self) -> &str {
        full_path(self.extensions(), self.uri())
    }

    fn bearer_token(&self) -> Option<&str> {
        bearer_from_headers(self.headers())
    }
}

/// The path as the client sent it.
///
/// Inside a nested router `uri` has the nest prefix stripped; axum keeps
/// the unstripped URI in the `OriginalUri` extension.
fn full_path<'a>(extensions: &'a Extensions, uri: &'a Uri) -> &'a str {
    extensions
        .get::<OriginalUri>()
        .map(|original| original.0.path())
        .unwrap_or_else(|| uri.path())
}

/// Extracts a non-empty bearer token from an `Authorization` header.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() { None } else { Some(token) }
}

/// Matches a request path against a route pattern.
///
/// Leading and trailing slashes are ignored on both sides and `*` matches
/// any run of characters. Without a `*` the match is exact, so
/// `api/force-logout` does not match `/api/force-logout-by-token`.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim_matches('/');
    let path = path.trim_matches('/');

    let mut pieces = pattern.split('*');
    let head = pieces.next().unwrap_or("");
    let Some(mut rest) = path.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = pieces.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for piece in middle {
        match rest.find(piece) {
            Some(idx) => rest = &rest[idx + piece.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}
