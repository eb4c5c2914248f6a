use std::net::SocketAddr;

use acquisitions_auth::{Claims, Principal, verify_token};
use acquisitions_config::JwtConfig;
use axum::http::{HeaderMap, header};
use thiserror::Error;

use crate::cookies::read_cookie;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    #[error("No token provided")]
    Missing,
    #[error("Invalid or expired token")]
    Invalid,
}

/// Session token from the `cookie_name` cookie, else from
/// `Authorization: Bearer <token>`.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    read_cookie(headers, cookie_name).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// Verified claims of the caller's token.
pub fn resolve(
    headers: &HeaderMap,
    cookie_name: &str,
    jwt_config: &JwtConfig,
) -> Result<Claims, IdentityError> {
    let token = extract_token(headers, cookie_name).ok_or(IdentityError::Missing)?;
    verify_token(&token, jwt_config).map_err(|_| IdentityError::Invalid)
}

/// Like [`resolve`], but a missing or unverifiable token yields a guest.
pub fn resolve_or_guest(headers: &HeaderMap, cookie_name: &str, jwt_config: &JwtConfig) -> Principal {
    match resolve(headers, cookie_name, jwt_config) {
        Ok(claims) => Principal::from(claims),
        Err(_) => Principal::guest(),
    }
}

/// Client address: first `X-Forwarded-For` entry, then `X-Real-IP` (both only
/// when proxy headers are trusted), then the socket peer, then `unknown`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    if trust_proxy_headers {
        if let Some(ip) = header_value(X_FORWARDED_FOR).or_else(|| header_value(X_REAL_IP)) {
            return ip;
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use acquisitions_auth::create_access_token;
    use acquisitions_models::Role;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let map = headers(&[("cookie", "token=from-cookie"), ("authorization", "Bearer from-header")]);
        assert_eq!(extract_token(&map, "token").as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let map = headers(&[("authorization", "Bearer abc.def")]);
        assert_eq!(extract_token(&map, "token").as_deref(), Some("abc.def"));

        let map = headers(&[("authorization", "Basic abc")]);
        assert_eq!(extract_token(&map, "token"), None);
    }

    #[test]
    fn test_resolve_missing_and_invalid() {
        let config = JwtConfig::default();
        assert_eq!(
            resolve(&HeaderMap::new(), "token", &config).unwrap_err(),
            IdentityError::Missing
        );
        let map = headers(&[("authorization", "Bearer not-a-jwt")]);
        assert_eq!(resolve(&map, "token", &config).unwrap_err(), IdentityError::Invalid);
    }

    #[test]
    fn test_invalid_token_resolves_to_guest() {
        let config = JwtConfig::default();
        let map = headers(&[("cookie", "token=garbage")]);
        let principal = resolve_or_guest(&map, "token", &config);
        assert_eq!(principal, Principal::guest());
    }

    #[test]
    fn test_valid_token_resolves_role() {
        let config = JwtConfig::default();
        let token = create_access_token(3, "admin@example.com", Role::Admin, &config).unwrap();
        let bearer = format!("Bearer {token}");
        let map = headers(&[("authorization", bearer.as_str())]);
        let principal = resolve_or_guest(&map, "token", &config);
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.id, Some(3));
    }

    #[test]
    fn test_client_ip_sources() {
        let peer: SocketAddr = "192.0.2.10:51000".parse().unwrap();

        let map = headers(&[("x-forwarded-for", "1.2.3.4, 10.0.0.1"), ("x-real-ip", "5.6.7.8")]);
        assert_eq!(client_ip(&map, Some(peer), true), "1.2.3.4");

        let map = headers(&[("x-real-ip", "5.6.7.8")]);
        assert_eq!(client_ip(&map, Some(peer), true), "5.6.7.8");

        let map = headers(&[("x-forwarded-for", "1.2.3.4")]);
        assert_eq!(client_ip(&map, Some(peer), false), "192.0.2.10");

        assert_eq!(client_ip(&HeaderMap::new(), None, true), "unknown");
    }
}
