//! The security gate.
//!
//! Runs ahead of every route: resolve the caller (guests included), pick the
//! role's tier, ask the [`DecisionEngine`] and turn its answer into a
//! response. Allowed requests pass through untouched; denials answer 403; an
//! engine failure or timeout answers 500. Nothing is retried.

use std::net::SocketAddr;

use acquisitions_core::AppError;
use acquisitions_guard::{
    Decision, DenialReason, EngineError, Fingerprint, RequestMeta, select_tier,
};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::metrics::track_security_decision;
use crate::middleware::identity::{client_ip, resolve_or_guest};
use crate::state::AppState;

/// What the decision engine is shown of `req`.
pub fn request_meta(req: &Request, trust_proxy_headers: bool) -> RequestMeta {
    let headers = req.headers();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    RequestMeta {
        client_ip: client_ip(headers, peer, trust_proxy_headers),
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        user_agent: header_text(header::USER_AGENT),
        referer: header_text(header::REFERER),
    }
}

pub async fn security_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let config = &state.security_config;
    let meta = request_meta(&req, config.trust_proxy_headers);
    let principal = resolve_or_guest(req.headers(), &state.cookie_config.name, &state.jwt_config);
    let tier = select_tier(principal.role);
    let fingerprint = Fingerprint::new(tier, meta.client_ip.clone());

    let evaluation = tokio::time::timeout(
        config.evaluation_timeout,
        state.engine.evaluate(&fingerprint, tier, &meta),
    )
    .await;

    let decision = match evaluation {
        Ok(Ok(decision)) => decision,
        Ok(Err(err)) => return engine_failure(err, &meta),
        Err(_) => return engine_failure(EngineError::Timeout(config.evaluation_timeout), &meta),
    };

    track_security_decision(decision.reason.as_str());

    if decision.allowed {
        return next.run(req).await;
    }

    let dry_run = config.is_dry_run();
    log_denial(&decision, &meta, &fingerprint, dry_run);

    if dry_run {
        return next.run(req).await;
    }

    AppError::forbidden(decision.message).into_response()
}

fn log_denial(decision: &Decision, meta: &RequestMeta, fingerprint: &Fingerprint, dry_run: bool) {
    let user_agent = meta.user_agent.as_deref().unwrap_or("");
    match decision.reason {
        DenialReason::Bot => tracing::warn!(
            ip = %meta.client_ip,
            user_agent,
            path = %meta.path,
            method = %meta.method,
            dry_run,
            "Bot request blocked"
        ),
        DenialReason::Shield => tracing::warn!(
            ip = %meta.client_ip,
            user_agent,
            path = %meta.path,
            method = %meta.method,
            dry_run,
            "Shield blocked request"
        ),
        DenialReason::RateLimit => tracing::warn!(
            ip = %meta.client_ip,
            user_agent,
            path = %meta.path,
            %fingerprint,
            dry_run,
            "Rate limit exceeded"
        ),
        DenialReason::None => {}
    }
}

fn engine_failure(err: EngineError, meta: &RequestMeta) -> Response {
    track_security_decision("error");
    tracing::error!(
        error = %err,
        ip = %meta.client_ip,
        path = %meta.path,
        "Security evaluation failed"
    );
    AppError::internal(err).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acquisitions_config::SecurityConfig;
    use axum::body::Body;

    fn forwarded_request() -> Request {
        let peer: SocketAddr = "192.0.2.7:50123".parse().unwrap();
        Request::builder()
            .uri("/api?page=2")
            .header(header::USER_AGENT, "Mozilla/5.0")
            .header("x-forwarded-for", "203.0.113.1")
            .extension(ConnectInfo(peer))
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_request_meta_uses_socket_peer_by_default() {
        let config = SecurityConfig::default();
        let meta = request_meta(&forwarded_request(), config.trust_proxy_headers);
        assert_eq!(meta.client_ip, "192.0.2.7");
        assert_eq!(meta.path, "/api");
        assert_eq!(meta.query.as_deref(), Some("page=2"));
        assert_eq!(meta.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_request_meta_trusts_forwarded_for_when_enabled() {
        let meta = request_meta(&forwarded_request(), true);
        assert_eq!(meta.client_ip, "203.0.113.1");
    }
}
