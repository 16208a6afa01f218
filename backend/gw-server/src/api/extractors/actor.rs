//! Control-plane actor extraction

use gw_core::ControlPlaneActor;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

pub const ACTOR_HEADER: &str = "X-Actor";
pub const DEVICE_ID_HEADER: &str = "X-Device-Id";
pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

/// Who issued the request, for audit logging only.
///
/// Never rejects: missing or unreadable headers just leave fields unset.
/// Client IP is the socket peer. The first `X-Forwarded-For` hop replaces it
/// only when the peer is a loopback address (a reverse proxy on this host).
pub struct Actor(pub ControlPlaneActor);

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let headers = &parts.headers;
            let peer = parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip());

            let forwarded = peer
                .filter(|ip| ip.is_loopback())
                .and_then(|_| header_value(headers, FORWARDED_FOR_HEADER))
                .and_then(|v| v.split(',').next().map(|hop| hop.trim().to_string()))
                .filter(|hop| !hop.is_empty());

            let client_ip = forwarded.or_else(|| peer.map(|ip| ip.to_string()));

            Ok(Actor(ControlPlaneActor::new(
                header_value(headers, ACTOR_HEADER),
                header_value(headers, DEVICE_ID_HEADER),
                client_ip,
            )))
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
