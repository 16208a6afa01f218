use crate::Actor;

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::Request;
use googletest::assert_that;
use googletest::prelude::{eq, none, some};

async fn extract(request: Request<Body>) -> Actor {
    let (mut parts, _body) = request.into_parts();
    Actor::from_request_parts(&mut parts, &()).await.unwrap()
}

fn with_peer(mut request: Request<Body>, peer: &str) -> Request<Body> {
    let peer: SocketAddr = peer.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

#[tokio::test]
async fn given_identity_headers_behind_local_proxy_when_extracted_then_actor_populated() {
    let request = with_peer(
        Request::builder()
            .header("X-Actor", "ops")
            .header("X-Device-Id", "laptop-1")
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap(),
        "127.0.0.1:40000",
    );

    let Actor(actor) = extract(request).await;

    assert_that!(actor.actor.as_deref(), some(eq("ops")));
    assert_that!(actor.device_id.as_deref(), some(eq("laptop-1")));
    assert_that!(actor.client_ip.as_deref(), some(eq("203.0.113.7")));
}

#[tokio::test]
async fn given_only_peer_address_when_extracted_then_peer_ip_used() {
    let request = with_peer(
        Request::builder().body(Body::empty()).unwrap(),
        "192.0.2.10:51234",
    );

    let Actor(actor) = extract(request).await;

    assert_that!(actor.actor, none());
    assert_that!(actor.client_ip.as_deref(), some(eq("192.0.2.10")));
}

#[tokio::test]
async fn given_forwarded_for_from_remote_peer_when_extracted_then_peer_ip_kept() {
    let request = with_peer(
        Request::builder()
            .header("X-Forwarded-For", "198.51.100.4")
            .body(Body::empty())
            .unwrap(),
        "192.0.2.10:51234",
    );

    let Actor(actor) = extract(request).await;

    assert_that!(actor.client_ip.as_deref(), some(eq("192.0.2.10")));
}

#[tokio::test]
async fn given_forwarded_for_from_ipv6_loopback_when_extracted_then_forwarded_hop_wins() {
    let request = with_peer(
        Request::builder()
            .header("X-Forwarded-For", "198.51.100.4")
            .body(Body::empty())
            .unwrap(),
        "[::1]:51234",
    );

    let Actor(actor) = extract(request).await;

    assert_that!(actor.client_ip.as_deref(), some(eq("198.51.100.4")));
}

#[tokio::test]
async fn given_forwarded_for_without_peer_when_extracted_then_ip_unknown() {
    let request = Request::builder()
        .header("X-Forwarded-For", "198.51.100.4")
        .body(Body::empty())
        .unwrap();

    let Actor(actor) = extract(request).await;

    assert_that!(actor.client_ip, none());
}

#[tokio::test]
async fn given_blank_headers_when_extracted_then_actor_unknown() {
    let request = Request::builder()
        .header("X-Actor", "   ")
        .header("X-Forwarded-For", " ")
        .body(Body::empty())
        .unwrap();

    let Actor(actor) = extract(request).await;

    assert_that!(
        actor.to_string().as_str(),
        eq("actor=unknown device=unknown ip=unknown")
    );
}
