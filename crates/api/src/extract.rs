//! Request extractors.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

use crate::error::ApiError;

/// IP address of the directly connected TCP peer.
///
/// Read from the connection's socket address; forwarding headers such as
/// `X-Forwarded-For` are never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddr(pub IpAddr);

impl<S> FromRequestParts<S> for PeerAddr
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // ConnectInfo also honors a MockConnectInfo layer
        let ConnectInfo(addr) = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::PeerUnavailable)?;
        Ok(PeerAddr(addr.ip()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::Request;

    #[tokio::test]
    async fn reads_host_from_connect_info() {
        let addr: SocketAddr = "10.1.2.3:51234".parse().unwrap();
        let (mut parts, ()) = Request::builder()
            .extension(ConnectInfo(addr))
            .body(())
            .unwrap()
            .into_parts();

        let peer = PeerAddr::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(peer, PeerAddr(addr.ip()));
    }

    #[tokio::test]
    async fn ignores_forwarded_headers() {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let (mut parts, ()) = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .header("x-real-ip", "203.0.113.7")
            .extension(ConnectInfo(addr))
            .body(())
            .unwrap()
            .into_parts();

        let PeerAddr(ip) = PeerAddr::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn reads_host_from_mock_connect_info() {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let (mut parts, ()) = Request::builder()
            .extension(MockConnectInfo(addr))
            .body(())
            .unwrap()
            .into_parts();

        let PeerAddr(ip) = PeerAddr::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn rejects_without_connect_info() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        let result = PeerAddr::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::PeerUnavailable)));
    }
}
