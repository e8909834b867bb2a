//! Client identification utilities
//!
//! Sessions are bound to the browser that created them through a hash of
//! its User-Agent.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap, header};

use crate::crypto::sha256;

/// Client fingerprint derived from request headers
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 of the User-Agent header
    pub hash: [u8; 32],
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    pub fn hash_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FingerprintError {
    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),
}

/// Fingerprint from the User-Agent header and resolved client ip
pub fn extract_fingerprint(
    headers: &HeaderMap,
    client_ip: Option<IpAddr>,
) -> Result<ClientFingerprint, FingerprintError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|ua| !ua.is_empty())
        .ok_or(FingerprintError::MissingHeader("User-Agent"))?;

    Ok(ClientFingerprint {
        hash: sha256(user_agent.as_bytes()),
        ip: client_ip,
        user_agent: Some(user_agent.to_string()),
    })
}

/// First X-Forwarded-For entry, else the socket peer
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

/// Peer address recorded by `into_make_service_with_connect_info`
pub fn connect_ip(extensions: &Extensions) -> Option<IpAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_fingerprint() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let fp = extract_fingerprint(&headers, None).unwrap();
        assert_eq!(fp.hash, sha256(b"Mozilla/5.0 Test Browser"));
        assert_eq!(fp.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
    }

    #[test]
    fn test_extract_fingerprint_missing_ua() {
        let result = extract_fingerprint(&HeaderMap::new(), None);
        assert!(matches!(
            result,
            Err(FingerprintError::MissingHeader("User-Agent"))
        ));
    }

    #[test]
    fn test_extract_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(
            extract_client_ip(&headers, Some(direct)),
            Some("192.168.1.1".parse().unwrap())
        );
        assert_eq!(extract_client_ip(&HeaderMap::new(), Some(direct)), Some(direct));
    }

    #[test]
    fn test_connect_ip() {
        let mut extensions = Extensions::new();
        assert_eq!(connect_ip(&extensions), None);

        extensions.insert(ConnectInfo(SocketAddr::from(([10, 1, 2, 3], 4000))));
        assert_eq!(connect_ip(&extensions), Some("10.1.2.3".parse().unwrap()));
    }
}
