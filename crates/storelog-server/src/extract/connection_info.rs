//! Client connection information for request stamping.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::connect_info::Connected;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use axum::serve::IncomingStream;
use ipnet::IpNet;
use tokio::net::TcpListener;

/// Connection information extractor for incoming HTTP requests.
///
/// Used by the ingestion handler to stamp the reporting client's address
/// onto stored events. When deployed behind a proxy or load balancer the
/// `addr` field contains the proxy's address; middleware may populate
/// `real_ip` from forwarding headers.
#[derive(Debug, Clone)]
#[must_use]
pub struct AppConnectInfo {
    /// The socket address (IP + port) of the connecting client.
    ///
    /// Note: When behind a proxy, this will be the proxy's address.
    pub addr: SocketAddr,

    /// Optional real client IP address extracted from proxy headers.
    pub real_ip: Option<IpAddr>,
}

impl AppConnectInfo {
    /// Creates a new `AppConnectInfo` for a direct connection.
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            real_ip: None,
        }
    }

    /// Creates a new `AppConnectInfo` with a real IP address override.
    pub fn with_real_ip(addr: SocketAddr, real_ip: IpAddr) -> Self {
        Self {
            addr,
            real_ip: Some(real_ip),
        }
    }

    /// Returns the client's IP address.
    ///
    /// If a real IP was detected (from proxy headers), returns that.
    /// Otherwise, returns the direct connection IP.
    #[inline]
    pub fn client_ip(&self) -> IpAddr {
        self.real_ip.unwrap_or_else(|| self.addr.ip())
    }

    /// Returns the client's IP address as a host network.
    ///
    /// This is the representation stored on ingested events.
    #[inline]
    pub fn client_net(&self) -> IpNet {
        IpNet::from(self.client_ip())
    }

    /// Returns `true` if the connection is from localhost.
    #[inline]
    pub fn is_localhost(&self) -> bool {
        self.client_ip().is_loopback()
    }
}

impl Connected<IncomingStream<'_, TcpListener>> for AppConnectInfo {
    fn connect_info(stream: IncomingStream<'_, TcpListener>) -> Self {
        let addr = SocketAddr::connect_info(stream);
        Self::new(addr)
    }
}

// https://github.com/programatik29/axum-server/issues/12
impl Connected<SocketAddr> for AppConnectInfo {
    fn connect_info(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

/// Client metadata stamped onto ingested events.
///
/// Collects the reporting client's address and user agent from the request.
/// Both are optional: a request served without connection info (as in
/// tests) simply yields nothing to stamp.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ClientMeta {
    /// Client address as a host network, if known.
    pub ip_address: Option<IpNet>,
    /// Raw `User-Agent` header value, if present.
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<AppConnectInfo>>()
            .map(|ConnectInfo(info)| info.client_net());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(Self {
            ip_address,
            user_agent,
        })
    }
}

impl aide::OperationInput for ClientMeta {}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use axum::Router;
    use axum::http::header;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::{AppConnectInfo, ClientMeta};

    #[test]
    fn client_net_is_a_host_network() {
        let conn = AppConnectInfo::new(SocketAddr::new(
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)),
            443,
        ));

        let net = conn.client_net();
        assert_eq!(net.addr(), IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)));
        assert_eq!(net.prefix_len(), 32);
    }

    #[test]
    fn real_ip_overrides_socket_address() {
        let proxy_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 80);
        let real_ip = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1));

        let conn = AppConnectInfo::with_real_ip(proxy_addr, real_ip);
        assert_eq!(conn.client_ip(), real_ip);
        assert_eq!(conn.addr.ip(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn localhost_detection() {
        let conn = AppConnectInfo::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 80));
        assert!(conn.is_localhost());
    }

    async fn echo_meta(meta: ClientMeta) -> String {
        format!("ua={:?}", meta.user_agent)
    }

    #[tokio::test]
    async fn client_meta_reads_user_agent() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/", get(echo_meta)))?;

        let response = server
            .get("/")
            .add_header(header::USER_AGENT, "Mozilla/5.0")
            .await;
        response.assert_text("ua=Some(\"Mozilla/5.0\")");

        Ok(())
    }

    #[tokio::test]
    async fn client_meta_without_headers_is_empty() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/", get(echo_meta)))?;

        let response = server.get("/").await;
        response.assert_text("ua=None");

        Ok(())
    }
}
