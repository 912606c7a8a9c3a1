use std::convert::Infallible;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::USER_AGENT;
use actix_web::{FromRequest, HttpRequest};

use crate::repos::entries::EntryMeta;

const MAX_USER_AGENT_LEN: usize = 512;

/// Client address and user agent, recorded on draw entries.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    fn from_req(req: &HttpRequest) -> Self {
        let ip_address = req
            .connection_info()
            .realip_remote_addr()
            .map(strip_port);
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect());
        Self {
            ip_address,
            user_agent,
        }
    }
}

/// `realip_remote_addr` may carry a port (`1.2.3.4:5678`, `[::1]:80`).
fn strip_port(addr: &str) -> String {
    if let Ok(sock) = addr.parse::<std::net::SocketAddr>() {
        return sock.ip().to_string();
    }
    addr.to_string()
}

impl From<ClientMeta> for EntryMeta {
    fn from(meta: ClientMeta) -> Self {
        EntryMeta {
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        }
    }
}

impl FromRequest for ClientMeta {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_req(req)))
    }
}
