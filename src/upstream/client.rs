use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::UpstreamConfig;

/// Which upstream API family a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Netshort,
    Dramabox,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Netshort => "netshort",
            Service::Dramabox => "dramabox",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} {path}: request failed: {source}")]
    Transport {
        service: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} {path}: HTTP {status}")]
    Status {
        service: &'static str,
        path: String,
        status: u16,
    },
    #[error("{service} {path}: malformed JSON: {source}")]
    Json {
        service: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// The upstream path (including query) that failed.
    pub fn path(&self) -> &str {
        match self {
            UpstreamError::Transport { path, .. }
            | UpstreamError::Status { path, .. }
            | UpstreamError::Json { path, .. } => path,
        }
    }
}

/// GET access to the upstream APIs. Callers pass a path relative to the
/// service base URL and the query pairs; the body comes back as raw JSON.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get_json(
        &self,
        service: Service,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, UpstreamError>;
}

pub struct HttpUpstream {
    client: Client,
    netshort_base: String,
    dramabox_base: String,
}

impl HttpUpstream {
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            netshort_base: config.netshort.trim_end_matches('/').to_string(),
            dramabox_base: config.dramabox.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self::new(builder.build()?, config))
    }

    fn base(&self, service: Service) -> &str {
        match service {
            Service::Netshort => &self.netshort_base,
            Service::Dramabox => &self.dramabox_base,
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get_json(
        &self,
        service: Service,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let relative = relative_url(path, query);
        let url = format!("{}/{}", self.base(service), relative);
        debug!(service = service.as_str(), url = %url, "upstream GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            UpstreamError::Transport {
                service: service.as_str(),
                path: relative.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: service.as_str(),
                path: relative,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| UpstreamError::Transport {
            service: service.as_str(),
            path: relative.clone(),
            source: e,
        })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Json {
            service: service.as_str(),
            path: relative,
            source: e,
        })
    }
}

/// Builds `path?k=v&...` with every key and value percent-encoded.
pub fn relative_url(path: &str, query: &[(&str, &str)]) -> String {
    let path = path.trim_start_matches('/');
    if query.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{}?{}", path, pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url() {
        assert_eq!(relative_url("/theaters", &[]), "theaters");
        assert_eq!(
            relative_url("search", &[("query", "cinta & benci")]),
            "search?query=cinta%20%26%20benci"
        );
        assert_eq!(
            relative_url("dubindo", &[("classify", "terbaru")]),
            "dubindo?classify=terbaru"
        );
    }

    #[test]
    fn test_base_trailing_slash() {
        let config = UpstreamConfig {
            netshort: "http://localhost:1/ns/".to_string(),
            dramabox: "http://localhost:2/db".to_string(),
            user_agent: None,
        };
        let upstream = HttpUpstream::new(Client::new(), &config);
        assert_eq!(upstream.base(Service::Netshort), "http://localhost:1/ns");
        assert_eq!(upstream.base(Service::Dramabox), "http://localhost:2/db");
    }
}
