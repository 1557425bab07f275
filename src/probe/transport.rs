//! HTTP transport used by probes.

use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::config::ClientConfig;
use crate::probe::outcome::TransportError;
use crate::probe::ProbeError;

/// Issues one GET against a fixed target and reports the status code.
pub trait Transport: Send + Sync {
    fn get(&self) -> impl Future<Output = Result<u16, TransportError>> + Send;
}

/// `reqwest` client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    /// Build the client once per probe: proxy, connect and request timeouts.
    ///
    /// Without a proxy, environment proxy variables are ignored.
    pub fn new(url: &str, proxy: Option<&str>, config: &ClientConfig) -> Result<Self, ProbeError> {
        let url = Url::parse(url).map_err(|source| ProbeError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));

        builder = match proxy {
            Some(proxy) => {
                let proxy_url = Url::parse(proxy).map_err(|source| ProbeError::InvalidProxy {
                    proxy: proxy.to_string(),
                    source,
                })?;
                builder.proxy(reqwest::Proxy::all(proxy_url)?)
            }
            None => builder.no_proxy(),
        };

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn get(&self) -> Result<u16, TransportError> {
        let response = self.client.get(self.url.clone()).send().await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_target() {
        let err = HttpTransport::new("not a url", None, &ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rejects_bad_proxy() {
        let err = HttpTransport::new(
            "http://127.0.0.1:9/",
            Some("::not-a-proxy"),
            &ClientConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidProxy { .. }));
    }

    #[test]
    fn test_accepts_http_proxy() {
        let transport = HttpTransport::new(
            "http://example.com/health",
            Some("http://127.0.0.1:3128"),
            &ClientConfig::default(),
        )
        .unwrap();
        assert_eq!(transport.url().path(), "/health");
    }
}
