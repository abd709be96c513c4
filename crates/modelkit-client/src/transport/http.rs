use crate::{
    config::TransportConfig,
    error::TransportError,
    resource::Method,
    transport::{Request, Response, Transport},
};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;

///
/// HttpTransport
/// Default `reqwest` transport.
///

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();

        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| TransportError::new("api key is not a valid header value"))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        for (key, raw) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| TransportError::new(format!("header name '{key}': {err}")))?;
            let value = HeaderValue::from_str(raw)
                .map_err(|err| TransportError::new(format!("header '{key}': {err}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let method = match request.method {
            Method::Post => reqwest::Method::POST,
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response { status, body })
    }
}
