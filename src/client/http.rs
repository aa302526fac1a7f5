//! reqwest-backed [`SignedTransport`].
//!
//! Signing is delegated to a caller-supplied [`RequestSigner`]; this adapter only
//! assembles the RPC-style query, performs the GET, and decodes the JSON body.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};
use url::Url;

use super::{AcsRequest, BoxFuture, Credentials, SignedTransport, SmsError, TransportError};
use crate::domain::AcsResponse;
use crate::transport::{decode_acs_response, decode_provider_error};

const DEFAULT_REGION_ID: &str = "cn-hangzhou";
const DEFAULT_PRODUCT: &str = "Dysmsapi";
const DEFAULT_DOMAIN: &str = "dysmsapi.aliyuncs.com";
const DEFAULT_SCHEME: &str = "https";
const RESPONSE_FORMAT: &str = "JSON";
const HTTP_METHOD: &str = "GET";

/// Error type returned by a [`RequestSigner`].
pub type SignerError = Box<dyn StdError + Send + Sync>;

/// Produces the signed parameter set for one request.
///
/// Receives the HTTP method and every query parameter (common and action
/// specific) and returns the full set to send, signature included. Closures with
/// the same signature implement this trait.
pub trait RequestSigner: Send + Sync {
    fn sign(
        &self,
        credentials: &Credentials,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<(String, String)>, SignerError>;
}

impl<F> RequestSigner for F
where
    F: Fn(&Credentials, &str, Vec<(String, String)>) -> Result<Vec<(String, String)>, SignerError>
        + Send
        + Sync,
{
    fn sign(
        &self,
        credentials: &Credentials,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<(String, String)>, SignerError> {
        self(credentials, method, params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Region and service host a transport is bound to.
///
/// Defaults to `cn-hangzhou` / `Dysmsapi` / `dysmsapi.aliyuncs.com`.
pub struct Endpoint {
    region_id: String,
    product: String,
    domain: String,
}

impl Endpoint {
    pub fn new(
        region_id: impl Into<String>,
        product: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            region_id: region_id.into(),
            product: product.into(),
            domain: domain.into(),
        }
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_ID, DEFAULT_PRODUCT, DEFAULT_DOMAIN)
    }
}

#[derive(Clone)]
/// Builder for [`HttpTransport`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct HttpTransportBuilder {
    signer: Arc<dyn RequestSigner>,
    endpoint: Endpoint,
    scheme: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpTransportBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(signer: impl RequestSigner + 'static) -> Self {
        Self {
            signer: Arc::new(signer),
            endpoint: Endpoint::default(),
            scheme: DEFAULT_SCHEME.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Bind the transport to another region/host.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Override the URL scheme (`https` by default), e.g. for a local stub server.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`HttpTransport`].
    pub fn build(self) -> Result<HttpTransport, SmsError> {
        let raw_url = format!("{}://{}/", self.scheme, self.endpoint.domain());
        let base_url = Url::parse(&raw_url).map_err(|source| SmsError::InvalidEndpoint {
            url: raw_url.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsError::Transport(TransportError::Http(Box::new(err))))?;

        Ok(HttpTransport {
            client,
            signer: self.signer,
            endpoint: self.endpoint,
            base_url,
        })
    }
}

#[derive(Clone)]
/// Sends signed RPC-style requests over HTTPS with `reqwest`.
///
/// Every request carries `Action`, `Version`, `RegionId` and `Format=JSON` in
/// addition to the action parameters; the signer adds the rest.
pub struct HttpTransport {
    client: reqwest::Client,
    signer: Arc<dyn RequestSigner>,
    endpoint: Endpoint,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport bound to the default endpoint.
    pub fn new(signer: impl RequestSigner + 'static) -> Result<Self, SmsError> {
        HttpTransportBuilder::new(signer).build()
    }

    /// Start building a transport with custom settings.
    pub fn builder(signer: impl RequestSigner + 'static) -> HttpTransportBuilder {
        HttpTransportBuilder::new(signer)
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn signed_url(
        &self,
        credentials: &Credentials,
        request: AcsRequest,
    ) -> Result<Url, TransportError> {
        let mut params = vec![
            ("Action".to_owned(), request.action().to_owned()),
            ("Version".to_owned(), request.version().to_owned()),
            ("RegionId".to_owned(), self.endpoint.region_id().to_owned()),
            ("Format".to_owned(), RESPONSE_FORMAT.to_owned()),
        ];
        params.extend(request.into_params());

        let signed = self
            .signer
            .sign(credentials, HTTP_METHOD, params)
            .map_err(TransportError::Sign)?;

        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(&signed);
        Ok(url)
    }
}

impl SignedTransport for HttpTransport {
    fn execute<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: AcsRequest,
    ) -> BoxFuture<'a, Result<AcsResponse, TransportError>> {
        Box::pin(async move {
            let action = request.action();
            let url = self.signed_url(credentials, request)?;
            debug!(
                action,
                region = self.endpoint.region_id(),
                product = self.endpoint.product(),
                "sending signed request"
            );

            let response = self.client.get(url).send().await.map_err(|err| {
                error!(action, error = %err, "request failed");
                TransportError::Http(Box::new(err))
            })?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::Http(Box::new(err)))?;

            if !(200..=299).contains(&status) {
                let err = rejection_error(status, body);
                error!(action, status, error = %err, "request rejected");
                return Err(err);
            }

            decode_acs_response(&body).map_err(|err| TransportError::Parse(Box::new(err)))
        })
    }
}

fn rejection_error(status: u16, body: String) -> TransportError {
    match decode_provider_error(&body) {
        Some(provider) => TransportError::Provider {
            http_status: Some(status),
            code: provider.code,
            message: provider.message.unwrap_or_default(),
            request_id: provider.request_id,
        },
        None => TransportError::HttpStatus {
            status,
            body: if body.trim().is_empty() {
                None
            } else {
                Some(body)
            },
        },
    }
}
