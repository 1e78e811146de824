//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub use config::ClientConfig;

use crate::domain::{
    ApiKey, ConfigurationError, GatewayResponse, Login, MessageLookup, Operation, Password,
    SendMessage, ValidationError,
};

const DEFAULT_ENDPOINT: &str = "http://alphasms.com.ua/api/xml.php";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport for ReqwestTransport {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .timeout(self.timeout)
                .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for AlphaSMS API calls.
///
/// Use [`Auth::api_key`] when you have an API key, or [`Auth::login_password`]
/// if you authenticate with your account login/password pair.
pub enum Auth {
    /// Authenticate via the `key` attribute.
    ApiKey(ApiKey),
    /// Authenticate via the `login` + `password` attributes.
    LoginPassword { login: Login, password: Password },
}

impl Auth {
    /// Create [`Auth::ApiKey`]; a blank key is [`ConfigurationError::MissingCredentials`].
    pub fn api_key(value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = ApiKey::new(value).map_err(|_| ConfigurationError::MissingCredentials)?;
        Ok(Self::ApiKey(key))
    }

    /// Create [`Auth::LoginPassword`]; a blank login or password is
    /// [`ConfigurationError::IncompleteLoginPassword`].
    pub fn login_password(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let login = Login::new(login).map_err(|_| ConfigurationError::IncompleteLoginPassword)?;
        let password =
            Password::new(password).map_err(|_| ConfigurationError::IncompleteLoginPassword)?;
        Ok(Self::LoginPassword { login, password })
    }

    /// Pick the authentication mode from optional raw values.
    ///
    /// A non-blank key wins. Otherwise login and password must both be present.
    pub fn from_parts(
        login: Option<&str>,
        password: Option<&str>,
        key: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(key) = present(key) {
            return Self::api_key(key);
        }
        match (present(login), present(password)) {
            (Some(login), Some(password)) => Self::login_password(login, password),
            (None, None) => Err(ConfigurationError::MissingCredentials),
            _ => Err(ConfigurationError::IncompleteLoginPassword),
        }
    }

    fn credentials(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::ApiKey(key) => vec![(ApiKey::FIELD, key.as_str())],
            Self::LoginPassword { login, password } => vec![
                (Login::FIELD, login.as_str()),
                (Password::FIELD, password.as_str()),
            ],
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|it| !it.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AlphaSmsClient`].
///
/// Nothing here is retried or logged by the client; every failure of a call is
/// returned to the caller as one of these variants.
pub enum AlphaSmsError {
    /// Missing/incomplete credentials or an unusable endpoint.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A per-call precondition failed; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than 200.
    ///
    /// `body` is the raw reply (if not blank) and `document` its parsed form when the
    /// reply is well-formed XML.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        body: Option<String>,
        document: Option<GatewayResponse>,
    },

    /// HTTP 200 with a body that is not well-formed XML.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The request document could not be produced.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Builder for [`AlphaSmsClient`].
///
/// Use this when you need a default sender, a custom endpoint, timeout, or user-agent.
pub struct AlphaSmsClientBuilder {
    auth: Auth,
    endpoint: String,
    sender: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl AlphaSmsClientBuilder {
    /// Create a builder with the default endpoint and a 20 second timeout.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            sender: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Credentials this builder was created with.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Override the AlphaSMS XML endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Alpha name used when a message does not set its own sender.
    ///
    /// Checked when a message is sent, not here.
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Set the timeout applied to each request. Must be non-zero.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AlphaSmsClient`].
    pub fn build(self) -> Result<AlphaSmsClient, AlphaSmsError> {
        url::Url::parse(&self.endpoint).map_err(|_| ConfigurationError::InvalidEndpoint {
            input: self.endpoint.clone(),
        })?;
        if self.timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout.into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ConfigurationError::HttpClient {
                reason: err.to_string(),
            })?;

        Ok(AlphaSmsClient {
            auth: self.auth,
            endpoint: self.endpoint,
            sender: self.sender,
            http: Arc::new(ReqwestTransport {
                client,
                timeout: self.timeout,
            }),
        })
    }
}

#[derive(Clone)]
/// High-level AlphaSMS client.
///
/// This type orchestrates request validation, XML encoding, and response parsing.
/// Every call is a single POST to the XML endpoint; no state is kept between calls,
/// so one instance can be shared across tasks.
pub struct AlphaSmsClient {
    auth: Auth,
    endpoint: String,
    sender: Option<String>,
    http: Arc<dyn HttpTransport>,
}

impl AlphaSmsClient {
    /// Create a client using the default endpoint and timeout, without a default sender.
    ///
    /// For more customization, use [`AlphaSmsClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            sender: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
                timeout: DEFAULT_TIMEOUT,
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> AlphaSmsClientBuilder {
        AlphaSmsClientBuilder::new(auth)
    }

    /// Build a client from a [`ClientConfig`] record.
    pub fn from_config(config: ClientConfig) -> Result<Self, AlphaSmsError> {
        config.into_builder()?.build()
    }

    /// Default alpha name, if one was configured.
    pub fn default_sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Send a message.
    ///
    /// The sender falls back to the client default; an id is generated when the
    /// message has none.
    ///
    /// Errors:
    /// - Returns [`AlphaSmsError::Validation`] before any I/O for invalid input,
    /// - [`AlphaSmsError::HttpStatus`] for non-200 HTTP responses,
    /// - [`AlphaSmsError::Parse`] when the reply is not well-formed XML.
    pub async fn send(&self, message: SendMessage) -> Result<GatewayResponse, AlphaSmsError> {
        let resolved = message.resolve(self.default_sender())?;
        let body = crate::transport::encode_message_request(&self.auth.credentials(), &resolved)
            .map_err(|err| AlphaSmsError::Encode(Box::new(err)))?;
        self.execute(Operation::Message, body).await
    }

    /// Query delivery status by caller id and/or provider `sms_id`.
    ///
    /// Errors:
    /// - Returns [`AlphaSmsError::Validation`] when neither id is set,
    /// - otherwise the same as [`AlphaSmsClient::send`].
    pub async fn status(&self, lookup: MessageLookup) -> Result<GatewayResponse, AlphaSmsError> {
        self.lookup(Operation::Status, &lookup).await
    }

    /// Remove a queued message by caller id and/or provider `sms_id`.
    ///
    /// Errors: see [`AlphaSmsClient::status`].
    pub async fn delete(&self, lookup: MessageLookup) -> Result<GatewayResponse, AlphaSmsError> {
        self.lookup(Operation::Delete, &lookup).await
    }

    /// Query the account balance.
    pub async fn balance(&self) -> Result<GatewayResponse, AlphaSmsError> {
        let body = crate::transport::encode_balance_request(&self.auth.credentials())
            .map_err(|err| AlphaSmsError::Encode(Box::new(err)))?;
        self.execute(Operation::Balance, body).await
    }

    async fn lookup(
        &self,
        operation: Operation,
        lookup: &MessageLookup,
    ) -> Result<GatewayResponse, AlphaSmsError> {
        lookup.validate()?;
        let body =
            crate::transport::encode_lookup_request(&self.auth.credentials(), operation, lookup)
                .map_err(|err| AlphaSmsError::Encode(Box::new(err)))?;
        self.execute(operation, body).await
    }

    async fn execute(
        &self,
        operation: Operation,
        body: String,
    ) -> Result<GatewayResponse, AlphaSmsError> {
        tracing::debug!(
            operation = operation.tag(),
            endpoint = %self.endpoint,
            "sending AlphaSMS request"
        );

        let response = self
            .http
            .post_xml(&self.endpoint, body)
            .await
            .map_err(AlphaSmsError::Transport)?;

        tracing::debug!(
            operation = operation.tag(),
            status = response.status,
            "received AlphaSMS response"
        );

        if response.status != 200 {
            let document = crate::transport::decode_response(&response.body).ok();
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(AlphaSmsError::HttpStatus {
                status: response.status,
                body,
                document,
            });
        }

        crate::transport::decode_response(&response.body)
            .map_err(|err| AlphaSmsError::Parse(Box::new(err)))
    }
}
