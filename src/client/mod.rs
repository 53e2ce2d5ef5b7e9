//! Client layer: orchestrates validation, template lookup, signing, and the HTTP call.

mod config;
mod log;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use time::{OffsetDateTime, UtcOffset};
use url::Url;

use crate::domain::{
    AccountSid, AccountToken, AppId, StatusCode, TemplateId, TemplateSms, ValidationError,
};
use crate::transport::{
    CompactTimestamp, SignedCredential, decode_template_sms_json_response,
    encode_template_sms_json, sign,
};

pub use self::config::ClientConfig;
pub use self::log::{SendLog, SendRecord, TracingSendLog};

use self::log::SendLogGuard;

/// Detail used when Cloopen rejects a message without a `statusMsg`.
pub const DEFAULT_FAILURE_MESSAGE: &str = "send failed";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP reply handed back by an [`HttpTransport`].
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP seam used by [`CloopenClient`].
///
/// Implementations perform one POST and return the body whatever the status code is.
/// Timeouts and cancellation belong to the implementation.
pub trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self.client.post(url);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.body(body).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`CloopenClient`].
///
/// Every failure of [`CloopenClient::text`] falls in one of five kinds: invalid input,
/// unknown template, transport failure, unreadable reply, or a rejection reported by
/// Cloopen. [`CloopenError::Config`] is only produced while building a client.
pub enum CloopenError {
    /// The send request failed structural validation.
    #[error("invalid parameters: {0}")]
    Param(#[from] ValidationError),

    /// The template name has no id in the configured mapping.
    #[error("unknown template: {name}")]
    Template { name: String },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    /// Reply body is not a JSON object, or a rejection carries a non-string `statusMsg`.
    #[error("invalid response: {0}")]
    Response(#[source] BoxError),

    /// Cloopen answered with a status code other than `000000`.
    #[error("provider rejected message: {status_msg}")]
    Provider {
        status_code: Option<StatusCode>,
        status_msg: String,
    },

    /// Client settings are unusable.
    #[error("invalid cloopen config: {0}")]
    Config(#[source] ValidationError),
}

impl CloopenError {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "3000",
            Self::Param(_) => "3001",
            Self::Template { .. } => "3002",
            Self::Request(_) => "3003",
            Self::Response(_) => "3004",
            Self::Provider { .. } => "3005",
        }
    }
}

#[derive(Clone)]
/// Builder for [`CloopenClient`].
///
/// Use this when you need a timeout, a user-agent, a custom log sink, or your own transport.
pub struct CloopenClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    log: Arc<dyn SendLog>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl CloopenClientBuilder {
    /// Create a builder logging through `tracing` and using a default `reqwest` client.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
            log: Arc::new(TracingSendLog),
            transport: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the log sink.
    pub fn logger(mut self, log: Arc<dyn SendLog>) -> Self {
        self.log = log;
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the settings and build a [`CloopenClient`].
    pub fn build(self) -> Result<CloopenClient, CloopenError> {
        let account_sid =
            AccountSid::new(self.config.account_sid.as_str()).map_err(CloopenError::Config)?;
        let account_token =
            AccountToken::new(self.config.account_token.as_str()).map_err(CloopenError::Config)?;
        let app_id = AppId::new(self.config.app_id.as_str()).map_err(CloopenError::Config)?;
        let utc_offset = UtcOffset::from_hms(self.config.utc_offset_hours, 0, 0).map_err(|_| {
            CloopenError::Config(ValidationError::InvalidUtcOffset {
                hours: self.config.utc_offset_hours,
            })
        })?;
        let endpoint =
            template_sms_endpoint(&self.config, &account_sid).map_err(CloopenError::Config)?;

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| CloopenError::Request(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(CloopenClient {
            config: self.config,
            account_sid,
            account_token,
            app_id,
            endpoint,
            utc_offset,
            http,
            log: self.log,
            now: OffsetDateTime::now_utc,
        })
    }
}

#[derive(Clone)]
/// High-level Cloopen template SMS client.
///
/// The client is immutable after construction and can be shared between tasks. Each
/// [`CloopenClient::text`] call signs with a fresh timestamp and makes at most one
/// request to `https://{server_ip}:{server_port}/{soft_version}/Accounts/{sid}/SMS/TemplateSMS`.
pub struct CloopenClient {
    config: ClientConfig,
    account_sid: AccountSid,
    account_token: AccountToken,
    app_id: AppId,
    endpoint: Url,
    utc_offset: UtcOffset,
    http: Arc<dyn HttpTransport>,
    log: Arc<dyn SendLog>,
    now: fn() -> OffsetDateTime,
}

impl CloopenClient {
    /// Create a client, treating unusable settings as a fatal startup error.
    ///
    /// # Panics
    ///
    /// Panics when the account sid, account token, or app id is empty, or when the
    /// server address cannot form a URL. Use [`CloopenClient::try_new`] to handle
    /// these as errors instead.
    pub fn new(config: ClientConfig) -> Self {
        match Self::try_new(config) {
            Ok(client) => client,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a client, returning [`CloopenError::Config`] for unusable settings.
    pub fn try_new(config: ClientConfig) -> Result<Self, CloopenError> {
        CloopenClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: ClientConfig) -> CloopenClientBuilder {
        CloopenClientBuilder::new(config)
    }

    /// Settings this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a templated SMS.
    ///
    /// Steps run in order: validation, template lookup, signing, dispatch. A log record
    /// is emitted exactly once per call, whatever the outcome.
    ///
    /// Errors:
    /// - [`CloopenError::Param`] when the name, destination, or substitutions are missing,
    /// - [`CloopenError::Template`] when no template id can be found,
    /// - [`CloopenError::Request`] for transport failures,
    /// - [`CloopenError::Response`] when the reply is not a JSON object,
    /// - [`CloopenError::Provider`] when Cloopen reports a non-success status.
    pub async fn text(&self, request: TemplateSms) -> Result<(), CloopenError> {
        let mut log = SendLogGuard::new(self.log.as_ref(), &request);
        let result = self.send_template(&request, &mut log).await;
        log.finish(result)
    }

    async fn send_template(
        &self,
        request: &TemplateSms,
        log: &mut SendLogGuard<'_>,
    ) -> Result<(), CloopenError> {
        request.validate()?;

        let template_id = self
            .config
            .templates
            .resolve(request.explicit_template_id(), &request.template_name)
            .map_err(|err| CloopenError::Template { name: err.name })?;
        log.template_id(&template_id);

        let timestamp = CompactTimestamp::at((self.now)(), self.utc_offset);
        let credential = sign(&self.account_sid, &self.account_token, &timestamp);

        self.dispatch(&template_id, request, &credential, log).await
    }

    async fn dispatch(
        &self,
        template_id: &TemplateId,
        request: &TemplateSms,
        credential: &SignedCredential,
        log: &mut SendLogGuard<'_>,
    ) -> Result<(), CloopenError> {
        let body = encode_template_sms_json(&self.app_id, template_id, request);

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("sig", credential.sig());

        let headers = vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            (
                "Content-Type".to_owned(),
                "application/json;charset=utf-8".to_owned(),
            ),
            (
                "Authorization".to_owned(),
                credential.authorization().to_owned(),
            ),
        ];

        tracing::debug!(
            target: "cloopen",
            endpoint = %self.endpoint,
            template_id = template_id.as_str(),
            "dispatching template sms"
        );

        let response = self
            .http
            .post(url.as_str(), headers, body)
            .await
            .map_err(CloopenError::Request)?;
        log.response(response.status, &response.body);

        tracing::debug!(
            target: "cloopen",
            http_status = response.status,
            "template sms response received"
        );

        let parsed = decode_template_sms_json_response(&response.body)
            .map_err(|err| CloopenError::Response(Box::new(err)))?;

        if !parsed.is_success() {
            return Err(CloopenError::Provider {
                status_code: parsed.status_code,
                status_msg: parsed
                    .status_msg
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_owned()),
            });
        }

        Ok(())
    }
}

fn template_sms_endpoint(
    config: &ClientConfig,
    account_sid: &AccountSid,
) -> Result<Url, ValidationError> {
    let host = config.server_ip.trim();
    if host.is_empty() {
        return Err(ValidationError::Empty { field: "server_ip" });
    }
    let soft_version = config.soft_version.trim();
    if soft_version.is_empty() {
        return Err(ValidationError::Empty {
            field: "soft_version",
        });
    }

    let mut url = Url::parse(&format!("https://{host}:{}/", config.server_port)).map_err(
        |err| ValidationError::InvalidServer {
            reason: err.to_string(),
        },
    )?;
    url.path_segments_mut()
        .map_err(|()| ValidationError::InvalidServer {
            reason: format!("{host} cannot be used as a base URL"),
        })?
        .pop_if_empty()
        .extend([
            soft_version,
            "Accounts",
            account_sid.as_str(),
            "SMS",
            "TemplateSMS",
        ]);
    Ok(url)
}
