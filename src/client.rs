use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::{ChatApi, DEFAULT_CONVERSATIONS_LIMIT, DEFAULT_HISTORY_LIMIT};
use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability;
use crate::token_store::{Role, TokenStore};
use crate::types::{
    ChatMessage, Conversation, ConversationSummary, EscalateParams, EscalationAck, FeedbackAck,
    FeedbackParams, HealthStatus, RefundEligibility, RefundEligibilityParams, ReturnWindow,
    SendMessageParams, StartChatParams,
};

/// RAG replies routinely take 20-30 seconds; the default leaves headroom
/// above that before a request is abandoned.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the support-chat API.
///
/// Wraps a fixed base URL, attaches the active role's bearer credential from
/// the [`TokenStore`], and surfaces typed failures. A 401 on any call clears
/// every role's stored credential and requests the login redirect before the
/// error is returned.
#[derive(Clone)]
pub struct Helpdesk {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    token_store: Arc<dyn TokenStore>,
    role: Role,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Helpdesk {
    /// Create a new client for the given role.
    ///
    /// The base URL can be provided directly or read from the
    /// HELPDESK_API_URL environment variable.
    pub fn new(
        base_url: Option<String>,
        token_store: Arc<dyn TokenStore>,
        role: Role,
    ) -> Result<Self> {
        Self::with_options(base_url, None, token_store, role)
    }

    /// Create a new client with a custom request timeout.
    pub fn with_options(
        base_url: Option<String>,
        timeout: Option<Duration>,
        token_store: Arc<dyn TokenStore>,
        role: Role,
    ) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var("HELPDESK_API_URL").map_err(|_| {
                Error::validation(
                    "base URL not provided and HELPDESK_API_URL environment variable not set",
                    Some("base_url".to_string()),
                )
            })?,
        };
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        url::Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            token_store,
            role,
            logger: None,
        })
    }

    /// Install a logger that records conversation starts and replies.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The role this client authenticates as.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token_store.get(self.role) {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                Error::validation(
                    "stored token contains characters invalid in a header",
                    Some("token".to_string()),
                )
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Clears every role's credential and requests the login redirect.
    ///
    /// Role-agnostic: whichever portal's client hits the 401, the outcome is
    /// the same terminal logged-out state.
    fn handle_unauthorized(&self) {
        observability::CLIENT_AUTH_FAILURES.click();
        self.token_store.clear_all();
        self.token_store.redirect_to_login();
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(&self, response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The backend reports failures as `{ "detail": ... }`.
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.detail);
        let message =
            detail.unwrap_or_else(|| format!("Request failed with status {status_code}"));

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Error::authentication(message);
        }

        match status_code {
            400 | 422 => Error::bad_request(message, None),
            403 => Error::permission(message),
            404 => Error::not_found(message, None, None),
            408 => Error::timeout(message, None),
            429 => Error::rate_limit(message, retry_after),
            500 => Error::internal_server(message, request_id),
            502..=504 => Error::service_unavailable(message, retry_after),
            _ => Error::api(status_code, message, request_id),
        }
    }

    /// Map a transport-level failure to our Error type.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Parse a successful response body.
    async fn parse_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Issue a POST with a JSON body and parse the JSON reply.
    async fn post_json<P, T>(&self, path: &str, params: &P) -> Result<T>
    where
        P: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();
        observability::CLIENT_REQUESTS.click();

        let result = async {
            let response = self
                .client
                .post(&url)
                .headers(self.default_headers()?)
                .json(params)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            if !response.status().is_success() {
                return Err(self.process_error_response(response).await);
            }

            self.parse_response(response).await
        }
        .await;

        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            observability::CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    /// Issue a GET and parse the JSON reply.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();
        observability::CLIENT_REQUESTS.click();

        let result = async {
            let response = self
                .client
                .get(&url)
                .headers(self.default_headers()?)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            if !response.status().is_success() {
                return Err(self.process_error_response(response).await);
            }

            self.parse_response(response).await
        }
        .await;

        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            observability::CLIENT_REQUEST_ERRORS.click();
        }
        result
    }
}

#[async_trait]
impl ChatApi for Helpdesk {
    async fn start_chat(&self, params: StartChatParams) -> Result<Conversation> {
        let conversation: Conversation = self.post_json("chat/start", &params).await?;
        if let Some(logger) = &self.logger {
            logger.log_started(&conversation);
        }
        Ok(conversation)
    }

    async fn send_message(&self, params: SendMessageParams) -> Result<ChatMessage> {
        let reply: ChatMessage = self.post_json("chat/message", &params).await?;
        if let Some(logger) = &self.logger {
            logger.log_reply(&reply);
        }
        Ok(reply)
    }

    async fn chat_history(&self, conversation_id: &str, limit: u32) -> Result<Vec<ChatMessage>> {
        self.get_json(&format!("chat/history/{conversation_id}?limit={limit}"))
            .await
    }

    async fn conversations(&self, limit: u32) -> Result<Vec<ConversationSummary>> {
        self.get_json(&format!("chat/conversations?limit={limit}"))
            .await
    }

    async fn escalate(&self, params: EscalateParams) -> Result<EscalationAck> {
        self.post_json("chat/escalate", &params).await
    }

    async fn submit_feedback(&self, params: FeedbackParams) -> Result<FeedbackAck> {
        self.post_json("chat/feedback", &params).await
    }

    async fn check_refund_eligibility(
        &self,
        params: RefundEligibilityParams,
    ) -> Result<RefundEligibility> {
        self.post_json("chat/check-refund-eligibility", &params)
            .await
    }

    async fn return_window(&self, category: &str) -> Result<ReturnWindow> {
        self.get_json(&format!("chat/return-window/{category}"))
            .await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("chat/health").await
    }
}

/// Convenience wrappers that apply the documented default limits.
impl Helpdesk {
    /// Reads history with the default limit of 50 messages.
    pub async fn chat_history_default(&self, conversation_id: &str) -> Result<Vec<ChatMessage>> {
        self.chat_history(conversation_id, DEFAULT_HISTORY_LIMIT)
            .await
    }

    /// Lists conversations with the default limit of 20.
    pub async fn conversations_default(&self) -> Result<Vec<ConversationSummary>> {
        self.conversations(DEFAULT_CONVERSATIONS_LIMIT).await
    }
}
