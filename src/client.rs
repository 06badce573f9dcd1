//! A client for the Gap messenger bot HTTP API.
//!
//! Every public operation assembles a [`MessageParams`] mapping and hands it to
//! [`GapClient::send_request`], which attaches the `token` header, posts the
//! parameters form-encoded to `base_url + method`, and returns the response body.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gap_rs::{GapClient, SendOptions};
//!
//! # async fn run() -> Result<(), gap_rs::GapClientError> {
//! let client = GapClient::try_new("BOT_TOKEN")?;
//! let message_id = client.send_text(1234, "Hello!", &SendOptions::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors surface immediately; nothing is retried. Send-family operations
//! return `Ok(None)` when the platform answers with an empty body, which is the
//! one case treated as "nothing happened" rather than as a failure.

use http::StatusCode;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

use gap_types::response::IdResponse;
use gap_types::{
    InlineKeyboard, MediaInput, MediaKind, MessageId, MessageParams, MessageType, Method,
    PaymentStatus, ReplyKeyboard, SendOptions, ValidationError,
};

use crate::config::{GapConfig, config_defaults};
use crate::error::GapClientError;
use crate::upload::ensure_media_file;

#[cfg(feature = "telemetry")]
use tracing::{Span, debug, instrument};

/// Header carrying the bot token on every request.
pub const TOKEN_HEADER: &str = "token";

/// Parameters of the most recent `sendMessage` call.
///
/// Last writer wins. Each clone has an independent, initially empty state.
#[derive(Debug, Default)]
struct LastMessage(RwLock<Option<MessageParams>>);

impl LastMessage {
    async fn get(&self) -> Option<MessageParams> {
        self.0.read().await.clone()
    }

    async fn set(&self, params: MessageParams) {
        *self.0.write().await = Some(params);
    }
}

impl Clone for LastMessage {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// A client for the Gap bot API.
#[derive(Clone)]
pub struct GapClient {
    /// Base URL of the API, always ending in `/`
    base_url: Url,
    /// Bot token sent in the `token` header
    token: String,
    /// Chat actions accepted by [`GapClient::send_action`]
    actions: Vec<String>,
    /// Optional request timeout
    timeout: Option<Duration>,
    client: Client,
    last_message: LastMessage,
}

impl fmt::Debug for GapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("actions", &self.actions)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct LocationData<'a> {
    lat: f64,
    long: f64,
    desc: &'a str,
}

#[derive(Serialize)]
struct ContactData<'a> {
    phone: &'a str,
    name: &'a str,
}

impl GapClient {
    /// Constructs a client for the public API at `https://api.gap.im/`.
    ///
    /// Fails with [`GapClientError::MissingToken`] when `token` is blank.
    pub fn try_new(token: impl Into<String>) -> Result<Self, GapClientError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GapClientError::MissingToken);
        }
        let base_url = Url::parse(config_defaults::DEFAULT_BASE_URL).map_err(|e| {
            GapClientError::UrlParse {
                context: "Failed to parse default base url",
                source: e,
            }
        })?;
        Ok(Self {
            base_url,
            token,
            actions: config_defaults::default_actions(),
            timeout: None,
            client: Client::new(),
            last_message: LastMessage::default(),
        })
    }

    /// Constructs a client from `GAP_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self, GapClientError> {
        let config = GapConfig::from_env()?;
        GapClient::try_from(config)
    }

    /// Points the client at another API root, e.g. a mock server.
    pub fn with_base_url(&self, base_url: Url) -> Self {
        let mut this = self.clone();
        this.base_url = normalize_base_url(base_url);
        this
    }

    /// Sets a timeout for all future requests.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = Some(timeout);
        this
    }

    /// Replaces the chat actions accepted by [`GapClient::send_action`].
    pub fn with_actions<I, S>(&self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut this = self.clone();
        this.actions = actions.into_iter().map(Into::into).collect();
        this
    }

    /// Returns the base URL used by this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the chat actions accepted by [`GapClient::send_action`].
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Parameters of the most recent `sendMessage` call made by this client.
    pub async fn last_message(&self) -> Option<MessageParams> {
        self.last_message.get().await
    }

    /// Sends `params` to `method` and returns the raw response body.
    ///
    /// If `msg_type` is given it is stored under `type`. Calls to `sendMessage`
    /// are remembered as [`GapClient::last_message`]. Any status other than
    /// `200 OK` fails with [`GapClientError::HttpStatus`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gap.client.send_request",
            skip_all,
            fields(
                method = %method,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn send_request(
        &self,
        msg_type: Option<&str>,
        mut params: MessageParams,
        method: Method,
    ) -> Result<String, GapClientError> {
        if let Some(msg_type) = msg_type {
            params.insert("type", msg_type);
        }
        if method == Method::SendMessage {
            self.last_message.set(params.clone()).await;
        }

        #[cfg(feature = "telemetry")]
        debug!(msg_type = ?params.get("type"), fields = params.len(), "Dispatching request");

        let request = self.post(method)?.form(&params);
        let result = self.execute(request, method.as_str()).await;

        record_result_on_span(&result);

        result
    }

    /// Starts an authorized `POST` to `method`, with the timeout applied.
    pub(crate) fn post(&self, method: Method) -> Result<RequestBuilder, GapClientError> {
        let url = self
            .base_url
            .join(method.as_str())
            .map_err(|e| GapClientError::UrlParse {
                context: "Failed to construct method URL",
                source: e,
            })?;
        let mut request = self.client.post(url).header(TOKEN_HEADER, &self.token);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    /// Sends `request` and returns its body, failing on any status but `200 OK`.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<String, GapClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| GapClientError::Http { context, source: e })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GapClientError::ResponseBodyRead { context, source: e })?;
        if status != StatusCode::OK {
            return Err(GapClientError::http_status(context, status, body));
        }
        Ok(body)
    }

    /// Shows a chat action such as `typing` to the user.
    ///
    /// Fails with [`ValidationError::InvalidAction`] for actions outside the
    /// client's allow-list.
    pub async fn send_action(&self, chat_id: i64, action: &str) -> Result<String, GapClientError> {
        if !self.actions.iter().any(|accepted| accepted == action) {
            return Err(ValidationError::InvalidAction {
                accepted: self.actions.clone(),
            }
            .into());
        }
        let params = MessageParams::new().with("chat_id", chat_id);
        self.send_request(Some(action), params, Method::SendAction)
            .await
    }

    /// Sends a text message. Returns the new message id, or `None` on an empty response.
    pub async fn send_text(
        &self,
        chat_id: i64,
        data: &str,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("data", data);
        self.send_message(MessageType::Text, params, options).await
    }

    /// Sends a location pin with an optional description.
    pub async fn send_location(
        &self,
        chat_id: i64,
        lat: f64,
        long: f64,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        let data = LocationData {
            lat,
            long,
            desc: desc.unwrap_or_default(),
        };
        let data = serde_json::to_string(&data).map_err(|e| GapClientError::Serialization {
            context: "location data",
            source: e,
        })?;
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("data", data);
        self.send_message(MessageType::Location, params, options)
            .await
    }

    /// Sends a contact card.
    pub async fn send_contact(
        &self,
        chat_id: i64,
        phone: &str,
        name: &str,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        let data = serde_json::to_string(&ContactData { phone, name }).map_err(|e| {
            GapClientError::Serialization {
                context: "contact data",
                source: e,
            }
        })?;
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("data", data);
        self.send_message(MessageType::Contact, params, options)
            .await
    }

    /// Sends an image. See [`GapClient::send_media`].
    pub async fn send_image(
        &self,
        chat_id: i64,
        image: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        self.send_media(MediaKind::Image, chat_id, image, desc, options)
            .await
    }

    /// Sends an audio track. See [`GapClient::send_media`].
    pub async fn send_audio(
        &self,
        chat_id: i64,
        audio: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        self.send_media(MediaKind::Audio, chat_id, audio, desc, options)
            .await
    }

    /// Sends a video. See [`GapClient::send_media`].
    pub async fn send_video(
        &self,
        chat_id: i64,
        video: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        self.send_media(MediaKind::Video, chat_id, video, desc, options)
            .await
    }

    /// Sends a file attachment. See [`GapClient::send_media`].
    pub async fn send_file(
        &self,
        chat_id: i64,
        file: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        self.send_media(MediaKind::File, chat_id, file, desc, options)
            .await
    }

    /// Sends a voice note. See [`GapClient::send_media`].
    pub async fn send_voice(
        &self,
        chat_id: i64,
        voice: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        self.send_media(MediaKind::Voice, chat_id, voice, desc, options)
            .await
    }

    /// Sends media of any kind.
    ///
    /// A [`MediaInput::LocalPath`] is checked and uploaded first; the upload
    /// decides the message type tag and the reference sent as `data`.
    pub async fn send_media(
        &self,
        kind: MediaKind,
        chat_id: i64,
        media: &MediaInput,
        desc: Option<&str>,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        let (msg_type, data) = match media {
            MediaInput::Reference(reference) => (kind.message_type(), reference.clone()),
            MediaInput::LocalPath(path) => {
                ensure_media_file(kind, path).await?;
                let uploaded = self
                    .upload_file(kind, path, desc.unwrap_or_default())
                    .await?;
                (uploaded.msg_type, uploaded.reference)
            }
        };
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("data", data);
        self.send_message(msg_type, params, options).await
    }

    async fn send_message(
        &self,
        msg_type: MessageType,
        params: MessageParams,
        options: &SendOptions,
    ) -> Result<Option<MessageId>, GapClientError> {
        let params = options
            .apply(params)
            .map_err(|e| GapClientError::Serialization {
                context: "send options",
                source: e,
            })?;
        let body = self
            .send_request(Some(msg_type.as_str()), params, Method::SendMessage)
            .await?;
        message_id_from_body(&body)
    }

    /// Edits the text and/or inline keyboard of a sent message.
    ///
    /// `inline_keyboard` must be a list of button rows, otherwise this fails with
    /// [`ValidationError::InlineKeyboardNotRows`] before anything is sent.
    pub async fn edit_message(
        &self,
        chat_id: i64,
        message_id: impl Into<MessageId>,
        data: Option<&str>,
        inline_keyboard: Option<Value>,
    ) -> Result<String, GapClientError> {
        let inline_keyboard = inline_keyboard
            .map(InlineKeyboard::try_from)
            .transpose()?
            .map(|keyboard| keyboard.to_json_string())
            .transpose()
            .map_err(|e| GapClientError::Serialization {
                context: "inline keyboard",
                source: e,
            })?;
        let message_id: MessageId = message_id.into();
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("message_id", message_id)
            .with_opt("data", data)
            .with_opt("inline_keyboard", inline_keyboard);
        self.send_request(None, params, Method::EditMessage).await
    }

    /// Deletes a sent message and returns the raw response body.
    pub async fn delete_message(
        &self,
        chat_id: i64,
        message_id: impl Into<MessageId>,
    ) -> Result<String, GapClientError> {
        let message_id: MessageId = message_id.into();
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("message_id", message_id);
        self.send_request(None, params, Method::DeleteMessage).await
    }

    /// Answers an inline keyboard callback.
    ///
    /// `show_alert` goes on the wire as the literal string `"true"` or `"false"`.
    pub async fn answer_callback(
        &self,
        chat_id: i64,
        callback_id: &str,
        text: &str,
        show_alert: bool,
    ) -> Result<String, GapClientError> {
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("callback_id", callback_id)
            .with("text", text)
            .with("show_alert", if show_alert { "true" } else { "false" });
        self.send_request(None, params, Method::AnswerCallback)
            .await
    }

    /// Sends a payment invoice and returns its id.
    ///
    /// Unlike the send-family, a response without `id` is an error.
    pub async fn send_invoice(
        &self,
        chat_id: i64,
        amount: u64,
        description: &str,
    ) -> Result<MessageId, GapClientError> {
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("amount", amount)
            .with("description", description);
        let body = self.send_request(None, params, Method::Invoice).await?;
        let response: IdResponse =
            serde_json::from_str(&body).map_err(|e| GapClientError::JsonDeserialization {
                context: Method::Invoice.as_str(),
                source: e,
            })?;
        response.id.ok_or(GapClientError::MissingField {
            context: Method::Invoice.as_str(),
            field: "id",
        })
    }

    /// Returns whether the payment `ref_id` is verified.
    pub async fn pay_verify(&self, chat_id: i64, ref_id: &str) -> Result<bool, GapClientError> {
        let status = self.payment_status(Method::PayVerify, chat_id, ref_id).await?;
        Ok(status.is_verified())
    }

    /// Returns whether the payment `ref_id` is verified, without settling it.
    pub async fn pay_inquiry(&self, chat_id: i64, ref_id: &str) -> Result<bool, GapClientError> {
        let status = self.payment_status(Method::PayInquiry, chat_id, ref_id).await?;
        Ok(status.is_verified())
    }

    async fn payment_status(
        &self,
        method: Method,
        chat_id: i64,
        ref_id: &str,
    ) -> Result<PaymentStatus, GapClientError> {
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with("ref_id", ref_id);
        let body = self.send_request(None, params, method).await?;
        serde_json::from_str(&body).map_err(|e| GapClientError::JsonDeserialization {
            context: method.as_str(),
            source: e,
        })
    }

    /// Asks the user to charge their wallet, with an optional description.
    pub async fn request_wallet_charge(
        &self,
        chat_id: i64,
        desc: Option<&str>,
    ) -> Result<String, GapClientError> {
        let params = MessageParams::new()
            .with("chat_id", chat_id)
            .with_opt("desc", desc);
        self.send_request(None, params, Method::RequestWalletCharge)
            .await
    }

    /// Renders a reply keyboard as the JSON string the send-family expects.
    ///
    /// Fails with [`ValidationError::ReplyKeyboardNotMapping`] if `keyboard` is not a JSON object.
    pub fn reply_keyboard(
        keyboard: Value,
        once: bool,
        selective: bool,
    ) -> Result<String, GapClientError> {
        let keyboard = ReplyKeyboard::try_new(keyboard)?
            .with_once(once)
            .with_selective(selective);
        keyboard
            .to_json_string()
            .map_err(|e| GapClientError::Serialization {
                context: "reply keyboard",
                source: e,
            })
    }
}

impl TryFrom<GapConfig> for GapClient {
    type Error = GapClientError;

    fn try_from(config: GapConfig) -> Result<Self, Self::Error> {
        let timeout = config.timeout();
        let token = config.token.ok_or(GapClientError::MissingToken)?;
        let client = GapClient::try_new(token.into_inner())?
            .with_base_url(config.base_url)
            .with_actions(config.actions);
        Ok(match timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        })
    }
}

impl Display for GapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GapClient({})", self.base_url)
    }
}

/// Extracts `id` from a send-family response; an empty body yields `None`.
fn message_id_from_body(body: &str) -> Result<Option<MessageId>, GapClientError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let context = Method::SendMessage.as_str();
    let response: IdResponse = serde_json::from_str(body)
        .map_err(|e| GapClientError::JsonDeserialization { context, source: e })?;
    response
        .id
        .map(Some)
        .ok_or(GapClientError::MissingField { context, field: "id" })
}

/// Ensures the path ends with `/` so that `join` appends instead of replacing.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
pub(crate) fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Gap API failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
pub(crate) fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "test-token";

    fn client_for(server: &MockServer) -> GapClient {
        GapClient::try_new(TOKEN)
            .unwrap()
            .with_base_url(server.uri().parse().unwrap())
    }

    async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(format!("/{endpoint}")))
            .and(header(TOKEN_HEADER, TOKEN))
            .respond_with(response)
            .mount(server)
            .await;
    }

    /// Decodes the form body of the last request the server received.
    async fn last_form(server: &MockServer) -> HashMap<String, String> {
        let requests = server.received_requests().await.unwrap();
        let request = requests.last().expect("no request received");
        url::form_urlencoded::parse(&request.body)
            .into_owned()
            .collect()
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.unwrap().len()
    }

    #[test]
    fn test_blank_token_is_rejected() {
        assert!(matches!(
            GapClient::try_new(""),
            Err(GapClientError::MissingToken)
        ));
        assert!(matches!(
            GapClient::try_new("   "),
            Err(GapClientError::MissingToken)
        ));
    }

    #[test]
    fn test_config_without_token_is_rejected() {
        let result = GapClient::try_from(GapConfig::default());
        assert!(matches!(result, Err(GapClientError::MissingToken)));
    }

    #[test]
    fn test_config_settings_are_applied() {
        let mut config = GapConfig::with_token("abc");
        config.base_url = "http://localhost:9000/api".parse().unwrap();
        config.timeout_secs = Some(3);
        config.actions = vec!["typing".into(), "recording".into()];
        let client = GapClient::try_from(config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/api/");
        assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(client.actions().len(), 2);
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = GapClient::try_new("super-secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("api.gap.im"));
    }

    #[test]
    fn test_reply_keyboard_rejects_list() {
        let result = GapClient::reply_keyboard(json!(["a", "b"]), true, false);
        assert!(matches!(
            result,
            Err(GapClientError::Validation(
                ValidationError::ReplyKeyboardNotMapping
            ))
        ));
    }

    #[test]
    fn test_reply_keyboard_renders_all_keys() {
        let rendered = GapClient::reply_keyboard(json!({"a": "Option A"}), false, true).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["keyboard"], json!({"a": "Option A"}));
        assert_eq!(value["once"], json!(false));
        assert_eq!(value["selective"], json!(true));
    }

    #[tokio::test]
    async fn test_send_text_returns_message_id() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 42})),
        )
        .await;

        let client = client_for(&server);
        let id = client.send_text(1, "hi", &SendOptions::new()).await.unwrap();
        assert_eq!(id, Some(MessageId::Number(42)));

        let form = last_form(&server).await;
        assert_eq!(form["chat_id"], "1");
        assert_eq!(form["data"], "hi");
        assert_eq!(form["type"], "text");
    }

    #[tokio::test]
    async fn test_send_text_empty_body_is_none() {
        let server = MockServer::start().await;
        mount(&server, "sendMessage", ResponseTemplate::new(200)).await;

        let client = client_for(&server);
        let id = client.send_text(1, "hi", &SendOptions::new()).await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_non_200_carries_body() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(403).set_body_string("forbidden"),
        )
        .await;

        let client = client_for(&server);
        let err = client
            .send_contact(1, "+989120000000", "Ali", &SendOptions::new())
            .await
            .unwrap_err();
        match err {
            GapClientError::HttpStatus { status, body, .. } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_200_without_body_uses_generic_message() {
        let server = MockServer::start().await;
        mount(&server, "deleteMessage", ResponseTemplate::new(500)).await;

        let client = client_for(&server);
        let err = client.delete_message(1, 10).await.unwrap_err();
        assert_eq!(
            err.response_body(),
            Some(crate::error::GENERIC_ERROR_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_send_text_attaches_options() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": "m-1"})),
        )
        .await;

        let reply = ReplyKeyboard::try_new(json!({"y": "Yes"})).unwrap();
        let inline = InlineKeyboard::try_from(json!([[{"text": "Go", "cb_data": "go"}]])).unwrap();
        let options = SendOptions::new()
            .with_reply_keyboard(reply)
            .with_inline_keyboard(inline);

        let client = client_for(&server);
        let id = client.send_text(7, "pick", &options).await.unwrap();
        assert_eq!(id, Some(MessageId::from("m-1")));

        let form = last_form(&server).await;
        let reply: Value = serde_json::from_str(&form["reply_keyboard"]).unwrap();
        assert_eq!(
            reply,
            json!({"keyboard": {"y": "Yes"}, "once": true, "selective": false})
        );
        let inline: Value = serde_json::from_str(&form["inline_keyboard"]).unwrap();
        assert_eq!(inline, json!([[{"text": "Go", "cb_data": "go"}]]));
        assert!(!form.contains_key("form"));
    }

    #[tokio::test]
    async fn test_send_location_encodes_payload() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 3})),
        )
        .await;

        let client = client_for(&server);
        client
            .send_location(1, 35.7, 51.4, Some("Tehran"), &SendOptions::new())
            .await
            .unwrap();

        let form = last_form(&server).await;
        assert_eq!(form["type"], "location");
        let data: Value = serde_json::from_str(&form["data"]).unwrap();
        assert_eq!(data, json!({"lat": 35.7, "long": 51.4, "desc": "Tehran"}));
    }

    #[tokio::test]
    async fn test_send_contact_encodes_payload() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 4})),
        )
        .await;

        let client = client_for(&server);
        client
            .send_contact(1, "+98912", "Sara", &SendOptions::new())
            .await
            .unwrap();

        let form = last_form(&server).await;
        assert_eq!(form["type"], "contact");
        let data: Value = serde_json::from_str(&form["data"]).unwrap();
        assert_eq!(data, json!({"phone": "+98912", "name": "Sara"}));
    }

    #[tokio::test]
    async fn test_send_media_with_reference_sends_it_verbatim() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 5})),
        )
        .await;

        let reference = r#"{"path":"files/a.mp3","desc":"song"}"#;
        let client = client_for(&server);
        let id = client
            .send_audio(1, &MediaInput::reference(reference), None, &SendOptions::new())
            .await
            .unwrap();
        assert_eq!(id, Some(MessageId::Number(5)));

        let form = last_form(&server).await;
        assert_eq!(form["type"], "audio");
        assert_eq!(form["data"], reference);
    }

    #[tokio::test]
    async fn test_send_media_with_missing_path_fails_before_sending() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let missing = MediaInput::path("/no/such/dir/media.bin");
        let options = SendOptions::new();

        let results = [
            (MediaKind::Image, client.send_image(1, &missing, None, &options).await),
            (MediaKind::Audio, client.send_audio(1, &missing, None, &options).await),
            (MediaKind::Video, client.send_video(1, &missing, None, &options).await),
            (MediaKind::File, client.send_file(1, &missing, None, &options).await),
            (MediaKind::Voice, client.send_voice(1, &missing, None, &options).await),
        ];
        for (kind, result) in results {
            match result {
                Err(GapClientError::Validation(ValidationError::InvalidMediaPath {
                    kind: rejected,
                })) => assert_eq!(rejected, kind),
                other => panic!("expected invalid path for {kind}, got {other:?}"),
            }
        }
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_send_action_rejects_unknown_action() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client.send_action(1, "dancing").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Action! Accepted value: typing");
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_send_action_sends_type() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendAction",
            ResponseTemplate::new(200).set_body_string("ok"),
        )
        .await;

        let client = client_for(&server);
        let body = client.send_action(9, "typing").await.unwrap();
        assert_eq!(body, "ok");

        let form = last_form(&server).await;
        assert_eq!(form["type"], "typing");
        assert_eq!(form["chat_id"], "9");
        assert!(client.last_message().await.is_none());
    }

    #[tokio::test]
    async fn test_custom_actions_are_accepted() {
        let server = MockServer::start().await;
        mount(&server, "sendAction", ResponseTemplate::new(200)).await;

        let client = client_for(&server).with_actions(["recording"]);
        client.send_action(1, "recording").await.unwrap();
        assert!(client.send_action(1, "typing").await.is_err());
    }

    #[tokio::test]
    async fn test_last_message_tracks_send_message_only() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 1})),
        )
        .await;
        mount(&server, "deleteMessage", ResponseTemplate::new(200)).await;

        let client = client_for(&server);
        assert!(client.last_message().await.is_none());

        client.send_text(1, "first", &SendOptions::new()).await.unwrap();
        client.send_text(1, "second", &SendOptions::new()).await.unwrap();
        client.delete_message(1, 1).await.unwrap();

        let last = client.last_message().await.unwrap();
        assert_eq!(last.get("data"), Some("second"));
        assert_eq!(last.get("type"), Some("text"));
    }

    #[tokio::test]
    async fn test_last_message_is_recorded_even_on_failure() {
        let server = MockServer::start().await;
        mount(
            &server,
            "sendMessage",
            ResponseTemplate::new(500).set_body_string("boom"),
        )
        .await;

        let client = client_for(&server);
        assert!(client.send_text(1, "lost", &SendOptions::new()).await.is_err());
        let last = client.last_message().await.unwrap();
        assert_eq!(last.get("data"), Some("lost"));
    }

    #[tokio::test]
    async fn test_edit_message_rejects_non_list_keyboard() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client
            .edit_message(1, 2, None, Some(json!({"text": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GapClientError::Validation(ValidationError::InlineKeyboardNotRows)
        ));
        assert_eq!(request_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_edit_message_serializes_keyboard_verbatim() {
        let server = MockServer::start().await;
        mount(
            &server,
            "editMessage",
            ResponseTemplate::new(200).set_body_string("done"),
        )
        .await;

        let keyboard = json!([[{"text": "A", "cb_data": "a"}, {"text": "B", "cb_data": "b"}]]);
        let client = client_for(&server);
        let body = client
            .edit_message(1, 2, Some("edited"), Some(keyboard.clone()))
            .await
            .unwrap();
        assert_eq!(body, "done");

        let form = last_form(&server).await;
        assert_eq!(form["message_id"], "2");
        assert_eq!(form["data"], "edited");
        assert!(!form.contains_key("type"));
        let sent: Value = serde_json::from_str(&form["inline_keyboard"]).unwrap();
        assert_eq!(sent, keyboard);
    }

    #[tokio::test]
    async fn test_answer_callback_sends_string_booleans() {
        let server = MockServer::start().await;
        mount(&server, "answerCallback", ResponseTemplate::new(200)).await;

        let client = client_for(&server);
        client.answer_callback(1, "cb-1", "Saved", true).await.unwrap();
        let form = last_form(&server).await;
        assert_eq!(form["show_alert"], "true");
        assert_eq!(form["callback_id"], "cb-1");

        client.answer_callback(1, "cb-2", "Saved", false).await.unwrap();
        let form = last_form(&server).await;
        assert_eq!(form["show_alert"], "false");
    }

    #[tokio::test]
    async fn test_send_invoice_returns_id() {
        let server = MockServer::start().await;
        mount(
            &server,
            "invoice",
            ResponseTemplate::new(200).set_body_json(json!({"id": "inv-1"})),
        )
        .await;

        let client = client_for(&server);
        let id = client.send_invoice(1, 50_000, "Premium").await.unwrap();
        assert_eq!(id, MessageId::from("inv-1"));

        let form = last_form(&server).await;
        assert_eq!(form["amount"], "50000");
        assert_eq!(form["description"], "Premium");
        assert!(client.last_message().await.is_none());
    }

    #[tokio::test]
    async fn test_send_invoice_without_id_fails() {
        let server = MockServer::start().await;
        mount(
            &server,
            "invoice",
            ResponseTemplate::new(200).set_body_json(json!({"ok": true})),
        )
        .await;

        let client = client_for(&server);
        let err = client.send_invoice(1, 10, "x").await.unwrap_err();
        assert!(matches!(
            err,
            GapClientError::MissingField { field: "id", .. }
        ));
    }

    #[tokio::test]
    async fn test_pay_verify_checks_status() {
        let server = MockServer::start().await;
        mount(
            &server,
            "payVerify",
            ResponseTemplate::new(200).set_body_json(json!({"status": "verified", "amount": 10})),
        )
        .await;
        mount(
            &server,
            "payInquiry",
            ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})),
        )
        .await;

        let client = client_for(&server);
        assert!(client.pay_verify(1, "ref-1").await.unwrap());
        assert!(!client.pay_inquiry(1, "ref-1").await.unwrap());

        let form = last_form(&server).await;
        assert_eq!(form["ref_id"], "ref-1");
    }

    #[tokio::test]
    async fn test_pay_verify_rejects_list_response() {
        let server = MockServer::start().await;
        mount(
            &server,
            "payVerify",
            ResponseTemplate::new(200).set_body_json(json!(["verified"])),
        )
        .await;

        let client = client_for(&server);
        let err = client.pay_verify(1, "ref-1").await.unwrap_err();
        assert!(matches!(err, GapClientError::JsonDeserialization { .. }));
    }

    #[tokio::test]
    async fn test_request_wallet_charge_omits_missing_desc() {
        let server = MockServer::start().await;
        mount(
            &server,
            "requestWalletCharge",
            ResponseTemplate::new(200).set_body_string("charged"),
        )
        .await;

        let client = client_for(&server);
        let body = client.request_wallet_charge(1, None).await.unwrap();
        assert_eq!(body, "charged");
        let form = last_form(&server).await;
        assert!(!form.contains_key("desc"));

        client.request_wallet_charge(1, Some("top up")).await.unwrap();
        let form = last_form(&server).await;
        assert_eq!(form["desc"], "top up");
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start().await;
        mount(
            &server,
            "v1/sendMessage",
            ResponseTemplate::new(200).set_body_json(json!({"id": 11})),
        )
        .await;

        let base: Url = format!("{}/v1", server.uri()).parse().unwrap();
        let client = GapClient::try_new(TOKEN).unwrap().with_base_url(base);
        let id = client.send_text(1, "hi", &SendOptions::new()).await.unwrap();
        assert_eq!(id, Some(MessageId::Number(11)));
    }
}
