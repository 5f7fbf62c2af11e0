use std::{
    env,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use crate::{
    config::{Config, API_KEY_VAR},
    error::Error,
    http::{ReqwestTransport, Transport},
    models::payload::Payload,
    request::{Endpoint, RequestTemplate},
    result::Result,
    window::{RequestCounter, SystemClock},
};
use parking_lot::RwLock;

/// Client for the forum API.
///
/// Every call sends one authorized `GET` request and returns the parsed
/// body. Calls that reach the API with an accepted key are recorded in the
/// client's [`RequestCounter`].
#[derive(Debug)]
pub struct Client {
    transport: Arc<dyn Transport>,
    template: RwLock<RequestTemplate>,
    counter: Arc<RequestCounter>,
}

impl Client {
    /// Creates a client for the public API using `api_key`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the key cannot be sent as a header.
    pub fn new(api_key: &str) -> Result<Client> {
        Builder::new().api_key(api_key).build()
    }

    /// Returns a [`Builder`] for a customised client.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Replaces the API key used by all subsequent requests.
    ///
    /// Requests already in flight keep the key they were sent with, and the
    /// request counter is left untouched.
    ///
    /// # Errors
    ///
    /// This function will return an error if the key cannot be sent as a header.
    pub fn set_api_key(&self, api_key: &str) -> Result<()> {
        let mut template = self.template.write();
        *template = template.with_api_key(api_key)?;
        log::debug!("authorization header replaced");
        Ok(())
    }

    /// Checks whether the current API key is accepted.
    ///
    /// Returns `Ok(false)` if upstream rejects the key. An accepted probe
    /// counts against the rate limit like any other request.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails or the body is not JSON.
    pub async fn test_api_key(&self) -> Result<bool> {
        match self.fetch(&Endpoint::Root).await {
            Ok(_) => Ok(true),
            Err(Error::InvalidApiKey) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Sends the request for `endpoint` and returns the parsed body.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received.
    /// - [`Error::MalformedBody`] if the body is not JSON.
    /// - [`Error::InvalidApiKey`] if upstream rejected the key.
    ///
    /// None of these are recorded in the request counter.
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<Payload> {
        let request = self.template.read().describe(endpoint);
        log::info!("request for {endpoint} dispatched");
        let reply = self.transport.send(request).await?;
        log::info!("response status: {}", reply.status);

        let payload: Payload = serde_json::from_str(&reply.body)?;
        if payload.is_invalid_api_key() {
            log::warn!("API key rejected on {endpoint}");
            return Err(Error::InvalidApiKey);
        }

        // a well-formed "not found" still used up quota
        self.counter.record();
        Ok(payload)
    }

    /// Fetches a user.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn user(&self, user_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::User(user_id)).await
    }

    /// Fetches several users in one request.
    ///
    /// Each user's result is listed under the `uids` field.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn users(&self, user_ids: &[u64]) -> Result<Payload> {
        self.fetch(&Endpoint::Users(user_ids.to_vec())).await
    }

    /// Fetches a category and its forums.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn category(&self, category_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::Category(category_id)).await
    }

    /// Fetches a forum and its threads.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn forum(&self, forum_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::Forum(forum_id)).await
    }

    /// Fetches one page of a thread, including post contents.
    ///
    /// With `raw` set, post contents are returned as `MyCode` instead of HTML.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn thread(&self, thread_id: u64, page: u32, raw: bool) -> Result<Payload> {
        self.fetch(&Endpoint::Thread {
            id: thread_id,
            page,
            raw,
        })
        .await
    }

    /// Fetches a post.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn post(&self, post_id: u64, raw: bool) -> Result<Payload> {
        self.fetch(&Endpoint::Post { id: post_id, raw }).await
    }

    /// Reads a private message. Upstream marks it as read.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn private_message(&self, pm_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::PrivateMessage(pm_id)).await
    }

    /// Alias for [`Client::private_message`].
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn pm(&self, pm_id: u64) -> Result<Payload> {
        self.private_message(pm_id).await
    }

    /// Lists the messages in a message box.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn private_message_box(&self, box_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::PrivateMessageBox(box_id)).await
    }

    /// Alias for [`Client::private_message_box`].
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn pm_box(&self, box_id: u64) -> Result<Payload> {
        self.private_message_box(box_id).await
    }

    /// Fetches a group.
    ///
    /// # Errors
    ///
    /// See [`Client::fetch`].
    pub async fn group(&self, group_id: u64) -> Result<Payload> {
        self.fetch(&Endpoint::Group(group_id)).await
    }

    /// Returns how many billable requests were sent within the rate-limit window.
    pub fn request_count(&self) -> usize {
        self.counter.count()
    }

    /// Returns the time (ms since the epoch) of the latest billable request.
    pub fn latest_request(&self) -> Option<i64> {
        self.counter.latest()
    }

    /// Returns the counter this client records into.
    pub fn counter(&self) -> &Arc<RequestCounter> {
        &self.counter
    }
}

/// Builds a [`Client`].
#[derive(Default)]
pub struct Builder {
    api_key: Option<String>,
    config: Config,
    transport: Option<Arc<dyn Transport>>,
    counter: Option<Arc<RequestCounter>>,
}

impl Builder {
    /// Creates a builder with default settings and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder configured from the environment.
    ///
    /// The key is read from `HF_API_KEY`; see [`Config::from_env`] for the rest.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty()),
            config: Config::from_env(),
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Replaces the settings.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Uses `transport` instead of the default HTTP client.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Records into `counter` instead of a counter of the client's own.
    ///
    /// Clients built with the same counter share their request count.
    /// The configured window length is ignored in that case.
    #[must_use]
    pub fn counter(mut self, counter: Arc<RequestCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// This function will return an error if no API key was set, or if the
    /// key or user agent cannot be sent as headers.
    pub fn build(self) -> Result<Client> {
        let api_key = self.api_key.ok_or(Error::MissingApiKey(API_KEY_VAR))?;
        let template =
            RequestTemplate::new(&self.config.base_url, &self.config.user_agent, &api_key)?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()),
        };
        let counter = match self.counter {
            Some(counter) => counter,
            None => {
                let clock = Arc::new(SystemClock);
                Arc::new(RequestCounter::with_clock(self.config.window_ms, clock))
            }
        };

        Ok(Client {
            transport,
            template: RwLock::new(template),
            counter,
        })
    }
}

impl Debug for Builder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("counter", &self.counter)
            .finish()
    }
}
