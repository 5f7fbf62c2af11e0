//! Request descriptors for the upstream endpoints.
//!
//! A [`RequestTemplate`] holds what every request shares (base URL and
//! headers). [`RequestTemplate::describe`] combines it with an
//! [`Endpoint`] into a fresh [`Request`] without touching the template.

use std::fmt::{self, Display, Formatter};

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT},
    Method,
};

use crate::result::Result;

/// A resource exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The bare API root. Used to check whether a key is accepted.
    Root,
    /// A single user.
    User(u64),
    /// Several users in one request.
    Users(Vec<u64>),
    /// A forum category and its forums.
    Category(u64),
    /// A forum and its threads.
    Forum(u64),
    /// A page of a thread's posts.
    Thread {
        /// Thread ID.
        id: u64,
        /// Page of posts to fetch.
        page: u32,
        /// Fetch post content as raw `MyCode` instead of HTML.
        raw: bool,
    },
    /// A single post.
    Post {
        /// Post ID.
        id: u64,
        /// Fetch content as raw `MyCode` instead of HTML.
        raw: bool,
    },
    /// A private message. Reading it marks it as read.
    PrivateMessage(u64),
    /// The messages inside a private message box.
    PrivateMessageBox(u64),
    /// A user group.
    Group(u64),
}

impl Endpoint {
    /// Returns the path (and query string, if any) relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Root => String::new(),
            Endpoint::User(id) => format!("/user/{id}"),
            Endpoint::Users(ids) => {
                let ids: Vec<_> = ids.iter().map(ToString::to_string).collect();
                format!("/users/{}", ids.join(","))
            }
            Endpoint::Category(id) => format!("/category/{id}"),
            Endpoint::Forum(id) => format!("/forum/{id}"),
            Endpoint::Thread { id, page, raw } => {
                let raw = if *raw { "&raw" } else { "" };
                format!("/thread/{id}?page={page}{raw}")
            }
            Endpoint::Post { id, raw } => {
                let raw = if *raw { "?raw" } else { "" };
                format!("/post/{id}{raw}")
            }
            Endpoint::PrivateMessage(id) => format!("/pm/{id}"),
            Endpoint::PrivateMessageBox(id) => format!("/pmbox/{id}"),
            Endpoint::Group(id) => format!("/group/{id}"),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Root => write!(f, "/"),
            other => write!(f, "{}", other.path()),
        }
    }
}

/// A fully built outbound request.
///
/// Descriptors are values: once built they do not observe later changes
/// to the client (such as a new API key).
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method. Every endpoint is read with `GET`.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers to send, including authorization.
    pub headers: HeaderMap,
}

/// Shared settings every request starts from.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    base_url: String,
    headers: HeaderMap,
}

impl RequestTemplate {
    /// Creates a template for `base_url` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent cannot be used as a header value.
    pub fn new(base_url: &str, user_agent: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(AUTHORIZATION, authorization(api_key)?);
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers shared by every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a copy of this template authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived header is not a valid header value.
    pub fn with_api_key(&self, api_key: &str) -> Result<Self> {
        let mut headers = self.headers.clone();
        headers.insert(AUTHORIZATION, authorization(api_key)?);
        Ok(Self {
            base_url: self.base_url.clone(),
            headers,
        })
    }

    /// Builds the request for `endpoint`.
    pub fn describe(&self, endpoint: &Endpoint) -> Request {
        Request {
            method: Method::GET,
            url: format!("{}{}", self.base_url, endpoint.path()),
            headers: self.headers.clone(),
        }
    }
}

/// Derives the `Basic` authorization header for an API key.
///
/// The key is sent as the user name with an empty password.
///
/// # Errors
///
/// Returns an error if the encoded value is not a valid header value.
pub fn authorization(api_key: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{api_key}:"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
    value.set_sensitive(true);
    Ok(value)
}
