//! reqwest-backed [`Site`] with a persistent cookie store, plus the sign-in
//! exchange that authenticates it.

use chrono::NaiveDateTime;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, info, warn};

use super::{Endpoints, Page, Site};
use crate::config::SiteConfig;
use crate::error::{FetchError, LoginError};
use crate::markup;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The signed-in account, read from the post-login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Option<String>,
    pub created: NaiveDateTime,
}

/// Postcondition of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub endpoints: Endpoints,
    pub account: Account,
}

pub struct HttpSite {
    client: Client,
    sign_in_url: String,
}

impl HttpSite {
    pub fn new(config: &SiteConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Transport {
                url: config.sign_in_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            sign_in_url: config.sign_in_url.clone(),
        })
    }

    /// Sign in through the site's form and capture the account metadata.
    ///
    /// The origin of the page reached after signing in is used for every later
    /// request, since the sign-in host redirects to the team's own domain.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, LoginError> {
        info!("grabbing XSRF token");
        let sign_in = self.get(&self.sign_in_url).await?;
        let xsrf = markup::xsrf_token(&sign_in.body)?;

        info!(user = %credentials.username, "logging in");
        let fields = [
            ("xsrf_token".to_string(), xsrf),
            ("email".to_string(), credentials.username.clone()),
            ("password".to_string(), credentials.password.clone()),
            ("stay_signed_in".to_string(), "1".to_string()),
            ("signin".to_string(), "log in".to_string()),
        ];
        let welcome = self.post_form(&self.sign_in_url, &fields).await?;
        markup::check_welcome_header(&welcome.body)?;

        let meta = markup::profile_metadata(&welcome.body)?;
        if meta.uid.is_none() {
            warn!("can't find uid, there might be something wrong");
        }
        let account = Account {
            id: meta.uid,
            created: meta.created,
        };
        let endpoints = Endpoints::from_url(&welcome.url);
        info!(
            id = account.id.as_deref().unwrap_or("?"),
            created = %account.created,
            origin = endpoints.origin(),
            "signed in"
        );

        Ok(Session { endpoints, account })
    }

    fn parse_url(url: &str) -> Result<Url, FetchError> {
        Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Server errors and throttling fail the fetch. Any other status still
    /// yields a page: a missing history day or an already deleted entry reads
    /// as a document with nothing on it.
    async fn into_page(url: &str, response: Response) -> Result<Page, FetchError> {
        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "non-success status, reading body anyway");
        }
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(Page {
            url: final_url,
            body,
        })
    }
}

impl Site for HttpSite {
    async fn get(&self, url: &str) -> Result<Page, FetchError> {
        let target = Self::parse_url(url)?;
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Self::into_page(url, response).await
    }

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page, FetchError> {
        let target = Self::parse_url(url)?;
        let response = self
            .client
            .post(target)
            .form(fields)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Self::into_page(url, response).await
    }
}
