use crate::config::Config;
use crate::error::{Error, Result};
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }

    fn authorize_endpoint(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            OAuthProvider::Github => "https://github.com/login/oauth/authorize",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            _ => Err(Error::BadRequest("Provider not supported".to_string())),
        }
    }
}

/// Builds authorize redirects for the supported providers. Token exchange is not
/// implemented; the callback only echoes the code back.
#[derive(Clone)]
pub struct OAuthService {
    google_client_id: String,
    github_client_id: String,
    public_base_url: Option<String>,
    trust_forwarded_headers: bool,
}

impl OAuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            google_client_id: config.google_client_id.clone(),
            github_client_id: config.github_client_id.clone(),
            public_base_url: config.public_base_url.clone(),
            trust_forwarded_headers: config.trust_forwarded_headers,
        }
    }

    pub fn trusts_forwarded_headers(&self) -> bool {
        self.trust_forwarded_headers
    }

    /// Configured public origin wins over the one derived from the request.
    pub fn resolve_origin(&self, request_origin: &str) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| request_origin.trim_end_matches('/').to_string())
    }

    pub fn redirect_uri(&self, provider: OAuthProvider, origin: &str) -> String {
        format!("{}/auth/callback/{}", origin, provider.as_str())
    }

    pub fn authorize_url(&self, provider: OAuthProvider, request_origin: &str) -> Result<Url> {
        let origin = self.resolve_origin(request_origin);
        let redirect_uri = self.redirect_uri(provider, &origin);

        let params: Vec<(&str, &str)> = match provider {
            OAuthProvider::Google => vec![
                ("client_id", self.google_client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "email profile"),
            ],
            OAuthProvider::Github => vec![
                ("client_id", self.github_client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("scope", "user:email"),
            ],
        };

        Url::parse_with_params(provider.authorize_endpoint(), params)
            .map_err(|e| Error::Internal(format!("Failed to build authorize URL: {}", e)))
    }
}
