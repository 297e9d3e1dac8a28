use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};

use crate::{
    dto::oauth_dto::CallbackResponse,
    error::{Error, Result},
    services::oauth_service::OAuthProvider,
    AppState,
};

const CALLBACK_NOTE: &str =
    "This is a placeholder - implement actual OAuth token exchange here";

/// Origin the client used to reach us. `X-Forwarded-*` headers are only
/// believed when the deployment says a proxy sets them; otherwise any client
/// could pick the `redirect_uri` origin.
fn request_origin(headers: &HeaderMap, trust_forwarded: bool) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let forwarded = |name: &str| if trust_forwarded { header_str(name) } else { None };

    let scheme = forwarded("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
    let host = forwarded("x-forwarded-host")
        .or_else(|| header_str(header::HOST.as_str()))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}", scheme, host)
}

/// First value of `key` in a raw query string. Repeated keys are not an
/// error; later values are ignored.
fn first_query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[utoipa::path(
    get,
    path = "/auth/login/{provider}",
    params(
        ("provider" = String, Path, description = "OAuth provider: google or github")
    ),
    responses(
        (status = 302, description = "Redirect to the provider's authorize page"),
        (status = 400, description = "Provider not supported")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let provider: OAuthProvider = provider.parse()?;
    let origin = request_origin(&headers, state.oauth_service.trusts_forwarded_headers());
    let url = state.oauth_service.authorize_url(provider, &origin)?;

    tracing::info!(provider = provider.as_str(), "redirecting to OAuth provider");
    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]))
}

#[utoipa::path(
    get,
    path = "/auth/callback/{provider}",
    params(
        ("provider" = String, Path, description = "OAuth provider"),
        crate::dto::oauth_dto::CallbackQuery
    ),
    responses(
        (status = 200, description = "Authorization code received", body = CallbackResponse),
        (status = 400, description = "Authorization code not provided")
    )
)]
#[axum::debug_handler]
pub async fn callback(
    Path(provider): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let code = first_query_value(query.as_deref(), "code")
        .filter(|code| !code.is_empty())
        .ok_or_else(|| Error::BadRequest("Authorization code not provided".to_string()))?;

    // TODO: exchange `code` for a token and link or create the user by
    // (provider, provider_id) via UserService::find_by_provider.
    Ok(Json(CallbackResponse {
        message: format!("OAuth callback for {}", provider),
        code,
        note: CALLBACK_NOTE.to_string(),
    }))
}
