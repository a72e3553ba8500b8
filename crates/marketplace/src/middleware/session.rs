use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::{CookieJar, PrivateCookieJar};
use shared::{domain::RequestContext, errors::HttpError, session::SessionId};
use tracing::warn;

/// Encrypted cookie holding the signed-in user id.
pub const USER_COOKIE: &str = "MarketPlace";
/// Plain cookie holding the id issued by the session manager.
pub const SESSION_COOKIE: &str = "session_id";

const REQUEST_ID_HEADER: &str = "x-request-id";

fn unauthorized() -> HttpError {
    HttpError::Unauthorized("not authenticated".into())
}

pub async fn session_middleware(
    State(state): State<AppState>,
    private_jar: PrivateCookieJar,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let user_id = private_jar
        .get(USER_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i32>().ok())
        .ok_or_else(|| {
            warn!("⚠️ Request to {} without a user cookie", req.uri().path());
            unauthorized()
        })?;

    let user = state
        .di_container
        .auth_service
        .authenticate(user_id)
        .await?;

    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| SessionId(cookie.value().to_string()))
        .ok_or_else(|| {
            warn!("⚠️ User {user_id} has no session cookie");
            unauthorized()
        })?;

    let session = state.session_manager.check(&session_id).await?;

    if session.user_id != user.id {
        warn!(
            "⚠️ Session {session_id} belongs to user {}, not {}",
            session.user_id, user.id
        );
        return Err(unauthorized());
    }

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    req.extensions_mut().insert(RequestContext {
        user,
        session_id: session_id.0,
        request_id,
    });

    Ok(next.run(req).await)
}
