use crate::{
    middleware::{JsonBody, SESSION_COOKIE, USER_COOKIE, session_middleware},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, PrivateCookieJar, SameSite};
use shared::{
    abstract_trait::DynAuthService,
    domain::{
        RequestContext,
        requests::{RegisterRequest, SignInRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::HttpError,
    session::{SESSION_TTL, Session, SessionId},
};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

fn long_lived_cookie(name: &'static str, value: String) -> Result<Cookie<'static>, HttpError> {
    let max_age = SESSION_TTL
        .to_std()
        .ok()
        .and_then(|ttl| ttl.try_into().ok())
        .ok_or_else(|| HttpError::Internal("invalid session lifetime".into()))?;

    Ok(Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build())
}

#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Auth"
)]
pub async fn register_handler(
    Extension(service): Extension<DynAuthService>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in, session cookies set", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "Auth"
)]
pub async fn sign_in_handler(
    State(state): State<AppState>,
    Extension(service): Extension<DynAuthService>,
    private_jar: PrivateCookieJar,
    jar: CookieJar,
    JsonBody(body): JsonBody<SignInRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user = service.sign_in(&body).await?;

    let session_id = state
        .session_manager
        .create(&Session { user_id: user.id })
        .await?;

    info!("🔑 User {} signed in", user.id);

    let private_jar = private_jar.add(long_lived_cookie(USER_COOKIE, user.id.to_string())?);
    let jar = jar.add(long_lived_cookie(SESSION_COOKIE, session_id.0)?);

    Ok((
        StatusCode::OK,
        private_jar,
        jar,
        Json(ApiResponse::success("Signed in successfully", user)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/whoami",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth"
)]
pub async fn whoami_handler(
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, HttpError> {
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Authenticated user", ctx.user)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/signout",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Signed out, session cookies cleared"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth"
)]
pub async fn sign_out_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    private_jar: PrivateCookieJar,
    jar: CookieJar,
) -> Result<impl IntoResponse, HttpError> {
    state
        .session_manager
        .delete(&SessionId(ctx.session_id.clone()))
        .await?;

    info!("👋 User {} signed out", ctx.user_id());

    let private_jar = private_jar.remove(Cookie::build(USER_COOKIE).path("/"));
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((
        StatusCode::OK,
        private_jar,
        jar,
        Json(ApiResponse::success("Signed out successfully", ())),
    ))
}

pub fn auth_routes(app_state: AppState) -> OpenApiRouter<AppState> {
    let public_routes = OpenApiRouter::new()
        .route("/api/v1/register", post(register_handler))
        .route("/api/v1/signin", post(sign_in_handler));

    let private_routes = OpenApiRouter::new()
        .route("/api/v1/private/whoami", get(whoami_handler))
        .route("/api/v1/private/signout", get(sign_out_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session_middleware,
        ));

    public_routes
        .merge(private_routes)
        .layer(Extension(app_state.di_container.auth_service.clone()))
}
