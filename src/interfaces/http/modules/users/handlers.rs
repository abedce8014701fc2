//! Account API handlers
//!
//! One resource path, `/api/users`, with one entry point that dispatches on
//! the HTTP method. Each operation parses its own body, so GET needs none.
//! Every operation failure is converted to a 400 exactly once, in
//! [`users_endpoint`].

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::dto::{AccountDto, CreateUserRequest, DeleteUserRequest, UpdatePasswordRequest};
use crate::application::accounts::{AccountService, NewAccountRequest};
use crate::interfaces::http::common::{parse_validated, ApiError, ErrorBody};

/// Methods `/api/users` answers, as sent in the `Allow` header.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

/// Account handler state
#[derive(Clone)]
pub struct UsersState {
    pub accounts: AccountService,
}

/// Single entry point for `/api/users`.
pub async fn users_endpoint(
    State(state): State<UsersState>,
    method: Method,
    body: Bytes,
) -> Response {
    debug!(%method, body_len = body.len(), "Dispatching account request");

    let result = match method {
        Method::GET => list_users(&state.accounts).await.map(IntoResponse::into_response),
        Method::POST => create_user(&state.accounts, &body)
            .await
            .map(IntoResponse::into_response),
        Method::DELETE => delete_user(&state.accounts, &body)
            .await
            .map(IntoResponse::into_response),
        Method::PUT => update_password(&state.accounts, &body)
            .await
            .map(IntoResponse::into_response),
        other => return method_not_allowed(&other),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

fn method_not_allowed(method: &Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        format!("Method {} Not Allowed", method),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountDto>),
        (status = 400, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_users(accounts: &AccountService) -> Result<Json<Vec<AccountDto>>, ApiError> {
    let items = accounts.list_accounts().await?;
    Ok(Json(items.into_iter().map(AccountDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account and role profile created", body = AccountDto),
        (status = 400, description = "Invalid body, duplicate email or storage failure", body = ErrorBody)
    )
)]
pub async fn create_user(
    accounts: &AccountService,
    body: &[u8],
) -> Result<(StatusCode, Json<AccountDto>), ApiError> {
    let request: CreateUserRequest = parse_validated(body)?;
    let role = request.role();

    let account = accounts
        .create_account(
            NewAccountRequest {
                username: request.username,
                email: request.email,
                password: request.password,
            },
            role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AccountDto::from(account))))
}

#[utoipa::path(
    delete,
    path = "/api/users",
    tag = "Users",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "Deleted account", body = AccountDto),
        (status = 400, description = "Invalid body, unknown email or storage failure", body = ErrorBody)
    )
)]
pub async fn delete_user(accounts: &AccountService, body: &[u8]) -> Result<Json<AccountDto>, ApiError> {
    let request: DeleteUserRequest = parse_validated(body)?;
    let account = accounts.delete_account(&request.email).await?;
    Ok(Json(AccountDto::from(account)))
}

#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Account with the new password stored", body = AccountDto),
        (status = 400, description = "Invalid body, unknown email or storage failure", body = ErrorBody)
    )
)]
pub async fn update_password(
    accounts: &AccountService,
    body: &[u8],
) -> Result<Json<AccountDto>, ApiError> {
    let request: UpdatePasswordRequest = parse_validated(body)?;
    let account = accounts
        .update_password(&request.email, &request.password)
        .await?;
    Ok(Json(AccountDto::from(account)))
}
