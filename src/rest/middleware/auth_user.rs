use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};

use crate::{
    consts,
    rest::{AppState, errors::ApiError},
};

/// Id of the user behind a valid bearer token
pub struct AuthUser(pub i64);

/// Id of an authenticated user flagged as admin
pub struct AdminUser(pub i64);

fn get_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(consts::BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Extracts the user id from the `Authorization: Bearer <token>` header
fn get_auth_user_id(req: &HttpRequest) -> Result<i64, ApiError> {
    let Some(token) = get_bearer_token(req) else {
        return Err(ApiError::Unauthorized("No token provided".into()));
    };

    let Some(app_state) = req.app_state::<AppState>() else {
        return Err(ApiError::InternalServerError(
            "app state is not registered".into(),
        ));
    };

    app_state
        .token_signer
        .verify(token)
        .map(|claims| claims.sub)
        .map_err(|e| {
            tracing::warn!("rejected bearer token: {}", e);
            ApiError::Unauthorized("Invalid token".into())
        })
}

impl<Err> FromRequest<Err> for AuthUser {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        futures::future::ready(get_auth_user_id(req).map(AuthUser).map_err(Error::from))
    }
}

impl<Err> FromRequest<Err> for AdminUser {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let user_id = get_auth_user_id(req);
        let repo = req.app_state::<AppState>().map(|state| state.repo.clone());

        async move {
            let (user_id, Some(repo)) = (user_id?, repo) else {
                return Err(ApiError::InternalServerError("app state is not registered".into()).into());
            };

            match repo.get_user_app_by_id(user_id).await.map_err(ApiError::from)? {
                Some(user) if user.is_admin => Ok(AdminUser(user.id)),
                Some(_) => Err(ApiError::Forbidden("Access denied. Admin only.".into()).into()),
                None => Err(ApiError::NotFound("User not found".into()).into()),
            }
        }
    }
}
