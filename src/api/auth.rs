use std::sync::Arc;

use poem_openapi::auth::Bearer;
use poem_openapi::{ApiResponse, OpenApi, SecurityScheme, Tags, payload::Json};

use crate::errors::AuthError;
use crate::services::AuthLedgerService;
use crate::types::dto::auth::{
    LoginRequest, MeResponse, RegisterRequest, RegisterResponse, TokenResponse,
};
use crate::types::internal::Profile;

/// Session token in the `Authorization: Bearer` header
#[derive(SecurityScheme)]
#[oai(ty = "bearer", key_name = "Authorization", key_in = "header", bearer_format = "JWT")]
pub struct BearerAuth(pub Bearer);

#[derive(Tags)]
enum AuthTags {
    /// Registration and session endpoints
    Authentication,
}

#[derive(ApiResponse, Debug)]
pub enum RegisterResult {
    /// Account created
    #[oai(status = 201)]
    Created(Json<RegisterResponse>),
}

/// Registration, login and identity endpoints
pub struct AuthApi {
    service: Arc<AuthLedgerService>,
}

impl AuthApi {
    pub fn new(service: Arc<AuthLedgerService>) -> Self {
        Self { service }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account with a zero balance
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<RegisterResult, AuthError> {
        let Json(request) = body;
        let profile = Profile {
            first_name: request.firstname,
            last_name: request.lastname,
            phone: request.phone,
            birthday: request.birthday,
        };

        self.service
            .register(&request.email, &request.password, profile)
            .await?;

        Ok(RegisterResult::Created(Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        })))
    }

    /// Exchange email and password for a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let token = self.service.login(&body.email, &body.password).await?;

        Ok(Json(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.service.token_service().lifetime_seconds(),
        }))
    }

    /// Profile and balance of the token holder
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<MeResponse>, AuthError> {
        let account = self.service.identity(&auth.0.token).await?;

        Ok(Json(MeResponse::from(account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_ledger_service;

    async fn setup_api() -> AuthApi {
        let (_db, _store, service) = setup_test_ledger_service().await;
        AuthApi::new(Arc::new(service))
    }

    fn register_request(email: &str, password: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            phone: String::new(),
            birthday: String::new(),
        })
    }

    fn login_request(email: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_register_login_me() {
        let api = setup_api().await;

        let RegisterResult::Created(created) =
            api.register(register_request("a@x.com", "pw")).await.unwrap();
        assert_eq!(created.message, "User registered successfully");

        let token = api.login(login_request("a@x.com", "pw")).await.unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 60 * 60);

        let me = api
            .me(BearerAuth(Bearer {
                token: token.0.token,
            }))
            .await
            .unwrap();
        assert_eq!(me.email, "a@x.com");
        assert_eq!(me.firstname, "Ada");
        assert_eq!(me.points, 0);
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let api = setup_api().await;
        api.register(register_request("a@x.com", "pw")).await.unwrap();

        let err = api.register(register_request("a@x.com", "pw")).await.unwrap_err();

        assert!(matches!(err, AuthError::UserExists(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let api = setup_api().await;
        api.register(register_request("a@x.com", "pw")).await.unwrap();

        let err = api.login(login_request("a@x.com", "wrongpw")).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_me_with_garbage_token_is_unauthorized() {
        let api = setup_api().await;

        let err = api
            .me(BearerAuth(Bearer {
                token: "not-a-jwt".to_string(),
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }
}
