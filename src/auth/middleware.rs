use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Bearer-token gate for the `/api` scope.
///
/// Constructed with the signing secret at startup; requests carrying a valid
/// `Authorization: Bearer <token>` header get their verified [`Claims`]
/// inserted into request extensions for the duration of that request. Both
/// rejection branches (missing/malformed header, failed verification) respond
/// 401 before any downstream handler runs.
///
/// [`Claims`]: crate::auth::token::Claims
pub struct AuthMiddleware {
    secret: String,
}

impl AuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: String,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Registration and login are the token-issuing endpoints; they are
        // the only unauthenticated paths under /api.
        let path = req.path();
        if path.starts_with("/api/user/registerUser") || path.starts_with("/api/user/loginUser") {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match verify_token(token, &self.secret) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            None => {
                let app_err =
                    AppError::Unauthorized("Authorization token missing or not valid".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::generate_token;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    const SECRET: &str = "middleware_test_secret";

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    macro_rules! gated_app {
        () => {
            test::init_service(
                App::new().service(
                    web::scope("/api")
                        .wrap(AuthMiddleware::new(SECRET))
                        .route("/tasks", web::get().to(protected))
                        .route("/user/loginUser", web::post().to(protected)),
                ),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_missing_header_is_rejected() {
        let app = gated_app!();

        let req = test::TestRequest::get().uri("/api/tasks").to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("request without a token must not reach the handler");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_wrong_scheme_is_rejected() {
        let app = gated_app!();

        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("non-Bearer scheme must be rejected");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_invalid_token_is_rejected() {
        let app = gated_app!();

        let forged = generate_token(1, "a@x.com", "a_different_secret").unwrap();
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header(("Authorization", format!("Bearer {}", forged)))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("forged token must be rejected");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_valid_token_passes_through() {
        let app = gated_app!();

        let token = generate_token(1, "a@x.com", SECRET).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_login_path_bypasses_the_gate() {
        let app = gated_app!();

        let req = test::TestRequest::post()
            .uri("/api/user/loginUser")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
