use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;
use std::rc::Rc;

use crate::auth::extractors::CurrentUser;
use crate::auth::{bearer_credential, TokenService};
use crate::error::AppError;
use crate::repo;

/// Gate in front of every protected route.
///
/// Each request revalidates from scratch: extract the bearer credential,
/// validate the token, then resolve the subject to a live user record.
/// Nothing is cached between requests and no token is persisted.
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Health check and the auth endpoints are public.
        let path = req.path();
        if path == "/health"
            || path.starts_with("/api/auth/login")
            || path.starts_with("/api/auth/register")
        {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let credential = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(bearer_credential)
                .map(str::to_owned);

            let credential = match credential {
                Some(c) => c,
                None => {
                    return Err(
                        AppError::Unauthorized("Missing or malformed credentials".into()).into(),
                    )
                }
            };

            let tokens = req
                .app_data::<web::Data<TokenService>>()
                .cloned()
                .ok_or_else(|| {
                    Error::from(AppError::InternalServerError(
                        "Token service not configured".into(),
                    ))
                })?;
            let pool = req.app_data::<web::Data<PgPool>>().cloned().ok_or_else(|| {
                Error::from(AppError::InternalServerError(
                    "Database pool not configured".into(),
                ))
            })?;

            let subject = tokens.validate(&credential).map_err(Error::from)?;

            // The subject of an otherwise-valid token may no longer exist,
            // e.g. the user was deleted after issuance.
            let user = repo::users::find_by_username(&pool, &subject)
                .await
                .map_err(Error::from)?;

            match user {
                Some(user) => {
                    req.extensions_mut().insert(CurrentUser {
                        id: user.id,
                        username: user.username,
                    });
                    service.call(req).await
                }
                None => {
                    log::warn!("Valid token for unknown subject rejected");
                    Err(AppError::Unauthorized("Unknown token subject".into()).into())
                }
            }
        })
    }
}
