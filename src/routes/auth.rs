use crate::{
    auth::{verify_password, LoginRequest, RegisterRequest, TokenResponse, TokenService},
    error::AppError,
    models::PublicUser,
    repo,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user.
///
/// Responds with the public projection of the created account; the
/// password digest never leaves the store.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user =
        repo::users::create_user(&pool, &register_data.username, &register_data.password).await?;

    log::info!("Registered user {}", user.username);

    Ok(HttpResponse::Created().json(PublicUser::from(user)))
}

/// Login with username and password.
///
/// Returns a bearer token on success. An unknown username and a wrong
/// password produce the same rejection.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = repo::users::find_by_username(&pool, &login_data.username).await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = tokens.issue(&user.username)?;
                Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
