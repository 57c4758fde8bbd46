use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{ItemInput, TodoInput},
    repo,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Lists the authenticated user's todos, each with its items in creation
/// order. Never includes another user's todos.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects with nested items.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let todos = repo::todos::list_todos(&pool, &user).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a new todo list owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: non-empty, at most 200 characters.
///
/// ## Responses:
/// - `201 Created`: the new `Todo` with an empty item list.
/// - `422 Unprocessable Entity`: empty or overlong title.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = repo::todos::create_todo(&pool, &user, &todo_data.title).await?;
    Ok(HttpResponse::Created().json(todo))
}

/// Deletes a todo and all its items.
///
/// ## Responses:
/// - `200 OK`: `{"success": bool}`; `false` when the todo does not exist
///   or belongs to another user, and the two cases are not distinguished.
#[delete("/{todo_id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let todo_id = path.into_inner();
    let deleted = repo::todos::delete_todo(&pool, &user, todo_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": deleted })))
}

/// Adds an item under one of the authenticated user's todos.
///
/// ## Responses:
/// - `201 Created`: the new `TodoItem` with `done = false`.
/// - `404 Not Found`: the todo is absent or not owned by the user.
/// - `422 Unprocessable Entity`: overlong description.
#[post("/{todo_id}/items")]
pub async fn add_item(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<i32>,
    item_data: web::Json<ItemInput>,
) -> Result<impl Responder, AppError> {
    item_data.validate()?;

    let todo_id = path.into_inner();
    match repo::todos::add_item(&pool, &user, todo_id, &item_data.description).await? {
        Some(item) => Ok(HttpResponse::Created().json(item)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Flips an item's `done` flag. The only state transition in the system;
/// applying it twice restores the original value.
///
/// ## Responses:
/// - `200 OK`: the updated `TodoItem`.
/// - `404 Not Found`: todo or item absent, or not owned by the user.
#[post("/{todo_id}/items/{item_id}/toggle")]
pub async fn toggle_item(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (todo_id, item_id) = path.into_inner();
    match repo::todos::toggle_item(&pool, &user, todo_id, item_id).await? {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Err(AppError::NotFound("Item not found".into())),
    }
}

/// Deletes a single item.
///
/// ## Responses:
/// - `200 OK`: `{"success": bool}`, same ownership discipline as
///   `delete_todo`.
#[delete("/{todo_id}/items/{item_id}")]
pub async fn delete_item(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (todo_id, item_id) = path.into_inner();
    let deleted = repo::todos::delete_item(&pool, &user, todo_id, item_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": deleted })))
}
