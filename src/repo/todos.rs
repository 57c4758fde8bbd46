use sqlx::PgPool;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::{Todo, TodoItem};

/// All todos owned by `user` in creation order, each populated with its
/// items in creation order. Items are fetched in one query keyed by the
/// owned todo ids, never by caller-supplied ids.
pub async fn list_todos(pool: &PgPool, user: &CurrentUser) -> Result<Vec<Todo>, AppError> {
    let mut todos = sqlx::query_as::<_, Todo>(
        "SELECT id, title, owner_id FROM todos WHERE owner_id = $1 ORDER BY id",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;

    if todos.is_empty() {
        return Ok(todos);
    }

    let todo_ids: Vec<i32> = todos.iter().map(|t| t.id).collect();
    let items = sqlx::query_as::<_, TodoItem>(
        "SELECT id, todo_id, description, done FROM todo_items
         WHERE todo_id = ANY($1) ORDER BY id",
    )
    .bind(&todo_ids)
    .fetch_all(pool)
    .await?;

    for item in items {
        if let Some(todo) = todos.iter_mut().find(|t| t.id == item.todo_id) {
            todo.items.push(item);
        }
    }

    Ok(todos)
}

/// Inserts a new todo owned by `user`, with an empty item list. Title
/// validation happens upstream in the route handler.
pub async fn create_todo(
    pool: &PgPool,
    user: &CurrentUser,
    title: &str,
) -> Result<Todo, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (title, owner_id) VALUES ($1, $2)
         RETURNING id, title, owner_id",
    )
    .bind(title)
    .bind(user.id)
    .fetch_one(pool)
    .await?;

    Ok(todo)
}

/// Deletes a todo and all its items, if and only if it is owned by `user`.
/// Returns whether a deletion occurred; absence and ownership mismatch are
/// indistinguishable to the caller.
pub async fn delete_todo(pool: &PgPool, user: &CurrentUser, todo_id: i32) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM todo_items WHERE todo_id IN
           (SELECT id FROM todos WHERE id = $1 AND owner_id = $2)",
    )
    .bind(todo_id)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
        .bind(todo_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Appends a new item with `done = false` under one of `user`'s own todos.
/// Returns `None` when the todo is absent or owned by someone else.
pub async fn add_item(
    pool: &PgPool,
    user: &CurrentUser,
    todo_id: i32,
    description: &str,
) -> Result<Option<TodoItem>, AppError> {
    let item = sqlx::query_as::<_, TodoItem>(
        "INSERT INTO todo_items (todo_id, description, done)
         SELECT id, $3, FALSE FROM todos WHERE id = $1 AND owner_id = $2
         RETURNING id, todo_id, description, done",
    )
    .bind(todo_id)
    .bind(user.id)
    .bind(description)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Flips the `done` flag of an item reachable through `user`'s ownership
/// chain. The sole mutation path for that field; a single atomic UPDATE,
/// so concurrent toggles serialize at the store.
pub async fn toggle_item(
    pool: &PgPool,
    user: &CurrentUser,
    todo_id: i32,
    item_id: i32,
) -> Result<Option<TodoItem>, AppError> {
    let item = sqlx::query_as::<_, TodoItem>(
        "UPDATE todo_items SET done = NOT done
         WHERE id = $1 AND todo_id IN
           (SELECT id FROM todos WHERE id = $2 AND owner_id = $3)
         RETURNING id, todo_id, description, done",
    )
    .bind(item_id)
    .bind(todo_id)
    .bind(user.id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Deletes a single item with the same ownership-chain discipline as
/// `toggle_item`. Returns whether a deletion occurred.
pub async fn delete_item(
    pool: &PgPool,
    user: &CurrentUser,
    todo_id: i32,
    item_id: i32,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "DELETE FROM todo_items
         WHERE id = $1 AND todo_id IN
           (SELECT id FROM todos WHERE id = $2 AND owner_id = $3)",
    )
    .bind(item_id)
    .bind(todo_id)
    .bind(user.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
