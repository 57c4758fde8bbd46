use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating a todo list.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// The title of the list. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Input structure for adding an item under a todo list.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ItemInput {
    /// Description of the task. May be empty; capped at 1000 characters.
    #[validate(length(max = 1000))]
    pub description: String,
}

/// A named todo list owned by exactly one user. `items` is populated from
/// the `todo_items` relation, in creation order.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    /// Identifier of the owning user, set once at creation.
    pub owner_id: i32,
    /// Not selected by todo queries; filled in by the repository.
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

/// A single task under a todo list. `done` starts false and is only ever
/// flipped by the toggle operation.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub id: i32,
    pub todo_id: i32,
    pub description: String,
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_input_validation() {
        let valid_input = TodoInput {
            title: "groceries".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TodoInput {
            title: "".to_string(),
        };
        assert!(
            empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let long_title = TodoInput {
            title: "a".repeat(201),
        };
        assert!(
            long_title.validate().is_err(),
            "Validation should fail for overly long title."
        );
    }

    #[test]
    fn test_item_input_validation() {
        // Item descriptions may be empty.
        let empty_description = ItemInput {
            description: "".to_string(),
        };
        assert!(empty_description.validate().is_ok());

        let valid = ItemInput {
            description: "milk".to_string(),
        };
        assert!(valid.validate().is_ok());

        let long_description = ItemInput {
            description: "b".repeat(1001),
        };
        assert!(
            long_description.validate().is_err(),
            "Validation should fail for overly long description."
        );
    }

    #[test]
    fn test_todo_serializes_with_nested_items() {
        let todo = Todo {
            id: 1,
            title: "groceries".to_string(),
            owner_id: 42,
            items: vec![TodoItem {
                id: 1,
                todo_id: 1,
                description: "milk".to_string(),
                done: false,
            }],
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["items"][0]["description"], "milk");
        assert_eq!(json["items"][0]["done"], false);
    }
}
