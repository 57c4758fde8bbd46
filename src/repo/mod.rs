//! Store-backed repositories.
//!
//! `users` covers credential lookup and registration; `todos` is the
//! ownership-scoped CRUD engine. Every todo operation takes the
//! authenticated user and re-derives the owned set with an
//! `owner_id = $n` predicate, so an id belonging to another user behaves
//! exactly like an id that does not exist.

pub mod todos;
pub mod users;
