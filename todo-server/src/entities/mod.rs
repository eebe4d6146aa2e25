//! SeaORM entities backing the todo and health tables.

pub mod prelude;

pub mod health;
pub mod todo;
