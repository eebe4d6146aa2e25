pub use super::health::Entity as Health;
pub use super::todo::Entity as Todo;
