//! Database entities.

pub mod category;
pub mod food_group;
pub mod product;
pub mod user;

pub use category::Entity as Category;
pub use food_group::Entity as FoodGroup;
pub use product::Entity as Product;
pub use user::Entity as User;
