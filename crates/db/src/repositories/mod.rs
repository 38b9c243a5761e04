//! Database repositories.

mod category;
mod food_group;
mod product;
mod user;

pub use category::CategoryRepository;
pub use food_group::{FoodGroupFilter, FoodGroupRepository};
pub use product::{LikeAction, ProductQuery, ProductRepository, ProductSort};
pub use user::UserRepository;
