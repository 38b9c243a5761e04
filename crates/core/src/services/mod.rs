//! Business logic services.

pub mod food_group;
pub mod product;
pub mod user;

pub use food_group::{CreateFoodGroupInput, FoodGroupService, UpdateFoodGroupInput};
pub use product::{
    CreateProductInput, DiscountInput, LikeOutcome, PROTECTED_FIELDS, ProductListParams,
    ProductListing, ProductService, ProductWithCategory, UpdateProductInput,
};
pub use user::UserService;
