pub mod categories;
pub mod products;
pub mod ratings;

pub use categories::Entity as Categories;
pub use products::Entity as Products;
pub use ratings::Entity as Ratings;
