//! Catalog: the culinary records the pipeline produces and the categories it targets.

pub mod categories;
pub mod records;

pub use categories::{bento_categories, bento_category, bento_category_keys, side_dish_category, SIDE_DISHES_KEY};
pub use records::{CookingMethod, GeneratedRecord};
