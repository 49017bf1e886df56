//! Fixed bento categories shared by the recipe and main-dish documents.

use crate::error::ApiError;
use crate::generation::CategoryContext;

/// Key, display name and description of each bento category, in document order.
pub const BENTO_CATEGORIES: [(&str, &str, &str); 4] = [
    ("omakase", "おまかせ", "バランス重視の万能お弁当"),
    ("hearty", "がっつり", "ボリューム満点・満足感たっぷり"),
    ("fishMain", "お魚弁当", "魚をメインにした和風弁当"),
    ("simple", "簡単弁当", "時短・簡単に作れるお弁当"),
];

pub const SIDE_DISHES_KEY: &str = "sideDishes";

pub fn bento_categories() -> Vec<CategoryContext> {
    BENTO_CATEGORIES
        .iter()
        .map(|(key, name, description)| CategoryContext::new(key, name, description))
        .collect()
}

pub fn bento_category_keys() -> Vec<String> {
    BENTO_CATEGORIES
        .iter()
        .map(|(key, _, _)| key.to_string())
        .collect()
}

pub fn bento_category(key: &str) -> Result<CategoryContext, ApiError> {
    bento_categories()
        .into_iter()
        .find(|c| c.key == key)
        .ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "Unknown category \"{}\" (expected one of: {})",
                key,
                bento_category_keys().join(", ")
            ))
        })
}

/// The single pseudo-category of the side-dish document.
pub fn side_dish_category() -> CategoryContext {
    CategoryContext::new(SIDE_DISHES_KEY, "副菜", "お弁当の副菜")
}
