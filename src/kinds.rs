//! Content kinds: prompt construction and item shape for each preset document.

pub mod main_dishes;
pub mod recipes;
pub mod side_dishes;
pub mod simple_main_dishes;

pub use main_dishes::MainDishKind;
pub use recipes::RecipeKind;
pub use side_dishes::SideDishKind;
pub use simple_main_dishes::SimpleMainDishKind;

use crate::generation::Distribution;

/// Ingredients that do not survive a morning in a lunch box.
const UNSUITABLE_FOR_BENTO: &str = "\
   - 大根おろし（水分が多すぎる）
   - 生野菜サラダ（しおれる）
   - 豆腐（水分が出る）
   - 刺身・生魚（食中毒リスク）
   - マヨネーズベースのサラダ（傷みやすい）";

/// Rules every bento prompt carries.
pub(crate) fn bento_rules(first: &str, count: usize, noun: &str) -> String {
    format!(
        "重要な要件:
1. {count}個すべて異なる{noun}にすること
2. {first}
3. 冷めても美味しい料理を選ぶこと
4. お弁当箱に詰めやすい料理を選ぶこと
5. **お弁当に不向きな食材は絶対に使わないこと**:
{UNSUITABLE_FOR_BENTO}
6. 汁気の多い料理は避け、お弁当に適した調理法を選ぶこと"
    )
}

/// "Avoid these names" block; empty when nothing was generated yet.
pub(crate) fn exclusion_section(noun: &str, names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let list = names
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n重要: 以下の{}名とは異なるものにしてください:\n{}", noun, list)
}

/// Current per-label tally, so the model can even out the distribution.
pub(crate) fn distribution_section(distribution: Option<&Distribution>) -> String {
    match distribution {
        Some(dist) => {
            let lines = dist
                .iter()
                .map(|(label, count)| format!("- {}: {}個", label, count))
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n調理方法のバランス（現在の生成数）:\n{}", lines)
        }
        None => String::new(),
    }
}
