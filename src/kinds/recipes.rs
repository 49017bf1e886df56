use super::{bento_rules, exclusion_section};
use crate::catalog::GeneratedRecord;
use crate::generation::{ContentKind, GenerationRequest};

/// Full bento recipes: main dish, two side dishes and tips.
#[derive(Debug, Clone, Default)]
pub struct RecipeKind;

impl ContentKind for RecipeKind {
    type Item = GeneratedRecord;

    fn kind_name(&self) -> &'static str {
        "recipes"
    }

    fn items_key(&self) -> &'static str {
        "recipes"
    }

    fn system_prompt(&self) -> String {
        "あなたはお弁当レシピの専門家です。JSON形式でレシピを生成します。".to_string()
    }

    fn user_prompt(&self, request: &GenerationRequest) -> String {
        let count = request.desired_count;
        format!(
            r#"
あなたはお弁当レシピの専門家です。以下の条件で{count}個の異なるお弁当レシピを生成してください。
{exclusion}

カテゴリ: {name}
説明: {description}

各レシピには以下を含めてください:
- お弁当の名前（魅力的で具体的なもの）
- 簡潔な説明（1文）
- メインディッシュ（名前、材料リスト、調理手順）
- 副菜1（名前、材料リスト、調理手順）
- 副菜2（名前、材料リスト、調理手順）
- 調理時間（分）
- カロリー（kcal）
- 難易度（簡単/普通/上級）
- 調理のコツ（2-3個）

{rules}
7. 栄養バランスを考慮すること

以下のJSON形式で出力してください（他のテキストは一切含めないでください）:

{{
  "recipes": [
    {{
      "name": "お弁当の名前",
      "description": "簡潔な説明",
      "mainDish": {{"name": "メインディッシュ名", "ingredients": ["材料1", "材料2"], "instructions": ["手順1", "手順2"]}},
      "sideDish1": {{"name": "副菜1の名前", "ingredients": ["材料1"], "instructions": ["手順1"]}},
      "sideDish2": {{"name": "副菜2の名前", "ingredients": ["材料1"], "instructions": ["手順1"]}},
      "prepTime": 30,
      "calories": 550,
      "difficulty": "簡単",
      "tips": ["コツ1", "コツ2"]
    }}
  ]
}}
"#,
            exclusion = exclusion_section("レシピ", &request.exclusion),
            name = request.category.name,
            description = request.category.description,
            rules = bento_rules("季節の食材を取り入れること", count, "献立"),
        )
    }
}
