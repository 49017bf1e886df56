use super::{bento_rules, exclusion_section};
use crate::catalog::GeneratedRecord;
use crate::generation::{ContentKind, GenerationRequest};

/// Main dishes for any bento category.
#[derive(Debug, Clone, Default)]
pub struct MainDishKind;

pub(crate) const MAIN_DISH_JSON_SHAPE: &str = r#"{
  "mainDishes": [
    {
      "name": "メインディッシュ名",
      "description": "簡潔な説明",
      "dish": {
        "name": "料理名（メインディッシュ名と同じ）",
        "ingredients": ["材料1", "材料2"],
        "instructions": ["手順1", "手順2"]
      },
      "prepTime": 15,
      "calories": 300,
      "difficulty": "簡単",
      "season": "秋"
    }
  ]
}"#;

impl ContentKind for MainDishKind {
    type Item = GeneratedRecord;

    fn kind_name(&self) -> &'static str {
        "main-dishes"
    }

    fn items_key(&self) -> &'static str {
        "mainDishes"
    }

    fn system_prompt(&self) -> String {
        "あなたはお弁当のメインディッシュ専門家です。JSON形式でメインディッシュを生成します。"
            .to_string()
    }

    fn user_prompt(&self, request: &GenerationRequest) -> String {
        let count = request.desired_count;
        format!(
            r#"
あなたはお弁当のメインディッシュ専門家です。以下の条件で{count}個の異なるメインディッシュを生成してください。
{exclusion}

カテゴリ: {name}
説明: {description}

各メインディッシュには以下を含めてください:
- メインディッシュの名前（魅力的で具体的なもの）
- 簡潔な説明（1文）
- 材料リスト（5-8個）
- 調理手順（3-5ステップ）
- 調理時間（分）- メインディッシュのみの時間
- カロリー（kcal）- メインディッシュのみ
- 難易度（簡単/普通/上級）
- 季節（春/夏/秋/冬、または季節を問わない場合はnull）

{rules}
7. メインディッシュとしてボリュームがあること

以下のJSON形式で出力してください（他のテキストは一切含めないでください）:

{shape}
"#,
            exclusion = exclusion_section("メインディッシュ", &request.exclusion),
            name = request.category.name,
            description = request.category.description,
            rules = bento_rules(
                "季節の食材を取り入れること（必要に応じて）",
                count,
                "メインディッシュ"
            ),
            shape = MAIN_DISH_JSON_SHAPE,
        )
    }
}
