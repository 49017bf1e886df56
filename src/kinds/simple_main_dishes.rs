use super::exclusion_section;
use crate::catalog::GeneratedRecord;
use crate::generation::{ContentKind, GenerationRequest};

/// Single-technique main dishes for the 簡単弁当 category.
///
/// Writes into the `simple` key of the main-dish document, leaving the other categories alone.
#[derive(Debug, Clone, Default)]
pub struct SimpleMainDishKind;

pub const SIMPLE_CATEGORY_KEY: &str = "simple";

impl ContentKind for SimpleMainDishKind {
    type Item = GeneratedRecord;

    fn kind_name(&self) -> &'static str {
        "simple-main-dishes"
    }

    fn items_key(&self) -> &'static str {
        "mainDishes"
    }

    fn system_prompt(&self) -> String {
        "あなたは「簡単弁当」専門家です。本当にシンプルで時短できるメインディッシュをJSON形式で生成します。"
            .to_string()
    }

    fn user_prompt(&self, request: &GenerationRequest) -> String {
        let count = request.desired_count;
        format!(
            r#"
あなたはお弁当のメインディッシュ専門家です。以下の条件で{count}個の異なる「{name}」メインディッシュを生成してください。
{exclusion}

カテゴリ: {name}
説明: {description}

**「{name}」の重要な条件**:
1. **調理方法は1種類のみ**: 焼く・レンジ・炒めるなど、1つの調理法だけで完結すること
2. **材料は3-5個まで**: 最小限の材料で作れること
3. **調理手順は2-3ステップまで**: 複雑な工程は不要
4. **調理時間は10分以内**: メインディッシュのみの時間
5. **特に推奨される調理法**:
   - グリルや魚焼き器で焼くだけ（例: 鮭の塩焼き、サバの塩焼き）
   - フライパンで焼くだけ（例: 照り焼きチキン、豚肉の生姜焼き）
   - 電子レンジで加熱するだけ（例: レンジ蒸し鶏、レンジハンバーグ）
   - フライパンで炒めるだけ（例: 野菜炒め、卵とじ）

**避けるべき例**:
- 複数の調理法が必要（揚げてから煮るなど）
- 材料が多い（6個以上）
- 手順が多い（4ステップ以上）
- 時間がかかる（15分以上）

各メインディッシュには以下を含めてください:
- メインディッシュの名前（シンプルで分かりやすいもの）
- 簡潔な説明（1文）
- 材料リスト（3-5個）
- 調理手順（2-3ステップ）
- 調理時間（分）- 10分以内
- カロリー（kcal）- メインディッシュのみ
- 難易度（「簡単」固定）
- 季節（春/夏/秋/冬、または季節を問わない場合はnull）

以下のJSON形式で出力してください（他のテキストは一切含めないでください）:

{{
  "mainDishes": [
    {{
      "name": "鮭の塩焼き",
      "description": "シンプルな塩焼きで素材の旨味を引き出したメインディッシュ",
      "dish": {{
        "name": "鮭の塩焼き",
        "ingredients": ["鮭の切り身", "塩", "レモン"],
        "instructions": ["鮭に塩をふる", "魚焼きグリルで8分焼く"]
      }},
      "prepTime": 10,
      "calories": 180,
      "difficulty": "簡単",
      "season": null
    }}
  ]
}}
"#,
            exclusion = exclusion_section("メインディッシュ", &request.exclusion),
            name = request.category.name,
            description = request.category.description,
        )
    }

    fn temperature(&self) -> f32 {
        0.8
    }
}
