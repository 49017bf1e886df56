use super::{distribution_section, exclusion_section, UNSUITABLE_FOR_BENTO};
use crate::catalog::{CookingMethod, GeneratedRecord};
use crate::generation::{ContentKind, GenerationRequest};

/// Side dishes balanced across the fixed cooking-method set.
///
/// Only the most recent `exclusion_window` names reach the prompt.
#[derive(Debug, Clone)]
pub struct SideDishKind {
    exclusion_window: usize,
}

impl SideDishKind {
    pub const DEFAULT_EXCLUSION_WINDOW: usize = 20;

    pub fn new(exclusion_window: usize) -> Self {
        Self { exclusion_window }
    }
}

impl Default for SideDishKind {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXCLUSION_WINDOW)
    }
}

impl ContentKind for SideDishKind {
    type Item = GeneratedRecord;

    fn kind_name(&self) -> &'static str {
        "side-dishes"
    }

    fn items_key(&self) -> &'static str {
        "sideDishes"
    }

    fn system_prompt(&self) -> String {
        "あなたはお弁当の副菜専門家です。JSON形式で副菜を生成します。".to_string()
    }

    fn user_prompt(&self, request: &GenerationRequest) -> String {
        let count = request.desired_count;
        format!(
            r#"
あなたはお弁当の副菜専門家です。以下の条件で{count}個の異なる副菜を生成してください。
{exclusion}
{distribution}

各副菜には以下を含めてください:
- 副菜の名前（魅力的で具体的なもの）
- 材料リスト（3-5個）
- 調理手順（2-4ステップ）
- 調理時間（分）- 副菜のみの時間、5-15分程度
- カロリー（kcal）- 副菜のみ、50-150kcal程度
- 調理方法（以下から1つを選択）: {methods}
- 季節（春/夏/秋/冬、または季節を問わない場合はnull）

重要な要件:
1. {count}個すべて異なる副菜にすること
2. 調理方法のバランスを考慮し、偏りがないようにすること
3. 季節の食材を取り入れること（必要に応じて）
4. 冷めても美味しい料理を選ぶこと
5. お弁当箱に詰めやすい料理を選ぶこと
6. **お弁当に不向きな食材は絶対に使わないこと**:
{UNSUITABLE_FOR_BENTO}
7. 汁気の多い料理は避け、お弁当に適した調理法を選ぶこと
8. 副菜として適度なボリュームであること
9. 彩りが良く、お弁当を華やかにする料理を選ぶこと

以下のJSON形式で出力してください（他のテキストは一切含めないでください）:

{{
  "sideDishes": [
    {{
      "name": "副菜名",
      "dish": {{
        "name": "料理名（副菜名と同じ）",
        "ingredients": ["材料1", "材料2"],
        "instructions": ["手順1", "手順2"]
      }},
      "prepTime": 10,
      "calories": 80,
      "cookingMethod": "きんぴら",
      "season": "秋"
    }}
  ]
}}
"#,
            exclusion = exclusion_section("副菜", &request.exclusion),
            distribution = distribution_section(request.distribution.as_ref()),
            methods = CookingMethod::known_labels().join(", "),
        )
    }

    fn exclusion_window(&self) -> Option<usize> {
        Some(self.exclusion_window)
    }

    fn distribution_labels(&self) -> Option<Vec<String>> {
        Some(CookingMethod::known_labels())
    }
}
