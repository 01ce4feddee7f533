//! Plain-text action plan: matching cards grouped under each stage.

use crate::card::PolicyCard;
use crate::vocab;

pub const PLAN_HEADING: &str = "=== 我的资助行动清单 ===";
const NATIONWIDE: &str = "全国";
const FOOTER: &[&str] = &[
    "---",
    "以上信息仅供参考，以官方发布为准。",
    "来源：同济资助导航 (tongji-aid-navigator)",
];

/// Cards selected for a plan, with the criteria echoed in its header.
#[derive(Debug, Clone, Default)]
pub struct ActionPlan<'a> {
    /// Province display name; `None` renders as nationwide.
    pub province: Option<String>,
    pub stage: Option<String>,
    pub coverage: Option<String>,
    pub cards: Vec<&'a PolicyCard>,
}

impl ActionPlan<'_> {
    /// Render the plan. A card listing several stages appears under each;
    /// stages without cards are omitted.
    pub fn render(&self) -> String {
        let mut lines = vec![
            PLAN_HEADING.to_string(),
            format!("省份：{}", self.province.as_deref().unwrap_or(NATIONWIDE)),
        ];
        if let Some(stage) = &self.stage {
            lines.push(format!("身份阶段：{}", vocab::stage_label(stage)));
        }
        if let Some(coverage) = &self.coverage {
            lines.push(format!("关注费用：{coverage}"));
        }
        lines.push(format!("匹配项目数：{}", self.cards.len()));
        lines.push(String::new());

        for stage in vocab::STAGE {
            let mut group = self
                .cards
                .iter()
                .filter(|card| card.stage.iter().any(|s| s == stage))
                .peekable();
            if group.peek().is_none() {
                continue;
            }
            lines.push(format!("【{}】", vocab::stage_label(stage)));
            for card in group {
                push_card(&mut lines, card);
            }
        }

        lines.extend(FOOTER.iter().map(|line| line.to_string()));
        lines.join("\n")
    }
}

fn push_card(lines: &mut Vec<String>, card: &PolicyCard) {
    lines.push(format!(
        "  ■ {}（{}）",
        card.title,
        vocab::category_label(&card.category)
    ));
    lines.push(format!("    收益：{}", card.benefit_summary));
    lines.push(format!("    申请时间：{}", card.application_window_text));
    if !card.application_steps.is_empty() {
        lines.push("    步骤：".to_string());
        for (i, step) in card.application_steps.iter().enumerate() {
            lines.push(format!("      {}. {step}", i + 1));
        }
    }
    if !card.materials.is_empty() {
        lines.push(format!("    材料：{}", card.materials.join("、")));
    }
    if !card.apply_portals.is_empty() {
        let portals: Vec<String> = card
            .apply_portals
            .iter()
            .map(|portal| format!("{} {}", portal.name, portal.url))
            .collect();
        lines.push(format!("    入口：{}", portals.join(" | ")));
    }
    lines.push(format!("    同济对接：{}", card.tongji_mapping_text));
    lines.push(String::new());
}
