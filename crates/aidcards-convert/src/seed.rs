//! Hand-curated collections emitted alongside the converted cards.

use aidcards_model::{ChangelogEntry, Faq, GlossaryTerm, PolicyCard, Province};

pub const DEFAULT_CHANGELOG_KIND: &str = "init";
pub const DEFAULT_CHANGELOG_SUMMARY: &str = "安徽MVP首批项目卡与证据链入库";

/// Changelog entry parameters; the entry itself lists every emitted card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSeed {
    pub date: String,
    pub kind: String,
    pub summary: String,
}

impl ChangelogSeed {
    /// Default entry dated today (local time).
    pub fn today() -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            kind: DEFAULT_CHANGELOG_KIND.to_string(),
            summary: DEFAULT_CHANGELOG_SUMMARY.to_string(),
        }
    }
}

impl Default for ChangelogSeed {
    fn default() -> Self {
        Self::today()
    }
}

pub fn provinces() -> Vec<Province> {
    vec![Province {
        name: "安徽".to_string(),
        slug: "anhui".to_string(),
        aliases: vec!["皖".to_string(), "Anhui".to_string()],
        order: 1,
    }]
}

pub fn glossary() -> Vec<GlossaryTerm> {
    vec![
        GlossaryTerm {
            term: "学生资助".to_string(),
            definition: "对家庭经济困难学生提供经济支持与发展支持的制度体系，通常包含奖、助、贷、勤、补、免、偿及绿色通道等。".to_string(),
            evidence: Vec::new(),
        },
        GlossaryTerm {
            term: "绿色通道".to_string(),
            definition: "新生因家庭经济困难暂时无法缴纳学费住宿费时，可先办理入学手续，后续再通过贷款、助学金等方式解决。".to_string(),
            evidence: Vec::new(),
        },
    ]
}

pub fn faqs() -> Vec<Faq> {
    vec![Faq {
        q: "报到当天交不起学费怎么办？".to_string(),
        a: "可咨询学校资助部门并通过绿色通道先办理入学手续；后续再申请贷款/助学金等。"
            .to_string(),
    }]
}

pub fn changelog(seed: &ChangelogSeed, cards: &[PolicyCard]) -> Vec<ChangelogEntry> {
    vec![ChangelogEntry {
        date: seed.date.clone(),
        kind: seed.kind.clone(),
        summary: seed.summary.clone(),
        card_ids: cards.iter().map(|card| card.card_id.clone()).collect(),
    }]
}
