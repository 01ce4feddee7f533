//! Source-site directory synthesized from evidence.
//!
//! The output is a placeholder directory for editors to complete by hand:
//! one record per distinct `source_name`, first occurrence wins.

use aidcards_model::{Evidence, SourceSite};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use url::{Host, Url};

pub const UNKNOWN_SOURCE: &str = "未知来源";
pub const SOURCE_ID_PREFIX: &str = "src-";
const SLUG_MAX_CHARS: usize = 50;
const SLUG_FALLBACK: &str = "unknown";
const SCHEME_RELATIVE_BASE: &str = "https:";
const PUNYCODE_LABEL: &str = "xn--";

const SCHOOL_TOKENS: &[&str] = &["同济"];
const PROVINCE_TOKENS: &[&str] = &["安徽", "皖"];
const BANK_TOKENS: &[&str] = &["国家开发银行", "国开", "银行"];
const NATIONAL_TOKENS: &[&str] = &["教育部", "全国", "财政部"];
const SCOPE_RULES: &[(&str, &[&str])] = &[
    ("school", SCHOOL_TOKENS),
    ("province", PROVINCE_TOKENS),
    ("bank", BANK_TOKENS),
    ("national", NATIONAL_TOKENS),
];
const DEFAULT_SCOPE: &str = "national";

const PROVINCE_REGION: &str = "安徽";
const SCHOOL_REGION: &str = "同济大学";
const NATIONWIDE_REGION: &str = "全国";

const FREQUENCY_TERMLY: &str = "每学期";
const FREQUENCY_IRREGULAR: &str = "不定期";

const GENERATED_NOTE: &str = "由证据链自动生成，需人工补齐政策目录页与联系方式。";

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex must compile"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^0-9A-Za-z\x{4E00}-\x{9FFF}\-]+").expect("slug filter regex must compile")
    })
}

/// Hyphenate whitespace, keep ASCII alphanumerics, CJK ideographs and `-`,
/// cap at 50 characters, fall back to `unknown`.
pub fn slugify(name: &str) -> String {
    let hyphenated = whitespace_re().replace_all(name.trim(), "-");
    let filtered = disallowed_re().replace_all(&hyphenated, "");
    let slug: String = filtered.chars().take(SLUG_MAX_CHARS).collect();
    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug
    }
}

pub fn source_id(name: &str) -> String {
    format!("{SOURCE_ID_PREFIX}{}", slugify(name))
}

/// `https://{host[:port]}/` for a URL with a network location, else `""`.
///
/// Scheme-relative `//host/path` counts as having a host, and
/// internationalized hosts keep their Unicode form.
pub fn homepage_url(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = if raw.starts_with("//") {
        Url::parse(&format!("{SCHEME_RELATIVE_BASE}{raw}"))
    } else {
        Url::parse(raw)
    };
    let Ok(url) = parsed else {
        return String::new();
    };
    let host = match url.host() {
        Some(Host::Domain(domain)) if domain.contains(PUNYCODE_LABEL) => {
            url::quirks::domain_to_unicode(domain)
        }
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => format!("[{addr}]"),
        None => return String::new(),
    };
    if host.is_empty() {
        return String::new();
    }
    match url.port() {
        Some(port) => format!("https://{host}:{port}/"),
        None => format!("https://{host}/"),
    }
}

fn contains_any(name: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| name.contains(token))
}

/// Scope level by substring match, checked school → province → bank →
/// national; unmatched names default to national.
pub fn infer_scope(name: &str) -> &'static str {
    SCOPE_RULES
        .iter()
        .find(|(_, tokens)| contains_any(name, tokens))
        .map(|(scope, _)| *scope)
        .unwrap_or(DEFAULT_SCOPE)
}

pub fn infer_region(name: &str) -> &'static str {
    if contains_any(name, PROVINCE_TOKENS) {
        PROVINCE_REGION
    } else if contains_any(name, SCHOOL_TOKENS) {
        SCHOOL_REGION
    } else {
        NATIONWIDE_REGION
    }
}

fn update_frequency(scope: &str) -> &'static str {
    match scope {
        "school" | "province" => FREQUENCY_TERMLY,
        _ => FREQUENCY_IRREGULAR,
    }
}

fn site_priority(scope: &str) -> &'static str {
    match scope {
        "school" | "province" | "bank" => "P0",
        _ => "P1",
    }
}

pub fn site_for(name: &str, url: &str) -> SourceSite {
    let scope = infer_scope(name);
    SourceSite {
        source_id: source_id(name),
        name: name.to_string(),
        scope_level: scope.to_string(),
        region: infer_region(name).to_string(),
        homepage_url: homepage_url(url),
        policy_index_urls: Vec::new(),
        contact_urls: Vec::new(),
        update_frequency: update_frequency(scope).to_string(),
        priority: site_priority(scope).to_string(),
        notes: GENERATED_NOTE.to_string(),
    }
}

/// One site per distinct source name, in traversal order; later
/// occurrences of a name are ignored.
pub fn synthesize_source_sites<'a>(
    evidence: impl IntoIterator<Item = &'a Evidence>,
) -> Vec<SourceSite> {
    let mut seen = BTreeSet::new();
    let mut sites = Vec::new();
    for item in evidence {
        let name = item
            .source_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        if !seen.insert(name.to_string()) {
            continue;
        }
        let site = site_for(name, item.url.as_deref().unwrap_or(""));
        tracing::debug!(
            source_id = %site.source_id,
            scope_level = %site.scope_level,
            "synthesized source site"
        );
        sites.push(site);
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(name: Option<&str>, url: Option<&str>) -> Evidence {
        Evidence {
            source_name: name.map(str::to_string),
            url: url.map(str::to_string),
            ..Evidence::default()
        }
    }

    #[test]
    fn slug_keeps_cjk_and_ascii_only() {
        let slug = slugify("安徽省教育厅");
        assert_eq!(slug, "安徽省教育厅");
        assert!(slug.chars().count() <= 50);

        assert_eq!(slugify("  Tongji  Univ. (Aid) "), "Tongji-Univ-Aid");
        assert_eq!(slugify("（）！"), "unknown");
        assert_eq!(slugify(""), "unknown");
        assert_eq!(slugify(&"资".repeat(80)).chars().count(), 50);
    }

    #[test]
    fn homepage_tolerates_malformed_urls() {
        assert_eq!(
            homepage_url("http://jyt.ah.gov.cn/content/123.html"),
            "https://jyt.ah.gov.cn/"
        );
        assert_eq!(homepage_url("jyt.ah.gov.cn/content"), "");
        assert_eq!(homepage_url("not a url"), "");
        assert_eq!(homepage_url(""), "");
    }

    #[test]
    fn homepage_keeps_explicit_port() {
        assert_eq!(homepage_url("http://host:8080/x"), "https://host:8080/");
        assert_eq!(
            homepage_url("https://xszz.tongji.edu.cn:8443/notice?id=1"),
            "https://xszz.tongji.edu.cn:8443/"
        );
    }

    #[test]
    fn homepage_keeps_unicode_host() {
        assert_eq!(homepage_url("https://资助.中国/a"), "https://资助.中国/");
    }

    #[test]
    fn homepage_accepts_scheme_relative_urls() {
        assert_eq!(homepage_url("//www.ah.gov.cn/a"), "https://www.ah.gov.cn/");
        assert_eq!(homepage_url("//"), "");
    }

    #[test]
    fn scope_checks_school_before_province_before_bank() {
        assert_eq!(infer_scope("同济大学学生资助管理中心"), "school");
        assert_eq!(infer_scope("安徽省学生资助管理中心"), "province");
        assert_eq!(infer_scope("皖江银行"), "province");
        assert_eq!(infer_scope("国家开发银行"), "bank");
        assert_eq!(infer_scope("教育部"), "national");
        assert_eq!(infer_scope("某基金会"), "national");
    }

    #[test]
    fn region_prefers_province_over_school() {
        assert_eq!(infer_region("安徽同济校友会"), "安徽");
        assert_eq!(infer_region("同济大学"), "同济大学");
        assert_eq!(infer_region("财政部"), "全国");
    }

    #[test]
    fn first_seen_source_wins() {
        let items = [
            evidence(Some("安徽省教育厅"), Some("https://jyt.ah.gov.cn/a")),
            evidence(Some("国家开发银行"), Some("not a url")),
            evidence(Some("安徽省教育厅"), Some("https://other.example/")),
            evidence(None, None),
            evidence(Some(""), Some("https://x.example/")),
        ];
        let sites = synthesize_source_sites(&items);

        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].source_id, "src-安徽省教育厅");
        assert_eq!(sites[0].homepage_url, "https://jyt.ah.gov.cn/");
        assert_eq!(sites[0].update_frequency, "每学期");
        assert_eq!(sites[0].priority, "P0");
        assert_eq!(sites[1].scope_level, "bank");
        assert_eq!(sites[1].homepage_url, "");
        assert_eq!(sites[1].update_frequency, "不定期");
        assert_eq!(sites[2].name, UNKNOWN_SOURCE);
        assert_eq!(sites[2].homepage_url, "");
        assert_eq!(sites[2].priority, "P1");
    }
}
