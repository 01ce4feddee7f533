//! Glossary and FAQ checks. Both collections are optional.

use aidcards_model::Collection;

use crate::fields::{self, Record};
use crate::report::{CLASS_FAQ_FIELD_MISSING, CLASS_GLOSSARY_FIELD_MISSING, Findings};

pub fn check_glossary(terms: &[Record], findings: &mut Findings) {
    for (i, term) in terms.iter().enumerate() {
        for key in ["term", "definition"] {
            if !fields::has_content(term.get(key)) {
                findings.push(
                    Collection::Glossary,
                    CLASS_GLOSSARY_FIELD_MISSING,
                    format!("glossary[{i}]: missing {key}"),
                );
            }
        }
    }
}

pub fn check_faqs(faqs: &[Record], findings: &mut Findings) {
    for (i, faq) in faqs.iter().enumerate() {
        for key in ["q", "a"] {
            if !fields::has_content(faq.get(key)) {
                findings.push(
                    Collection::Faqs,
                    CLASS_FAQ_FIELD_MISSING,
                    format!("faqs[{i}]: missing {key}"),
                );
            }
        }
    }
}
