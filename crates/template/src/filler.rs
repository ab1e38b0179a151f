//! Placeholder substitution over a DOCX document

use crate::token::{placeholder_spans, AlignClass};
use crate::{Placeholders, Result, Token};
use docx_core::{DocxDocument, Paragraph};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// What a fill pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Paragraphs whose text was rewritten
    pub paragraphs_changed: usize,
    /// Tokens replaced at least once
    pub matched: BTreeSet<Token>,
    /// Mapping tokens never found in the document
    pub unmatched: BTreeSet<Token>,
    /// Template `{{...}}` literals with no value in the mapping
    pub leftover_placeholders: BTreeSet<String>,
}

impl FillReport {
    /// True when the pass changed nothing
    pub fn is_noop(&self) -> bool {
        self.paragraphs_changed == 0
    }

    pub fn unmatched_tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.unmatched.iter().copied()
    }
}

/// Template filler
///
/// Replaces every token of a [`Placeholders`] mapping in body and table-cell
/// paragraphs with the uppercased value, then aligns each changed paragraph
/// once: left if any replaced token is left-class, centered otherwise.
pub struct TemplateFiller<'a> {
    placeholders: &'a Placeholders,
}

impl<'a> TemplateFiller<'a> {
    /// Create a new filler for a mapping
    pub fn new(placeholders: &'a Placeholders) -> Self {
        Self { placeholders }
    }

    /// Fill a document in place
    pub fn fill(&self, doc: &mut DocxDocument) -> FillReport {
        let mut report = FillReport::default();

        for mut para in doc.paragraphs_mut() {
            if self.fill_paragraph(&mut para, &mut report) {
                report.paragraphs_changed += 1;
            }
        }

        report.unmatched = self
            .placeholders
            .tokens()
            .filter(|token| !report.matched.contains(token))
            .collect();

        for token in &report.unmatched {
            warn!("Placeholder {token} not found in template");
        }
        if !report.leftover_placeholders.is_empty() {
            info!(
                "Placeholders left unsubstituted: {:?}",
                report.leftover_placeholders
            );
        }

        report
    }

    /// Substitute one paragraph; returns whether its text changed
    ///
    /// Placeholders are located in the template text once, left to right.
    /// Replacement values are never scanned again.
    fn fill_paragraph(&self, para: &mut Paragraph<'_>, report: &mut FillReport) -> bool {
        let original = para.text();
        let mut text = String::with_capacity(original.len());
        let mut copied = 0;
        let mut class: Option<AlignClass> = None;

        for span in placeholder_spans(&original) {
            let literal = &original[span.clone()];
            let Some((token, value)) = literal
                .parse::<Token>()
                .ok()
                .and_then(|token| self.placeholders.get(token).map(|value| (token, value)))
            else {
                report.leftover_placeholders.insert(literal.to_string());
                continue;
            };

            text.push_str(&original[copied..span.start]);
            text.push_str(&value.to_uppercase());
            copied = span.end;

            report.matched.insert(token);
            class = Some(match class {
                Some(current) => current.merge(token.align_class()),
                None => token.align_class(),
            });
        }

        let Some(class) = class else {
            return false;
        };
        text.push_str(&original[copied..]);

        debug!("Filled paragraph {original:?} -> {text:?} ({class:?})");
        para.set_text(&text);
        para.set_alignment(class.align());
        true
    }
}

/// Fill a copy of `template`, leaving the template itself untouched
pub fn fill_template(template: &DocxDocument, placeholders: &Placeholders) -> (DocxDocument, FillReport) {
    let mut doc = template.clone();
    let report = TemplateFiller::new(placeholders).fill(&mut doc);
    (doc, report)
}

/// Fill a copy of `template` and serialize it as a `.docx` package
pub fn render_proposal(
    template: &DocxDocument,
    placeholders: &Placeholders,
) -> Result<(Vec<u8>, FillReport)> {
    let (doc, report) = fill_template(template, placeholders);
    Ok((doc.to_bytes()?, report))
}
