//! Paragraph views over `w:p` elements

use crate::xml::{XmlElement, XmlNode};
use crate::Align;

const W_R: &str = "w:r";
const W_T: &str = "w:t";
const W_TAB: &str = "w:tab";
const W_BR: &str = "w:br";
const W_CR: &str = "w:cr";
const W_RPR: &str = "w:rPr";
const W_PPR: &str = "w:pPr";
const W_JC: &str = "w:jc";
const W_HYPERLINK: &str = "w:hyperlink";
const W_PROOF_ERR: &str = "w:proofErr";

/// Children of `w:pPr` that must follow `w:jc` in schema order
const AFTER_JC: [&str; 9] = [
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

/// Read-only paragraph view
#[derive(Debug, Clone, Copy)]
pub struct ParagraphRef<'a> {
    el: &'a XmlElement,
}

impl<'a> ParagraphRef<'a> {
    pub(crate) fn new(el: &'a XmlElement) -> Self {
        Self { el }
    }

    /// Full paragraph text (see [`Paragraph::text`])
    pub fn text(&self) -> String {
        paragraph_text(self.el)
    }

    /// Explicit alignment, if the paragraph sets one
    pub fn alignment(&self) -> Option<Align> {
        paragraph_alignment(self.el)
    }
}

/// Mutable paragraph view
#[derive(Debug)]
pub struct Paragraph<'a> {
    el: &'a mut XmlElement,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(el: &'a mut XmlElement) -> Self {
        Self { el }
    }

    /// Full paragraph text
    ///
    /// Concatenates every run, including runs inside hyperlinks. Tabs read as
    /// `\t` and line breaks as `\n`; page and column breaks contribute nothing.
    pub fn text(&self) -> String {
        paragraph_text(self.el)
    }

    /// Replace the paragraph content with a single run holding `text`
    ///
    /// Runs, hyperlinks and proofing marks are removed. The new run inherits
    /// the run properties of the first original run so the template's font
    /// survives. `\t` and `\n` are written as `w:tab` and `w:br`.
    pub fn set_text(&mut self, text: &str) {
        let run_props = first_run_properties(self.el).cloned();

        let mut insert_at = None;
        let mut kept = Vec::with_capacity(self.el.children.len());
        for node in self.el.children.drain(..) {
            let is_content = matches!(
                &node,
                XmlNode::Element(el) if el.is(W_R) || el.is(W_HYPERLINK) || el.is(W_PROOF_ERR)
            );
            if is_content {
                insert_at.get_or_insert(kept.len());
            } else {
                kept.push(node);
            }
        }
        self.el.children = kept;

        let run = build_run(text, run_props);
        let index = insert_at.unwrap_or(self.el.children.len());
        self.el.children.insert(index, XmlNode::Element(run));
    }

    /// Explicit alignment, if the paragraph sets one
    pub fn alignment(&self) -> Option<Align> {
        paragraph_alignment(self.el)
    }

    /// Set `w:pPr/w:jc`, creating paragraph properties when absent
    pub fn set_alignment(&mut self, align: Align) {
        let ppr = paragraph_properties_mut(self.el);

        if let Some(jc) = ppr.child_mut(W_JC) {
            jc.set_attribute("w:val", align.as_ooxml());
            return;
        }

        let jc = XmlElement::new(W_JC).with_attribute("w:val", align.as_ooxml());
        let index = ppr
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(el) if AFTER_JC.contains(&el.name.as_str())))
            .unwrap_or(ppr.children.len());
        ppr.children.insert(index, XmlNode::Element(jc));
    }
}

fn paragraph_text(p: &XmlElement) -> String {
    let mut out = String::new();
    for child in p.elements() {
        if child.is(W_R) {
            push_run_text(child, &mut out);
        } else if child.is(W_HYPERLINK) {
            for run in child.elements().filter(|el| el.is(W_R)) {
                push_run_text(run, &mut out);
            }
        }
    }
    out
}

fn push_run_text(run: &XmlElement, out: &mut String) {
    for child in run.elements() {
        match child.name.as_str() {
            W_T => out.push_str(&child.text()),
            W_TAB => out.push('\t'),
            W_CR => out.push('\n'),
            W_BR => match child.attribute("w:type") {
                Some("page") | Some("column") => {}
                _ => out.push('\n'),
            },
            _ => {}
        }
    }
}

fn paragraph_alignment(p: &XmlElement) -> Option<Align> {
    p.child(W_PPR)
        .and_then(|ppr| ppr.child(W_JC))
        .and_then(|jc| jc.attribute("w:val"))
        .and_then(Align::from_ooxml)
}

fn first_run_properties(p: &XmlElement) -> Option<&XmlElement> {
    p.elements()
        .flat_map(|child| {
            if child.is(W_HYPERLINK) {
                child.elements().filter(|el| el.is(W_R)).collect::<Vec<_>>()
            } else if child.is(W_R) {
                vec![child]
            } else {
                Vec::new()
            }
        })
        .find_map(|run| run.child(W_RPR))
}

/// `w:pPr` must be the first child of `w:p`
fn paragraph_properties_mut(p: &mut XmlElement) -> &mut XmlElement {
    let index = match p
        .children
        .iter()
        .position(|node| matches!(node, XmlNode::Element(el) if el.is(W_PPR)))
    {
        Some(index) => index,
        None => {
            p.children.insert(0, XmlNode::Element(XmlElement::new(W_PPR)));
            0
        }
    };
    match &mut p.children[index] {
        XmlNode::Element(el) => el,
        _ => unreachable!("index points at a w:pPr element"),
    }
}

fn build_run(text: &str, run_props: Option<XmlElement>) -> XmlElement {
    let mut run = XmlElement::new(W_R);
    if let Some(rpr) = run_props {
        run.children.push(XmlNode::Element(rpr));
    }

    let mut pending = String::new();
    for ch in text.chars() {
        match ch {
            '\t' | '\n' => {
                flush_text(&mut run, &mut pending);
                let name = if ch == '\t' { W_TAB } else { W_BR };
                run.children.push(XmlNode::Element(XmlElement::new(name)));
            }
            _ => pending.push(ch),
        }
    }
    flush_text(&mut run, &mut pending);
    run
}

fn flush_text(run: &mut XmlElement, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    let mut t = XmlElement::new(W_T);
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        t.set_attribute("xml:space", "preserve");
    }
    t.children.push(XmlNode::Text(text));
    run.children.push(XmlNode::Element(t));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlPart;
    use pretty_assertions::assert_eq;

    fn parse_paragraph(xml: &str) -> XmlElement {
        XmlPart::parse(xml.as_bytes()).unwrap().root
    }

    #[test]
    fn test_text_spans_runs_and_hyperlinks() {
        let p = parse_paragraph(
            r#"<w:p><w:r><w:t>{{CLI</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:t>ENT}}</w:t><w:tab/></w:r><w:hyperlink r:id="rId1"><w:r><w:t>link</w:t></w:r></w:hyperlink><w:r><w:br w:type="page"/><w:br/><w:t>x</w:t></w:r></w:p>"#,
        );
        assert_eq!(ParagraphRef::new(&p).text(), "{{CLIENT}}\tlink\nx");
    }

    #[test]
    fn test_set_text_keeps_first_run_properties() {
        let mut p = parse_paragraph(
            r#"<w:p><w:pPr><w:spacing w:after="0"/></w:pPr><w:bookmarkStart w:id="0"/><w:r><w:rPr><w:b/></w:rPr><w:t>{{A</w:t></w:r><w:r><w:t>}}</w:t></w:r></w:p>"#,
        );
        let mut para = Paragraph::new(&mut p);
        para.set_text(" X\tY ");
        assert_eq!(para.text(), " X\tY ");

        let names: Vec<&str> = p.elements().map(|el| el.name.as_str()).collect();
        assert_eq!(names, vec!["w:pPr", "w:bookmarkStart", "w:r"]);

        let run = p.child("w:r").unwrap();
        assert!(run.child("w:rPr").and_then(|rpr| rpr.child("w:b")).is_some());
        let t = run.child("w:t").unwrap();
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_set_alignment_creates_ppr_first() {
        let mut p = parse_paragraph(r#"<w:p><w:r><w:t>a</w:t></w:r></w:p>"#);
        let mut para = Paragraph::new(&mut p);
        assert_eq!(para.alignment(), None);
        para.set_alignment(Align::Center);
        assert_eq!(para.alignment(), Some(Align::Center));

        let first = p.elements().next().unwrap();
        assert_eq!(first.name, "w:pPr");
    }

    #[test]
    fn test_set_alignment_respects_schema_order() {
        let mut p = parse_paragraph(
            r#"<w:p><w:pPr><w:spacing w:after="0"/><w:rPr><w:b/></w:rPr></w:pPr></w:p>"#,
        );
        Paragraph::new(&mut p).set_alignment(Align::Left);

        let ppr = p.child("w:pPr").unwrap();
        let names: Vec<&str> = ppr.elements().map(|el| el.name.as_str()).collect();
        assert_eq!(names, vec!["w:spacing", "w:jc", "w:rPr"]);
    }

    #[test]
    fn test_set_alignment_replaces_existing() {
        let mut p = parse_paragraph(r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr></w:p>"#);
        let mut para = Paragraph::new(&mut p);
        assert_eq!(para.alignment(), Some(Align::Right));
        para.set_alignment(Align::Center);
        assert_eq!(para.alignment(), Some(Align::Center));
        assert_eq!(p.child("w:pPr").unwrap().elements().count(), 1);
    }
}
