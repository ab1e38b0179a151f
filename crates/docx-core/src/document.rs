//! DOCX package wrapper

use crate::paragraph::{Paragraph, ParagraphRef};
use crate::xml::{XmlElement, XmlPart};
use crate::{DocxError, Result};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// MIME type for WordprocessingML documents
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

const W_BODY: &str = "w:body";
const W_P: &str = "w:p";
const W_TBL: &str = "w:tbl";
const W_TR: &str = "w:tr";
const W_TC: &str = "w:tc";

/// DOCX document providing paragraph-level operations
///
/// Every package part is kept as raw bytes except the main document part,
/// which is parsed so paragraphs can be rewritten. Saving writes the parts
/// back in their original order.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    /// Package parts in archive order (the main part's bytes are stale once parsed)
    parts: Vec<(String, Vec<u8>)>,
    /// Name of the main document part
    main_part: String,
    /// Parsed main document part
    document: XmlPart,
}

impl DocxDocument {
    /// Open a DOCX document from a file path
    ///
    /// # Example
    /// ```ignore
    /// let doc = DocxDocument::open("template.docx")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| DocxError::OpenError(format!("{}: {}", path.display(), e)))?;
        Self::open_from_bytes(&data)
    }

    /// Open a DOCX document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| DocxError::OpenError(e.to_string()))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf)?;
            parts.push((name, buf));
        }

        let main_part = find_main_part(&parts)?;
        let document = {
            let (_, bytes) = parts
                .iter()
                .find(|(name, _)| *name == main_part)
                .ok_or_else(|| DocxError::MissingPart(main_part.clone()))?;
            XmlPart::parse(bytes)?
        };

        if document.root.child(W_BODY).is_none() {
            return Err(DocxError::MissingPart(format!("{main_part}: w:body")));
        }

        Ok(Self {
            parts,
            main_part,
            document,
        })
    }

    /// Name of the main document part (usually `word/document.xml`)
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Names of every part in the package
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    /// Body paragraphs in document order (read-only)
    pub fn paragraphs(&self) -> Vec<ParagraphRef<'_>> {
        self.body()
            .map(|body| {
                body.elements()
                    .filter(|el| el.is(W_P))
                    .map(ParagraphRef::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cell texts of every top-level table: `tables[t][row][cell]`
    ///
    /// A cell's text joins its paragraphs with `\n`.
    pub fn table_texts(&self) -> Vec<Vec<Vec<String>>> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        body.elements()
            .filter(|el| el.is(W_TBL))
            .map(|tbl| {
                tbl.elements()
                    .filter(|el| el.is(W_TR))
                    .map(|tr| {
                        tr.elements()
                            .filter(|el| el.is(W_TC))
                            .map(|tc| {
                                tc.elements()
                                    .filter(|el| el.is(W_P))
                                    .map(|p| ParagraphRef::new(p).text())
                                    .collect::<Vec<_>>()
                                    .join("\n")
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    /// Every table-cell paragraph, read-only, in document order
    pub fn table_paragraphs(&self) -> Vec<ParagraphRef<'_>> {
        let mut out = Vec::new();
        if let Some(body) = self.body() {
            for tbl in body.elements().filter(|el| el.is(W_TBL)) {
                collect_table_paragraphs(tbl, &mut out);
            }
        }
        out
    }

    /// Mutable access to every paragraph substitution should visit
    ///
    /// Returns body paragraphs first, then the paragraphs of every table cell
    /// (tables nested inside cells included).
    pub fn paragraphs_mut(&mut self) -> Vec<Paragraph<'_>> {
        let Some(body) = self.document.root.child_mut(W_BODY) else {
            return Vec::new();
        };

        let mut body_paragraphs = Vec::new();
        let mut table_paragraphs = Vec::new();
        for el in body.elements_mut() {
            if el.is(W_P) {
                body_paragraphs.push(Paragraph::new(el));
            } else if el.is(W_TBL) {
                collect_table_paragraphs_mut(el, &mut table_paragraphs);
            }
        }

        body_paragraphs.extend(table_paragraphs);
        body_paragraphs
    }

    /// Serialize the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let document_bytes = self.document.to_bytes()?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, data) in &self.parts {
            let options = if name.starts_with("word/media/") {
                stored
            } else {
                deflated
            };
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| DocxError::SaveError(e.to_string()))?;
            let data = if *name == self.main_part {
                &document_bytes
            } else {
                data
            };
            writer.write_all(data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| DocxError::SaveError(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    /// Save the document to a file path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn body(&self) -> Option<&XmlElement> {
        self.document.root.child(W_BODY)
    }
}

/// Resolve the main document part from the package relationships
fn find_main_part(parts: &[(String, Vec<u8>)]) -> Result<String> {
    let Some((_, rels)) = parts.iter().find(|(name, _)| name == PACKAGE_RELS) else {
        return Ok(DEFAULT_MAIN_PART.to_string());
    };

    let rels = XmlPart::parse(rels)?;
    let target = rels
        .root
        .elements()
        .filter(|el| el.name.ends_with("Relationship"))
        .find(|el| {
            el.attribute("Type")
                .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL))
        })
        .and_then(|el| el.attribute("Target"));

    Ok(match target {
        Some(target) => target.trim_start_matches('/').to_string(),
        None => DEFAULT_MAIN_PART.to_string(),
    })
}

fn collect_table_paragraphs<'a>(tbl: &'a XmlElement, out: &mut Vec<ParagraphRef<'a>>) {
    for tr in tbl.elements().filter(|el| el.is(W_TR)) {
        for tc in tr.elements().filter(|el| el.is(W_TC)) {
            for el in tc.elements() {
                if el.is(W_P) {
                    out.push(ParagraphRef::new(el));
                } else if el.is(W_TBL) {
                    collect_table_paragraphs(el, out);
                }
            }
        }
    }
}

fn collect_table_paragraphs_mut<'a>(tbl: &'a mut XmlElement, out: &mut Vec<Paragraph<'a>>) {
    for tr in tbl.elements_mut().filter(|el| el.is(W_TR)) {
        for tc in tr.elements_mut().filter(|el| el.is(W_TC)) {
            for el in tc.elements_mut() {
                if el.is(W_P) {
                    out.push(Paragraph::new(el));
                } else if el.is(W_TBL) {
                    collect_table_paragraphs_mut(el, out);
                }
            }
        }
    }
}
