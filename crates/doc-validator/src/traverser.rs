use content_security::{ContentValidator, SecurityValidationResult, ValidatorError};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{Block, BlockNode, Document, DocumentTab, InlineElement, Paragraph, Table};
use crate::parse::parse_document;

// ---------------------------------------------------------------------------
// DocumentTraverser
// ---------------------------------------------------------------------------

/// Walks a document and validates only its user-facing text.
///
/// Validated: embedded-object titles and descriptions, text runs, and
/// rich-link titles, wherever they appear (body, headers, footers,
/// footnotes, and arbitrarily nested table cells).
///
/// Never validated: document/revision IDs, the document title, paragraph
/// IDs, style properties, rich-link URIs, and structural counts.
///
/// Every helper returns its own findings; nothing is accumulated on `self`,
/// so a single traverser can serve concurrent callers.
#[derive(Debug)]
pub struct DocumentTraverser {
    validator: ContentValidator,
}

impl DocumentTraverser {
    /// Create a traverser backed by the built-in pattern registry.
    pub fn new() -> Result<Self, ValidatorError> {
        Ok(Self::with_validator(ContentValidator::new()?))
    }

    pub fn with_validator(validator: ContentValidator) -> Self {
        Self { validator }
    }

    /// The validator applied to each text leaf.
    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    /// Validate raw document JSON.
    ///
    /// A root that is not a JSON object is valid with no errors; malformed
    /// substructures are skipped silently.
    pub fn validate(&self, root: &Value) -> SecurityValidationResult {
        match parse_document(root) {
            Some(document) => self.validate_document(&document),
            None => SecurityValidationResult::valid(),
        }
    }

    /// Validate an already-parsed document.
    ///
    /// Errors are ordered: inline objects first, then each tab in order
    /// (body, headers, footers, footnotes).
    pub fn validate_document(&self, document: &Document) -> SecurityValidationResult {
        let mut errors = self.check_inline_objects(document);

        for (tab_idx, tab) in document.tabs.iter().enumerate() {
            if let Some(doc_tab) = &tab.document_tab {
                errors.extend(self.check_document_tab(doc_tab, tab_idx));
            }
        }

        debug!(
            tabs = document.tabs.len(),
            inline_objects = document.inline_objects.len(),
            errors = errors.len(),
            "document validation complete"
        );

        SecurityValidationResult::from_errors(errors)
    }

    // -- leaves -----------------------------------------------------------

    /// Validate one text leaf and tag its errors with `location`.
    fn check_text(&self, text: &str, location: &str) -> Vec<String> {
        let result = self.validator.validate(text);
        if result.is_valid {
            return Vec::new();
        }

        warn!(
            location,
            findings = result.errors.len(),
            "prompt injection detected in document text"
        );
        result.located_errors(location)
    }

    fn check_inline_objects(&self, document: &Document) -> Vec<String> {
        let mut errors = Vec::new();

        for (object_id, object) in &document.inline_objects {
            if let Some(title) = &object.title {
                errors.extend(self.check_text(title, &format!("inlineObjects.{object_id}.title")));
            }
            if let Some(description) = &object.description {
                errors.extend(self.check_text(
                    description,
                    &format!("inlineObjects.{object_id}.description"),
                ));
            }
        }

        errors
    }

    // -- structure --------------------------------------------------------

    fn check_document_tab(&self, doc_tab: &DocumentTab, tab_idx: usize) -> Vec<String> {
        let mut errors = self.check_blocks(&doc_tab.body, &format!("tabs[{tab_idx}].documentTab.body"));

        let segments = [
            ("headers", &doc_tab.headers),
            ("footers", &doc_tab.footers),
            ("footnotes", &doc_tab.footnotes),
        ];
        for (kind, entries) in segments {
            for (segment_id, blocks) in entries {
                errors.extend(self.check_blocks(blocks, &format!("tabs[{tab_idx}].{kind}.{segment_id}")));
            }
        }

        errors
    }

    /// Shared block-list walk used for bodies, headers, footers, footnotes,
    /// and table cells.
    fn check_blocks(&self, blocks: &[Block], prefix: &str) -> Vec<String> {
        blocks
            .iter()
            .flat_map(|block| {
                let location = format!("{prefix}.content[{}]", block.index);
                match &block.node {
                    BlockNode::Paragraph(paragraph) => self.check_paragraph(paragraph, &location),
                    BlockNode::Table(table) => self.check_table(table, &location),
                    BlockNode::Unknown => Vec::new(),
                }
            })
            .collect()
    }

    fn check_paragraph(&self, paragraph: &Paragraph, location: &str) -> Vec<String> {
        paragraph
            .elements
            .iter()
            .flat_map(|inline| match &inline.element {
                InlineElement::TextRun(run) => self.check_text(
                    &run.content,
                    &format!("{location}.paragraph.textRun[{}]", inline.index),
                ),
                // The URI is metadata; only the title is shown to readers.
                InlineElement::RichLink(link) => match &link.title {
                    Some(title) => self.check_text(
                        title,
                        &format!("{location}.paragraph.richLink[{}].title", inline.index),
                    ),
                    None => Vec::new(),
                },
                InlineElement::Unknown => Vec::new(),
            })
            .collect()
    }

    /// Each cell's prefix already ends in `.content`, and the nested block
    /// walk appends its own `.content[k]`, so a cell paragraph is reported as
    /// `...table.row[r].cell[c].content.content[k].paragraph...`.
    fn check_table(&self, table: &Table, location: &str) -> Vec<String> {
        let mut errors = Vec::new();

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (cell_idx, cell) in row.cells.iter().enumerate() {
                let prefix = format!("{location}.table.row[{row_idx}].cell[{cell_idx}].content");
                errors.extend(self.check_blocks(&cell.content, &prefix));
            }
        }

        errors
    }
}

impl Default for DocumentTraverser {
    /// # Panics
    ///
    /// Panics if the built-in registry fails to compile (should never happen
    /// with the static patterns).
    fn default() -> Self {
        Self::with_validator(ContentValidator::default())
    }
}

/// Validate raw document JSON with a freshly built traverser.
///
/// Callers validating many documents should build one [`DocumentTraverser`]
/// and reuse it.
pub fn validate_document_json(root: &Value) -> Result<SecurityValidationResult, ValidatorError> {
    Ok(DocumentTraverser::new()?.validate(root))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
