//! Typed document tree.
//!
//! Only the parts of a document that can carry user-facing text, plus the
//! structure needed to reach them, have a content slot here.  Metadata
//! (document/revision IDs, the document title, paragraph IDs, URIs) is kept
//! in clearly separated fields that the traverser never reads as content.
//!
//! Node positions are recorded as the index the node had in the raw input,
//! so location paths stay faithful even when malformed siblings are dropped
//! or one raw node yields more than one typed node.

/// Identifiers and titles that describe a document but are never content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub document_id: Option<String>,
    pub revision_id: Option<String>,
    pub title: Option<String>,
}

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub metadata: DocumentMetadata,
    /// Embedded objects keyed by object ID, in input order.
    pub inline_objects: Vec<(String, InlineObject)>,
    pub tabs: Vec<Tab>,
}

/// Text attached to an embedded image or drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineObject {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A document tab.  `document_tab` is `None` when the raw tab was malformed,
/// which keeps later tabs at their raw index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tab {
    pub document_tab: Option<DocumentTab>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTab {
    pub body: BlockList,
    /// Segments keyed by header ID, in input order.
    pub headers: Vec<(String, BlockList)>,
    pub footers: Vec<(String, BlockList)>,
    pub footnotes: Vec<(String, BlockList)>,
}

/// Ordered structural content of a body, header, footer, footnote or table
/// cell.
pub type BlockList = Vec<Block>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Position of the raw block within its list.
    pub index: usize,
    pub node: BlockNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Paragraph(Paragraph),
    Table(Table),
    /// Section breaks, tables of contents, and anything unrecognised.
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Metadata only.
    pub paragraph_id: Option<String>,
    pub elements: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    /// Position of the raw element within the paragraph.
    pub index: usize,
    pub element: InlineElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineElement {
    TextRun(TextRun),
    RichLink(RichLink),
    /// Page breaks, equations, person chips, and anything unrecognised.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichLink {
    pub title: Option<String>,
    /// Never validated.
    pub uri: Option<String>,
}

/// Rows keep their raw index by position: a malformed row becomes an empty
/// [`TableRow`] rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub content: BlockList,
}
