//! Lenient conversion of raw document JSON into the typed [`model`](crate::model).
//!
//! Parsing never fails.  Anything absent or of the wrong type is dropped
//! here, once, so the traverser can match exhaustively on the typed model
//! without re-checking shapes.  Unusual shapes are not suspicious; they
//! simply contribute no text.

use serde_json::{Map, Value};

use crate::model::{
    Block, BlockList, BlockNode, Document, DocumentMetadata, DocumentTab, Inline, InlineElement,
    InlineObject, Paragraph, RichLink, Tab, Table, TableCell, TableRow, TextRun,
};

/// Parse a raw document.  Returns `None` when `value` is not a JSON object.
pub fn parse_document(value: &Value) -> Option<Document> {
    let root = value.as_object()?;

    Some(Document {
        metadata: DocumentMetadata {
            document_id: string_field(root, "documentId"),
            revision_id: string_field(root, "revisionId"),
            title: string_field(root, "title"),
        },
        inline_objects: object_entries(root.get("inlineObjects"), parse_inline_object),
        tabs: array_items(root.get("tabs"))
            .map(|tab| Tab {
                document_tab: tab
                    .get("documentTab")
                    .and_then(Value::as_object)
                    .map(parse_document_tab),
            })
            .collect(),
    })
}

fn parse_inline_object(value: &Value) -> Option<InlineObject> {
    let obj = value.as_object()?;
    let embedded = obj
        .get("inlineObjectProperties")
        .and_then(|props| props.get("embeddedObject"))
        .and_then(Value::as_object);

    Some(match embedded {
        Some(embedded) => InlineObject {
            title: string_field(embedded, "title"),
            description: string_field(embedded, "description"),
        },
        None => InlineObject::default(),
    })
}

fn parse_document_tab(tab: &Map<String, Value>) -> DocumentTab {
    DocumentTab {
        body: tab
            .get("body")
            .map(|body| parse_block_list(body.get("content")))
            .unwrap_or_default(),
        headers: object_entries(tab.get("headers"), parse_segment),
        footers: object_entries(tab.get("footers"), parse_segment),
        footnotes: object_entries(tab.get("footnotes"), parse_segment),
    }
}

/// A header, footer or footnote: an object whose `content` is a block list.
fn parse_segment(value: &Value) -> Option<BlockList> {
    value.as_object()?;
    Some(parse_block_list(value.get("content")))
}

/// Parse a structural-element array.
///
/// A raw block carrying both `paragraph` and `table` yields two typed blocks
/// sharing one index, paragraph first, so neither is skipped.
pub fn parse_block_list(value: Option<&Value>) -> BlockList {
    let mut blocks = Vec::new();

    for (index, raw) in array_items(value).enumerate() {
        let mut found = false;

        if let Some(paragraph) = raw.get("paragraph").and_then(Value::as_object) {
            blocks.push(Block {
                index,
                node: BlockNode::Paragraph(parse_paragraph(paragraph)),
            });
            found = true;
        }
        if let Some(table) = raw.get("table").and_then(Value::as_object) {
            blocks.push(Block {
                index,
                node: BlockNode::Table(parse_table(table)),
            });
            found = true;
        }
        if !found {
            blocks.push(Block {
                index,
                node: BlockNode::Unknown,
            });
        }
    }

    blocks
}

fn parse_paragraph(paragraph: &Map<String, Value>) -> Paragraph {
    let mut elements = Vec::new();

    for (index, raw) in array_items(paragraph.get("elements")).enumerate() {
        let mut found = false;

        if let Some(content) = raw
            .get("textRun")
            .and_then(|run| run.get("content"))
            .and_then(Value::as_str)
        {
            elements.push(Inline {
                index,
                element: InlineElement::TextRun(TextRun {
                    content: content.to_string(),
                }),
            });
            found = true;
        }
        if let Some(props) = raw
            .get("richLink")
            .and_then(|link| link.get("richLinkProperties"))
            .and_then(Value::as_object)
        {
            elements.push(Inline {
                index,
                element: InlineElement::RichLink(RichLink {
                    title: string_field(props, "title"),
                    uri: string_field(props, "uri"),
                }),
            });
            found = true;
        }
        if !found {
            elements.push(Inline {
                index,
                element: InlineElement::Unknown,
            });
        }
    }

    Paragraph {
        paragraph_id: string_field(paragraph, "paragraphId"),
        elements,
    }
}

fn parse_table(table: &Map<String, Value>) -> Table {
    Table {
        rows: array_items(table.get("tableRows"))
            .map(|row| TableRow {
                cells: array_items(row.get("tableCells"))
                    .map(|cell| TableCell {
                        content: parse_block_list(cell.get("content")),
                    })
                    .collect(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Shape helpers
// ---------------------------------------------------------------------------

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Items of `value` when it is an array; nothing otherwise.
fn array_items(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|items| items.iter())
}

/// `(key, parsed)` pairs of `value` when it is an object, in input order.
/// Entries that `parse` rejects are dropped.
fn object_entries<T>(value: Option<&Value>, parse: impl Fn(&Value) -> Option<T>) -> Vec<(String, T)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter())
        .filter_map(|(key, raw)| parse(raw).map(|parsed| (key.clone(), parsed)))
        .collect()
}
