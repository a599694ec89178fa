//! Recovery of tables the page ships inside HTML comments.
//!
//! Sports-reference pages emit most secondary tables as `<!-- <div><table ...`
//! blocks that a script un-comments in the browser. Each such comment is
//! re-parsed as its own document and its tables join the candidate pool.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static SELECTOR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("Invalid table selector"));

const TABLE_OPEN: &str = "<table";

/// Sub-documents parsed from table-bearing comments, in document order.
pub struct CommentTables {
    docs: Vec<Html>,
}

impl CommentTables {
    /// Walk every comment node depth-first and re-parse the ones that
    /// contain a table opening tag. Anything else is skipped unparsed.
    pub fn recover(doc: &Html) -> Self {
        let docs: Vec<Html> = doc
            .tree
            .root()
            .descendants()
            .filter_map(|node| node.value().as_comment())
            .map(|comment| &**comment)
            .filter(|text| text.contains(TABLE_OPEN))
            .map(Html::parse_document)
            .collect();

        let recovered = Self { docs };
        debug!(
            comments = recovered.docs.len(),
            tables = recovered.tables().count(),
            "recovered comment tables"
        );
        recovered
    }

    /// Every recovered table; comment order first, then sub-document order.
    pub fn tables(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.docs.iter().flat_map(|d| d.select(&SELECTOR_TABLE))
    }

    pub fn is_empty(&self) -> bool {
        self.tables().next().is_none()
    }
}
