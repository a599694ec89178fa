//! Table lookup across visible and comment-hidden tables.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use super::cleaner::normalize_text;
use super::comments::CommentTables;

static SELECTOR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("Invalid table selector"));

static PLAYOFFS_GROUPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)playoffs?").expect("Invalid playoffs pattern"));

/// Ordered resolution of the postseason passing table, whose id has
/// changed across page templates. First matching rule wins.
const PLAYOFF_PASSING_RULES: &[TableRule] = &[
    TableRule::ExactId("passing_playoffs"),
    TableRule::IdContains("passing_playoffs"),
    TableRule::IdContains("passing_post"),
    TableRule::PlayoffsGrouping,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRule {
    /// `table#<id>`, visible tables before comment tables.
    ExactId(&'static str),
    /// Lower-cased `id` attribute contains the fragment.
    IdContains(&'static str),
    /// `data-table` grouping attribute mentions playoffs.
    PlayoffsGrouping,
}

/// Every table on the page: visible ones first, then the recovered ones.
pub struct TableSet<'a> {
    doc: &'a Html,
    visible: Vec<ElementRef<'a>>,
    hidden: Vec<ElementRef<'a>>,
}

impl<'a> TableSet<'a> {
    pub fn new(doc: &'a Html, comments: &'a CommentTables) -> Self {
        Self {
            doc,
            visible: doc.select(&SELECTOR_TABLE).collect(),
            hidden: comments.tables().collect(),
        }
    }

    /// Combined candidate pool, visible tables first.
    pub fn all(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.visible.iter().chain(self.hidden.iter()).copied()
    }

    /// First element matching `selector` in the live document, else the
    /// first recovered comment table matching it.
    pub fn find(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.doc
            .select(selector)
            .next()
            .or_else(|| self.hidden.iter().copied().find(|t| selector.matches(t)))
    }

    /// Exact `table#<id>` lookup.
    pub fn find_by_id(&self, id: &str) -> Option<ElementRef<'a>> {
        self.all().find(|t| t.value().id() == Some(id))
    }

    pub fn find_by_id_contains(&self, fragment: &str) -> Option<ElementRef<'a>> {
        let fragment = fragment.to_lowercase();
        self.all().find(|t| {
            t.value()
                .id()
                .is_some_and(|id| id.to_lowercase().contains(&fragment))
        })
    }

    pub fn resolve(&self, rule: TableRule) -> Option<ElementRef<'a>> {
        match rule {
            TableRule::ExactId(id) => self.find_by_id(id),
            TableRule::IdContains(fragment) => self.find_by_id_contains(fragment),
            TableRule::PlayoffsGrouping => self.all().find(|t| {
                let grouping = normalize_text(t.value().attr("data-table").unwrap_or_default());
                PLAYOFFS_GROUPING.is_match(&grouping)
            }),
        }
    }

    /// Walk `rules` in order and return the first table any rule finds.
    pub fn resolve_first(&self, rules: &[TableRule]) -> Option<ElementRef<'a>> {
        rules.iter().find_map(|&rule| {
            let found = self.resolve(rule);
            if found.is_some() {
                debug!(?rule, "table resolved");
            }
            found
        })
    }

    /// Postseason passing table, tolerant of current and legacy ids.
    pub fn playoff_passing(&self) -> Option<ElementRef<'a>> {
        self.resolve_first(PLAYOFF_PASSING_RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(table: Option<ElementRef<'_>>) -> Option<String> {
        table.and_then(|t| t.value().attr("data-marker").map(str::to_string))
    }

    #[test]
    fn test_visible_table_preferred_over_comment_copy() {
        let doc = Html::parse_document(
            r#"<body>
            <!-- <table id="passing" data-marker="hidden"></table> -->
            <table id="passing" data-marker="visible"></table>
            </body>"#,
        );
        let comments = CommentTables::recover(&doc);
        let tables = TableSet::new(&doc, &comments);
        let sel = Selector::parse("table#passing").unwrap();

        assert_eq!(marker(tables.find(&sel)), Some("visible".into()));
        assert_eq!(marker(tables.find_by_id("passing")), Some("visible".into()));
    }

    #[test]
    fn test_find_falls_back_to_comment_table() {
        let doc = Html::parse_document(
            r#"<body><div><!-- <table id="passing_playoffs" data-marker="hidden"></table> --></div></body>"#,
        );
        let comments = CommentTables::recover(&doc);
        let tables = TableSet::new(&doc, &comments);
        let sel = Selector::parse("table#passing_playoffs").unwrap();

        assert_eq!(marker(tables.find(&sel)), Some("hidden".into()));
        assert!(tables.find_by_id("rushing").is_none());
    }

    #[test]
    fn test_playoff_rules_in_order() {
        let doc = Html::parse_document(
            r#"<body>
            <table id="stats" data-table="Playoffs" data-marker="grouping"></table>
            <table id="old_passing_post" data-marker="legacy"></table>
            <!-- <table id="Passing_Playoffs_adv" data-marker="contains"></table> -->
            </body>"#,
        );
        let comments = CommentTables::recover(&doc);
        let tables = TableSet::new(&doc, &comments);

        // "passing_playoffs" substring beats the legacy and grouping rules
        assert_eq!(marker(tables.playoff_passing()), Some("contains".into()));
        assert_eq!(
            marker(tables.resolve(TableRule::IdContains("passing_post"))),
            Some("legacy".into())
        );
        assert_eq!(
            marker(tables.resolve(TableRule::PlayoffsGrouping)),
            Some("grouping".into())
        );
    }

    #[test]
    fn test_playoff_grouping_fallback() {
        let doc = Html::parse_document(
            r#"<body><table id="passing"></table><table id="x" data-table="  playoff  "></table></body>"#,
        );
        let comments = CommentTables::recover(&doc);
        let tables = TableSet::new(&doc, &comments);
        assert_eq!(
            tables.playoff_passing().and_then(|t| t.value().id()),
            Some("x")
        );
    }

    #[test]
    fn test_no_playoff_table() {
        let doc = Html::parse_document(r#"<body><table id="passing"></table></body>"#);
        let comments = CommentTables::recover(&doc);
        assert!(TableSet::new(&doc, &comments).playoff_passing().is_none());
    }
}
