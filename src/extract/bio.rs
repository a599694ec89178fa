//! `#meta` biography block: `<p><strong>Label:</strong> value ...</p>` runs.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::cleaner::{non_empty, normalize_text};

static SELECTOR_META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#meta").expect("Invalid meta selector"));
static SELECTOR_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("Invalid p selector"));
static SELECTOR_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#meta h1").expect("Invalid name selector"));

// "6-4, 225lb (193cm, 102kg)" up to the next paragraph separator
static HEIGHT_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d-\d,\s*\d+lb[^•]*").expect("Invalid height/weight pattern")
});

const PARAGRAPH_SEPARATOR: &str = " • ";
const HEIGHT_WEIGHT_LABEL: &str = "Height/Weight";

// ── MetaMap ───────────────────────────────────────────────────────────────────

/// Label → value pairs in first-seen order. Re-inserting a label replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaMap {
    entries: Vec<(String, String)>,
}

impl MetaMap {
    pub fn insert(&mut self, label: String, value: String) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Store the pending pair only when its value has visible text.
    fn flush(&mut self, label: Option<String>, raw_value: &str) {
        let Some(label) = label else { return };
        let value = normalize_text(raw_value);
        if !value.is_empty() {
            self.insert(label, value);
        }
    }
}

// ── Bio block ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct BioBlock {
    pub map: MetaMap,
    /// Every paragraph's text joined with " • ", for unlabeled fields.
    pub text: String,
}

impl BioBlock {
    pub fn extract(doc: &Html) -> Self {
        let Some(meta) = doc.select(&SELECTOR_META).next() else {
            return Self::default();
        };

        let mut map = MetaMap::default();
        let mut paragraphs = Vec::new();

        for p in meta.select(&SELECTOR_P) {
            scan_paragraph(p, &mut map);
            paragraphs.push(p.text().collect::<String>());
        }

        Self {
            map,
            text: normalize_text(&paragraphs.join(PARAGRAPH_SEPARATOR)),
        }
    }

    pub fn field(&self, label: &str) -> Option<String> {
        self.map.get(label).map(str::to_string)
    }

    /// Labeled "Height/Weight" if present, else the first height-weight
    /// looking run in the joined paragraph text.
    pub fn height_weight(&self) -> Option<String> {
        self.field(HEIGHT_WEIGHT_LABEL).or_else(|| {
            HEIGHT_WEIGHT
                .find(&self.text)
                .and_then(|m| non_empty(normalize_text(m.as_str())))
        })
    }
}

/// `#meta h1` text.
pub fn player_name(doc: &Html) -> Option<String> {
    doc.select(&SELECTOR_NAME)
        .next()
        .and_then(|h1| non_empty(normalize_text(&h1.text().collect::<String>())))
}

fn is_label(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "strong" | "b")
}

/// Split one paragraph's children on bold labels.
fn scan_paragraph(p: ElementRef<'_>, map: &mut MetaMap) {
    let mut label: Option<String> = None;
    let mut value = String::new();

    for child in p.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if is_label(&el) {
                map.flush(label.take(), &value);
                let text = normalize_text(&el.text().collect::<String>());
                label = Some(text.strip_suffix(':').unwrap_or(&text).to_string());
                value.clear();
            } else {
                value.extend(el.text());
            }
        } else if let Some(text) = child.value().as_text() {
            value.push_str(text);
        }
    }

    map.flush(label, &value);
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = r#"<html><body><div id="meta">
        <h1>
          <span>Tom   Brady</span>
        </h1>
        <p><strong>Thomas Edward Patrick Brady Jr.</strong></p>
        <p><strong>Position</strong>: QB&nbsp;&#9642;&nbsp; <strong>Throws:</strong> Right</p>
        <p><span>6-4</span>,&nbsp;<span>225lb</span>&nbsp;(193cm, 102kg)</p>
        <p><strong>Born:</strong> <span>August 3, 1977</span> in San Mateo, CA</p>
        <p><strong>College</strong>: <a href="/schools/michigan/">Michigan</a></p>
        <p><strong>Draft:</strong><strong>Weighted Career AV:</strong> 204</p>
    </div></body></html>"#;

    #[test]
    fn test_labels_split_on_strong_runs() {
        let bio = BioBlock::extract(&Html::parse_document(META));

        assert_eq!(bio.map.get("Position"), Some(": QB \u{25aa}"));
        assert_eq!(bio.map.get("Throws"), Some("Right"));
        assert_eq!(bio.map.get("Born"), Some("August 3, 1977 in San Mateo, CA"));
        assert_eq!(bio.map.get("College"), Some(": Michigan"));
        assert_eq!(bio.map.get("Weighted Career AV"), Some("204"));
    }

    #[test]
    fn test_label_without_value_is_dropped() {
        let bio = BioBlock::extract(&Html::parse_document(META));

        assert_eq!(bio.map.get("Draft"), None);
        assert_eq!(bio.map.get("Thomas Edward Patrick Brady Jr."), None);
        assert!(bio.map.iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_later_label_overwrites_in_place() {
        let html = r#"<div id="meta">
            <p><strong>Born:</strong> 1977</p>
            <p><strong>Throws:</strong> Right</p>
            <p><strong>Born:</strong> August 3, 1977</p>
        </div>"#;
        let bio = BioBlock::extract(&Html::parse_document(html));

        let labels: Vec<&str> = bio.map.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Born", "Throws"]);
        assert_eq!(bio.map.get("Born"), Some("August 3, 1977"));
    }

    #[test]
    fn test_height_weight_from_text_fallback() {
        let bio = BioBlock::extract(&Html::parse_document(META));
        assert_eq!(bio.height_weight().as_deref(), Some("6-4, 225lb (193cm, 102kg)"));
    }

    #[test]
    fn test_height_weight_prefers_label() {
        let html = r#"<div id="meta"><p><strong>Height/Weight:</strong> 6-2, 215lb</p>
            <p>6-5, 240lb</p></div>"#;
        let bio = BioBlock::extract(&Html::parse_document(html));
        assert_eq!(bio.height_weight().as_deref(), Some("6-2, 215lb"));
    }

    #[test]
    fn test_player_name() {
        assert_eq!(
            player_name(&Html::parse_document(META)).as_deref(),
            Some("Tom Brady")
        );
        assert_eq!(player_name(&Html::parse_document("<h1>Elsewhere</h1>")), None);
    }

    #[test]
    fn test_missing_meta_block() {
        let bio = BioBlock::extract(&Html::parse_document("<body><p>nothing</p></body>"));
        assert!(bio.map.is_empty());
        assert_eq!(bio.text, "");
        assert_eq!(bio.height_weight(), None);
    }
}
