use crate::error::{Result, SpliceError};
use crate::fragment::{ExtractedBlock, Fragment};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// How to locate one named subtree inside the fragment's content root.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// First element matching a CSS selector.
    Css(String),
    /// A `.card` whose own `h2` text, or whose previous sibling's text,
    /// equals the given heading.
    CardWithHeading(String),
    /// An `h2` whose visible text equals the given heading.
    HeadingText(String),
    /// First element matching the selector, but only when an `h2` with the
    /// given text exists in the content root.
    AfterHeading { heading: String, selector: String },
}

/// One entry of the extraction contract: a label for reporting plus the
/// matcher that locates the subtree. Rules are evaluated in list order and a
/// rule that matches nothing is skipped without error.
#[derive(Debug, Clone)]
pub struct ExtractRule {
    pub label: String,
    pub matcher: Matcher,
}

impl ExtractRule {
    pub fn new(label: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            label: label.into(),
            matcher,
        }
    }
}

/// The extraction contract for the roadmap fragment, in splice order.
pub fn roadmap_rules() -> Vec<ExtractRule> {
    vec![
        ExtractRule::new(
            "capabilities",
            Matcher::CardWithHeading("Current Capabilities".to_string()),
        ),
        ExtractRule::new("legend", Matcher::Css(".key".to_string())),
        ExtractRule::new(
            "roadmap-heading",
            Matcher::HeadingText("Development Roadmap".to_string()),
        ),
        ExtractRule::new(
            "roadmap-body",
            Matcher::AfterHeading {
                heading: "Development Roadmap".to_string(),
                selector: ".roadmap-container".to_string(),
            },
        ),
    ]
}

/// Locate the fragment's main content root.
pub fn content_root(doc: &Html) -> Result<ElementRef<'_>> {
    let selector = Selector::parse(".container").unwrap();
    doc.select(&selector).next().ok_or_else(|| {
        SpliceError::MalformedFragment("content root (.container) not found".to_string())
    })
}

/// Run the extraction rules against a parsed fragment document.
///
/// Matched subtrees are deep-cloned by serialization, so the returned
/// `Fragment` holds no references into `doc`. Rules that match nothing are
/// recorded as missing and logged, never raised as errors.
pub fn extract(doc: &Html, source_url: &str, rules: &[ExtractRule]) -> Result<Fragment> {
    let root = content_root(doc)?;
    let mut fragment = Fragment::new(source_url.to_string());
    fragment.styles = head_styles(doc);

    for rule in rules {
        match locate(root, &rule.matcher) {
            Some(element) => {
                debug!("Extracted '{}' block from fragment", rule.label);
                fragment.blocks.push(ExtractedBlock {
                    label: rule.label.clone(),
                    html: element.html(),
                });
            }
            None => {
                warn!("Fragment block '{}' not found, skipping", rule.label);
                fragment.missing.push(rule.label.clone());
            }
        }
    }

    Ok(fragment)
}

/// Collect the text of every inline `<style>` element in the document.
pub fn head_styles(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("style").unwrap();
    doc.select(&selector)
        .map(|style| style.text().collect::<String>())
        .collect()
}

fn locate<'a>(root: ElementRef<'a>, matcher: &Matcher) -> Option<ElementRef<'a>> {
    match matcher {
        Matcher::Css(css) => {
            let Ok(selector) = Selector::parse(css) else {
                warn!("Unparseable selector '{}', treating as no match", css);
                return None;
            };
            root.select(&selector).next()
        }
        Matcher::CardWithHeading(heading) => {
            let cards = Selector::parse(".card").unwrap();
            let h2 = Selector::parse("h2").unwrap();
            root.select(&cards).find(|card| {
                let own_heading = card
                    .select(&h2)
                    .next()
                    .is_some_and(|el| element_text(el) == *heading);
                own_heading || previous_sibling_text(*card).as_deref() == Some(heading)
            })
        }
        Matcher::HeadingText(heading) => {
            let h2 = Selector::parse("h2").unwrap();
            root.select(&h2).find(|el| element_text(*el) == *heading)
        }
        Matcher::AfterHeading { heading, selector } => {
            locate(root, &Matcher::HeadingText(heading.clone()))?;
            locate(root, &Matcher::Css(selector.clone()))
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn previous_sibling_text(element: ElementRef<'_>) -> Option<String> {
    element
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .map(element_text)
}
