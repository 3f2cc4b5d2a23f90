//! The deck document model. The page is parsed once and renormalized through
//! the same serializer that later produces patch needles, so every mutation
//! is an exact outer-HTML string replacement on the owned document text.

use crate::decor::{self, RevealTracker};
use crate::styles;
use rand::Rng;
use scraper::{Html, Selector};
use tracing::{debug, warn};

const SLIDE_SELECTOR: &str = ".slide";
const TARGET_SELECTOR: &str = "#roadmap-section";
const PARTICLE_HOST_SELECTOR: &str = ".particle-container";

pub struct DeckPage {
    html: String,
}

impl DeckPage {
    /// Parse and renormalize the deck source.
    pub fn parse(source: &str) -> Self {
        let doc = Html::parse_document(source);
        let html = format!("<!DOCTYPE html>\n{}", doc.root_element().html());
        Self { html }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn slide_count(&self) -> usize {
        let doc = Html::parse_document(&self.html);
        let selector = Selector::parse(SLIDE_SELECTOR).unwrap();
        doc.select(&selector).count()
    }

    /// Per-slide anchor ids, in scroll order. Slides without an id yield
    /// `None` and get a plain, non-linking indicator.
    pub fn slide_anchors(&self) -> Vec<Option<String>> {
        let doc = Html::parse_document(&self.html);
        let selector = Selector::parse(SLIDE_SELECTOR).unwrap();
        doc.select(&selector)
            .map(|slide| slide.value().id().map(str::to_string))
            .collect()
    }

    pub fn has_target(&self) -> bool {
        let doc = Html::parse_document(&self.html);
        let selector = Selector::parse(TARGET_SELECTOR).unwrap();
        doc.select(&selector).next().is_some()
    }

    /// Insert a stylesheet at the end of the head.
    pub fn inject_style(&mut self, css: &str) {
        let block = styles::style_block(css);
        match self.html.find("</head>") {
            Some(pos) => self.html.insert_str(pos, &block),
            None => {
                // Renormalized documents always carry a head; this is a
                // fallback for pathological input.
                self.html.insert_str(0, &block);
            }
        }
    }

    /// Append markup at the end of the body.
    pub fn append_body(&mut self, markup: &str) {
        match self.html.rfind("</body>") {
            Some(pos) => self.html.insert_str(pos, markup),
            None => self.html.push_str(markup),
        }
    }

    /// Replace the target section's contents, keeping the section element
    /// itself and all its attributes. Returns false when the deck has no
    /// target section.
    pub fn replace_target_contents(&mut self, inner: &str) -> bool {
        let (outer, closing) = {
            let doc = Html::parse_document(&self.html);
            let selector = Selector::parse(TARGET_SELECTOR).unwrap();
            let Some(section) = doc.select(&selector).next() else {
                return false;
            };
            (section.html(), format!("</{}>", section.value().name()))
        };

        let Some(open_end) = outer.find('>') else {
            return false;
        };
        let replacement = format!("{}{}{}", &outer[..=open_end], inner, closing);
        self.html = self.html.replacen(&outer, &replacement, 1);
        true
    }

    /// Add the `animatable` class to every element matching the given
    /// selectors. Elements matching several selectors are observed and
    /// marked once. Returns the number of distinct elements marked.
    ///
    /// Selector order must put containers before their descendants: patching
    /// a descendant first would invalidate the ancestor's needle.
    pub fn mark_animatable(&mut self, selectors: &[&str], tracker: &mut RevealTracker) -> usize {
        let mut needles = Vec::new();
        {
            let doc = Html::parse_document(&self.html);
            for css in selectors {
                let Ok(selector) = Selector::parse(css) else {
                    warn!("Unparseable animatable selector '{}'", css);
                    continue;
                };
                for element in doc.select(&selector) {
                    let outer = element.html();
                    if tracker.observe(&outer) {
                        needles.push(outer);
                    }
                }
            }
        }

        let mut marked = 0;
        for needle in needles {
            let patched = add_class(&needle, "animatable");
            if patched == needle {
                continue;
            }
            let next = self.html.replace(&needle, &patched);
            if next != self.html {
                self.html = next;
                marked += 1;
            }
        }
        debug!("Marked {} elements animatable", marked);
        marked
    }

    /// Fill every pre-existing particle host with its own freshly drawn
    /// batch. Returns the number of hosts populated.
    pub fn populate_particle_hosts<R: Rng>(&mut self, rng: &mut R) -> usize {
        let hosts: Vec<String> = {
            let doc = Html::parse_document(&self.html);
            let selector = Selector::parse(PARTICLE_HOST_SELECTOR).unwrap();
            doc.select(&selector).map(|host| host.html()).collect()
        };

        let mut populated = 0;
        for outer in hosts {
            let batch = decor::particle_batch(rng);
            let Some(filled) = insert_before_close(&outer, &decor::render_particles(&batch))
            else {
                continue;
            };
            // Identical empty hosts share one needle; each pass fills the
            // first still-empty occurrence.
            let next = self.html.replacen(&outer, &filled, 1);
            if next != self.html {
                self.html = next;
                populated += 1;
            }
        }
        debug!("Populated {} particle hosts", populated);
        populated
    }
}

/// Add a class to the element's opening tag, preserving existing classes.
fn add_class(outer: &str, class: &str) -> String {
    let Some(open_end) = outer.find('>') else {
        return outer.to_string();
    };
    let open = &outer[..open_end];

    if let Some(pos) = open.find("class=\"") {
        let value_start = pos + "class=\"".len();
        let Some(value_len) = open[value_start..].find('"') else {
            return outer.to_string();
        };
        let value = &open[value_start..value_start + value_len];
        if value.split_whitespace().any(|c| c == class) {
            return outer.to_string();
        }
        let insert_at = value_start + value_len;
        format!("{} {}{}", &outer[..insert_at], class, &outer[insert_at..])
    } else {
        format!("{} class=\"{}\"{}", open, class, &outer[open_end..])
    }
}

/// Insert markup just before the element's closing tag.
fn insert_before_close(outer: &str, markup: &str) -> Option<String> {
    let close = outer.rfind("</")?;
    Some(format!("{}{}{}", &outer[..close], markup, &outer[close..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DECK: &str = r#"<html>
        <head><title>Deck</title></head>
        <body>
            <section class="slide" id="intro">
                <div class="card"><h2>Alpha</h2></div>
                <div class="particle-container"></div>
            </section>
            <section class="slide">
                <div class="particle-container"></div>
            </section>
            <section class="slide" id="roadmap-section">
                <div class="container"><p>placeholder</p></div>
            </section>
        </body>
    </html>"#;

    #[test]
    fn counts_slides_and_anchors() {
        let page = DeckPage::parse(DECK);
        assert_eq!(page.slide_count(), 3);
        let anchors = page.slide_anchors();
        assert_eq!(anchors[0].as_deref(), Some("intro"));
        assert_eq!(anchors[1], None);
        assert_eq!(anchors[2].as_deref(), Some("roadmap-section"));
    }

    #[test]
    fn style_injection_lands_inside_the_head() {
        let mut page = DeckPage::parse(DECK);
        page.inject_style(".x { color: red; }");
        let head_end = page.html().find("</head>").unwrap();
        let style_at = page.html().find("<style>.x").unwrap();
        assert!(style_at < head_end);
    }

    #[test]
    fn body_append_lands_inside_the_body() {
        let mut page = DeckPage::parse(DECK);
        page.append_body("<div class=\"navigation\"></div>");
        let body_end = page.html().rfind("</body>").unwrap();
        let nav_at = page.html().find("class=\"navigation\"").unwrap();
        assert!(nav_at < body_end);
    }

    #[test]
    fn target_replacement_preserves_the_section_tag() {
        let mut page = DeckPage::parse(DECK);
        assert!(page.has_target());
        assert!(page.replace_target_contents("<div class=\"container\">new</div>"));

        assert!(page.html().contains("id=\"roadmap-section\""));
        assert!(page.html().contains("new"));
        assert!(!page.html().contains("placeholder"));
        // Still exactly one target section.
        assert!(page.has_target());
    }

    #[test]
    fn replacement_reports_missing_target() {
        let mut page = DeckPage::parse("<html><body><p>no target</p></body></html>");
        assert!(!page.has_target());
        assert!(!page.replace_target_contents("x"));
    }

    #[test]
    fn animatable_marking_is_once_per_element() {
        let mut page = DeckPage::parse(DECK);
        let mut tracker = RevealTracker::new();
        let marked = page.mark_animatable(decor::ANIMATABLE_SELECTORS, &mut tracker);

        // One card and one h2.
        assert_eq!(marked, 2);
        assert!(page.html().contains("class=\"card animatable\""));
        assert!(page.html().contains("<h2 class=\"animatable\">Alpha</h2>"));

        // A second pass finds everything already marked.
        let again = page.mark_animatable(decor::ANIMATABLE_SELECTORS, &mut tracker);
        assert_eq!(again, 0);
    }

    #[test]
    fn element_matching_two_selectors_is_marked_once() {
        let html = r#"<html><body>
            <div class="card business-card"><p>both</p></div>
        </body></html>"#;
        let mut page = DeckPage::parse(html);
        let mut tracker = RevealTracker::new();
        let marked = page.mark_animatable(&[".card", ".business-card"], &mut tracker);
        assert_eq!(marked, 1);
        assert_eq!(page.html().matches("animatable").count(), 1);
    }

    #[test]
    fn each_particle_host_gets_its_own_batch() {
        let mut page = DeckPage::parse(DECK);
        let mut rng = StdRng::seed_from_u64(11);
        let populated = page.populate_particle_hosts(&mut rng);

        assert_eq!(populated, 2);
        assert_eq!(page.html().matches("class=\"particle\"").count(), 40);

        // Independent draws per host: the two rendered batches differ.
        let first = page.html().find("particle-container").unwrap();
        let second = page.html()[first + 1..]
            .find("particle-container")
            .unwrap();
        assert_ne!(
            &page.html()[first..first + 200],
            &page.html()[first + 1 + second..first + 1 + second + 200]
        );
    }

    #[test]
    fn add_class_handles_both_attribute_shapes() {
        assert_eq!(
            add_class("<h2>Title</h2>", "animatable"),
            "<h2 class=\"animatable\">Title</h2>"
        );
        assert_eq!(
            add_class("<div class=\"card\">x</div>", "animatable"),
            "<div class=\"card animatable\">x</div>"
        );
        // Already present: unchanged.
        let marked = "<div class=\"card animatable\">x</div>";
        assert_eq!(add_class(marked, "animatable"), marked);
    }
}
