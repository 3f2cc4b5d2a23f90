//! The one-shot augmentation pipeline: stylesheet, navigation, decoration,
//! then the fragment splice. Each step runs exactly once per invocation.

use crate::assemble::{self, TargetContainer};
use crate::decor::{self, RevealTracker};
use crate::nav::IndicatorSet;
use crate::page::DeckPage;
use crate::styles;
use deckweave_splice::{FragmentFetcher, roadmap_rules};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{error, info, warn};

/// Options for one augmentation run.
pub struct AugmentOptions {
    pub fragment_url: String,
    pub timeout_secs: u64,
    /// Fixed seed for the particle draw; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl AugmentOptions {
    pub fn new(fragment_url: impl Into<String>) -> Self {
        Self {
            fragment_url: fragment_url.into(),
            timeout_secs: 10,
            seed: None,
        }
    }
}

/// How the fragment splice ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpliceOutcome {
    /// Fragment fetched, extracted, and spliced in.
    Loaded,
    /// Fetch or parse failed; the error state was spliced in instead.
    Error { message: String },
    /// The deck has no target container; the splice did not run.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockOutcome {
    pub label: String,
    pub found: bool,
}

/// Machine-readable report of one augmentation run.
#[derive(Debug, Clone, Serialize)]
pub struct SpliceSummary {
    pub slide_count: usize,
    pub target_found: bool,
    pub outcome: SpliceOutcome,
    pub blocks: Vec<BlockOutcome>,
    pub styles_injected: usize,
    pub animatable_marked: usize,
    pub particle_hosts: usize,
}

/// Augment a deck document. Always returns an output page: a failed fetch
/// lands in the target's error state, and a missing target skips only the
/// splice. Only the caller's IO can fail around this.
pub async fn augment(deck_html: &str, options: &AugmentOptions) -> (String, SpliceSummary) {
    let mut page = DeckPage::parse(deck_html);
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut tracker = RevealTracker::new();

    page.inject_style(styles::INJECTED_STYLESHEET);

    let slide_count = page.slide_count();
    let indicators = IndicatorSet::new(slide_count);
    page.append_body(&indicators.render(&page.slide_anchors()));
    info!("Navigation rendered for {} slides", slide_count);

    let animatable_marked = page.mark_animatable(decor::ANIMATABLE_SELECTORS, &mut tracker);
    let particle_hosts = page.populate_particle_hosts(&mut rng);

    let mut summary = SpliceSummary {
        slide_count,
        target_found: page.has_target(),
        outcome: SpliceOutcome::Skipped,
        blocks: Vec::new(),
        styles_injected: 0,
        animatable_marked,
        particle_hosts,
    };

    if !summary.target_found {
        warn!("Target container not found in deck, skipping fragment splice");
        return (page.into_html(), summary);
    }

    let mut target = TargetContainer::new(options.fragment_url.clone());
    let rules = roadmap_rules();
    let fetcher = FragmentFetcher::with_timeout(options.timeout_secs);

    match fetcher.load(&options.fragment_url, &rules).await {
        Ok(fragment) => {
            for style in &fragment.styles {
                page.inject_style(style);
            }
            summary.styles_injected = fragment.styles.len();
            summary.blocks = rules
                .iter()
                .map(|rule| BlockOutcome {
                    label: rule.label.clone(),
                    found: fragment.block(&rule.label).is_some(),
                })
                .collect();

            let particles = decor::particle_batch(&mut rng);
            target.complete(assemble::render_section_inner(&fragment, &particles));
            summary.outcome = SpliceOutcome::Loaded;
            info!("Roadmap content spliced into target container");
        }
        Err(e) => {
            error!("Error loading roadmap content: {}", e);
            target.fail(e.to_string());
            summary.outcome = SpliceOutcome::Error {
                message: e.to_string(),
            };
        }
    }

    page.replace_target_contents(&target.render());
    (page.into_html(), summary)
}
