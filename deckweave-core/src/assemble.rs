//! Target container lifecycle and content assembly for the spliced section.

use crate::decor::{self, Particle};
use deckweave_splice::Fragment;

/// Fixed title of the rebuilt container. Never copied from the fragment.
pub const SECTION_TITLE: &str = "Current & Future Capabilities";

pub const CTA_TEXT: &str = "View Full Roadmap";

/// The three mutually exclusive contents the target container can show.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerState {
    Loading,
    Loaded { content: String },
    Error { message: String },
}

/// The page region the splice writes into. Starts in the loading state and
/// transitions exactly once to a terminal state; later transitions are
/// rejected so a terminal state can never be overwritten.
#[derive(Debug)]
pub struct TargetContainer {
    fallback_url: String,
    state: ContainerState,
}

impl TargetContainer {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            fallback_url: fallback_url.into(),
            state: ContainerState::Loading,
        }
    }

    pub fn state(&self) -> &ContainerState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, ContainerState::Loading)
    }

    pub fn complete(&mut self, content: String) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.state = ContainerState::Loaded { content };
        true
    }

    pub fn fail(&mut self, message: String) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.state = ContainerState::Error { message };
        true
    }

    /// Render the container's current content.
    pub fn render(&self) -> String {
        match &self.state {
            ContainerState::Loading => render_loading(),
            ContainerState::Loaded { content } => content.clone(),
            ContainerState::Error { message } => render_error(message, &self.fallback_url),
        }
    }
}

/// Build the decorated container from an extracted fragment: fresh section
/// title, the found blocks in rule order, then exactly one call-to-action
/// link back at the fragment document.
pub fn assemble_container(fragment: &Fragment) -> String {
    let mut container = String::from("<div class=\"container\">");
    container.push_str(&format!(
        "<div class=\"section-title\"><h2>{}</h2></div>",
        SECTION_TITLE
    ));

    for block in &fragment.blocks {
        container.push_str(&block.html);
    }

    container.push_str(&format!(
        "<div style=\"text-align: center; margin-top: 3rem;\">\
         <a href=\"{}\" class=\"btn\" target=\"_blank\" rel=\"noopener\">{}</a></div>",
        escape_attr(&fragment.source_url),
        CTA_TEXT
    ));
    container.push_str("</div>");
    container
}

/// The full inner content of the spliced section: scan-line marker, a
/// particle host populated with one batch, and the assembled container.
pub fn render_section_inner(fragment: &Fragment, particles: &[Particle]) -> String {
    format!(
        "<div class=\"scan-line\"></div><div class=\"particle-container\">{}</div>{}",
        decor::render_particles(particles),
        assemble_container(fragment)
    )
}

fn render_loading() -> String {
    "<div class=\"container\">\
     <div class=\"section-title\"><h2>Loading Roadmap...</h2></div>\
     <div style=\"display: flex; justify-content: center; margin: 2rem 0;\">\
     <div class=\"loading-spinner\"></div></div>\
     <p style=\"text-align: center;\">Please wait while we load the roadmap content...</p>\
     </div>"
        .to_string()
}

fn render_error(message: &str, fallback_url: &str) -> String {
    format!(
        "<div class=\"container\">\
         <div class=\"section-title\"><h2>Error Loading Roadmap</h2></div>\
         <p style=\"text-align: center;\">There was an error loading the roadmap content: {}</p>\
         <p style=\"text-align: center;\">Please <a href=\"{}\" target=\"_blank\" rel=\"noopener\">click here</a> \
         to view the roadmap directly.</p>\
         </div>",
        escape_html(message),
        escape_attr(fallback_url)
    )
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}
