//! Stylesheet rules injected into the deck head: navigation, reveal
//! animation, hover lift, smooth scrolling, and the loading spinner.

pub const INJECTED_STYLESHEET: &str = r#"
    /* Smooth anchor scrolling for the navigation dots */
    html {
        scroll-behavior: smooth;
    }

    /* Navigation styles */
    .navigation {
        position: fixed;
        right: 20px;
        top: 50%;
        transform: translateY(-50%);
        display: flex;
        flex-direction: column;
        gap: 15px;
        z-index: 1000;
    }

    .nav-dot {
        width: 12px;
        height: 12px;
        border-radius: 50%;
        background-color: rgba(255, 255, 255, 0.3);
        cursor: pointer;
        transition: all 0.3s ease;
    }

    .nav-dot.active {
        background-color: var(--secondary);
        box-shadow: 0 0 10px var(--secondary);
        transform: scale(1.2);
    }

    /* Card hover lift */
    .card:hover,
    .business-card:hover {
        transform: translateY(-5px);
        box-shadow: 0 15px 30px rgba(0, 0, 0, 0.15), 0 0 10px rgba(58, 1, 223, 0.2);
    }

    /* Animation styles */
    .animatable {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.8s ease, transform 0.8s ease;
    }

    .animate {
        opacity: 1;
        transform: translateY(0);
    }

    /* Staggered animations */
    .card.animate:nth-child(1) { transition-delay: 0.1s; }
    .card.animate:nth-child(2) { transition-delay: 0.2s; }
    .card.animate:nth-child(3) { transition-delay: 0.3s; }
    .card.animate:nth-child(4) { transition-delay: 0.4s; }

    /* Loading spinner */
    .loading-spinner {
        width: 50px;
        height: 50px;
        border: 3px solid rgba(0, 229, 255, 0.3);
        border-radius: 50%;
        border-top-color: var(--secondary);
        animation: spin 1s infinite linear;
    }

    @keyframes spin {
        0% { transform: rotate(0deg); }
        100% { transform: rotate(360deg); }
    }
"#;

/// Wrap raw CSS in a style element for head injection.
pub fn style_block(css: &str) -> String {
    format!("<style>{}</style>", css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_covers_every_injected_concern() {
        for rule in [".navigation", ".nav-dot.active", ".animatable", ".animate", ".loading-spinner", "@keyframes spin", "scroll-behavior"] {
            assert!(INJECTED_STYLESHEET.contains(rule), "missing rule: {}", rule);
        }
    }

    #[test]
    fn style_block_wraps_css() {
        assert_eq!(style_block("a { b: c; }"), "<style>a { b: c; }</style>");
    }
}
