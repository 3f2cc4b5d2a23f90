//! Slide navigation: the current-slide rule, bounded stepping, and the
//! indicator markup appended to the deck.

/// Vertical extent of one slide in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideGeometry {
    pub top: f64,
    pub height: f64,
}

/// Which slide is current for a given scroll offset.
///
/// A slide is current when the offset falls within
/// `[top - viewport/2, top + height - viewport/2)`. The first matching slide
/// wins and no match defaults to slide 0.
pub fn current_slide_index(slides: &[SlideGeometry], scroll: f64, viewport: f64) -> usize {
    let half = viewport / 2.0;
    for (index, slide) in slides.iter().enumerate() {
        let bottom = slide.top + slide.height;
        if scroll >= slide.top - half && scroll < bottom - half {
            return index;
        }
    }
    0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One indicator per slide with exactly one active at a time.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    count: usize,
    active: usize,
}

impl IndicatorSet {
    pub fn new(count: usize) -> Self {
        Self { count, active: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Activate the indicator at `index`. Out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.count {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Move to the adjacent slide if one exists in that direction. No
    /// wraparound at either end.
    pub fn step(&mut self, direction: Direction) -> usize {
        match direction {
            Direction::Forward => {
                if self.active + 1 < self.count {
                    self.active += 1;
                }
            }
            Direction::Backward => {
                if self.active > 0 {
                    self.active -= 1;
                }
            }
        }
        self.active
    }

    /// Sync the active indicator to a scroll position.
    pub fn track_scroll(&mut self, slides: &[SlideGeometry], scroll: f64, viewport: f64) -> usize {
        let index = current_slide_index(slides, scroll, viewport);
        self.activate(index);
        self.active
    }

    /// Render the navigation host: one dot per slide, the active one marked.
    /// Dots become anchors when the slide already carries an id, so smooth
    /// scrolling works without any script.
    pub fn render(&self, anchors: &[Option<String>]) -> String {
        let mut markup = String::from("<div class=\"navigation\">");
        for index in 0..self.count {
            let class = if index == self.active {
                "nav-dot active"
            } else {
                "nav-dot"
            };
            match anchors.get(index).and_then(|a| a.as_deref()) {
                Some(id) => {
                    markup.push_str(&format!(
                        "<a class=\"{}\" href=\"#{}\" aria-label=\"Slide {}\"></a>",
                        class,
                        id,
                        index + 1
                    ));
                }
                None => {
                    markup.push_str(&format!("<div class=\"{}\"></div>", class));
                }
            }
        }
        markup.push_str("</div>");
        markup
    }
}
