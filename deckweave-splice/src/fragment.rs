use serde::{Deserialize, Serialize};

/// One subtree pulled out of the fragment document. The HTML is a serialized
/// deep clone, so the block carries no references into the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedBlock {
    pub label: String,
    pub html: String,
}

/// The result of one fetch-and-extract pass over the fragment document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub source_url: String,
    /// Inline `<style>` texts from the fragment's head, in document order.
    pub styles: Vec<String>,
    /// Blocks found by the extraction rules, in rule order.
    pub blocks: Vec<ExtractedBlock>,
    /// Rule labels that matched nothing.
    pub missing: Vec<String>,
}

impl Fragment {
    pub fn new(source_url: String) -> Self {
        Self {
            source_url,
            styles: Vec::new(),
            blocks: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn block(&self, label: &str) -> Option<&ExtractedBlock> {
        self.blocks.iter().find(|b| b.label == label)
    }
}
