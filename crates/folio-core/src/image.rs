#![forbid(unsafe_code)]

//! Placeholder substitution for images that fail to load.
//!
//! Only images present at mount are covered.

use crate::config::ImageFallbackConfig;
use crate::effect::Effect;

#[derive(Debug, Clone)]
pub struct ImageFallback {
    config: ImageFallbackConfig,
    /// Whether each image has been pointed at the placeholder.
    replaced: Vec<bool>,
}

impl ImageFallback {
    #[must_use]
    pub fn new(images: usize, config: &ImageFallbackConfig) -> Self {
        Self {
            config: config.clone(),
            replaced: vec![false; images],
        }
    }

    #[must_use]
    pub fn is_replaced(&self, index: usize) -> bool {
        self.replaced.get(index).copied().unwrap_or(false)
    }

    /// Image `index` failed to load `src`.
    pub fn on_error(&mut self, index: usize, src: &str) -> Vec<Effect> {
        let Some(replaced) = self.replaced.get_mut(index) else {
            crate::debug!(index, "error from an image not present at mount");
            return Vec::new();
        };
        if src == self.config.placeholder_src {
            // Re-setting the same src would re-fire the error.
            crate::warn!(index, %src, "placeholder image failed to load");
            return Vec::new();
        }
        *replaced = true;
        vec![Effect::SetImage {
            index,
            src: self.config.placeholder_src.clone(),
            alt: self.config.fallback_alt.clone(),
        }]
    }
}
