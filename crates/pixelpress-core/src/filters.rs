//! Filter composition.
//!
//! Turns a [`FilterState`] into a [`FilterChain`]: an ordered list of tagged
//! effect descriptors that a drawing surface applies while drawing. The chain
//! is data rather than text, so each backend decides how to realize it; the
//! canvas backend renders it with [`FilterChain::to_css`], the raster backend
//! evaluates it with [`crate::adjustments::apply_filter_chain`].
//!
//! ## Effect Order
//! 1. Brightness
//! 2. Contrast
//! 3. Grayscale
//! 4. Blur
//!
//! The order is fixed and does not depend on which slider moved last.
//! Rotation is not a filter; the renderer applies it as a transform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FilterState;

/// Kind of a single filter effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Brightness,
    Contrast,
    Grayscale,
    Blur,
}

impl FilterKind {
    /// Composition order of the chain.
    pub const ORDER: [FilterKind; 4] = [
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::Grayscale,
        FilterKind::Blur,
    ];

    /// CSS filter function name.
    pub fn css_name(self) -> &'static str {
        match self {
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Blur => "blur",
        }
    }

    pub fn unit(self) -> FilterUnit {
        match self {
            FilterKind::Blur => FilterUnit::Pixels,
            _ => FilterUnit::Percent,
        }
    }

    /// Amount at which the effect leaves pixels untouched.
    pub fn neutral_amount(self) -> f64 {
        match self {
            FilterKind::Brightness | FilterKind::Contrast => 100.0,
            FilterKind::Grayscale | FilterKind::Blur => 0.0,
        }
    }
}

/// Unit an effect amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterUnit {
    Percent,
    Pixels,
}

impl FilterUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            FilterUnit::Percent => "%",
            FilterUnit::Pixels => "px",
        }
    }
}

/// One effect in a chain: a kind plus its magnitude in the kind's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterEffect {
    pub kind: FilterKind,
    pub amount: f64,
}

impl FilterEffect {
    pub fn new(kind: FilterKind, amount: f64) -> Self {
        Self { kind, amount }
    }

    pub fn unit(&self) -> FilterUnit {
        self.kind.unit()
    }

    /// Amount as a fraction for percent effects (150% -> 1.5); pixels are returned as-is.
    pub fn factor(&self) -> f64 {
        match self.unit() {
            FilterUnit::Percent => self.amount / 100.0,
            FilterUnit::Pixels => self.amount,
        }
    }

    /// Check if this effect leaves pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.amount == self.kind.neutral_amount()
    }

    /// Render as a CSS filter function, e.g. `brightness(150%)`.
    pub fn to_css(&self) -> String {
        format!("{}({}{})", self.kind.css_name(), self.amount, self.unit().suffix())
    }
}

/// Ordered list of effects applied in a single render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterChain {
    effects: Vec<FilterEffect>,
}

impl FilterChain {
    /// A chain with no effects.
    pub fn none() -> Self {
        Self::default()
    }

    /// Compose the chain for a filter state, in [`FilterKind::ORDER`].
    pub fn from_state(state: &FilterState) -> Self {
        let effects = FilterKind::ORDER
            .into_iter()
            .map(|kind| {
                let amount = match kind {
                    FilterKind::Brightness => state.brightness(),
                    FilterKind::Contrast => state.contrast(),
                    FilterKind::Grayscale => state.grayscale(),
                    FilterKind::Blur => state.blur(),
                };
                FilterEffect::new(kind, amount)
            })
            .collect();
        Self { effects }
    }

    pub fn effects(&self) -> &[FilterEffect] {
        &self.effects
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Check if applying the chain would leave pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.effects.iter().all(FilterEffect::is_identity)
    }

    /// Render as a canvas `filter` value.
    ///
    /// An empty chain renders as `none`.
    pub fn to_css(&self) -> String {
        if self.effects.is_empty() {
            return "none".to_string();
        }
        self.effects
            .iter()
            .map(FilterEffect::to_css)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterParam;

    #[test]
    fn test_chain_order() {
        let chain = FilterChain::from_state(&FilterState::initial());
        let kinds: Vec<FilterKind> = chain.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, FilterKind::ORDER.to_vec());
    }

    #[test]
    fn test_css_for_initial_state() {
        let chain = FilterChain::from_state(&FilterState::initial());
        assert_eq!(
            chain.to_css(),
            "brightness(50%) contrast(100%) grayscale(0%) blur(0px)"
        );
    }

    #[test]
    fn test_css_for_brightness_150() {
        let state = FilterState::post_export().with(FilterParam::Brightness, 150.0);
        assert_eq!(
            FilterChain::from_state(&state).to_string(),
            "brightness(150%) contrast(100%) grayscale(0%) blur(0px)"
        );
    }

    #[test]
    fn test_css_fractional_amounts() {
        let state = FilterState::new(100.0, 100.0, 12.5, 2.5, 0.0);
        assert_eq!(
            FilterChain::from_state(&state).to_css(),
            "brightness(100%) contrast(100%) grayscale(12.5%) blur(2.5px)"
        );
    }

    #[test]
    fn test_rotation_not_in_chain() {
        let state = FilterState::post_export().with(FilterParam::Rotate, 90.0);
        let chain = FilterChain::from_state(&state);
        assert_eq!(chain.len(), 4);
        assert!(chain.is_identity());
        assert!(!chain.to_css().contains("rotate"));
    }

    #[test]
    fn test_identity_detection() {
        assert!(FilterChain::from_state(&FilterState::post_export()).is_identity());
        // Initial brightness of 50% is not neutral
        assert!(!FilterChain::from_state(&FilterState::initial()).is_identity());
    }

    #[test]
    fn test_effect_factor_and_units() {
        let brightness = FilterEffect::new(FilterKind::Brightness, 150.0);
        assert_eq!(brightness.factor(), 1.5);
        assert_eq!(brightness.unit(), FilterUnit::Percent);

        let blur = FilterEffect::new(FilterKind::Blur, 3.0);
        assert_eq!(blur.factor(), 3.0);
        assert_eq!(blur.to_css(), "blur(3px)");
    }

    #[test]
    fn test_empty_chain_css() {
        let chain = FilterChain::none();
        assert!(chain.is_empty());
        assert!(chain.is_identity());
        assert_eq!(chain.to_css(), "none");
    }
}
