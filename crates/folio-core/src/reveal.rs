#![forbid(unsafe_code)]

//! One-shot reveal of the skill bars.
//!
//! # Invariants
//!
//! 1. The animation fires at most once per [`RevealAnimator`].
//! 2. Bar `i` is delayed by exactly `i * stagger_step`, counting bars that
//!    were skipped for a missing width.
//! 3. Observation stops on the same update that fires the animation.

use std::time::Duration;

use crate::config::RevealConfig;
use crate::effect::Effect;
use crate::layout::{NodeRef, PageLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting for the skills section to become visible.
    Armed,
    /// Animation applied; no longer observing.
    Fired,
    /// Skills section or bars missing.
    Disabled,
}

/// Parse a bar's `data-width` attribute into a percentage.
///
/// Missing, empty, negative or non-numeric values yield `None`.
#[must_use]
pub fn parse_width(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Linear stagger: `index * step`, saturating.
#[must_use]
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone)]
pub struct RevealAnimator {
    phase: RevealPhase,
    bars: Vec<Option<f64>>,
    config: RevealConfig,
}

impl RevealAnimator {
    #[must_use]
    pub fn new(layout: &PageLayout, config: &RevealConfig) -> Self {
        let phase = if layout.skills_section && !layout.skill_bars.is_empty() {
            crate::debug!(bars = layout.skill_bars.len(), "skills section and bars found");
            RevealPhase::Armed
        } else {
            crate::error!("skills section or bars not found");
            RevealPhase::Disabled
        };
        Self {
            phase,
            bars: layout
                .skill_bars
                .iter()
                .map(|raw| parse_width(raw.as_deref()))
                .collect(),
            config: config.clone(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Effects to run at mount: start observing when armed.
    #[must_use]
    pub fn mount(&self) -> Vec<Effect> {
        match self.phase {
            RevealPhase::Armed => vec![Effect::ObserveVisibility {
                node: NodeRef::SkillsSection,
                threshold: self.config.visibility_threshold,
            }],
            RevealPhase::Fired | RevealPhase::Disabled => Vec::new(),
        }
    }

    /// Visibility callback for the skills section.
    pub fn on_visible(&mut self, intersecting: bool) -> Vec<Effect> {
        if !intersecting || self.phase != RevealPhase::Armed {
            return Vec::new();
        }
        crate::info!("skills section in view, animating");

        let step = self.config.stagger_step();
        let mut effects: Vec<Effect> = self
            .bars
            .iter()
            .enumerate()
            .filter_map(|(index, width)| {
                let Some(percent) = *width else {
                    crate::warn!(index, "skill bar has no usable data-width");
                    return None;
                };
                Some(Effect::SetBarWidth {
                    index,
                    percent,
                    delay: stagger_delay(index, step),
                })
            })
            .collect();
        effects.push(Effect::StopObserving {
            node: NodeRef::SkillsSection,
        });
        self.phase = RevealPhase::Fired;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn layout(bars: &[Option<&str>]) -> PageLayout {
        PageLayout {
            skills_section: true,
            skill_bars: bars.iter().map(|b| b.map(str::to_owned)).collect(),
            ..PageLayout::default()
        }
    }

    #[test]
    fn parse_width_accepts_numbers_only() {
        assert_eq!(parse_width(Some("75")), Some(75.0));
        assert_eq!(parse_width(Some(" 62.5 ")), Some(62.5));
        assert_eq!(parse_width(Some("0")), Some(0.0));
        assert_eq!(parse_width(Some("")), None);
        assert_eq!(parse_width(Some("wide")), None);
        assert_eq!(parse_width(Some("-5")), None);
        assert_eq!(parse_width(Some("NaN")), None);
        assert_eq!(parse_width(None), None);
    }

    #[test]
    fn stagger_is_linear() {
        let step = Duration::from_millis(100);
        assert_eq!(stagger_delay(0, step), Duration::ZERO);
        assert_eq!(stagger_delay(3, step), Duration::from_millis(300));
        assert_eq!(stagger_delay(usize::MAX, Duration::MAX), Duration::MAX);
    }

    #[test]
    fn mount_observes_with_threshold() {
        let r = RevealAnimator::new(&layout(&[Some("50")]), &RevealConfig::default());
        assert_eq!(
            r.mount(),
            vec![Effect::ObserveVisibility {
                node: NodeRef::SkillsSection,
                threshold: 0.2,
            }]
        );
    }

    #[test]
    fn fires_once_with_staggered_delays() {
        let mut r = RevealAnimator::new(
            &layout(&[Some("90"), None, Some("75")]),
            &RevealConfig::default(),
        );
        let effects = r.on_visible(true);
        assert_eq!(
            effects,
            vec![
                Effect::SetBarWidth {
                    index: 0,
                    percent: 90.0,
                    delay: Duration::ZERO,
                },
                Effect::SetBarWidth {
                    index: 2,
                    percent: 75.0,
                    delay: Duration::from_millis(200),
                },
                Effect::StopObserving {
                    node: NodeRef::SkillsSection
                },
            ]
        );
        assert_eq!(r.phase(), RevealPhase::Fired);
        assert!(r.on_visible(true).is_empty());
        assert!(r.mount().is_empty());
    }

    #[test]
    fn not_intersecting_keeps_armed() {
        let mut r = RevealAnimator::new(&layout(&[Some("10")]), &RevealConfig::default());
        assert!(r.on_visible(false).is_empty());
        assert_eq!(r.phase(), RevealPhase::Armed);
    }

    #[test]
    fn missing_section_or_bars_disables() {
        let no_bars = RevealAnimator::new(&layout(&[]), &RevealConfig::default());
        assert_eq!(no_bars.phase(), RevealPhase::Disabled);

        let mut no_section = RevealAnimator::new(
            &PageLayout {
                skills_section: false,
                ..layout(&[Some("10")])
            },
            &RevealConfig::default(),
        );
        assert!(no_section.mount().is_empty());
        assert!(no_section.on_visible(true).is_empty());
    }
}
