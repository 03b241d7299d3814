#![forbid(unsafe_code)]

//! Transient notification panels.
//!
//! A notification is created hidden, slides in after a short delay, starts
//! leaving a fixed time after creation, and is removed once the exit
//! transition has had time to run. Every panel has its own timers; nothing
//! is queued or deduplicated.
//!
//! ```text
//! create ──enter_delay──▶ Visible
//!   └────────display────▶ Leaving ──exit──▶ removed
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ClassNames, NotificationConfig};
use crate::effect::Effect;
use crate::event::PageEvent;
use crate::layout::NodeRef;

/// Unique identifier for a notification panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// Timer a notification scheduled for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStage {
    Reveal,
    Dismiss,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Entering,
    Visible,
    Leaving,
}

/// Stylesheet for notification panels, keyed on the configured class names.
#[must_use]
pub fn stylesheet(classes: &ClassNames) -> String {
    let base = &classes.notification;
    let error = &classes.notification_error;
    let visible = &classes.notification_visible;
    format!(
        "
.{base} {{
    position: fixed;
    bottom: 20px;
    right: -300px;
    background-color: #FBBF24;
    color: #121A2D;
    padding: 15px 20px;
    border-radius: 5px;
    box-shadow: 0 2px 5px rgba(0, 0, 0, 0.2);
    z-index: 1000;
    font-family: 'Inter', sans-serif;
    font-size: 16px;
    max-width: 300px;
    transition: right 0.5s ease-in-out;
}}
.{base}.{error} {{
    background-color: #f44336;
    color: #FFFFFF;
}}
.{base}.{visible} {{
    right: 20px;
}}
"
    )
}

#[derive(Debug, Clone)]
pub struct Notifier {
    config: NotificationConfig,
    base_class: String,
    error_class: String,
    visible_class: String,
    next_id: u64,
    live: BTreeMap<NotificationId, NotificationPhase>,
}

impl Notifier {
    #[must_use]
    pub fn new(config: &NotificationConfig, classes: &ClassNames) -> Self {
        Self {
            config: config.clone(),
            base_class: classes.notification.clone(),
            error_class: classes.notification_error.clone(),
            visible_class: classes.notification_visible.clone(),
            next_id: 1,
            live: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn phase(&self, id: NotificationId) -> Option<NotificationPhase> {
        self.live.get(&id).copied()
    }

    /// Number of panels currently in the document.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn success(&mut self) -> Vec<Effect> {
        let message = self.config.success_message.clone();
        self.show(message, false)
    }

    pub fn failure(&mut self) -> Vec<Effect> {
        let message = self.config.failure_message.clone();
        self.show(message, true)
    }

    /// Create a panel and schedule its lifecycle.
    pub fn show(&mut self, message: impl Into<String>, is_error: bool) -> Vec<Effect> {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, NotificationPhase::Entering);

        let mut classes = vec![self.base_class.clone()];
        if is_error {
            classes.push(self.error_class.clone());
        }
        vec![
            Effect::CreateNotification {
                id,
                message: message.into(),
                classes,
            },
            Self::schedule(id, NotificationStage::Reveal, self.config.enter_delay()),
            Self::schedule(id, NotificationStage::Dismiss, self.config.display()),
        ]
    }

    pub fn on_timer(&mut self, id: NotificationId, stage: NotificationStage) -> Vec<Effect> {
        let Some(phase) = self.live.get_mut(&id) else {
            return Vec::new();
        };
        match (stage, *phase) {
            (NotificationStage::Reveal, NotificationPhase::Entering) => {
                *phase = NotificationPhase::Visible;
                vec![self.visible_class(id, true)]
            }
            (
                NotificationStage::Dismiss,
                NotificationPhase::Entering | NotificationPhase::Visible,
            ) => {
                *phase = NotificationPhase::Leaving;
                vec![
                    self.visible_class(id, false),
                    Self::schedule(id, NotificationStage::Remove, self.config.exit()),
                ]
            }
            (NotificationStage::Remove, NotificationPhase::Leaving) => {
                self.live.remove(&id);
                vec![Effect::RemoveNode {
                    node: NodeRef::Notification(id),
                }]
            }
            _ => Vec::new(),
        }
    }

    fn visible_class(&self, id: NotificationId, on: bool) -> Effect {
        Effect::SetClass {
            node: NodeRef::Notification(id),
            class: self.visible_class.clone(),
            on,
        }
    }

    fn schedule(id: NotificationId, stage: NotificationStage, after: std::time::Duration) -> Effect {
        Effect::Schedule {
            after,
            event: PageEvent::NotificationTimer { id, stage },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use pretty_assertions::assert_eq;

    fn notifier() -> Notifier {
        Notifier::new(&NotificationConfig::default(), &ClassNames::default())
    }

    #[test]
    fn show_creates_panel_and_schedules_timers() {
        let mut n = notifier();
        let effects = n.show("hello", false);
        let id = NotificationId(1);
        assert_eq!(
            effects,
            vec![
                Effect::CreateNotification {
                    id,
                    message: "hello".into(),
                    classes: vec!["notification".into()],
                },
                Effect::Schedule {
                    after: Duration::from_millis(10),
                    event: PageEvent::NotificationTimer {
                        id,
                        stage: NotificationStage::Reveal
                    },
                },
                Effect::Schedule {
                    after: Duration::from_millis(4000),
                    event: PageEvent::NotificationTimer {
                        id,
                        stage: NotificationStage::Dismiss
                    },
                },
            ]
        );
        assert_eq!(n.phase(id), Some(NotificationPhase::Entering));
    }

    #[test]
    fn error_panel_carries_error_class() {
        let mut n = notifier();
        let effects = n.failure();
        let Effect::CreateNotification {
            message, classes, ..
        } = &effects[0]
        else {
            panic!("expected CreateNotification, got {:?}", effects[0]);
        };
        assert_eq!(message, "Failed to send message. Please try again. 😔");
        assert_eq!(classes, &vec!["notification".to_string(), "error".to_string()]);
    }

    #[test]
    fn full_lifecycle_removes_node() {
        let mut n = notifier();
        n.success();
        let id = NotificationId(1);

        assert_eq!(
            n.on_timer(id, NotificationStage::Reveal),
            vec![Effect::SetClass {
                node: NodeRef::Notification(id),
                class: "show".into(),
                on: true,
            }]
        );
        let leaving = n.on_timer(id, NotificationStage::Dismiss);
        assert_eq!(leaving.len(), 2);
        assert_eq!(
            leaving[1],
            Effect::Schedule {
                after: Duration::from_millis(500),
                event: PageEvent::NotificationTimer {
                    id,
                    stage: NotificationStage::Remove
                },
            }
        );
        assert_eq!(
            n.on_timer(id, NotificationStage::Remove),
            vec![Effect::RemoveNode {
                node: NodeRef::Notification(id)
            }]
        );
        assert_eq!(n.live_count(), 0);
        assert!(n.on_timer(id, NotificationStage::Remove).is_empty());
    }

    #[test]
    fn concurrent_panels_are_independent() {
        let mut n = notifier();
        n.success();
        n.failure();
        assert_eq!(n.live_count(), 2);
        n.on_timer(NotificationId(1), NotificationStage::Dismiss);
        assert_eq!(n.phase(NotificationId(1)), Some(NotificationPhase::Leaving));
        assert_eq!(n.phase(NotificationId(2)), Some(NotificationPhase::Entering));
    }

    #[test]
    fn late_reveal_after_dismiss_is_ignored() {
        let mut n = notifier();
        n.success();
        let id = NotificationId(1);
        n.on_timer(id, NotificationStage::Dismiss);
        assert!(n.on_timer(id, NotificationStage::Reveal).is_empty());
        assert_eq!(n.phase(id), Some(NotificationPhase::Leaving));
    }

    #[test]
    fn stylesheet_uses_configured_classes() {
        let css = stylesheet(&ClassNames::default());
        assert!(css.contains(".notification.error {"));
        assert!(css.contains(".notification.show {"));
        assert!(css.contains("transition: right 0.5s ease-in-out;"));
    }
}
