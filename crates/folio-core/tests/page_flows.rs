//! End-to-end flows through `Portfolio::update`, driven the way the web host
//! drives them: events in, effects out, scheduled events fed back.

use std::time::Duration;

use folio_core::contact::SubmissionPhase;
use folio_core::{
    Activation, ClientState, Effect, NodeRef, PageConfig, PageEvent, PageLayout, Portfolio,
    SectionBounds, SendOutcome, SubmissionId,
};
use pretty_assertions::assert_eq;

fn portfolio_layout() -> PageLayout {
    PageLayout {
        header: true,
        menu: true,
        menu_has_link: true,
        toggle: true,
        close: true,
        nav_links: vec![
            "#home".into(),
            "#about".into(),
            "#skills".into(),
            "#contact".into(),
        ],
        sections: vec![
            "home".into(),
            "about".into(),
            "skills".into(),
            "contact".into(),
        ],
        skills_section: true,
        skill_bars: vec![Some("90".into()), Some("75".into()), None, Some("60".into())],
        images: 3,
        contact_form: true,
        email_client_loaded: false,
    }
}

fn section_bounds() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new(0.0, 700.0),
        SectionBounds::new(700.0, 900.0),
        SectionBounds::new(1600.0, 600.0),
        SectionBounds::new(2200.0, 800.0),
    ]
}

fn mount() -> Portfolio {
    Portfolio::mount(portfolio_layout(), PageConfig::default()).0
}

fn fields() -> Vec<(String, String)> {
    vec![
        ("user_name".into(), "Grace".into()),
        ("user_email".into(), "grace@example.com".into()),
        ("message".into(), "Let's talk".into()),
    ]
}

/// Pull out the scheduled events, as the host's timers would.
fn scheduled(effects: &[Effect]) -> Vec<(Duration, PageEvent)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Schedule { after, event } => Some((*after, event.clone())),
            _ => None,
        })
        .collect()
}

fn notification_classes(effects: &[Effect]) -> Vec<Vec<String>> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::CreateNotification { classes, .. } => Some(classes.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn startup_injects_styles_and_observes_skills() {
    let (_, effects) = Portfolio::mount(portfolio_layout(), PageConfig::default());
    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[0], Effect::InjectStyles { ref css } if css.contains(".notification")));
    assert_eq!(
        effects[1],
        Effect::ObserveVisibility {
            node: NodeRef::SkillsSection,
            threshold: 0.2
        }
    );
}

#[test]
fn menu_open_link_close_cycle() {
    let mut page = mount();

    page.update(PageEvent::OpenMenu {
        via: Activation::Key,
    });
    assert!(page.nav().is_open());

    let effects = page.update(PageEvent::NavLinkActivated { index: 2 });
    assert_eq!(
        effects[1],
        Effect::ScrollIntoView {
            section_id: "skills".into()
        }
    );
    assert!(!page.nav().is_open());

    page.update(PageEvent::OpenMenu {
        via: Activation::Click,
    });
    let effects = page.update(PageEvent::CloseMenu {
        via: Activation::Click,
    });
    assert_eq!(
        effects.last(),
        Some(&Effect::Focus {
            node: NodeRef::Toggle
        })
    );
}

#[test]
fn scrolling_through_the_page_moves_the_active_link() {
    let mut page = mount();
    let expectations = [
        (10.0, false, vec![0]),
        (60.0, true, vec![0]),
        (800.0, true, vec![1]),
        (1600.0, true, vec![2]),
        (2500.0, true, vec![3]),
        (5000.0, true, vec![]),
        (0.0, false, vec![0]),
    ];
    for (offset, scrolled, active) in expectations {
        page.update(PageEvent::ScrollTick {
            offset,
            sections: section_bounds(),
        });
        assert_eq!(page.scroll().is_scrolled(), scrolled, "offset {offset}");
        assert_eq!(page.scroll().active_links(), active, "offset {offset}");
    }
}

#[test]
fn skills_reveal_fires_once_across_reentries() {
    let mut page = mount();
    let first = page.update(PageEvent::SectionVisible { intersecting: true });
    let widths: Vec<(usize, f64, Duration)> = first
        .iter()
        .filter_map(|e| match e {
            Effect::SetBarWidth {
                index,
                percent,
                delay,
            } => Some((*index, *percent, *delay)),
            _ => None,
        })
        .collect();
    assert_eq!(
        widths,
        vec![
            (0, 90.0, Duration::ZERO),
            (1, 75.0, Duration::from_millis(100)),
            (3, 60.0, Duration::from_millis(300)),
        ]
    );

    page.update(PageEvent::SectionVisible {
        intersecting: false,
    });
    assert!(
        page.update(PageEvent::SectionVisible { intersecting: true })
            .is_empty()
    );
}

#[test]
fn first_submission_loads_client_and_succeeds() {
    let mut page = mount();

    let effects = page.update(PageEvent::SubmitForm { fields: fields() });
    assert_eq!(effects[0], Effect::PreventDefault);
    assert!(matches!(effects[1], Effect::LoadScript { .. }));
    assert_eq!(page.contact().client_state(), ClientState::Loading);

    let effects = page.update(PageEvent::ClientLoaded);
    assert!(matches!(effects[0], Effect::InitClient { .. }));
    assert!(matches!(
        effects[1],
        Effect::SendForm {
            submission: SubmissionId(1),
            ..
        }
    ));

    let effects = page.update(PageEvent::SendSettled {
        submission: SubmissionId(1),
        outcome: SendOutcome::Delivered {
            response: "OK".into(),
        },
    });
    assert_eq!(notification_classes(&effects), vec![vec!["notification".to_string()]]);
    assert_eq!(effects.last(), Some(&Effect::ResetForm));

    // Second submission reuses the client.
    let effects = page.update(PageEvent::SubmitForm { fields: fields() });
    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[1], Effect::SendForm { .. }));
}

#[test]
fn racing_submissions_load_and_init_once() {
    let mut page = mount();
    let mut loads = 0;
    let mut inits = 0;
    let mut sends = 0;
    let mut tally = |effects: &[Effect]| {
        for e in effects {
            match e {
                Effect::LoadScript { .. } => loads += 1,
                Effect::InitClient { .. } => inits += 1,
                Effect::SendForm { .. } => sends += 1,
                _ => {}
            }
        }
    };

    tally(&page.update(PageEvent::SubmitForm { fields: fields() }));
    tally(&page.update(PageEvent::SubmitForm { fields: fields() }));
    tally(&page.update(PageEvent::SubmitForm { fields: fields() }));
    tally(&page.update(PageEvent::ClientLoaded));
    tally(&page.update(PageEvent::ClientLoaded));

    assert_eq!((loads, inits, sends), (1, 1, 3));
}

#[test]
fn vanished_client_is_reloaded_before_sending() {
    let layout = PageLayout {
        email_client_loaded: true,
        ..portfolio_layout()
    };
    let (mut page, _) = Portfolio::mount(layout, PageConfig::default());

    let effects = page.update(PageEvent::SubmitForm { fields: fields() });
    assert!(matches!(effects[1], Effect::SendForm { .. }));

    let effects = page.update(PageEvent::ClientMissing {
        submission: SubmissionId(1),
    });
    assert!(matches!(effects[..], [Effect::LoadScript { .. }]));
    assert_eq!(
        page.contact().phase(SubmissionId(1)),
        Some(SubmissionPhase::AwaitingClient)
    );

    // The reloaded script never defines the global either.
    let effects = page.update(PageEvent::ClientLoadFailed {
        reason: "`emailjs` is not defined after loading".into(),
    });
    assert_eq!(
        notification_classes(&effects),
        vec![vec!["notification".to_string(), "error".to_string()]]
    );
    assert_eq!(page.contact().client_state(), ClientState::Absent);
    assert_eq!(page.contact().pending_count(), 0);
}

#[test]
fn load_failure_shows_error_and_leaves_form_alone() {
    let mut page = mount();
    page.update(PageEvent::SubmitForm { fields: fields() });
    let effects = page.update(PageEvent::ClientLoadFailed {
        reason: "Failed to load EmailJS SDK".into(),
    });
    assert_eq!(
        notification_classes(&effects),
        vec![vec!["notification".to_string(), "error".to_string()]]
    );
    assert!(!effects.contains(&Effect::ResetForm));
    assert_eq!(page.contact().client_state(), ClientState::Absent);
}

#[test]
fn send_rejection_keeps_fields() {
    let layout = PageLayout {
        email_client_loaded: true,
        ..portfolio_layout()
    };
    let (mut page, _) = Portfolio::mount(layout, PageConfig::default());
    page.update(PageEvent::SubmitForm { fields: fields() });
    assert_eq!(
        page.contact().phase(SubmissionId(1)),
        Some(SubmissionPhase::Sending)
    );
    let effects = page.update(PageEvent::SendSettled {
        submission: SubmissionId(1),
        outcome: SendOutcome::Rejected {
            reason: "invalid template".into(),
        },
    });
    assert!(!effects.contains(&Effect::ResetForm));
    assert_eq!(notification_classes(&effects).len(), 1);
}

#[test]
fn notification_timeline_runs_to_removal() {
    let layout = PageLayout {
        email_client_loaded: true,
        ..portfolio_layout()
    };
    let (mut page, _) = Portfolio::mount(layout, PageConfig::default());
    page.update(PageEvent::SubmitForm { fields: fields() });
    let effects = page.update(PageEvent::SendSettled {
        submission: SubmissionId(1),
        outcome: SendOutcome::Delivered {
            response: "OK".into(),
        },
    });

    // Simulate the host timer queue with absolute deadlines.
    let mut queue: Vec<(Duration, PageEvent)> = scheduled(&effects);
    let mut removed_at = None;
    let mut shown_at = None;
    while !queue.is_empty() {
        queue.sort_by_key(|(at, _)| *at);
        let (now, event) = queue.remove(0);
        let effects = page.update(event);
        for e in &effects {
            match e {
                Effect::SetClass {
                    node: NodeRef::Notification(_),
                    on: true,
                    ..
                } => shown_at = Some(now),
                Effect::RemoveNode {
                    node: NodeRef::Notification(_),
                } => removed_at = Some(now),
                _ => {}
            }
        }
        queue.extend(
            scheduled(&effects)
                .into_iter()
                .map(|(after, event)| (now + after, event)),
        );
    }

    assert_eq!(shown_at, Some(Duration::from_millis(10)));
    assert_eq!(removed_at, Some(Duration::from_millis(4500)));
    assert_eq!(page.notifier().live_count(), 0);
}

#[test]
fn broken_image_falls_back() {
    let mut page = mount();
    let effects = page.update(PageEvent::ImageError {
        index: 2,
        src: "https://example.com/avatar.png".into(),
    });
    assert_eq!(
        effects,
        vec![Effect::SetImage {
            index: 2,
            src: "https://via.placeholder.com/300x200?text=Image+Not+Found".into(),
            alt: "Image not available".into(),
        }]
    );
    assert!(page.images().is_replaced(2));

    // The placeholder itself failing is left alone.
    let again = page.update(PageEvent::ImageError {
        index: 2,
        src: "https://via.placeholder.com/300x200?text=Image+Not+Found".into(),
    });
    assert!(again.is_empty());
}
