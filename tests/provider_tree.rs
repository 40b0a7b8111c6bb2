//! End-to-end provider behavior over a small application-shaped tree.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{Signal, effect, signal};

use spark_provider::{
    NodeProps, Position, ProviderError, ProviderList, ScopedProvider, get_index, node, reset_tree,
};

/// Application state in the usual shape: a plain struct holding signals.
struct Counter {
    count: Signal<i32>,
}

#[derive(Debug)]
struct Theme {
    name: &'static str,
}

fn consumer(id: &str) -> Box<dyn FnOnce()> {
    let id = id.to_string();
    Box::new(move || {
        node(NodeProps {
            id: Some(id),
            ..Default::default()
        });
    })
}

#[test]
fn descendant_reads_nearest_state() {
    reset_tree();

    let _cleanup = ScopedProvider::new(Counter { count: signal(3) })
        .with_child(Box::new(|| {
            node(NodeProps {
                id: Some("panel".into()),
                children: Some(consumer("label")),
            });
        }))
        .mount();

    let label = get_index("label").unwrap();
    let counter = ScopedProvider::<Counter>::of(Position::node(label)).unwrap();
    assert_eq!(counter.count.get(), 3);
}

#[test]
fn lookup_failure_reports_path() {
    reset_tree();

    let _cleanup = node(NodeProps {
        id: Some("root".into()),
        children: Some(consumer("label")),
    });

    let label = get_index("label").unwrap();
    let err = ScopedProvider::<Theme>::of(Position::node(label)).unwrap_err();
    match &err {
        ProviderError::NotFound { position, .. } => assert_eq!(position, "root > label"),
        other => panic!("expected NotFound, got {other}"),
    }
    assert!(err.to_string().contains("Theme"));
}

#[test]
fn wrapper_replacement_does_not_rerun_readers() {
    reset_tree();

    let shared = Rc::new(Counter { count: signal(0) });
    let _cleanup = ScopedProvider::from_shared(shared.clone())
        .with_id("provider")
        .with_child(consumer("label"))
        .mount();

    let provider = get_index("provider").unwrap();
    let label = get_index("label").unwrap();

    let runs = Rc::new(Cell::new(0u32));
    let runs_inner = runs.clone();
    let _effect_cleanup = effect(move || {
        let _ = ScopedProvider::<Counter>::of(Position::node(label)).unwrap();
        runs_inner.set(runs_inner.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    // A fresh wrapper around the same object: suppressed.
    ScopedProvider::from_shared(shared.clone())
        .update(provider)
        .unwrap();
    assert_eq!(runs.get(), 1);

    // Even a wrapper around a different object: still suppressed. Readers
    // pick up the new object on their next own re-run, never because of the
    // wrapper swap.
    ScopedProvider::new(Counter { count: signal(9) })
        .update(provider)
        .unwrap();
    assert_eq!(runs.get(), 1);
}

#[test]
fn state_changes_flow_through_untouched() {
    reset_tree();

    let shared = Rc::new(Counter { count: signal(0) });
    let _cleanup = ScopedProvider::from_shared(shared.clone())
        .with_id("provider")
        .with_child(consumer("label"))
        .mount();

    let provider = get_index("provider").unwrap();
    let label = get_index("label").unwrap();

    let seen = Rc::new(Cell::new(-1));
    let seen_inner = seen.clone();
    let _effect_cleanup = effect(move || {
        let counter = ScopedProvider::<Counter>::of(Position::node(label)).unwrap();
        seen_inner.set(counter.count.get());
    });
    assert_eq!(seen.get(), 0);

    shared.count.set(5);
    assert_eq!(seen.get(), 5);

    // Replacing the wrapper (same object) must not break the signal path.
    ScopedProvider::from_shared(shared.clone())
        .update(provider)
        .unwrap();
    shared.count.set(8);
    assert_eq!(seen.get(), 8);
}

#[test]
fn provider_list_matches_manual_nesting() {
    reset_tree();

    // Composed chain.
    let _composed = ProviderList::new(
        vec![
            Box::new(ScopedProvider::new(Counter { count: signal(1) })),
            Box::new(ScopedProvider::new(Theme { name: "nord" })),
        ],
        consumer("composed"),
    )
    .mount();

    // Hand-nested equivalent.
    let _manual = ScopedProvider::new(Counter { count: signal(1) })
        .with_child(Box::new(|| {
            ScopedProvider::new(Theme { name: "nord" })
                .with_child(consumer("manual"))
                .mount();
        }))
        .mount();

    for id in ["composed", "manual"] {
        let position = Position::node(get_index(id).unwrap());
        let counter = ScopedProvider::<Counter>::of(position).unwrap();
        let theme = ScopedProvider::<Theme>::of(position).unwrap();
        assert_eq!(counter.count.get(), 1);
        assert_eq!(theme.name, "nord");
    }
}

#[test]
fn sibling_scopes_stay_isolated() {
    reset_tree();

    let _cleanup = node(NodeProps {
        id: Some("root".into()),
        children: Some(Box::new(|| {
            ScopedProvider::new(Theme { name: "left" })
                .with_child(consumer("left_label"))
                .mount();
            ScopedProvider::new(Theme { name: "right" })
                .with_child(consumer("right_label"))
                .mount();
        })),
    });

    let left = Position::node(get_index("left_label").unwrap());
    let right = Position::node(get_index("right_label").unwrap());
    assert_eq!(ScopedProvider::<Theme>::of(left).unwrap().name, "left");
    assert_eq!(ScopedProvider::<Theme>::of(right).unwrap().name, "right");
}
