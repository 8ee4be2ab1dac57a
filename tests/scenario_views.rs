//! End-to-end scenarios over full view chains: a positional chain fed
//! every kind of mutation, a sorted chain, and the disposal cascade.

use r3vi_sync::{
    buffer::vec::ObservableVec,
    view::{
        CollectionAction, CoupleViewExt, DisposalCascade, NotifyCollectionChanged, ObservableExt,
        ReadOnlyList, RoutedView, RoutedViewExt, SingleViewExt, StructuralEvent, ViewOptions,
    },
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Tracked(Arc<AtomicUsize>);

impl r3vi_sync::view::Dispose for Tracked {
    fn dispose(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn recorder<X: Send + 'static>() -> (Arc<Mutex<Vec<X>>>, Arc<Mutex<Vec<X>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (log.clone(), log)
}

// ═════════════════════════════════════════════════════════════════════════
// Positional chain
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn positional_chain_follows_every_mutation() {
    let source = ObservableVec::new();
    let couple = source.to_couple_view(|x: &i32| x * 2).unwrap();
    let single = couple.to_single_view().unwrap();
    let filterless = source.to_filterless_view(|x: &i32| x + 1, true).unwrap();
    let notify = couple.to_notify_view().unwrap();

    let (actions, sink) = recorder();
    let _cc = notify.on_collection_changed(move |cc| sink.lock().unwrap().push(cc.action));
    let counts = Arc::new(AtomicUsize::new(0));
    let c = counts.clone();
    let _pc = notify.on_property_changed(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    let check = |expected: &[i32]| {
        assert_eq!(source.to_vec(), expected);
        assert_eq!(
            couple.to_vec(),
            expected.iter().map(|x| (*x, x * 2)).collect::<Vec<_>>()
        );
        assert_eq!(single.to_vec(), expected.iter().map(|x| x * 2).collect::<Vec<_>>());
        assert_eq!(
            filterless.to_vec(),
            expected.iter().rev().map(|x| x + 1).collect::<Vec<_>>()
        );
        assert_eq!(notify.len(), expected.len());
    };

    for x in [10, 50, 30, 20, 40] {
        source.add(x).unwrap();
    }
    check(&[10, 50, 30, 20, 40]);

    source.move_item(3, 1).unwrap();
    check(&[10, 20, 50, 30, 40]);

    source.insert(2, 99).unwrap();
    check(&[10, 20, 99, 50, 30, 40]);

    assert_eq!(source.remove_at(2).unwrap(), 99);
    check(&[10, 20, 50, 30, 40]);

    source.set(3, 88).unwrap();
    check(&[10, 20, 50, 88, 40]);

    source.clear().unwrap();
    check(&[]);

    source.add_range(vec![100, 200, 300]).unwrap();
    source.insert_range(1, vec![400, 500, 600]).unwrap();
    check(&[100, 400, 500, 600, 200, 300]);

    source.remove_range(2, 2).unwrap();
    check(&[100, 400, 200, 300]);

    use CollectionAction::*;
    assert_eq!(
        *actions.lock().unwrap(),
        vec![Add, Add, Add, Add, Add, Move, Add, Remove, Replace, Reset, Add, Add, Remove]
    );
    assert_eq!(counts.load(Ordering::SeqCst), 11);
}

#[test]
fn failed_mutation_reaches_no_view() {
    let source = ObservableVec::with_data(vec![1, 2, 3]);
    let couple = source.to_couple_view(|x: &i32| *x).unwrap();

    let (events, sink) = recorder();
    let _sub = couple
        .on_routed(move |ev: &StructuralEvent<(i32, i32)>| sink.lock().unwrap().push(ev.clone()))
        .unwrap();

    assert!(source.insert(7, 0).is_err());
    assert!(source.move_item(0, 3).is_err());
    assert!(source.remove_range(2, 5).is_err());

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(couple.to_vec(), vec![(1, 1), (2, 2), (3, 3)]);
}

// ═════════════════════════════════════════════════════════════════════════
// Sorted chain
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn sorted_chain_scenario() {
    let source = ObservableVec::new();
    let sorted = source
        .to_sorted_couple_view(|x: &i32| *x, |x: &i32| x * 10, |a: &i32, b: &i32| a.cmp(b))
        .unwrap();
    let single = sorted.to_single_view().unwrap();

    let (events, sink) = recorder();
    let _sub = sorted
        .on_routed(move |ev: &StructuralEvent<(i32, i32)>| sink.lock().unwrap().push(ev.clone()))
        .unwrap();

    source.add(50).unwrap();
    source.add(10).unwrap();
    source.add(30).unwrap();
    assert_eq!(single.to_vec(), vec![100, 300, 500]);

    // source order changes, sort order does not
    source.move_item(0, 2).unwrap();
    assert_eq!(source.to_vec(), vec![10, 30, 50]);
    assert_eq!(single.to_vec(), vec![100, 300, 500]);

    source.set(1, 5).unwrap();
    assert_eq!(single.to_vec(), vec![50, 100, 500]);

    source.remove_at(0).unwrap();
    assert_eq!(sorted.to_vec(), vec![(5, 50), (50, 500)]);
    assert_eq!(single.get(1).unwrap(), 500);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            StructuralEvent::add((50, 500), 0),
            StructuralEvent::add((10, 100), 0),
            StructuralEvent::add((30, 300), 1),
            StructuralEvent::moved((50, 500), 2, 2),
            StructuralEvent::remove((30, 300), 1),
            StructuralEvent::add((5, 50), 0),
            StructuralEvent::remove((10, 100), 1),
        ]
    );
}

#[test]
fn sorted_list_adapter_reports_positions() {
    let source = ObservableVec::with_data(vec![3, 1]);
    let sorted = source
        .to_sorted_couple_view_by_key(|x: &i32| *x, |x: &i32| x.to_string(), |x: &i32| *x, false)
        .unwrap();
    let adapter = sorted.to_single_view().unwrap().to_list_adapter().unwrap();
    assert_eq!(adapter.to_vec(), vec!["3".to_string(), "1".to_string()]);

    let (changes, sink) = recorder();
    let _cc = adapter.on_collection_changed(move |cc| {
        sink.lock().unwrap().push((cc.action, cc.new_starting_index, cc.old_starting_index))
    });

    source.add(2).unwrap();
    source.remove(&3).unwrap();

    assert_eq!(adapter.to_vec(), vec!["2".to_string(), "1".to_string()]);
    assert_eq!(
        *changes.lock().unwrap(),
        vec![
            (CollectionAction::Add, Some(1), None),
            (CollectionAction::Remove, None, Some(0)),
        ]
    );
}

// ═════════════════════════════════════════════════════════════════════════
// Disposal cascade
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn adapter_disposal_reaches_the_couple_view_once() {
    let released = Arc::new(AtomicUsize::new(0));
    let source = ObservableVec::with_data(vec![1, 2, 3]);

    let r = released.clone();
    let couple = source.to_couple_view(move |_: &i32| Tracked(r.clone())).unwrap();
    let single = couple.to_single_view().unwrap();
    let adapter = single.to_list_adapter().unwrap();

    adapter.dispose();

    assert!(adapter.is_disposed());
    assert!(single.is_disposed());
    assert!(couple.is_disposed());
    // the single view released the projections, the couple view did not
    assert_eq!(released.load(Ordering::SeqCst), 3);

    // the source keeps working without its former observers
    source.add(4).unwrap();
    assert_eq!(couple.len(), 3);
    assert_eq!(source.len(), 4);

    adapter.dispose();
    assert_eq!(released.load(Ordering::SeqCst), 3);
}

#[test]
fn detached_single_view_leaves_parent_live() {
    let source = ObservableVec::with_data(vec![1, 2]);
    let couple = source
        .to_couple_view_with(|x: &i32| x * 3, ViewOptions::new().dispose_element(false))
        .unwrap();
    let first = couple.to_single_view_with(DisposalCascade::none()).unwrap();
    let second = couple.to_single_view().unwrap();

    first.dispose();
    assert!(first.is_disposed());
    assert!(!couple.is_disposed());

    source.add(3).unwrap();
    assert_eq!(second.to_vec(), vec![3, 6, 9]);
    assert_eq!(first.len(), 2);

    second.dispose();
    assert!(couple.is_disposed());
}
