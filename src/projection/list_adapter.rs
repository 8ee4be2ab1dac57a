use {
    crate::{
        error::Result,
        projection::notify_view::{Expansion, NotifyView},
        view::{
            event::StructuralEvent, notify::CollectionChanged, routed::RoutedView,
        },
    },
    std::sync::Arc,
};

/// Notify view for list-bound consumers that cannot take runs.
pub type ListAdapter<Item, P> = NotifyView<Item, P>;

impl<Item, P> NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    pub fn list_adapter(parent: Arc<P>) -> Result<Self> {
        NotifyView::with_expansion(parent, Expansion::PerItem)
    }
}

/// Splits runs into single-item notifications.
///
/// Added items are reported front to back, removed items back to
/// front, so every reported index is valid at the time it is seen.
pub(crate) fn per_item<Item: Clone>(ev: &StructuralEvent<Item>) -> Vec<CollectionChanged<Item>> {
    match ev {
        StructuralEvent::Add { items, index } if items.len() > 1 => items
            .iter()
            .enumerate()
            .map(|(i, x)| CollectionChanged::from(&StructuralEvent::add(x.clone(), index + i)))
            .collect(),

        StructuralEvent::Remove { items, index } if items.len() > 1 => items
            .iter()
            .enumerate()
            .rev()
            .map(|(i, x)| CollectionChanged::from(&StructuralEvent::remove(x.clone(), index + i)))
            .collect(),

        _ => vec![CollectionChanged::from(ev)],
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        buffer::vec::ObservableVec,
        projection::list_adapter::*,
        view::{
            CollectionAction, CoupleViewExt, NotifyCollectionChanged, ObservableExt,
            PropertyChanged, ReadOnlyList, SingleViewExt,
        },
    };
    use std::sync::Mutex;

    #[test]
    fn runs_are_expanded() {
        let add = per_item(&StructuralEvent::add_range(vec!['a', 'b', 'c'], 2));
        let starts = add.iter().map(|cc| cc.new_starting_index).collect::<Vec<_>>();
        assert_eq!(starts, vec![Some(2), Some(3), Some(4)]);

        let remove = per_item(&StructuralEvent::remove_range(vec!['a', 'b'], 5));
        let removed = remove
            .iter()
            .map(|cc| (cc.old_items.clone(), cc.old_starting_index))
            .collect::<Vec<_>>();
        assert_eq!(removed, vec![(vec!['b'], Some(6)), (vec!['a'], Some(5))]);

        assert_eq!(per_item(&StructuralEvent::<char>::Reset).len(), 1);
    }

    #[test]
    fn adapter_over_single_view() {
        let source = ObservableVec::new();
        let adapter = source
            .to_couple_view(|x: &u32| x + 1)
            .unwrap()
            .to_single_view()
            .unwrap()
            .to_list_adapter()
            .unwrap();

        let log = Arc::new(Mutex::new(Vec::new()));
        let props = Arc::new(Mutex::new(0));

        let l = log.clone();
        let _a = adapter.on_collection_changed(move |cc| {
            l.lock().unwrap().push((cc.action, cc.new_items.clone(), cc.old_items.clone()))
        });
        let p = props.clone();
        let _b = adapter.on_property_changed(move |pc| {
            if *pc == PropertyChanged::COUNT {
                *p.lock().unwrap() += 1;
            }
        });

        source.add_range(vec![1, 2]).unwrap();
        source.remove_range(0, 2).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                (CollectionAction::Add, vec![2], vec![]),
                (CollectionAction::Add, vec![3], vec![]),
                (CollectionAction::Remove, vec![], vec![3]),
                (CollectionAction::Remove, vec![], vec![2]),
            ]
        );
        // once per routed event
        assert_eq!(*props.lock().unwrap(), 2);
        assert_eq!(adapter.len(), 0);
        assert!(matches!(
            adapter.get(0),
            Err(crate::error::ViewError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn indexer_readable_from_handler() {
        let source = ObservableVec::with_data(vec![1u32]);
        let adapter = source
            .to_couple_view(|x: &u32| x * 2)
            .unwrap()
            .to_single_view()
            .unwrap()
            .to_list_adapter()
            .unwrap();

        let read = Arc::new(Mutex::new(Vec::new()));
        let (r, weak) = (read.clone(), Arc::downgrade(&adapter));
        let _sub = adapter.on_collection_changed(move |cc| {
            if let (Some(a), Some(idx)) = (weak.upgrade(), cc.new_starting_index) {
                r.lock().unwrap().push(a.get(idx).unwrap());
            }
        });

        source.insert(0, 5).unwrap();
        source.add(7).unwrap();

        assert_eq!(*read.lock().unwrap(), vec![10, 14]);
        assert_eq!(adapter.to_vec(), vec![10, 2, 14]);
    }
}
