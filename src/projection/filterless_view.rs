use {
    crate::{
        error::Result,
        projection::couple_view::Transform,
        view::{
            event::{CollectionAction, StructuralEvent},
            list::ListView,
            observer::{EventHandlers, ObserverBroadcast},
            routed::{Observable, RoutedView},
            subscription::Subscription,
            Observer, View, ViewPort,
        },
    },
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Projections of a source, without the source half and without a
/// filter.
pub struct FilterlessStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    items: Vec<TView>,
    transform: Transform<T, TView>,
    reverse: bool,
    cast: ObserverBroadcast<dyn ListView<TView>>,
    state_changed: EventHandlers<CollectionAction>,
}

impl<T, TView> View for FilterlessStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    type Msg = StructuralEvent<TView>;
}

impl<T, TView> ListView<TView> for FilterlessStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, idx: usize) -> Option<&TView> {
        self.items.get(idx)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a TView> + 'a> {
        if self.reverse {
            Box::new(self.items.iter().rev())
        } else {
            Box::new(self.items.iter())
        }
    }
}

impl<T, TView> ViewPort<TView> for FilterlessStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn broadcast(&self) -> &ObserverBroadcast<dyn ListView<TView>> {
        &self.cast
    }

    fn broadcast_mut(&mut self) -> &mut ObserverBroadcast<dyn ListView<TView>> {
        &mut self.cast
    }
}

impl<T, TView> Observer<dyn ListView<T>> for FilterlessStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn reset(&mut self, view: &dyn ListView<T>) -> Result<()> {
        let transform = self.transform.clone();
        self.items = (0..view.len())
            .filter_map(|idx| view.get(idx))
            .map(|x| transform(x))
            .collect();
        Ok(())
    }

    fn notify(&mut self, _view: &dyn ListView<T>, ev: &StructuralEvent<T>) -> Result<()> {
        let out = match ev {
            StructuralEvent::Reset => {
                self.items.clear();
                StructuralEvent::Reset
            }
            _ => {
                let transform = self.transform.clone();
                ev.apply_mapped(&mut self.items, |x| transform(x))?
            }
        };

        self.route(&out)?;
        self.state_changed.emit(&ev.action());
        Ok(())
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
              Filterless View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Lightweight one-level projection of a source.
///
/// Disposing it only ends the subscription; neither the source nor
/// the projections are touched.
pub struct FilterlessView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    store: Arc<RwLock<FilterlessStore<T, TView>>>,
    state_changed: EventHandlers<CollectionAction>,
    subscription: Mutex<Option<Subscription>>,
    disposed: AtomicBool,
}

impl<T, TView> FilterlessView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    pub fn new<S>(source: &S, transform: Transform<T, TView>, reverse: bool) -> Result<Self>
    where
        S: Observable<T> + ?Sized,
    {
        let state_changed = EventHandlers::new();
        let store = Arc::new(RwLock::new(FilterlessStore {
            items: Vec::new(),
            transform,
            reverse,
            cast: ObserverBroadcast::new(),
            state_changed: state_changed.clone(),
        }));

        let subscription = source.add_observer(store.clone())?;
        tracing::debug!(len = store.read().unwrap().items.len(), reverse, "filterless view attached");

        Ok(FilterlessView {
            store,
            state_changed,
            subscription: Mutex::new(Some(subscription)),
            disposed: AtomicBool::new(false),
        })
    }
}

impl<T, TView> Observable<TView> for FilterlessView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<TView>>>>,
    ) -> Result<Subscription> {
        ViewPort::add_observer(&self.store, observer)
    }
}

impl<T, TView> RoutedView<TView> for FilterlessView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        self.store.read().unwrap().items.len()
    }

    fn to_vec(&self) -> Vec<TView> {
        self.store.read().unwrap().iter().cloned().collect()
    }

    fn state_changed(&self) -> &EventHandlers<CollectionAction> {
        &self.state_changed
    }

    fn dispose_cascade(&self, _elements: bool) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        drop(self.subscription.lock().unwrap().take());
        tracing::trace!(view = "filterless", "view disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        buffer::vec::ObservableVec,
        projection::filterless_view::*,
        view::{NotifyCollectionChanged, ObservableExt, RoutedViewExt},
    };

    #[test]
    fn maps_without_pairs() {
        let source = ObservableVec::with_data(vec![1, 2, 3]);
        let view = source.to_filterless_view(|x: &i32| x * x, false).unwrap();
        assert_eq!(view.to_vec(), vec![1, 4, 9]);

        source.set(1, 5).unwrap();
        source.remove_at(0).unwrap();
        assert_eq!(view.to_vec(), vec![25, 9]);

        source.clear().unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn reversed_enumeration() {
        let source = ObservableVec::with_data(vec!['x', 'y']);
        let view = source.to_filterless_view(|c: &char| *c, true).unwrap();

        source.add('z').unwrap();
        assert_eq!(view.to_vec(), vec!['z', 'y', 'x']);
    }

    #[test]
    fn dispose_leaves_source_alone() {
        let source = ObservableVec::with_data(vec![1]);
        let view = source.to_filterless_view(|x: &i32| *x, false).unwrap();
        let notify = view.to_notify_view().unwrap();

        let hits = Arc::new(Mutex::new(0));
        let h = hits.clone();
        let _sub = notify.on_collection_changed(move |_| *h.lock().unwrap() += 1);

        source.add(2).unwrap();
        notify.dispose();
        source.add(3).unwrap();

        assert!(view.is_disposed());
        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(view.len(), 2);
        assert_eq!(source.len(), 3);
    }
}
