use {
    crate::{
        error::Result,
        view::{
            dispose::{DisposalCascade, Dispose},
            event::{CollectionAction, StructuralEvent},
            filter::{NullFilter, ViewFilter},
            list::ListView,
            observer::{EventHandlers, ObserverBroadcast},
            options::ViewOptions,
            routed::{Observable, RoutedView},
            subscription::Subscription,
            CoupleView, Observer, View, ViewPort,
        },
    },
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
};

pub type Transform<T, TView> = Arc<dyn Fn(&T) -> TView + Send + Sync>;

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Layout
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// How a couple store orders its pairs.
pub trait CoupleLayout<T, TView>: Sized + Send + Sync + 'static
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    /// Name used in diagnostics.
    const KIND: &'static str;

    /// Builds the store contents from a source snapshot.
    fn snapshot(store: &mut CoupleStore<T, TView, Self>, items: Vec<T>) -> Result<()>;
}

/// A layout that follows a live source.
pub trait TrackingLayout<T, TView>: CoupleLayout<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    /// Applies one source event completely or not at all, then routes
    /// the resulting pair events.
    fn apply(store: &mut CoupleStore<T, TView, Self>, ev: &StructuralEvent<T>) -> Result<()>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Pairs kept in source order.
pub struct Positional;

impl<T, TView> CoupleLayout<T, TView> for Positional
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    const KIND: &'static str = "couple";

    fn snapshot(store: &mut CoupleStore<T, TView, Self>, items: Vec<T>) -> Result<()> {
        store.pairs = store.project(items);
        Ok(())
    }
}

impl<T, TView> TrackingLayout<T, TView> for Positional
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn apply(store: &mut CoupleStore<T, TView, Self>, ev: &StructuralEvent<T>) -> Result<()> {
        let action = ev.action();

        if action == CollectionAction::Reset {
            store.clear(action);
            return store.route(&StructuralEvent::Reset);
        }

        let transform = store.transform.clone();
        let out = ev.apply_mapped(&mut store.pairs, |x| (x.clone(), transform(x)))?;

        let filter = &store.filter;
        match &out {
            StructuralEvent::Add { items, .. } => {
                for (value, view) in items.iter() {
                    filter.on_add(value, view, action);
                }
            }
            StructuralEvent::Remove { items, .. } => {
                for (value, view) in items.iter() {
                    filter.on_remove(value, view, action);
                }
            }
            StructuralEvent::Replace { new_item, old_item, .. } => {
                filter.on_remove(&old_item.0, &old_item.1, action);
                filter.on_add(&new_item.0, &new_item.1, action);
            }
            StructuralEvent::Move { item, .. } => {
                filter.on_move(&item.0, &item.1, action);
            }
            StructuralEvent::Reset => {}
        }

        store.route(&out)
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Store
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub struct CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    pub(crate) pairs: Vec<(T, TView)>,
    pub(crate) layout: L,
    pub(crate) filter: Arc<dyn ViewFilter<T, TView>>,
    pub(crate) transform: Transform<T, TView>,
    reverse: bool,
    cast: ObserverBroadcast<dyn ListView<(T, TView)>>,
    state_changed: EventHandlers<CollectionAction>,
}

impl<T, TView, L> CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    L: CoupleLayout<T, TView>,
{
    pub(crate) fn new(transform: Transform<T, TView>, layout: L, reverse: bool) -> Self {
        CoupleStore {
            pairs: Vec::new(),
            layout,
            filter: NullFilter::shared(),
            transform,
            reverse,
            cast: ObserverBroadcast::new(),
            state_changed: EventHandlers::new(),
        }
    }

    pub(crate) fn project(&self, items: Vec<T>) -> Vec<(T, TView)> {
        items
            .into_iter()
            .map(|x| {
                let view = (self.transform)(&x);
                (x, view)
            })
            .collect()
    }

    /// Empties the store. A non-null filter sees `on_remove` for every
    /// held pair first.
    pub(crate) fn clear(&mut self, action: CollectionAction) {
        if !self.filter.is_null() {
            for (value, view) in self.pairs.iter() {
                self.filter.on_remove(value, view, action);
            }
        }
        self.pairs.clear();
    }

    pub fn attach_filter(&mut self, filter: Arc<dyn ViewFilter<T, TView>>) {
        self.filter = filter;
        for (value, view) in self.pairs.iter() {
            self.filter.on_attach(value, view);
        }
    }

    pub fn reset_filter(&mut self, action: Option<&dyn Fn(&T, &TView)>) {
        self.filter = NullFilter::shared();
        if let Some(action) = action {
            for (value, view) in self.pairs.iter() {
                action(value, view);
            }
        }
    }
}

impl<T, TView, L> View for CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    L: Send + Sync,
{
    type Msg = StructuralEvent<(T, TView)>;
}

impl<T, TView, L> ListView<(T, TView)> for CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    L: Send + Sync,
{
    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn get(&self, idx: usize) -> Option<&(T, TView)> {
        self.pairs.get(idx)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a (T, TView)> + 'a> {
        let filter = &self.filter;
        let matching = move |pair: &&(T, TView)| filter.is_match(&pair.0, &pair.1);

        if self.reverse {
            Box::new(self.pairs.iter().rev().filter(matching))
        } else {
            Box::new(self.pairs.iter().filter(matching))
        }
    }
}

impl<T, TView, L> ViewPort<(T, TView)> for CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    L: Send + Sync + 'static,
{
    fn broadcast(&self) -> &ObserverBroadcast<dyn ListView<(T, TView)>> {
        &self.cast
    }

    fn broadcast_mut(&mut self) -> &mut ObserverBroadcast<dyn ListView<(T, TView)>> {
        &mut self.cast
    }
}

impl<T, TView, L> Observer<dyn ListView<T>> for CoupleStore<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    L: TrackingLayout<T, TView>,
{
    fn reset(&mut self, view: &dyn ListView<T>) -> Result<()> {
        L::snapshot(self, view.iter().cloned().collect())
    }

    fn notify(&mut self, _view: &dyn ListView<T>, ev: &StructuralEvent<T>) -> Result<()> {
        L::apply(self, ev)?;
        self.state_changed.emit(&ev.action());
        Ok(())
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Couple View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Handle of a couple view: owns the store and the subscription that
/// keeps it in sync with its source.
pub struct SynchronizedCoupleView<T, TView, L = Positional>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    store: Arc<RwLock<CoupleStore<T, TView, L>>>,
    state_changed: EventHandlers<CollectionAction>,
    subscription: Mutex<Option<Subscription>>,
    cascade: DisposalCascade,
    disposed: AtomicBool,
}

impl<T, TView> SynchronizedCoupleView<T, TView, Positional>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
{
    pub fn new<S>(source: &S, transform: Transform<T, TView>, options: ViewOptions) -> Result<Self>
    where
        S: Observable<T> + ?Sized,
    {
        SynchronizedCoupleView::subscribe(source, transform, Positional, options)
    }
}

impl<T, TView, L> SynchronizedCoupleView<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    L: CoupleLayout<T, TView>,
{
    /// Wraps an already populated store that follows no source.
    pub(crate) fn detached(store: CoupleStore<T, TView, L>, options: ViewOptions) -> Self {
        tracing::debug!(view = L::KIND, len = store.pairs.len(), "view created");
        SynchronizedCoupleView {
            state_changed: store.state_changed.clone(),
            store: Arc::new(RwLock::new(store)),
            subscription: Mutex::new(None),
            cascade: options.cascade(),
            disposed: AtomicBool::new(false),
        }
    }

    pub(crate) fn store(&self) -> &Arc<RwLock<CoupleStore<T, TView, L>>> {
        &self.store
    }
}

impl<T, TView, L> SynchronizedCoupleView<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    L: TrackingLayout<T, TView>,
{
    pub(crate) fn subscribe<S>(
        source: &S,
        transform: Transform<T, TView>,
        layout: L,
        options: ViewOptions,
    ) -> Result<Self>
    where
        S: Observable<T> + ?Sized,
    {
        let store = Arc::new(RwLock::new(CoupleStore::new(transform, layout, options.reverse)));
        let state_changed = store.read().unwrap().state_changed.clone();

        let subscription = source.add_observer(store.clone())?;
        tracing::debug!(view = L::KIND, len = store.read().unwrap().pairs.len(), "view attached");

        Ok(SynchronizedCoupleView {
            store,
            state_changed,
            subscription: Mutex::new(Some(subscription)),
            cascade: options.cascade(),
            disposed: AtomicBool::new(false),
        })
    }
}

impl<T, TView, L> Observable<(T, TView)> for SynchronizedCoupleView<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    L: CoupleLayout<T, TView>,
{
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<(T, TView)>>>>,
    ) -> Result<Subscription> {
        ViewPort::add_observer(&self.store, observer)
    }
}

impl<T, TView, L> RoutedView<(T, TView)> for SynchronizedCoupleView<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    L: CoupleLayout<T, TView>,
{
    fn len(&self) -> usize {
        self.store.read().unwrap().pairs.len()
    }

    fn to_vec(&self) -> Vec<(T, TView)> {
        self.store.read().unwrap().iter().cloned().collect()
    }

    fn state_changed(&self) -> &EventHandlers<CollectionAction> {
        &self.state_changed
    }

    fn dispose_cascade(&self, elements: bool) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        drop(self.subscription.lock().unwrap().take());

        let cascade = DisposalCascade {
            dispose_element: self.cascade.dispose_element && elements,
            ..self.cascade
        };
        let store = self.store.read().unwrap();
        let released = cascade.release_elements(store.pairs.iter().map(|(_, view)| view));

        tracing::trace!(view = L::KIND, released, "view disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl<T, TView, L> CoupleView<T, TView> for SynchronizedCoupleView<T, TView, L>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    L: CoupleLayout<T, TView>,
{
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>) {
        self.store.write().unwrap().attach_filter(filter);
    }

    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>) {
        self.store.write().unwrap().reset_filter(action);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        buffer::vec::ObservableVec,
        error::ViewError,
        projection::couple_view::*,
        view::{ObservableExt, SynchronizedViewFilter},
    };
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn couple_view_tracks_source() {
        let source = ObservableVec::with_data(vec![1, 2]);
        let view = source.to_couple_view(|x: &i32| x * 10).unwrap();

        assert_eq!(view.to_vec(), vec![(1, 10), (2, 20)]);

        source.insert(1, 5).unwrap();
        source.move_item(0, 2).unwrap();
        source.set(0, 7).unwrap();
        assert_eq!(view.to_vec(), vec![(7, 70), (2, 20), (1, 10)]);

        source.remove_range(0, 2).unwrap();
        assert_eq!(view.to_vec(), vec![(1, 10)]);
    }

    #[test]
    fn reverse_enumeration() {
        let source = ObservableVec::with_data(vec!['a', 'b', 'c']);
        let view = source
            .to_couple_view_with(|c: &char| c.to_ascii_uppercase(), ViewOptions::new().reverse(true))
            .unwrap();

        assert_eq!(view.to_vec(), vec![('c', 'C'), ('b', 'B'), ('a', 'A')]);
    }

    #[test]
    fn filter_hides_but_len_counts_everything() {
        let source = ObservableVec::with_data(vec![1, 2, 3, 4]);
        let view = source.to_couple_view(|x: &i32| *x).unwrap();

        view.attach_filter(Arc::new(SynchronizedViewFilter::new(|x: &i32, _: &i32| x % 2 == 0)));
        assert_eq!(view.to_vec(), vec![(2, 2), (4, 4)]);
        assert_eq!(view.len(), 4);

        view.reset_filter(None);
        assert_eq!(view.to_vec().len(), 4);
    }

    #[test]
    fn attach_and_reset_visit_pairs_in_store_order() {
        let source = ObservableVec::with_data(vec![4, 2, 9]);
        let view = source
            .to_couple_view_with(|x: &i32| x + 1, ViewOptions::new().reverse(true))
            .unwrap();

        let attached = Arc::new(Mutex::new(Vec::new()));
        let a = attached.clone();
        view.attach_filter(Arc::new(
            SynchronizedViewFilter::new(|x: &i32, _: &i32| *x > 3)
                .with_on_attach(move |x, v| a.lock().unwrap().push((*x, *v))),
        ));
        assert_eq!(*attached.lock().unwrap(), vec![(4, 5), (2, 3), (9, 10)]);
        assert_eq!(view.to_vec(), vec![(9, 10), (4, 5)]);

        let visited = Mutex::new(Vec::new());
        view.reset_filter(Some(&|x: &i32, v: &i32| visited.lock().unwrap().push((*x, *v))));
        assert_eq!(visited.into_inner().unwrap(), vec![(4, 5), (2, 3), (9, 10)]);
        assert_eq!(view.to_vec(), vec![(9, 10), (2, 3), (4, 5)]);
    }

    #[test]
    fn filter_hooks_fire_once_per_pair() {
        let adds = Arc::new(AtomicUsize::new(0));
        let removes = Arc::new(AtomicUsize::new(0));
        let moves = Arc::new(AtomicUsize::new(0));

        let source = ObservableVec::with_data(vec![1, 2, 3]);
        let view = source.to_couple_view(|x: &i32| *x).unwrap();

        let (a, r, m) = (adds.clone(), removes.clone(), moves.clone());
        view.attach_filter(Arc::new(
            SynchronizedViewFilter::new(|_: &i32, _: &i32| true)
                .with_on_add(move |_, _, _| {
                    a.fetch_add(1, Ordering::SeqCst);
                })
                .with_on_remove(move |_, _, _| {
                    r.fetch_add(1, Ordering::SeqCst);
                })
                .with_on_move(move |_, _, _| {
                    m.fetch_add(1, Ordering::SeqCst);
                }),
        ));

        source.add_range(vec![4, 5]).unwrap();
        source.set(0, 9).unwrap();
        source.move_item(0, 1).unwrap();
        source.clear().unwrap();

        assert_eq!(adds.load(Ordering::SeqCst), 3);
        // one for the replace, five for the reset
        assert_eq!(removes.load(Ordering::SeqCst), 6);
        assert_eq!(moves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn state_changed_after_apply() {
        let source = ObservableVec::new();
        let view = source.to_couple_view(|x: &u8| *x).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        let _sub = view.state_changed().add(move |a| s.lock().unwrap().push(*a));

        source.add(1).unwrap();
        source.clear().unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![CollectionAction::Add, CollectionAction::Reset]
        );
    }

    #[test]
    fn malformed_event_is_contract_violation() {
        let source = ObservableVec::<i32>::new();
        let _view = source.to_couple_view(|x: &i32| *x).unwrap();

        assert!(matches!(
            source.apply(StructuralEvent::add_range(vec![], 0)),
            Err(ViewError::ContractViolation { .. })
        ));
    }

    #[test]
    fn dispose_unsubscribes() {
        let source = ObservableVec::with_data(vec![1]);
        let view = source.to_couple_view(|x: &i32| *x).unwrap();

        view.dispose();
        assert!(view.is_disposed());

        source.add(2).unwrap();
        assert_eq!(view.len(), 1);
    }
}
