use {
    crate::{
        error::{Result, ViewError},
        projection::list_adapter,
        view::{
            couple::{CoupleView, SortableCoupleView, ValueComparison},
            event::{CollectionAction, StructuralEvent},
            filter::ViewFilter,
            list::ListView,
            notify::{CollectionChanged, NotifyCollectionChanged, PropertyChanged},
            observer::EventHandlers,
            routed::{Observable, RoutedView},
            single::{ReadOnlyList, SingleView},
            subscription::Subscription,
            Observer,
        },
    },
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// How routed runs are turned into collection-changed notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Expansion {
    /// One notification per event, runs kept whole.
    Batched,

    /// One notification per item of a run.
    PerItem,
}

impl Expansion {
    fn expand<Item: Clone>(&self, ev: &StructuralEvent<Item>) -> Vec<CollectionChanged<Item>> {
        match self {
            Expansion::Batched => vec![CollectionChanged::from(ev)],
            Expansion::PerItem => list_adapter::per_item(ev),
        }
    }
}

/// The parent as it stands while one of its events is being
/// dispatched. Its store is write-locked for that whole time, so
/// handlers reading the adapter are served from here instead.
struct Dispatched<Item> {
    len: usize,
    items: Vec<Item>,
}

type Current<Item> = Arc<RwLock<Option<Dispatched<Item>>>>;

struct Relay<Item: 'static> {
    expansion: Expansion,
    collection_changed: EventHandlers<CollectionChanged<Item>>,
    property_changed: EventHandlers<PropertyChanged>,
    current: Current<Item>,
}

impl<Item> Observer<dyn ListView<Item>> for Relay<Item>
where
    Item: Clone + Send + Sync + 'static,
{
    fn notify(&mut self, view: &dyn ListView<Item>, ev: &StructuralEvent<Item>) -> Result<()> {
        if self.collection_changed.is_empty() && self.property_changed.is_empty() {
            return Ok(());
        }

        *self.current.write().unwrap() = Some(Dispatched {
            len: view.len(),
            items: view.iter().cloned().collect(),
        });

        let changes = self.expansion.expand(ev);
        for cc in changes.iter() {
            self.collection_changed.emit(cc);
        }

        if changes.iter().any(CollectionChanged::changes_count) {
            self.property_changed.emit(&PropertyChanged::COUNT);
        }

        *self.current.write().unwrap() = None;
        Ok(())
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Notify View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Adapter raising [`CollectionChanged`] and [`PropertyChanged`]
/// notifications for every event its parent routes.
///
/// Reads, routing and filtering go to the parent. While a notification
/// is being raised, `len`, `to_vec` and `get` answer from the state the
/// event left behind, so handlers may read the adapter itself.
/// Disposing the adapter always disposes the parent.
pub struct NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    parent: Arc<P>,
    collection_changed: EventHandlers<CollectionChanged<Item>>,
    property_changed: EventHandlers<PropertyChanged>,
    current: Current<Item>,
    subscription: Mutex<Option<Subscription>>,
    disposed: AtomicBool,
}

impl<Item, P> NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    pub fn new(parent: Arc<P>) -> Result<Self> {
        NotifyView::with_expansion(parent, Expansion::Batched)
    }

    pub(crate) fn with_expansion(parent: Arc<P>, expansion: Expansion) -> Result<Self> {
        let collection_changed = EventHandlers::new();
        let property_changed = EventHandlers::new();
        let current = Arc::new(RwLock::new(None));

        let relay = Arc::new(RwLock::new(Relay {
            expansion,
            collection_changed: collection_changed.clone(),
            property_changed: property_changed.clone(),
            current: current.clone(),
        }));
        let subscription = parent.add_observer(relay)?;

        tracing::debug!(?expansion, "notify view attached");

        Ok(NotifyView {
            parent,
            collection_changed,
            property_changed,
            current,
            subscription: Mutex::new(Some(subscription)),
            disposed: AtomicBool::new(false),
        })
    }

    pub fn parent(&self) -> &Arc<P> {
        &self.parent
    }

    /// Runs `f` on the parent state of the event being dispatched, if any.
    fn dispatched<R>(&self, f: impl FnOnce(&Dispatched<Item>) -> R) -> Option<R> {
        self.current.read().unwrap().as_ref().map(f)
    }
}

impl<Item, P> NotifyCollectionChanged<Item> for NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    fn on_collection_changed<F>(&self, f: F) -> Subscription
    where
        F: Fn(&CollectionChanged<Item>) + Send + Sync + 'static,
    {
        self.collection_changed.add(f)
    }

    fn on_property_changed<F>(&self, f: F) -> Subscription
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.property_changed.add(f)
    }
}

impl<Item, P> Observable<Item> for NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<Item>>>>,
    ) -> Result<Subscription> {
        self.parent.add_observer(observer)
    }
}

impl<Item, P> RoutedView<Item> for NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: RoutedView<Item> + ?Sized + 'static,
{
    fn len(&self) -> usize {
        self.dispatched(|d| d.len)
            .unwrap_or_else(|| self.parent.len())
    }

    fn to_vec(&self) -> Vec<Item> {
        self.dispatched(|d| d.items.clone())
            .unwrap_or_else(|| self.parent.to_vec())
    }

    fn state_changed(&self) -> &EventHandlers<CollectionAction> {
        self.parent.state_changed()
    }

    fn dispose_cascade(&self, elements: bool) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        drop(self.subscription.lock().unwrap().take());
        tracing::trace!("notify view disposed");

        self.parent.dispose_cascade(elements);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<T, TView, P> CoupleView<T, TView> for NotifyView<(T, TView), P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>) {
        self.parent.attach_filter(filter);
    }

    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>) {
        self.parent.reset_filter(action);
    }
}

impl<T, TView, P> SortableCoupleView<T, TView> for NotifyView<(T, TView), P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    P: SortableCoupleView<T, TView> + ?Sized + 'static,
{
    fn sort_by_value(&self, cmp: ValueComparison<T>) -> Result<()> {
        self.parent.sort_by_value(cmp)
    }

    fn sort_by_view(&self, cmp: ValueComparison<TView>) -> Result<()> {
        self.parent.sort_by_view(cmp)
    }
}

impl<Item, P> ReadOnlyList<Item> for NotifyView<Item, P>
where
    Item: Clone + Send + Sync + 'static,
    P: ReadOnlyList<Item> + ?Sized + 'static,
{
    fn get(&self, idx: usize) -> Result<Item> {
        match self.dispatched(|d| d.items.get(idx).cloned().ok_or(d.items.len())) {
            Some(found) => found.map_err(|len| ViewError::IndexOutOfRange { index: idx, len }),
            None => self.parent.get(idx),
        }
    }
}

impl<T, TView, P> SingleView<T, TView> for NotifyView<TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    P: SingleView<T, TView> + ?Sized + 'static,
{
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>) {
        self.parent.attach_filter(filter);
    }

    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>) {
        self.parent.reset_filter(action);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        buffer::vec::ObservableVec,
        projection::notify_view::*,
        view::{CoupleViewExt, ObservableExt, RoutedViewExt},
    };

    #[test]
    fn couple_notifications_and_count() {
        let source = ObservableVec::new();
        let view = source
            .to_couple_view(|x: &i32| x * 10)
            .unwrap()
            .to_notify_view()
            .unwrap();

        let changes = Arc::new(Mutex::new(Vec::new()));
        let counts = Arc::new(Mutex::new(0));

        let c = changes.clone();
        let _a = view.on_collection_changed(move |cc| c.lock().unwrap().push(cc.clone()));
        let n = counts.clone();
        let _b = view.on_property_changed(move |p| {
            assert_eq!(*p, PropertyChanged::COUNT);
            *n.lock().unwrap() += 1;
        });

        source.add_range(vec![1, 2]).unwrap();
        source.move_item(0, 1).unwrap();
        source.set(0, 3).unwrap();
        source.clear().unwrap();

        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0].new_items, vec![(1, 10), (2, 20)]);
        assert_eq!(changes[0].new_starting_index, Some(0));
        assert_eq!(changes[1].action, CollectionAction::Move);
        assert_eq!(changes[2].old_items, vec![(2, 20)]);
        assert_eq!(changes[3].action, CollectionAction::Reset);

        // add and reset only
        assert_eq!(*counts.lock().unwrap(), 2);
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn adapter_delegates_filter_and_reads() {
        let source = ObservableVec::with_data(vec![1, 2, 3]);
        let view = source
            .to_couple_view(|x: &i32| *x)
            .unwrap()
            .to_notify_view()
            .unwrap();

        view.attach_filter(Arc::new(crate::view::SynchronizedViewFilter::new(
            |x: &i32, _: &i32| *x != 2,
        )));
        assert_eq!(view.to_vec(), vec![(1, 1), (3, 3)]);
        assert_eq!(view.len(), 3);

        let single = view.to_single_view().unwrap();
        assert_eq!(single.to_vec(), vec![1, 3]);
    }

    #[test]
    fn handlers_can_read_the_adapter() {
        let source = ObservableVec::new();
        let view = source
            .to_couple_view(|x: &i32| *x)
            .unwrap()
            .to_notify_view()
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let (s, weak) = (seen.clone(), Arc::downgrade(&view));
        let _sub = view.on_property_changed(move |_| {
            if let Some(v) = weak.upgrade() {
                s.lock().unwrap().push((v.len(), v.to_vec()));
            }
        });

        source.add(1).unwrap();
        source.add(2).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(1, vec![(1, 1)]), (2, vec![(1, 1), (2, 2)])]
        );
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn dispose_reaches_parent() {
        let source = ObservableVec::with_data(vec![1]);
        let couple = source.to_couple_view(|x: &i32| *x).unwrap();
        let view = couple.to_notify_view().unwrap();

        let hits = Arc::new(Mutex::new(0));
        let h = hits.clone();
        let _sub = view.on_collection_changed(move |_| *h.lock().unwrap() += 1);

        view.dispose();
        source.add(2).unwrap();

        assert!(couple.is_disposed());
        assert_eq!(*hits.lock().unwrap(), 0);
    }
}
