use {
    crate::{
        error::Result,
        projection::{
            comparer::by_key,
            couple_view::{Positional, SynchronizedCoupleView},
            filterless_view::FilterlessView,
            notify_view::NotifyView,
            sorted_couple_view::{SortedCoupleView, ValueOrder, ViewOrder},
        },
        view::{
            dispose::Dispose,
            event::{CollectionAction, StructuralEvent},
            list::ListView,
            observer::{EventHandlers, NotifyFnObserver, Observer},
            options::ViewOptions,
            subscription::Subscription,
        },
    },
    std::{
        cmp::Ordering,
        sync::{Arc, RwLock},
    },
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Observable
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Anything that routes structural events over `Item` to observers.
pub trait Observable<Item>: Send + Sync
where
    Item: Clone + Send + Sync + 'static,
{
    /// Snapshots the current contents into `observer` (through
    /// [`Observer::reset`]) and subscribes it to all later events,
    /// atomically with respect to mutations.
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<Item>>>>,
    ) -> Result<Subscription>;
}

/// View-chain builders available on every observable.
pub trait ObservableExt<Item>: Observable<Item>
where
    Item: Clone + Send + Sync + 'static,
{
    /// Calls `f` with every event routed from now on.
    fn on_routed<F>(&self, f: F) -> Result<Subscription>
    where
        F: Fn(&StructuralEvent<Item>) + Send + Sync + 'static,
    {
        let obs: Arc<RwLock<dyn Observer<dyn ListView<Item>>>> =
            Arc::new(RwLock::new(NotifyFnObserver::<dyn ListView<Item>, _>::new(f)));
        self.add_observer(obs)
    }

    fn to_couple_view<TView, F>(&self, transform: F) -> Result<Arc<SynchronizedCoupleView<Item, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
    {
        self.to_couple_view_with(transform, ViewOptions::default())
    }

    fn to_couple_view_with<TView, F>(
        &self,
        transform: F,
        options: ViewOptions,
    ) -> Result<Arc<SynchronizedCoupleView<Item, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
    {
        SynchronizedCoupleView::<Item, TView, Positional>::new(self, Arc::new(transform), options)
            .map(Arc::new)
    }

    /// Pairs kept in `cmp` order over source values, ties broken by
    /// `identity`.
    fn to_sorted_couple_view<K, TView, I, F, C>(
        &self,
        identity: I,
        transform: F,
        cmp: C,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ValueOrder<Item, K>>>>
    where
        K: Ord + Clone + Send + Sync + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        C: Fn(&Item, &Item) -> Ordering + Send + Sync + 'static,
    {
        self.to_sorted_couple_view_with(identity, transform, cmp, ViewOptions::default())
    }

    fn to_sorted_couple_view_with<K, TView, I, F, C>(
        &self,
        identity: I,
        transform: F,
        cmp: C,
        options: ViewOptions,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ValueOrder<Item, K>>>>
    where
        K: Ord + Clone + Send + Sync + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        C: Fn(&Item, &Item) -> Ordering + Send + Sync + 'static,
    {
        SortedCoupleView::new(
            self,
            Arc::new(transform),
            ValueOrder::new(identity, Arc::new(cmp)),
            options,
        )
        .map(Arc::new)
    }

    /// Pairs kept in `cmp` order over projections, ties broken by
    /// `identity`. Identities must be unique.
    fn to_sorted_couple_view_by_view<K, TView, I, F, C>(
        &self,
        identity: I,
        transform: F,
        cmp: C,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ViewOrder<Item, TView, K>>>>
    where
        K: Ord + Clone + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        C: Fn(&TView, &TView) -> Ordering + Send + Sync + 'static,
    {
        self.to_sorted_couple_view_by_view_with(identity, transform, cmp, ViewOptions::default())
    }

    fn to_sorted_couple_view_by_view_with<K, TView, I, F, C>(
        &self,
        identity: I,
        transform: F,
        cmp: C,
        options: ViewOptions,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ViewOrder<Item, TView, K>>>>
    where
        K: Ord + Clone + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        C: Fn(&TView, &TView) -> Ordering + Send + Sync + 'static,
    {
        SortedCoupleView::new(
            self,
            Arc::new(transform),
            ViewOrder::new(identity, Arc::new(cmp)),
            options,
        )
        .map(Arc::new)
    }

    fn to_sorted_couple_view_by_key<K, TView, S, I, F, G>(
        &self,
        identity: I,
        transform: F,
        key: G,
        ascending: bool,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ValueOrder<Item, K>>>>
    where
        K: Ord + Clone + Send + Sync + 'static,
        S: Ord + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        G: Fn(&Item) -> S + Send + Sync + 'static,
    {
        self.to_sorted_couple_view_by_key_with(
            identity,
            transform,
            key,
            ascending,
            ViewOptions::default(),
        )
    }

    fn to_sorted_couple_view_by_key_with<K, TView, S, I, F, G>(
        &self,
        identity: I,
        transform: F,
        key: G,
        ascending: bool,
        options: ViewOptions,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ValueOrder<Item, K>>>>
    where
        K: Ord + Clone + Send + Sync + 'static,
        S: Ord + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        G: Fn(&Item) -> S + Send + Sync + 'static,
    {
        SortedCoupleView::new(
            self,
            Arc::new(transform),
            ValueOrder::new(identity, by_key(key, ascending)),
            options,
        )
        .map(Arc::new)
    }

    fn to_sorted_couple_view_by_view_key<K, TView, S, I, F, G>(
        &self,
        identity: I,
        transform: F,
        key: G,
        ascending: bool,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ViewOrder<Item, TView, K>>>>
    where
        K: Ord + Clone + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static,
        S: Ord + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        G: Fn(&TView) -> S + Send + Sync + 'static,
    {
        self.to_sorted_couple_view_by_view_key_with(
            identity,
            transform,
            key,
            ascending,
            ViewOptions::default(),
        )
    }

    fn to_sorted_couple_view_by_view_key_with<K, TView, S, I, F, G>(
        &self,
        identity: I,
        transform: F,
        key: G,
        ascending: bool,
        options: ViewOptions,
    ) -> Result<Arc<SortedCoupleView<Item, TView, ViewOrder<Item, TView, K>>>>
    where
        K: Ord + Clone + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static,
        S: Ord + 'static,
        TView: Clone + Dispose + Send + Sync + 'static,
        I: Fn(&Item) -> K + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
        G: Fn(&TView) -> S + Send + Sync + 'static,
    {
        SortedCoupleView::new(
            self,
            Arc::new(transform),
            ViewOrder::new(identity, by_key(key, ascending)),
            options,
        )
        .map(Arc::new)
    }

    /// Projections only, without pairs or filtering.
    fn to_filterless_view<TView, F>(
        &self,
        transform: F,
        reverse: bool,
    ) -> Result<Arc<FilterlessView<Item, TView>>>
    where
        TView: Clone + Send + Sync + 'static,
        F: Fn(&Item) -> TView + Send + Sync + 'static,
    {
        FilterlessView::new(self, Arc::new(transform), reverse).map(Arc::new)
    }
}

impl<Item, O> ObservableExt<Item> for O
where
    Item: Clone + Send + Sync + 'static,
    O: Observable<Item> + ?Sized,
{
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Routed View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// A derived view that owns a subscription to its parent and can be
/// disposed explicitly.
pub trait RoutedView<Item>: Observable<Item>
where
    Item: Clone + Send + Sync + 'static,
{
    /// Raw size of the backing store. An attached filter does not
    /// change it, only the enumeration.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current enumeration, filtered and in iteration order.
    fn to_vec(&self) -> Vec<Item>;

    /// Listeners receiving the bare action of every source event,
    /// after the view has applied it.
    fn state_changed(&self) -> &EventHandlers<CollectionAction>;

    /// Unsubscribes and releases resources per the configured cascade.
    ///
    /// `elements == false` means a derived view has already released
    /// the projections it was handed and they must not be touched
    /// again. Disposing twice is a no-op.
    fn dispose_cascade(&self, elements: bool);

    fn dispose(&self) {
        self.dispose_cascade(true)
    }

    fn is_disposed(&self) -> bool;
}

pub trait RoutedViewExt<Item, V>
where
    Item: Clone + Send + Sync + 'static,
    V: RoutedView<Item> + ?Sized + 'static,
{
    /// Adapter raising collection-changed and `Count` property-changed
    /// notifications for every routed event.
    fn to_notify_view(&self) -> Result<Arc<NotifyView<Item, V>>>;
}

impl<Item, V> RoutedViewExt<Item, V> for Arc<V>
where
    Item: Clone + Send + Sync + 'static,
    V: RoutedView<Item> + ?Sized + 'static,
{
    fn to_notify_view(&self) -> Result<Arc<NotifyView<Item, V>>> {
        NotifyView::new(self.clone()).map(Arc::new)
    }
}
