use {
    crate::{
        error::{Result, ViewError},
        view::{
            couple::CoupleView,
            dispose::{DisposalCascade, Dispose},
            event::{CollectionAction, StructuralEvent},
            filter::ViewFilter,
            list::ListView,
            observer::{EventHandlers, ObserverBroadcast},
            routed::{Observable, RoutedView},
            single::{ReadOnlyList, SingleView},
            subscription::Subscription,
            Observer, View, ViewPort,
        },
    },
    std::{
        marker::PhantomData,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc, Mutex, RwLock,
        },
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Independent list of the projection half of a couple view.
pub struct SingleStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    items: Vec<TView>,
    cast: ObserverBroadcast<dyn ListView<TView>>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, TView> SingleStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn new() -> Self {
        SingleStore {
            items: Vec::new(),
            cast: ObserverBroadcast::new(),
            _phantom: PhantomData,
        }
    }
}

impl<T, TView> View for SingleStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    type Msg = StructuralEvent<TView>;
}

impl<T, TView> ListView<TView> for SingleStore<T, TView>
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
        Box::new(self.items.iter())
    }
}

impl<T, TView> ViewPort<TView> for SingleStore<T, TView>
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

impl<T, TView> Observer<dyn ListView<(T, TView)>> for SingleStore<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn reset(&mut self, view: &dyn ListView<(T, TView)>) -> Result<()> {
        self.items = view.iter().map(|(_, v)| v.clone()).collect();
        Ok(())
    }

    fn notify(
        &mut self,
        view: &(dyn ListView<(T, TView)> + 'static),
        ev: &StructuralEvent<(T, TView)>,
    ) -> Result<()> {
        let out = match ev {
            StructuralEvent::Reset => {
                // the parent may have been refilled in a new order
                self.reset(view)?;
                StructuralEvent::Reset
            }
            _ => ev.apply_mapped(&mut self.items, |(_, v)| v.clone())?,
        };

        self.route(&out)
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Single View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub struct SynchronizedSingleView<T, TView, P = dyn CoupleView<T, TView>>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    parent: Arc<P>,
    store: Arc<RwLock<SingleStore<T, TView>>>,
    subscription: Mutex<Option<Subscription>>,
    cascade: DisposalCascade,
    disposed: AtomicBool,
}

impl<T, TView, P> SynchronizedSingleView<T, TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    pub fn new(parent: Arc<P>, cascade: DisposalCascade) -> Result<Self> {
        let store = Arc::new(RwLock::new(SingleStore::new()));
        let subscription = parent.add_observer(store.clone())?;

        tracing::debug!(len = store.read().unwrap().items.len(), "single view attached");

        Ok(SynchronizedSingleView {
            parent,
            store,
            subscription: Mutex::new(Some(subscription)),
            cascade,
            disposed: AtomicBool::new(false),
        })
    }

    pub fn parent(&self) -> &Arc<P> {
        &self.parent
    }
}

impl<T, TView, P> Observable<TView> for SynchronizedSingleView<T, TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<TView>>>>,
    ) -> Result<Subscription> {
        ViewPort::add_observer(&self.store, observer)
    }
}

impl<T, TView, P> RoutedView<TView> for SynchronizedSingleView<T, TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    fn len(&self) -> usize {
        self.store.read().unwrap().items.len()
    }

    fn to_vec(&self) -> Vec<TView> {
        self.store.read().unwrap().items.clone()
    }

    fn state_changed(&self) -> &EventHandlers<CollectionAction> {
        self.parent.state_changed()
    }

    fn dispose_cascade(&self, elements: bool) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        drop(self.subscription.lock().unwrap().take());

        let own_elements = self.cascade.dispose_element && elements;
        let released = DisposalCascade {
            dispose_element: own_elements,
            ..self.cascade
        }
        .release_elements(self.store.read().unwrap().items.iter());

        tracing::trace!(released, dispose_parent = self.cascade.dispose_parent, "single view disposed");

        if self.cascade.dispose_parent {
            // projections already released here must not be released again
            self.parent.dispose_cascade(elements && !own_elements);
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl<T, TView, P> ReadOnlyList<TView> for SynchronizedSingleView<T, TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    fn get(&self, idx: usize) -> Result<TView> {
        let store = self.store.read().unwrap();
        store.items.get(idx).cloned().ok_or(ViewError::IndexOutOfRange {
            index: idx,
            len: store.items.len(),
        })
    }
}

impl<T, TView, P> SingleView<T, TView> for SynchronizedSingleView<T, TView, P>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    P: CoupleView<T, TView> + ?Sized + 'static,
{
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>) {
        self.parent.attach_filter(filter);
    }

    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>) {
        self.parent.reset_filter(action);
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
