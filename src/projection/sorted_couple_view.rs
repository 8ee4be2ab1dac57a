use {
    crate::{
        error::{Result, ViewError},
        projection::couple_view::{CoupleLayout, CoupleStore, SynchronizedCoupleView, Transform, TrackingLayout},
        view::{
            couple::ValueComparison,
            dispose::Dispose,
            event::{CollectionAction, StructuralEvent},
            options::ViewOptions,
            routed::Observable,
            ViewPort,
        },
    },
    std::{
        cmp::Ordering,
        collections::{HashMap, HashSet},
        fmt::Debug,
        hash::Hash,
        sync::Arc,
    },
};

pub type Identity<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Sort Order
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Total order over sort keys: comparator first, identity second.
pub trait SortOrder: Send + Sync + 'static {
    type Key: Clone + Send + Sync + 'static;

    fn compare(&self, a: &Self::Key, b: &Self::Key) -> Ordering;
}

/// Derives and tracks the sort keys of the pairs in a sorted view.
pub trait SortKeyOrder<T, TView>: SortOrder {
    /// Key of a pair about to be inserted.
    fn key_for(&self, value: &T, view: &TView) -> Self::Key;

    /// Key under which `value` is currently stored.
    fn stored_key(&self, value: &T) -> Result<Self::Key>;

    /// Checks that a run of values can be inserted together.
    fn check_admit(&self, _values: &[T]) -> Result<()> {
        Ok(())
    }

    /// Checks that `new` can take the place of `old` once `old` is gone.
    fn check_replace(&self, _old: &T, _new: &T) -> Result<()> {
        Ok(())
    }

    fn admit(&mut self, _value: &T, _view: &TView) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _value: &T) {}

    fn clear(&mut self) {}
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Orders pairs by source value. The key is recomputed from the value
/// itself, so equal values with the same identity are interchangeable.
pub struct ValueOrder<T, K> {
    identity: Identity<T, K>,
    cmp: ValueComparison<T>,
}

impl<T, K> ValueOrder<T, K> {
    pub fn new<I>(identity: I, cmp: ValueComparison<T>) -> Self
    where
        I: Fn(&T) -> K + Send + Sync + 'static,
    {
        ValueOrder {
            identity: Arc::new(identity),
            cmp,
        }
    }
}

impl<T, K> SortOrder for ValueOrder<T, K>
where
    T: Clone + Send + Sync + 'static,
    K: Ord + Clone + Send + Sync + 'static,
{
    type Key = (T, K);

    fn compare(&self, a: &(T, K), b: &(T, K)) -> Ordering {
        (self.cmp)(&a.0, &b.0).then_with(|| a.1.cmp(&b.1))
    }
}

impl<T, TView, K> SortKeyOrder<T, TView> for ValueOrder<T, K>
where
    T: Clone + Send + Sync + 'static,
    K: Ord + Clone + Send + Sync + 'static,
{
    fn key_for(&self, value: &T, _view: &TView) -> (T, K) {
        (value.clone(), (self.identity)(value))
    }

    fn stored_key(&self, value: &T) -> Result<(T, K)> {
        Ok((value.clone(), (self.identity)(value)))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Orders pairs by projection.
///
/// Projections cannot be recomputed on removal, so the projection of
/// every held identity is kept in a lookup table. Identities must be
/// unique.
pub struct ViewOrder<T, TView, K> {
    identity: Identity<T, K>,
    cmp: ValueComparison<TView>,
    views: HashMap<K, TView>,
}

impl<T, TView, K> ViewOrder<T, TView, K> {
    pub fn new<I>(identity: I, cmp: ValueComparison<TView>) -> Self
    where
        I: Fn(&T) -> K + Send + Sync + 'static,
    {
        ViewOrder {
            identity: Arc::new(identity),
            cmp,
            views: HashMap::new(),
        }
    }
}

impl<T, TView, K> SortOrder for ViewOrder<T, TView, K>
where
    T: Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    K: Ord + Clone + Send + Sync + 'static,
{
    type Key = (TView, K);

    fn compare(&self, a: &(TView, K), b: &(TView, K)) -> Ordering {
        (self.cmp)(&a.0, &b.0).then_with(|| a.1.cmp(&b.1))
    }
}

impl<T, TView, K> SortKeyOrder<T, TView> for ViewOrder<T, TView, K>
where
    T: Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    K: Ord + Hash + Debug + Clone + Send + Sync + 'static,
{
    fn key_for(&self, value: &T, view: &TView) -> (TView, K) {
        (view.clone(), (self.identity)(value))
    }

    fn stored_key(&self, value: &T) -> Result<(TView, K)> {
        let id = (self.identity)(value);
        match self.views.get(&id) {
            Some(view) => Ok((view.clone(), id)),
            None => Err(ViewError::not_found(id)),
        }
    }

    fn check_admit(&self, values: &[T]) -> Result<()> {
        let mut batch = HashSet::new();
        for value in values {
            let id = (self.identity)(value);
            if self.views.contains_key(&id) || !batch.insert(id.clone()) {
                return Err(ViewError::contract(format!("duplicate identity {:?}", id)));
            }
        }
        Ok(())
    }

    fn check_replace(&self, old: &T, new: &T) -> Result<()> {
        let id = (self.identity)(new);
        if id != (self.identity)(old) && self.views.contains_key(&id) {
            return Err(ViewError::contract(format!("duplicate identity {:?}", id)));
        }
        Ok(())
    }

    fn admit(&mut self, value: &T, view: &TView) -> Result<()> {
        self.check_admit(std::slice::from_ref(value))?;
        self.views.insert((self.identity)(value), view.clone());
        Ok(())
    }

    fn release(&mut self, value: &T) {
        self.views.remove(&(self.identity)(value));
    }

    fn clear(&mut self) {
        self.views.clear();
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
              Sorted Layout
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Pairs kept in key order, with the keys in a parallel array of the
/// same length.
pub struct Sorted<O: SortOrder> {
    order: O,
    keys: Vec<O::Key>,
}

impl<O: SortOrder> Sorted<O> {
    pub fn new(order: O) -> Self {
        Sorted {
            order,
            keys: Vec::new(),
        }
    }

    /// Index where `key` goes; after any equal key.
    fn insertion_point(&self, key: &O::Key) -> usize {
        match self.keys.binary_search_by(|k| self.order.compare(k, key)) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    pub fn keys(&self) -> &[O::Key] {
        &self.keys
    }
}

impl<O> Sorted<O>
where
    O: SortOrder,
{
    fn locate<T, TView>(&self, value: &T) -> Result<usize>
    where
        O: SortKeyOrder<T, TView>,
    {
        let key = self.order.stored_key(value)?;
        self.keys
            .binary_search_by(|k| self.order.compare(k, &key))
            .map_err(|idx| ViewError::not_found(format_args!("sort key near index {}", idx)))
    }

    /// Checks that every value of a run is held at least as often as
    /// it occurs in the run.
    fn check_removal<T, TView>(&self, values: &[T]) -> Result<()>
    where
        O: SortKeyOrder<T, TView>,
    {
        let keys = values
            .iter()
            .map(|v| self.order.stored_key(v))
            .collect::<Result<Vec<_>>>()?;

        for key in keys.iter() {
            let wanted = keys
                .iter()
                .filter(|k| self.order.compare(k, key) == Ordering::Equal)
                .count();
            let lo = self
                .keys
                .partition_point(|k| self.order.compare(k, key) == Ordering::Less);
            let hi = self
                .keys
                .partition_point(|k| self.order.compare(k, key) != Ordering::Greater);

            if hi - lo < wanted {
                return Err(ViewError::not_found(format_args!(
                    "{} of {} equal sort keys held",
                    hi - lo,
                    wanted
                )));
            }
        }
        Ok(())
    }
}

impl<T, TView, O> CoupleLayout<T, TView> for Sorted<O>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    O: SortKeyOrder<T, TView>,
{
    const KIND: &'static str = "sorted couple";

    fn snapshot(store: &mut CoupleStore<T, TView, Self>, items: Vec<T>) -> Result<()> {
        store.layout.order.clear();
        store.layout.order.check_admit(&items)?;

        let mut entries = Vec::with_capacity(items.len());
        for (value, view) in store.project(items) {
            store.layout.order.admit(&value, &view)?;
            let key = store.layout.order.key_for(&value, &view);
            entries.push((key, (value, view)));
        }

        let order = &store.layout.order;
        entries.sort_by(|a, b| order.compare(&a.0, &b.0));

        let (keys, pairs): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        store.layout.keys = keys;
        store.pairs = pairs;
        Ok(())
    }
}

impl<T, TView, O> TrackingLayout<T, TView> for Sorted<O>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    O: SortKeyOrder<T, TView>,
{
    fn apply(store: &mut CoupleStore<T, TView, Self>, ev: &StructuralEvent<T>) -> Result<()> {
        let action = ev.action();
        ev.validate_payload()?;

        match ev {
            StructuralEvent::Add { items, .. } => {
                store.layout.order.check_admit(items)?;
                for value in items {
                    insert_sorted(store, value, action)?;
                }
                Ok(())
            }
            StructuralEvent::Remove { items, .. } => {
                store.layout.check_removal::<T, TView>(items)?;
                for value in items {
                    remove_sorted(store, value, action)?;
                }
                Ok(())
            }
            StructuralEvent::Replace { new_item, old_item, .. } => {
                store.layout.locate::<T, TView>(old_item)?;
                store.layout.order.check_replace(old_item, new_item)?;
                remove_sorted(store, old_item, action)?;
                insert_sorted(store, new_item, action)
            }
            StructuralEvent::Move { item, .. } => {
                // source positions do not affect the sort order
                let idx = store.layout.locate::<T, TView>(item)?;
                let pair = store.pairs[idx].clone();
                store.filter.on_move(&pair.0, &pair.1, action);
                store.route(&StructuralEvent::moved(pair, idx, idx))
            }
            StructuralEvent::Reset => {
                store.clear(action);
                store.layout.keys.clear();
                store.layout.order.clear();
                store.route(&StructuralEvent::Reset)
            }
        }
    }
}

fn insert_sorted<T, TView, O>(
    store: &mut CoupleStore<T, TView, Sorted<O>>,
    value: &T,
    action: CollectionAction,
) -> Result<()>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    O: SortKeyOrder<T, TView>,
{
    let view = (store.transform)(value);
    store.layout.order.admit(value, &view)?;

    let key = store.layout.order.key_for(value, &view);
    let idx = store.layout.insertion_point(&key);

    store.layout.keys.insert(idx, key);
    store.pairs.insert(idx, (value.clone(), view));

    let pair = store.pairs[idx].clone();
    store.filter.on_add(&pair.0, &pair.1, action);
    store.route(&StructuralEvent::add(pair, idx))
}

fn remove_sorted<T, TView, O>(
    store: &mut CoupleStore<T, TView, Sorted<O>>,
    value: &T,
    action: CollectionAction,
) -> Result<()>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    O: SortKeyOrder<T, TView>,
{
    let idx = store.layout.locate::<T, TView>(value)?;

    store.layout.keys.remove(idx);
    let pair = store.pairs.remove(idx);
    store.layout.order.release(value);

    store.filter.on_remove(&pair.0, &pair.1, action);
    store.route(&StructuralEvent::remove(pair, idx))
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
           Sorted Couple View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub type SortedCoupleView<T, TView, O> = SynchronizedCoupleView<T, TView, Sorted<O>>;

impl<T, TView, O> SynchronizedCoupleView<T, TView, Sorted<O>>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    O: SortKeyOrder<T, TView>,
{
    pub fn new<S>(
        source: &S,
        transform: Transform<T, TView>,
        order: O,
        options: ViewOptions,
    ) -> Result<Self>
    where
        S: Observable<T> + ?Sized,
    {
        SynchronizedCoupleView::subscribe(source, transform, Sorted::new(order), options)
    }

    /// Copy of the sort keys, in store order.
    pub fn sort_keys(&self) -> Vec<O::Key> {
        self.store().read().unwrap().layout.keys().to_vec()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
