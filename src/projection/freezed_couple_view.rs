use {
    crate::{
        error::Result,
        projection::couple_view::{CoupleLayout, CoupleStore, SynchronizedCoupleView, Transform},
        view::{
            couple::{SortableCoupleView, ValueComparison},
            dispose::Dispose,
            event::StructuralEvent,
            options::ViewOptions,
            ViewPort,
        },
    },
    std::cmp::Ordering,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Pairs fixed at construction; only their order may change, through
/// an explicit sort.
pub struct Frozen;

impl<T, TView> CoupleLayout<T, TView> for Frozen
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    const KIND: &'static str = "freezed couple";

    fn snapshot(store: &mut CoupleStore<T, TView, Self>, items: Vec<T>) -> Result<()> {
        store.pairs = store.project(items);
        Ok(())
    }
}

/// Couple view over an immutable snapshot. It follows no source, so
/// it never routes anything except the `Reset` of a sort.
pub type FreezedCoupleView<T, TView> = SynchronizedCoupleView<T, TView, Frozen>;

impl<T, TView> SynchronizedCoupleView<T, TView, Frozen>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
{
    pub fn frozen(items: Vec<T>, transform: Transform<T, TView>, options: ViewOptions) -> Self {
        let mut store = CoupleStore::new(transform, Frozen, options.reverse);
        store.pairs = store.project(items);
        SynchronizedCoupleView::detached(store, options)
    }

    fn sort_pairs<F>(&self, cmp: F) -> Result<()>
    where
        F: Fn(&(T, TView), &(T, TView)) -> Ordering,
    {
        let mut store = self.store().write().unwrap();
        store.pairs.sort_by(cmp);

        tracing::trace!(len = store.pairs.len(), "freezed couple view sorted");
        store.route(&StructuralEvent::Reset)
    }
}

impl<T, TView> SortableCoupleView<T, TView> for SynchronizedCoupleView<T, TView, Frozen>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
{
    fn sort_by_value(&self, cmp: ValueComparison<T>) -> Result<()> {
        self.sort_pairs(|a, b| cmp(&a.0, &b.0))
    }

    fn sort_by_view(&self, cmp: ValueComparison<TView>) -> Result<()> {
        self.sort_pairs(|a, b| cmp(&a.1, &b.1))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
