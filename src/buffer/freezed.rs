use {
    crate::{
        error::Result,
        projection::{comparer::by_key, freezed_couple_view::FreezedCoupleView},
        view::{couple::SortableCoupleView, dispose::Dispose, options::ViewOptions},
    },
    std::{cmp::Ordering, sync::Arc},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Immutable list. It never routes events, so every view built from
/// it is a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct FreezedList<T>
where
    T: Clone + Send + Sync + 'static,
{
    items: Arc<[T]>,
}

impl<T> FreezedList<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(items: Vec<T>) -> Self {
        FreezedList {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn to_couple_view<TView, F>(&self, transform: F, reverse: bool) -> Arc<FreezedCoupleView<T, TView>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
    {
        self.to_couple_view_with(transform, ViewOptions::new().reverse(reverse))
    }

    pub fn to_couple_view_with<TView, F>(
        &self,
        transform: F,
        options: ViewOptions,
    ) -> Arc<FreezedCoupleView<T, TView>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
    {
        Arc::new(FreezedCoupleView::frozen(
            self.items.to_vec(),
            Arc::new(transform),
            options,
        ))
    }

    /// Snapshot in list order that can be re-sorted later.
    pub fn to_sortable_couple_view<TView, F>(&self, transform: F) -> Arc<FreezedCoupleView<T, TView>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
    {
        self.to_couple_view_with(transform, ViewOptions::default())
    }

    /// Sortable snapshot, initially in `cmp` order over values.
    pub fn to_sorted_couple_view<TView, F, C>(
        &self,
        transform: F,
        cmp: C,
    ) -> Result<Arc<FreezedCoupleView<T, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let view = self.to_sortable_couple_view(transform);
        view.sort_by_value(Arc::new(cmp))?;
        Ok(view)
    }

    /// Sortable snapshot, initially in `cmp` order over projections.
    pub fn to_sorted_couple_view_by_view<TView, F, C>(
        &self,
        transform: F,
        cmp: C,
    ) -> Result<Arc<FreezedCoupleView<T, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
        C: Fn(&TView, &TView) -> Ordering + Send + Sync + 'static,
    {
        let view = self.to_sortable_couple_view(transform);
        view.sort_by_view(Arc::new(cmp))?;
        Ok(view)
    }

    pub fn to_sorted_couple_view_by_key<TView, K, F, G>(
        &self,
        transform: F,
        key: G,
        ascending: bool,
    ) -> Result<Arc<FreezedCoupleView<T, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        K: Ord + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
        G: Fn(&T) -> K + Send + Sync + 'static,
    {
        let view = self.to_sortable_couple_view(transform);
        view.sort_by_value(by_key(key, ascending))?;
        Ok(view)
    }

    pub fn to_sorted_couple_view_by_view_key<TView, K, F, G>(
        &self,
        transform: F,
        key: G,
        ascending: bool,
    ) -> Result<Arc<FreezedCoupleView<T, TView>>>
    where
        TView: Clone + Dispose + Send + Sync + 'static,
        K: Ord + 'static,
        F: Fn(&T) -> TView + Send + Sync + 'static,
        G: Fn(&TView) -> K + Send + Sync + 'static,
    {
        let view = self.to_sortable_couple_view(transform);
        view.sort_by_view(by_key(key, ascending))?;
        Ok(view)
    }
}

impl<T> From<Vec<T>> for FreezedList<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(items: Vec<T>) -> Self {
        FreezedList::new(items)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
