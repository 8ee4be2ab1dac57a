use {
    crate::{
        error::Result,
        projection::single_view::SynchronizedSingleView,
        view::{
            dispose::{DisposalCascade, Dispose},
            filter::ViewFilter,
            routed::RoutedView,
        },
    },
    std::{cmp::Ordering, sync::Arc},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Couple View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// A view over `(value, projection)` pairs.
pub trait CoupleView<T, TView>: RoutedView<(T, TView)>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    /// Replaces the current filter, then runs `filter.on_attach` for
    /// every held pair in store order.
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>);

    /// Restores the null filter and runs `action` once per held pair.
    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>);
}

pub type ValueComparison<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Couple view whose order can be changed in place.
pub trait SortableCoupleView<T, TView>: CoupleView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    /// Reorders by source value and routes a single `Reset`.
    fn sort_by_value(&self, cmp: ValueComparison<T>) -> Result<()>;

    /// Reorders by projection and routes a single `Reset`.
    fn sort_by_view(&self, cmp: ValueComparison<TView>) -> Result<()>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub trait CoupleViewExt<T, TView, C>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    C: CoupleView<T, TView> + ?Sized + 'static,
{
    /// Projections of this view as a read-only list.
    ///
    /// The list copies the parent's visible enumeration when attached and
    /// on every Reset. Later events land at the parent's store positions,
    /// so over a reversed or filtered parent it follows store order until
    /// the next Reset.
    fn to_single_view(&self) -> Result<Arc<SynchronizedSingleView<T, TView, C>>> {
        self.to_single_view_with(DisposalCascade::default())
    }

    fn to_single_view_with(
        &self,
        cascade: DisposalCascade,
    ) -> Result<Arc<SynchronizedSingleView<T, TView, C>>>;
}

impl<T, TView, C> CoupleViewExt<T, TView, C> for Arc<C>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Dispose + Send + Sync + 'static,
    C: CoupleView<T, TView> + ?Sized + 'static,
{
    fn to_single_view_with(
        &self,
        cascade: DisposalCascade,
    ) -> Result<Arc<SynchronizedSingleView<T, TView, C>>> {
        SynchronizedSingleView::new(self.clone(), cascade).map(Arc::new)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub trait SortableCoupleViewExt<T, TView>: SortableCoupleView<T, TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    /// Sorts by a key extracted from each source value.
    fn sort_by_key<K, F>(&self, key: F, ascending: bool) -> Result<()>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.sort_by_value(crate::projection::comparer::by_key(key, ascending))
    }

    fn sort_by_view_key<K, F>(&self, key: F, ascending: bool) -> Result<()>
    where
        K: Ord + 'static,
        F: Fn(&TView) -> K + Send + Sync + 'static,
    {
        self.sort_by_view(crate::projection::comparer::by_key(key, ascending))
    }
}

impl<T, TView, S> SortableCoupleViewExt<T, TView> for S
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    S: SortableCoupleView<T, TView> + ?Sized,
{
}
