use {
    crate::{
        error::{Result, ViewError},
        projection::list_adapter::ListAdapter,
        view::{filter::ViewFilter, routed::RoutedView},
    },
    std::sync::Arc,
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
             Read-Only List
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Indexable read access to a projection.
///
/// Structural mutation is never possible through a projection; the
/// mutators exist so list-shaped consumers get a proper error instead
/// of a missing method.
pub trait ReadOnlyList<Item>: RoutedView<Item>
where
    Item: Clone + Send + Sync + 'static,
{
    fn get(&self, idx: usize) -> Result<Item>;

    fn index_of(&self, item: &Item) -> Option<usize>
    where
        Item: PartialEq,
    {
        self.to_vec().iter().position(|x| x == item)
    }

    fn contains(&self, item: &Item) -> bool
    where
        Item: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Copies the current contents into `dst` starting at `start`.
    fn copy_to(&self, dst: &mut [Item], start: usize) -> Result<()> {
        let items = self.to_vec();
        let end = match start.checked_add(items.len()) {
            Some(end) if end <= dst.len() => end,
            _ => {
                return Err(ViewError::IndexOutOfRange {
                    index: start,
                    len: dst.len(),
                })
            }
        };
        dst[start..end].clone_from_slice(&items);
        Ok(())
    }

    fn add(&self, _item: Item) -> Result<usize> {
        Err(ViewError::unsupported("add"))
    }

    fn insert(&self, _idx: usize, _item: Item) -> Result<()> {
        Err(ViewError::unsupported("insert"))
    }

    fn remove(&self, _item: &Item) -> Result<()> {
        Err(ViewError::unsupported("remove"))
    }

    fn remove_at(&self, _idx: usize) -> Result<()> {
        Err(ViewError::unsupported("remove_at"))
    }

    fn clear(&self) -> Result<()> {
        Err(ViewError::unsupported("clear"))
    }

    fn set(&self, _idx: usize, _item: Item) -> Result<()> {
        Err(ViewError::unsupported("set"))
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
               Single View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Projections only, mirrored from a couple view.
///
/// Filtering acts on the couple view it was built from.
pub trait SingleView<T, TView>: ReadOnlyList<TView>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
{
    fn attach_filter(&self, filter: Arc<dyn ViewFilter<T, TView>>);
    fn reset_filter(&self, action: Option<&dyn Fn(&T, &TView)>);
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub trait SingleViewExt<T, TView, S>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    S: SingleView<T, TView> + ?Sized + 'static,
{
    /// List-shaped adapter: batched runs are expanded to one
    /// notification per item.
    fn to_list_adapter(&self) -> Result<Arc<ListAdapter<TView, S>>>;
}

impl<T, TView, S> SingleViewExt<T, TView, S> for Arc<S>
where
    T: Clone + Send + Sync + 'static,
    TView: Clone + Send + Sync + 'static,
    S: SingleView<T, TView> + ?Sized + 'static,
{
    fn to_list_adapter(&self) -> Result<Arc<ListAdapter<TView, S>>> {
        ListAdapter::list_adapter(self.clone()).map(Arc::new)
    }
}
