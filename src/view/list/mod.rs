use crate::view::{event::StructuralEvent, View};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Read access to the backing store of a list-shaped view, as seen
/// by its observers while the store's lock is held.
pub trait ListView<Item>: View<Msg = StructuralEvent<Item>>
where
    Item: Clone + Send + Sync + 'static,
{
    /// Raw number of stored items, independent of any filter.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `idx` in store order.
    fn get(&self, idx: usize) -> Option<&Item>;

    /// The visible enumeration: store order (or its reverse),
    /// restricted to items passing the attached filter.
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Item> + 'a>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub trait ListViewExt<Item>: ListView<Item>
where
    Item: Clone + Send + Sync + 'static,
{
    fn to_vec(&self) -> Vec<Item> {
        self.iter().cloned().collect()
    }
}

impl<Item, V: ListView<Item> + ?Sized> ListViewExt<Item> for V where
    Item: Clone + Send + Sync + 'static
{
}
