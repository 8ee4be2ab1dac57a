use {
    crate::{
        error::{Result, ViewError},
        view::{
            event::StructuralEvent, list::ListView, observer::ObserverBroadcast,
            routed::Observable, subscription::Subscription, Observer, View, ViewPort,
        },
    },
    std::sync::{Arc, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct VecState<T>
where
    T: Clone + Send + Sync + 'static,
{
    data: Vec<T>,
    cast: ObserverBroadcast<dyn ListView<T>>,
}

impl<T> View for VecState<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Msg = StructuralEvent<T>;
}

impl<T> ListView<T> for VecState<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, idx: usize) -> Option<&T> {
        self.data.get(idx)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        Box::new(self.data.iter())
    }
}

impl<T> ViewPort<T> for VecState<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn broadcast(&self) -> &ObserverBroadcast<dyn ListView<T>> {
        &self.cast
    }

    fn broadcast_mut(&mut self) -> &mut ObserverBroadcast<dyn ListView<T>> {
        &mut self.cast
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Lock-guarded list that routes every mutation as a structural event.
///
/// Clones share the same list. All dependent views are updated before
/// a mutating call returns; an error from any of them is returned by
/// that call after the list itself has been changed.
#[derive(Clone)]
pub struct ObservableVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Arc<RwLock<VecState<T>>>,
}

impl<T> ObservableVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        ObservableVec::with_data(Vec::new())
    }

    pub fn with_data(data: Vec<T>) -> Self {
        ObservableVec {
            state: Arc::new(RwLock::new(VecState {
                data,
                cast: ObserverBroadcast::new(),
            })),
        }
    }

    /// Applies `ev` and routes it to all observers.
    pub fn apply(&self, ev: StructuralEvent<T>) -> Result<()> {
        self.edit(|_| Ok(Some(ev))).map(|_| ())
    }

    /// Builds an event from the current contents and applies it in the
    /// same critical section. `None` leaves the list untouched.
    fn edit<F>(&self, f: F) -> Result<Option<StructuralEvent<T>>>
    where
        F: FnOnce(&[T]) -> Result<Option<StructuralEvent<T>>>,
    {
        let mut state = self.state.write().unwrap();
        let ev = match f(&state.data)? {
            Some(ev) => ev.apply_to(&mut state.data)?,
            None => return Ok(None),
        };

        tracing::trace!(action = ?ev.action(), len = state.data.len(), "source mutated");
        state.route(&ev)?;
        Ok(Some(ev))
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<T> {
        self.state.read().unwrap().data.get(idx).cloned()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.state.read().unwrap().data.clone()
    }

    pub fn add(&self, item: T) -> Result<()> {
        self.edit(|data| Ok(Some(StructuralEvent::add(item, data.len()))))
            .map(|_| ())
    }

    pub fn add_range(&self, items: Vec<T>) -> Result<()> {
        self.edit(|data| {
            Ok((!items.is_empty()).then(|| StructuralEvent::add_range(items, data.len())))
        })
        .map(|_| ())
    }

    pub fn insert(&self, idx: usize, item: T) -> Result<()> {
        self.edit(|data| {
            check_index(idx, data.len() + 1)?;
            Ok(Some(StructuralEvent::add(item, idx)))
        })
        .map(|_| ())
    }

    pub fn insert_range(&self, idx: usize, items: Vec<T>) -> Result<()> {
        self.edit(|data| {
            check_index(idx, data.len() + 1)?;
            Ok((!items.is_empty()).then(|| StructuralEvent::add_range(items, idx)))
        })
        .map(|_| ())
    }

    pub fn remove_at(&self, idx: usize) -> Result<T> {
        let ev = self.edit(|data| {
            check_index(idx, data.len())?;
            Ok(Some(StructuralEvent::remove(data[idx].clone(), idx)))
        })?;

        match ev {
            Some(StructuralEvent::Remove { mut items, .. }) if items.len() == 1 => {
                Ok(items.remove(0))
            }
            _ => Err(ViewError::contract("single removal applied as a different event")),
        }
    }

    pub fn remove_range(&self, idx: usize, count: usize) -> Result<()> {
        self.edit(|data| {
            if count == 0 {
                return Ok(None);
            }
            let last = idx.checked_add(count - 1).ok_or(ViewError::IndexOutOfRange {
                index: idx,
                len: data.len(),
            })?;
            check_index(last, data.len())?;
            Ok(Some(StructuralEvent::remove_range(
                data[idx..idx + count].to_vec(),
                idx,
            )))
        })
        .map(|_| ())
    }

    /// Removes the first item equal to `item`; `false` if there was none.
    pub fn remove(&self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.edit(|data| {
            Ok(data
                .iter()
                .position(|x| x == item)
                .map(|idx| StructuralEvent::remove(data[idx].clone(), idx)))
        })
        .map(|ev| ev.is_some())
    }

    pub fn set(&self, idx: usize, item: T) -> Result<()> {
        self.edit(|data| {
            check_index(idx, data.len())?;
            Ok(Some(StructuralEvent::replace(item, data[idx].clone(), idx)))
        })
        .map(|_| ())
    }

    pub fn move_item(&self, old_idx: usize, new_idx: usize) -> Result<()> {
        self.edit(|data| {
            check_index(old_idx, data.len())?;
            check_index(new_idx, data.len())?;
            Ok(Some(StructuralEvent::moved(data[old_idx].clone(), old_idx, new_idx)))
        })
        .map(|_| ())
    }

    /// Empties the list; routed as a `Reset`.
    pub fn clear(&self) -> Result<()> {
        self.edit(|_| Ok(Some(StructuralEvent::Reset))).map(|_| ())
    }
}

impl<T> Default for ObservableVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        ObservableVec::new()
    }
}

impl<T> Observable<T> for ObservableVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn add_observer(
        &self,
        observer: Arc<RwLock<dyn Observer<dyn ListView<T>>>>,
    ) -> Result<Subscription> {
        ViewPort::add_observer(&self.state, observer)
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(ViewError::IndexOutOfRange { index, len })
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::buffer::vec::*;
    use crate::view::ObservableExt;

    #[test]
    fn vec_routes_positional_events() {
        let buffer = ObservableVec::new();
        let log = Arc::new(RwLock::new(Vec::new()));

        let l = log.clone();
        let _sub = buffer
            .on_routed(move |ev: &StructuralEvent<char>| l.write().unwrap().push(ev.clone()))
            .unwrap();

        buffer.add('a').unwrap();
        buffer.add_range(vec!['b', 'c']).unwrap();
        buffer.move_item(2, 0).unwrap();
        buffer.set(1, 'x').unwrap();

        assert_eq!(buffer.to_vec(), vec!['c', 'x', 'b']);
        assert_eq!(
            *log.read().unwrap(),
            vec![
                StructuralEvent::add('a', 0),
                StructuralEvent::add_range(vec!['b', 'c'], 1),
                StructuralEvent::moved('c', 2, 0),
                StructuralEvent::replace('x', 'a', 1),
            ]
        );
    }

    #[test]
    fn vec_rejects_bad_indices() {
        let buffer = ObservableVec::with_data(vec![1, 2, 3]);

        assert!(matches!(
            buffer.insert(5, 0),
            Err(ViewError::IndexOutOfRange { index: 5, len: 4 })
        ));
        assert!(buffer.remove_range(2, 2).is_err());
        assert!(matches!(
            buffer.remove_range(usize::MAX, 2),
            Err(ViewError::IndexOutOfRange { len: 3, .. })
        ));
        assert!(buffer.set(3, 0).is_err());
        assert_eq!(buffer.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn vec_remove_by_value() {
        let buffer = ObservableVec::with_data(vec![1, 2, 3, 2]);

        assert_eq!(buffer.remove(&2).unwrap(), true);
        assert_eq!(buffer.remove(&7).unwrap(), false);
        assert_eq!(buffer.remove_at(0).unwrap(), 1);
        assert_eq!(buffer.to_vec(), vec![3, 2]);
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let buffer = ObservableVec::new();
        let hits = Arc::new(RwLock::new(0));

        let h = hits.clone();
        let sub = buffer
            .on_routed(move |_: &StructuralEvent<u8>| *h.write().unwrap() += 1)
            .unwrap();

        buffer.add(1).unwrap();
        drop(sub);
        buffer.add(2).unwrap();

        assert_eq!(*hits.read().unwrap(), 1);
        assert_eq!(buffer.len(), 2);
    }
}
