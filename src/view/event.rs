use {
    crate::error::{Result, ViewError},
    serde::{Deserialize, Serialize},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Bare action tag of a structural event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionAction {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

/// One atomic mutation of an ordered collection.
///
/// `Add` and `Remove` carry a contiguous run starting at `index`
/// (a single item is a run of length one), `Replace` and `Move`
/// always carry exactly one item, `Reset` carries nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StructuralEvent<Item> {
    Add { items: Vec<Item>, index: usize },
    Remove { items: Vec<Item>, index: usize },
    Replace { new_item: Item, old_item: Item, index: usize },
    Move { item: Item, old_index: usize, new_index: usize },
    Reset,
}

impl<Item> StructuralEvent<Item> {
    pub fn add(item: Item, index: usize) -> Self {
        StructuralEvent::Add { items: vec![item], index }
    }

    pub fn add_range(items: Vec<Item>, index: usize) -> Self {
        StructuralEvent::Add { items, index }
    }

    pub fn remove(item: Item, index: usize) -> Self {
        StructuralEvent::Remove { items: vec![item], index }
    }

    pub fn remove_range(items: Vec<Item>, index: usize) -> Self {
        StructuralEvent::Remove { items, index }
    }

    pub fn replace(new_item: Item, old_item: Item, index: usize) -> Self {
        StructuralEvent::Replace { new_item, old_item, index }
    }

    pub fn moved(item: Item, old_index: usize, new_index: usize) -> Self {
        StructuralEvent::Move { item, old_index, new_index }
    }

    pub fn action(&self) -> CollectionAction {
        match self {
            StructuralEvent::Add { .. } => CollectionAction::Add,
            StructuralEvent::Remove { .. } => CollectionAction::Remove,
            StructuralEvent::Replace { .. } => CollectionAction::Replace,
            StructuralEvent::Move { .. } => CollectionAction::Move,
            StructuralEvent::Reset => CollectionAction::Reset,
        }
    }

    pub fn is_single_item(&self) -> bool {
        match self {
            StructuralEvent::Add { items, .. } | StructuralEvent::Remove { items, .. } => {
                items.len() == 1
            }
            StructuralEvent::Replace { .. } | StructuralEvent::Move { .. } => true,
            StructuralEvent::Reset => false,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&Item) -> U) -> StructuralEvent<U> {
        match self {
            StructuralEvent::Add { items, index } => StructuralEvent::Add {
                items: items.iter().map(&mut f).collect(),
                index: *index,
            },
            StructuralEvent::Remove { items, index } => StructuralEvent::Remove {
                items: items.iter().map(&mut f).collect(),
                index: *index,
            },
            StructuralEvent::Replace { new_item, old_item, index } => StructuralEvent::Replace {
                new_item: f(new_item),
                old_item: f(old_item),
                index: *index,
            },
            StructuralEvent::Move { item, old_index, new_index } => StructuralEvent::Move {
                item: f(item),
                old_index: *old_index,
                new_index: *new_index,
            },
            StructuralEvent::Reset => StructuralEvent::Reset,
        }
    }

    /// Checks the event against a positional store of length `len`.
    ///
    /// Sorted views locate items by identity instead and only need
    /// the payload checks, see [`StructuralEvent::validate_payload`].
    pub fn validate(&self, len: usize) -> Result<()> {
        self.validate_payload()?;
        match self {
            StructuralEvent::Add { index, .. } if *index > len => Err(ViewError::contract(
                format!("add at {} beyond store of {}", index, len),
            )),
            StructuralEvent::Remove { items, index } if index + items.len() > len => {
                Err(ViewError::contract(format!(
                    "remove of {} items at {} beyond store of {}",
                    items.len(),
                    index,
                    len
                )))
            }
            StructuralEvent::Replace { index, .. } if *index >= len => Err(ViewError::contract(
                format!("replace at {} beyond store of {}", index, len),
            )),
            StructuralEvent::Move { old_index, new_index, .. }
                if *old_index >= len || *new_index >= len =>
            {
                Err(ViewError::contract(format!(
                    "move {} -> {} beyond store of {}",
                    old_index, new_index, len
                )))
            }
            _ => Ok(()),
        }
    }

    /// Rejects runs without items.
    pub fn validate_payload(&self) -> Result<()> {
        match self {
            StructuralEvent::Add { items, .. } if items.is_empty() => {
                Err(ViewError::contract("add without items"))
            }
            StructuralEvent::Remove { items, .. } if items.is_empty() => {
                Err(ViewError::contract("remove without items"))
            }
            _ => Ok(()),
        }
    }
}

impl<Item: Clone> StructuralEvent<Item> {
    /// Applies the event to a positional store, producing new items
    /// through `f`.
    ///
    /// Outgoing items are taken from `data` rather than from the event,
    /// so the returned event carries exactly what the store held.
    pub fn apply_mapped<X: Clone>(
        &self,
        data: &mut Vec<X>,
        mut f: impl FnMut(&Item) -> X,
    ) -> Result<StructuralEvent<X>> {
        self.validate(data.len())?;

        Ok(match self {
            StructuralEvent::Add { items, index } => {
                let new = items.iter().map(&mut f).collect::<Vec<_>>();
                data.splice(*index..*index, new.iter().cloned());
                StructuralEvent::Add { items: new, index: *index }
            }
            StructuralEvent::Remove { items, index } => {
                let old = data.drain(*index..*index + items.len()).collect();
                StructuralEvent::Remove { items: old, index: *index }
            }
            StructuralEvent::Replace { new_item, index, .. } => {
                let new = f(new_item);
                let old = std::mem::replace(&mut data[*index], new.clone());
                StructuralEvent::Replace { new_item: new, old_item: old, index: *index }
            }
            StructuralEvent::Move { old_index, new_index, .. } => {
                let item = data.remove(*old_index);
                data.insert(*new_index, item.clone());
                StructuralEvent::Move { item, old_index: *old_index, new_index: *new_index }
            }
            StructuralEvent::Reset => {
                data.clear();
                StructuralEvent::Reset
            }
        })
    }

    pub fn apply_to(&self, data: &mut Vec<Item>) -> Result<StructuralEvent<Item>> {
        self.apply_mapped(data, Item::clone)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::view::event::*;

    #[test]
    fn empty_runs_violate_contract() {
        let ev = StructuralEvent::<i32>::add_range(vec![], 0);
        assert!(matches!(
            ev.validate(0),
            Err(ViewError::ContractViolation { .. })
        ));
    }

    #[test]
    fn indices_checked_against_store() {
        assert!(StructuralEvent::add(1, 3).validate(3).is_ok());
        assert!(StructuralEvent::add(1, 4).validate(3).is_err());
        assert!(StructuralEvent::remove_range(vec![1, 2], 2).validate(4).is_ok());
        assert!(StructuralEvent::remove_range(vec![1, 2], 3).validate(4).is_err());
        assert!(StructuralEvent::moved(1, 0, 3).validate(3).is_err());
        assert!(StructuralEvent::<i32>::Reset.validate(0).is_ok());
    }

    #[test]
    fn apply_takes_outgoing_items_from_store() {
        let mut data = vec!['a', 'b', 'c', 'd'];

        let ev = StructuralEvent::moved('?', 3, 1).apply_to(&mut data).unwrap();
        assert_eq!(data, vec!['a', 'd', 'b', 'c']);
        assert_eq!(ev, StructuralEvent::moved('d', 3, 1));

        let ev = StructuralEvent::remove_range(vec!['?', '?'], 1)
            .apply_to(&mut data)
            .unwrap();
        assert_eq!(data, vec!['a', 'c']);
        assert_eq!(ev, StructuralEvent::remove_range(vec!['d', 'b'], 1));

        let ev = StructuralEvent::add_range(vec!['x', 'y'], 1).apply_to(&mut data).unwrap();
        assert_eq!(data, vec!['a', 'x', 'y', 'c']);
        assert_eq!(ev.action(), CollectionAction::Add);

        assert!(StructuralEvent::replace('z', 'q', 4).apply_to(&mut data).is_err());
        assert_eq!(data, vec!['a', 'x', 'y', 'c']);
    }

    #[test]
    fn map_keeps_shape() {
        let ev = StructuralEvent::moved(2, 3, 1).map(|x| x * 10);
        assert_eq!(ev, StructuralEvent::moved(20, 3, 1));
        assert_eq!(ev.action(), CollectionAction::Move);
        assert!(ev.is_single_item());
    }
}
