use {
    crate::view::{event::{CollectionAction, StructuralEvent}, subscription::Subscription},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Outward-facing "collection changed" notification.
///
/// Flattened form of a [`StructuralEvent`] in the shape list-bound
/// consumers expect: item runs plus optional starting indices.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionChanged<Item> {
    pub action: CollectionAction,
    pub new_items: Vec<Item>,
    pub old_items: Vec<Item>,
    pub new_starting_index: Option<usize>,
    pub old_starting_index: Option<usize>,
}

impl<Item: Clone> From<&StructuralEvent<Item>> for CollectionChanged<Item> {
    fn from(ev: &StructuralEvent<Item>) -> Self {
        let mut cc = CollectionChanged {
            action: ev.action(),
            new_items: Vec::new(),
            old_items: Vec::new(),
            new_starting_index: None,
            old_starting_index: None,
        };

        match ev {
            StructuralEvent::Add { items, index } => {
                cc.new_items = items.clone();
                cc.new_starting_index = Some(*index);
            }
            StructuralEvent::Remove { items, index } => {
                cc.old_items = items.clone();
                cc.old_starting_index = Some(*index);
            }
            StructuralEvent::Replace { new_item, old_item, index } => {
                cc.new_items = vec![new_item.clone()];
                cc.old_items = vec![old_item.clone()];
                cc.new_starting_index = Some(*index);
                cc.old_starting_index = Some(*index);
            }
            StructuralEvent::Move { item, old_index, new_index } => {
                cc.new_items = vec![item.clone()];
                cc.old_items = vec![item.clone()];
                cc.new_starting_index = Some(*new_index);
                cc.old_starting_index = Some(*old_index);
            }
            StructuralEvent::Reset => {}
        }

        cc
    }
}

impl<Item> CollectionChanged<Item> {
    /// Whether this change alters the number of items.
    pub fn changes_count(&self) -> bool {
        matches!(
            self.action,
            CollectionAction::Add | CollectionAction::Remove | CollectionAction::Reset
        )
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyChanged {
    pub property: &'static str,
}

impl PropertyChanged {
    pub const COUNT: PropertyChanged = PropertyChanged { property: "Count" };
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// The notification contract of adapter views.
///
/// Handlers run synchronously inside the mutating call, in
/// registration order. They may read the adapter they subscribed to
/// but must not mutate the chain or read the views behind it.
pub trait NotifyCollectionChanged<Item: 'static> {
    fn on_collection_changed<F>(&self, f: F) -> Subscription
    where
        F: Fn(&CollectionChanged<Item>) + Send + Sync + 'static;

    fn on_property_changed<F>(&self, f: F) -> Subscription
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
