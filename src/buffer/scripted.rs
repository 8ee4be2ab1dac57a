use {
    crate::{
        error::Result,
        view::{
            event::StructuralEvent, list::ListView, observer::ObserverBroadcast,
            routed::Observable, subscription::Subscription, Observer, View, ViewPort,
        },
    },
    std::sync::{Arc, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub(crate) struct ScriptedState<T>
where
    T: Clone + Send + Sync + 'static,
{
    data: Vec<T>,
    cast: ObserverBroadcast<dyn ListView<T>>,
}

impl<T> View for ScriptedState<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Msg = StructuralEvent<T>;
}

impl<T> ListView<T> for ScriptedState<T>
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

impl<T> ViewPort<T> for ScriptedState<T>
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

/// Source that routes whatever it is told to, without applying it,
/// for feeding views events a well-behaved list never produces.
pub(crate) struct ScriptedSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Arc<RwLock<ScriptedState<T>>>,
}

impl<T> ScriptedSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(data: Vec<T>) -> Self {
        ScriptedSource {
            state: Arc::new(RwLock::new(ScriptedState {
                data,
                cast: ObserverBroadcast::new(),
            })),
        }
    }

    pub(crate) fn route(&self, ev: StructuralEvent<T>) -> Result<()> {
        self.state.read().unwrap().route(&ev)
    }
}

impl<T> Observable<T> for ScriptedSource<T>
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
