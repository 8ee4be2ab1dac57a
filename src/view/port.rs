use {
    crate::{
        error::Result,
        view::{
            event::StructuralEvent, list::ListView, observer::ObserverBroadcast,
            subscription::Subscription, Observer,
        },
    },
    std::sync::{Arc, RwLock},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 View Port
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// A lock-guarded store that routes its diffs to dependent views.
///
/// Every store sits behind exactly one `RwLock`; holding that lock
/// while routing makes each diff reach the dependents against the
/// state it was produced from.
pub trait ViewPort<Item>: ListView<Item> + Sized + 'static
where
    Item: Clone + Send + Sync + 'static,
{
    fn broadcast(&self) -> &ObserverBroadcast<dyn ListView<Item>>;
    fn broadcast_mut(&mut self) -> &mut ObserverBroadcast<dyn ListView<Item>>;

    fn route(&self, msg: &StructuralEvent<Item>) -> Result<()> {
        self.broadcast().notify(self, msg)
    }

    /// Installs `observer` and hands it the current contents in one
    /// critical section, so no diff can slip in between.
    ///
    /// The returned subscription owns both the observer and a strong
    /// reference to this port. If the observer rejects the snapshot it
    /// is not installed.
    fn add_observer(
        port: &Arc<RwLock<Self>>,
        observer: Arc<RwLock<dyn Observer<dyn ListView<Item>>>>,
    ) -> Result<Subscription> {
        let mut guard = port.write().unwrap();
        observer.write().unwrap().reset(&*guard)?;
        let id = guard.broadcast_mut().add_observer(Arc::downgrade(&observer));
        drop(guard);

        let port = port.clone();
        Ok(Subscription::new(move || {
            port.write().unwrap().broadcast_mut().remove_observer(id);
        })
        .keep_alive(observer))
    }
}
