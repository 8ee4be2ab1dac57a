use {
    crate::{
        error::Result,
        view::{subscription::Subscription, View},
    },
    std::sync::{Arc, RwLock, Weak},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Observer
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Receives the diffs of a view.
///
/// Both methods run while the observed view holds its own lock, so
/// `view` is exactly the state the message was produced against.
/// Implementations must not call back into the observed view or any
/// of its ancestors.
pub trait Observer<V: View + ?Sized>: Send + Sync {
    /// Called once when the observer is attached, with the contents
    /// it has to mirror from then on. An error aborts the attachment.
    fn reset(&mut self, _view: &V) -> Result<()> {
        Ok(())
    }

    fn notify(&mut self, view: &V, msg: &V::Msg) -> Result<()>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Broadcast
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Ordered list of observers, delivered to synchronously.
///
/// Observers are held weakly: the broadcast never keeps a dependent
/// view alive, the dependent holds its parent instead.
pub struct ObserverBroadcast<V: View + ?Sized + 'static> {
    next_id: usize,
    observers: Vec<(ObserverId, Weak<RwLock<dyn Observer<V>>>)>,
}

impl<V: View + ?Sized + 'static> ObserverBroadcast<V> {
    pub fn new() -> Self {
        ObserverBroadcast {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, obs: Weak<RwLock<dyn Observer<V>>>) -> ObserverId {
        self.cleanup();
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, obs));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.cleanup();
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers
            .iter()
            .filter(|(_, o)| o.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cleanup(&mut self) {
        self.observers.retain(|(_, o)| o.strong_count() > 0);
    }

    fn iter(&self) -> impl Iterator<Item = Arc<RwLock<dyn Observer<V>>>> + '_ {
        self.observers.iter().filter_map(|(_, o)| o.upgrade())
    }

    /// Delivers `msg` to every live observer in registration order.
    ///
    /// A failing observer does not stop delivery to the others;
    /// the first error is returned once all have been notified.
    pub fn notify(&self, view: &V, msg: &V::Msg) -> Result<()> {
        let mut outcome = Ok(());
        for o in self.iter() {
            let res = o.write().unwrap().notify(view, msg);
            outcome = outcome.and(res);
        }
        outcome
    }
}

impl<V: View + ?Sized + 'static> Default for ObserverBroadcast<V> {
    fn default() -> Self {
        ObserverBroadcast::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct NotifyFnObserver<V, F>
where
    V: View + ?Sized,
    F: Fn(&V::Msg) + Send + Sync,
{
    f: F,
    _phantom: std::marker::PhantomData<V>,
}

impl<V, F> NotifyFnObserver<V, F>
where
    V: View + ?Sized,
    F: Fn(&V::Msg) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        NotifyFnObserver {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<V, F> Observer<V> for NotifyFnObserver<V, F>
where
    V: View + ?Sized,
    F: Fn(&V::Msg) + Send + Sync,
{
    fn notify(&mut self, _view: &V, msg: &V::Msg) -> Result<()> {
        (self.f)(msg);
        Ok(())
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
              Event Handlers
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct HandlerList<A: 'static> {
    next_id: usize,
    handlers: Vec<(usize, Handler<A>)>,
}

/// Multi-subscriber callback list for outward-facing notifications
/// (collection changed, property changed, state changed).
pub struct EventHandlers<A: 'static> {
    inner: Arc<RwLock<HandlerList<A>>>,
}

impl<A: 'static> EventHandlers<A> {
    pub fn new() -> Self {
        EventHandlers {
            inner: Arc::new(RwLock::new(HandlerList {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn add<F: Fn(&A) + Send + Sync + 'static>(&self, f: F) -> Subscription {
        let mut list = self.inner.write().unwrap();
        let id = list.next_id;
        list.next_id += 1;
        list.handlers.push((id, Arc::new(f)));
        drop(list);

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.write().unwrap().handlers.retain(|(hid, _)| *hid != id);
            }
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn emit(&self, arg: &A) {
        // handlers may subscribe or unsubscribe while running
        let handlers = {
            let list = self.inner.read().unwrap();
            list.handlers.iter().map(|(_, h)| h.clone()).collect::<Vec<_>>()
        };

        for h in handlers {
            h(arg);
        }
    }
}

impl<A: 'static> Clone for EventHandlers<A> {
    fn clone(&self) -> Self {
        EventHandlers {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> Default for EventHandlers<A> {
    fn default() -> Self {
        EventHandlers::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
