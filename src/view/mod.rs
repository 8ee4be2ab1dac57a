
                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                   View
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub trait View: Send + Sync {
    /// Notification message for the observers
    type Msg: Send + Sync;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub mod event;
pub mod filter;
pub mod dispose;
pub mod options;
pub mod observer;
pub mod subscription;
pub mod port;
pub mod notify;

pub use {
    dispose::{Dispose, DisposalCascade},
    event::{CollectionAction, StructuralEvent},
    filter::{NullFilter, SynchronizedViewFilter, ViewFilter},
    notify::{CollectionChanged, NotifyCollectionChanged, PropertyChanged},
    observer::{EventHandlers, NotifyFnObserver, Observer, ObserverBroadcast, ObserverId},
    options::ViewOptions,
    port::ViewPort,
    subscription::Subscription,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub mod list;
pub mod routed;
pub mod couple;
pub mod single;

pub use {
    couple::{CoupleView, CoupleViewExt, SortableCoupleView, SortableCoupleViewExt, ValueComparison},
    list::{ListView, ListViewExt},
    routed::{Observable, ObservableExt, RoutedView, RoutedViewExt},
    single::{ReadOnlyList, SingleView, SingleViewExt},
};
