use {
    crate::view::event::CollectionAction,
    std::sync::Arc,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Predicate over `(value, view)` pairs plus lifecycle hooks.
///
/// While attached to a view, each hook runs exactly once per affected
/// pair per structural event, under the view's lock. Hooks must not
/// touch the view they are attached to.
pub trait ViewFilter<T, TView>: Send + Sync {
    fn is_match(&self, value: &T, view: &TView) -> bool;

    fn on_attach(&self, _value: &T, _view: &TView) {}
    fn on_add(&self, _value: &T, _view: &TView, _action: CollectionAction) {}
    fn on_remove(&self, _value: &T, _view: &TView, _action: CollectionAction) {}
    fn on_move(&self, _value: &T, _view: &TView, _action: CollectionAction) {}

    /// True only for the no-op default filter.
    fn is_null(&self) -> bool {
        false
    }
}

/// The filter every view starts with: matches everything, hooks do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFilter;

impl<T, TView> ViewFilter<T, TView> for NullFilter {
    fn is_match(&self, _value: &T, _view: &TView) -> bool {
        true
    }

    fn is_null(&self) -> bool {
        true
    }
}

impl NullFilter {
    pub fn shared<T, TView>() -> Arc<dyn ViewFilter<T, TView>> {
        Arc::new(NullFilter)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

type Pred<T, TView> = Box<dyn Fn(&T, &TView) -> bool + Send + Sync>;
type Hook<T, TView> = Box<dyn Fn(&T, &TView, CollectionAction) + Send + Sync>;

/// Filter assembled from closures.
pub struct SynchronizedViewFilter<T, TView> {
    pred: Pred<T, TView>,
    attach: Option<Box<dyn Fn(&T, &TView) + Send + Sync>>,
    add: Option<Hook<T, TView>>,
    remove: Option<Hook<T, TView>>,
    moved: Option<Hook<T, TView>>,
}

impl<T, TView> SynchronizedViewFilter<T, TView> {
    pub fn new<P>(pred: P) -> Self
    where
        P: Fn(&T, &TView) -> bool + Send + Sync + 'static,
    {
        SynchronizedViewFilter {
            pred: Box::new(pred),
            attach: None,
            add: None,
            remove: None,
            moved: None,
        }
    }

    pub fn with_on_attach(mut self, f: impl Fn(&T, &TView) + Send + Sync + 'static) -> Self {
        self.attach = Some(Box::new(f));
        self
    }

    pub fn with_on_add(
        mut self,
        f: impl Fn(&T, &TView, CollectionAction) + Send + Sync + 'static,
    ) -> Self {
        self.add = Some(Box::new(f));
        self
    }

    pub fn with_on_remove(
        mut self,
        f: impl Fn(&T, &TView, CollectionAction) + Send + Sync + 'static,
    ) -> Self {
        self.remove = Some(Box::new(f));
        self
    }

    pub fn with_on_move(
        mut self,
        f: impl Fn(&T, &TView, CollectionAction) + Send + Sync + 'static,
    ) -> Self {
        self.moved = Some(Box::new(f));
        self
    }
}

impl<T, TView> ViewFilter<T, TView> for SynchronizedViewFilter<T, TView> {
    fn is_match(&self, value: &T, view: &TView) -> bool {
        (self.pred)(value, view)
    }

    fn on_attach(&self, value: &T, view: &TView) {
        if let Some(f) = &self.attach {
            f(value, view);
        }
    }

    fn on_add(&self, value: &T, view: &TView, action: CollectionAction) {
        if let Some(f) = &self.add {
            f(value, view, action);
        }
    }

    fn on_remove(&self, value: &T, view: &TView, action: CollectionAction) {
        if let Some(f) = &self.remove {
            f(value, view, action);
        }
    }

    fn on_move(&self, value: &T, view: &TView, action: CollectionAction) {
        if let Some(f) = &self.moved {
            f(value, view, action);
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
