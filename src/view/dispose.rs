use std::{
    rc::Rc,
    sync::{Arc, Mutex, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Explicit release of resources held by a projected item.
///
/// Views call this on their projections when they are disposed with
/// element disposal enabled. The default does nothing, so plain data
/// only needs an empty impl.
pub trait Dispose {
    fn dispose(&self) {}
}

macro_rules! impl_noop_dispose {
    ($($t:ty),* $(,)?) => {
        $( impl Dispose for $t {} )*
    };
}

impl_noop_dispose!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, &'static str,
);

impl<T: Dispose + ?Sized> Dispose for Box<T> {
    fn dispose(&self) {
        (**self).dispose()
    }
}

impl<T: Dispose + ?Sized> Dispose for Arc<T> {
    fn dispose(&self) {
        (**self).dispose()
    }
}

impl<T: Dispose + ?Sized> Dispose for Rc<T> {
    fn dispose(&self) {
        (**self).dispose()
    }
}

impl<T: Dispose> Dispose for RwLock<T> {
    fn dispose(&self) {
        self.read().unwrap().dispose()
    }
}

impl<T: Dispose> Dispose for Mutex<T> {
    fn dispose(&self) {
        self.lock().unwrap().dispose()
    }
}

impl<T: Dispose> Dispose for Option<T> {
    fn dispose(&self) {
        if let Some(x) = self {
            x.dispose();
        }
    }
}

impl<T: Dispose> Dispose for Vec<T> {
    fn dispose(&self) {
        for x in self.iter() {
            x.dispose();
        }
    }
}

impl<A: Dispose, B: Dispose> Dispose for (A, B) {
    fn dispose(&self) {
        self.0.dispose();
        self.1.dispose();
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// What a derived view releases besides its own subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisposalCascade {
    /// Dispose the parent view after this one.
    pub dispose_parent: bool,

    /// Dispose every projected item held by this view.
    pub dispose_element: bool,
}

impl Default for DisposalCascade {
    fn default() -> Self {
        DisposalCascade {
            dispose_parent: true,
            dispose_element: true,
        }
    }
}

impl DisposalCascade {
    pub fn none() -> Self {
        DisposalCascade {
            dispose_parent: false,
            dispose_element: false,
        }
    }

    pub(crate) fn release_elements<'a, X, I>(&self, items: I) -> usize
    where
        X: Dispose + 'a,
        I: IntoIterator<Item = &'a X>,
    {
        if !self.dispose_element {
            return 0;
        }

        let mut n = 0;
        for x in items {
            x.dispose();
            n += 1;
        }
        n
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::view::dispose::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counted(Arc<AtomicUsize>);

    impl Dispose for Counted {
        fn dispose(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn cascade_respects_element_flag() {
        let hits = Arc::new(AtomicUsize::new(0));
        let items = vec![Counted(hits.clone()), Counted(hits.clone())];

        assert_eq!(DisposalCascade::none().release_elements(items.iter()), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        assert_eq!(DisposalCascade::default().release_elements(items.iter()), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn wrappers_delegate() {
        let hits = Arc::new(AtomicUsize::new(0));
        let x = Arc::new(Some(Box::new(Counted(hits.clone()))));
        x.dispose();
        (7, Counted(hits.clone())).dispose();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
