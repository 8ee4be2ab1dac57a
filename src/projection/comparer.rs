use {
    crate::view::couple::ValueComparison,
    std::{cmp::Ordering, sync::Arc},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Compares values by a key extracted from each of them.
pub struct KeyComparer<X, K, F>
where
    F: Fn(&X) -> K,
{
    key: F,
    ascending: bool,
    _phantom: std::marker::PhantomData<fn(&X) -> K>,
}

impl<X, K, F> KeyComparer<X, K, F>
where
    K: Ord,
    F: Fn(&X) -> K,
{
    pub fn new(key: F, ascending: bool) -> Self {
        KeyComparer {
            key,
            ascending,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn compare(&self, a: &X, b: &X) -> Ordering {
        let ord = (self.key)(a).cmp(&(self.key)(b));
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }
}

/// Shared comparison ordering by `key`, reversed unless `ascending`.
pub fn by_key<X, K, F>(key: F, ascending: bool) -> ValueComparison<X>
where
    X: 'static,
    K: Ord + 'static,
    F: Fn(&X) -> K + Send + Sync + 'static,
{
    let cmp = KeyComparer::new(key, ascending);
    Arc::new(move |a: &X, b: &X| cmp.compare(a, b))
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::projection::comparer::*;

    #[test]
    fn descending_reverses_key_order() {
        let asc = by_key(|s: &String| s.len(), true);
        let desc = by_key(|s: &String| s.len(), false);

        let (a, b) = ("ab".to_string(), "abc".to_string());
        assert_eq!(asc(&a, &b), Ordering::Less);
        assert_eq!(desc(&a, &b), Ordering::Greater);
        assert_eq!(desc(&a, &a), Ordering::Equal);
    }

    #[test]
    fn sorts_slices() {
        let mut v = vec![(1, 'c'), (3, 'a'), (2, 'b')];
        let cmp = KeyComparer::new(|x: &(i32, char)| x.1, true);
        v.sort_by(|a, b| cmp.compare(a, b));
        assert_eq!(v, vec![(3, 'a'), (2, 'b'), (1, 'c')]);
    }
}
