use {
    crate::view::dispose::DisposalCascade,
    serde::{Deserialize, Serialize},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Construction options shared by all view builders.
///
/// Missing fields take their defaults when deserialized, so a
/// config only has to name what it changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Enumerate in reverse store order.
    pub reverse: bool,

    /// Disposing the derived view also disposes the view it was built from.
    pub dispose_parent: bool,

    /// Disposing the view also disposes every projection it holds.
    pub dispose_element: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            reverse: false,
            dispose_parent: true,
            dispose_element: true,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        ViewOptions::default()
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn dispose_parent(mut self, dispose_parent: bool) -> Self {
        self.dispose_parent = dispose_parent;
        self
    }

    pub fn dispose_element(mut self, dispose_element: bool) -> Self {
        self.dispose_element = dispose_element;
        self
    }

    pub fn cascade(&self) -> DisposalCascade {
        DisposalCascade {
            dispose_parent: self.dispose_parent,
            dispose_element: self.dispose_element,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
