//! Dependency list entries.

/// One entry of a dependency list.
///
/// `depends_on` names the parents of the item; order of the whole item list
/// determines child order in the resolved tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    label: String,
    depends_on: Vec<String>,
    data: T,
}

impl<T> Item<T> {
    /// Creates an item without parents.
    pub fn new(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            depends_on: Vec::new(),
            data,
        }
    }

    /// Sets the parents of the item.
    pub fn depends_on<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parents(&self) -> &[String] {
        &self.depends_on
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub(crate) fn into_parts(self) -> (String, Vec<String>, T) {
        (self.label, self.depends_on, self.data)
    }
}
