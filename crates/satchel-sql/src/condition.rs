/// A prebuilt selection fragment and its positional arguments, accepted
/// anywhere a [`WhereBuilder`](crate::WhereBuilder) is built up
/// incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    selection: String,
    selection_args: Vec<String>,
}

impl Condition {
    pub fn new(selection: impl Into<String>, selection_args: Vec<String>) -> Self {
        Self {
            selection: selection.into(),
            selection_args,
        }
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn selection_args(&self) -> &[String] {
        &self.selection_args
    }
}
