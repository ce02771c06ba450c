use serde::{Deserialize, Serialize};

/// Placeholder domain entity. `Default` is the zero value returned by the
/// inert repository adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyObject {
    pub id: i64,
    pub name: String,
}

impl MyObject {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
