use crate::domain::{MyObject, MyObjectRepository};
use crate::utils::error::Result;

/// Inert repository adapter. Holds no storage: listing yields nothing and
/// lookups yield the zero-valued object.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyObjectRepositoryAdapter;

impl MyObjectRepositoryAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl MyObjectRepository for MyObjectRepositoryAdapter {
    fn get_all_objects(&self) -> Result<Vec<MyObject>> {
        Ok(Vec::new())
    }

    fn get_object_by_id(&self, _id: i64) -> Result<MyObject> {
        Ok(MyObject::default())
    }
}
