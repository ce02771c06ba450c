use crate::domain::model::MyObject;
use crate::utils::error::Result;

/// Storage-independent access to [`MyObject`]s.
///
/// Implementations report missing objects with `AppError::NotFound` and
/// backend failures with `AppError::StorageError`.
pub trait MyObjectRepository: Send + Sync {
    fn get_all_objects(&self) -> Result<Vec<MyObject>>;
    fn get_object_by_id(&self, id: i64) -> Result<MyObject>;
}
