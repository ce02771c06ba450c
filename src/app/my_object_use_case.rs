use crate::domain::{MyObject, MyObjectRepository};
use crate::utils::error::Result;
use std::sync::Arc;

/// Application operations over [`MyObject`]s.
///
/// Depends only on the [`MyObjectRepository`] port; any adapter can be
/// injected at construction.
#[derive(Clone)]
pub struct MyObjectUseCase {
    repository: Arc<dyn MyObjectRepository>,
}

impl MyObjectUseCase {
    pub fn new(repository: Arc<dyn MyObjectRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves all objects. Repository errors are returned unchanged.
    pub fn get_all_objects(&self) -> Result<Vec<MyObject>> {
        let objects = self.repository.get_all_objects()?;
        Ok(objects)
    }

    /// Retrieves one object by id. Repository errors are returned unchanged.
    pub fn get_object_by_id(&self, id: i64) -> Result<MyObject> {
        let object = self.repository.get_object_by_id(id)?;
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MyObjectRepositoryAdapter;
    use crate::utils::error::AppError;
    use std::sync::Mutex;

    enum Outcome {
        Objects(Vec<MyObject>),
        NotFound,
        StorageDown,
    }

    struct FakeRepository {
        outcome: Outcome,
        calls: Mutex<Vec<String>>,
    }

    impl FakeRepository {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MyObjectRepository for FakeRepository {
        fn get_all_objects(&self) -> Result<Vec<MyObject>> {
            self.calls.lock().unwrap().push("get_all_objects".to_string());
            match &self.outcome {
                Outcome::Objects(objects) => Ok(objects.clone()),
                Outcome::NotFound => Err(AppError::NotFound { id: 0 }),
                Outcome::StorageDown => Err(AppError::StorageError {
                    message: "connection refused".to_string(),
                }),
            }
        }

        fn get_object_by_id(&self, id: i64) -> Result<MyObject> {
            self.calls.lock().unwrap().push(format!("get_object_by_id({})", id));
            match &self.outcome {
                Outcome::Objects(objects) => objects
                    .iter()
                    .find(|o| o.id == id)
                    .cloned()
                    .ok_or(AppError::NotFound { id }),
                Outcome::NotFound => Err(AppError::NotFound { id }),
                Outcome::StorageDown => Err(AppError::StorageError {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_with_inert_adapter() {
        let use_case = MyObjectUseCase::new(Arc::new(MyObjectRepositoryAdapter::new()));

        assert!(use_case.get_all_objects().unwrap().is_empty());
        assert_eq!(use_case.get_object_by_id(7).unwrap(), MyObject::default());
    }

    #[test]
    fn test_returns_repository_data_unchanged() {
        let objects = vec![MyObject::new(1, "first"), MyObject::new(2, "second")];
        let repo = Arc::new(FakeRepository::new(Outcome::Objects(objects.clone())));
        let use_case = MyObjectUseCase::new(repo.clone());

        assert_eq!(use_case.get_all_objects().unwrap(), objects);
        assert_eq!(use_case.get_object_by_id(2).unwrap(), MyObject::new(2, "second"));
        assert_eq!(
            repo.calls(),
            vec!["get_all_objects".to_string(), "get_object_by_id(2)".to_string()]
        );
    }

    #[test]
    fn test_propagates_not_found_unchanged() {
        let repo = Arc::new(FakeRepository::new(Outcome::NotFound));
        let use_case = MyObjectUseCase::new(repo.clone());

        let err = use_case.get_object_by_id(-5).unwrap_err();
        assert!(matches!(err, AppError::NotFound { id: -5 }));
        assert_eq!(err.to_string(), "Object not found: -5");
        // no retry
        assert_eq!(repo.calls().len(), 1);
    }

    #[test]
    fn test_propagates_storage_error_unchanged() {
        let repo = Arc::new(FakeRepository::new(Outcome::StorageDown));
        let use_case = MyObjectUseCase::new(repo.clone());

        match use_case.get_all_objects() {
            Err(AppError::StorageError { message }) => assert_eq!(message, "connection refused"),
            other => panic!("expected storage error, got {:?}", other),
        }
        assert!(matches!(
            use_case.get_object_by_id(1),
            Err(AppError::StorageError { .. })
        ));
        assert_eq!(repo.calls().len(), 2);
    }
}
