//! Generic in-memory repository keyed by entity id

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use gasaware_domain::{entities::Identified, errors::DomainResult, repositories::Repository};

/// Thread-safe in-memory implementation of [`Repository`]
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Serves videos, simulations, surveys and targeting rules.
///
/// # Example
///
/// ```ignore
/// use gasaware_persistence::memory::InMemoryRepository;
/// use gasaware_domain::entities::Video;
///
/// let videos = InMemoryRepository::<Video>::new();
/// ```
#[derive(Debug)]
pub struct InMemoryRepository<T: Identified> {
    items: RwLock<HashMap<T::Id, T>>,
}

impl<T: Identified> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Identified + Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial entities (useful for testing)
    pub fn with_items(items: Vec<T>) -> Self {
        let map = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl<T> Repository<T, T::Id> for InMemoryRepository<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    async fn save(&self, entity: &T) -> DomainResult<()> {
        self.items.write().insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<T>> {
        Ok(self.items.read().values().cloned().collect())
    }

    async fn delete(&self, id: &T::Id) -> DomainResult<bool> {
        Ok(self.items.write().remove(id).is_some())
    }

    async fn exists(&self, id: &T::Id) -> DomainResult<bool> {
        Ok(self.items.read().contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasaware_domain::entities::{Video, VideoDraft};
    use gasaware_domain::value_objects::{AgeGroup, VideoId};

    fn video(title: &str) -> Video {
        Video::publish(VideoDraft {
            title: title.into(),
            description: String::new(),
            url: format!("/videos/{title}.mp4"),
            duration_sec: 60,
            tags: vec![],
            min_age_group: AgeGroup::Child,
            subscription_filter: None,
            thumbnail_url: String::new(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryRepository::<Video>::new();
        let v = video("leak");
        repo.save(&v).await.unwrap();

        let found = repo.find_by_id(&v.id).await.unwrap();
        assert_eq!(found.unwrap().title, "leak");
        assert!(repo.exists(&v.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryRepository::<Video>::new();
        assert!(repo.find_by_id(&VideoId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = InMemoryRepository::<Video>::new();
        let mut v = video("old");
        repo.save(&v).await.unwrap();
        v.title = "new".into();
        repo.save(&v).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id(&v.id).await.unwrap().unwrap().title, "new");
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemoryRepository::with_items(vec![video("a"), video("b")]);
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);

        assert!(repo.delete(&all[0].id).await.unwrap());
        assert!(!repo.delete(&all[0].id).await.unwrap());
        assert_eq!(repo.len(), 1);
    }
}
