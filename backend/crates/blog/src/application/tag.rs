//! Tag Use Cases

use std::sync::Arc;

use crate::domain::repository::TagRepository;
use crate::domain::value_object::{Pagination, pagination::DEFAULT_LIST_LIMIT};
use crate::error::BlogResult;

pub struct TagUseCase<R>
where
    R: TagRepository,
{
    repo: Arc<R>,
}

impl<R> TagUseCase<R>
where
    R: TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Most used tags; `limit` follows the article list rules
    /// (default 20, capped at 100)
    pub async fn popular(&self, limit: Option<&str>) -> BlogResult<Vec<String>> {
        let page = Pagination::parse(limit, None, DEFAULT_LIST_LIMIT);
        self.repo.popular(page.limit).await
    }

    /// Remove tags no article references any more
    ///
    /// Returns the number removed and logs how many remain.
    pub async fn prune_unused(&self) -> BlogResult<u64> {
        let removed = self.repo.delete_unused().await?;
        let remaining = self.repo.all().await?.len();
        tracing::info!(
            tags_deleted = removed,
            tags_remaining = remaining,
            "Unused tag cleanup completed"
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::article::{ArticleChanges, ArticleUseCase, NewArticleInput};
    use crate::application::fakes::InMemoryBlogRepo;
    use kernel::id::UserId;

    async fn seed(repo: &Arc<InMemoryBlogRepo>, title: &str, tags: &[&str]) -> String {
        ArticleUseCase::new(repo.clone())
            .create(
                UserId::new(1),
                NewArticleInput {
                    title: title.into(),
                    description: "d".into(),
                    body: "b".into(),
                    tag_list: tags.iter().map(|t| t.to_string()).collect(),
                },
            )
            .await
            .unwrap()
            .article
            .slug
            .into_inner()
    }

    fn setup() -> (Arc<InMemoryBlogRepo>, TagUseCase<InMemoryBlogRepo>) {
        let repo = Arc::new(InMemoryBlogRepo::default());
        repo.add_user(1, "jake");
        (repo.clone(), TagUseCase::new(repo))
    }

    #[tokio::test]
    async fn test_popular_orders_by_usage_then_name() {
        let (repo, uc) = setup();
        seed(&repo, "a", &["rust", "web"]).await;
        seed(&repo, "b", &["rust", "async"]).await;
        seed(&repo, "c", &["rust", "web"]).await;

        assert_eq!(uc.popular(None).await.unwrap(), vec!["rust", "web", "async"]);
        assert_eq!(uc.popular(Some("1")).await.unwrap(), vec!["rust"]);
        assert_eq!(uc.popular(Some("junk")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_popular_empty() {
        let (_, uc) = setup();
        assert!(uc.popular(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prune_unused_after_retag() {
        let (repo, uc) = setup();
        let slug = seed(&repo, "a", &["old", "keep"]).await;

        ArticleUseCase::new(repo.clone())
            .update(
                UserId::new(1),
                &slug,
                ArticleChanges {
                    tag_list: Some(vec!["keep".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.tag_names(), vec!["keep", "old"]);
        assert_eq!(uc.prune_unused().await.unwrap(), 1);
        assert_eq!(repo.tag_names(), vec!["keep"]);
        assert_eq!(uc.prune_unused().await.unwrap(), 0);
    }
}
