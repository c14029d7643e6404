use chrono::Utc;
use toolhub_core::blog::{seed_posts, BlogPost, BlogPostPatch, Category, NewBlogPost};
use toolhub_core::snapshot::LoadOrigin;
use toolhub_core::store::{Lookup, Placement};

use super::{Repository, ServiceConfig};
use crate::error::Result;
use crate::storage::{Slots, BLOG_POSTS_SLOT};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Blog post queries and mutations
///
/// New posts are placed at the front of the collection.
#[derive(Debug)]
pub struct BlogService<S> {
    repo: Repository<BlogPost, S>,
}

impl<S: Slots> BlogService<S> {
    pub fn new(slots: S, config: ServiceConfig) -> Self {
        Self {
            repo: Repository::new(BLOG_POSTS_SLOT, slots, seed_posts, config),
        }
    }

    pub fn slots(&self) -> &S {
        self.repo.slots()
    }

    pub async fn load_origin(&self) -> Option<LoadOrigin> {
        self.repo.load_origin().await
    }

    pub async fn get_all(&self) -> Vec<BlogPost> {
        self.repo.read(|store| store.all()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Lookup<BlogPost> {
        self.repo.read(|store| store.find(id)).await
    }

    pub async fn get_by_category(&self, category: Category) -> Vec<BlogPost> {
        self.repo
            .read(|store| store.filter(|p| p.category == category))
            .await
    }

    pub async fn get_by_author(&self, author: &str) -> Vec<BlogPost> {
        self.repo
            .read(|store| store.filter(|p| p.author == author))
            .await
    }

    /// Newest posts first, at most `limit` (default [`DEFAULT_RECENT_LIMIT`])
    pub async fn get_recent(&self, limit: Option<usize>) -> Vec<BlogPost> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        self.repo.read(|store| store.recent(limit)).await
    }

    pub async fn create(&self, new: NewBlogPost) -> Result<BlogPost> {
        self.repo
            .mutate(|store, ids| {
                let post = BlogPost::from_new(new, ids.next(), Utc::now());
                store.insert(post.clone(), Placement::Front);
                (post, true)
            })
            .await
    }

    pub async fn update(&self, id: &str, patch: BlogPostPatch) -> Result<Lookup<BlogPost>> {
        self.repo
            .mutate(|store, _| {
                let updated = store.update(id, |post| post.apply(patch));
                let changed = updated.is_found();
                (updated, changed)
            })
            .await
    }

    /// Remove a post; its SEO metric entry, if any, is left untouched
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.repo
            .mutate(|store, _| {
                let removed = store.remove(id);
                (removed, removed)
            })
            .await
    }
}
