use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::Entity;

/// Blog post category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tutorials,
    Productivity,
    Development,
    Design,
    News,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tutorials,
        Category::Productivity,
        Category::Development,
        Category::Design,
        Category::News,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tutorials => "Tutorials",
            Category::Productivity => "Productivity",
            Category::Development => "Development",
            Category::Design => "Design",
            Category::News => "News",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Exact, case-sensitive match on the category name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Invalid category: {}. Valid categories: {}", s, valid.join(", "))
            })
    }
}

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Entity for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Caller-supplied fields of a new blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub author: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update of a blog post
///
/// Only fields that are `Some` are written. The id and creation timestamp
/// are not part of the patch and cannot be changed.
///
/// `image` is `Some(None)` to remove the image, `Some(Some(_))` to replace it.
/// In JSON a missing `image` key leaves it unchanged and `null` removes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub author: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub image: Option<Option<String>>,
}

/// Deserialize a key that is present, `null` included, as `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl BlogPost {
    pub fn from_new(new: NewBlogPost, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            category: new.category,
            author: new.author,
            created_at,
            image: new.image,
        }
    }

    /// Shallow-merge `patch` over this post
    pub fn apply(&mut self, patch: BlogPostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
    }
}

impl BlogPostPatch {
    pub fn is_empty(&self) -> bool {
        self == &BlogPostPatch::default()
    }
}

fn seed_date(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The collection used when no snapshot has been stored yet
pub fn seed_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "1".to_string(),
            title: "Getting the most out of the unit converter".to_string(),
            content: "Length, weight, temperature and volume conversions all live in one \
                      place. This walkthrough covers precision settings, swapping units and \
                      copying results straight to the clipboard."
                .to_string(),
            category: Category::Tutorials,
            author: "Admin".to_string(),
            created_at: seed_date(4, 25),
            image: Some("/images/blog/unit-converter.png".to_string()),
        },
        BlogPost {
            id: "2".to_string(),
            title: "Five text tools that save time every day".to_string(),
            content: "Word counters, case converters, whitespace cleaners, slug generators and \
                      diff checkers. A short tour of the text utilities people reach for most."
                .to_string(),
            category: Category::Productivity,
            author: "Admin".to_string(),
            created_at: seed_date(4, 20),
            image: None,
        },
        BlogPost {
            id: "3".to_string(),
            title: "Formatting and validating JSON in the browser".to_string(),
            content: "Paste a payload, get it pretty-printed or minified, and see exactly where \
                      a parse error happens. Nothing leaves the page."
                .to_string(),
            category: Category::Development,
            author: "Jane Doe".to_string(),
            created_at: seed_date(4, 15),
            image: Some("/images/blog/json-formatter.png".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> BlogPost {
        seed_posts().remove(0)
    }

    #[test]
    fn test_category_from_str_exact() {
        assert_eq!("Design".parse::<Category>(), Ok(Category::Design));
    }

    #[test]
    fn test_category_from_str_is_case_sensitive() {
        assert!("design".parse::<Category>().is_err());
        assert!(" Design".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_round_trips_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut post = sample_post();
        let original = post.clone();

        post.apply(BlogPostPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, original.content);
        assert_eq!(post.id, original.id);
        assert_eq!(post.created_at, original.created_at);
    }

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut post = sample_post();
        let original = post.clone();
        let patch = BlogPostPatch::default();

        assert!(patch.is_empty());
        post.apply(patch);
        assert_eq!(post, original);
    }

    #[test]
    fn test_apply_replaces_image() {
        let mut post = sample_post();
        post.apply(BlogPostPatch {
            image: Some(Some("/images/blog/new.png".to_string())),
            ..Default::default()
        });

        assert_eq!(post.image.as_deref(), Some("/images/blog/new.png"));
    }

    #[test]
    fn test_apply_clears_image() {
        let mut post = sample_post();
        assert!(post.image.is_some());

        post.apply(BlogPostPatch {
            image: Some(None),
            ..Default::default()
        });

        assert_eq!(post.image, None);
    }

    #[test]
    fn test_apply_without_image_keeps_it() {
        let mut post = sample_post();
        let original = post.image.clone();

        post.apply(BlogPostPatch {
            title: Some("Other".to_string()),
            ..Default::default()
        });

        assert_eq!(post.image, original);
    }

    #[test]
    fn test_patch_json_null_image_clears() {
        let missing: BlogPostPatch = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        let null: BlogPostPatch = serde_json::from_str(r#"{"image": null}"#).unwrap();
        let set: BlogPostPatch = serde_json::from_str(r#"{"image": "/a.png"}"#).unwrap();

        assert_eq!(missing.image, None);
        assert_eq!(null.image, Some(None));
        assert_eq!(set.image, Some(Some("/a.png".to_string())));
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let created_at = seed_date(5, 1);
        let post = BlogPost::from_new(
            NewBlogPost {
                title: "Title".to_string(),
                content: "Body".to_string(),
                category: Category::News,
                author: "Someone".to_string(),
                image: None,
            },
            "99".to_string(),
            created_at,
        );

        assert_eq!(post.id, "99");
        assert_eq!(post.category, Category::News);
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample_post()).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["category"], "Tutorials");
        assert_eq!(json["createdAt"], "2025-04-25T10:00:00Z");
    }

    #[test]
    fn test_image_omitted_when_absent() {
        let json = serde_json::to_string(&seed_posts()[1]).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_seed_dates_descend() {
        let posts = seed_posts();
        assert!(posts[0].created_at > posts[1].created_at);
        assert!(posts[1].created_at > posts[2].created_at);
    }
}
