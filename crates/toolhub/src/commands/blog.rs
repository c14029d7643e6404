use colored::Colorize;
use toolhub::service::{BlogService, DEFAULT_RECENT_LIMIT};
use toolhub::Lookup;
use toolhub_core::blog::{BlogPost, BlogPostPatch, Category, NewBlogPost};

use super::{format_json, truncate_text, Global};
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "blog")]
#[command(about = "Blog post operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every post in collection order
    #[clap(name = "list")]
    List(OutputOptions),

    /// Show a single post
    #[clap(name = "get")]
    Get(IdOptions),

    /// List posts in a category (exact, case-sensitive)
    #[clap(name = "category")]
    Category(CategoryOptions),

    /// List posts by an author (exact match)
    #[clap(name = "author")]
    Author(AuthorOptions),

    /// List the most recent posts
    #[clap(name = "recent")]
    Recent(RecentOptions),

    /// Create a new post
    #[clap(name = "create")]
    Create(CreateOptions),

    /// Update fields of an existing post
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// Delete a post
    #[clap(name = "delete")]
    Delete(IdOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct IdOptions {
    /// Post ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CategoryOptions {
    /// Tutorials, Productivity, Development, Design or News
    #[arg(value_name = "CATEGORY")]
    pub category: Category,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AuthorOptions {
    #[arg(value_name = "AUTHOR")]
    pub author: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RecentOptions {
    /// Maximum number of posts
    #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CreateOptions {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(long)]
    pub category: Category,

    #[arg(long)]
    pub author: String,

    /// Image path or URL
    #[arg(long)]
    pub image: Option<String>,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct UpdateOptions {
    /// Post ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub author: Option<String>,

    /// Image path or URL
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,

    /// Remove the post's image
    #[arg(long)]
    pub clear_image: bool,

    #[clap(flatten)]
    pub output: OutputOptions,
}

impl From<&UpdateOptions> for BlogPostPatch {
    fn from(options: &UpdateOptions) -> Self {
        BlogPostPatch {
            title: options.title.clone(),
            content: options.content.clone(),
            category: options.category,
            author: options.author.clone(),
            image: if options.clear_image {
                Some(None)
            } else {
                options.image.clone().map(Some)
            },
        }
    }
}

pub async fn run(app: App, global: Global) -> Result<()> {
    let blog = BlogService::new(global.slots()?, global.config());

    match app.command {
        Commands::List(output) => {
            let posts = blog.get_all().await;
            print_posts(&posts, "ALL POSTS", &output)
        }
        Commands::Get(options) => {
            let post = blog.get_by_id(&options.id).await;
            print_lookup(&post, &options.id, &options.output)
        }
        Commands::Category(options) => {
            let posts = blog.get_by_category(options.category).await;
            let header = format!("CATEGORY {}", options.category.as_str().to_uppercase());
            print_posts(&posts, &header, &options.output)
        }
        Commands::Author(options) => {
            let posts = blog.get_by_author(&options.author).await;
            let header = format!("POSTS BY {}", options.author);
            print_posts(&posts, &header, &options.output)
        }
        Commands::Recent(options) => {
            let posts = blog.get_recent(Some(options.limit)).await;
            let header = format!("{} MOST RECENT POSTS", options.limit);
            print_posts(&posts, &header, &options.output)
        }
        Commands::Create(options) => {
            let new = NewBlogPost {
                title: options.title,
                content: options.content,
                category: options.category,
                author: options.author,
                image: options.image,
            };
            let created = blog
                .create(new)
                .await
                .map_err(|e| eyre!("Failed to create post: {}", e))?;
            print_lookup(&Lookup::Found(created), "", &options.output)
        }
        Commands::Update(options) => {
            let patch = BlogPostPatch::from(&options);
            if patch.is_empty() {
                eprintln!("{}", "No fields given, the post is saved unchanged.".yellow());
            }
            let updated = blog
                .update(&options.id, patch)
                .await
                .map_err(|e| eyre!("Failed to update post {}: {}", options.id, e))?;
            print_lookup(&updated, &options.id, &options.output)
        }
        Commands::Delete(options) => {
            let removed = blog
                .delete(&options.id)
                .await
                .map_err(|e| eyre!("Failed to delete post {}: {}", options.id, e))?;
            if options.output.json {
                println!("{}", serde_json::json!({ "id": options.id, "deleted": removed }));
            } else if removed {
                println!("{} {}", "Deleted post".green(), options.id.bright_white());
            } else {
                println!("{} {}", "No post with ID".yellow(), options.id.bright_white());
            }
            Ok(())
        }
    }
}

fn print_posts(posts: &[BlogPost], header: &str, output: &OutputOptions) -> Result<()> {
    if output.json {
        println!("{}", format_json(posts)?);
    } else {
        println!("{}", format_posts_text(posts, header));
    }
    Ok(())
}

fn print_lookup(post: &Lookup<BlogPost>, id: &str, output: &OutputOptions) -> Result<()> {
    match (post, output.json) {
        (Lookup::Found(post), true) => println!("{}", format_json(post)?),
        (Lookup::Found(post), false) => display_post(post),
        (Lookup::NotFound, true) => println!("{}", format_json(post)?),
        (Lookup::NotFound, false) => {
            println!("{} {}", "No post with ID".yellow(), id.bright_white())
        }
    }
    Ok(())
}

/// Convert a list of posts to a formatted table with a header
fn format_posts_text(posts: &[BlogPost], header: &str) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", header.bright_cyan().bold()));

    if posts.is_empty() {
        result.push_str(&format!("\n{}\n", "No posts found.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Title".bold().cyan(),
        "Category".bold().cyan(),
        "Author".bold().cyan(),
        "Created".bold().cyan()
    ]);

    for post in posts {
        table.add_row(prettytable::row![
            post.id.bright_white(),
            truncate_text(&post.title, 48),
            post.category.as_str().green(),
            post.author,
            post.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        ]);
    }

    result.push_str(&table.to_string());
    result.push_str(&format!("\n{} posts\n", posts.len()));
    result
}

fn display_post(post: &BlogPost) {
    std::println!("\n{} - {}\n", post.id.bold().cyan(), post.title.bright_white());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Category".bold().cyan(),
        post.category.as_str().green().to_string()
    ]);
    table.add_row(prettytable::row!["Author".bold().cyan(), post.author]);
    table.add_row(prettytable::row![
        "Created".bold().cyan(),
        post.created_at.to_rfc3339()
    ]);
    if let Some(image) = &post.image {
        table.add_row(prettytable::row!["Image".bold().cyan(), image]);
    }
    table.printstd();

    std::println!("\n{}\n", post.content);
}
