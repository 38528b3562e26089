use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use nexus_gateway::{NewComment, NewPost, NexusClient, Post, PostPatch, SortKey};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gateway base URL; falls back to NEXUS_URL
    #[arg(long)]
    url: Option<String>,

    /// Gateway API key; falls back to NEXUS_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Popular,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Newest => SortKey::Newest,
            SortArg::Popular => SortKey::Popular,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, optionally filtered by a title search
    List {
        #[arg(long, value_enum, default_value = "newest")]
        sort: SortArg,

        #[arg(long)]
        search: Option<String>,
    },

    /// Show a post and its comments
    Get {
        #[arg(short, long)]
        id: i64,
    },

    /// Create a new post
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        car_make: Option<String>,

        #[arg(long)]
        car_model: Option<String>,

        #[arg(long)]
        car_year: Option<i32>,
    },

    /// Overwrite a post's fields (unspecified fields keep their value)
    Update {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        car_make: Option<String>,

        #[arg(long)]
        car_model: Option<String>,

        #[arg(long)]
        car_year: Option<i32>,
    },

    /// Upvote a post
    Upvote {
        #[arg(short, long)]
        id: i64,
    },

    /// Delete a post and its comments
    Delete {
        #[arg(short, long)]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Comment on a post
    Comment {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        content: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_post_line(post: &Post) {
    println!(
        "#{} {} — {} upvotes, {}",
        post.id,
        post.title.bold(),
        post.upvotes,
        post.created_at.dimmed()
    );
}

fn print_post(post: &Post) {
    println!("{}", post.title.bold());

    let vehicle: Vec<String> = [
        post.car_year.map(|y| y.to_string()),
        post.car_make.clone(),
        post.car_model.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !vehicle.is_empty() {
        println!("{}", vehicle.join(" ").cyan());
    }

    println!("{} upvotes · {}", post.upvotes, post.created_at.dimmed());
    if let Some(image_url) = &post.image_url {
        println!("image: {image_url}");
    }
    println!("\n{}", post.content);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let base_url = cli
        .url
        .or_else(|| std::env::var("NEXUS_URL").ok())
        .context("Gateway URL missing: pass --url or set NEXUS_URL")?;
    let api_key = cli
        .api_key
        .or_else(|| std::env::var("NEXUS_API_KEY").ok())
        .context("API key missing: pass --api-key or set NEXUS_API_KEY")?;

    let client = NexusClient::new(base_url, api_key);

    match cli.command {
        Commands::List { sort, search } => {
            let posts = client
                .list_posts(sort.into())
                .await
                .context("Failed to list posts")?;

            // Same client-side title filter the web list uses.
            let shown: Vec<&Post> = match &search {
                Some(query) => posts.iter().filter(|p| p.title_matches(query)).collect(),
                None => posts.iter().collect(),
            };

            if shown.is_empty() {
                println!("No posts found.");
            }
            for post in shown {
                print_post_line(post);
            }
        }

        Commands::Get { id } => {
            let post = client
                .get_post(id)
                .await
                .with_context(|| format!("Failed to fetch post {id}"))?;
            print_post(&post);

            let comments = client
                .list_comments(id)
                .await
                .context("Failed to fetch comments")?;
            if !comments.is_empty() {
                println!("\n{}", "Comments:".bold());
                for comment in &comments {
                    println!("- {} {}", comment.content, comment.created_at.dimmed());
                }
            }
        }

        Commands::Create {
            title,
            content,
            image_url,
            car_make,
            car_model,
            car_year,
        } => {
            let created = client
                .create_post(NewPost {
                    title,
                    content,
                    image_url,
                    car_make,
                    car_model,
                    car_year,
                    upvotes: 0,
                })
                .await
                .context("Failed to create post")?;
            println!("{} Created post #{}", "✓".green(), created.id);
        }

        Commands::Update {
            id,
            title,
            content,
            image_url,
            car_make,
            car_model,
            car_year,
        } => {
            // Fetch-then-overwrite, the same flow as the edit form.
            let current = client
                .get_post(id)
                .await
                .with_context(|| format!("Failed to fetch post {id}"))?;

            let patch = PostPatch {
                title: title.unwrap_or(current.title),
                content: content.unwrap_or(current.content),
                image_url: image_url.or(current.image_url),
                car_make: car_make.or(current.car_make),
                car_model: car_model.or(current.car_model),
                car_year: car_year.or(current.car_year),
            };

            let updated = client
                .update_post(id, patch)
                .await
                .context("Failed to update post")?;
            println!("{} Updated post #{}", "✓".green(), updated.id);
        }

        Commands::Upvote { id } => {
            let current = client
                .get_post(id)
                .await
                .with_context(|| format!("Failed to fetch post {id}"))?;
            let updated = client
                .upvote_post(id, current.upvotes)
                .await
                .context("Failed to upvote post")?;
            println!(
                "{} Post #{} now has {} upvotes",
                "✓".green(),
                updated.id,
                updated.upvotes
            );
        }

        Commands::Delete { id, yes } => {
            let confirmed =
                yes || confirm(&format!("Delete post #{id} and all of its comments?"))?;
            if !confirmed {
                println!("{} Aborted", "✗".red());
                return Ok(());
            }

            client
                .delete_post(id)
                .await
                .with_context(|| format!("Failed to delete post {id}"))?;
            println!("{} Deleted post #{}", "✓".green(), id);
        }

        Commands::Comment { id, content } => {
            let comment = client
                .add_comment(NewComment {
                    post_id: id,
                    content,
                })
                .await
                .context("Failed to add comment")?;
            println!("{} Added comment #{}", "✓".green(), comment.id);
        }
    }

    Ok(())
}
