//! List posts from the CMS

use anyhow::Result;

use crate::Marquee;

/// Print every post, newest first.
pub async fn run(app: &Marquee) -> Result<()> {
    let posts = app.loader.posts().await;
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [/blog/{}]",
            post.published_at.format("%Y-%m-%d"),
            post.title,
            post.slug
        );
    }
    Ok(())
}
