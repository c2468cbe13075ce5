//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::{Post, PostLoader};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = PostLoader::new(site).load_all()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for line in post_lines(&posts) {
                println!("  {}", line);
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  #{} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

fn post_lines(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|post| {
            let date = if post.date.is_empty() {
                "----------"
            } else {
                post.date.as_str()
            };
            format!("{} - {} [{}]", date, post.title, post.slug)
        })
        .collect()
}

/// Hashtags with the number of posts using them, most used first
fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: BTreeMap<&str, usize> = BTreeMap::new();
    for post in posts {
        for tag in &post.hashtags {
            *tags.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1));
    tags
}
