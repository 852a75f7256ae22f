use crate::app::{AppContext, Result};
use crate::domain::{plain_text, Category};
use crate::feed::FeedSession;
use crate::thread::{self, ThreadView};

pub async fn list_category(ctx: &AppContext, category: Category, pages: usize) -> Result<()> {
    let mut session = FeedSession::open(&ctx.source, category, ctx.poll_interval()).await;

    if session.total_ids() == 0 {
        println!("No items in {}", category.label());
        return Ok(());
    }

    for _ in 0..pages.max(1) {
        let page = session.next_page(&ctx.resolver, ctx.page_size()).await;
        for item in &page.items {
            let host = item
                .host()
                .map(|h| format!(" ({})", h))
                .unwrap_or_default();
            println!("{:>10}  {}{}", item.id, item.display_title(), host);
            println!(
                "            {} pts by {} | {} comments",
                item.score.unwrap_or(0),
                item.display_author(),
                item.descendants.unwrap_or(0)
            );
        }
        if !session.has_more() {
            break;
        }
    }

    if session.has_more() {
        println!("...more available");
    }

    Ok(())
}

pub async fn show_item(ctx: &AppContext, id: u64) -> Result<()> {
    match thread::open_thread(&ctx.source, &ctx.resolver, id).await {
        ThreadView::NotFound(id) => {
            println!("Item {} not found", id);
        }
        ThreadView::Loaded(thread) => {
            println!("{}", thread.root.display_title());
            println!(
                "{} pts by {} | {}",
                thread.root.score.unwrap_or(0),
                thread.root.display_author(),
                thread.root.link()
            );

            if let Some(text) = &thread.root.text {
                println!("\n{}", plain_text(text));
            }

            if !thread.poll_options.is_empty() {
                println!("\nPoll:");
                for option in &thread.poll_options {
                    println!("  {} - {} votes", option.display_text(), option.vote_count());
                }
            }

            let nodes = thread.comments.nodes();
            if nodes.is_empty() {
                println!("\nNo comments");
            } else {
                println!("\n{} comments:", nodes.len());
                for node in nodes {
                    let indent = "  ".repeat(node.depth + 1);
                    println!("\n{}{}:", indent, node.display_author());
                    let body = node.text.as_deref().map(plain_text).unwrap_or_default();
                    for line in body.lines() {
                        println!("{}{}", indent, line);
                    }
                }
            }
        }
    }

    Ok(())
}
