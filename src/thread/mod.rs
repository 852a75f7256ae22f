//! Thread resolution: the comment tree under an item, plus poll options.
//!
//! Comments are emitted as a flat pre-order sequence, every sibling group
//! resolved concurrently and ordered newest-first by timestamp. Traversal
//! uses an explicit frame stack, so arbitrarily deep threads cost heap,
//! not call stack.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::{CommentNode, Item, ItemId, ItemKind, PollOption};
use crate::source::{BatchResolver, ItemSource, Resolution};

/// A fully resolved detail view.
#[derive(Debug)]
pub struct Thread {
    pub root: Item,
    /// Present only for poll roots; rendered ahead of the comments.
    pub poll_options: Vec<PollOption>,
    pub comments: ThreadComments,
}

/// Distinguishes "the root has no replies" from an empty resolution, so
/// the view can say "No comments." outright.
#[derive(Debug)]
pub enum ThreadComments {
    Empty,
    Loaded(Vec<CommentNode>),
}

impl ThreadComments {
    pub fn nodes(&self) -> &[CommentNode] {
        match self {
            ThreadComments::Empty => &[],
            ThreadComments::Loaded(nodes) => nodes,
        }
    }
}

/// Thread entry point. An absent or unfetchable root is the one case the
/// UI surfaces as an explicit "not found" placeholder.
#[derive(Debug)]
pub enum ThreadView {
    NotFound(ItemId),
    Loaded(Box<Thread>),
}

pub async fn open_thread(
    source: &Arc<dyn ItemSource>,
    resolver: &BatchResolver,
    id: ItemId,
) -> ThreadView {
    let root = match source.get_item(id).await {
        Ok(Some(item)) => item,
        Ok(None) => return ThreadView::NotFound(id),
        Err(err) => {
            tracing::warn!(id, "failed to fetch thread root: {err}");
            return ThreadView::NotFound(id);
        }
    };

    let poll_options = if root.kind == ItemKind::Poll && !root.parts.is_empty() {
        resolve_poll_options(resolver, &root.parts).await
    } else {
        Vec::new()
    };

    let comments = if root.kids.is_empty() {
        ThreadComments::Empty
    } else {
        ThreadComments::Loaded(load_comments(resolver, root.kids.clone()).await)
    };

    ThreadView::Loaded(Box::new(Thread {
        root,
        poll_options,
        comments,
    }))
}

struct Frame {
    pending: VecDeque<Item>,
    depth: usize,
}

/// Pre-order traversal of the comment tree rooted at `kid_ids`.
///
/// Each sibling group is resolved in one concurrent batch and sorted
/// newest-first; a comment's entire subtree is emitted before its next
/// sibling. The work stack holds one frame per open depth level.
pub async fn load_comments(resolver: &BatchResolver, kid_ids: Vec<ItemId>) -> Vec<CommentNode> {
    let mut out = Vec::new();
    let mut stack = vec![Frame {
        pending: resolve_siblings(resolver, &kid_ids).await,
        depth: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(mut item) = frame.pending.pop_front() else {
            stack.pop();
            continue;
        };
        let depth = frame.depth;

        let kids = std::mem::take(&mut item.kids);
        out.push(CommentNode::from_item(item, depth));

        if !kids.is_empty() {
            let pending = resolve_siblings(resolver, &kids).await;
            if !pending.is_empty() {
                stack.push(Frame {
                    pending,
                    depth: depth + 1,
                });
            }
        }
    }

    out
}

/// Resolve one sibling group: drop absent/deleted/dead entries, order the
/// survivors by timestamp descending (id descending on ties, so emission
/// is deterministic).
async fn resolve_siblings(resolver: &BatchResolver, ids: &[ItemId]) -> VecDeque<Item> {
    let mut siblings: Vec<Item> = resolver
        .resolve_many(ids)
        .await
        .into_iter()
        .filter_map(|(_, resolution)| resolution.into_item())
        .filter(Item::is_live_comment)
        .collect();

    siblings.sort_by(|a, b| {
        b.time
            .unwrap_or(0)
            .cmp(&a.time.unwrap_or(0))
            .then_with(|| b.id.cmp(&a.id))
    });

    siblings.into()
}

/// One-level resolution of a poll's option ids. Options never have
/// children of their own. Mirrors the feed filter in spirit: an option
/// with no text and no votes is a husk and is dropped.
pub async fn resolve_poll_options(resolver: &BatchResolver, part_ids: &[ItemId]) -> Vec<PollOption> {
    resolver
        .resolve_many(part_ids)
        .await
        .into_iter()
        .filter_map(|(id, resolution)| match resolution {
            Resolution::Resolved(item) => {
                if item.text.is_none() && item.score.unwrap_or(0) == 0 {
                    None
                } else {
                    Some(PollOption {
                        id: item.id,
                        text: item.text,
                        votes: item.score,
                    })
                }
            }
            Resolution::Missing => None,
            Resolution::Failed(err) => {
                tracing::debug!(id, "skipping failed poll option: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{comment, story, StaticSource};

    fn setup(source: StaticSource) -> (Arc<dyn ItemSource>, BatchResolver) {
        let source: Arc<dyn ItemSource> = Arc::new(source);
        let resolver = BatchResolver::new(source.clone());
        (source, resolver)
    }

    fn emitted(nodes: &[CommentNode]) -> Vec<(ItemId, usize)> {
        nodes.iter().map(|n| (n.id, n.depth)).collect()
    }

    #[tokio::test]
    async fn reference_tree_emits_preorder_newest_first() {
        // root kids [10, 11]; 10@t100, 11@t200 with child 12@t150.
        // Expected: 11 depth 0, 12 depth 1, 10 depth 0.
        let source = StaticSource::new()
            .with_item(comment(10, 100, vec![]))
            .with_item(comment(11, 200, vec![12]))
            .with_item(comment(12, 150, vec![]));
        let (_, resolver) = setup(source);

        let nodes = load_comments(&resolver, vec![10, 11]).await;
        assert_eq!(emitted(&nodes), vec![(11, 0), (12, 1), (10, 0)]);
    }

    #[tokio::test]
    async fn subtree_precedes_next_sibling_at_every_level() {
        let source = StaticSource::new()
            .with_item(comment(1, 50, vec![3, 4]))
            .with_item(comment(2, 40, vec![]))
            .with_item(comment(3, 10, vec![5]))
            .with_item(comment(4, 20, vec![]))
            .with_item(comment(5, 99, vec![]));
        let (_, resolver) = setup(source);

        let nodes = load_comments(&resolver, vec![1, 2]).await;
        // 1 (newest root), then its children newest-first: 4, then 3 with
        // its child 5, then root sibling 2.
        assert_eq!(
            emitted(&nodes),
            vec![(1, 0), (4, 1), (3, 1), (5, 2), (2, 0)]
        );
    }

    #[tokio::test]
    async fn deleted_dead_and_missing_comments_are_dropped() {
        let mut flagged = comment(21, 300, vec![]);
        flagged.dead = true;
        let mut removed = comment(22, 400, vec![]);
        removed.deleted = true;
        let source = StaticSource::new()
            .with_item(comment(20, 100, vec![]))
            .with_item(flagged)
            .with_item(removed);
        let (_, resolver) = setup(source);

        // 23 is missing entirely
        let nodes = load_comments(&resolver, vec![20, 21, 22, 23]).await;
        assert_eq!(emitted(&nodes), vec![(20, 0)]);
    }

    #[tokio::test]
    async fn bare_comment_without_title_or_url_still_appears() {
        let source = StaticSource::new().with_item(comment(30, 1, vec![]));
        let (_, resolver) = setup(source);

        let nodes = load_comments(&resolver, vec![30]).await;
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].display_author(), "user30");
    }

    #[tokio::test]
    async fn timestamp_ties_break_by_descending_id() {
        let source = StaticSource::new()
            .with_item(comment(41, 100, vec![]))
            .with_item(comment(40, 100, vec![]))
            .with_item(comment(42, 100, vec![]));
        let (_, resolver) = setup(source);

        let nodes = load_comments(&resolver, vec![40, 41, 42]).await;
        assert_eq!(emitted(&nodes), vec![(42, 0), (41, 0), (40, 0)]);
    }

    #[tokio::test]
    async fn deep_chain_does_not_blow_the_stack() {
        // A 2000-deep reply chain; recursive traversal would overflow.
        let mut source = StaticSource::new();
        for i in 0..2000u64 {
            let kids = if i + 1 < 2000 { vec![i + 2] } else { vec![] };
            source = source.with_item(comment(i + 1, i as i64, kids));
        }
        let (_, resolver) = setup(source);

        let nodes = load_comments(&resolver, vec![1]).await;
        assert_eq!(nodes.len(), 2000);
        assert_eq!(nodes[0].depth, 0);
        assert_eq!(nodes[1999].depth, 1999);
    }

    #[tokio::test]
    async fn absent_root_is_not_found() {
        let (source, resolver) = setup(StaticSource::new());
        let view = open_thread(&source, &resolver, 77).await;
        assert!(matches!(view, ThreadView::NotFound(77)));
    }

    #[tokio::test]
    async fn root_without_kids_is_explicitly_empty() {
        let (source, resolver) = setup(StaticSource::new().with_item(story(1, "quiet")));
        let view = open_thread(&source, &resolver, 1).await;
        let ThreadView::Loaded(thread) = view else {
            panic!("expected loaded thread");
        };
        assert!(matches!(thread.comments, ThreadComments::Empty));
        assert!(thread.poll_options.is_empty());
    }

    #[tokio::test]
    async fn poll_root_resolves_options_before_comments() {
        let mut root = story(50, "Which editor?");
        root.kind = ItemKind::Poll;
        root.parts = vec![51, 52, 53, 54];
        root.kids = vec![60];

        let vim = Item {
            id: 51,
            kind: ItemKind::Pollopt,
            text: Some("vim".into()),
            score: Some(120),
            ..Item::default()
        };
        let emacs = Item {
            id: 52,
            kind: ItemKind::Pollopt,
            text: Some("emacs".into()),
            score: None,
            ..Item::default()
        };
        let husk = Item {
            id: 53,
            kind: ItemKind::Pollopt,
            ..Item::default()
        };

        let source = StaticSource::new()
            .with_item(root)
            .with_item(vim)
            .with_item(emacs)
            .with_item(husk)
            .with_item(comment(60, 5, vec![]));
        let (source, resolver) = setup(source);

        let ThreadView::Loaded(thread) = open_thread(&source, &resolver, 50).await else {
            panic!("expected loaded thread");
        };
        // 53 is a husk, 54 is missing; both dropped.
        let texts: Vec<&str> = thread
            .poll_options
            .iter()
            .map(PollOption::display_text)
            .collect();
        assert_eq!(texts, vec!["vim", "emacs"]);
        assert_eq!(thread.poll_options[0].vote_count(), 120);
        assert_eq!(thread.poll_options[1].vote_count(), 0);
        assert_eq!(thread.comments.nodes().len(), 1);
    }

    #[tokio::test]
    async fn non_poll_root_ignores_parts() {
        let mut root = story(70, "story with stray parts");
        root.parts = vec![71];
        let (source, resolver) = setup(StaticSource::new().with_item(root));

        let ThreadView::Loaded(thread) = open_thread(&source, &resolver, 70).await else {
            panic!("expected loaded thread");
        };
        assert!(thread.poll_options.is_empty());
    }
}
