use super::{SearchContext, SearchOutcome};
use crate::page::PageId;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashMap, VecDeque};

/// Breadth-first search: explores the frontier one depth level at a time,
/// fetching every node at the current level concurrently before moving to
/// the next. `discovered` maps every page seen so far to the path that
/// first reached it, so later discoveries of the same page are dropped —
/// first-discovery-wins, independent of which concurrent fetch completes
/// first, since the map is only ever mutated synchronously between awaits.
pub(crate) async fn run(ctx: &SearchContext, start: PageId, finish: PageId) -> SearchOutcome {
    let mut discovered: HashMap<PageId, Vec<PageId>> = HashMap::new();
    discovered.insert(start.clone(), vec![start.clone()]);

    let mut frontier: VecDeque<(PageId, u32)> = VecDeque::new();
    frontier.push_back((start, 0));
    let mut depth_reached = 0;

    while !frontier.is_empty() {
        if ctx.expired() {
            return SearchOutcome::TimedOut {
                discovered_count: discovered.len(),
                depth_reached,
            };
        }
        if discovered.len() >= ctx.config.max_pages {
            return SearchOutcome::NotFound {
                discovered_count: discovered.len(),
                depth_reached,
            };
        }

        let level: Vec<(PageId, u32)> = frontier.drain(..).collect();
        let mut tasks = FuturesUnordered::new();
        for (node, depth) in level {
            depth_reached = depth_reached.max(depth);
            if depth >= ctx.config.max_depth {
                continue;
            }
            tasks.push(async move {
                let links = ctx.expand(&node).await;
                (node, depth, links)
            });
        }

        while let Some((node, depth, links)) = tasks.next().await {
            let parent_path = discovered.get(&node).cloned().unwrap_or_default();
            for neighbor in links {
                if neighbor == finish {
                    let mut path = parent_path.clone();
                    path.push(neighbor);
                    return SearchOutcome::Found {
                        path,
                        discovered_count: discovered.len() + 1,
                        depth_reached: depth + 1,
                    };
                }
                if !discovered.contains_key(&neighbor) {
                    let mut path = parent_path.clone();
                    path.push(neighbor.clone());
                    discovered.insert(neighbor.clone(), path);
                    frontier.push_back((neighbor, depth + 1));
                }
            }
        }
    }

    SearchOutcome::NotFound {
        discovered_count: discovered.len(),
        depth_reached,
    }
}
