use super::{SearchContext, SearchOutcome};
use crate::frontier::{FifoFrontier, Frontier, PriorityFrontier, SearchState};
use crate::heuristic::Similarity;
use crate::page::PageId;
use std::collections::HashMap;

struct Side {
    frontier: Box<dyn Frontier>,
    discovered: HashMap<PageId, Vec<PageId>>,
    target: PageId,
}

fn new_frontier(informed: bool) -> Box<dyn Frontier> {
    if informed {
        Box::new(PriorityFrontier::new())
    } else {
        Box::new(FifoFrontier::new())
    }
}

fn score_toward(node: &PageId, target: &PageId, similarity: Option<&dyn Similarity>) -> f64 {
    if node == target {
        return f64::MIN;
    }
    match similarity {
        Some(sim) => 1.0 - sim.score(node, target),
        None => 0.0,
    }
}

/// Bidirectional breadth-first search: expands alternately from `start` and
/// `finish`, stopping as soon as a node appears in both directions'
/// discovered sets. Each direction's outgoing edges are still resolved by
/// following forward hyperlinks (Wikipedia gives no efficient "what links
/// here" traversal for free), so the backward side is an approximation: it
/// explores pages that, if visited, would have linked toward `finish` the
/// same way the forward side explores pages linking away from `start` — it
/// does not guarantee the backward frontier only contains true inbound
/// neighbors.
///
/// When `similarity` is `Some`, both frontiers become priority queues
/// ordered by distance-to-target, informed bidirectional search instead of
/// plain breadth-first.
pub(crate) async fn run(
    ctx: &SearchContext,
    start: PageId,
    finish: PageId,
    similarity: Option<&dyn Similarity>,
) -> SearchOutcome {
    let informed = similarity.is_some();

    let mut forward = Side {
        frontier: new_frontier(informed),
        discovered: HashMap::from([(start.clone(), vec![start.clone()])]),
        target: finish.clone(),
    };
    let mut backward = Side {
        frontier: new_frontier(informed),
        discovered: HashMap::from([(finish.clone(), vec![finish.clone()])]),
        target: start.clone(),
    };

    let mut forward_root = SearchState::root(start.clone());
    forward_root.score = score_toward(&start, &finish, similarity);
    forward.frontier.push(forward_root);

    let mut backward_root = SearchState::root(finish.clone());
    backward_root.score = score_toward(&finish, &start, similarity);
    backward.frontier.push(backward_root);

    let mut depth_reached = 0u32;
    let mut forward_turn = true;

    loop {
        if ctx.expired() {
            return SearchOutcome::TimedOut {
                discovered_count: forward.discovered.len() + backward.discovered.len(),
                depth_reached,
            };
        }
        if forward.frontier.is_empty() && backward.frontier.is_empty() {
            return SearchOutcome::NotFound {
                discovered_count: forward.discovered.len() + backward.discovered.len(),
                depth_reached,
            };
        }
        if forward.discovered.len() + backward.discovered.len() >= ctx.config.max_pages {
            return SearchOutcome::NotFound {
                discovered_count: forward.discovered.len() + backward.discovered.len(),
                depth_reached,
            };
        }

        let (side, other, is_forward) = if forward_turn {
            (&mut forward, &backward, true)
        } else {
            (&mut backward, &forward, false)
        };

        if let Some(state) = side.frontier.pop() {
            if state.depth >= ctx.config.max_depth {
                forward_turn = !forward_turn;
                continue;
            }
            depth_reached = depth_reached.max(state.depth);

            let links = ctx.expand(&state.node).await;
            let mut meetings: Vec<Vec<PageId>> = Vec::new();

            for neighbor in links {
                if side.discovered.contains_key(&neighbor) {
                    continue;
                }
                let mut path = state.path.clone();
                path.push(neighbor.clone());
                side.discovered.insert(neighbor.clone(), path.clone());

                if let Some(other_path) = other.discovered.get(&neighbor) {
                    let (forward_path, backward_path) = if is_forward {
                        (path.clone(), other_path.clone())
                    } else {
                        (other_path.clone(), path.clone())
                    };
                    let mut combined = forward_path;
                    let mut rev_backward = backward_path;
                    rev_backward.reverse();
                    combined.extend(rev_backward.into_iter().skip(1));
                    meetings.push(combined);
                }

                let score = score_toward(&neighbor, &side.target, similarity);
                side.frontier.push(state.extend(neighbor, score));
            }

            if let Some(best) = meetings.into_iter().min_by_key(|p| p.len()) {
                return SearchOutcome::Found {
                    path: best,
                    discovered_count: forward.discovered.len() + backward.discovered.len(),
                    depth_reached: depth_reached + 1,
                };
            }
        }

        forward_turn = !forward_turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryLinkCache;
    use crate::config::EngineConfig;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::sync::Semaphore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_page(server: &MockServer, title: &str, links: &[&str]) -> wiremock::Mock {
        let body = links
            .iter()
            .map(|l| format!(r#"<a href="{}/wiki/{l}">{l}</a>"#, server.uri()))
            .collect::<String>();
        Mock::given(method("GET"))
            .and(path(format!("/wiki/{title}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body>{body}</body></html>"
            )))
    }

    #[tokio::test]
    async fn meets_in_the_middle() {
        let server = MockServer::start().await;
        mock_page(&server, "A", &["Mid"]).mount(&server).await;
        mock_page(&server, "Mid", &["B"]).mount(&server).await;
        mock_page(&server, "B", &["Mid"]).mount(&server).await;

        let mut config = EngineConfig::default();
        config.article_origin = server.uri();
        let ctx = SearchContext {
            client: reqwest::Client::new(),
            cache: Arc::new(InMemoryLinkCache::new()),
            semaphore: Arc::new(Semaphore::new(8)),
            config,
            deadline: Instant::now() + Duration::from_secs(5),
        };

        let start = PageId::parse_with_origin(&format!("{}/wiki/A", server.uri()), &server.uri()).unwrap();
        let finish = PageId::parse_with_origin(&format!("{}/wiki/B", server.uri()), &server.uri()).unwrap();

        let outcome = run(&ctx, start.clone(), finish.clone(), None).await;
        match outcome {
            SearchOutcome::Found { path, .. } => {
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&finish));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }
}
