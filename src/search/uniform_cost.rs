use super::{SearchContext, SearchOutcome};
use crate::frontier::{Frontier, PriorityFrontier, SearchState};
use crate::page::PageId;
use std::collections::HashMap;

/// Uniform-cost search (Dijkstra over an implicitly unweighted graph, so
/// `g(n)` is simply hop count). Stale frontier entries — pushed before a
/// cheaper path to the same node was found — are discarded lazily by
/// comparing against the best known `g` at pop time, rather than searched
/// for and removed from the heap up front.
pub(crate) async fn run(ctx: &SearchContext, start: PageId, finish: PageId) -> SearchOutcome {
    let mut best_g: HashMap<PageId, f64> = HashMap::new();
    best_g.insert(start.clone(), 0.0);

    let mut frontier = PriorityFrontier::new();
    frontier.push(SearchState::root(start.clone()));

    let mut discovered_count = 1usize;
    let mut depth_reached = 0u32;

    while let Some(state) = frontier.pop() {
        if ctx.expired() {
            return SearchOutcome::TimedOut {
                discovered_count,
                depth_reached,
            };
        }
        if discovered_count >= ctx.config.max_pages {
            return SearchOutcome::NotFound {
                discovered_count,
                depth_reached,
            };
        }

        if state.score > *best_g.get(&state.node).unwrap_or(&f64::INFINITY) {
            continue; // stale entry, a cheaper path already won
        }
        depth_reached = depth_reached.max(state.depth);

        let links = ctx.expand(&state.node).await;
        let tentative_g = state.score + 1.0;

        for neighbor in links {
            if neighbor == finish {
                let mut path = state.path.clone();
                path.push(neighbor);
                return SearchOutcome::Found {
                    path,
                    discovered_count: discovered_count + 1,
                    depth_reached: state.depth + 1,
                };
            }

            let better = tentative_g < *best_g.get(&neighbor).unwrap_or(&f64::INFINITY);
            if better {
                if !best_g.contains_key(&neighbor) {
                    discovered_count += 1;
                }
                best_g.insert(neighbor.clone(), tentative_g);
                frontier.push(state.extend(neighbor, tentative_g));
            }
        }
    }

    SearchOutcome::NotFound {
        discovered_count,
        depth_reached,
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
    async fn finds_the_shortest_hop_path() {
        let server = MockServer::start().await;
        mock_page(&server, "A", &["B", "C"]).mount(&server).await;
        mock_page(&server, "B", &["D"]).mount(&server).await;
        mock_page(&server, "C", &[]).mount(&server).await;
        mock_page(&server, "D", &[]).mount(&server).await;

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
        let finish = PageId::parse_with_origin(&format!("{}/wiki/D", server.uri()), &server.uri()).unwrap();

        let outcome = run(&ctx, start, finish).await;
        match outcome {
            SearchOutcome::Found { path, .. } => assert_eq!(path.len(), 3),
            other => panic!("expected Found, got {other:?}"),
        }
    }
}
