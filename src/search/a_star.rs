use super::{SearchContext, SearchOutcome};
use crate::frontier::{Frontier, PriorityFrontier, SearchState};
use crate::heuristic::Similarity;
use crate::page::PageId;
use std::collections::HashMap;

/// A* search. `f(n) = g(n) + h(n)`, with `h(n) = 1 - sim(n, finish)`
/// computed lazily — only the first time a node is pushed — and memoized,
/// since `finish` is fixed for the whole call so the cache only needs to be
/// keyed on the candidate node. The oracle is not required to be
/// admissible, so this search is best-effort rather than provably optimal.
pub(crate) async fn run(
    ctx: &SearchContext,
    start: PageId,
    finish: PageId,
    similarity: &dyn Similarity,
) -> SearchOutcome {
    let mut best_g: HashMap<PageId, f64> = HashMap::new();
    best_g.insert(start.clone(), 0.0);

    let mut heuristic_cache: HashMap<PageId, f64> = HashMap::new();
    let h = |node: &PageId, cache: &mut HashMap<PageId, f64>| -> f64 {
        *cache
            .entry(node.clone())
            .or_insert_with(|| 1.0 - similarity.score(node, &finish))
    };

    let mut frontier = PriorityFrontier::new();
    let start_h = h(&start, &mut heuristic_cache);
    let mut root = SearchState::root(start.clone());
    root.score = start_h;
    frontier.push(root);

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

        let g = state.score - h(&state.node, &mut heuristic_cache);
        if g > *best_g.get(&state.node).unwrap_or(&f64::INFINITY) {
            continue;
        }
        depth_reached = depth_reached.max(state.depth);

        let links = ctx.expand(&state.node).await;
        let tentative_g = g + 1.0;

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

            if tentative_g < *best_g.get(&neighbor).unwrap_or(&f64::INFINITY) {
                if !best_g.contains_key(&neighbor) {
                    discovered_count += 1;
                }
                best_g.insert(neighbor.clone(), tentative_g);
                let f = tentative_g + h(&neighbor, &mut heuristic_cache);
                frontier.push(state.extend(neighbor, f));
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
    use crate::heuristic::LexicalOverlap;
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
    async fn finds_a_path_using_the_heuristic() {
        let server = MockServer::start().await;
        mock_page(&server, "A", &["B", "Unrelated_Topic"])
            .mount(&server)
            .await;
        mock_page(&server, "B", &["Target"]).mount(&server).await;
        mock_page(&server, "Unrelated_Topic", &[]).mount(&server).await;
        mock_page(&server, "Target", &[]).mount(&server).await;

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
        let finish = PageId::parse_with_origin(&format!("{}/wiki/Target", server.uri()), &server.uri()).unwrap();

        let outcome = run(&ctx, start, finish, &LexicalOverlap).await;
        assert!(matches!(outcome, SearchOutcome::Found { .. }));
    }
}
