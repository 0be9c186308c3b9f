use super::{SearchContext, SearchOutcome};
use crate::page::PageId;
use futures::future::BoxFuture;
use std::collections::HashSet;

/// Iterative-deepening depth-first search: repeats a depth-limited DFS with
/// an increasing limit, each pass starting with a fresh visited set so that
/// nodes are un-marked on backtrack rather than staying globally visited
/// across the whole search (the difference between DFS and BFS's
/// discovered-set semantics).
pub(crate) async fn run(ctx: &SearchContext, start: PageId, finish: PageId) -> SearchOutcome {
    let mut discovered_count = 1usize;
    let mut depth_reached = 0u32;

    for depth_limit in 1..=ctx.config.max_depth {
        if ctx.expired() {
            return SearchOutcome::TimedOut {
                discovered_count,
                depth_reached,
            };
        }

        let mut visited = HashSet::new();
        let mut visited_count = 1usize;
        let mut timed_out = false;

        let result = dfs_limited(
            ctx,
            start.clone(),
            vec![start.clone()],
            0,
            depth_limit,
            &finish,
            &mut visited,
            &mut visited_count,
            &mut timed_out,
        )
        .await;

        discovered_count = discovered_count.max(visited_count);
        depth_reached = depth_limit;

        if timed_out {
            return SearchOutcome::TimedOut {
                discovered_count,
                depth_reached,
            };
        }

        if let Some(path) = result {
            let path_depth = (path.len().saturating_sub(1)) as u32;
            return SearchOutcome::Found {
                path,
                discovered_count,
                depth_reached: path_depth,
            };
        }
    }

    SearchOutcome::NotFound {
        discovered_count,
        depth_reached,
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs_limited<'a>(
    ctx: &'a SearchContext,
    node: PageId,
    path: Vec<PageId>,
    depth: u32,
    depth_limit: u32,
    finish: &'a PageId,
    visited: &'a mut HashSet<PageId>,
    visited_count: &'a mut usize,
    timed_out: &'a mut bool,
) -> BoxFuture<'a, Option<Vec<PageId>>> {
    Box::pin(async move {
        if node == *finish {
            return Some(path);
        }
        if depth >= depth_limit {
            return None;
        }
        if ctx.expired() {
            *timed_out = true;
            return None;
        }

        visited.insert(node.clone());
        let links = ctx.expand(&node).await;

        for neighbor in links {
            if visited.contains(&neighbor) {
                continue;
            }
            *visited_count += 1;
            let mut next_path = path.clone();
            next_path.push(neighbor.clone());

            let result = dfs_limited(
                ctx,
                neighbor,
                next_path,
                depth + 1,
                depth_limit,
                finish,
                visited,
                visited_count,
                timed_out,
            )
            .await;

            if result.is_some() || *timed_out {
                return result;
            }
        }

        None
    })
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

    async fn ctx_with_mock() -> (MockServer, SearchContext) {
        let server = MockServer::start().await;
        let mut config = EngineConfig::default();
        config.article_origin = server.uri();
        let ctx = SearchContext {
            client: reqwest::Client::new(),
            cache: Arc::new(InMemoryLinkCache::new()),
            semaphore: Arc::new(Semaphore::new(8)),
            config,
            deadline: Instant::now() + Duration::from_secs(5),
        };
        (server, ctx)
    }

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
    async fn finds_a_path_within_the_depth_limit() {
        let (server, ctx) = ctx_with_mock().await;
        mock_page(&server, "A", &["B"]).mount(&server).await;
        mock_page(&server, "B", &["C"]).mount(&server).await;
        mock_page(&server, "C", &[]).mount(&server).await;

        let start = PageId::parse_with_origin(&format!("{}/wiki/A", server.uri()), &server.uri()).unwrap();
        let finish = PageId::parse_with_origin(&format!("{}/wiki/C", server.uri()), &server.uri()).unwrap();

        let outcome = run(&ctx, start, finish).await;
        match outcome {
            SearchOutcome::Found { path, .. } => assert_eq!(path.len(), 3),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn backtracks_out_of_dead_ends() {
        let (server, ctx) = ctx_with_mock().await;
        mock_page(&server, "A", &["Dead", "B"]).mount(&server).await;
        mock_page(&server, "Dead", &[]).mount(&server).await;
        mock_page(&server, "B", &["C"]).mount(&server).await;
        mock_page(&server, "C", &[]).mount(&server).await;

        let start = PageId::parse_with_origin(&format!("{}/wiki/A", server.uri()), &server.uri()).unwrap();
        let finish = PageId::parse_with_origin(&format!("{}/wiki/C", server.uri()), &server.uri()).unwrap();

        let outcome = run(&ctx, start, finish).await;
        assert!(matches!(outcome, SearchOutcome::Found { .. }));
    }
}
