use wikirace_engine::{EngineConfig, PageId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An [`EngineConfig`] with `article_origin` pointed at `server`, so the
/// article grammar and link filter accept the mock server's own host
/// instead of `en.wikipedia.org`.
pub fn config_for(server: &MockServer) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.article_origin = server.uri();
    config
}

/// Mounts a mock Wikipedia article at `/wiki/<title>` whose body links to
/// each of `links` (also `/wiki/<title>` paths on the same mock server).
pub async fn mount_page(server: &MockServer, title: &str, links: &[&str]) {
    let body = links
        .iter()
        .map(|l| format!(r#"<a href="{}/wiki/{l}">{l}</a>"#, server.uri()))
        .collect::<String>();
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{title}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{body}</body></html>"
        )))
        .mount(server)
        .await;
}

pub fn page_on(server: &MockServer, title: &str) -> PageId {
    let origin = server.uri();
    PageId::parse_with_origin(&format!("{origin}/wiki/{title}"), &origin).unwrap()
}
