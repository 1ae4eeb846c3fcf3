//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! controller and fetcher through whole ticks.
//!
//! Page texts avoid short words and digits: the fuzzy matcher scores a short
//! text by how well it fits inside a keyword, so a word like "go" would be
//! reported as a hit.

use smart_inspector::config::Config;
use smart_inspector::crawler::Controller;
use smart_inspector::state::{CrawlTarget, MatchKind, Phase, StatusTag};
use smart_inspector::CrawlSession;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given per-phase page budget
fn create_test_config(page_budget: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages_per_phase = page_budget;
    config.crawler.request_timeout_secs = 5;
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>Sample site</title></head><body>{}</body></html>",
            body
        ),
        "text/html; charset=utf-8",
    )
}

/// Mounts an HTML page that must be requested exactly `fetches` times
async fn mount_page(server: &MockServer, route: &str, body: &str, fetches: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(fetches)
        .mount(server)
        .await;
}

/// Serves a plain page for every path not mounted before it
async fn mount_fallback_page(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(html_page("<p>Nothing new on this page</p>"))
        .mount(server)
        .await;
}

fn count_tag(session: &CrawlSession, tag: StatusTag) -> usize {
    session.feed().iter().filter(|e| e.tag == tag).count()
}

fn seed(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

#[tokio::test]
async fn test_small_site_without_matches_completes() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<div><a href="/about">About the team</a> <a href="/contact">Contact details</a></div>
        <p>Welcome to our small shop</p>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/about",
        r#"<p>We sell handmade candles</p>
        <a href="/">Back home</a> <a href="/contact">Contact details</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/contact", "<p>Send us a letter</p>", 1).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::Completed);
    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.queued, 0);
    assert_eq!(report.matches, 0);

    let session = controller.snapshot();
    assert!(session.categories().is_empty());
    assert!(session.matches().is_empty());
    assert_eq!(count_tag(session, StatusTag::Crawled), 3);
    assert_eq!(count_tag(session, StatusTag::FrontierDrained), 1);
    assert_eq!(session.feed().last().unwrap().tag, StatusTag::Completed);

    // Completed is terminal
    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Completed);
}

#[tokio::test]
async fn test_keyword_in_link_pauses_first_tick() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<div><a href="https://gowithguide.com/partners">Our travel partner</a></div>
        <a href="/about">About the team</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/about", "<p>We sell handmade candles</p>", 0).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::Paused(CrawlTarget::MainDomain));
    assert_eq!(report.pages_in_phase, 1);

    let session = controller.snapshot();
    let url_records: Vec<_> = session
        .matches()
        .iter()
        .filter(|r| r.kind == MatchKind::Url)
        .collect();
    assert_eq!(url_records.len(), 1);
    assert_eq!(url_records[0].context, "https://gowithguide.com/partners");
    assert_eq!(url_records[0].source_url, seed(&server));
    assert!(session
        .matches()
        .iter()
        .all(|r| matches!(r.kind, MatchKind::Url | MatchKind::ResolvedUrl)));

    assert_eq!(count_tag(session, StatusTag::Match), session.matches().len());
    assert_eq!(session.feed().last().unwrap().tag, StatusTag::Paused);
}

/// Home page with two priority categories and more articles than the budget
async fn mount_category_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<nav>
            <a href="/category/travel/">Travel</a>
            <a href="/category/blog/">Blog</a>
        </nav>
        <ul>
            <li><a href="/articles/lakes">Lakes</a></li>
            <li><a href="/articles/mountains">Mountains</a></li>
            <li><a href="/articles/rivers">Rivers</a></li>
            <li><a href="/articles/forests">Forests</a></li>
            <li><a href="/articles/deserts">Deserts</a></li>
            <li><a href="/articles/islands">Islands</a></li>
            <li><a href="/articles/canyons">Canyons</a></li>
            <li><a href="/articles/valleys">Valleys</a></li>
        </ul>"#,
        1,
    )
    .await;
    mount_fallback_page(server).await;
}

#[tokio::test]
async fn test_budget_exhaustion_falls_back_to_first_category() {
    let server = MockServer::start().await;
    mount_category_site(&server).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::CategoryCrawl(0));
    assert_eq!(report.pages_processed, 8);
    assert_eq!(report.pages_in_phase, 0);

    let session = controller.snapshot();
    let names: Vec<&str> = session.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["travel", "blog"]);

    let travel_url = format!("{}/category/travel/", server.uri());
    assert_eq!(session.categories()[0].url, travel_url);
    let queued: Vec<_> = session.frontier().iter().collect();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].url, travel_url);
    assert_eq!(queued[0].depth, 0);

    assert_eq!(count_tag(session, StatusTag::Categories), 1);
    assert_eq!(count_tag(session, StatusTag::LimitReached), 1);
    assert_eq!(session.feed().last().unwrap().tag, StatusTag::PhaseChange);
    assert_eq!(session.current_category().unwrap().name, "travel");
}

#[tokio::test]
async fn test_fallback_chain_ends_completed() {
    let server = MockServer::start().await;
    mount_category_site(&server).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));

    let mut phases = Vec::new();
    for _ in 0..5 {
        let report = controller.tick().await;
        phases.push(report.phase);
        if report.phase == Phase::Completed {
            break;
        }
    }

    // Both category pages were already visited during the main-domain phase
    assert_eq!(
        phases,
        vec![
            Phase::CategoryCrawl(0),
            Phase::CategoryCrawl(1),
            Phase::Completed
        ]
    );

    let session = controller.snapshot();
    assert_eq!(session.frontier().visited_count(), 8);
    assert!(session.matches().is_empty());
    assert_eq!(count_tag(session, StatusTag::PhaseChange), 2);
    assert_eq!(session.feed().last().unwrap().tag, StatusTag::Completed);
}

#[tokio::test]
async fn test_match_in_category_pauses_category_phase() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/category/travel/">Travel</a> <a href="/category/blog/">Blog</a>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/category/travel/",
        "<p>Tours booked through Go With Guide partners</p>",
        1,
    )
    .await;
    mount_page(&server, "/category/blog/", "<p>Latest stories</p>", 0).await;

    let mut controller = Controller::new(create_test_config(1)).unwrap();
    controller.start(&seed(&server));

    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::CategoryCrawl(0));

    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Paused(CrawlTarget::Category(0)));

    let session = controller.snapshot();
    let travel_url = format!("{}/category/travel/", server.uri());
    assert!(!session.matches().is_empty());
    assert!(session.matches().iter().all(|r| r.source_url == travel_url));
    assert!(session
        .matches()
        .iter()
        .any(|r| r.kind == MatchKind::Content
            && r.context == "Tours booked through Go With Guide partners"));
    assert!(session
        .feed()
        .last()
        .unwrap()
        .message
        .contains("'travel' category"));
}

#[tokio::test]
async fn test_fetch_failures_are_not_fatal() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/broken">Broken page</a>
        <a href="/brochure.pdf">Brochure</a>
        <a href="/about">About the team</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("%PDF-1.4", "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/about", "<p>We sell handmade candles</p>", 1).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::Completed);
    assert_eq!(report.pages_processed, 4);

    let session = controller.snapshot();
    assert!(session
        .frontier()
        .is_visited(&format!("{}/broken", server.uri())));
    assert_eq!(count_tag(session, StatusTag::FetchFailed), 1);
    assert_eq!(count_tag(session, StatusTag::Crawled), 2);
    assert!(session
        .feed()
        .iter()
        .any(|e| e.tag == StatusTag::FetchFailed && e.message.contains("HTTP 500")));
    assert!(session
        .feed()
        .iter()
        .any(|e| e.tag == StatusTag::Skipped && e.message.contains("non-HTML")));
}

#[tokio::test]
async fn test_unreachable_seed_completes() {
    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start("http://127.0.0.1:9/");
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::Completed);
    assert_eq!(report.pages_processed, 1);
    assert_eq!(count_tag(controller.snapshot(), StatusTag::FetchFailed), 1);
}

#[tokio::test]
async fn test_external_pages_stop_at_depth_two() {
    let main_site = MockServer::start().await;
    let partner_site = MockServer::start().await;
    let distant_site = MockServer::start().await;

    mount_page(
        &main_site,
        "/",
        &format!(
            r#"<a href="{}/partner-page">Partner site</a>"#,
            partner_site.uri()
        ),
        1,
    )
    .await;
    mount_page(
        &partner_site,
        "/partner-page",
        &format!(
            r#"<a href="{}/far-away">Distant site</a>"#,
            distant_site.uri()
        ),
        1,
    )
    .await;
    mount_page(&distant_site, "/far-away", "<p>Never requested</p>", 0).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&main_site));
    let report = controller.tick().await;

    assert_eq!(report.phase, Phase::Completed);
    assert_eq!(report.pages_processed, 3);

    let session = controller.snapshot();
    assert_eq!(count_tag(session, StatusTag::Crawled), 2);
    assert!(session
        .feed()
        .iter()
        .any(|e| e.tag == StatusTag::Skipped && e.message.contains("depth 2")));
    assert!(session.frontier().iter().all(|e| e.depth <= 2));
}

#[tokio::test]
async fn test_resume_after_match_pauses_again_then_reset() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Proudly partnered with Go With Guide tours</p>
        <a href="/about">About the team</a>
        <a href="/contact">Contact details</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/about", "<p>We sell handmade candles</p>", 1).await;
    mount_page(&server, "/contact", "<p>Send us a letter</p>", 0).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));

    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Paused(CrawlTarget::MainDomain));
    let found = report.matches;
    assert!(found >= 1);

    // Ticking while paused does nothing
    let report = controller.tick().await;
    assert_eq!(report.pages_in_phase, 1);

    assert!(controller.resume());
    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Paused(CrawlTarget::MainDomain));
    assert_eq!(report.pages_in_phase, 2);
    assert_eq!(report.pages_processed, 2);
    assert_eq!(report.matches, found);

    controller.reset();
    let session = controller.snapshot();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.matches().is_empty());
    assert!(session.frontier().is_empty());
    assert_eq!(session.frontier().visited_count(), 0);
}

#[tokio::test]
async fn test_draining_after_resumed_match_completes_without_fallback() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Proudly partnered with Go With Guide tours</p>
        <a href="/category/travel/">Travel</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/category/travel/", "<p>Latest stories</p>", 1).await;

    let mut controller = Controller::new(create_test_config(8)).unwrap();
    controller.start(&seed(&server));

    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Paused(CrawlTarget::MainDomain));
    let found = report.matches;

    assert!(controller.resume());
    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Paused(CrawlTarget::MainDomain));
    assert_eq!(report.queued, 0);

    assert!(controller.resume());
    let report = controller.tick().await;
    assert_eq!(report.phase, Phase::Completed);
    assert_eq!(report.matches, found);

    let session = controller.snapshot();
    assert_eq!(session.categories().len(), 1);
    assert_eq!(count_tag(session, StatusTag::PhaseChange), 0);
    assert!(!session
        .feed()
        .iter()
        .any(|e| e.message.contains("no matches") || e.message.contains("No matches")));
    let last = session.feed().last().unwrap();
    assert_eq!(last.tag, StatusTag::Completed);
    assert_eq!(
        last.message,
        format!("Crawl completed with {} matches.", found)
    );
}
