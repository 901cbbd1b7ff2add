use httpmock::prelude::*;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiki_deaths_notifier::adapters::http;
use wiki_deaths_notifier::domain::ports::SeenStore;
use wiki_deaths_notifier::{
    ConsoleNotifier, DeliveryNotifier, FileSeenStore, Watcher, WatcherConfig, WikiListingSource,
    WikiSummaryResolver,
};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

const DEATHS_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Deaths in August 2023</title></head>
<body>
<div id="mw-content-text"><div class="mw-parser-output">
  <p>The following is a list of notable deaths in August 2023.</p>
  <h3>1</h3>
  <ul>
    <li><a href="/wiki/Alice_Example" title="Alice Example">Alice Example</a>, 90, British novelist.</li>
    <li><a href="/wiki/Bob_Example" title="Bob Example">Bob Example</a>, 77, American drummer.</li>
    <li><a href="/wiki/Category:Deaths" title="Category:Deaths">Deaths</a></li>
  </ul>
  <h3>2</h3>
  <ul>
    <li><a href="/wiki/Bob_Example" title="Bob Example">Bob Example</a>, 77, American drummer.</li>
    <li><a href="/wiki/Nobody_Known" title="Nobody Known">Nobody Known</a>, 64, poet.</li>
  </ul>
  <h2>References</h2>
  <ol class="references">
    <li><ul><li><a href="/wiki/Footnote_Person" title="Footnote Person">cite</a></li></ul></li>
  </ol>
</div></div>
</body></html>"#;

#[tokio::test]
async fn test_end_to_end_cycle_with_real_http() {
    let temp_dir = TempDir::new().unwrap();
    let seen_path = temp_dir.path().join("seen_deaths.txt");
    std::fs::write(&seen_path, "Alice Example\n").unwrap();

    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/wiki/Deaths_in_August_2023")
            .header("user-agent", "WikiDeathNotifier/1.0");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(DEATHS_PAGE);
    });

    let bob_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/en/w/api.php")
            .query_param("titles", "Bob Example");
        then.status(200).json_body(serde_json::json!({
            "query": {"pages": [{
                "pageid": 10,
                "title": "Bob Example",
                "fullurl": "https://en.wikipedia.org/wiki/Bob_Example",
                "extract": "Bob Example was an American drummer. He toured widely.",
                "langlinks": []
            }]}
        }));
    });

    let nobody_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/en/w/api.php")
            .query_param("titles", "Nobody Known");
        then.status(200).json_body(serde_json::json!({
            "query": {"pages": [{"ns": 0, "title": "Nobody Known", "missing": true}]}
        }));
    });

    let config = WatcherConfig {
        listing_url: Some(server.url("/wiki/Deaths_in_August_2023")),
        api_url_template: server.url("/{lang}/w/api.php"),
        seen_file: seen_path.clone(),
        ..WatcherConfig::default()
    };

    let client = http::build_client(&config).unwrap();
    let buffer = SharedBuffer::default();
    let notifier =
        DeliveryNotifier::select(&config, ConsoleNotifier::with_writer(buffer.clone())).unwrap();
    assert!(notifier.is_console());

    let mut watcher = Watcher::load(
        &config,
        WikiListingSource::new(client.clone()),
        WikiSummaryResolver::new(client, &config),
        notifier,
        FileSeenStore::new(&seen_path),
    )
    .await
    .unwrap();

    let report = watcher.run_cycle().await.unwrap();

    page_mock.assert();
    bob_mock.assert_hits(1);
    nobody_mock.assert_hits(1);
    assert_eq!(report.notified, vec!["Bob Example", "Nobody Known"]);
    assert!(report.failed.is_empty());
    assert_eq!(report.duplicates_skipped, 1);

    let printed = buffer.contents();
    assert!(printed.contains("Subject: New name in the deaths list: Bob Example"));
    assert!(printed.contains(
        "Bob Example was an American drummer.\n\nLink: https://en.wikipedia.org/wiki/Bob_Example"
    ));
    assert!(printed.contains(
        "Article not found: Nobody Known\n\nLink: https://en.wikipedia.org/wiki/Nobody_Known"
    ));
    assert!(!printed.contains("Footnote Person"));
    assert!(!printed.contains("Alice Example"));

    // A restarted watcher sees everything already notified.
    let reloaded = FileSeenStore::new(&seen_path).load().await.unwrap();
    let expected: Vec<&str> = vec!["Alice Example", "Bob Example", "Nobody Known"];
    assert_eq!(reloaded.iter().map(String::as_str).collect::<Vec<_>>(), expected);

    // Second cycle against the same page is quiet.
    let report = watcher.run_cycle().await.unwrap();
    assert!(report.notified.is_empty());
    bob_mock.assert_hits(1);
}

#[tokio::test]
async fn test_listing_outage_is_cycle_failure() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/wiki/Deaths_in_August_2023");
        then.status(502);
    });

    let config = WatcherConfig {
        listing_url: Some(server.url("/wiki/Deaths_in_August_2023")),
        api_url_template: server.url("/{lang}/w/api.php"),
        seen_file: temp_dir.path().join("seen_deaths.txt"),
        ..WatcherConfig::default()
    };
    let client = http::build_client(&config).unwrap();

    let mut watcher = Watcher::load(
        &config,
        WikiListingSource::new(client.clone()),
        WikiSummaryResolver::new(client, &config),
        DeliveryNotifier::select(&config, ConsoleNotifier::with_writer(SharedBuffer::default()))
            .unwrap(),
        FileSeenStore::new(config.seen_file.clone()),
    )
    .await
    .unwrap();

    let result = watcher.run_cycle().await;

    page_mock.assert();
    assert!(result.is_err());
    assert!(watcher.seen().is_empty());
    assert!(!config.seen_file.exists());
}
