//! End-to-end runs against a mock RDoC site.

use indicatif::ProgressBar;
use rdoc_scrape::acquisition::http_client::HttpClient;
use rdoc_scrape::acquisition::link_check::{dead_links, scan_links, validate_url};
use rdoc_scrape::config::{BlockPolicy, LinkPolicy, ScrapeConfig};
use rdoc_scrape::export::read_hierarchy;
use rdoc_scrape::model::Category;
use rdoc_scrape::{pipeline, ScrapeError};
use std::fs;
use std::path::Path;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT_PATH: &str = "/rdoc/constructs/";

fn tree(extra_item: &str) -> String {
    format!(
        r##"<html><body>
<section class="rdoc-tree">
  <ul>
    <li>
      <a href="#">Domain: Negative Valence Systems</a>
      <ul>
        <li><a>Construct: Acute Threat ("Fear")</a></li>
        <li><a>Construct: Loss</a></li>
        {extra_item}
      </ul>
    </li>
    <li>
      <a href="#">Domain: Cognitive Systems</a>
      <ul>
        <li><a>Construct: Language</a></li>
      </ul>
    </li>
  </ul>
</section>
</body></html>"##
    )
}

fn unit(id: &str, heading: &str, items: &[&str]) -> String {
    let lis: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!(r#"<div class="rdoc-unit" id="{id}"><h3>{heading}</h3><ul>{lis}</ul></div>"#)
}

fn page(units: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", units.concat())
}

async fn mount(server: &MockServer, route: &str, body: String) {
    Mock::given(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mock site with 2 domains and 3 constructs. `extra_item` is spliced into
/// the first domain's list.
async fn mock_site(extra_item: &str) -> MockServer {
    let server = MockServer::start().await;

    mount(&server, ROOT_PATH, tree(extra_item)).await;
    mount(
        &server,
        "/rdoc/constructs/acute-threat-fear",
        page(&[
            unit("molecule_acute-threat-fear", "Molecules", &["GABA", "Dopamine"]),
            unit("circuit_acute-threat-fear", "Circuits", &["Amygdala"]),
        ]),
    )
    .await;
    mount(
        &server,
        "/rdoc/constructs/loss",
        page(&[
            unit("molecule_loss", "Molecules", &["Dopamine", "Oxytocin"]),
            unit("behavior_loss", "Behaviors", &["Crying"]),
        ]),
    )
    .await;
    mount(
        &server,
        "/rdoc/constructs/language-behavior",
        page(&[unit("behavior_language-behavior", "Behaviors", &["Speech", "Crying"])]),
    )
    .await;

    server
}

fn config(server: &MockServer, out: &Path) -> ScrapeConfig {
    ScrapeConfig {
        root_url: format!("{}{ROOT_PATH}", server.uri()),
        output_dir: out.to_path_buf(),
        ..ScrapeConfig::default()
    }
}

fn header_columns(path: &Path) -> usize {
    let text = fs::read_to_string(path).unwrap();
    text.lines().next().unwrap().split(',').count()
}

#[tokio::test]
async fn test_full_run_writes_hierarchy_and_matrices() {
    let server = mock_site("").await;
    let out = tempfile::tempdir().unwrap();
    let config = config(&server, out.path());

    let summary = pipeline::run(&config, &ProgressBar::hidden()).await.unwrap();
    assert_eq!(summary.hierarchy_rows, 3);
    assert_eq!(summary.pages_crawled, 3);
    assert_eq!(summary.files.len(), 1 + Category::ALL.len());

    let rows = read_hierarchy(&out.path().join("rdoc.csv")).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].domain, "negative-valence-systems");
    assert_eq!(rows[0].construct, "acute-threat-fear");
    assert_eq!(rows[0].subconstruct, "none");
    assert_eq!(rows[2].domain, "cognitive-systems");
    assert_eq!(rows[2].url, format!("{}{ROOT_PATH}language-behavior", server.uri()));

    let expected_columns = [
        (Category::Molecule, 2),
        (Category::Cell, 0),
        (Category::Circuit, 1),
        (Category::PhysFunction, 0),
        (Category::Behavior, 2),
        (Category::SelfReport, 0),
        (Category::Paradigm, 0),
    ];
    for (category, constructs) in expected_columns {
        let file = out.path().join(category.file_name());
        assert_eq!(header_columns(&file), constructs + 1, "{category}");
    }

    assert_eq!(
        fs::read_to_string(out.path().join("molecule.csv")).unwrap(),
        "vals,acute-threat-fear,loss\ndopamine,1,1\ngaba,1,0\noxytocin,0,1\n"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("behavior.csv")).unwrap(),
        "vals,loss,language-behavior\ncrying,1,1\nspeech,0,1\n"
    );
    assert_eq!(fs::read_to_string(out.path().join("cell.csv")).unwrap(), "vals\n");
}

#[tokio::test]
async fn test_matrices_from_existing_hierarchy() {
    let server = mock_site("").await;
    let out = tempfile::tempdir().unwrap();
    let config = config(&server, out.path());

    pipeline::run(&config, &ProgressBar::hidden()).await.unwrap();
    let first = fs::read_to_string(out.path().join("circuit.csv")).unwrap();
    fs::remove_file(out.path().join("circuit.csv")).unwrap();

    let summary = pipeline::run_from_hierarchy(
        &config,
        &out.path().join("rdoc.csv"),
        &ProgressBar::hidden(),
    )
    .await
    .unwrap();
    assert_eq!(summary.hierarchy_rows, 3);
    assert_eq!(
        fs::read_to_string(out.path().join("circuit.csv")).unwrap(),
        first
    );
}

#[tokio::test]
async fn test_dead_link_fails_crawl_by_default() {
    let server = mock_site("<li><a>Construct: Gone</a></li>").await;
    let out = tempfile::tempdir().unwrap();
    let config = config(&server, out.path());

    let err = pipeline::run(&config, &ProgressBar::hidden()).await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::HttpStatus { status: 404, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_link_policy_skip_drops_dead_pages() {
    let server = mock_site("<li><a>Construct: Gone</a></li>").await;
    let out = tempfile::tempdir().unwrap();
    let config = ScrapeConfig {
        link_policy: LinkPolicy::Skip,
        ..config(&server, out.path())
    };

    let summary = pipeline::run(&config, &ProgressBar::hidden()).await.unwrap();
    assert_eq!(summary.hierarchy_rows, 4);
    assert_eq!(summary.pages_crawled, 3);
    assert_eq!(summary.links_skipped, 1);

    // rdoc.csv still lists every tree item.
    assert_eq!(read_hierarchy(&out.path().join("rdoc.csv")).unwrap().len(), 4);
}

#[tokio::test]
async fn test_link_policy_fail_reports_dead_pages() {
    let server = mock_site("<li><a>Construct: Gone</a></li>").await;
    let out = tempfile::tempdir().unwrap();
    let config = ScrapeConfig {
        link_policy: LinkPolicy::Fail,
        ..config(&server, out.path())
    };

    match pipeline::run(&config, &ProgressBar::hidden()).await {
        Err(ScrapeError::DeadLinks(urls)) => {
            assert_eq!(urls, vec![format!("{}{ROOT_PATH}gone", server.uri())]);
        }
        other => panic!("expected dead links, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_block_policy() {
    let server = MockServer::start().await;
    mount(&server, ROOT_PATH, tree("")).await;
    let broken = r#"<div class="rdoc-unit" id="cell_x"><p>no heading</p></div>"#.to_string();
    for slug in ["acute-threat-fear", "loss", "language-behavior"] {
        mount(
            &server,
            &format!("{ROOT_PATH}{slug}"),
            page(&[broken.clone(), unit(&format!("paradigm_{slug}"), "Paradigms", &["Startle"])]),
        )
        .await;
    }
    let out = tempfile::tempdir().unwrap();

    let strict = config(&server, out.path());
    let err = pipeline::run(&strict, &ProgressBar::hidden()).await.unwrap_err();
    assert!(matches!(err, ScrapeError::MalformedBlock { .. }));

    let lenient = ScrapeConfig {
        block_policy: BlockPolicy::Skip,
        ..config(&server, out.path())
    };
    let summary = pipeline::run(&lenient, &ProgressBar::hidden()).await.unwrap();
    let paradigm = summary
        .matrices
        .iter()
        .find(|m| m.category == Category::Paradigm)
        .unwrap();
    assert_eq!(paradigm.constructs, 3);
    assert_eq!(paradigm.terms, 1);
    assert_eq!(header_columns(&out.path().join("cell.csv")), 1);
}

#[tokio::test]
async fn test_validate_url() {
    let server = mock_site("").await;
    let config = config(&server, Path::new("unused"));
    let client = HttpClient::from_config(&config).unwrap();

    assert!(validate_url(&client, &format!("{}{ROOT_PATH}loss", server.uri())).await);
    assert!(!validate_url(&client, &format!("{}{ROOT_PATH}missing", server.uri())).await);
}

#[tokio::test]
async fn test_redirect_is_not_a_live_link() {
    let server = mock_site("").await;
    Mock::given(path(format!("{ROOT_PATH}old")))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}{ROOT_PATH}loss", server.uri())),
        )
        .mount(&server)
        .await;
    let config = config(&server, Path::new("unused"));
    let client = HttpClient::from_config(&config).unwrap();

    let old = format!("{}{ROOT_PATH}old", server.uri());
    let live = format!("{}{ROOT_PATH}loss", server.uri());
    assert!(!validate_url(&client, &old).await);

    let results = scan_links(&client, &[old.clone(), live]).await;
    assert_eq!(results[0].status, 301);
    assert_eq!(dead_links(&results), vec![old]);

    // Page fetches still follow the redirect.
    let body = client.get_text(&format!("{}{ROOT_PATH}old", server.uri())).await.unwrap();
    assert!(body.contains("molecule_loss"));
}
