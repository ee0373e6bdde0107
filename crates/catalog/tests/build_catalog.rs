use doctrace_catalog::{
    CatalogBuilder, CatalogConfig, CatalogError, DirectorySource, LanguageFamily, MemorySource,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LISTING: &str = r#"
<html><body><ul>
  <li><a href="/parser/">Parser</a></li>
  <li><a href="/scroll/">Scroll</a></li>
  <li><a href="/missing/">Missing</a></li>
  <li><a href="/parser/">Parser again</a></li>
</ul></body></html>"#;

const PARSER_PAGE: &str = r#"
<h1>Parser</h1>
<pre><code>func Parse(src string) (*Node, error) {
	return parseNode(src, 0)
}

func parseNode(src string, depth int) (*Node, error) {
	return nil, nil
}</code></pre>
<p>and the bindings</p>
<pre><code>pub fn parse(src: &amp;str) -&gt; Node {
}</code></pre>"#;

const SCROLL_PAGE: &str = r#"
<pre><code>func (s *Scroller) Offset(y int) int {
	return y
}</code></pre>"#;

fn site() -> MemorySource {
    MemorySource::new()
        .with_page("/", LISTING)
        .with_page("/parser/", PARSER_PAGE)
        .with_page("/scroll/", SCROLL_PAGE)
}

#[tokio::test]
async fn builds_pages_in_listing_order_and_skips_failures() {
    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    let catalog = builder.build(&site()).await.expect("catalog");

    let routes: Vec<_> = catalog.pages().iter().map(|p| p.route.as_str()).collect();
    assert_eq!(routes, vec!["/parser/", "/scroll/"]);

    let parser = catalog.page("/parser/").expect("parser page");
    let go: Vec<_> = parser
        .functions
        .bucket(LanguageFamily::Go)
        .iter()
        .map(|f| (f.name.as_str(), f.index))
        .collect();
    assert_eq!(go, vec![("Parse", 0), ("parseNode", 1)]);

    let rust = parser.functions.bucket(LanguageFamily::Rust);
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].return_type.as_deref(), Some("Node"));
    assert_eq!(rust[0].parameters[0].ty.as_deref(), Some("&str"));

    assert_eq!(catalog.function_count(), 4);
}

#[tokio::test]
async fn build_is_deterministic() {
    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    let first = builder.build(&site()).await.expect("first");
    let second = builder.build(&site()).await.expect("second");
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_listing_is_an_error() {
    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    let result = builder.build(&MemorySource::new()).await;
    assert!(matches!(result, Err(CatalogError::Listing { .. })));
}

#[tokio::test]
async fn max_pages_limits_retrieval() {
    let builder = CatalogBuilder::new(CatalogConfig {
        max_pages: 1,
        ..Default::default()
    })
    .expect("builder");
    let catalog = builder.build(&site()).await.expect("catalog");
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn directory_source_reads_static_site() {
    let temp = TempDir::new().expect("tempdir");
    let parser_dir = temp.path().join("parser");
    tokio::fs::create_dir_all(&parser_dir).await.expect("mkdir");
    tokio::fs::write(parser_dir.join("index.html"), PARSER_PAGE)
        .await
        .expect("write parser");
    tokio::fs::write(temp.path().join("scroll.html"), SCROLL_PAGE)
        .await
        .expect("write scroll");
    tokio::fs::write(temp.path().join("index.html"), LISTING)
        .await
        .expect("write listing");

    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    let catalog = builder
        .build(&DirectorySource::new(temp.path()))
        .await
        .expect("catalog");

    let routes: Vec<_> = catalog.pages().iter().map(|p| p.route.as_str()).collect();
    assert_eq!(routes, vec!["/parser/", "/scroll/"]);
}

#[tokio::test]
async fn directory_source_synthesizes_listing_without_root_index() {
    let temp = TempDir::new().expect("tempdir");
    for route in ["scroll", "parser"] {
        let dir = temp.path().join(route);
        tokio::fs::create_dir_all(&dir).await.expect("mkdir");
        tokio::fs::write(dir.join("index.html"), SCROLL_PAGE)
            .await
            .expect("write page");
    }

    let source = DirectorySource::new(temp.path());
    assert_eq!(source.discover_routes(), vec!["/parser/", "/scroll/"]);

    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    let catalog = builder.build(&source).await.expect("catalog");
    assert_eq!(catalog.len(), 2);
}
