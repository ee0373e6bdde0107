use doctrace_catalog::{CatalogBuilder, CatalogConfig, LanguageFamily, SourceCatalog};
use doctrace_resolver::{parse_trace, FrameResolver};
use pretty_assertions::assert_eq;

fn catalog() -> SourceCatalog {
    let builder = CatalogBuilder::new(CatalogConfig::default()).expect("builder");
    SourceCatalog::from_pages(vec![
        builder.build_page(
            "/store/",
            "<pre><code>func Lookup(key string) (string, error) {\n}\n\nfunc Store(key, value string) error {\n}</code></pre>",
        ),
        builder.build_page(
            "/server/",
            "<pre><code>func (s *Server) Handle(req *Request) error {\n}\n\nfunc main() {\n}</code></pre>",
        ),
        builder.build_page(
            "/scripts/",
            "<pre><code>def migrate(db):\n    pass</code></pre>",
        ),
    ])
}

const TRACE: &str = "panic: key not found\n\
                     \n\
                     goroutine 1 [running]:\n\
                     main.Lookup({0x4b2f60, 0x3})\n\
                     \t/home/dev/app/store/lookup.go:21 +0x1d\n\
                     main.(*Server).Handle(0xc000010000)\n\
                     \t/home/dev/app/server/handler.go:44 +0x52\n\
                     main.main()\n\
                     \t/home/dev/app/server/main.go:12 +0x25";

#[test]
fn resolves_root_frame_first() {
    let catalog = catalog();
    let frames = parse_trace(TRACE);
    assert_eq!(frames.len(), 3);

    let resolved = FrameResolver::new(&catalog)
        .resolve(&frames, 0)
        .expect("resolved");
    assert_eq!(resolved.ordinal(), 0);
    assert_eq!(resolved.route(), "/server/");
    assert_eq!(resolved.descriptor().name, "main");
    assert_eq!(resolved.language(), LanguageFamily::Go);
}

#[test]
fn resumes_from_ordinal() {
    let catalog = catalog();
    let frames = parse_trace(TRACE);
    let resolver = FrameResolver::new(&catalog);

    let handle = resolver.resolve(&frames, 1).expect("handle");
    assert_eq!(handle.ordinal(), 1);
    assert_eq!(handle.descriptor().name, "Handle");
    assert_eq!(handle.descriptor().index, 0);

    let lookup = resolver.resolve(&frames, 2).expect("lookup");
    assert_eq!(lookup.route(), "/store/");
    assert_eq!(lookup.descriptor().name, "Lookup");
    assert_eq!(lookup.frame().line_number, 21);

    assert!(resolver.resolve(&frames, 3).is_none());
}

#[test]
fn resolution_is_deterministic() {
    let catalog = catalog();
    let frames = parse_trace(TRACE);
    let resolver = FrameResolver::new(&catalog);
    for resume in 0..frames.len() {
        assert_eq!(resolver.resolve(&frames, resume), resolver.resolve(&frames, resume));
    }
}

#[test]
fn skips_frames_without_a_language_bucket() {
    let catalog = catalog();
    let trace = "boom\n\
                 render()\n\
                 /srv/site/ui/view.js:3\n\
                 migrate(db)\n\
                 /srv/site/scripts/migrate.py:7";
    let frames = parse_trace(trace);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].name, "migrate");

    let resolver = FrameResolver::new(&catalog);
    let first = resolver.resolve(&frames, 0).expect("migrate");
    assert_eq!(first.route(), "/scripts/");
    assert_eq!(first.language(), LanguageFamily::Python);

    // No page carries JavaScript, so nothing resolves from ordinal 1 on.
    assert!(resolver.resolve(&frames, 1).is_none());
}

#[test]
fn empty_inputs_do_not_resolve() {
    let catalog = catalog();
    let resolver = FrameResolver::new(&catalog);
    assert!(resolver.resolve(&[], 0).is_none());

    let empty = SourceCatalog::default();
    let frames = parse_trace(TRACE);
    assert!(FrameResolver::new(&empty).resolve(&frames, 0).is_none());
}
