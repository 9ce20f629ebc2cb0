use stac_validator::{Config, Error, Mode, ViolationKind};

const TREE: &str = "data/tree/catalog.json";
const STAC_ID: &str = "data/schemas/stac-id.json";

fn custom(schema: &str) -> Mode {
    Mode::Custom(schema.to_string())
}

#[test]
fn missing_root() {
    let config = Config::new("data/not-a-file.json");
    assert!(matches!(
        stac_validator::run(&config).unwrap_err(),
        Error::RootNotFound(_)
    ));
}

#[test]
fn custom_schema_names_the_missing_property() {
    let config = Config::new("data/foo.json").with_mode(custom("data/schemas/require-foo.json"));
    let report = stac_validator::run(&config).unwrap();
    assert_eq!(report.len(), 1);
    assert!(!report.overall_valid());
    let root = report.root().unwrap();
    assert_eq!(root.error_type(), Some(ViolationKind::ValidationError));
    assert!(root.violations()[0].message.contains("foo"));
    assert!(root.schemas()[0].ends_with("require-foo.json"));
}

#[test]
fn non_recursive_only_validates_the_root() {
    let config = Config::new(TREE).with_mode(custom(STAC_ID));
    let report = stac_validator::run(&config).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.overall_valid());
}

#[test]
fn recursive() {
    let config = Config::new(TREE)
        .with_mode(custom(STAC_ID))
        .with_recursive(true);
    let report = stac_validator::run(&config).unwrap();
    let visited: Vec<_> = report
        .results()
        .iter()
        .map(|result| {
            let path = result.path().rsplit_once("data/").unwrap().1;
            (path, result.depth(), result.is_valid())
        })
        .collect();
    assert_eq!(
        visited,
        vec![
            ("tree/catalog.json", 0, true),
            ("tree/child/catalog.json", 1, false),
            ("tree/item.json", 1, true),
        ]
    );
    assert!(report.overall_valid());
    assert_eq!(report.invalid_count(), 1);
}

#[test]
fn recursive_with_max_depth() {
    let config = Config::new(TREE)
        .with_mode(custom(STAC_ID))
        .with_recursive(true)
        .with_max_depth(Some(1));
    let report = stac_validator::run(&config).unwrap();
    let depths: Vec<_> = report.results().iter().map(|result| result.depth()).collect();
    assert_eq!(depths, vec![0, 1, 1]);
    assert!(report.results()[2].path().ends_with("item.json"));
}

#[test]
fn links_and_assets() {
    let config = Config::new(TREE)
        .with_mode(custom(STAC_ID))
        .with_recursive(true)
        .with_links(true)
        .with_assets(true);
    let report = stac_validator::run(&config).unwrap();

    let root = report.root().unwrap();
    assert!(root.is_valid());
    let links = root.links().unwrap();
    assert_eq!(links.valid.len(), 3);
    assert!(links.invalid.is_empty());

    let item = report
        .results()
        .iter()
        .find(|result| result.path().ends_with("item.json"))
        .unwrap();
    assert!(!item.is_valid());
    assert_eq!(item.error_type(), Some(ViolationKind::AssetError));
    let assets = item.assets().unwrap();
    assert_eq!(assets.valid.len(), 1);
    assert_eq!(assets.invalid.len(), 1);
    assert!(assets.invalid[0].ends_with("missing.tif"));
}

#[test]
fn verbose_observes_every_result() {
    let config = Config::new(TREE)
        .with_mode(custom(STAC_ID))
        .with_recursive(true)
        .with_verbose(true);
    let mut observed = Vec::new();
    let report = stac_validator::run_observed(&config, |result| {
        observed.push(result.path().to_string())
    })
    .unwrap();
    assert_eq!(observed.len(), report.len());
}

#[test]
fn quiet_observes_nothing() {
    let config = Config::new(TREE).with_mode(custom(STAC_ID)).with_recursive(true);
    let mut observed = 0;
    let _ = stac_validator::run_observed(&config, |_| observed += 1).unwrap();
    assert_eq!(observed, 0);
}
