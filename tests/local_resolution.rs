mod common;

use common::{FakeCatalog, LOCAL_TURBINE, bundled_resources, resources_with, write_file};
use renewable_assets::assets::PanelModel;
use renewable_assets::config::ResourceConfig;
use renewable_assets::error::AssetError;
use renewable_assets::resources::Resources;
use renewable_assets::selector::{TurbineSelector, TurbineSpec};
use renewable_assets::smoothing::SmoothingParams;
use renewable_assets::catalog::CatalogCache;
use std::sync::Arc;

#[test]
fn local_name_reads_record_without_touching_catalog() {
    let (root, cache, mut resources) = resources_with(FakeCatalog::new(Vec::new()));
    write_file(&root.path().join("windturbine"), "Test_2MW.toml", LOCAL_TURBINE);
    resources
        .set_windturbine_dir(root.path().join("windturbine"))
        .expect("refresh");

    let record = resources
        .resolve_turbine(&TurbineSpec::parse("Test_2MW"))
        .expect("local turbine should resolve");
    assert_eq!(record.name, "Test 2MW");
    assert_eq!(record.hub_height, 80.0);
    assert_eq!(record.rated_power, 1.0);
    assert_eq!(record.velocities.len(), record.power.len());
    assert!(!cache.is_populated());
    assert_eq!(cache.source().fetches(), 0);
}

#[test]
fn local_selector_reads_filename() {
    let (root, _cache, resources) = resources_with(FakeCatalog::new(Vec::new()));
    write_file(&root.path().join("windturbine"), "Test_2MW.toml", LOCAL_TURBINE);

    let spec = TurbineSpec::from_selector(TurbineSelector {
        source: Some("local".into()),
        filename: Some("Test_2MW".into()),
        ..TurbineSelector::default()
    })
    .expect("selector");
    let capacity = resources
        .windturbine_rated_capacity(&spec)
        .expect("capacity");
    assert_eq!(capacity, 1.0);
}

#[test]
fn missing_local_turbine_is_recoverable_not_found() {
    let (_root, _cache, resources) = resources_with(FakeCatalog::new(Vec::new()));
    let err = resources
        .resolve_turbine(&TurbineSpec::parse("Nope"))
        .unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn registry_follows_directory_changes() {
    let (root, _cache, mut resources) = resources_with(FakeCatalog::new(Vec::new()));
    assert!(resources.windturbines().is_empty());

    let other = root.path().join("other_turbines");
    std::fs::create_dir_all(&other).expect("mkdir");
    write_file(&other, "Test_2MW.toml", LOCAL_TURBINE);
    resources.set_windturbine_dir(&other).expect("refresh");
    assert!(resources.windturbines().contains("Test_2MW"));

    resources
        .set_config(ResourceConfig::with_root(root.path()))
        .expect("refresh");
    assert!(resources.windturbines().is_empty());
}

#[test]
fn bundled_resources_are_listed_and_resolvable() {
    let cache = Arc::new(CatalogCache::new(FakeCatalog::new(Vec::new())));
    let resources = Resources::with_catalog(ResourceConfig::with_root(&bundled_resources()), cache)
        .expect("resources");

    assert!(resources.windturbines().contains("Vestas_V112_3MW"));
    assert!(resources.windturbines().contains("Enercon_E82_3000kW"));
    assert!(resources.solarpanels().contains("CSi"));
    assert!(resources.solarpanels().contains("KANENA"));

    for name in resources.windturbines() {
        let record = resources
            .resolve_turbine(&TurbineSpec::Local(name.clone()))
            .expect("bundled turbine should be valid");
        let max = record.power.iter().copied().fold(f64::MIN, f64::max);
        assert_eq!(record.rated_power, max);

        let smoothed = record.smoothed(&SmoothingParams::default());
        let max = smoothed.power.iter().copied().fold(f64::MIN, f64::max);
        assert_eq!(smoothed.rated_power, max);
        assert_eq!(smoothed.velocities.len(), 72);
    }

    let vestas = resources
        .resolve_turbine(&TurbineSpec::parse("Vestas_V112_3MW"))
        .expect("vestas");
    assert_eq!(vestas.rated_power, 3.0);

    let enercon = resources
        .resolve_turbine(&TurbineSpec::parse("Enercon_E82_3000kW"))
        .expect("enercon");
    assert_eq!(enercon.hub_heights.len(), 4);
}

#[test]
fn panels_resolve_with_model_specific_capacity() {
    let cache = Arc::new(CatalogCache::new(FakeCatalog::new(Vec::new())));
    let resources = Resources::with_catalog(ResourceConfig::with_root(&bundled_resources()), cache)
        .expect("resources");

    let csi = resources.resolve_panel("CSi").expect("CSi");
    assert_eq!(csi.model, PanelModel::Huld { efficiency: 0.1 });
    assert_eq!(resources.solarpanel_rated_capacity("CSi").expect("capacity"), 0.1);

    let kanena = resources
        .solarpanel_rated_capacity("KANENA")
        .expect("capacity");
    let expected = (0.000341 + 1000.0 * 0.000175 + 1000.0_f64.ln() * -0.000009) * 1000.0;
    assert!((kanena - expected).abs() < 1e-9);

    let err = resources.resolve_panel("missing").unwrap_err();
    assert!(matches!(err, AssetError::NotFound { kind: "panel", .. }));
}

#[test]
fn malformed_local_record_is_hard_error() {
    let (root, _cache, resources) = resources_with(FakeCatalog::new(Vec::new()));
    write_file(
        &root.path().join("windturbine"),
        "Broken.toml",
        "hub_height = 80\nvelocities = [0, 5]\npower = [0.0]\n",
    );
    let err = resources
        .resolve_turbine(&TurbineSpec::parse("Broken"))
        .unwrap_err();
    assert!(matches!(err, AssetError::InvalidRecord(_)));
    assert!(!err.is_recoverable());
}
