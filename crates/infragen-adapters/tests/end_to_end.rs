//! Presets through to files on disk, using only the real adapters.

use std::fs;
use std::path::Path;

use infragen_adapters::{
    InMemoryCatalog, LocalFilesystem, MemoryFilesystem, YamlProjectStore,
    generators::{self, files},
};
use infragen_core::{
    application::{GenerationService, PROJECT_FILE, PresetService, ProjectService},
    domain::TargetKind,
};
use tempfile::TempDir;

fn bootstrap(preset: &str, name: &str) -> infragen_core::domain::ProjectConfig {
    let catalog = InMemoryCatalog::with_builtin().unwrap();
    PresetService::new(Box::new(catalog))
        .create_project(preset, name, "development")
        .unwrap()
}

#[test]
fn web_app_renders_compose_with_services_in_preset_order() {
    let config = bootstrap("web-app", "blog");
    let fs = MemoryFilesystem::new();
    let service = GenerationService::new(generators::builtin(), Box::new(fs.clone()));

    let report = service.generate(&config, &[TargetKind::Docker], Path::new("out"));

    assert!(report.is_complete());
    let paths = fs.list_files();
    assert_eq!(
        paths,
        vec![
            Path::new("out").join(files::ENV_FILE),
            Path::new("out").join(files::COMPOSE_FILE),
        ]
    );

    let manifest = fs
        .read_file(&Path::new("out").join(files::COMPOSE_FILE))
        .unwrap();
    let frontend = manifest.find("  frontend:").unwrap();
    let api = manifest.find("  api:").unwrap();
    let database = manifest.find("  database:").unwrap();
    assert!(frontend < api && api < database);
    assert!(manifest.contains("    depends_on:\n      - database\n"));
    assert!(manifest.ends_with("volumes:\n  db_data:\n"));

    let env = fs.read_file(&Path::new("out").join(files::ENV_FILE)).unwrap();
    assert_eq!(env, "DATABASE_POSTGRES_PASSWORD=changeme\n");
}

#[test]
fn every_builtin_preset_generates_all_targets() {
    let catalog = InMemoryCatalog::with_builtin().unwrap();
    let presets = PresetService::new(Box::new(catalog.clone()));

    for preset in presets.list().unwrap() {
        let config = presets
            .create_project(&preset.id, "demo", "production")
            .unwrap();
        let report = GenerationService::new(
            generators::builtin(),
            Box::new(MemoryFilesystem::new()),
        )
        .render(&config, &TargetKind::ALL);

        assert!(report.is_complete(), "{} failed: {:?}", preset.id, report);
    }
}

#[test]
fn generated_files_land_on_disk() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("deploy");
    let config = bootstrap("web-app", "shop");
    let service = GenerationService::new(generators::builtin(), Box::new(LocalFilesystem::new()));

    let report = service.generate(&config, &TargetKind::ALL, &out);

    assert!(report.is_complete());
    for name in [
        files::COMPOSE_FILE,
        files::PLAYBOOK_FILE,
        files::INVENTORY_FILE,
        files::MAIN_FILE,
        files::VARIABLES_FILE,
        files::OUTPUTS_FILE,
        files::PROVIDER_FILE,
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert!(!out.join(files::REQUIREMENTS_FILE).exists());

    let inventory: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(out.join(files::INVENTORY_FILE)).unwrap())
            .unwrap();
    assert!(inventory["all"]["children"]["webservers"].is_mapping());
    assert!(inventory["all"]["children"]["databases"].is_mapping());
}

#[test]
fn project_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PROJECT_FILE);
    let config = bootstrap("database", "records");
    let projects = ProjectService::new(Box::new(YamlProjectStore::new()));

    projects.save(&config, &path, false).unwrap();
    assert!(projects.save(&config, &path, false).is_err());
    projects.save(&config, &path, true).unwrap();

    let loaded = projects.load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!loaded.service("mysql").unwrap().enabled);
    projects.validate(&loaded).unwrap();
}
