// tests/discovery.rs

mod common;

use std::fs;
use std::path::Path;

use common::{capturing_runner, ExecutionLog, TestSeed};
use seedrun::discovery::{CatalogDiscovery, SeedCatalog};
use seedrun::fs::{FileSystem, MockFileSystem, RealFileSystem};
use seedrun::{LogLevel, Seed, SeedRunner};
use tempfile::TempDir;

fn touch(dir: &Path, file: &str) {
    fs::write(dir.join(file), "// seed\n").unwrap();
}

fn banking_catalog(log: &ExecutionLog) -> SeedCatalog {
    let mut catalog = SeedCatalog::new();
    let l = log.clone();
    catalog.register("UsersSeed", move || Ok(TestSeed::new("UsersSeed", &l).boxed()));
    let l = log.clone();
    catalog.register("app::seeds::AccountsSeed", move || {
        Ok(TestSeed::new("AccountsSeed", &l).after("UsersSeed").boxed())
    });
    let l = log.clone();
    catalog.register("shop::seeds::OrdersSeed", move || {
        Ok(TestSeed::new("OrdersSeed", &l).after("AccountsSeed").boxed())
    });
    catalog
}

#[test]
fn discovers_and_runs_seeds_from_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("database").join("seeds");
    fs::create_dir_all(&dir).unwrap();
    touch(&dir, "OrdersSeed.rs");
    touch(&dir, "AccountsSeed.rs");
    touch(&dir, "UsersSeed.rs");
    touch(&dir, "notes.txt");

    let log = ExecutionLog::new();
    let (runner, captured) = capturing_runner();
    let mut runner =
        runner.with_discovery(CatalogDiscovery::new(banking_catalog(&log), RealFileSystem));

    runner.discover_and_run_in(Some(dir.as_path()), "shop::seeds").unwrap();

    assert_eq!(
        runner.registered_seeds(),
        ["AccountsSeed", "OrdersSeed", "UsersSeed"]
    );
    assert_eq!(log.entries(), ["UsersSeed", "AccountsSeed", "OrdersSeed"]);
    assert!(captured.contains("Successfully loaded seed: OrdersSeed"));
    assert!(captured.contains("All seeds completed successfully!"));
}

#[test]
fn namespace_hint_is_needed_for_custom_namespaces() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "OrdersSeed.rs");

    let log = ExecutionLog::new();
    let (runner, captured) = capturing_runner();
    let mut runner =
        runner.with_discovery(CatalogDiscovery::new(banking_catalog(&log), RealFileSystem));

    runner.discover_seeds(tmp.path(), "").unwrap();

    assert!(runner.registered_seeds().is_empty());
    let warnings = captured.at(LogLevel::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Could not find seed OrdersSeed in file"));
}

#[test]
fn broken_artifact_does_not_block_the_rest() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "BrokenSeed.rs");
    touch(tmp.path(), "UsersSeed.rs");
    touch(tmp.path(), "SeedRunner.rs");

    let log = ExecutionLog::new();
    let mut catalog = banking_catalog(&log);
    catalog.register("BrokenSeed", || anyhow::bail!("DATABASE_URL not set"));
    catalog.register("SeedRunner", || anyhow::bail!("never instantiated"));

    let (runner, captured) = capturing_runner();
    let mut runner = runner.with_discovery(CatalogDiscovery::new(catalog, RealFileSystem));
    runner.discover_seeds(tmp.path(), "").unwrap();

    assert_eq!(runner.registered_seeds(), ["UsersSeed"]);
    let errors = captured.at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("BrokenSeed.rs"));
    assert!(errors[0].contains("DATABASE_URL not set"));
}

#[test]
fn missing_directory_is_created_and_nothing_runs() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("resources").join("seeds");

    let log = ExecutionLog::new();
    let (runner, captured) = capturing_runner();
    let mut runner =
        runner.with_discovery(CatalogDiscovery::new(banking_catalog(&log), RealFileSystem));

    runner.discover_and_run_user_seeds(Some(dir.as_path())).unwrap();

    assert!(dir.is_dir());
    assert!(runner.registered_seeds().is_empty());
    assert!(log.entries().is_empty());
    assert!(captured.contains("Seeds directory created:"));
    assert!(!captured.contains("Starting seed execution..."));
}

#[test]
fn empty_directory_runs_nothing() {
    let tmp = TempDir::new().unwrap();
    let (mut runner, captured) = capturing_runner();

    runner.discover_and_run_in(Some(tmp.path()), "").unwrap();

    assert!(runner.executed_seeds().is_empty());
    assert!(captured.contains("No seeds found in"));
}

#[test]
fn static_list_discovery_ignores_directory() {
    let log = ExecutionLog::new();
    let users = log.clone();
    let accounts = log.clone();
    let factories: Vec<Box<dyn Fn() -> Box<dyn Seed>>> = vec![
        Box::new(move || TestSeed::new("Accounts", &accounts).after("Users").boxed()),
        Box::new(move || TestSeed::new("Users", &users).boxed()),
    ];

    let mut runner = SeedRunner::new(false, None).with_discovery(factories);
    runner.discover_seeds("/nonexistent/seeds", "").unwrap();
    runner.run_all().unwrap();

    assert_eq!(log.entries(), ["Users", "Accounts"]);
}

#[test]
fn runner_uses_the_discovery_file_system_for_directories() {
    let mock = MockFileSystem::new();
    mock.add_file("/mock-only/seeds/UsersSeed.rs", "");

    let log = ExecutionLog::new();
    let (runner, _) = capturing_runner();
    let mut runner =
        runner.with_discovery(CatalogDiscovery::new(banking_catalog(&log), mock.clone()));

    runner
        .discover_and_run_in(Some(Path::new("/mock-only/seeds")), "")
        .unwrap();

    assert_eq!(runner.registered_seeds(), ["UsersSeed"]);
    assert_eq!(log.entries(), ["UsersSeed"]);
}

#[test]
fn missing_directory_is_created_on_the_discovery_file_system() {
    let mock = MockFileSystem::new();
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("never-on-disk").join("seeds");

    let (runner, captured) = capturing_runner();
    let mut runner =
        runner.with_discovery(CatalogDiscovery::new(SeedCatalog::new(), mock.clone()));

    runner.discover_and_run_user_seeds(Some(dir.as_path())).unwrap();

    assert!(mock.is_dir(&dir));
    assert!(!dir.exists());
    assert!(captured.contains("Creating seeds directory..."));
}

#[test]
fn user_seeds_path_is_resolved_by_discovery() {
    let mock = MockFileSystem::new();
    let runner = SeedRunner::new(false, None)
        .with_discovery(CatalogDiscovery::new(SeedCatalog::new(), mock));

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        runner.user_seeds_path().unwrap(),
        cwd.join("resources").join("seeds")
    );
}

#[test]
fn run_user_seeds_discovers_and_runs_in_one_call() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "UsersSeed.rs");
    touch(tmp.path(), "AccountsSeed.rs");

    let log = ExecutionLog::new();
    SeedRunner::run_user_seeds(false, Some(tmp.path()), banking_catalog(&log)).unwrap();

    assert_eq!(log.entries(), ["UsersSeed", "AccountsSeed"]);
}
