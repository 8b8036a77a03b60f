//! Scenarios for the discovery pipeline across loader, aggregators and writer

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use workbench_core::{
    DependencyLocation, DependencyStatus, Descriptor, Error, QueuedDependency, RecordingObserver,
    Workbench, WorkbenchConfig, services::Observation,
};

fn workbench() -> Workbench {
    Workbench::with_config(WorkbenchConfig::default())
}

fn write_project(root: &Path, dir: &str, descriptor: serde_json::Value) -> PathBuf {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("descriptor.json"), descriptor.to_string()).unwrap();
    path
}

fn install(project: &Path, name: &str, descriptor: serde_json::Value) {
    let dir = project.join("installed-packages").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("descriptor.json"), descriptor.to_string()).unwrap();
}

#[tokio::test]
async fn test_missing_descriptor_is_left_out() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_project(temp_dir.path(), "A", json!({ "name": "A" }));
    let b = temp_dir.path().join("B");
    fs::create_dir_all(&b).unwrap();

    let projects = workbench().load_projects([&a, &b]).await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects["A"].path, a);
}

#[tokio::test]
async fn test_key_set_ignores_auxiliary_files() {
    let temp_dir = TempDir::new().unwrap();
    let full = write_project(
        temp_dir.path(),
        "full",
        json!({ "name": "full", "pluginConfig": { "manifestPath": "manifest.json" } }),
    );
    fs::write(full.join("manifest.json"), r#"{ "commands": [] }"#).unwrap();
    fs::create_dir_all(full.join("assets")).unwrap();
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&[0, 0, 0, 0]);
    fs::write(full.join("assets/icon.png"), &png).unwrap();

    let bare = write_project(temp_dir.path(), "bare", json!({ "name": "bare" }));
    let broken = write_project(temp_dir.path(), "broken", json!({ "name": "broken" }));
    fs::write(broken.join("descriptor.json"), "{ \"name\": ").unwrap();

    let projects = workbench().load_projects([&full, &bare, &broken]).await.unwrap();

    let names: Vec<&str> = projects.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["bare", "full"]);
    assert!(projects["full"].manifest.is_some());
    assert!(projects["full"].icon.is_some());
    assert!(projects["bare"].manifest.is_none());
    assert!(projects["bare"].icon.is_none());
}

#[tokio::test]
async fn test_mistyped_descriptor_fields_do_not_drop_the_project() {
    let temp_dir = TempDir::new().unwrap();
    let odd = write_project(
        temp_dir.path(),
        "odd",
        json!({ "name": "odd", "version": 1, "dependencies": null, "pluginConfig": [] }),
    );
    let nameless = write_project(temp_dir.path(), "nameless", json!({ "name": 42 }));

    let workbench = workbench();
    let projects = workbench.load_projects([&odd, &nameless]).await.unwrap();

    assert_eq!(projects.keys().collect::<Vec<_>>(), vec!["odd"]);
    assert!(projects["odd"].descriptor.version().is_none());
    assert!(projects["odd"].manifest.is_none());

    let deps = workbench.load_all_project_dependencies(&odd).await.unwrap();
    assert!(deps.is_empty());
}

#[tokio::test]
async fn test_corrupt_icon_keeps_project() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project(temp_dir.path(), "p", json!({ "name": "iconic" }));
    fs::create_dir_all(project.join("assets")).unwrap();
    fs::write(project.join("assets/icon.png"), b"definitely not a png").unwrap();

    let observer = Arc::new(RecordingObserver::new());
    let workbench = workbench().with_observer(observer.clone());
    let projects = workbench.load_projects([&project]).await.unwrap();

    assert!(projects["iconic"].icon.is_none());
    assert!(observer.observations().iter().any(|o| matches!(
        o,
        Observation::FieldUnavailable { field: workbench_core::ProjectField::Icon, .. }
    )));
}

#[tokio::test]
async fn test_icon_path_that_is_a_directory_is_soft() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project(temp_dir.path(), "p", json!({ "name": "dir-icon" }));
    fs::create_dir_all(project.join("assets/icon.png")).unwrap();

    let projects = workbench().load_projects([&project]).await.unwrap();
    assert!(projects["dir-icon"].icon.is_none());
}

#[tokio::test]
async fn test_scan_reports_skipped_paths() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_project(temp_dir.path(), "a", json!({ "name": "a" }));
    let gone = temp_dir.path().join("gone");

    let report = workbench().scan([&a, &gone]).await.unwrap();

    assert_eq!(report.projects.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, gone);
}

#[tokio::test]
async fn test_dependency_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project(
        temp_dir.path(),
        "A",
        json!({
            "name": "A",
            "dependencies": { "foo": "^1.0.0", "bar": "^3.0.0" },
            "devDependencies": {}
        }),
    );
    install(&project, "foo", json!({ "name": "foo", "version": "1.2.0", "license": "MIT" }));

    let deps = workbench()
        .load_all_project_dependencies(&project)
        .await
        .unwrap();

    assert_eq!(deps.len(), 1);
    assert!(!deps.contains_key("bar"));

    let foo = &deps["foo"];
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.version.as_deref(), Some("1.2.0"));
    assert_eq!(foo.license.as_deref(), Some("MIT"));
    assert_eq!(foo.location, DependencyLocation::Dependencies);
    assert_eq!(foo.status, DependencyStatus::Idle);
    assert!(foo.description.is_none());
    assert!(foo.homepage.is_none());
    assert!(foo.repository.is_none());
    assert!(foo.keywords.is_empty());
}

#[tokio::test]
async fn test_dependency_in_both_sections_is_dev() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project(
        temp_dir.path(),
        "A",
        json!({
            "name": "A",
            "dependencies": { "shared": "^1.0.0" },
            "devDependencies": { "shared": "^1.0.0" }
        }),
    );
    install(&project, "shared", json!({ "name": "shared", "version": "1.0.3" }));

    let deps = workbench()
        .load_all_project_dependencies(&project)
        .await
        .unwrap();
    assert_eq!(deps["shared"].location, DependencyLocation::DevDependencies);
}

#[tokio::test]
async fn test_batch_resolution_from_explicit_queue() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project(temp_dir.path(), "A", json!({ "name": "A" }));
    install(&project, "foo", json!({ "name": "foo", "version": "1.0.0" }));

    let queue = vec![
        QueuedDependency::new("foo", DependencyLocation::DevDependencies),
        QueuedDependency::new("absent", DependencyLocation::Dependencies),
    ];
    let resolved = workbench()
        .load_project_dependencies(&project, &queue)
        .await
        .unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].location, DependencyLocation::DevDependencies);
}

#[tokio::test]
async fn test_descriptor_round_trip_through_writer() {
    let temp_dir = TempDir::new().unwrap();
    let original: Descriptor = serde_json::from_value(json!({
        "name": "round-trip",
        "version": "3.1.4",
        "description": "kept verbatim",
        "dependencies": { "foo": "^1.0.0" },
        "pluginConfig": { "manifestPath": "src/manifest.json" },
        "skpm": { "main": "plugin.sketchplugin" }
    }))
    .unwrap();

    let workbench = workbench();
    workbench
        .write_descriptor(temp_dir.path(), &original)
        .await
        .unwrap();
    let read = workbench.read_descriptor(temp_dir.path()).await.unwrap();

    assert_eq!(read, original);
}

#[tokio::test]
async fn test_timeout_config_is_applied() {
    let config = WorkbenchConfig {
        concurrency: 2,
        item_timeout_ms: Some(250),
        ..Default::default()
    };
    let workbench = Workbench::with_config(config);

    assert_eq!(workbench.context().limits.concurrency, 2);
    assert_eq!(
        workbench.context().limits.item_timeout,
        Some(Duration::from_millis(250))
    );
}

#[tokio::test]
async fn test_cancelled_workbench_refuses_to_scan() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_project(temp_dir.path(), "a", json!({ "name": "a" }));

    let workbench = workbench();
    workbench.cancellation_token().cancel();

    assert!(matches!(
        workbench.load_projects([&a]).await,
        Err(Error::Cancelled)
    ));
    assert!(matches!(
        workbench.load_all_project_dependencies(&a).await,
        Err(Error::Cancelled)
    ));
}
