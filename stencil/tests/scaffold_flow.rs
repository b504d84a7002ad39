//! End-to-end scaffold flows against a local template registry

use std::fs;
use std::path::{Path, PathBuf};

use stencil::{run_module, run_project, Registry, ScaffoldError, ScaffoldKind, ScaffoldRequest};

/// Lay out a registry file plus local project/module template trees
struct Fixture {
    _dir: tempfile::TempDir,
    registry: Registry,
    workdir: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let project_tpl = root.join("templates/project");
    fs::create_dir_all(project_tpl.join("src")).unwrap();
    fs::write(
        project_tpl.join("README.md"),
        "# {{module_name}}\n\nGenerated project.\n",
    )
    .unwrap();
    fs::write(project_tpl.join("src/app.py"), "APP = '{{module_name}}'\n").unwrap();
    fs::write(project_tpl.join("assets.bin"), [0u8, 200, 123, 255, 7]).unwrap();

    let module_tpl = root.join("templates/module");
    fs::create_dir_all(&module_tpl).unwrap();
    fs::write(
        module_tpl.join("greeter.py.tmpl"),
        "class {{ModuleNameToCamelCase}}: pass",
    )
    .unwrap();

    let registry_path = root.join("stencil.toml");
    fs::write(
        &registry_path,
        format!(
            r#"
[defaults]
project-template = "{}"
module-template = "{}"
runtime-version = ">=3.10"
"#,
            project_tpl.display(),
            module_tpl.display()
        ),
    )
    .unwrap();

    let registry = Registry::load(&registry_path).unwrap();
    let workdir = root.join("out");
    fs::create_dir_all(&workdir).unwrap();

    Fixture {
        _dir: dir,
        registry,
        workdir,
    }
}

fn module_request(fx: &Fixture, name: &str) -> ScaffoldRequest {
    ScaffoldRequest {
        kind: ScaffoldKind::Module,
        name: name.to_string(),
        destination: fx.workdir.clone(),
        template_set: None,
        module_type: None,
        remote_url: None,
    }
}

#[test]
fn module_scaffold_applies_camel_case_substitution() {
    let fx = fixture();
    let result = run_module(&fx.registry, &module_request(&fx, "hello-world")).unwrap();

    // hyphenated input is normalized to snake case
    assert_eq!(result.name, "hello_world");
    assert_eq!(result.root, fx.workdir.join("hello_world"));

    let greeter = fs::read_to_string(result.root.join("greeter.py")).unwrap();
    assert_eq!(greeter, "class HelloWorld: pass");
    assert!(result.warning.is_none());
}

#[test]
fn module_scaffold_writes_config_artifact() {
    let fx = fixture();
    let mut req = module_request(&fx, "status_reporter");
    req.module_type = Some(stencil::ModuleType::Manager);
    let result = run_module(&fx.registry, &req).unwrap();

    let artifact = result.root.join(".config_template");
    assert!(result.written.contains(&artifact));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(parsed["name"], "status_reporter");
    assert_eq!(parsed["type"], "manager");
    assert_eq!(parsed["folder_path"], "managers/status_reporter");
}

#[test]
fn unknown_template_set_fails_before_any_write() {
    let fx = fixture();
    let mut req = module_request(&fx, "hello");
    req.template_set = Some("missing-set".to_string());

    let err = run_module(&fx.registry, &req).unwrap_err();
    assert!(matches!(err, ScaffoldError::NotFound { .. }));

    // the destination directory must be untouched
    let leftovers: Vec<_> = fs::read_dir(&fx.workdir).unwrap().collect();
    assert!(leftovers.is_empty(), "no filesystem writes expected");
}

#[test]
fn invalid_module_name_is_rejected_before_fetch() {
    let fx = fixture();
    let err = run_module(&fx.registry, &module_request(&fx, "not a name")).unwrap_err();
    assert!(matches!(err, ScaffoldError::InvalidName(_)));
    assert!(fs::read_dir(&fx.workdir).unwrap().next().is_none());
}

#[test]
fn project_scaffold_copies_tree_and_substitutes() {
    let fx = fixture();
    let req = ScaffoldRequest {
        kind: ScaffoldKind::Project,
        name: "my-app".to_string(),
        destination: fx.workdir.clone(),
        template_set: None,
        module_type: None,
        remote_url: None,
    };
    let result = run_project(&fx.registry, &req).unwrap();

    assert_eq!(result.root, fx.workdir.join("my-app"));
    let readme = fs::read_to_string(result.root.join("README.md")).unwrap();
    assert!(readme.starts_with("# my-app"));
    let app = fs::read_to_string(result.root.join("src/app.py")).unwrap();
    assert_eq!(app, "APP = 'my-app'\n");
}

#[test]
fn project_scaffold_keeps_binary_assets_byte_identical() {
    let fx = fixture();
    let req = ScaffoldRequest {
        kind: ScaffoldKind::Project,
        name: "binary-safe".to_string(),
        destination: fx.workdir.clone(),
        template_set: None,
        module_type: None,
        remote_url: None,
    };
    let result = run_project(&fx.registry, &req).unwrap();

    let copied = fs::read(result.root.join("assets.bin")).unwrap();
    assert_eq!(copied, vec![0u8, 200, 123, 255, 7]);
}

#[test]
fn failed_remote_bootstrap_is_a_warning_not_an_error() {
    let fx = fixture();
    let mut req = module_request(&fx, "pushed_module");
    req.remote_url = Some("file:///definitely/not/a/remote.git".to_string());

    let result = run_module(&fx.registry, &req).unwrap();

    // the scaffold itself succeeded and is intact
    let greeter = fs::read_to_string(result.root.join("greeter.py")).unwrap();
    assert_eq!(greeter, "class PushedModule: pass");
    assert!(result.root.join(".config_template").exists());

    // the bootstrap failure is surfaced, naming the remote
    let warning = result.warning.expect("bootstrap against a bogus remote must warn");
    assert!(warning.contains("file:///definitely/not/a/remote.git"));
}

#[test]
fn existing_destination_directory_is_refused() {
    let fx = fixture();
    fs::create_dir_all(fx.workdir.join("taken")).unwrap();

    let err = run_module(&fx.registry, &module_request(&fx, "taken")).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn missing_project_template_directory_is_a_fetch_error() {
    // The registry points at a project template directory that was never
    // created; the project flow must fail at the fetch step.
    let dir = tempfile::tempdir().unwrap();
    let module_tpl = dir.path().join("mod-tpl");
    fs::create_dir_all(&module_tpl).unwrap();

    let registry_path = dir.path().join("stencil.toml");
    fs::write(
        &registry_path,
        format!(
            "[defaults]\nproject-template = \"{missing}\"\nmodule-template = \"{module}\"\n",
            missing = dir.path().join("never-created").display(),
            module = module_tpl.display()
        ),
    )
    .unwrap();
    let registry = Registry::load(&registry_path).unwrap();

    let req = ScaffoldRequest {
        kind: ScaffoldKind::Project,
        name: "app".to_string(),
        destination: dir.path().join("out"),
        template_set: None,
        module_type: None,
        remote_url: None,
    };
    let err = run_project(&registry, &req).unwrap_err();
    assert!(matches!(err, ScaffoldError::Fetch { .. }));
}

#[test]
fn derive_is_deterministic_across_full_runs() {
    let fx = fixture();
    let first = run_module(&fx.registry, &module_request(&fx, "repeat_me")).unwrap();
    let content_a = fs::read_to_string(first.root.join("greeter.py")).unwrap();

    let other = tempfile::tempdir().unwrap();
    let mut req = module_request(&fx, "repeat_me");
    req.destination = other.path().to_path_buf();
    let second = run_module(&fx.registry, &req).unwrap();
    let content_b = fs::read_to_string(second.root.join("greeter.py")).unwrap();

    assert_eq!(content_a, content_b);
}

#[test]
fn template_root_path_is_never_modified() {
    let fx = fixture();
    let before = fs::read_to_string(
        Path::new(&fx.workdir)
            .parent()
            .unwrap()
            .join("templates/module/greeter.py.tmpl"),
    )
    .unwrap();
    run_module(&fx.registry, &module_request(&fx, "observer")).unwrap();
    let after = fs::read_to_string(
        Path::new(&fx.workdir)
            .parent()
            .unwrap()
            .join("templates/module/greeter.py.tmpl"),
    )
    .unwrap();
    assert_eq!(before, after);
}
