//! Integration tests for engine project generation
//!
//! These tests generate real projects into temporary directories, from the
//! embedded template set and from hand-built template directories.

use camino::{Utf8Path, Utf8PathBuf};
use marvin_projects::{
    Error, GenerateOutcome, GenerateRequest, GitStatus, Maintainer, ProjectType, ScaffoldStage,
    Scaffolder, TemplateSource,
};
use std::fs;
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        fs::create_dir(root.join("home")).unwrap();
        fs::create_dir(root.join("data")).unwrap();
        fs::write(root.join("data/train.csv"), "a,b\n1,2\n").unwrap();
        Self { _temp: temp, root }
    }

    fn home(&self) -> Utf8PathBuf {
        self.root.join("home")
    }

    fn request(&self, name: &str) -> GenerateRequest {
        GenerateRequest {
            name: name.to_string(),
            description: "Iris classifier".to_string(),
            maintainer: Maintainer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
            package: String::new(),
            dest_root: self.home(),
            project_type: ProjectType::PythonEngine,
            data_path: self.root.join("data"),
            toolbox_version: Some("0.0.5".to_string()),
            interpreter: "python".to_string(),
            skip_git: true,
        }
    }

    /// Write a template set under `<root>/templates/python-engine`
    fn template_dir(&self, files: &[(&str, &str)]) -> TemplateSource {
        let set = self.root.join("templates/python-engine");
        for (path, content) in files {
            let path = set.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        TemplateSource::Directory(self.root.join("templates"))
    }
}

fn read(path: impl AsRef<Utf8Path>) -> String {
    fs::read_to_string(path.as_ref()).unwrap()
}

#[tokio::test]
async fn test_generate_from_embedded_templates() {
    let ws = Workspace::new();

    let outcome = Scaffolder::default()
        .generate(&ws.request("My Engine!"))
        .await
        .unwrap();

    let GenerateOutcome::Created { path, package, git } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(path, ws.home().join("my-engine"));
    assert_eq!(package, "marvin_my_engine");
    assert_eq!(git, GitStatus::Skipped);

    let setup = read(path.join("setup.py"));
    assert!(setup.contains("name='marvin_my_engine'"));
    assert!(setup.contains("author='Ada Lovelace'"));
    assert!(setup.contains("author_email='ada@example.com'"));
    assert!(setup.contains("marvin-python-toolbox==0.0.5"));

    let readme = read(path.join("README.md"));
    assert!(readme.starts_with("# my_engine"));
    assert!(readme.contains("python-engine"));

    assert!(!path.join("project_package").exists());
    assert!(path.join("marvin_my_engine/__init__.py").is_file());
    assert!(read(path.join("marvin_my_engine/__init__.py")).contains("Iris classifier"));
    assert!(read(path.join("tests/test_acquisitor_and_cleaner.py"))
        .contains("from marvin_my_engine import AcquisitorAndCleaner"));
}

#[tokio::test]
async fn test_runtime_templates_are_copied_verbatim() {
    let ws = Workspace::new();

    let outcome = Scaffolder::default()
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Created { path, .. } = outcome else {
        panic!("expected Created");
    };
    let html = read(path.join("marvin_iris_engine/templates/prediction.html"));
    assert!(html.contains("{{ prediction }}"));
    assert!(html.contains("{% if details %}"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_data_directory_is_linked() {
    let ws = Workspace::new();

    let outcome = Scaffolder::default()
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Created { path, .. } = outcome else {
        panic!("expected Created");
    };
    let link = path.join("notebooks/data");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_link(&link).unwrap(),
        ws.root.join("data").into_std_path_buf()
    );
    assert_eq!(read(link.join("train.csv")), "a,b\n1,2\n");
}

#[tokio::test]
async fn test_automl_uses_same_template_set() {
    let ws = Workspace::new();
    let mut request = ws.request("Sales Forecast");
    request.project_type = ProjectType::engine(true);

    let outcome = Scaffolder::default().generate(&request).await.unwrap();

    let GenerateOutcome::Created { path, package, .. } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(package, "marvin_sales_forecast_engine");
    assert_eq!(path, ws.home().join("sales-forecast-engine"));
    assert!(read(path.join("engine.metadata")).contains("\"engineType\": \"automl-engine\""));
}

#[tokio::test]
async fn test_explicit_package_name() {
    let ws = Workspace::new();
    let mut request = ws.request("whatever");
    request.package = "marvin_foo_engine".to_string();

    let outcome = Scaffolder::default().generate(&request).await.unwrap();

    let GenerateOutcome::Created { path, package, .. } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(package, "marvin_foo_engine");
    assert_eq!(path, ws.home().join("foo-engine"));
    assert!(path.join("marvin_foo_engine").is_dir());
}

#[tokio::test]
async fn test_template_syntax_error_removes_project() {
    let ws = Workspace::new();
    let source = ws.template_dir(&[
        ("setup.py", "name='{{ project.package }}'"),
        ("broken.py", "{% if %}"),
        ("project_package/__init__.py", ""),
        ("notebooks/README.md", ""),
    ]);

    let outcome = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Failed {
        path,
        stage,
        error,
        removed,
    } = outcome
    else {
        panic!("expected Failed");
    };
    assert_eq!(stage, ScaffoldStage::StructureCreated);
    assert!(matches!(error, Error::TemplateRenderError { .. }));
    assert!(removed);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_undefined_variable_removes_project() {
    let ws = Workspace::new();
    let source = ws.template_dir(&[
        ("setup.py", "version='{{ project.version }}'"),
        ("project_package/__init__.py", ""),
        ("notebooks/README.md", ""),
    ]);

    let outcome = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Failed { path, removed, .. } = outcome else {
        panic!("expected Failed");
    };
    assert!(removed);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_missing_placeholder_dir_removes_project() {
    let ws = Workspace::new();
    let source = ws.template_dir(&[("setup.py", ""), ("notebooks/README.md", "")]);

    let outcome = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Failed {
        path, stage, removed, ..
    } = outcome
    else {
        panic!("expected Failed");
    };
    assert_eq!(stage, ScaffoldStage::FilesRendered);
    assert!(removed);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_data_link_failure_removes_project() {
    let ws = Workspace::new();
    // No notebooks directory to put the link in
    let source = ws.template_dir(&[("setup.py", ""), ("project_package/__init__.py", "")]);

    let outcome = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Failed {
        path,
        stage,
        error,
        removed,
    } = outcome
    else {
        panic!("expected Failed");
    };
    assert_eq!(stage, ScaffoldStage::DirsRenamed);
    assert!(matches!(error, Error::DataLink { .. }));
    assert!(removed);
    assert!(!path.exists());
    assert!(ws.root.join("data/train.csv").exists(), "data must survive");
}

#[tokio::test]
async fn test_existing_destination_is_kept() {
    let ws = Workspace::new();
    let existing = ws.home().join("iris-engine");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep me").unwrap();

    let outcome = Scaffolder::default()
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Failed {
        stage,
        error,
        removed,
        ..
    } = outcome
    else {
        panic!("expected Failed");
    };
    assert_eq!(stage, ScaffoldStage::Start);
    assert!(matches!(error, Error::ProjectExists { .. }));
    assert!(!removed);
    assert_eq!(read(existing.join("notes.txt")), "keep me");
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[tokio::test]
async fn test_missing_dest_root_fails_without_side_effects() {
    let ws = Workspace::new();
    let mut request = ws.request("iris");
    request.dest_root = ws.root.join("nowhere");

    let outcome = Scaffolder::default().generate(&request).await.unwrap();

    let GenerateOutcome::Failed { removed, .. } = outcome else {
        panic!("expected Failed");
    };
    assert!(!removed);
    assert!(!ws.root.join("nowhere").exists());
}

#[tokio::test]
async fn test_trash_is_skipped() {
    let ws = Workspace::new();
    let source = ws.template_dir(&[
        ("setup.py", "ok"),
        (".DS_Store", "\u{0}"),
        ("project_package/__init__.py", ""),
        ("project_package/__init__.pyc", "\u{0}{%"),
        ("notebooks/README.md", ""),
    ]);

    let outcome = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap();

    let GenerateOutcome::Created { path, .. } = outcome else {
        panic!("expected Created");
    };
    assert!(path.join("setup.py").exists());
    assert!(!path.join(".DS_Store").exists());
    assert!(!path.join("marvin_iris_engine/__init__.pyc").exists());
}

#[tokio::test]
async fn test_lib_type_is_rejected_before_side_effects() {
    let ws = Workspace::new();
    let mut request = ws.request("utils");
    request.project_type = ProjectType::Lib;

    let err = Scaffolder::default().generate(&request).await.unwrap_err();

    assert!(matches!(err, Error::UnknownTemplate { .. }));
    assert!(err.to_string().contains("\"lib\""));
    assert_eq!(fs::read_dir(ws.home()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_template_set_is_rejected_before_side_effects() {
    let ws = Workspace::new();
    fs::create_dir(ws.root.join("templates")).unwrap();
    let source = TemplateSource::Directory(ws.root.join("templates"));

    let err = Scaffolder::new(source)
        .generate(&ws.request("iris"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TemplateSetNotFound { .. }));
    assert_eq!(fs::read_dir(ws.home()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_git_init() {
    if marvin_projects::git::check_git_available().await.is_err() {
        return;
    }
    let ws = Workspace::new();
    let mut request = ws.request("iris");
    request.skip_git = false;

    let outcome = Scaffolder::default().generate(&request).await.unwrap();

    let GenerateOutcome::Created { path, git, .. } = outcome else {
        panic!("expected Created");
    };
    assert_eq!(git, GitStatus::Initialized);
    assert!(path.join(".git").is_dir());
}
