//! End-to-end tests for the generator pipeline

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};

use kustogen_core::{ErrorKind, FileSystem, GeneratorConfig, Kustomization, LocalFs, MemoryFs, Values};
use kustogen_helm::{FnRunner, HelmGenerator, ProcessOutput};
use kustogen_repo::StaticIndexFetcher;
use tempfile::TempDir;

const INDEX: &str = r#"
apiVersion: v1
entries:
  app:
    - apiVersion: v2
      appVersion: "1.0"
      name: app
      version: 1.0.0
      urls:
        - charts/app-1.0.0.tgz
"#;

const DEPLOYMENT: &str = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n";
const SERVICE: &str = "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n";

fn config() -> GeneratorConfig {
    GeneratorConfig {
        registry: "https://repo.test/".to_string(),
        chart: "app".to_string(),
        version: "1.0.0".to_string(),
        name: "web".to_string(),
        namespace: "ns1".to_string(),
        args: vec!["--include-crds".to_string()],
        values: Values::from_yaml("replicaCount: 3\n").unwrap(),
    }
}

fn fetcher() -> StaticIndexFetcher {
    StaticIndexFetcher::new().with_body("https://repo.test/index.yaml", INDEX)
}

/// Any existing executable; the fake runners never start it
fn executable() -> String {
    std::env::current_exe()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

/// Value following `flag` in an engine argument list
fn flag_value<'a>(args: &'a [String], flag: &str) -> &'a str {
    let at = args.iter().position(|a| a == flag).unwrap();
    &args[at + 1]
}

/// Stub engine writing two manifests and a non-manifest file
fn write_chart(args: &[String]) -> std::io::Result<ProcessOutput> {
    let root = Path::new(flag_value(args, "--output-dir")).join("app");
    std::fs::create_dir_all(root.join("sub"))?;
    std::fs::write(root.join("a.yaml"), DEPLOYMENT)?;
    std::fs::write(root.join("sub").join("b.yaml"), SERVICE)?;
    std::fs::write(root.join("NOTES.txt"), "Thanks for installing")?;
    Ok(ProcessOutput::success("wrote app\n"))
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_generate_end_to_end() {
    let temp_root = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let calls = AtomicUsize::new(0);

    let runner = FnRunner::new(|_, args| {
        calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(&args[..3], ["template", "web", "https://repo.test/charts/app-1.0.0.tgz"]);
        assert_eq!(flag_value(args, "--namespace"), "ns1");
        assert_eq!(args.last().unwrap(), "--include-crds");
        write_chart(args)
    });

    let generator = HelmGenerator::new(fetcher(), runner, LocalFs)
        .with_executable(executable())
        .with_temp_root(temp_root.path());

    let kustomization = generator.generate(&config(), dest.path()).unwrap();

    assert_eq!(
        kustomization,
        Kustomization {
            namespace: "ns1".to_string(),
            resources: vec!["a.yaml".to_string(), "sub/b.yaml".to_string()],
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Every listed resource was copied byte for byte
    let expected = [DEPLOYMENT, SERVICE];
    for (resource, content) in kustomization.resources.iter().zip(expected) {
        assert_eq!(std::fs::read_to_string(dest.path().join(resource)).unwrap(), content);
    }
    // Non-manifests are copied but not listed
    assert!(dest.path().join("NOTES.txt").is_file());

    // Values file and render directory are gone
    assert_eq!(entries(temp_root.path()), 0);
}

#[test]
fn test_concurrent_generate_uses_distinct_temp_paths() {
    let temp_root = TempDir::new().unwrap();
    let dests = [TempDir::new().unwrap(), TempDir::new().unwrap()];
    let barrier = Barrier::new(2);
    let output_dirs = Mutex::new(Vec::new());

    let runner = FnRunner::new(|_, args| {
        output_dirs
            .lock()
            .unwrap()
            .push(flag_value(args, "--output-dir").to_string());
        // Both runs hold their temporary paths at the same time
        barrier.wait();
        write_chart(args)
    });

    let generator = HelmGenerator::new(fetcher(), runner, LocalFs)
        .with_executable(executable())
        .with_temp_root(temp_root.path());

    let generator = &generator;
    std::thread::scope(|scope| {
        let handles: Vec<_> = dests
            .iter()
            .map(|dest| scope.spawn(move || generator.generate(&config(), dest.path())))
            .collect();

        for handle in handles {
            let kustomization = handle.join().unwrap().unwrap();
            assert_eq!(kustomization.resources, vec!["a.yaml", "sub/b.yaml"]);
        }
    });

    let output_dirs = output_dirs.into_inner().unwrap();
    assert_eq!(output_dirs.len(), 2);
    assert_ne!(output_dirs[0], output_dirs[1]);
    for dest in &dests {
        assert_eq!(std::fs::read_to_string(dest.path().join("a.yaml")).unwrap(), DEPLOYMENT);
    }
    assert_eq!(entries(temp_root.path()), 0);
}

#[test]
fn test_generate_over_memory_filesystem() {
    let mem = MemoryFs::new();
    let dest = PathBuf::from("/dest");

    let runner = FnRunner::new(|_, args| {
        let root = Path::new(flag_value(args, "--output-dir")).join("app");
        mem.write(&root.join("templates/deploy.yaml"), DEPLOYMENT.as_bytes())?;
        mem.write(&root.join("crds/widget.yml"), b"kind: CustomResourceDefinition\n")?;
        mem.write(&root.join("README.md"), b"readme")?;
        Ok(ProcessOutput::success(""))
    });

    let generator = HelmGenerator::new(fetcher(), runner, &mem).with_executable(executable());
    let kustomization = generator.generate(&config(), &dest).unwrap();

    assert_eq!(kustomization.resources, vec!["crds/widget.yml", "templates/deploy.yaml"]);
    for resource in &kustomization.resources {
        assert!(mem.exists(dest.join(resource)), "missing {resource}");
    }
    assert!(mem.exists(dest.join("README.md")));
}

#[test]
fn test_resolution_failure_skips_render() {
    let calls = AtomicUsize::new(0);
    let runner = FnRunner::new(|_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProcessOutput::success(""))
    });

    let generator = HelmGenerator::new(fetcher(), runner, LocalFs).with_executable(executable());
    let dest = TempDir::new().unwrap();

    let mut unknown = config();
    unknown.version = "2.0.0".to_string();
    let err = generator.generate(&unknown, dest.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::VersionNotFound);
    assert_eq!(err.stage(), "resolve");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_render_failure_releases_temp_resources() {
    let temp_root = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let runner = FnRunner::new(|_, args| {
        // Partial output before failing must not leak
        let root = Path::new(flag_value(args, "--output-dir")).join("app");
        std::fs::create_dir_all(&root)?;
        std::fs::write(root.join("a.yaml"), DEPLOYMENT)?;
        Ok(ProcessOutput::failure(1, "Error: INSTALLATION FAILED: boom\n"))
    });

    let generator = HelmGenerator::new(fetcher(), runner, LocalFs)
        .with_executable(executable())
        .with_temp_root(temp_root.path());

    let err = generator.generate(&config(), dest.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Render);
    assert_eq!(err.stage(), "render");
    let source = std::error::Error::source(&err).unwrap().to_string();
    assert!(source.contains("Error: INSTALLATION FAILED: boom"));
    assert_eq!(entries(temp_root.path()), 0);
    assert_eq!(entries(dest.path()), 0);
}

#[test]
fn test_missing_chart_directory_is_list_error() {
    let temp_root = TempDir::new().unwrap();
    let runner = FnRunner::new(|_, _| Ok(ProcessOutput::success("")));

    let generator = HelmGenerator::new(fetcher(), runner, LocalFs)
        .with_executable(executable())
        .with_temp_root(temp_root.path());

    let dest = TempDir::new().unwrap();
    let err = generator.generate(&config(), dest.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::List);
    assert_eq!(entries(temp_root.path()), 0);
}

#[test]
fn test_copy_failure() {
    let temp_root = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let blocked = scratch.path().join("not-a-dir");
    std::fs::write(&blocked, "occupied").unwrap();

    let runner = FnRunner::new(|_, args| write_chart(args));
    let generator = HelmGenerator::new(fetcher(), runner, LocalFs)
        .with_executable(executable())
        .with_temp_root(temp_root.path());

    let err = generator.generate(&config(), &blocked).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Copy);
    assert_eq!(err.stage(), "copy");
    assert_eq!(entries(temp_root.path()), 0);
}

#[test]
fn test_invalid_config_rejected_before_fetch() {
    let runner = FnRunner::new(|_, _| Ok(ProcessOutput::success("")));
    let generator = HelmGenerator::new(StaticIndexFetcher::new(), runner, LocalFs);

    let mut config = config();
    config.chart.clear();
    let dest = TempDir::new().unwrap();
    let err = generator.generate(&config, dest.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
}

#[cfg(unix)]
mod real_process {
    use super::*;
    use kustogen_helm::SystemRunner;
    use std::os::unix::fs::PermissionsExt;

    fn install_stub(dir: &Path, script: &str) {
        let helm = dir.join("helm");
        std::fs::write(&helm, script).unwrap();
        std::fs::set_permissions(&helm, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_stub_engine_on_search_path() {
        let bin = TempDir::new().unwrap();
        let log = bin.path().join("args.log");
        install_stub(
            bin.path(),
            &format!(
                r#"#!/bin/sh
printf '%s\n' "$@" > '{log}'
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--output-dir" ]; then out="$arg"; fi
  prev="$arg"
done
mkdir -p "$out/app/sub"
printf 'kind: Deployment\n' > "$out/app/a.yaml"
printf 'kind: Service\n' > "$out/app/sub/b.yaml"
echo "rendered"
"#,
                log = log.display()
            ),
        );

        let temp_root = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let generator = HelmGenerator::new(fetcher(), SystemRunner, LocalFs)
            .with_search_path(bin.path())
            .with_temp_root(temp_root.path());

        let kustomization = generator.generate(&config(), dest.path()).unwrap();

        assert_eq!(kustomization.namespace, "ns1");
        assert_eq!(kustomization.resources, vec!["a.yaml", "sub/b.yaml"]);
        assert_eq!(
            std::fs::read_to_string(dest.path().join("sub/b.yaml")).unwrap(),
            "kind: Service\n"
        );

        let logged = std::fs::read_to_string(&log).unwrap();
        let args: Vec<&str> = logged.lines().collect();
        assert_eq!(args[0], "template");
        assert_eq!(args[3], "--namespace");
        assert_eq!(args[5], "--output-dir");
        assert_eq!(args[7], "--values");
        assert_eq!(args[9], "--include-crds");
        assert_eq!(entries(temp_root.path()), 0);
    }

    #[test]
    fn test_stub_engine_failure_output() {
        let bin = TempDir::new().unwrap();
        install_stub(
            bin.path(),
            "#!/bin/sh\necho 'fetching chart'\necho 'Error: chart not found' 1>&2\nexit 2\n",
        );

        let dest = TempDir::new().unwrap();
        let generator = HelmGenerator::new(fetcher(), SystemRunner, LocalFs)
            .with_search_path(bin.path());

        let err = generator.generate(&config(), dest.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);

        let message = std::error::Error::source(&err).unwrap().to_string();
        assert!(message.contains("exit code 2"));
        assert!(message.contains("fetching chart\nError: chart not found\n"));
    }

    #[test]
    fn test_engine_not_on_search_path() {
        let empty = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let generator = HelmGenerator::new(fetcher(), SystemRunner, LocalFs)
            .with_search_path(empty.path());

        let err = generator.generate(&config(), dest.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExecutableNotFound);
    }
}
