//! Integration tests: registry listing + on-disk search roots through the
//! reconciler and runner, with git replaced by an in-memory fake.

use cookdoc_core::{
    Check, CookdocError, Cookbook, Finding, GitStatus, MalformedMetadata, Reconciled, Reconciler,
    Reporter, Runner, parse_registry_listing,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "cookdoc-core-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn write_cookbook(root: &Path, name: &str, metadata: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("cookbook dir should be created");
    fs::write(dir.join("metadata.rb"), metadata).expect("metadata should be written");
    dir
}

/// Status outputs keyed by cookbook directory name; unknown paths are clean.
#[derive(Default)]
struct FakeGit {
    short: BTreeMap<String, String>,
    full: BTreeMap<String, String>,
}

impl FakeGit {
    fn key(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl GitStatus for FakeGit {
    fn short_status(&self, path: &Path) -> Result<String, CookdocError> {
        Ok(self.short.get(&Self::key(path)).cloned().unwrap_or_default())
    }

    fn full_status(&self, path: &Path) -> Result<String, CookdocError> {
        Ok(self.full.get(&Self::key(path)).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Outcomes {
    passed: Vec<String>,
    failed: BTreeMap<String, Vec<Check>>,
    malformed: Vec<String>,
}

impl Reporter for Outcomes {
    fn report_success(&mut self, name: &str) {
        self.passed.push(name.to_string());
    }

    fn report_failure(&mut self, name: &str, findings: &[Finding]) {
        self.failed.insert(
            name.to_string(),
            findings.iter().map(Finding::check).collect(),
        );
    }

    fn report_malformed(&mut self, error: &MalformedMetadata) {
        self.malformed.push(error.name.clone());
    }
}

fn names(entries: &[Reconciled]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry {
            Ok(cookbook) => cookbook.name().to_string(),
            Err(error) => error.name.clone(),
        })
        .collect()
}

fn cookbooks(entries: &[Reconciled]) -> Vec<&Cookbook> {
    entries.iter().filter_map(|entry| entry.as_ref().ok()).collect()
}

#[test]
fn registry_and_local_merge_into_sorted_records() {
    let tmp = TempDirGuard::new("merge");
    let root = tmp.path().join("cookbooks");
    write_cookbook(&root, "a", "name 'a'\nversion '1.0'\n");
    write_cookbook(&root, "c", "name 'c'\nversion \"3.0\"\n");

    let registry = parse_registry_listing(["a 1.0", "b 2.0"]).expect("registry should parse");
    let reconciler = Reconciler::new(vec![root.clone()]);
    let local = reconciler.discover().expect("discovery should succeed");
    let entries = reconciler.reconcile(&registry, &local);

    assert_eq!(names(&entries), vec!["a", "b", "c"]);
    let records = cookbooks(&entries);
    assert_eq!(records[0].path(), Some(root.join("a").as_path()));
    assert_eq!(records[1].path(), None);
    assert_eq!(records[2].local_version(), Some("3.0"));
    assert_eq!(records[2].server_version(), None);

    let mut outcomes = Outcomes::default();
    let summary = Runner::new(&FakeGit::default())
        .run(&entries, &mut outcomes)
        .expect("run should succeed");

    assert_eq!(outcomes.passed, vec!["a"]);
    assert_eq!(outcomes.failed.get("b"), Some(&vec![Check::LocalExists]));
    assert_eq!(outcomes.failed.get("c"), Some(&vec![Check::ServerExists]));
    assert_eq!(summary.total, 3);
    assert_eq!(summary.failed, 2);
}

#[test]
fn earlier_search_root_takes_precedence() {
    let tmp = TempDirGuard::new("precedence");
    let site = tmp.path().join("site-cookbooks");
    let vendor = tmp.path().join("cookbooks");
    write_cookbook(&site, "nginx", "version '2.1.0'\n");
    write_cookbook(&vendor, "nginx", "version '1.0.0'\n");

    let registry = parse_registry_listing(["nginx 2.1.0"]).expect("registry should parse");
    let reconciler = Reconciler::new(vec![site.clone(), vendor]);
    let local = reconciler.discover().expect("discovery should succeed");
    let entries = reconciler.reconcile(&registry, &local);

    let records = cookbooks(&entries);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path(), Some(site.join("nginx").as_path()));
    assert_eq!(records[0].local_version(), Some("2.1.0"));
}

#[test]
fn directory_without_metadata_still_resolves_a_path() {
    let tmp = TempDirGuard::new("no-metadata");
    let root = tmp.path().join("cookbooks");
    fs::create_dir_all(root.join("users")).expect("dir should be created");

    let registry = parse_registry_listing(["users 4.0.0"]).expect("registry should parse");
    let reconciler = Reconciler::new(vec![root.clone()]);
    let local = reconciler.discover().expect("discovery should succeed");
    assert!(local.versions().is_empty());

    let entries = reconciler.reconcile(&registry, &local);
    let records = cookbooks(&entries);
    assert_eq!(records[0].path(), Some(root.join("users").as_path()));
    assert_eq!(records[0].local_version(), None);

    let findings = Runner::new(&FakeGit::default())
        .evaluate(records[0])
        .expect("evaluate should succeed");
    assert!(findings.is_empty());
}

#[test]
fn malformed_metadata_is_isolated_to_its_cookbook() {
    let tmp = TempDirGuard::new("malformed");
    let root = tmp.path().join("cookbooks");
    write_cookbook(&root, "good", "version '1.0.0'\n");
    write_cookbook(&root, "bad", "version IO.read('VERSION').strip\n");

    let registry = parse_registry_listing(["bad 1.0.0", "good 1.0.0"]).expect("registry");
    let reconciler = Reconciler::new(vec![root]);
    let local = reconciler.discover().expect("discovery should succeed");
    let entries = reconciler.reconcile(&registry, &local);

    assert_eq!(names(&entries), vec!["bad", "good"]);
    let mut outcomes = Outcomes::default();
    let summary = Runner::new(&FakeGit::default())
        .run(&entries, &mut outcomes)
        .expect("run should succeed");
    assert_eq!(outcomes.malformed, vec!["bad"]);
    assert_eq!(outcomes.passed, vec!["good"]);
    assert_eq!(summary.malformed, 1);
}

#[test]
fn git_checks_only_run_inside_working_trees() {
    let tmp = TempDirGuard::new("git");
    let root = tmp.path().join("cookbooks");
    let tracked = write_cookbook(&root, "tracked", "version '1.0.0'\n");
    fs::create_dir_all(tracked.join(".git")).expect(".git should be created");
    write_cookbook(&root, "plain", "version '1.0.0'\n");

    let mut git = FakeGit::default();
    for name in ["tracked", "plain"] {
        git.short.insert(name.to_string(), " M recipes/default.rb\n".to_string());
        git.full.insert(
            name.to_string(),
            "On branch main\nYour branch is ahead of 'origin/main' by 2 commits.\n".to_string(),
        );
    }

    let registry = parse_registry_listing(["plain 1.0.0", "tracked 1.0.0"]).expect("registry");
    let reconciler = Reconciler::new(vec![root]);
    let local = reconciler.discover().expect("discovery should succeed");
    let entries = reconciler.reconcile(&registry, &local);

    let records = cookbooks(&entries);
    assert!(!records[0].is_git_repo());
    assert!(records[1].is_git_repo());

    let runner = Runner::new(&git);
    assert!(runner.evaluate(records[0]).expect("evaluate").is_empty());
    assert_eq!(
        runner.evaluate(records[1]).expect("evaluate"),
        vec![
            Finding::UncommittedChanges {
                status: " M recipes/default.rb".to_string()
            },
            Finding::UnpushedCommits {
                upstream: "origin/main".to_string()
            },
        ]
    );
}

#[test]
fn reconciliation_is_idempotent() {
    let tmp = TempDirGuard::new("idempotent");
    let root = tmp.path().join("cookbooks");
    write_cookbook(&root, "apt", "version '7.0.0'\n");
    write_cookbook(&root, "broken", "name 'broken'\n");
    let registry = parse_registry_listing(["apt 7.1.0", "zsh 1.0.0"]).expect("registry");
    let reconciler = Reconciler::new(vec![root]);

    let run = || {
        let local = reconciler.discover().expect("discovery should succeed");
        let entries = reconciler.reconcile(&registry, &local);
        let mut outcomes = Outcomes::default();
        Runner::new(&FakeGit::default())
            .run(&entries, &mut outcomes)
            .expect("run should succeed");
        (entries, outcomes)
    };

    let (first_entries, first_outcomes) = run();
    let (second_entries, second_outcomes) = run();
    assert_eq!(first_entries, second_entries);
    assert_eq!(first_outcomes, second_outcomes);
    assert_eq!(
        first_outcomes.failed.get("apt"),
        Some(&vec![Check::VersionsMatch])
    );
}
