//! End-to-end pipeline tests.
//!
//! Most tests use a content-based signature provider so that grouping is
//! exact and assertable; the perceptual provider itself is covered by its
//! unit tests and one end-to-end test with byte-identical images.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use imgsweep::config::{RunPlan, Settings};
use imgsweep::pipeline::{run, run_with_provider};
use imgsweep::scanner::{SignError, Signature, SignatureProvider};
use tempfile::tempdir;

/// Signs files by their full contents: byte-identical files share a
/// signature, everything unreadable (including directories) fails.
struct ContentSigner;

impl SignatureProvider for ContentSigner {
    fn sign(&self, path: &Path) -> Result<Signature, SignError> {
        let bytes = fs::read(path).map_err(|source| SignError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Signature::from_bytes(&bytes))
    }
}

fn write_file(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn plan_for(main: &Path, extras: &[&Path], output: Option<&Path>) -> RunPlan {
    Settings {
        main_directory: main.to_path_buf(),
        directories: extras.iter().map(|p| p.to_path_buf()).collect(),
        output: output.map(Path::to_path_buf),
        jobs: 4,
        replace: false,
    }
    .resolve()
    .unwrap()
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn files_with_content(root: &Path, content: &[u8]) -> usize {
    let mut count = 0;
    for entry in walk(root) {
        if fs::read(&entry).map(|bytes| bytes == content).unwrap_or(false) {
            count += 1;
        }
    }
    count
}

fn walk(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(dir) = fs::read_dir(root) {
        for entry in dir.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(walk(&path));
            } else {
                files.push(path);
            }
        }
    }
    files
}

#[test]
fn duplicates_across_directories_collapse_into_main() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    write_file(&x.join("cat.jpg"), b"CATDATA");
    write_file(&x.join("dog.jpg"), b"DOGDATA");
    write_file(&y.join("cat_dup.jpg"), b"CATDATA");

    let plan = plan_for(&x, &[&y], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    assert_eq!(entries(&x), vec!["cat.jpg", "dog.jpg"]);
    assert!(!y.exists());
    // Exactly one surviving copy of the cat image anywhere.
    assert_eq!(files_with_content(root.path(), b"CATDATA"), 1);

    assert_eq!(report.groups, 2);
    assert_eq!(report.duplicate_groups, 1);
    assert!(report.moves.moved.is_empty());
    assert_eq!(report.deletes.deleted, 1);
    assert_eq!(report.cleanup.removed, vec![y.clone()]);
    assert_eq!(report.item_failures(), 0);
}

#[test]
fn separate_output_directory_collects_unique_images() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    let z = root.path().join("z");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    fs::create_dir_all(&z).unwrap();
    write_file(&x.join("cat.jpg"), b"CATDATA");
    write_file(&x.join("dog.jpg"), b"DOGDATA");
    write_file(&y.join("cat_dup.jpg"), b"CATDATA");

    let plan = plan_for(&x, &[&y], Some(&z));
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    assert_eq!(entries(&z), vec!["cat.jpg", "dog.jpg"]);
    assert!(!x.exists());
    assert!(!y.exists());

    assert_eq!(report.moves.moved.len(), 2);
    assert_eq!(report.deletes.deleted, 1);
    assert_eq!(report.cleanup.removed.len(), 2);
}

#[test]
fn missing_output_directory_is_created() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    write_file(&x.join("a.jpg"), b"A");
    write_file(&y.join("b.jpg"), b"B");
    let z = root.path().join("z");
    assert!(!z.exists());

    let plan = plan_for(&x, &[&y], Some(&z));
    run_with_provider(&plan, &ContentSigner).unwrap();

    assert!(z.is_dir());
    assert_eq!(entries(&z), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn missing_input_directory_fails_before_any_mutation() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    fs::create_dir_all(&x).unwrap();
    write_file(&x.join("cat.jpg"), b"CATDATA");
    let missing = root.path().join("missing");

    let err = Settings {
        main_directory: x.clone(),
        directories: vec![missing],
        output: None,
        jobs: 4,
        replace: false,
    }
    .resolve()
    .unwrap_err();

    assert_eq!(err.exit_code().as_i32(), -2);
    // Nothing was touched.
    assert_eq!(entries(&x), vec!["cat.jpg"]);
}

#[test]
fn corrupt_file_is_dropped_and_run_still_succeeds() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();

    let img = image::RgbImage::from_fn(64, 64, |px, py| {
        if (px / 8 + py / 8) % 2 == 0 {
            image::Rgb([255, 255, 255])
        } else {
            image::Rgb([0, 0, 0])
        }
    });
    img.save(x.join("cat.png")).unwrap();
    fs::copy(x.join("cat.png"), y.join("cat_dup.png")).unwrap();
    write_file(&y.join("broken.png"), b"this is not an image");

    let plan = plan_for(&x, &[&y], None);
    // Real perceptual provider: identical bytes produce equal signatures,
    // the corrupt file fails to decode.
    let report = run(&plan).unwrap();

    assert_eq!(entries(&x), vec!["cat.png"]);
    assert!(!y.exists());
    assert_eq!(report.item_failures(), 1);
    assert_eq!(report.deletes.deleted, 1);
    assert!(report.moves.moved.is_empty());
}

#[test]
fn second_run_on_deduplicated_state_is_a_no_op() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    write_file(&x.join("cat.jpg"), b"CATDATA");
    write_file(&y.join("cat_dup.jpg"), b"CATDATA");
    write_file(&y.join("dog.jpg"), b"DOGDATA");

    let plan = plan_for(&x, &[&y], None);
    run_with_provider(&plan, &ContentSigner).unwrap();
    assert_eq!(entries(&x), vec!["cat.jpg", "dog.jpg"]);

    // Run again over the surviving state.
    let empty = root.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    let plan = plan_for(&x, &[&empty], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    assert!(report.moves.moved.is_empty());
    assert_eq!(report.deletes.deleted, 0);
    assert_eq!(entries(&x), vec!["cat.jpg", "dog.jpg"]);
}

#[test]
fn name_collision_in_output_renames_incoming_file() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    // Same name, different content: both must survive.
    write_file(&x.join("img.png"), b"AAA");
    write_file(&y.join("img.png"), b"BBB");

    let plan = plan_for(&x, &[&y], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    let names = entries(&x);
    assert_eq!(names.len(), 2, "{names:?}");
    assert_eq!(fs::read(x.join("img.png")).unwrap(), b"AAA");
    let renamed = names.iter().find(|name| *name != "img.png").unwrap();
    assert!(renamed.starts_with("img") && renamed.ends_with(".png"), "{renamed}");
    assert_eq!(fs::read(x.join(renamed)).unwrap(), b"BBB");
    assert_eq!(report.moves.moved.len(), 1);
    assert!(!y.exists());
}

#[test]
fn one_survivor_per_group_across_three_directories() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    let z = root.path().join("z");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    fs::create_dir_all(&z).unwrap();
    write_file(&x.join("a.jpg"), b"1");
    write_file(&x.join("b.jpg"), b"2");
    write_file(&y.join("a_dup.jpg"), b"1");
    write_file(&y.join("c.jpg"), b"3");
    write_file(&z.join("a_dup2.jpg"), b"1");
    write_file(&z.join("b_dup.jpg"), b"2");

    let plan = plan_for(&x, &[&y, &z], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    // One survivor per distinct content, all in the output directory.
    assert_eq!(entries(&x).len(), 3);
    for content in [b"1".as_slice(), b"2", b"3"] {
        assert_eq!(files_with_content(root.path(), content), 1);
    }
    assert!(!y.exists());
    assert!(!z.exists());
    assert_eq!(report.groups, 3);
    assert_eq!(report.duplicate_groups, 2);
}

#[test]
fn duplicates_within_one_directory_keep_exactly_one() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(&y).unwrap();
    write_file(&x.join("a.jpg"), b"SAME");
    write_file(&x.join("a_copy.jpg"), b"SAME");

    let plan = plan_for(&x, &[&y], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    // Which of the two survives depends on signing completion order, but
    // exactly one does and it stays in the output directory.
    assert_eq!(entries(&x).len(), 1);
    assert_eq!(files_with_content(root.path(), b"SAME"), 1);
    assert!(report.moves.moved.is_empty());
    assert_eq!(report.deletes.deleted, 1);
}

#[test]
fn subdirectories_are_failed_candidates_and_removed_with_their_parent() {
    let root = tempdir().unwrap();
    let x = root.path().join("x");
    let y = root.path().join("y");
    fs::create_dir_all(&x).unwrap();
    fs::create_dir_all(y.join("nested")).unwrap();
    write_file(&x.join("a.jpg"), b"A");
    write_file(&y.join("b.jpg"), b"B");
    write_file(&y.join("nested").join("ignored.jpg"), b"C");

    let plan = plan_for(&x, &[&y], None);
    let report = run_with_provider(&plan, &ContentSigner).unwrap();

    // The nested directory cannot be signed: it is dropped as a per-item
    // failure and later removed together with its parent.
    assert_eq!(report.item_failures(), 1);
    assert_eq!(entries(&x), vec!["a.jpg", "b.jpg"]);
    assert!(!y.exists());
}
