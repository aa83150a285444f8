use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use bblx_backend::convert::{self, ConvertOptions};
use bblx_backend::db::bblx::BblxDbHandle;
use bblx_backend::types::{ConvertError, ModuleMetadata};

fn write_usfm(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write test file");
}

fn test_options(input_dir: &Path, output_file: &Path) -> ConvertOptions {
    ConvertOptions {
        input_dir: input_dir.to_path_buf(),
        output_file: output_file.to_path_buf(),
        metadata: ModuleMetadata::new("Test Translation", "TST", "en"),
    }
}

#[test]
fn test_full_conversion_run() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    write_usfm(
        &input_dir,
        "01-GEN.usfm",
        "\\id GEN\n\\h Genesis\n\\c 1\n\\v 1 In the beginning\n\\v 2 And the earth\n\\c 2\n\\v 1 Thus the heavens\n",
    );
    write_usfm(
        &input_dir,
        "43-JHN.usfm",
        "\\id JHN\n\\c 3\n\\v 16 For God so loved the world\n",
    );

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");

    assert!(report.is_success(), "Unexpected errors: {:?}", report.errors);
    assert_eq!(report.files_processed, 2);
    assert_eq!(report.verses_inserted, 4);

    let db = BblxDbHandle::open_or_create(&output_file).unwrap();
    assert_eq!(db.count_verses().unwrap(), 4);

    let v = db.get_verse(1, 1, 1).expect("Verse not found");
    assert_eq!(v.scripture, "In the beginning");

    let v = db.get_verse(43, 3, 16).expect("Verse not found");
    assert_eq!(v.scripture, "For God so loved the world");

    let details = db.get_details().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].description, "Test Translation");
    assert_eq!(details[0].abbreviation, "TST");
    assert_eq!(details[0].language, "en");
}

#[test]
fn test_unknown_book_id_rejects_file_only() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    write_usfm(&input_dir, "gen.usfm", "\\id GEN\n\\c 1\n\\v 1 Kept\n");
    write_usfm(&input_dir, "xxx.usfm", "\\id XXX\n\\c 1\n\\v 1 Dropped\n");

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");

    assert!(!report.is_success());
    assert_eq!(report.errors, vec!["Unknown book ID XXX in xxx.usfm".to_string()]);

    // The unresolvable file is discarded, the other file still persists.
    assert_eq!(report.files_processed, 1);
    let db = BblxDbHandle::open_or_create(&output_file).unwrap();
    assert_eq!(db.count_verses().unwrap(), 1);
    assert!(db.get_verse(1, 1, 1).is_some());
}

#[test]
fn test_parse_issues_are_collected_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    write_usfm(
        &input_dir,
        "gen.usfm",
        "\\id GEN\n\\c 1\n\\v 1 Good verse\n\\c X\n\\v A bad\n\\v 2 Also good\n",
    );

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");

    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("Invalid chapter number 'X'"));
    assert!(report.errors[0].contains("gen.usfm"));
    assert!(report.errors[1].contains("Invalid verse number 'A'"));

    // Both well-formed verses still made it into the module.
    let db = BblxDbHandle::open_or_create(&output_file).unwrap();
    assert_eq!(db.count_verses().unwrap(), 2);
    assert_eq!(db.get_verse(1, 1, 2).unwrap().scripture, "Also good");
}

#[test]
fn test_rerun_is_idempotent_for_verses_but_appends_details() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    write_usfm(&input_dir, "gen.usfm", "\\id GEN\n\\c 1\n\\v 1 First text\n");

    let options = test_options(&input_dir, &output_file);
    convert::run(&options).expect("First run failed");
    convert::run(&options).expect("Second run failed");

    let db = BblxDbHandle::open_or_create(&output_file).unwrap();

    // Upsert semantics: the Bible table ends up as after a single run.
    assert_eq!(db.count_verses().unwrap(), 1);
    assert_eq!(db.get_verse(1, 1, 1).unwrap().scripture, "First text");

    // Known quirk: one Details row is appended per run.
    assert_eq!(db.get_details().unwrap().len(), 2);
}

#[test]
fn test_colliding_keys_last_write_wins() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    // Two files for the same book; files are processed in sorted name
    // order, so b.usfm overwrites the row written by a.usfm.
    write_usfm(&input_dir, "a.usfm", "\\id GEN\n\\c 1\n\\v 1 Earlier text\n");
    write_usfm(&input_dir, "b.usfm", "\\id GEN\n\\c 1\n\\v 1 Later text\n");

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");
    assert!(report.is_success());

    let db = BblxDbHandle::open_or_create(&output_file).unwrap();
    assert_eq!(db.count_verses().unwrap(), 1);
    assert_eq!(db.get_verse(1, 1, 1).unwrap().scripture, "Later text");
}

#[test]
fn test_file_without_verses_is_skipped_silently() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    write_usfm(&input_dir, "gen.usfm", "\\id GEN\n\\c 1\n\\v 1 Text\n");
    write_usfm(&input_dir, "empty.usfm", "\\id EXO\n\\h Exodus\n");

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");

    // No verses in empty.usfm: no book resolution, no extra error.
    assert!(report.is_success(), "Unexpected errors: {:?}", report.errors);
    assert_eq!(report.files_processed, 1);
    assert_eq!(report.verses_inserted, 1);
}

#[test]
fn test_missing_input_dir_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("does-not-exist");
    let output_file = tmp.path().join("test.bblx");

    let result = convert::run(&test_options(&input_dir, &output_file));

    match result {
        Err(ConvertError::InputDirMissing(p)) => assert_eq!(p, input_dir),
        other => panic!("Expected InputDirMissing, got {:?}", other.map(|_| ())),
    }
    assert!(!output_file.exists());
}

#[test]
fn test_empty_input_dir_is_fatal_without_store_mutation() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");

    // A directory with no .usfm files counts as empty even when other
    // files are present.
    fs::write(input_dir.join("notes.txt"), "not usfm").unwrap();

    let result = convert::run(&test_options(&input_dir, &output_file));

    match result {
        Err(ConvertError::NoUsfmFiles(p)) => assert_eq!(p, input_dir),
        other => panic!("Expected NoUsfmFiles, got {:?}", other.map(|_| ())),
    }
    assert!(!output_file.exists(), "Precondition failure must not create the module");
}

#[test]
fn test_report_json_round_trip() {
    let tmp = TempDir::new().unwrap();
    let input_dir = tmp.path().join("usfm");
    fs::create_dir_all(&input_dir).unwrap();
    let output_file = tmp.path().join("test.bblx");
    let report_path: PathBuf = tmp.path().join("report.json");

    write_usfm(&input_dir, "xxx.usfm", "\\id XXX\n\\c 1\n\\v 1 Dropped\n");

    let report = convert::run(&test_options(&input_dir, &output_file)).expect("Run failed");
    report.save_json(&report_path).expect("Failed to save report");

    let contents = fs::read_to_string(&report_path).unwrap();
    let loaded: bblx_backend::types::RunReport = serde_json::from_str(&contents).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.errors.len(), 1);
}
