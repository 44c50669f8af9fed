#![allow(dead_code)]

pub mod command;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use chrono::{TimeZone, Utc};
use revfilter::artifacts::entity::file_record::{ArchiveRecord, FileRecord};
use revfilter::artifacts::revision::label::Label;
use revfilter::artifacts::revision::revision_node::RevisionNode;
use revfilter::artifacts::revision::revision_path::RevisionPath;
use std::path::PathBuf;

pub fn revision(path: &str, day: u32, editor: &str) -> RevisionNode {
    RevisionNode::new(
        RevisionPath::try_parse(path).expect("valid revision path"),
        Utc.with_ymd_and_hms(2014, 1, day, 9, 0, 0).unwrap(),
        editor.to_string(),
    )
}

pub fn label(name: &str, path: &str) -> Label {
    Label::new(
        name.to_string(),
        RevisionPath::try_parse(path).expect("valid revision path"),
    )
}

/// `Foo.java` with a trunk up to 1.5, a branch off 1.3 and `v1` on 1.3
pub fn labeled_java_file() -> FileRecord {
    FileRecord::new("Foo.java".to_string())
        .with_project("core", false)
        .with_workfile_size(2048)
        .with_lock_holder("bob")
        .with_archive(ArchiveRecord::new(
            vec![label("v1", "1.3")],
            vec![
                revision("1.1", 1, "alice").with_description("initial import"),
                revision("1.2", 2, "bob").with_description("parser fix"),
                revision("1.3", 3, "alice").with_description("release v1"),
                revision("1.4", 4, "bob").with_description("new feature"),
                revision("1.5", 5, "alice").with_description("cleanup"),
                revision("1.3.1.1", 6, "carol").with_description("hotfix"),
                revision("1.3.1.2", 7, "carol").with_description("hotfix follow up"),
            ],
        ))
}

pub fn write_file_list(dir: &TempDir, files: &[FileRecord]) -> PathBuf {
    let file = dir.child("files.json");
    file.write_str(&serde_json::to_string_pretty(files).unwrap())
        .unwrap();
    file.path().to_path_buf()
}
