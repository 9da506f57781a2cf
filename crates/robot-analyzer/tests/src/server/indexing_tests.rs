use super::*;

fn scratch_workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("robot-analyzer-indexing-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    for (relative, contents) in [
        ("suite.robot", "*** Test Cases ***\nT\n    Log    hi\n".to_string()),
        ("lib/common.resource", "*** Keywords ***\nShared\n".to_string()),
        ("notes.md", "# not robot".to_string()),
        ("results/output.robot", "*** Test Cases ***\n".to_string()),
        (".hidden/secret.robot", "*** Test Cases ***\n".to_string()),
        ("excluded/skip.robot", "*** Test Cases ***\n".to_string()),
        ("big.robot", "x".repeat(17 * 1024)),
    ] {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
    dir
}

#[test]
fn discovers_robot_files_and_skips_excluded_ones() {
    let root = scratch_workspace("discover");
    let settings = IndexingSettings {
        max_file_size_kb: 16,
        exclude_paths: vec!["excluded".to_string()],
        ..IndexingSettings::default()
    };
    let roots = vec![root.clone()];
    let excluded = build_exclude_prefixes(&roots, &settings.exclude_paths);

    let files = discover_robot_files(&roots, &settings, &excluded);
    assert_eq!(
        files,
        vec![normalized_path(&root.join("lib/common.resource")), normalized_path(&root.join("suite.robot"))]
    );

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn extension_setting_limits_discovery() {
    let root = scratch_workspace("extensions");
    let settings = IndexingSettings {
        extensions: vec!["resource".to_string()],
        ..IndexingSettings::default()
    };
    let roots = vec![root.clone()];

    let files = discover_robot_files(&roots, &settings, &[]);
    assert_eq!(files, vec![normalized_path(&root.join("lib/common.resource"))]);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn absolute_and_relative_excludes_become_prefixes() {
    let roots = vec![PathBuf::from("/no-such-root/a"), PathBuf::from("/no-such-root/b")];
    let prefixes = build_exclude_prefixes(&roots, &["gen".to_string(), "/no-such-root/shared".to_string()]);
    assert_eq!(
        prefixes,
        vec![
            PathBuf::from("/no-such-root/a/gen"),
            PathBuf::from("/no-such-root/b/gen"),
            PathBuf::from("/no-such-root/shared"),
        ]
    );
}
