use super::*;

#[test]
fn collects_resource_and_library_imports_in_order() {
    let parsed = ParsedFile::parse(
        "\
*** Settings ***
Library    Collections
Resource    ../resources/common.resource
Documentation    Not an import
library    String
Resource:    login.resource
Resource
Variables    vars.py
",
    );
    assert_eq!(
        collect_imports(&parsed),
        vec![
            Import::Library("Collections".to_string()),
            Import::Resource("../resources/common.resource".to_string()),
            Import::Library("String".to_string()),
            Import::Resource("login.resource".to_string()),
        ]
    );
}

#[test]
fn imports_outside_settings_table_are_ignored() {
    let parsed = ParsedFile::parse("*** Test Cases ***\nResource    common.resource\n");
    assert!(collect_imports(&parsed).is_empty());
}

#[test]
fn library_arguments_do_not_change_the_name() {
    let parsed = ParsedFile::parse("*** Settings ***\nLibrary    OperatingSystem    WITH NAME    OS\n");
    assert_eq!(collect_imports(&parsed), vec![Import::Library("OperatingSystem".to_string())]);
}

#[test]
fn expands_curdir_and_separator() {
    let expanded = expand_path_variables("${CURDIR}${/}common.resource", Some(Path::new("/suite/dir")), None);
    assert_eq!(expanded, "/suite/dir/common.resource");
}

#[test]
fn expands_execdir_from_first_root() {
    let expanded = expand_path_variables("${EXECDIR}/res/a.resource", None, Some(Path::new("/work")));
    assert_eq!(expanded, "/work/res/a.resource");
}

#[test]
fn builtin_variable_names_ignore_case_and_underscores() {
    let expanded = expand_path_variables("${cur_dir}/a.resource", Some(Path::new("/suite")), None);
    assert_eq!(expanded, "/suite/a.resource");
}

#[test]
fn unknown_variables_are_left_alone() {
    let expanded = expand_path_variables("${RESOURCES}/a.resource", Some(Path::new("/suite")), None);
    assert_eq!(expanded, "${RESOURCES}/a.resource");
    let unset = expand_path_variables("%{ROBOT_ANALYZER_SURELY_UNSET_VAR}/a.resource", None, None);
    assert_eq!(unset, "%{ROBOT_ANALYZER_SURELY_UNSET_VAR}/a.resource");
}

#[test]
fn environment_variables_expand() {
    let Ok(path) = std::env::var("PATH") else {
        return;
    };
    assert_eq!(expand_path_variables("%{PATH}", None, None), path);
}

#[test]
fn candidates_prefer_owner_directory_then_roots() {
    let candidates = resource_candidates(
        Path::new("/no-such-root/tests/suite.robot"),
        "../resources/common.resource",
        &[PathBuf::from("/no-such-root/tests"), PathBuf::from("/no-such-root/lib/deep")],
    );
    assert_eq!(
        candidates,
        vec![
            PathBuf::from("/no-such-root/resources/common.resource"),
            PathBuf::from("/no-such-root/lib/resources/common.resource"),
        ]
    );
}

#[test]
fn absolute_import_has_a_single_candidate() {
    let candidates = resource_candidates(
        Path::new("/no-such-root/tests/suite.robot"),
        "/no-such-root/shared/a.resource",
        &[PathBuf::from("/elsewhere")],
    );
    assert_eq!(candidates, vec![PathBuf::from("/no-such-root/shared/a.resource")]);
}
