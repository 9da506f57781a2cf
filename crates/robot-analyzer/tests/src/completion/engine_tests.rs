use std::path::{Path, PathBuf};

use expect_test::expect;

use super::*;
use crate::syntax::ParseCache;

const SUITE: &str = "/no-such-root/tests/suite.robot";
const CURSOR: &str = "$0";

fn id(path: &str) -> FileId {
    FileId::from_path(Path::new(path))
}

struct Fixture {
    cache: ParseCache,
    roots: Vec<PathBuf>,
    implicit_builtin: bool,
    match_mode: MatchMode,
}

impl Fixture {
    fn new(resources: &[(&str, &str)]) -> Self {
        let cache = ParseCache::new();
        for (path, source) in resources {
            cache.update(id(path), source);
        }
        Self {
            cache,
            roots: Vec::new(),
            implicit_builtin: false,
            match_mode: MatchMode::Prefix,
        }
    }

    /// Complete at the `$0` marker in `source`, which becomes the suite file.
    fn complete(
        &self,
        source: &str,
    ) -> Result<CompletionOutcome, CompletionError> {
        let offset = source.find(CURSOR).expect("cursor marker");
        let source = source.replacen(CURSOR, "", 1);
        let parsed = self.cache.update(id(SUITE), &source);
        let walker = KeywordWalker::new(&self.cache, &self.roots).with_implicit_builtin(self.implicit_builtin);
        CompletionEngine::new(walker, self.match_mode).complete(&id(SUITE), &*parsed, &parsed, offset)
    }
}

fn names(outcome: &CompletionOutcome) -> Vec<&str> {
    outcome.proposals.iter().map(|proposal| proposal.matched_name.as_str()).collect()
}

const LOG_KEYWORDS: &str = "\
*** Keywords ***
Log
    No Operation
Log Many
    No Operation
";

#[test]
fn cursor_inside_keyword_with_arguments_replaces_whole_cell() {
    let fixture = Fixture::new(&[]);
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Lo$0g    hello\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log", "Log Many"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput]);

    let line_start = source.find("Some Test").unwrap();
    for proposal in &outcome.proposals {
        assert_eq!(proposal.replace_range(), line_start + 13..line_start + 16);
        assert_eq!(proposal.insert_text, proposal.matched_name);
    }
}

#[test]
fn unknown_full_cell_falls_back_to_typed_prefix() {
    let fixture = Fixture::new(&[]);
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Lo$0x    hello\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log", "Log Many"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput, CompletionStage::TypedSoFar]);
}

#[test]
fn name_only_row_proposes_everything() {
    let fixture = Fixture::new(&[]);
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    $0\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log", "Log Many"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput]);
    let end = source.find("$0").unwrap();
    assert_eq!(outcome.proposals[0].replace_range(), end..end);
}

#[test]
fn single_exact_match_relaxes_to_show_all() {
    let fixture = Fixture::new(&[]);
    let source = "\
*** Keywords ***
Log
    No Operation
Other
    No Operation

*** Test Cases ***
Some Test    Log$0
";
    let outcome = fixture.complete(source).unwrap();

    assert_eq!(names(&outcome), vec!["Log", "Other"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput, CompletionStage::ShowAll]);
}

#[test]
fn exact_match_comparison_is_case_sensitive() {
    let fixture = Fixture::new(&[]);
    let source = "*** Keywords ***\nLog\nOther\n*** Test Cases ***\nSome Test    log$0\n";
    let outcome = fixture.complete(source).unwrap();

    assert_eq!(names(&outcome), vec!["Log"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput]);
}

#[test]
fn genuine_matches_never_escalate() {
    let fixture = Fixture::new(&[]);
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Log M$0\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log Many"]);
    assert_eq!(outcome.final_stage(), Some(CompletionStage::FullInput));
}

#[test]
fn no_match_at_cell_end_skips_typed_stage() {
    let fixture = Fixture::new(&[]);
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Nothing$0\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log", "Log Many"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput, CompletionStage::ShowAll]);
}

#[test]
fn local_keyword_precedes_imported_duplicate() {
    let fixture = Fixture::new(&[("/no-such-root/tests/ui.resource", "*** Keywords ***\nClick\n    No Operation\n")]);
    let source = "\
*** Settings ***
Resource    ui.resource

*** Keywords ***
Click
    No Operation

*** Test Cases ***
Press
    Cli$0
";
    let outcome = fixture.complete(source).unwrap();

    let found: Vec<_> = outcome.proposals.iter().map(|p| (p.matched_name.as_str(), p.detail.as_str())).collect();
    assert_eq!(found, vec![("Click", "suite.robot"), ("Click", "ui.resource")]);
}

#[test]
fn resource_reached_twice_is_proposed_once() {
    let fixture = Fixture::new(&[
        ("/no-such-root/tests/a.resource", "*** Settings ***\nResource    shared.resource\n"),
        ("/no-such-root/tests/b.resource", "*** Settings ***\nResource    shared.resource\n"),
        ("/no-such-root/tests/shared.resource", "*** Keywords ***\nShared Step\n"),
    ]);
    let source = "\
*** Settings ***
Resource    a.resource
Resource    b.resource

*** Test Cases ***
Uses Shared
    Sha$0
";
    let outcome = fixture.complete(source).unwrap();
    assert_eq!(names(&outcome), vec!["Shared Step"]);
}

#[test]
fn cursor_outside_keyword_column_gives_nothing() {
    let fixture = Fixture::new(&[]);
    let in_name = fixture.complete(&format!("{LOG_KEYWORDS}*** Test Cases ***\nSome$0 Test    Log    hello\n")).unwrap();
    assert!(in_name.proposals.is_empty());
    assert!(in_name.stages.is_empty());

    let in_args = fixture.complete(&format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Log    hel$0lo\n")).unwrap();
    assert!(in_args.proposals.is_empty());
}

#[test]
fn trailing_comment_is_never_completed_or_replaced() {
    let fixture = Fixture::new(&[]);
    let in_comment =
        fixture.complete(&format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Lo    # keep me$0\n")).unwrap();
    assert!(in_comment.proposals.is_empty());
    assert!(in_comment.stages.is_empty());

    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    Lo$0    # keep me\n");
    let outcome = fixture.complete(&source).unwrap();
    assert_eq!(names(&outcome), vec!["Log", "Log Many"]);
    let line_start = source.find("Some Test").unwrap();
    for proposal in &outcome.proposals {
        assert_eq!(proposal.replace_range(), line_start + 13..line_start + 15);
    }
}

#[test]
fn non_call_rows_give_nothing() {
    let fixture = Fixture::new(&[]);
    for source in [
        "*** Settings ***\nLibrary    Coll$0\n",
        "*** Variables ***\n${NAME}    va$0\n",
        "No Table    Lo$0\n",
        "*** Test Cases ***\n# just a comm$0ent\n",
    ] {
        let outcome = fixture.complete(source).unwrap();
        assert!(outcome.proposals.is_empty(), "{source:?}");
    }
}

#[test]
fn multi_byte_typed_prefix_uses_byte_offsets() {
    let fixture = Fixture::new(&[]);
    let source = "*** Keywords ***\nÖffne Seite\n*** Test Cases ***\nTest    Ö$0xx\n";
    let outcome = fixture.complete(source).unwrap();

    assert_eq!(names(&outcome), vec!["Öffne Seite"]);
    assert_eq!(outcome.stages, vec![CompletionStage::FullInput, CompletionStage::TypedSoFar]);
}

#[test]
fn substring_mode_matches_inside_names() {
    let mut fixture = Fixture::new(&[]);
    fixture.match_mode = MatchMode::Substring;
    let source = format!("{LOG_KEYWORDS}*** Test Cases ***\nSome Test    many$0\n");
    let outcome = fixture.complete(&source).unwrap();

    assert_eq!(names(&outcome), vec!["Log Many"]);
}

#[test]
fn builtin_keywords_follow_local_ones() {
    let mut fixture = Fixture::new(&[]);
    fixture.implicit_builtin = true;
    let source = "*** Keywords ***\nShould Be Fine\n*** Test Cases ***\nT    Should Be Equal As$0\n";
    let outcome = fixture.complete(source).unwrap();

    let rendered: String = outcome
        .proposals
        .iter()
        .map(|proposal| format!("{} ({}) {:?}\n", proposal.display_label, proposal.detail, proposal.replace_range()))
        .collect();
    expect![[r#"
        Should Be Equal As Integers (BuiltIn) 56..74
        Should Be Equal As Numbers (BuiltIn) 56..74
        Should Be Equal As Strings (BuiltIn) 56..74
    "#]]
    .assert_eq(&rendered);
}

#[test]
fn repeated_runs_are_identical() {
    let fixture = Fixture::new(&[("/no-such-root/tests/ui.resource", "*** Keywords ***\nClick\n")]);
    let source = "*** Settings ***\nResource    ui.resource\n*** Test Cases ***\nT    $0\n";
    assert_eq!(fixture.complete(source).unwrap(), fixture.complete(source).unwrap());
}

#[test]
fn offset_past_end_is_an_error() {
    let fixture = Fixture::new(&[]);
    let parsed = fixture.cache.update(id(SUITE), "*** Test Cases ***\n");
    let walker = KeywordWalker::new(&fixture.cache, &fixture.roots);
    let result = CompletionEngine::new(walker, MatchMode::Prefix).complete(&id(SUITE), &*parsed, &parsed, 500);
    assert_eq!(
        result,
        Err(CompletionError::OffsetOutOfRange {
            offset: 500,
        })
    );
}

#[test]
fn stale_parse_is_reported() {
    let fixture = Fixture::new(&[]);
    let parsed = ParsedFile::parse("*** Test Cases ***\n");
    let current = ParsedFile::parse("*** Test Cases ***\nT    Lo\n");
    let walker = KeywordWalker::new(&fixture.cache, &fixture.roots);
    let result = CompletionEngine::new(walker, MatchMode::Prefix).complete(&id(SUITE), &current, &parsed, 26);
    assert_eq!(
        result,
        Err(CompletionError::MissingLine {
            line: 1,
        })
    );
}

#[test]
fn typed_prefix_backs_off_to_char_boundary() {
    assert_eq!(typed_prefix("Öx", 1), "");
    assert_eq!(typed_prefix("Öx", 2), "Ö");
    assert_eq!(typed_prefix("Öx", 40), "Öx");
}
