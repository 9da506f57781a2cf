//! Keyword names of the Robot Framework standard libraries.
//!
//! Only keyword names are needed for completion, so the registry is a static
//! table rather than something introspected from Python.

use std::collections::HashMap;
use std::sync::OnceLock;

/// The library every suite imports implicitly.
pub const BUILTIN_LIBRARY: &str = "BuiltIn";

const BUILTIN: &[&str] = &[
    "Call Method",
    "Catenate",
    "Comment",
    "Convert To Boolean",
    "Convert To Integer",
    "Convert To Number",
    "Convert To String",
    "Create Dictionary",
    "Create List",
    "Evaluate",
    "Fail",
    "Fatal Error",
    "Get Count",
    "Get Length",
    "Get Library Instance",
    "Get Time",
    "Get Variable Value",
    "Import Library",
    "Import Resource",
    "Import Variables",
    "Keyword Should Exist",
    "Length Should Be",
    "Log",
    "Log Many",
    "Log To Console",
    "Log Variables",
    "No Operation",
    "Pass Execution",
    "Repeat Keyword",
    "Return From Keyword",
    "Run Keyword",
    "Run Keyword And Expect Error",
    "Run Keyword And Ignore Error",
    "Run Keyword And Return Status",
    "Run Keyword If",
    "Run Keywords",
    "Set Global Variable",
    "Set Suite Variable",
    "Set Test Variable",
    "Set Variable",
    "Set Variable If",
    "Should Be Empty",
    "Should Be Equal",
    "Should Be Equal As Integers",
    "Should Be Equal As Numbers",
    "Should Be Equal As Strings",
    "Should Be True",
    "Should Contain",
    "Should End With",
    "Should Match",
    "Should Match Regexp",
    "Should Not Be Empty",
    "Should Not Be Equal",
    "Should Not Contain",
    "Should Start With",
    "Sleep",
    "Variable Should Exist",
    "Wait Until Keyword Succeeds",
];

const COLLECTIONS: &[&str] = &[
    "Append To List",
    "Combine Lists",
    "Copy Dictionary",
    "Copy List",
    "Dictionary Should Contain Key",
    "Dictionary Should Contain Value",
    "Get Dictionary Keys",
    "Get Dictionary Values",
    "Get From Dictionary",
    "Get From List",
    "Get Index From List",
    "Insert Into List",
    "List Should Contain Value",
    "List Should Not Contain Duplicates",
    "Lists Should Be Equal",
    "Remove From Dictionary",
    "Remove From List",
    "Set To Dictionary",
    "Sort List",
];

const STRING: &[&str] = &[
    "Convert To Lower Case",
    "Convert To Upper Case",
    "Fetch From Left",
    "Fetch From Right",
    "Generate Random String",
    "Get Line",
    "Get Line Count",
    "Get Lines Containing String",
    "Get Substring",
    "Replace String",
    "Should Be Lower Case",
    "Should Be String",
    "Should Be Upper Case",
    "Split String",
    "Split To Lines",
    "Strip String",
];

const OPERATING_SYSTEM: &[&str] = &[
    "Append To File",
    "Copy File",
    "Create Directory",
    "Create File",
    "Directory Should Exist",
    "File Should Exist",
    "File Should Not Exist",
    "Get Environment Variable",
    "Get File",
    "List Directory",
    "Move File",
    "Remove Directory",
    "Remove File",
    "Run",
    "Run And Return Rc",
    "Set Environment Variable",
];

static LIBRARIES: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static [&'static str]> {
    LIBRARIES.get_or_init(|| {
        HashMap::from([
            (BUILTIN_LIBRARY, BUILTIN),
            ("Collections", COLLECTIONS),
            ("String", STRING),
            ("OperatingSystem", OPERATING_SYSTEM),
        ])
    })
}

/// Keyword names of a known library, in documentation order.
///
/// Names are matched exactly first and then case-insensitively; unknown
/// libraries (custom Python modules, paths) return `None`.
pub fn library_keywords(name: &str) -> Option<&'static [&'static str]> {
    let registry = registry();
    if let Some(keywords) = registry.get(name) {
        return Some(keywords);
    }
    registry.iter().find(|(known, _)| known.eq_ignore_ascii_case(name)).map(|(_, keywords)| *keywords)
}
