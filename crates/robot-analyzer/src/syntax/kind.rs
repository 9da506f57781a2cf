use logos::Logos;

/// Raw token produced while splitting a single line into cells.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(error = ())]
pub enum TokenKind {
    /// Spaces and tabs. Whether a run separates cells is decided by
    /// [`super::whitespace::separator_at`].
    #[regex(r"[ \t]+")]
    Blank,

    /// Backslash escape; the escaped character never separates cells.
    #[regex(r"\\.?")]
    Escape,

    #[regex(r"[^ \t\\]+")]
    Text,
}

/// The table a line belongs to, decided by the most recent table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Settings,
    Variables,
    TestCases,
    Keywords,
    Comments,
    Unknown,
}

impl Table {
    /// Recognise a table header such as `*** Test Cases ***`.
    ///
    /// Stars, case and inner whitespace are ignored; singular and plural
    /// names are both accepted. Unterminated headers (`*** Keywords`) are
    /// still recognised.
    pub fn from_header(header: &str) -> Self {
        let name = header
            .trim_matches(|c: char| c == '*' || c.is_whitespace())
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match name.as_str() {
            "setting" | "settings" | "metadata" => Table::Settings,
            "variable" | "variables" => Table::Variables,
            "test case" | "test cases" | "testcase" | "testcases" | "task" | "tasks" => Table::TestCases,
            "keyword" | "keywords" | "user keyword" | "user keywords" => Table::Keywords,
            "comment" | "comments" => Table::Comments,
            _ => Table::Unknown,
        }
    }
}

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Blank lines, lines before the first table, comment tables and unknown
    /// tables.
    Ignore,
    /// A line holding nothing but a `#` comment.
    Comment,
    TableHeader(Table),
    Setting,
    Variable,
    /// First line of a test case or task; the name is in the first cell.
    TestCaseBegin,
    TestCaseStep,
    /// First line of a user keyword; the name is in the first cell.
    KeywordBegin,
    KeywordStep,
    /// A `...` row continuing the previous one.
    Continuation,
}

impl LineKind {
    /// Rows whose second cell is a keyword call.
    pub fn is_keyword_call_row(self) -> bool {
        matches!(
            self,
            LineKind::TestCaseBegin | LineKind::TestCaseStep | LineKind::KeywordBegin | LineKind::KeywordStep
        )
    }

    pub fn is_keyword_definition(self) -> bool {
        self == LineKind::KeywordBegin
    }
}
