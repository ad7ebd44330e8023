use derive_more::Display;

///
/// VisitorContext
/// Narrow interface exposed to validators for reporting non-fatal issues.
/// Implemented by collectors via a short-lived borrow.
///

pub trait VisitorContext {
    fn add_issue(&mut self, issue: Issue);
}

impl dyn VisitorContext + '_ {
    pub fn issue(&mut self, msg: impl Into<String>) {
        self.add_issue(Issue {
            message: msg.into(),
        });
    }
}

///
/// Issue
///

#[derive(Clone, Debug, Default, Display, Eq, PartialEq)]
#[display("{message}")]
pub struct Issue {
    pub message: String,
}

///
/// IssueList
/// Ordered collector for the issues raised while checking one field.
///

#[derive(Clone, Debug, Default)]
pub struct IssueList {
    issues: Vec<Issue>,
}

impl IssueList {
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn clear(&mut self) {
        self.issues.clear();
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.message.as_str())
    }

    /// Drain collected issues, leaving the list empty for reuse.
    pub fn take(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }
}

impl VisitorContext for IssueList {
    fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }
}
