use std::collections::HashMap;

use contracts::domain::a001_issue::aggregate::Issue;
use contracts::domain::a001_issue::field::IssueField;
use contracts::shared::timestamp;

/// Одно условие фильтра из query string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Text(IssueField, String),
    Open(bool),
    /// Ключ не совпадает ни с одним полем задачи: не совпадёт ни с одной записью
    UnknownField(String),
}

/// Фильтр равенства по полям задачи
///
/// Все значения из query string приходят строками. `open` приводится к bool
/// (только `"true"` даёт `true`), остальные поля сравниваются как строки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    conditions: Vec<Condition>,
}

impl IssueFilter {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let mut conditions: Vec<Condition> = query
            .iter()
            .map(|(key, value)| match IssueField::from_key(key) {
                Some(IssueField::Open) => Condition::Open(value == "true"),
                Some(field) => Condition::Text(field, value.clone()),
                None => Condition::UnknownField(key.clone()),
            })
            .collect();
        // порядок HashMap случаен, сортируем для стабильного Debug-вывода
        conditions.sort_by_key(|c| match c {
            Condition::Text(field, _) => field.as_str().to_string(),
            Condition::Open(_) => IssueField::Open.as_str().to_string(),
            Condition::UnknownField(key) => key.clone(),
        });
        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Open(expected) => issue.open == *expected,
            Condition::Text(field, expected) => text_value(issue, *field)
                .map_or(false, |actual| actual == *expected),
            Condition::UnknownField(_) => false,
        })
    }

    pub fn apply(&self, issues: Vec<Issue>) -> Vec<Issue> {
        if self.is_empty() {
            return issues;
        }
        issues.into_iter().filter(|i| self.matches(i)).collect()
    }
}

fn text_value(issue: &Issue, field: IssueField) -> Option<String> {
    let value = match field {
        IssueField::Id => issue.to_string_id(),
        IssueField::IssueTitle => issue.issue_title.clone(),
        IssueField::IssueText => issue.issue_text.clone(),
        IssueField::CreatedBy => issue.created_by.clone(),
        IssueField::Project => issue.project.clone(),
        IssueField::AssignedTo => issue.assigned_to.clone(),
        IssueField::StatusText => issue.status_text.clone(),
        IssueField::CreatedOn => timestamp::format(&issue.created_on),
        IssueField::UpdatedOn => timestamp::format(&issue.updated_on),
        IssueField::Open => return None,
    };
    Some(value)
}
