use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a001_issue::aggregate::{Issue, IssueId};
use contracts::domain::common::AggregateId;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use super::patch::IssuePatch;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_issue")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub project: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Issue {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = IssueId::from_string(&m.id)
            .map_err(|e| anyhow::anyhow!("corrupt issue id '{}': {}", m.id, e))?;
        Ok(Issue {
            id,
            issue_title: m.issue_title,
            issue_text: m.issue_text,
            created_by: m.created_by,
            project: m.project,
            assigned_to: m.assigned_to,
            status_text: m.status_text,
            open: m.open,
            created_on: m.created_on,
            updated_on: m.updated_on,
        })
    }
}

impl From<&Issue> for ActiveModel {
    fn from(issue: &Issue) -> Self {
        ActiveModel {
            id: Set(issue.to_string_id()),
            issue_title: Set(issue.issue_title.clone()),
            issue_text: Set(issue.issue_text.clone()),
            created_by: Set(issue.created_by.clone()),
            project: Set(issue.project.clone()),
            assigned_to: Set(issue.assigned_to.clone()),
            status_text: Set(issue.status_text.clone()),
            open: Set(issue.open),
            created_on: Set(issue.created_on),
            updated_on: Set(issue.updated_on),
        }
    }
}

/// Хранилище задач
///
/// Передаётся в обработчики через состояние роутера; в тестах используется
/// та же реализация поверх SQLite в памяти.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Все задачи проекта в порядке вставки
    async fn list_by_project(&self, project: &str) -> anyhow::Result<Vec<Issue>>;

    /// Вставить все задачи в одной транзакции (всё или ничего)
    async fn insert_all(&self, issues: &[Issue]) -> anyhow::Result<()>;

    /// `Ok(false)` если задачи с таким ID нет
    async fn update(
        &self,
        id: IssueId,
        patch: &IssuePatch,
        updated_on: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// `Ok(false)` если задачи с таким ID нет
    async fn delete(&self, id: IssueId) -> anyhow::Result<bool>;

    /// Удалить все задачи, возвращает количество удалённых
    async fn delete_all(&self) -> anyhow::Result<u64>;
}

pub struct SeaOrmIssueStore {
    conn: DatabaseConnection,
}

impl SeaOrmIssueStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl IssueStore for SeaOrmIssueStore {
    async fn list_by_project(&self, project: &str) -> anyhow::Result<Vec<Issue>> {
        Entity::find()
            .filter(Column::Project.eq(project))
            .order_by(Expr::cust("rowid"), Order::Asc)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Issue::try_from)
            .collect()
    }

    async fn insert_all(&self, issues: &[Issue]) -> anyhow::Result<()> {
        let txn = self.conn.begin().await?;
        for issue in issues {
            ActiveModel::from(issue).insert(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn update(
        &self,
        id: IssueId,
        patch: &IssuePatch,
        updated_on: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut update = Entity::update_many()
            .col_expr(Column::UpdatedOn, Expr::value(updated_on))
            .filter(Column::Id.eq(id.as_string()));

        let text_columns = [
            (Column::IssueTitle, &patch.issue_title),
            (Column::IssueText, &patch.issue_text),
            (Column::CreatedBy, &patch.created_by),
            (Column::AssignedTo, &patch.assigned_to),
            (Column::StatusText, &patch.status_text),
        ];
        for (column, value) in text_columns {
            if let Some(value) = value {
                update = update.col_expr(column, Expr::value(value.clone()));
            }
        }
        if let Some(open) = patch.open {
            update = update.col_expr(Column::Open, Expr::value(open));
        }

        let result = update.exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: IssueId) -> anyhow::Result<bool> {
        let result = Entity::delete_by_id(id.as_string())
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        let result = Entity::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
