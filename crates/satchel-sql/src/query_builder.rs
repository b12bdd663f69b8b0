use crate::{Condition, WhereBuilder};

const GROUP_BY: &str = " GROUP BY ";
const HAVING: &str = " HAVING ";
const ORDER_BY: &str = " ORDER BY ";
const LIMIT: &str = " LIMIT ";

/// Composes a [`WhereBuilder`] with projection, grouping, ordering and limit
/// fragments into the suffix of a `SELECT` statement.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    columns: Option<Vec<String>>,
    group: Option<String>,
    having: Option<String>,
    order: Option<String>,
    limit: Option<String>,
    where_builder: WhereBuilder,
}

impl QueryBuilder {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_where(mut self, builder: WhereBuilder) -> Self {
        self.where_builder = builder;
        self
    }

    pub fn with_condition(mut self, condition: &Condition) -> Self {
        self.where_builder = WhereBuilder::create().where_condition(condition);
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn group_by(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.having = Some(having.into());
        self
    }

    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn limit_range(mut self, start: u64, end: u64) -> Self {
        self.limit = Some(format!("{start},{end}"));
        self
    }

    /// Renders the statement suffix in the fixed clause order
    /// WHERE, GROUP BY, HAVING, ORDER BY, LIMIT.
    pub fn build(&self) -> String {
        let mut sql = self.where_builder.build();
        if let Some(group) = &self.group {
            sql.push_str(GROUP_BY);
            sql.push_str(group);
        }
        if let Some(having) = &self.having {
            sql.push_str(HAVING);
            sql.push_str(having);
        }
        if let Some(order) = &self.order {
            sql.push_str(ORDER_BY);
            sql.push_str(order);
        }
        if let Some(limit) = &self.limit {
            sql.push_str(LIMIT);
            sql.push_str(limit);
        }
        sql
    }

    pub fn where_builder(&self) -> &WhereBuilder {
        &self.where_builder
    }

    pub fn projection(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// The bare grouping expression, empty when unset.
    pub fn group(&self) -> &str {
        self.group.as_deref().unwrap_or("")
    }

    pub fn having_expr(&self) -> &str {
        self.having.as_deref().unwrap_or("")
    }

    pub fn order(&self) -> &str {
        self.order.as_deref().unwrap_or("")
    }

    pub fn limit_expr(&self) -> &str {
        self.limit.as_deref().unwrap_or("")
    }
}
