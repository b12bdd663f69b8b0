use crate::Condition;

use satchel_core::Value;

const WHERE: &str = " WHERE ";
const EQUAL_HOLDER: &str = "=?";
const NOT_EQUAL_HOLDER: &str = "!=?";
const GREATER_THAN_HOLDER: &str = ">?";
const LESS_THAN_HOLDER: &str = "<?";
const GREATER_THAN_OR_EQUAL_TO_HOLDER: &str = ">=?";
const LESS_THAN_OR_EQUAL_TO_HOLDER: &str = "<=?";
const AND: &str = " AND ";
const OR: &str = " OR ";
const NOT: &str = " NOT ";
const IN: &str = " IN ";

/// A mutable builder over a selection clause and a flat positional argument
/// list.
///
/// No operator precedence is applied beyond explicit
/// [`parentheses_left`](Self::parentheses_left) /
/// [`parentheses_right`](Self::parentheses_right) calls: predicates appear
/// in the SQL text in exactly the order they were appended, and the caller
/// is responsible for correct grouping.
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    clause: Option<String>,
    args: Vec<Value>,
}

impl WhereBuilder {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn from_clause(clause: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            clause: Some(clause.into()),
            args: args.into_iter().map(Value::from).collect(),
        }
    }

    pub fn from_condition(condition: &Condition) -> Self {
        Self::from_clause(condition.selection(), condition.selection_args().to_vec())
    }

    /// Replaces any accumulated clause and arguments with the condition's.
    pub fn where_condition(mut self, condition: &Condition) -> Self {
        self.clause = Some(condition.selection().to_string());
        self.args = condition
            .selection_args()
            .iter()
            .cloned()
            .map(Value::from)
            .collect();
        self
    }

    /// Appends a bare `AND` connective. No-op while the clause is empty.
    pub fn and(mut self) -> Self {
        if let Some(clause) = &mut self.clause {
            clause.push_str(AND);
        }
        self
    }

    /// Appends a bare `OR` connective. No-op while the clause is empty.
    pub fn or(mut self) -> Self {
        if let Some(clause) = &mut self.clause {
            clause.push_str(OR);
        }
        self
    }

    /// Appends a bare `NOT` token; starts the clause with it when empty.
    pub fn not(mut self) -> Self {
        match &mut self.clause {
            Some(clause) => clause.push_str(NOT),
            None => self.clause = Some(NOT.to_string()),
        }
        self
    }

    pub fn parentheses_left(mut self) -> Self {
        match &mut self.clause {
            Some(clause) => clause.push('('),
            None => self.clause = Some("(".to_string()),
        }
        self
    }

    pub fn parentheses_right(mut self) -> Self {
        if let Some(clause) = &mut self.clause {
            clause.push(')');
        }
        self
    }

    pub fn and_clause(mut self, clause: &str, args: Vec<Value>) -> Self {
        self.append(Some(AND), clause, args);
        self
    }

    pub fn or_clause(mut self, clause: &str, args: Vec<Value>) -> Self {
        self.append(Some(OR), clause, args);
        self
    }

    /// Appends ` NOT (<clause>)`.
    pub fn not_clause(self, clause: &str, args: Vec<Value>) -> Self {
        let mut builder = self.not().parentheses_left();
        builder.append(None, clause, args);
        builder.parentheses_right()
    }

    pub fn and_not_clause(self, clause: &str, args: Vec<Value>) -> Self {
        self.and().not_clause(clause, args)
    }

    pub fn or_not_clause(self, clause: &str, args: Vec<Value>) -> Self {
        self.or().not_clause(clause, args)
    }

    /// Appends another builder's clause and arguments joined by `AND`.
    pub fn and_group(mut self, other: Self) -> Self {
        let (clause, args) = other.into_parts();
        if let Some(clause) = clause {
            self.append(Some(AND), &clause, args);
        }
        self
    }

    /// Appends another builder's clause and arguments joined by `OR`.
    pub fn or_group(mut self, other: Self) -> Self {
        let (clause, args) = other.into_parts();
        if let Some(clause) = clause {
            self.append(Some(OR), &clause, args);
        }
        self
    }

    /// Appends another builder's clause as a negated, parenthesized group.
    pub fn not_group(self, other: Self) -> Self {
        let (clause, args) = other.into_parts();
        match clause {
            Some(clause) => self.not_clause(&clause, args),
            None => self,
        }
    }

    pub fn and_not_group(self, other: Self) -> Self {
        self.and().not_group(other)
    }

    pub fn or_not_group(self, other: Self) -> Self {
        self.or().not_group(other)
    }

    pub fn add_where_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(None, column, EQUAL_HOLDER, value.into());
        self
    }

    pub fn add_where_not_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(None, column, NOT_EQUAL_HOLDER, value.into());
        self
    }

    pub fn add_where_greater_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(None, column, GREATER_THAN_HOLDER, value.into());
        self
    }

    pub fn add_where_greater_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(None, column, GREATER_THAN_OR_EQUAL_TO_HOLDER, value.into());
        self
    }

    pub fn add_where_less_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(None, column, LESS_THAN_HOLDER, value.into());
        self
    }

    pub fn add_where_less_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(None, column, LESS_THAN_OR_EQUAL_TO_HOLDER, value.into());
        self
    }

    pub fn add_where_in<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_in(None, column, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn and_where_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(AND), column, EQUAL_HOLDER, value.into());
        self
    }

    pub fn and_where_not_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(AND), column, NOT_EQUAL_HOLDER, value.into());
        self
    }

    pub fn and_where_greater_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(AND), column, GREATER_THAN_HOLDER, value.into());
        self
    }

    pub fn and_where_greater_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(
            Some(AND),
            column,
            GREATER_THAN_OR_EQUAL_TO_HOLDER,
            value.into(),
        );
        self
    }

    pub fn and_where_less_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(AND), column, LESS_THAN_HOLDER, value.into());
        self
    }

    pub fn and_where_less_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(
            Some(AND),
            column,
            LESS_THAN_OR_EQUAL_TO_HOLDER,
            value.into(),
        );
        self
    }

    pub fn and_where_in<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_in(
            Some(AND),
            column,
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn or_where_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(OR), column, EQUAL_HOLDER, value.into());
        self
    }

    pub fn or_where_not_equal_to(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(OR), column, NOT_EQUAL_HOLDER, value.into());
        self
    }

    pub fn or_where_greater_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(OR), column, GREATER_THAN_HOLDER, value.into());
        self
    }

    pub fn or_where_greater_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(
            Some(OR),
            column,
            GREATER_THAN_OR_EQUAL_TO_HOLDER,
            value.into(),
        );
        self
    }

    pub fn or_where_less_than(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.leaf(Some(OR), column, LESS_THAN_HOLDER, value.into());
        self
    }

    pub fn or_where_less_than_or_equal_to(
        mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.leaf(Some(OR), column, LESS_THAN_OR_EQUAL_TO_HOLDER, value.into());
        self
    }

    pub fn or_where_in<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_in(
            Some(OR),
            column,
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// The accumulated clause, without the `WHERE` keyword.
    pub fn selection(&self) -> Option<&str> {
        self.clause.as_deref()
    }

    /// The positional arguments, stringified in append order.
    pub fn selection_args(&self) -> Vec<String> {
        self.args.iter().map(Value::to_string).collect()
    }

    /// Renders `" WHERE <clause>"`, or the literal single-space sentinel
    /// when no predicate was ever added. The sentinel's trailing space ahead
    /// of the query terminator is harmless and deliberately preserved.
    pub fn build(&self) -> String {
        match &self.clause {
            Some(clause) => format!("{WHERE}{clause}"),
            None => " ".to_string(),
        }
    }

    fn into_parts(self) -> (Option<String>, Vec<Value>) {
        (self.clause, self.args)
    }

    fn leaf(&mut self, connect: Option<&str>, column: &str, holder: &str, value: Value) {
        self.append(connect, &format!("{column}{holder}"), vec![value]);
    }

    fn where_in(&mut self, connect: Option<&str>, column: &str, values: Vec<Value>) {
        let mut clause = format!("{column}{IN}(?");
        for _ in 1..values.len() {
            clause.push_str(",?");
        }
        clause.push(')');
        self.append(connect, &clause, values);
    }

    // The connective is dropped when the clause is still empty, so the first
    // predicate of a chain never carries a leading AND/OR.
    fn append(&mut self, connect: Option<&str>, clause: &str, args: Vec<Value>) {
        match &mut self.clause {
            None => {
                self.clause = Some(clause.to_string());
                self.args = args;
            }
            Some(existing) => {
                if let Some(connect) = connect {
                    existing.push_str(connect);
                }
                existing.push_str(clause);
                self.args.extend(args);
            }
        }
    }
}
