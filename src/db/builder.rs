use sea_query::{
    DeleteStatement, InsertStatement, PostgresQueryBuilder, Query, QueryStatementWriter,
    SelectStatement, UpdateStatement, Values,
};

/// SQL statement builder pinned to numbered (`$1`, `$2`, ...) placeholders
///
/// Statements are assembled with sea-query and rendered into SQL text plus the
/// ordered argument list, ready to hand to `sqlx::query_with`-style APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementBuilder;

impl StatementBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self) -> SelectStatement {
        Query::select()
    }

    pub fn insert(&self) -> InsertStatement {
        Query::insert()
    }

    pub fn update(&self) -> UpdateStatement {
        Query::update()
    }

    pub fn delete(&self) -> DeleteStatement {
        Query::delete()
    }

    /// Render a statement into SQL text and its positional arguments
    pub fn build<S: QueryStatementWriter>(&self, statement: &S) -> (String, Values) {
        statement.build(PostgresQueryBuilder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::{Alias, Expr, Value};

    #[test]
    fn test_select_uses_dollar_placeholders() {
        let builder = StatementBuilder::new();
        let mut query = builder.select();
        query
            .column(Alias::new("id"))
            .from(Alias::new("users"))
            .and_where(Expr::col(Alias::new("email")).eq("a@example.com"))
            .and_where(Expr::col(Alias::new("active")).eq(true));

        let (sql, values) = builder.build(&query);
        assert_eq!(
            sql,
            r#"SELECT "id" FROM "users" WHERE "email" = $1 AND "active" = $2"#
        );
        assert_eq!(values.0.len(), 2);
        assert_eq!(values.0[0], Value::from("a@example.com"));
        assert_eq!(values.0[1], Value::Bool(Some(true)));
    }

    #[test]
    fn test_insert_numbers_every_value() {
        let builder = StatementBuilder::new();
        let mut query = builder.insert();
        query
            .into_table(Alias::new("users"))
            .columns([Alias::new("name"), Alias::new("age")])
            .values_panic(["bob".into(), 30.into()]);

        let (sql, values) = builder.build(&query);
        assert_eq!(
            sql,
            r#"INSERT INTO "users" ("name", "age") VALUES ($1, $2)"#
        );
        assert_eq!(values.0.len(), 2);
    }

    #[test]
    fn test_delete_without_arguments() {
        let builder = StatementBuilder::new();
        let mut query = builder.delete();
        query.from_table(Alias::new("sessions"));

        let (sql, values) = builder.build(&query);
        assert_eq!(sql, r#"DELETE FROM "sessions""#);
        assert!(values.0.is_empty());
    }
}
