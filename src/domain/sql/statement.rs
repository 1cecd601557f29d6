//! DDL and DML text for a [`Record`].

use crate::domain::record::Record;
use crate::domain::sql::dialect::Dialect;
use crate::domain::value::{FieldKind, FieldValue};
use crate::error::SqlError;
use std::collections::HashMap;

/// Columns every generated table carries ahead of the record's own fields.
pub const GENERATED_COLUMNS: [&str; 2] = ["rowid", "created"];

/// SQL text with `:name` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStatement {
    pub sql: String,
    pub bindings: HashMap<String, FieldValue>,
}

/// SQL text with dialect-native positional placeholders; `values[i]` binds
/// to placeholder `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalStatement {
    pub sql: String,
    pub values: Vec<FieldValue>,
}

/// `CREATE TABLE IF NOT EXISTS` for the record's shape.
///
/// Every table gets a synthetic `rowid` primary key and a `created`
/// timestamp, followed by one column per field in field-name order so the
/// text is identical for identical shapes. Null-valued fields carry no type
/// information and produce no column.
pub fn create_statement(record: &Record, dialect: &str) -> Result<String, SqlError> {
    let dialect: Dialect = dialect.parse()?;
    let pk = dialect.sql_type(FieldKind::PrimaryKey)?;
    let created = dialect.sql_type(FieldKind::Timestamp)?;
    if !record.is_valid() {
        return Err(SqlError::InvalidRecord);
    }
    check_generated(record)?;

    let mut columns = vec![format!("rowid {pk}"), format!("created {created}")];
    for name in record.columns() {
        let kind = record.fields()[name].kind();
        if kind == FieldKind::Null {
            continue;
        }
        columns.push(format!("{name} {}", dialect.sql_type(kind)?));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({});",
        record.table(),
        columns.join(", ")
    ))
}

/// `INSERT INTO` with one named placeholder per field.
pub fn insert_statement(record: &Record) -> Result<NamedStatement, SqlError> {
    if !record.is_valid() {
        return Err(SqlError::InvalidRecord);
    }
    if record.is_empty() {
        return Err(SqlError::EmptyRecord);
    }
    check_generated(record)?;

    let mut names = Vec::with_capacity(record.len());
    let mut bindings = HashMap::with_capacity(record.len());
    for (name, value) in record.fields() {
        names.push(name.as_str());
        bindings.insert(name.to_string(), value.clone());
    }

    let sql = format!(
        "INSERT INTO \"{}\" ({}) VALUES (:{});",
        record.table(),
        names.join(","),
        names.join(",:")
    );
    Ok(NamedStatement { sql, bindings })
}

// SQL column names are case-insensitive, so `Created` collides too.
fn check_generated(record: &Record) -> Result<(), SqlError> {
    match record
        .columns()
        .into_iter()
        .find(|name| GENERATED_COLUMNS.iter().any(|g| name.as_str().eq_ignore_ascii_case(g)))
    {
        Some(name) => Err(SqlError::ReservedColumn(name.to_string())),
        None => Ok(()),
    }
}

/// Compiles `:name` placeholders into the dialect's positional form.
///
/// Quoted regions are copied untouched. `Null` bindings become a literal
/// `NULL` instead of a parameter.
pub fn rebind(statement: &NamedStatement, dialect: Dialect) -> Result<PositionalStatement, SqlError> {
    let src = statement.sql.as_str();
    let mut sql = String::with_capacity(src.len());
    let mut values = Vec::with_capacity(statement.bindings.len());
    let mut quote: Option<char> = None;
    let mut chars = src.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            sql.push(c);
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                sql.push(c);
            }
            ':' if chars.peek().is_some_and(|(_, n)| n.is_ascii_alphabetic()) => {
                let start = i + 1;
                let mut end = start;
                while let Some(&(j, n)) = chars.peek() {
                    if !n.is_ascii_alphanumeric() {
                        break;
                    }
                    end = j + n.len_utf8();
                    chars.next();
                }
                let name = &src[start..end];
                match statement.bindings.get(name) {
                    Some(FieldValue::Null) => sql.push_str("NULL"),
                    Some(value) => {
                        values.push(value.clone());
                        sql.push_str(&dialect.placeholder(values.len()));
                    }
                    None => return Err(SqlError::MissingBinding(name.to_string())),
                }
            }
            _ => sql.push(c),
        }
    }

    Ok(PositionalStatement { sql, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Record {
        Record::new(
            "test",
            [
                ("float", FieldValue::Float(1.0)),
                ("string", FieldValue::String("str".into())),
                ("int", FieldValue::Int(1)),
                ("bool", FieldValue::Bool(false)),
            ],
        )
    }

    #[test]
    fn sqlite_create_single_field() {
        let record = Record::new("t", [("float", FieldValue::Float(1.0))]);
        assert_eq!(
            create_statement(&record, "sqlite3").unwrap(),
            "CREATE TABLE IF NOT EXISTS \"t\" (rowid INTEGER PRIMARY KEY ASC ON CONFLICT REPLACE AUTOINCREMENT, created DATETIME DEFAULT CURRENT_TIMESTAMP, float FLOAT);"
        );
    }

    #[test]
    fn sqlite_create_orders_columns_by_name() {
        assert_eq!(
            create_statement(&all_kinds(), "sqlite3").unwrap(),
            "CREATE TABLE IF NOT EXISTS \"test\" (rowid INTEGER PRIMARY KEY ASC ON CONFLICT REPLACE AUTOINCREMENT, created DATETIME DEFAULT CURRENT_TIMESTAMP, bool BOOL, float FLOAT, int INT, string TEXT);"
        );
    }

    #[test]
    fn postgres_create() {
        assert_eq!(
            create_statement(&all_kinds(), "postgres").unwrap(),
            "CREATE TABLE IF NOT EXISTS \"test\" (rowid BIGSERIAL PRIMARY KEY, created TIMESTAMP WITH TIME ZONE DEFAULT (now() at time zone 'utc'), bool BOOLEAN, float FLOAT8, int BIGINT, string TEXT);"
        );
    }

    #[test]
    fn create_is_byte_identical_across_iteration_orders() {
        let names = ["delta", "alpha", "charlie", "bravo", "echo", "foxtrot", "golf", "hotel"];
        let forward = Record::new("t", names.iter().map(|n| (*n, FieldValue::Int(1))));
        let backward = Record::new("t", names.iter().rev().map(|n| (*n, FieldValue::Int(2))));

        let expected = create_statement(&forward, "sqlite3").unwrap();
        for _ in 0..16 {
            assert_eq!(create_statement(&forward.clone(), "sqlite3").unwrap(), expected);
            assert_eq!(create_statement(&backward, "sqlite3").unwrap(), expected);
        }
        assert!(expected.ends_with(
            "alpha INT, bravo INT, charlie INT, delta INT, echo INT, foxtrot INT, golf INT, hotel INT);"
        ));
    }

    #[test]
    fn create_skips_null_columns() {
        let record = Record::new("t", [("a", FieldValue::Null), ("b", FieldValue::Bool(true))]);
        assert_eq!(
            create_statement(&record, "sqlite3").unwrap(),
            "CREATE TABLE IF NOT EXISTS \"t\" (rowid INTEGER PRIMARY KEY ASC ON CONFLICT REPLACE AUTOINCREMENT, created DATETIME DEFAULT CURRENT_TIMESTAMP, b BOOL);"
        );
    }

    #[test]
    fn create_rejects_unknown_dialect_and_invalid_records() {
        let empty = Record::new("", Vec::<(&str, FieldValue)>::new());
        assert_eq!(
            create_statement(&empty, "no idea"),
            Err(SqlError::UnsupportedDialect("no idea".into()))
        );
        assert_eq!(create_statement(&all_kinds(), "mysql"), Err(SqlError::UnsupportedDialect("mysql".into())));
        assert_eq!(create_statement(&empty, "sqlite3"), Err(SqlError::InvalidRecord));
    }

    #[test]
    fn insert_single_field() {
        let record = Record::new("t", [("float", FieldValue::Float(1.0))]);
        let stmt = insert_statement(&record).unwrap();
        assert_eq!(stmt.sql, "INSERT INTO \"t\" (float) VALUES (:float);");
        assert_eq!(stmt.bindings, HashMap::from([("float".to_string(), FieldValue::Float(1.0))]));
    }

    #[test]
    fn insert_columns_match_placeholders() {
        let stmt = insert_statement(&all_kinds()).unwrap();
        let inner = |open: &str| -> Vec<String> {
            let start = stmt.sql.find(open).unwrap() + open.len();
            let end = start + stmt.sql[start..].find(')').unwrap();
            stmt.sql[start..end].split(',').map(str::to_string).collect()
        };
        let columns = inner("\"test\" (");
        let placeholders: Vec<String> = inner("VALUES (")
            .into_iter()
            .map(|p| p.trim_start_matches(':').to_string())
            .collect();
        assert_eq!(columns, placeholders);
        assert_eq!(columns.len(), 4);
        assert_eq!(stmt.bindings.len(), 4);
    }

    #[test]
    fn insert_rejects_empty_and_invalid_records() {
        let empty = Record::new("t", Vec::<(&str, FieldValue)>::new());
        assert_eq!(insert_statement(&empty), Err(SqlError::EmptyRecord));

        let invalid = Record::new("t", [("no spaces", FieldValue::Int(1))]);
        assert_eq!(insert_statement(&invalid), Err(SqlError::InvalidRecord));
    }

    #[test]
    fn fields_may_not_shadow_generated_columns() {
        for name in ["rowid", "created", "Created", "ROWID"] {
            let record = Record::new("t", [(name, FieldValue::Int(1)), ("a", FieldValue::Int(2))]);
            assert!(record.is_valid(), "{name} passes the identifier grammar");
            assert_eq!(
                create_statement(&record, "sqlite3"),
                Err(SqlError::ReservedColumn(name.into()))
            );
            assert_eq!(insert_statement(&record), Err(SqlError::ReservedColumn(name.into())));
        }
        // a digit suffix makes it an ordinary field again
        let record = Record::new("t", [("created1", FieldValue::Int(1))]);
        assert!(create_statement(&record, "postgres").unwrap().ends_with("created1 BIGINT);"));
    }

    #[test]
    fn rebind_to_positional() {
        let stmt = NamedStatement {
            sql: "INSERT INTO \"t\" (a,b1,c) VALUES (:a,:b1,:c);".into(),
            bindings: HashMap::from([
                ("a".to_string(), FieldValue::Int(3)),
                ("b1".to_string(), FieldValue::Null),
                ("c".to_string(), FieldValue::String("x".into())),
            ]),
        };

        let pg = rebind(&stmt, Dialect::Postgres).unwrap();
        assert_eq!(pg.sql, "INSERT INTO \"t\" (a,b1,c) VALUES ($1,NULL,$2);");
        assert_eq!(pg.values, vec![FieldValue::Int(3), FieldValue::String("x".into())]);

        let lite = rebind(&stmt, Dialect::Sqlite).unwrap();
        assert_eq!(lite.sql, "INSERT INTO \"t\" (a,b1,c) VALUES (?1,NULL,?2);");
    }

    #[test]
    fn rebind_leaves_quoted_text_alone() {
        let stmt = NamedStatement {
            sql: "SELECT ':x' FROM \"a:b\" WHERE v = :x".into(),
            bindings: HashMap::from([("x".to_string(), FieldValue::Bool(true))]),
        };
        let out = rebind(&stmt, Dialect::Postgres).unwrap();
        assert_eq!(out.sql, "SELECT ':x' FROM \"a:b\" WHERE v = $1");
        assert_eq!(out.values, vec![FieldValue::Bool(true)]);
    }

    #[test]
    fn rebind_reports_unbound_names() {
        let stmt = NamedStatement {
            sql: "VALUES (:missing)".into(),
            bindings: HashMap::new(),
        };
        assert_eq!(
            rebind(&stmt, Dialect::Sqlite),
            Err(SqlError::MissingBinding("missing".into()))
        );
    }

    #[test]
    fn generated_insert_rebinds_cleanly() {
        let stmt = insert_statement(&all_kinds()).unwrap();
        let out = rebind(&stmt, Dialect::Postgres).unwrap();
        assert_eq!(out.values.len(), 4);
        for i in 1..=4 {
            assert!(out.sql.contains(&format!("${i}")));
        }
        assert!(!out.sql.contains(':'));
    }
}
