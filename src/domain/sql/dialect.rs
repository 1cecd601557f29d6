use crate::domain::value::FieldKind;
use crate::error::SqlError;
use std::fmt;
use std::str::FromStr;

/// A SQL type-mapping profile, selected by its lowercase driver tag.
///
/// Adding a dialect means adding a variant, its tag, and one row-set in
/// [`Dialect::sql_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Sqlite, Dialect::Postgres];

    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite3",
            Dialect::Postgres => "postgres",
        }
    }

    /// Column type syntax for `kind`.
    pub fn sql_type(self, kind: FieldKind) -> Result<&'static str, SqlError> {
        let ty = match (self, kind) {
            (Dialect::Sqlite, FieldKind::Bool) => "BOOL",
            (Dialect::Sqlite, FieldKind::Int) => "INT",
            (Dialect::Sqlite, FieldKind::Float) => "FLOAT",
            (Dialect::Sqlite, FieldKind::String) => "TEXT",
            (Dialect::Sqlite, FieldKind::PrimaryKey) => {
                "INTEGER PRIMARY KEY ASC ON CONFLICT REPLACE AUTOINCREMENT"
            }
            (Dialect::Sqlite, FieldKind::Timestamp) => "DATETIME DEFAULT CURRENT_TIMESTAMP",

            (Dialect::Postgres, FieldKind::Bool) => "BOOLEAN",
            (Dialect::Postgres, FieldKind::Int) => "BIGINT",
            (Dialect::Postgres, FieldKind::Float) => "FLOAT8",
            (Dialect::Postgres, FieldKind::String) => "TEXT",
            (Dialect::Postgres, FieldKind::PrimaryKey) => "BIGSERIAL PRIMARY KEY",
            (Dialect::Postgres, FieldKind::Timestamp) => {
                "TIMESTAMP WITH TIME ZONE DEFAULT (now() at time zone 'utc')"
            }

            (_, FieldKind::Null | FieldKind::Invalid) => {
                return Err(SqlError::UnsupportedType {
                    kind,
                    dialect: self.tag(),
                })
            }
        };
        Ok(ty)
    }

    /// Positional placeholder for the `index`-th (1-based) bound value.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Sqlite => format!("?{index}"),
            Dialect::Postgres => format!("${index}"),
        }
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.tag() == tag)
            .ok_or_else(|| SqlError::UnsupportedDialect(tag.to_string()))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
