//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/exists/save/delete APIs over the `people` table.
//! - Translate storage constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths call `Person::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `save` without id inserts; `save` with id replaces the row at that id.
//! - `delete_by_id` on a missing id is a no-op.
//! - Records are stored as given; only email comparisons ignore padding.

use crate::db::DbError;
use crate::model::person::{validate_id, Person, PersonId, PersonValidationError};
use rusqlite::{ffi, params, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Characters stripped from both ends of an email before comparison.
/// Must match the `char(32, 9, 10, 13)` set in the `people_email_trimmed_uq` index.
const EMAIL_PADDING: &[char] = &[' ', '\t', '\n', '\r'];

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    email
FROM people";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for person persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record shape rejected before touching storage.
    Validation(PersonValidationError),
    /// Storage refused a write because another row holds the email.
    DuplicateEmail(String),
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// Persisted row cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already in use: {email}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateEmail(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for person records.
pub trait PersonRepository {
    /// All records ordered by ascending id.
    fn find_all(&self) -> RepoResult<Vec<Person>>;
    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Case-sensitive match ignoring surrounding padding on both sides.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Person>>;
    fn exists_by_id(&self, id: PersonId) -> RepoResult<bool>;
    fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    /// Inserts when `id` is unset, otherwise replaces the row at `id`.
    fn save(&self, person: &Person) -> RepoResult<Person>;
    fn delete_by_id(&self, id: PersonId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed person repository bound to one open transaction.
pub struct SqlitePersonRepository<'tx> {
    conn: &'tx Connection,
}

impl<'tx> SqlitePersonRepository<'tx> {
    /// Binds the repository to `tx`; all statements run inside it.
    pub fn new(tx: &'tx Transaction<'_>) -> Self {
        Self { conn: tx }
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut people = Vec::new();

        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn find_by_id(&self, id: PersonId) -> RepoResult<Option<Person>> {
        validate_id(id)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Person>> {
        let email = trim_email(email);
        if email.is_empty() {
            return Ok(None);
        }

        let mut stmt = self
            .conn
            .prepare(&format!(
                "{PERSON_SELECT_SQL} WHERE trim(email, char(32, 9, 10, 13)) = ?1;"
            ))?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn exists_by_id(&self, id: PersonId) -> RepoResult<bool> {
        if id <= 0 {
            return Ok(false);
        }
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM people WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let email = trim_email(email);
        if email.is_empty() {
            return Ok(false);
        }
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM people WHERE trim(email, char(32, 9, 10, 13)) = ?1
            );",
            [email],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, person: &Person) -> RepoResult<Person> {
        person.validate()?;

        match person.id {
            None => {
                self.conn
                    .execute(
                        "INSERT INTO people (full_name, email) VALUES (?1, ?2);",
                        params![person.full_name.as_str(), person.email.as_str()],
                    )
                    .map_err(|err| map_write_error(err, person.email.as_str()))?;

                Ok(Person {
                    id: Some(self.conn.last_insert_rowid()),
                    ..person.clone()
                })
            }
            Some(id) => {
                self.conn
                    .execute(
                        "INSERT INTO people (id, full_name, email) VALUES (?1, ?2, ?3)
                         ON CONFLICT(id) DO UPDATE SET
                            full_name = excluded.full_name,
                            email = excluded.email;",
                        params![id, person.full_name.as_str(), person.email.as_str()],
                    )
                    .map_err(|err| map_write_error(err, person.email.as_str()))?;

                self.find_by_id(id)?.ok_or_else(|| {
                    RepoError::InvalidData(format!("row {id} missing right after write"))
                })
            }
        }
    }

    fn delete_by_id(&self, id: PersonId) -> RepoResult<()> {
        validate_id(id)?;
        self.conn.execute("DELETE FROM people WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn trim_email(email: &str) -> &str {
    email.trim_matches(EMAIL_PADDING)
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::DuplicateEmail(email.to_string());
        }
    }
    err.into()
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: PersonId = row.get("id")?;
    let person = Person {
        id: Some(id),
        full_name: row.get("full_name")?,
        email: row.get("email")?,
    };
    person
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("people row {id}: {err}")))?;
    Ok(person)
}
