use crate::actions;
use crate::error::ApiError;
use crate::models::*;
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::{Connection, QueryResult};

#[cfg(test)]
pub mod memory;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// The queries the services need. Lookups of a single row report a missing
/// row as `diesel::result::Error::NotFound`.
pub trait TriviaStore {
    fn categories(&self) -> QueryResult<Vec<Category>>;
    fn category(&self, id: i32) -> QueryResult<Category>;
    fn count_questions(&self) -> QueryResult<i64>;
    /// Questions ordered by id, skipping `offset` and returning at most `limit`.
    fn question_page(&self, offset: i64, limit: i64) -> QueryResult<Vec<Question>>;
    fn questions_in_category(&self, category: i32) -> QueryResult<Vec<Question>>;
    /// Questions whose text contains `term`, ignoring case.
    fn search_questions(&self, term: &str) -> QueryResult<Vec<Question>>;
    /// Questions not in `exclude`, restricted to `category` when given.
    fn quiz_candidates(&self, exclude: &[i32], category: Option<i32>) -> QueryResult<Vec<Question>>;
    fn insert_question(&self, new: &NewQuestion) -> QueryResult<Question>;
    /// Returns the number of rows removed.
    fn delete_question(&self, id: i32) -> QueryResult<usize>;
}

impl TriviaStore for PgConnection {
    fn categories(&self) -> QueryResult<Vec<Category>> {
        actions::get_categories(self)
    }

    fn category(&self, id: i32) -> QueryResult<Category> {
        actions::get_category(self, id)
    }

    fn count_questions(&self) -> QueryResult<i64> {
        actions::count_questions(self)
    }

    fn question_page(&self, offset: i64, limit: i64) -> QueryResult<Vec<Question>> {
        actions::get_question_page(self, offset, limit)
    }

    fn questions_in_category(&self, category: i32) -> QueryResult<Vec<Question>> {
        actions::get_category_questions(self, category)
    }

    fn search_questions(&self, term: &str) -> QueryResult<Vec<Question>> {
        actions::search_questions(self, term)
    }

    fn quiz_candidates(&self, exclude: &[i32], category: Option<i32>) -> QueryResult<Vec<Question>> {
        actions::get_quiz_candidates(self, exclude, category)
    }

    fn insert_question(&self, new: &NewQuestion) -> QueryResult<Question> {
        actions::insert_question(self, new)
    }

    fn delete_question(&self, id: i32) -> QueryResult<usize> {
        actions::delete_question(self, id)
    }
}

/// Hands out a store for the duration of one request.
///
/// `run` is blocking and is meant to be called from `web::block`.
pub trait Backend: Send + Sync + 'static {
    fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn TriviaStore) -> Result<T, ApiError>;
}

impl Backend for DbPool {
    /// Checks out a pooled connection and runs `f` in one transaction, which
    /// is rolled back if `f` fails.
    fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn TriviaStore) -> Result<T, ApiError>,
    {
        let conn = self.get()?;
        let conn: &PgConnection = &conn;
        conn.transaction(|| f(conn))
    }
}
