use crate::models::*;
use crate::schema::*;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::QueryResult;

const SCHEMA: &str = include_str!("../migrations/2020-04-01-000000_create_trivia/up.sql");

pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub fn create_schema(conn: &PgConnection) -> QueryResult<()> {
    conn.batch_execute(SCHEMA)
}

pub fn get_categories(conn: &PgConnection) -> QueryResult<Vec<Category>> {
    categories::table.order(categories::id).load(conn)
}

pub fn get_category(conn: &PgConnection, id: i32) -> QueryResult<Category> {
    categories::table.find(id).get_result(conn)
}

pub fn add_category(conn: &PgConnection, type_: &str) -> QueryResult<Category> {
    diesel::insert_into(categories::table)
        .values(&NewCategory { type_ })
        .get_result(conn)
}

/// Inserts the default categories if none exist yet. Returns how many were added.
pub fn seed_categories(conn: &PgConnection) -> QueryResult<usize> {
    let existing: i64 = categories::table.count().get_result(conn)?;
    if existing > 0 {
        return Ok(0);
    }
    let new = DEFAULT_CATEGORIES
        .iter()
        .map(|&type_| NewCategory { type_ })
        .collect::<Vec<_>>();
    diesel::insert_into(categories::table)
        .values(&new)
        .execute(conn)
}

pub fn count_questions(conn: &PgConnection) -> QueryResult<i64> {
    questions::table.count().get_result(conn)
}

pub fn get_questions(conn: &PgConnection) -> QueryResult<Vec<Question>> {
    questions::table.order(questions::id).load(conn)
}

pub fn get_question_page(conn: &PgConnection, offset: i64, limit: i64) -> QueryResult<Vec<Question>> {
    questions::table
        .order(questions::id)
        .offset(offset)
        .limit(limit)
        .load(conn)
}

pub fn get_category_questions(conn: &PgConnection, category: i32) -> QueryResult<Vec<Question>> {
    questions::table
        .filter(questions::category.eq(category))
        .order(questions::id)
        .load(conn)
}

/// Wraps `term` in `%` wildcards, escaping the characters LIKE treats specially.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == '\\' {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub fn search_questions(conn: &PgConnection, term: &str) -> QueryResult<Vec<Question>> {
    questions::table
        .filter(questions::question.ilike(like_pattern(term)))
        .order(questions::id)
        .load(conn)
}

pub fn get_quiz_candidates(
    conn: &PgConnection,
    exclude: &[i32],
    category: Option<i32>,
) -> QueryResult<Vec<Question>> {
    let query = questions::table
        .filter(questions::id.ne_all(exclude))
        .order(questions::id)
        .into_boxed();
    match category {
        Some(category) => query.filter(questions::category.eq(category)).load(conn),
        None => query.load(conn),
    }
}

pub fn insert_question(conn: &PgConnection, new: &NewQuestion) -> QueryResult<Question> {
    diesel::insert_into(questions::table)
        .values(new)
        .get_result(conn)
}

pub fn delete_question(conn: &PgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(questions::table.find(id)).execute(conn)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("title"), "%title%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }
}
