//! In-memory store used by the service and HTTP tests.

use super::{Backend, TriviaStore};
use crate::actions::DEFAULT_CATEGORIES;
use crate::error::ApiError;
use crate::models::*;
use diesel::result::Error::NotFound;
use diesel::QueryResult;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    questions: Vec<Question>,
    next_id: i32,
}

pub struct MemoryStore {
    state: Mutex<State>,
}

const SEED_QUESTIONS: [(i32, &str, &str, i32, i32); 19] = [
    (2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    (5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    (6, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
    (9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    (10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    (11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    (12, "Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    (13, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    (14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    (15, "The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    (16, "Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
    (17, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    (18, "How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    (19, "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    (20, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
    (21, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
    (22, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    (23, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
        }
    }

    /// 6 categories and 19 questions, ids 2 through 23 with gaps.
    pub fn seeded() -> Self {
        let store = MemoryStore::new();
        {
            let mut state = store.lock();
            state.categories = DEFAULT_CATEGORIES
                .iter()
                .zip(1..)
                .map(|(type_, id)| Category {
                    id,
                    type_: type_.to_string(),
                })
                .collect();
            state.questions = SEED_QUESTIONS
                .iter()
                .map(|&(id, question, answer, category, difficulty)| Question {
                    id,
                    question: question.to_string(),
                    answer: answer.to_string(),
                    category,
                    difficulty,
                })
                .collect();
            state.next_id = 24;
        }
        store
    }

    pub fn with_categories_only() -> Self {
        let store = MemoryStore::seeded();
        store.lock().questions.clear();
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn filtered(&self, keep: impl Fn(&Question) -> bool) -> Vec<Question> {
        self.lock().questions.iter().filter(|q| keep(*q)).cloned().collect()
    }
}

impl TriviaStore for MemoryStore {
    fn categories(&self) -> QueryResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    fn category(&self, id: i32) -> QueryResult<Category> {
        self.lock()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(NotFound)
    }

    fn count_questions(&self) -> QueryResult<i64> {
        Ok(self.lock().questions.len() as i64)
    }

    fn question_page(&self, offset: i64, limit: i64) -> QueryResult<Vec<Question>> {
        Ok(self
            .lock()
            .questions
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn questions_in_category(&self, category: i32) -> QueryResult<Vec<Question>> {
        Ok(self.filtered(|q| q.category == category))
    }

    fn search_questions(&self, term: &str) -> QueryResult<Vec<Question>> {
        let term = term.to_lowercase();
        Ok(self.filtered(|q| q.question.to_lowercase().contains(&term)))
    }

    fn quiz_candidates(&self, exclude: &[i32], category: Option<i32>) -> QueryResult<Vec<Question>> {
        Ok(self.filtered(|q| {
            !exclude.contains(&q.id) && category.map_or(true, |c| q.category == c)
        }))
    }

    fn insert_question(&self, new: &NewQuestion) -> QueryResult<Question> {
        let mut state = self.lock();
        let question = Question {
            id: state.next_id,
            question: new.question.clone(),
            answer: new.answer.clone(),
            category: new.category,
            difficulty: new.difficulty,
        };
        state.next_id += 1;
        state.questions.push(question.clone());
        Ok(question)
    }

    fn delete_question(&self, id: i32) -> QueryResult<usize> {
        let mut state = self.lock();
        let before = state.questions.len();
        state.questions.retain(|q| q.id != id);
        Ok(before - state.questions.len())
    }
}

impl Backend for MemoryStore {
    fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn TriviaStore) -> Result<T, ApiError>,
    {
        f(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_categories_match_defaults() {
        let categories = MemoryStore::seeded().categories().unwrap();
        let names = categories.iter().map(|c| c.type_.as_str()).collect::<Vec<_>>();
        assert_eq!(names, DEFAULT_CATEGORIES.to_vec());
        assert_eq!(categories[0].id, 1);
    }
}
