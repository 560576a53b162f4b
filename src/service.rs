use crate::config::Settings;
use crate::error::{or_missing, ApiError};
use crate::models::*;
use crate::store::TriviaStore;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

fn category_map(store: &dyn TriviaStore) -> Result<CategoryMap, ApiError> {
    Ok(store
        .categories()?
        .into_iter()
        .map(|c| (c.id, c.type_))
        .collect())
}

/// Offset and limit of a 1-based page, or `None` for pages below 1.
pub fn page_window(page: i64, page_size: u32) -> Option<(i64, i64)> {
    if page < 1 {
        return None;
    }
    let size = i64::from(page_size);
    Some(((page - 1).checked_mul(size)?, size))
}

pub fn list_categories(store: &dyn TriviaStore) -> Result<Categories, ApiError> {
    let categories = category_map(store)?;
    if categories.is_empty() {
        debug!("no categories stored");
        return Err(ApiError::NotFound);
    }
    Ok(Categories { categories })
}

/// An empty page is reported as not found, never as an empty list.
pub fn list_questions(
    store: &dyn TriviaStore,
    page: i64,
    settings: &Settings,
) -> Result<QuestionPage, ApiError> {
    let (offset, limit) =
        page_window(page, settings.page_size.get()).ok_or(ApiError::NotFound)?;
    let questions = store.question_page(offset, limit)?;
    if questions.is_empty() {
        debug!("page {} is empty", page);
        return Err(ApiError::NotFound);
    }
    Ok(QuestionPage {
        questions,
        total_questions: store.count_questions()?,
        categories: category_map(store)?,
    })
}

pub fn questions_by_category(
    store: &dyn TriviaStore,
    category: i32,
) -> Result<CategoryQuestions, ApiError> {
    let current = or_missing(store.category(category), ApiError::NotFound)?;
    let questions = store.questions_in_category(category)?;
    Ok(CategoryQuestions {
        total_questions: questions.len(),
        questions,
        current_category: current.type_,
    })
}

pub fn search(store: &dyn TriviaStore, term: &str) -> Result<SearchResults, ApiError> {
    if term.is_empty() {
        return Err(ApiError::Unprocessable);
    }
    let questions = store.search_questions(term)?;
    Ok(SearchResults {
        total_questions: questions.len(),
        questions,
    })
}

/// Draws uniformly from the questions not asked yet. Running out of
/// questions is reported as unprocessable.
pub fn next_question<R: Rng + ?Sized>(
    store: &dyn TriviaStore,
    request: &QuizRequest,
    rng: &mut R,
) -> Result<QuizQuestion, ApiError> {
    let candidates = store.quiz_candidates(&request.previous_questions, request.category)?;
    match candidates.choose(rng) {
        Some(question) => Ok(QuizQuestion {
            question: question.clone(),
        }),
        None => {
            debug!(
                "no quiz question left in {:?} after {} asked",
                request.category,
                request.previous_questions.len()
            );
            Err(ApiError::Unprocessable)
        }
    }
}

pub fn create_question(store: &dyn TriviaStore, new: &NewQuestion) -> Result<Created, ApiError> {
    let question = store.insert_question(new).map_err(|e| {
        warn!("unable to insert question: {}", e);
        ApiError::Unprocessable
    })?;
    Ok(Created { q_id: question.id })
}

/// Deleting an id that does not exist fails, so a repeated delete fails too.
pub fn delete_question(store: &dyn TriviaStore, id: i32) -> Result<Deleted, ApiError> {
    match store.delete_question(id) {
        Ok(0) => {
            debug!("question {} does not exist", id);
            Err(ApiError::Unprocessable)
        }
        Ok(_) => Ok(Deleted { delete_id: id }),
        Err(e) => {
            warn!("unable to delete question {}: {}", id, e);
            Err(ApiError::Unprocessable)
        }
    }
}
