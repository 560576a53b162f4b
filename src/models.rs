use crate::error::ApiError;
use crate::schema::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;

/// Category id to type name, as rendered under `categories` in responses.
pub type CategoryMap = BTreeMap<i32, String>;

#[derive(Queryable, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: i32,
    pub type_: String,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Insertable)]
#[table_name = "categories"]
pub struct NewCategory<'a> {
    pub type_: &'a str,
}

/// A JSON integer that clients sometimes send as a string (`"1"`).
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Text(String),
}

impl Number {
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            Number::Int(n) => i32::try_from(*n).ok(),
            Number::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateQuestionBody {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<Number>,
    pub category: Option<Number>,
}

impl CreateQuestionBody {
    /// Every field must be present and truthy: empty strings and zeroes are
    /// rejected along with missing fields.
    pub fn validate(self) -> Result<NewQuestion, ApiError> {
        let text = |s: Option<String>| s.filter(|s| !s.is_empty());
        let int = |n: Option<Number>| n.and_then(|n| n.to_i32()).filter(|n| *n != 0);
        match (
            text(self.question),
            text(self.answer),
            int(self.difficulty),
            int(self.category),
        ) {
            (Some(question), Some(answer), Some(difficulty), Some(category)) => Ok(NewQuestion {
                question,
                answer,
                category,
                difficulty,
            }),
            _ => Err(ApiError::Unprocessable),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub search_term: Option<String>,
}

impl SearchBody {
    pub fn validate(self) -> Result<String, ApiError> {
        self.search_term
            .filter(|term| !term.is_empty())
            .ok_or(ApiError::Unprocessable)
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum QuizCategory {
    Selector { id: Number },
    Other(serde_json::Value),
}

#[derive(Deserialize, Debug, Default)]
pub struct QuizBody {
    pub previous_questions: Option<Vec<i32>>,
    pub quiz_category: Option<QuizCategory>,
}

/// A validated quiz request. `category` is `None` for "all categories".
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRequest {
    pub previous_questions: Vec<i32>,
    pub category: Option<i32>,
}

impl QuizBody {
    pub fn validate(self) -> Result<QuizRequest, ApiError> {
        let previous_questions = self.previous_questions.ok_or(ApiError::Unprocessable)?;
        let category = match self.quiz_category {
            Some(QuizCategory::Selector { id }) => id.to_i32().ok_or(ApiError::Unprocessable)?,
            _ => return Err(ApiError::Unprocessable),
        };
        Ok(QuizRequest {
            previous_questions,
            category: if category == 0 { None } else { Some(category) },
        })
    }
}

/// Success envelope: `{"success": true, ...payload}`.
#[derive(Serialize, Debug)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Success<T> {
    pub fn new(payload: T) -> Self {
        Success {
            success: true,
            payload,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Categories {
    pub categories: CategoryMap,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Serialize, Debug)]
pub struct Created {
    pub q_id: i32,
}

#[derive(Serialize, Debug)]
pub struct Deleted {
    pub delete_id: i32,
}

#[derive(Serialize, Debug)]
pub struct QuizQuestion {
    pub question: Question,
}
