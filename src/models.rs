use crate::cards::{CardDir, CardSide};
use crate::choices::*;
use crate::error::{check_len, check_opt_len, check_required, ModelError};
use crate::schema::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const SURVEY_NAME_LEN: usize = 50;
pub const SURVEY_DESC_LEN: usize = 250;
pub const TEXT_LEN: usize = 200;
pub const ZIP_CODE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Serialize)]
#[table_name = "surveys"]
pub struct Survey {
    pub id: i32,
    pub name: Option<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Default, Insertable, AsChangeset)]
#[table_name = "surveys"]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewSurvey<'a> {
    pub name: Option<&'a str>,
    pub desc: Option<&'a str>,
}

impl NewSurvey<'_> {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_opt_len("name", self.name, SURVEY_NAME_LEN)?;
        check_opt_len("desc", self.desc, SURVEY_DESC_LEN)
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Serialize)]
#[table_name = "questions"]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Insertable, AsChangeset)]
#[table_name = "questions"]
pub struct NewQuestion<'a> {
    pub question: &'a str,
    pub question_type: QuestionType,
}

impl<'a> NewQuestion<'a> {
    pub fn new(question: &'a str) -> Self {
        Self {
            question,
            question_type: QuestionType::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_required("question", self.question)?;
        check_len("question", self.question, TEXT_LEN)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question)
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Serialize)]
#[table_name = "free_questions"]
pub struct FreeQuestion {
    pub id: i32,
    pub free_question: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[table_name = "free_questions"]
pub struct NewFreeQuestion<'a> {
    pub free_question: &'a str,
}

impl NewFreeQuestion<'_> {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_required("free_question", self.free_question)?;
        check_len("free_question", self.free_question, TEXT_LEN)
    }
}

impl fmt::Display for FreeQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.free_question)
    }
}

/// A reusable answer option. Which questions it applies to lives in
/// `answer_questions`.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Serialize)]
#[table_name = "answers"]
pub struct Answer {
    pub id: i32,
    pub answer: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[table_name = "answers"]
pub struct NewAnswer<'a> {
    pub answer: &'a str,
}

impl NewAnswer<'_> {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_required("answer", self.answer)?;
        check_len("answer", self.answer, TEXT_LEN)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.answer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Insertable, Identifiable, Associations)]
#[table_name = "answer_questions"]
#[primary_key(answer_id, question_id)]
#[belongs_to(Answer)]
#[belongs_to(Question)]
pub struct AnswerQuestion {
    pub answer_id: i32,
    pub question_id: i32,
}

/// One respondent's recorded card.
///
/// `id` is a random v4 UUID assigned at creation and `timestamp` is set by the
/// database at insert; neither is ever part of an update.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Associations, Serialize)]
#[table_name = "responses"]
#[belongs_to(Question, foreign_key = "q_id")]
#[belongs_to(FreeQuestion, foreign_key = "free_q_id")]
#[belongs_to(Survey)]
pub struct Response {
    pub id: Uuid,
    pub q_id: Option<i32>,
    pub gender: Option<Gender>,
    pub age: Option<Age>,
    pub zip_code: Option<String>,
    pub home: Option<Home>,
    pub free_q_id: Option<i32>,
    pub free_resp: Option<String>,
    pub survey_id: Option<i32>,
    pub timestamp: DateTime<Utc>,
    pub front: Option<String>,
    pub back: Option<String>,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.timestamp, f)
    }
}

/// The writable part of a response. Every field is optional so skipped or
/// inapplicable items are stored as null.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Deserialize)]
#[table_name = "responses"]
#[changeset_options(treat_none_as_null = "true")]
#[serde(default)]
pub struct ResponseForm {
    pub q_id: Option<i32>,
    pub gender: Option<Gender>,
    pub age: Option<Age>,
    pub zip_code: Option<String>,
    pub home: Option<Home>,
    pub free_q_id: Option<i32>,
    pub free_resp: Option<String>,
    pub survey_id: Option<i32>,
    pub front: Option<String>,
    pub back: Option<String>,
}

impl ResponseForm {
    pub fn validate(&self, cards: &CardDir) -> Result<(), ModelError> {
        check_opt_len("zip_code", self.zip_code.as_deref(), ZIP_CODE_LEN)?;
        check_opt_len("free_resp", self.free_resp.as_deref(), TEXT_LEN)?;
        if let Some(front) = &self.front {
            cards.check(CardSide::Front, front)?;
        }
        if let Some(back) = &self.back {
            cards.check(CardSide::Back, back)?;
        }
        Ok(())
    }

    pub(crate) fn with_id(&self, id: Uuid) -> NewResponse<'_> {
        NewResponse {
            id,
            q_id: self.q_id,
            gender: self.gender,
            age: self.age,
            zip_code: self.zip_code.as_deref(),
            home: self.home,
            free_q_id: self.free_q_id,
            free_resp: self.free_resp.as_deref(),
            survey_id: self.survey_id,
            front: self.front.as_deref(),
            back: self.back.as_deref(),
        }
    }
}

#[derive(Debug, Insertable)]
#[table_name = "responses"]
pub(crate) struct NewResponse<'a> {
    pub id: Uuid,
    pub q_id: Option<i32>,
    pub gender: Option<Gender>,
    pub age: Option<Age>,
    pub zip_code: Option<&'a str>,
    pub home: Option<Home>,
    pub free_q_id: Option<i32>,
    pub free_resp: Option<&'a str>,
    pub survey_id: Option<i32>,
    pub front: Option<&'a str>,
    pub back: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Insertable, Identifiable, Associations)]
#[table_name = "response_answers"]
#[primary_key(response_id, answer_id)]
#[belongs_to(Response)]
#[belongs_to(Answer)]
pub struct ResponseAnswer {
    pub response_id: Uuid,
    pub answer_id: i32,
}

/// A response together with the answers it selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseExport {
    #[serde(flatten)]
    pub response: Response,
    pub answers: Vec<i32>,
}
