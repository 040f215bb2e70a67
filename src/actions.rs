use crate::cards::CardDir;
use crate::choices::QuestionType;
use crate::models::*;
use crate::schema::*;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::QueryResult;
use failure::Error;
use log::{debug, info, warn};
use uuid::Uuid;

/// Table definitions, safe to apply more than once.
pub const SCHEMA_SQL: &str = include_str!("../migrations/2020-10-18-000000_create_survey/up.sql");

pub fn install_schema(conn: &PgConnection) -> QueryResult<()> {
    conn.batch_execute(SCHEMA_SQL)
}

pub fn create_survey(conn: &PgConnection, new: &NewSurvey) -> Result<Survey, Error> {
    new.validate()?;
    let survey = diesel::insert_into(surveys::table)
        .values(new)
        .get_result::<Survey>(conn)?;
    info!("created survey {} ({})", survey.id, survey);
    Ok(survey)
}

pub fn get_survey(conn: &PgConnection, id: i32) -> QueryResult<Survey> {
    surveys::table.find(id).get_result(conn)
}

pub fn list_surveys(conn: &PgConnection) -> QueryResult<Vec<Survey>> {
    surveys::table.order(surveys::id).load(conn)
}

pub fn update_survey(conn: &PgConnection, id: i32, changes: &NewSurvey) -> Result<Survey, Error> {
    changes.validate()?;
    Ok(diesel::update(surveys::table.find(id))
        .set(changes)
        .get_result(conn)?)
}

/// Responses of the survey keep existing with their survey reference nulled.
pub fn delete_survey(conn: &PgConnection, id: i32) -> QueryResult<bool> {
    let n = diesel::delete(surveys::table.find(id)).execute(conn)?;
    if n > 0 {
        info!("deleted survey {}", id);
    }
    Ok(n > 0)
}

pub fn create_question(conn: &PgConnection, new: &NewQuestion) -> Result<Question, Error> {
    new.validate()?;
    let question = diesel::insert_into(questions::table)
        .values(new)
        .get_result::<Question>(conn)?;
    info!(
        "created question {} ({})",
        question.id, question.question_type
    );
    Ok(question)
}

pub fn get_question(conn: &PgConnection, id: i32) -> QueryResult<Question> {
    questions::table.find(id).get_result(conn)
}

pub fn list_questions(conn: &PgConnection) -> QueryResult<Vec<Question>> {
    questions::table.order(questions::id).load(conn)
}

pub fn update_question(
    conn: &PgConnection,
    id: i32,
    changes: &NewQuestion,
) -> Result<Question, Error> {
    changes.validate()?;
    Ok(diesel::update(questions::table.find(id))
        .set(changes)
        .get_result(conn)?)
}

/// Responses to the question keep existing with `q_id` nulled; its answer
/// links are dropped.
pub fn delete_question(conn: &PgConnection, id: i32) -> QueryResult<bool> {
    let n = diesel::delete(questions::table.find(id)).execute(conn)?;
    if n > 0 {
        info!("deleted question {}", id);
    }
    Ok(n > 0)
}

pub fn create_free_question(
    conn: &PgConnection,
    new: &NewFreeQuestion,
) -> Result<FreeQuestion, Error> {
    new.validate()?;
    let free = diesel::insert_into(free_questions::table)
        .values(new)
        .get_result::<FreeQuestion>(conn)?;
    info!("created free question {}", free.id);
    Ok(free)
}

pub fn get_free_question(conn: &PgConnection, id: i32) -> QueryResult<FreeQuestion> {
    free_questions::table.find(id).get_result(conn)
}

pub fn list_free_questions(conn: &PgConnection) -> QueryResult<Vec<FreeQuestion>> {
    free_questions::table.order(free_questions::id).load(conn)
}

pub fn update_free_question(
    conn: &PgConnection,
    id: i32,
    changes: &NewFreeQuestion,
) -> Result<FreeQuestion, Error> {
    changes.validate()?;
    Ok(diesel::update(free_questions::table.find(id))
        .set(changes)
        .get_result(conn)?)
}

pub fn delete_free_question(conn: &PgConnection, id: i32) -> QueryResult<bool> {
    let n = diesel::delete(free_questions::table.find(id)).execute(conn)?;
    if n > 0 {
        info!("deleted free question {}", id);
    }
    Ok(n > 0)
}

/// Creates an answer option and links it to `question_ids`.
pub fn create_answer(
    conn: &PgConnection,
    new: &NewAnswer,
    question_ids: &[i32],
) -> Result<Answer, Error> {
    new.validate()?;
    conn.transaction::<_, Error, _>(|| {
        let answer = diesel::insert_into(answers::table)
            .values(new)
            .get_result::<Answer>(conn)?;
        for &question_id in question_ids {
            link_answer_question(conn, answer.id, question_id)?;
        }
        info!(
            "created answer {} for {} question(s)",
            answer.id,
            question_ids.len()
        );
        Ok(answer)
    })
}

pub fn get_answer(conn: &PgConnection, id: i32) -> QueryResult<Answer> {
    answers::table.find(id).get_result(conn)
}

pub fn list_answers(conn: &PgConnection) -> QueryResult<Vec<Answer>> {
    answers::table.order(answers::id).load(conn)
}

pub fn update_answer(conn: &PgConnection, id: i32, changes: &NewAnswer) -> Result<Answer, Error> {
    changes.validate()?;
    Ok(diesel::update(answers::table.find(id))
        .set(changes)
        .get_result(conn)?)
}

pub fn delete_answer(conn: &PgConnection, id: i32) -> QueryResult<bool> {
    let n = diesel::delete(answers::table.find(id)).execute(conn)?;
    if n > 0 {
        info!("deleted answer {}", id);
    }
    Ok(n > 0)
}

/// Linking an already linked pair is a no-op.
pub fn link_answer_question(
    conn: &PgConnection,
    answer_id: i32,
    question_id: i32,
) -> QueryResult<()> {
    diesel::insert_into(answer_questions::table)
        .values(&AnswerQuestion {
            answer_id,
            question_id,
        })
        .on_conflict_do_nothing()
        .execute(conn)?;
    debug!("linked answer {} to question {}", answer_id, question_id);
    Ok(())
}

pub fn unlink_answer_question(
    conn: &PgConnection,
    answer_id: i32,
    question_id: i32,
) -> QueryResult<bool> {
    let n = diesel::delete(answer_questions::table.find((answer_id, question_id))).execute(conn)?;
    Ok(n > 0)
}

pub fn answers_for_question(conn: &PgConnection, question_id: i32) -> QueryResult<Vec<Answer>> {
    answers::table
        .inner_join(answer_questions::table)
        .filter(answer_questions::question_id.eq(question_id))
        .select(answers::all_columns)
        .order(answers::id)
        .load(conn)
}

pub fn questions_for_answer(conn: &PgConnection, answer_id: i32) -> QueryResult<Vec<Question>> {
    questions::table
        .inner_join(answer_questions::table)
        .filter(answer_questions::answer_id.eq(answer_id))
        .select(questions::all_columns)
        .order(questions::id)
        .load(conn)
}

/// Records a response with a fresh random id. The response row and its
/// selected answers are written in one transaction.
pub fn create_response(
    conn: &PgConnection,
    cards: &CardDir,
    form: &ResponseForm,
    answer_ids: &[i32],
) -> Result<Response, Error> {
    form.validate(cards)?;
    let id = Uuid::new_v4();
    conn.transaction::<_, Error, _>(|| {
        let response = diesel::insert_into(responses::table)
            .values(&form.with_id(id))
            .get_result::<Response>(conn)?;
        insert_response_answers(conn, id, answer_ids)?;
        if let (Some(q_id), true) = (form.q_id, answer_ids.len() > 1) {
            let question_type = questions::table
                .find(q_id)
                .select(questions::question_type)
                .get_result::<QuestionType>(conn)?;
            if !question_type.allows_many() {
                warn!(
                    "response {} selects {} answers for {} question {}",
                    id,
                    answer_ids.len(),
                    question_type,
                    q_id
                );
            }
        }
        info!(
            "recorded response {} with {} answer(s)",
            response.id,
            answer_ids.len()
        );
        Ok(response)
    })
}

pub fn get_response(conn: &PgConnection, id: Uuid) -> QueryResult<Response> {
    responses::table.find(id).get_result(conn)
}

/// All responses in insertion order.
pub fn list_responses(conn: &PgConnection) -> QueryResult<Vec<Response>> {
    responses::table
        .order((responses::timestamp, responses::id))
        .load(conn)
}

pub fn responses_for_survey(conn: &PgConnection, survey: &Survey) -> QueryResult<Vec<Response>> {
    Response::belonging_to(survey)
        .order((responses::timestamp, responses::id))
        .load(conn)
}

/// Replaces every writable field. The id and timestamp are never touched.
pub fn update_response(
    conn: &PgConnection,
    cards: &CardDir,
    id: Uuid,
    form: &ResponseForm,
) -> Result<Response, Error> {
    form.validate(cards)?;
    Ok(diesel::update(responses::table.find(id))
        .set(form)
        .get_result(conn)?)
}

pub fn delete_response(conn: &PgConnection, id: Uuid) -> QueryResult<bool> {
    let n = diesel::delete(responses::table.find(id)).execute(conn)?;
    if n > 0 {
        info!("deleted response {}", id);
    }
    Ok(n > 0)
}

/// Replaces the set of answers selected by a response.
pub fn set_response_answers(
    conn: &PgConnection,
    response_id: Uuid,
    answer_ids: &[i32],
) -> QueryResult<()> {
    conn.transaction(|| {
        diesel::delete(
            response_answers::table.filter(response_answers::response_id.eq(response_id)),
        )
        .execute(conn)?;
        insert_response_answers(conn, response_id, answer_ids)
    })
}

pub fn response_answers(conn: &PgConnection, response_id: Uuid) -> QueryResult<Vec<Answer>> {
    answers::table
        .inner_join(response_answers::table)
        .filter(response_answers::response_id.eq(response_id))
        .select(answers::all_columns)
        .order(answers::id)
        .load(conn)
}

fn insert_response_answers(
    conn: &PgConnection,
    response_id: Uuid,
    answer_ids: &[i32],
) -> QueryResult<()> {
    let rows = answer_ids
        .iter()
        .map(|&answer_id| ResponseAnswer {
            response_id,
            answer_id,
        })
        .collect::<Vec<_>>();
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(response_answers::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(())
}

/// Responses, optionally of one survey, with their selected answer ids.
pub fn export_responses(
    conn: &PgConnection,
    survey_id: Option<i32>,
) -> QueryResult<Vec<ResponseExport>> {
    let mut query = responses::table.into_boxed();
    if let Some(survey_id) = survey_id {
        query = query.filter(responses::survey_id.eq(survey_id));
    }
    let responses = query
        .order((responses::timestamp, responses::id))
        .load::<Response>(conn)?;
    let selected = ResponseAnswer::belonging_to(&responses)
        .order(response_answers::answer_id)
        .load::<ResponseAnswer>(conn)?
        .grouped_by(&responses);
    Ok(responses
        .into_iter()
        .zip(selected)
        .map(|(response, rows)| ResponseExport {
            response,
            answers: rows.into_iter().map(|r| r.answer_id).collect(),
        })
        .collect())
}
