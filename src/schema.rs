table! {
    answer_questions (answer_id, question_id) {
        answer_id -> Int4,
        question_id -> Int4,
    }
}

table! {
    answers (id) {
        id -> Int4,
        answer -> Varchar,
    }
}

table! {
    free_questions (id) {
        id -> Int4,
        free_question -> Varchar,
    }
}

table! {
    questions (id) {
        id -> Int4,
        question -> Varchar,
        question_type -> Varchar,
    }
}

table! {
    response_answers (response_id, answer_id) {
        response_id -> Uuid,
        answer_id -> Int4,
    }
}

table! {
    responses (id) {
        id -> Uuid,
        q_id -> Nullable<Int4>,
        gender -> Nullable<Varchar>,
        age -> Nullable<Varchar>,
        zip_code -> Nullable<Varchar>,
        home -> Nullable<Varchar>,
        free_q_id -> Nullable<Int4>,
        free_resp -> Nullable<Varchar>,
        survey_id -> Nullable<Int4>,
        timestamp -> Timestamptz,
        front -> Nullable<Varchar>,
        back -> Nullable<Varchar>,
    }
}

table! {
    surveys (id) {
        id -> Int4,
        name -> Nullable<Varchar>,
        desc -> Nullable<Varchar>,
    }
}

joinable!(answer_questions -> answers (answer_id));
joinable!(answer_questions -> questions (question_id));
joinable!(response_answers -> answers (answer_id));
joinable!(response_answers -> responses (response_id));
joinable!(responses -> free_questions (free_q_id));
joinable!(responses -> questions (q_id));
joinable!(responses -> surveys (survey_id));

allow_tables_to_appear_in_same_query!(
    answer_questions,
    answers,
    free_questions,
    questions,
    response_answers,
    responses,
    surveys,
);
