// src/handlers/quiz.rs

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::{
    models::{
        grading::grade_session,
        question::PublicQuestion,
        session::{Session, collect_answers, select_question_ids},
    },
    session_store::SessionStore,
    state::AppState,
};

/// Looks up the live session named by the request's cookie.
fn current_session(state: &AppState, jar: &CookieJar) -> Option<(String, Session)> {
    let id = jar.get(&state.config.session_cookie)?.value().to_string();
    let session = state.sessions.get(&id)?;
    Some((id, session))
}

/// Start page. Always forgets the caller's session.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(&state.config.session_cookie) {
        state.sessions.remove(cookie.value());
    }
    let jar = jar.remove(Cookie::build((state.config.session_cookie.clone(), "")).path("/"));

    let body = Json(json!({
        "message": "Press start to begin a new test",
        "total_questions": state.bank.len(),
        "questions_per_test": state.config.questions_per_test.min(state.bank.len()),
    }));

    (jar, body)
}

/// Draws a random set of questions into a new session.
pub async fn start_test(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(&state.config.session_cookie) {
        state.sessions.remove(cookie.value());
    }

    let purged = state.sessions.purge_expired();
    if purged > 0 {
        tracing::debug!("Purged {} expired sessions", purged);
    }

    let question_ids = select_question_ids(
        &state.bank.ids(),
        state.config.questions_per_test,
        &mut rand::rng(),
    );
    tracing::info!("Starting test with {} questions", question_ids.len());

    let id = SessionStore::generate_id();
    state.sessions.insert(&id, Session::start(question_ids));

    let cookie = Cookie::build((state.config.session_cookie.clone(), id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), Redirect::to("/test"))
}

/// Shows the session's questions without their answers.
pub async fn test_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some((_, session)) = current_session(&state, &jar) else {
        return Redirect::to("/").into_response();
    };

    let questions: Vec<PublicQuestion> = session
        .question_ids
        .iter()
        .filter_map(|&id| state.bank.get(id))
        .map(PublicQuestion::from)
        .collect();

    Json(json!({ "questions": questions })).into_response()
}

/// Stores submitted answers, keyed in the form as `q<question_id>`.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Vec<(String, String)>>,
) -> Redirect {
    let Some((id, mut session)) = current_session(&state, &jar) else {
        return Redirect::to("/");
    };

    let answers = collect_answers(&session.question_ids, &form);
    tracing::info!(
        "Saved answers for {} of {} questions",
        answers.len(),
        session.question_ids.len()
    );
    session.submit(answers);
    state.sessions.insert(&id, session);

    Redirect::to("/results")
}

/// Grades the session and reports the score.
pub async fn results(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some((_, session)) = current_session(&state, &jar) else {
        return Redirect::to("/").into_response();
    };

    let report = grade_session(&state.bank, &session);
    tracing::info!("Test graded: {}/{}", report.score, report.total);

    Json(report).into_response()
}
