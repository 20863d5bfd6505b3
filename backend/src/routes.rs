use rocket::{State, get, post, delete, http::Status, response::status, serde::json::Json};
use serde::Serialize;
use tracing::{debug, instrument};

use poll_shared::models::*;
use poll_shared::PollResults;
use crate::{error::ApiResult, store::PollStore};

pub struct AppState {
    pub store: PollStore,
}

impl AppState {
    pub fn new(store: PollStore) -> Self {
        Self { store }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub poll_id: String,
    pub user_id: String,
    pub has_voted: bool,
}

#[instrument(skip(state, request))]
#[post("/session", format = "json", data = "<request>")]
pub async fn sign_in(state: &State<AppState>, request: Json<SignInRequest>) -> ApiResult<Json<User>> {
    let user = state.store.sign_in(&request.username).await?;
    Ok(Json(user))
}

#[get("/session")]
pub async fn current_user(state: &State<AppState>) -> ApiResult<Json<Option<User>>> {
    Ok(Json(state.store.current_user()?))
}

#[delete("/session")]
pub async fn sign_out(state: &State<AppState>) -> ApiResult<Status> {
    state.store.sign_out().await?;
    Ok(Status::NoContent)
}

#[get("/polls")]
pub async fn list_polls(state: &State<AppState>) -> ApiResult<Json<Vec<Poll>>> {
    let polls = state.store.list_polls().await?;
    debug!("Listing {} polls", polls.len());
    Ok(Json(polls))
}

#[instrument(skip(state, request), fields(user_id = %request.user_id))]
#[post("/polls", format = "json", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    request: Json<CreatePollRequest>,
) -> ApiResult<status::Created<Json<Poll>>> {
    let request = request.into_inner();
    let poll = state.store
        .create_poll(&request.question, &request.options, &request.user_id)
        .await?;

    let location = format!("/api/polls/{}", poll.id);
    Ok(status::Created::new(location).body(Json(poll)))
}

#[get("/polls/<id>")]
pub async fn get_poll(state: &State<AppState>, id: &str) -> ApiResult<Json<Poll>> {
    Ok(Json(state.store.get_poll(id).await?))
}

#[get("/polls/<id>/results")]
pub async fn get_results(state: &State<AppState>, id: &str) -> ApiResult<Json<PollResults>> {
    Ok(Json(state.store.results(id).await?))
}

#[get("/polls/<id>/votes/<user_id>")]
pub async fn vote_status(state: &State<AppState>, id: &str, user_id: &str) -> ApiResult<Json<VoteStatus>> {
    let has_voted = state.store.has_voted(id, user_id).await?;
    Ok(Json(VoteStatus {
        poll_id: id.to_string(),
        user_id: user_id.to_string(),
        has_voted,
    }))
}

#[instrument(skip(state, request), fields(poll_id = %id, user_id = %request.user_id))]
#[post("/polls/<id>/votes", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    id: &str,
    request: Json<CastVoteRequest>,
) -> ApiResult<Json<Poll>> {
    let poll = state.store.cast_vote(id, &request.option_id, &request.user_id).await?;
    Ok(Json(poll))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
