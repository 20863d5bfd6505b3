pub mod config;
pub mod routes;
pub mod storage;
pub mod store;
pub mod cors;
pub mod error;
pub mod catchers;
pub use poll_shared::{models::*, error::*};

use rocket::{Build, Rocket, catchers, routes};
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    cors::CORS,
    routes::*,
};

pub fn build(app_state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .manage(app_state)
        .mount(
            "/api",
            routes![
                sign_in,
                current_user,
                sign_out,
                list_polls,
                create_poll,
                get_poll,
                get_results,
                vote_status,
                cast_vote,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}
