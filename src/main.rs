use std::sync::Arc;

use rocket::*;

use config::Config;
use database::{requests, SqlRankingStore};
use trigger::{LeaderboardTrimmer, Triggers};

mod config;
mod database;
mod leaderboard;
mod score;
mod trigger;

#[launch]
async fn rocket() -> _ {
    let config = Config::from_env().expect("invalid configuration");
    build(&config).await
}

/// Connects the ranking store, starts the leaderboard trigger
/// and mounts the routes.
pub async fn build(config: &Config) -> Rocket<Build> {
    let database = SqlRankingStore::connect(&config.database_url, config.database_max_connections)
        .await
        .expect("failed to connect to a database");

    let trimmer = LeaderboardTrimmer::new(config.leaderboard_size);
    let triggers = Triggers::start(
        Arc::new(database.clone()),
        trimmer,
        config.trigger_max_attempts,
    );

    rocket::build()
        .mount(
            "/",
            routes![
                index,
                requests::get_ranking,
                requests::submit_time,
                requests::put_ranking,
                requests::delete_ranking,
            ],
        )
        .manage(database)
        .manage(triggers)
}

#[get("/")]
fn index() -> &'static str {
    "This is an online puzzle rankings server!"
}
