use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use expense_tracker::config::Config;
use expense_tracker::database;
use expense_tracker::expenses;
use expense_tracker::models::HealthStatus;

#[tokio::main]
async fn main() {
    // load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().expect("Failed to load configuration");
    let db = database::init_db(&config.data_path)
        .await
        .expect("Failed to initialize expenses DB");

    let app = Router::new()
        .route("/health", get(health))
        .route(
            "/expenses",
            post(expenses::create_expense).get(expenses::get_expenses),
        )
        .route("/expenses/summary", get(expenses::get_summary))
        .route(
            "/expenses/{expense_id}",
            get(expenses::get_expense_by_id)
                .patch(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        .layer(CorsLayer::permissive())
        .with_state(db);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();
    println!("Server running on http://{}", bind_address);

    axum::serve(listener, app).await.unwrap();
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
