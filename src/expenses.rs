use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::constants::*;
use crate::database::Db;
use crate::models::{
    CategorySummary, CreateExpensePayload, Expense, ListExpensesQuery, UpdateExpensePayload,
};
use crate::repository;
use crate::utils::{db_error, db_error_with_context, validate_limit, validate_string_length};

pub fn validate_category(category: &str) -> Result<(), (StatusCode, String)> {
    validate_string_length(category, "Category", MAX_CATEGORY_LENGTH)
}

pub fn validate_category_filter(category: &str) -> Result<(), (StatusCode, String)> {
    validate_string_length(category, "Category filter", MAX_CATEGORY_FILTER_LENGTH)
}

pub fn validate_amount(amount: f64) -> Result<(), (StatusCode, String)> {
    if amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Amount must be greater than 0".to_string(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Amount cannot exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}

pub fn validate_comment(comment: &str) -> Result<(), (StatusCode, String)> {
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Comment must be at most {} characters", MAX_COMMENT_LENGTH),
        ));
    }
    Ok(())
}

pub async fn create_expense(
    State(db): State<Db>,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<(StatusCode, Json<Expense>), (StatusCode, String)> {
    // Input validation
    validate_category(&payload.category)?;
    validate_amount(payload.amount)?;
    if let Some(comment) = &payload.comment {
        validate_comment(comment)?;
    }

    // Business rule layered above persistence, not a data-model invariant
    if payload.category.eq_ignore_ascii_case(FORBIDDEN_CATEGORY) {
        return Err((
            StatusCode::BAD_REQUEST,
            ERR_FORBIDDEN_CATEGORY.to_string(),
        ));
    }

    let expense = repository::create_expense(
        &db,
        &payload.category,
        payload.amount,
        payload.comment.as_deref(),
    )
    .await
    .map_err(|_| db_error_with_context("expense creation failed"))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn get_expenses(
    State(db): State<Db>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<(StatusCode, Json<Vec<Expense>>), (StatusCode, String)> {
    if let Some(category) = &query.category {
        validate_category_filter(category)?;
    }
    let limit = validate_limit(query.limit)?;
    let skip = query.skip.unwrap_or(0);

    let expenses = repository::get_sorted_expenses(&db, query.category.as_deref(), limit, skip)
        .await
        .map_err(|_| db_error_with_context("failed to query expenses"))?;

    Ok((StatusCode::OK, Json(expenses)))
}

pub async fn get_summary(
    State(db): State<Db>,
) -> Result<(StatusCode, Json<Vec<CategorySummary>>), (StatusCode, String)> {
    let summaries = repository::get_summary(&db).await.map_err(|_| db_error())?;

    Ok((StatusCode::OK, Json(summaries)))
}

pub async fn get_expense_by_id(
    State(db): State<Db>,
    Path(expense_id): Path<i64>,
) -> Result<(StatusCode, Json<Expense>), (StatusCode, String)> {
    match repository::get_expense_by_id(&db, expense_id).await {
        Ok(Some(expense)) => Ok((StatusCode::OK, Json(expense))),
        Ok(None) => Err((StatusCode::NOT_FOUND, ERR_EXPENSE_NOT_FOUND.to_string())),
        Err(_) => Err(db_error_with_context("failed to fetch expense")),
    }
}

pub async fn update_expense(
    State(db): State<Db>,
    Path(expense_id): Path<i64>,
    Json(payload): Json<UpdateExpensePayload>,
) -> Result<(StatusCode, Json<Expense>), (StatusCode, String)> {
    // Input validation for the fields actually supplied
    if let Some(category) = &payload.category {
        validate_category(category)?;
    }
    if let Some(amount) = payload.amount {
        validate_amount(amount)?;
    }
    if let Some(Some(comment)) = &payload.comment {
        validate_comment(comment)?;
    }

    // An empty effective field set never reaches the repository
    let fields = repository::update_fields(&payload);
    if fields.is_empty() {
        return Err((StatusCode::BAD_REQUEST, ERR_NO_UPDATE_FIELDS.to_string()));
    }

    match repository::update_expense(&db, expense_id, fields).await {
        Ok(Some(expense)) => Ok((StatusCode::OK, Json(expense))),
        Ok(None) => Err((StatusCode::NOT_FOUND, ERR_EXPENSE_NOT_FOUND.to_string())),
        Err(_) => Err(db_error_with_context("expense update failed")),
    }
}

pub async fn delete_expense(
    State(db): State<Db>,
    Path(expense_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repository::delete_expense(&db, expense_id)
        .await
        .map_err(|_| db_error_with_context("expense deletion failed"))?;

    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, ERR_EXPENSE_NOT_FOUND.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
