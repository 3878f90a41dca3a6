/*!
 * Category Summary Integration Tests
 *
 * Exercises the per-category aggregation: sums, counts, arithmetic means,
 * and the summed-amount-descending ordering of the result.
 *
 * All tests use isolated temporary databases for complete test isolation.
 */

mod common;

use common::*;
use expense_tracker::repository;

const FLOAT_TOLERANCE: f64 = 1e-9;

#[tokio::test]
async fn summary_on_empty_table_returns_empty() {
    let (db, _temp_dir) = setup_test_db().await;

    let summary = repository::get_summary(&db)
        .await
        .expect("Failed to compute summary");

    assert!(summary.is_empty());
}

#[tokio::test]
async fn summary_computes_sum_count_and_average_per_category() {
    let (db, _temp_dir) = setup_test_db().await;

    insert_expense_at(&db, &test_date(1), "food", 10.0, None).await;
    insert_expense_at(&db, &test_date(2), "food", 20.0, Some("dinner")).await;
    insert_expense_at(&db, &test_date(3), "food", 30.0, None).await;
    insert_expense_at(&db, &test_date(4), "transport", 5.5, None).await;
    insert_expense_at(&db, &test_date(5), "transport", 4.5, None).await;

    let summary = repository::get_summary(&db)
        .await
        .expect("Failed to compute summary");

    assert_eq!(summary.len(), 2);

    let food = summary
        .iter()
        .find(|s| s.category == "food")
        .expect("food category missing from summary");
    assert!((food.amount - 60.0).abs() < FLOAT_TOLERANCE);
    assert_eq!(food.count, 3);
    assert!((food.average_bill - 20.0).abs() < FLOAT_TOLERANCE);

    let transport = summary
        .iter()
        .find(|s| s.category == "transport")
        .expect("transport category missing from summary");
    assert!((transport.amount - 10.0).abs() < FLOAT_TOLERANCE);
    assert_eq!(transport.count, 2);
    assert!((transport.average_bill - 5.0).abs() < FLOAT_TOLERANCE);
}

#[tokio::test]
async fn summary_orders_by_summed_amount_descending() {
    let (db, _temp_dir) = setup_test_db().await;

    insert_expense_at(&db, &test_date(1), "coffee", 3.0, None).await;
    insert_expense_at(&db, &test_date(2), "rent", 900.0, None).await;
    insert_expense_at(&db, &test_date(3), "food", 25.0, None).await;
    insert_expense_at(&db, &test_date(4), "food", 35.0, None).await;

    let summary = repository::get_summary(&db)
        .await
        .expect("Failed to compute summary");

    let categories: Vec<&str> = summary.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, ["rent", "food", "coffee"]);

    for pair in summary.windows(2) {
        assert!(pair[0].amount >= pair[1].amount);
    }
}

#[tokio::test]
async fn summary_reflects_deletes() {
    let (db, _temp_dir) = setup_test_db().await;

    insert_expense_at(&db, &test_date(1), "food", 10.0, None).await;
    let removed = insert_expense_at(&db, &test_date(2), "food", 30.0, None).await;

    repository::delete_expense(&db, removed)
        .await
        .expect("Failed to delete expense");

    let summary = repository::get_summary(&db)
        .await
        .expect("Failed to compute summary");

    assert_eq!(summary.len(), 1);
    assert!((summary[0].amount - 10.0).abs() < FLOAT_TOLERANCE);
    assert_eq!(summary[0].count, 1);
    assert!((summary[0].average_bill - 10.0).abs() < FLOAT_TOLERANCE);
}

#[tokio::test]
async fn summary_counts_every_category_exactly_once() {
    let (db, _temp_dir) = setup_test_db().await;

    for i in 0..12 {
        let category = format!("category_{}", i % 4);
        insert_expense_at(&db, &test_date(i), &category, 1.0 + f64::from(i), None).await;
    }

    let summary = repository::get_summary(&db)
        .await
        .expect("Failed to compute summary");

    assert_eq!(summary.len(), 4);
    let total_count: i64 = summary.iter().map(|s| s.count).sum();
    assert_eq!(total_count, 12);
}
