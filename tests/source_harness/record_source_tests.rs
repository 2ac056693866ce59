//! Macro-generated test suite for `RecordSource<Document>` contract validation.
//!
//! The `record_source_tests!` macro generates a test module that validates
//! any `RecordSource<Document>` seeded with `mock_documents(50)` against the
//! list pipeline contract: stage order, AND filtering, stable sorting,
//! pagination past the end and single-record lookup.
//!
//! # Generated Tests
//!
//! ## Filter
//! - `test_draft_scenario` — eq filter, ascending ids, totals of the filtered set
//! - `test_filters_combine_with_and` — two clauses, intersection only
//! - `test_numeric_comparison` — gt on a number field
//! - `test_in_matches_array_members` — in on the tags array
//! - `test_contains_ignores_case` — contains on a text field
//! - `test_vacuous_clause_is_ignored` — clause without operator keeps everything
//!
//! ## Search
//! - `test_search_is_case_insensitive_or` — term found in any search field
//! - `test_search_then_filter` — search and filters compose
//!
//! ## Sort
//! - `test_sort_ties_keep_input_order` — stable in both directions
//! - `test_sort_descending_numbers` — non-increasing sizes
//!
//! ## Paginate
//! - `test_page_past_end_is_empty` — empty data, totals unchanged
//! - `test_pages_partition_filtered_set` — concatenated pages equal the whole
//!
//! ## Lookup
//! - `test_fetch_one` — present and absent IDs

/// Generate a full `RecordSource<Document>` conformance test suite.
///
/// `$factory` must evaluate to a fresh source seeded with
/// `mock_documents(50)`. It is re-evaluated for each test.
#[macro_export]
macro_rules! record_source_tests {
    ($suite:ident, $factory:expr) => {
        mod $suite {
            use super::*;
            use listview::prelude::*;

            #[tokio::test]
            async fn test_draft_scenario() {
                let source = $factory;
                let state = filtered(vec![FilterClause::new("status", Operator::Eq, "Draft")]);
                let page = source.fetch_page(&state).await.unwrap();

                assert_eq!(page.data.len(), 10);
                assert!(page.data.iter().all(|d| d.status == "Draft"));
                assert_eq!(ids(&page), vec![1, 5, 9, 13, 17, 21, 25, 29, 33, 37]);
                assert_eq!(page.pagination.total_records, 13);
                assert_eq!(page.pagination.total_pages, 2);
                assert!(page.pagination.has_next);
                assert!(!page.pagination.has_prev);
            }

            #[tokio::test]
            async fn test_filters_combine_with_and() {
                let source = $factory;
                let state = filtered(vec![
                    FilterClause::new("status", Operator::Eq, "Draft"),
                    FilterClause::new("type", Operator::Eq, "PDF"),
                ]);
                let page = source.fetch_page(&state).await.unwrap();
                assert_eq!(ids(&page), vec![1, 21, 41]);
                assert_eq!(page.pagination.total_records, 3);
            }

            #[tokio::test]
            async fn test_numeric_comparison() {
                let source = $factory;
                let state = filtered(vec![FilterClause::new("size", Operator::Gt, 5000)])
                    .with_per_page(SEEDED);
                let page = source.fetch_page(&state).await.unwrap();

                let expected = mock_documents(SEEDED)
                    .iter()
                    .filter(|d| d.size > 5000)
                    .count();
                assert!(expected > 0);
                assert_eq!(page.pagination.total_records, expected);
                assert!(page.data.iter().all(|d| d.size > 5000));
            }

            #[tokio::test]
            async fn test_in_matches_array_members() {
                let source = $factory;
                let state = filtered(vec![FilterClause::new("tags", Operator::In, "Legal")])
                    .with_per_page(SEEDED);
                let page = source.fetch_page(&state).await.unwrap();

                assert!(!page.data.is_empty());
                assert!(page.data.iter().all(|d| d.tags.iter().any(|t| t == "Legal")));

                let scalar = filtered(vec![FilterClause::new("status", Operator::In, "Draft")]);
                let page = source.fetch_page(&scalar).await.unwrap();
                assert_eq!(page.pagination.total_records, 0);
            }

            #[tokio::test]
            async fn test_contains_ignores_case() {
                let source = $factory;
                let state = filtered(vec![FilterClause::new(
                    "created_by",
                    Operator::Contains,
                    "SMITH",
                )]);
                let page = source.fetch_page(&state).await.unwrap();
                assert_eq!(page.pagination.total_records, 13);
                assert!(page.data.iter().all(|d| d.created_by == "Jane Smith"));
            }

            #[tokio::test]
            async fn test_vacuous_clause_is_ignored() {
                let source = $factory;
                let draft = FilterClause {
                    key: "status".to_string(),
                    op: None,
                    value: Some("Draft".into()),
                };
                let page = source.fetch_page(&filtered(vec![draft])).await.unwrap();
                assert_eq!(page.pagination.total_records, SEEDED);
            }

            #[tokio::test]
            async fn test_search_is_case_insensitive_or() {
                let source = $factory;
                let state = QueryState::default().with_search("doe").with_per_page(SEEDED);
                let page = source.fetch_page(&state).await.unwrap();
                assert_eq!(page.pagination.total_records, 13);
                assert!(page.data.iter().all(|d| d.created_by == "John Doe"));

                let state = QueryState::default().with_search("DOCUMENT 1").with_per_page(SEEDED);
                let page = source.fetch_page(&state).await.unwrap();
                // Document 1 and Document 10..=19
                assert_eq!(page.pagination.total_records, 11);
            }

            #[tokio::test]
            async fn test_search_then_filter() {
                let source = $factory;
                let state = QueryState::default()
                    .with_search("doe")
                    .with_filters(vec![FilterClause::new("status", Operator::Eq, "Draft")]);
                let page = source.fetch_page(&state).await.unwrap();
                assert_eq!(page.pagination.total_records, 13);
                assert!(
                    page.data
                        .iter()
                        .all(|d| d.status == "Draft" && d.created_by == "John Doe")
                );
            }

            #[tokio::test]
            async fn test_sort_ties_keep_input_order() {
                let source = $factory;
                let asc = QueryState::default().with_sort(SortSpec::asc("status"));
                let page = source.fetch_page(&asc).await.unwrap();
                assert!(page.data.iter().all(|d| d.status == "Archived"));
                assert_eq!(ids(&page), vec![3, 7, 11, 15, 19, 23, 27, 31, 35, 39]);

                let desc = QueryState::default().with_sort(SortSpec::desc("status"));
                let page = source.fetch_page(&desc).await.unwrap();
                assert!(page.data.iter().all(|d| d.status == "Under Review"));
                assert_eq!(ids(&page), vec![4, 8, 12, 16, 20, 24, 28, 32, 36, 40]);
            }

            #[tokio::test]
            async fn test_sort_descending_numbers() {
                let source = $factory;
                let state = QueryState::default()
                    .with_sort(SortSpec::desc("size"))
                    .with_per_page(SEEDED);
                let page = source.fetch_page(&state).await.unwrap();
                assert_eq!(page.data.len(), SEEDED);
                assert!(page.data.windows(2).all(|w| w[0].size >= w[1].size));
            }

            #[tokio::test]
            async fn test_page_past_end_is_empty() {
                let source = $factory;
                let state = QueryState::default().with_page(99);
                let page = source.fetch_page(&state).await.unwrap();
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.current_page, 99);
                assert_eq!(page.pagination.total_records, SEEDED);
                assert_eq!(page.pagination.total_pages, 5);
                assert!(!page.pagination.has_next);
            }

            #[tokio::test]
            async fn test_pages_partition_filtered_set() {
                let source = $factory;
                let clauses = vec![FilterClause::new("status", Operator::Ne, "Archived")];
                let whole = source
                    .fetch_page(&filtered(clauses.clone()).with_per_page(SEEDED))
                    .await
                    .unwrap();

                let mut stitched = Vec::new();
                for page in 1..=whole.pagination.total_records.div_ceil(7) {
                    let state = filtered(clauses.clone()).with_per_page(7).with_page(page);
                    let part = source.fetch_page(&state).await.unwrap();
                    assert_eq!(part.pagination.total_records, whole.pagination.total_records);
                    stitched.extend(ids(&part));
                }
                assert_eq!(stitched, ids(&whole));
            }

            #[tokio::test]
            async fn test_fetch_one() {
                let source = $factory;
                let doc = source.fetch_one(7).await.unwrap().unwrap();
                assert_eq!(doc.title, "Document 7");
                assert!(source.fetch_one(999).await.unwrap().is_none());
            }
        }
    };
}
