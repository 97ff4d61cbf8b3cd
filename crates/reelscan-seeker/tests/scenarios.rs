//! Concrete search and sort scenarios over catalog-shaped records.

use reelscan_seeker::{merge_sort, search, sort, Dir, FieldValue, Query, Record, SeekerError};

// ============================================================================
// Fixtures
// ============================================================================

fn id_of(record: &Record) -> i64 {
    record
        .get("id")
        .and_then(FieldValue::as_integer)
        .unwrap_or(-1)
}

fn year_of(record: &Record) -> i64 {
    record
        .get("release_year")
        .and_then(FieldValue::as_integer)
        .unwrap_or(-1)
}

fn title_of(record: &Record) -> String {
    record.get("title").map(|v| v.to_string()).unwrap_or_default()
}

fn years_catalog() -> Vec<Record> {
    [2015, 2019, 2015, 2021, 2010]
        .iter()
        .zip(1..)
        .map(|(&year, id)| {
            Record::new()
                .with("id", id)
                .with("release_year", year)
                .with("title", format!("Title {id}"))
        })
        .collect()
}

fn titles_catalog() -> Vec<Record> {
    [
        "Spider-Man: Into the Spider-Verse",
        "The Two Popes",
        "MANHUNT",
        "Roman Holiday",
        "Okja",
        "Batman: The Killing Joke",
    ]
    .iter()
    .zip(1..)
    .map(|(&title, id)| {
        Record::new()
            .with("id", id)
            .with("title", title)
            .with("type", "Movie")
    })
    .collect()
}

// ============================================================================
// Sorter
// ============================================================================

#[test]
fn release_years_descending_keep_tied_order() {
    let sorted = merge_sort(years_catalog(), "release_year", Dir::Desc).unwrap();

    let years: Vec<i64> = sorted.iter().map(year_of).collect();
    let ids: Vec<i64> = sorted.iter().map(id_of).collect();

    assert_eq!(years, vec![2021, 2019, 2015, 2015, 2010]);
    assert_eq!(ids, vec![4, 2, 1, 3, 5]);
}

#[test]
fn stability_example() {
    let input: Vec<Record> = [(1, 5), (2, 3), (3, 3)]
        .iter()
        .map(|&(id, k)| Record::new().with("id", id).with("k", k))
        .collect();

    let sorted = merge_sort(input, "k", Dir::Asc).unwrap();
    let ids: Vec<i64> = sorted.iter().map(id_of).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn sorting_sorted_input_is_identity() {
    let once = merge_sort(years_catalog(), "release_year", Dir::Asc).unwrap();
    let twice = merge_sort(once.clone(), "release_year", Dir::Asc).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn base_cases() {
    let empty: Vec<Record> = Vec::new();
    assert_eq!(merge_sort(empty, "title", Dir::Asc).unwrap(), Vec::<Record>::new());

    let single = vec![Record::new().with("title", "Klaus")];
    assert_eq!(merge_sort(single.clone(), "title", Dir::Asc).unwrap(), single);

    // A lone record is never compared, so its keys are never read.
    let keyless = vec![Record::new().with("id", 1)];
    let sorted = sort(&keyless, "release_year", false).unwrap();
    assert_eq!(sorted, vec![&keyless[0]]);
}

#[test]
fn sort_reports_null_keys_as_unordered() {
    let catalog = vec![
        Record::new().with("id", 1).with("rating", FieldValue::Null),
        Record::new().with("id", 2).with("rating", FieldValue::Null),
    ];
    assert!(matches!(
        sort(&catalog, "rating", false),
        Err(SeekerError::Incomparable { .. })
    ));
}

#[test]
fn sort_reports_missing_key_instead_of_panicking() {
    let mut catalog = years_catalog();
    catalog.push(Record::new().with("id", 6).with("title", "Untitled"));

    let err = sort(&catalog, "release_year", false).unwrap_err();
    assert_eq!(
        err,
        SeekerError::MissingField {
            field: "release_year".to_string(),
            index: 5,
        }
    );
}

#[test]
fn sort_reports_uncoerced_year_strings() {
    let mut catalog = years_catalog();
    catalog.push(Record::new().with("id", 6).with("release_year", "2020"));

    let err = sort(&catalog, "release_year", true).unwrap_err();
    assert!(matches!(
        err,
        SeekerError::MixedTypes {
            expected: "number",
            found: "text",
            index: 5,
            ..
        }
    ));
}

// ============================================================================
// Matcher
// ============================================================================

#[test]
fn empty_query_returns_collection_unchanged() {
    let catalog = titles_catalog();
    let hits = search(&catalog, "title", "");
    let expected: Vec<&Record> = catalog.iter().collect();
    assert_eq!(hits, expected);
}

#[test]
fn no_match_is_an_empty_result() {
    let catalog = titles_catalog();
    assert!(search(&catalog, "title", "zzz").is_empty());
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn search_then_sort_titles() {
    let catalog = titles_catalog();
    let hits = search(&catalog, "title", "man");
    let sorted = sort(&hits, "title", false).unwrap();

    let titles: Vec<String> = sorted.iter().map(|r| title_of(r)).collect();
    assert_eq!(
        titles,
        vec![
            "Batman: The Killing Joke",
            "MANHUNT",
            "Roman Holiday",
            "Spider-Man: Into the Spider-Verse",
        ]
    );
    for title in &titles {
        assert!(title.to_lowercase().contains("man"));
    }
}

#[test]
fn query_matches_manual_composition() {
    let catalog = titles_catalog();

    let manual: Vec<i64> = {
        let hits = search(&catalog, "title", "man");
        sort(&hits, "title", true)
            .unwrap()
            .into_iter()
            .map(|r| id_of(r))
            .collect()
    };

    let via_query: Vec<i64> = Query::new()
        .search("title", "man")
        .order_desc("title")
        .run(&catalog)
        .unwrap()
        .into_iter()
        .map(id_of)
        .collect();

    assert_eq!(manual, via_query);
}
