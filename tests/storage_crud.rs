use adobo_bacon::models::RecipeDraft;
use adobo_bacon::seed::default_recipes;
use adobo_bacon::storage::{RecipeStorage, StorageError};
use tempfile::TempDir;

fn draft(title: &str, slug: &str, tags: &[&str]) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        post_url: slug.to_string(),
        image_url: "https://example.com/dish.jpg".to_string(),
        post_tags: tags.iter().map(|t| t.to_string()).collect(),
        summary: "A short description of what the dish is about".to_string(),
        content: "Sear, rest, serve.".to_string(),
        posted_on: "September 12, 2020".to_string(),
    }
}

fn open_store(dir: &TempDir) -> RecipeStorage {
    RecipeStorage::open(dir.path().join("recipes.json")).unwrap()
}

#[tokio::test]
async fn insert_then_find_by_slug_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let inserted = store
        .insert(draft("Steak Dinner", "steak-dinner", &["Dinner", "Easy"]))
        .await
        .unwrap();
    assert!(!inserted.id.is_empty());

    let found = store.find_by_slug("steak-dinner").await.unwrap().unwrap();
    assert_eq!(found.id, inserted.id);
    assert_eq!(found.title, "Steak Dinner");
    assert_eq!(found.post_tags, vec!["Dinner", "Easy"]);
    assert_eq!(found.summary, inserted.summary);
    assert_eq!(found.content, inserted.content);
    assert_eq!(found.posted_on, inserted.posted_on);
}

#[tokio::test]
async fn insert_rejects_empty_title() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let err = store.insert(draft("  ", "empty", &[])).await.unwrap_err();
    assert!(matches!(err, StorageError::ValidationFailed(_)));
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn list_recent_is_reverse_insertion_order_with_limit() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    for n in 1..=6 {
        store
            .insert(draft(&format!("Dish {n}"), &format!("dish-{n}"), &[]))
            .await
            .unwrap();
    }

    let recent = store.list_recent(4).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Dish 6", "Dish 5", "Dish 4", "Dish 3"]);

    assert!(store.list_recent(4).await.unwrap().len() <= 4);
    assert_eq!(store.list_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn list_recent_on_empty_store_is_empty_not_an_error() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    assert!(store.list_recent(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_slugs_resolve_to_lowest_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let first = store
        .insert(draft("Adobo", "adobo", &["classic"]))
        .await
        .unwrap();
    store
        .insert(draft("Adobo", "adobo", &["remake"]))
        .await
        .unwrap();

    let found = store.find_by_slug("adobo").await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn find_by_tag_is_exact_and_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store
        .insert(draft("Steak Night", "steak-night", &["Dinner", "Easy"]))
        .await
        .unwrap();
    store
        .insert(draft("Morning Eggs", "morning-eggs", &["Breakfast"]))
        .await
        .unwrap();

    let dinner = store.find_by_tag("Dinner").await.unwrap();
    assert_eq!(dinner.len(), 1);
    assert_eq!(dinner[0].title, "Steak Night");

    assert!(store.find_by_tag("dinner").await.unwrap().is_empty());
    assert!(store.find_by_tag("Dinn").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_any_token_across_fields() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store
        .insert(draft("Steak Night", "steak-night", &[]))
        .await
        .unwrap();
    store
        .insert(draft("Garlic Rice", "garlic-rice", &[]))
        .await
        .unwrap();

    let hits = store.search("STEAK").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Steak Night");

    // Both recipes share the seeded summary text, so a summary word hits both.
    assert_eq!(store.search("description").await.unwrap().len(), 2);

    // OR semantics across tokens.
    assert_eq!(store.search("garlic zzz").await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_search_query_returns_nothing() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store
        .insert(draft("Steak Night", "steak-night", &[]))
        .await
        .unwrap();

    assert!(store.search("").await.unwrap().is_empty());
    assert!(store.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_every_field_except_id() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let original = store
        .insert(draft("Steak Dinner", "steak-dinner", &["Dinner"]))
        .await
        .unwrap();

    let updated = store
        .update_by_id(
            &original.id,
            draft("Steak Night", "steak-night", &["Dinner", "Date"]),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "Steak Night");
    assert_eq!(updated.post_url, "steak-night");
    assert_eq!(updated.post_tags, vec!["Dinner", "Date"]);

    assert!(store.find_by_slug("steak-dinner").await.unwrap().is_none());
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let err = store
        .update_by_id("no-such-id", draft("X", "x", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn double_delete_reports_not_found_without_breaking_the_flow() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let recipe = store
        .insert(draft("Steak Dinner", "steak-dinner", &[]))
        .await
        .unwrap();

    store.delete_by_id(&recipe.id).await.unwrap();
    let err = store.delete_by_id(&recipe.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    // The store keeps working after the repeated delete.
    assert!(store.is_empty().await.unwrap());
    store
        .insert(draft("Garlic Rice", "garlic-rice", &[]))
        .await
        .unwrap();
    assert_eq!(store.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn seeding_fills_an_empty_store_exactly_once() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let seeds = default_recipes();

    assert!(store.is_empty().await.unwrap());
    assert!(store.insert_defaults_if_empty(&seeds).await.unwrap());
    assert!(!store.is_empty().await.unwrap());
    assert_eq!(store.count_all().await.unwrap(), 3);

    // A second pass sees a non-empty store and does nothing.
    assert!(!store.insert_defaults_if_empty(&seeds).await.unwrap());
    assert_eq!(store.count_all().await.unwrap(), 3);

    let recent = store.list_recent(4).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].title, "Test 3");
    assert_eq!(recent[2].title, "Test 1");

    assert_eq!(store.find_by_tag("test").await.unwrap().len(), 3);
}

#[tokio::test]
async fn recipes_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.json");

    {
        let store = RecipeStorage::open(&path).unwrap();
        store
            .insert(draft("Steak Dinner", "steak-dinner", &["Dinner"]))
            .await
            .unwrap();
    }

    let reopened = RecipeStorage::open(&path).unwrap();
    let found = reopened.find_by_slug("steak-dinner").await.unwrap().unwrap();
    assert_eq!(found.title, "Steak Dinner");
}
