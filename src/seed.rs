use crate::models::RecipeDraft;

const SEED_IMAGE_URL: &str = "https://i.imgur.com/CGWX5LO.jpg";

/// The three default recipes inserted when the collection is found empty.
///
/// Built fresh per call and held as an immutable value on the app state, so
/// nothing can mutate the seed content after startup.
pub fn default_recipes() -> Vec<RecipeDraft> {
    (1..=3)
        .map(|n| RecipeDraft {
            title: format!("Test {n}"),
            post_url: format!("test-{n}"),
            image_url: SEED_IMAGE_URL.to_string(),
            post_tags: vec!["test".to_string(), format!("test-{n}")],
            summary: "A short description of what the dish is about".to_string(),
            content: "This is just a test.".to_string(),
            posted_on: "2020-09-12".to_string(),
        })
        .collect()
}
