use serde::{Deserialize, Serialize};

/// A published recipe as stored in the document store.
///
/// Field names on the wire keep the original schema (`postURL`, `imageUrl`,
/// `postTags`, `postedOn`). `posted_on` is a display string, not a structured
/// date; recipes only order by insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(rename = "postURL")]
    pub post_url: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "postTags")]
    pub post_tags: Vec<String>,
    pub summary: String,
    pub content: String,
    #[serde(rename = "postedOn")]
    pub posted_on: String,
}

/// All recipe fields except the store-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    #[serde(rename = "postURL")]
    pub post_url: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "postTags")]
    pub post_tags: Vec<String>,
    pub summary: String,
    pub content: String,
    #[serde(rename = "postedOn")]
    pub posted_on: String,
}

/// Form payload for POST /write-recipes.
#[derive(Debug, Deserialize)]
pub struct WriteRecipeForm {
    #[serde(rename = "recipeTitle")]
    pub title: String,
    #[serde(rename = "recipeImageUrl", default)]
    pub image_url: String,
    #[serde(rename = "dishTags", default)]
    pub tags: String,
    #[serde(rename = "recipeSummary", default)]
    pub summary: String,
    #[serde(rename = "recipeContent", default)]
    pub content: String,
}

/// Form payload for POST /update-recipe. The target id rides in the submit
/// button value, matching the edit form markup.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeForm {
    #[serde(rename = "submitBtn")]
    pub id: String,
    #[serde(rename = "dishTitle")]
    pub title: String,
    #[serde(rename = "dishLink", default)]
    pub image_url: String,
    #[serde(rename = "dishTags", default)]
    pub tags: String,
    #[serde(rename = "dishSummary", default)]
    pub summary: String,
    #[serde(rename = "dishContent", default)]
    pub content: String,
}

/// Form payload for POST /delete-recipe.
#[derive(Debug, Deserialize)]
pub struct DeleteRecipeForm {
    #[serde(rename = "recipeDeleteItem")]
    pub id: String,
}

/// Form payload for POST /login and POST /register.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Query string for the search pages.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
