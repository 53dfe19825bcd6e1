use crate::error::AppError;
use crate::models::{
    CredentialsForm, DeleteRecipeForm, RecipeDraft, SearchQuery, UpdateRecipeForm, WriteRecipeForm,
};
use crate::normalize;
use crate::render::View;
use crate::sessions::{
    clear_session_cookie, session_cookie, token_from_headers, SessionData, SessionStore,
};
use crate::storage::{RecipeStorage, StorageError};
use crate::user_storage::UserStorage;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const HOME_RECIPE_LIMIT: usize = 4;
const LISTING_RECIPE_LIMIT: usize = 5;

/// Shared application state: the two stores, the session store, and the
/// immutable seed content.
pub struct AppState {
    pub recipes: RecipeStorage,
    pub users: UserStorage,
    pub sessions: SessionStore,
    pub seeds: Vec<RecipeDraft>,
}

/// Visibility gate for the admin GET routes.
///
/// Resolves the session cookie against the session store; anything short of
/// an authenticated session rejects with a redirect to `/login`. Only the
/// presence of an authenticated session is checked, never a role attribute.
pub struct AdminSession {
    pub token: String,
    pub session: SessionData,
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Err(AppError::Unauthorized);
        };

        match state.sessions.get(&token).await {
            Some(session) if session.is_authenticated() => Ok(AdminSession { token, session }),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Builds the full route table.
///
/// The three mutating POST routes (`/write-recipes`, `/update-recipe`,
/// `/delete-recipe`) carry no session gate while their admin GET counterparts
/// do; that gap is preserved deliberately (see DESIGN.md).
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/recipes", get(recipes_listing))
        .route("/about", get(about))
        .route("/recipe/:slug", get(recipe_detail))
        .route("/tags/:tag", get(recipes_by_tag))
        .route("/search", get(search))
        .route("/admin/recipes-list", get(admin_recipes_list))
        .route("/admin/write-recipes", get(admin_write_recipes))
        .route("/admin/recipe/:slug", get(admin_recipe_detail))
        .route("/admin/update-recipe/:slug", get(admin_update_recipe))
        .route("/admin-search", get(admin_search))
        .route("/write-recipes", post(write_recipe))
        .route("/update-recipe", post(update_recipe))
        .route("/delete-recipe", post(delete_recipe))
        .route("/register", get(register_page).post(register_submit))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Public routes

async fn home(State(state): State<Arc<AppState>>) -> Result<View, AppError> {
    let recipes = state.recipes.list_recent(HOME_RECIPE_LIMIT).await?;
    Ok(View::new("home").with("recipes", recipes))
}

async fn recipes_listing(State(state): State<Arc<AppState>>) -> Result<View, AppError> {
    let recipes = state.recipes.list_recent(LISTING_RECIPE_LIMIT).await?;
    Ok(View::new("recipes").with("recipes", recipes))
}

async fn about() -> View {
    View::new("about")
}

async fn recipe_detail(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let recipe = state
        .recipes
        .find_by_slug(&slug)
        .await?
        .ok_or(StorageError::NotFound(slug))?;
    Ok(View::new("recipe").with("recipeDetail", recipe))
}

async fn recipes_by_tag(
    Path(tag): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let recipes = state.recipes.find_by_tag(&tag).await?;
    Ok(View::new("tags").with("tag", tag).with("recipes", recipes))
}

async fn search(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let recipes = state.recipes.search(&query.q).await?;
    Ok(View::new("search")
        .with("query", query.q)
        .with("recipes", recipes))
}

// Admin routes

async fn admin_recipes_list(
    admin: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let seeded = state.recipes.insert_defaults_if_empty(&state.seeds).await?;
    if seeded {
        tracing::info!("saved default recipes into the empty collection");
    }

    let recipes = state.recipes.list_all().await?;
    let messages = state.sessions.take_flash(&admin.token).await;
    Ok(View::new("admin/recipes-list")
        .with("recipe", recipes)
        .with("messages", messages))
}

async fn admin_write_recipes(admin: AdminSession, State(state): State<Arc<AppState>>) -> View {
    let messages = state.sessions.take_flash(&admin.token).await;
    View::new("admin/write-recipes").with("messages", messages)
}

async fn admin_recipe_detail(
    _admin: AdminSession,
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let recipe = state
        .recipes
        .find_by_slug(&slug)
        .await?
        .ok_or(StorageError::NotFound(slug))?;
    Ok(View::new("admin/recipe").with("recipeDetail", recipe))
}

async fn admin_update_recipe(
    _admin: AdminSession,
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    tracing::debug!(%slug, "recipe to update");

    match state.recipes.find_by_slug(&slug).await? {
        Some(recipe) => Ok(View::new("admin/update-recipe")
            .with("recipe", recipe)
            .into_response()),
        None => Ok(Redirect::to("/admin/write-recipes").into_response()),
    }
}

async fn admin_search(
    _admin: AdminSession,
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<View, AppError> {
    let recipes = state.recipes.search(&query.q).await?;
    Ok(View::new("admin/search")
        .with("query", query.q)
        .with("recipes", recipes))
}

// Form posts

async fn write_recipe(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<WriteRecipeForm>,
) -> Response {
    let draft = RecipeDraft {
        post_url: normalize::slugify(&form.title),
        post_tags: normalize::split_tags(&form.tags),
        posted_on: normalize::format_date_now(),
        title: form.title,
        image_url: form.image_url,
        summary: form.summary,
        content: form.content,
    };

    match state.recipes.insert(draft).await {
        Ok(recipe) => {
            tracing::info!(id = %recipe.id, slug = %recipe.post_url, "recipe created");
            flash_redirect(
                &state,
                &headers,
                "info",
                "New Recipe added successfully!",
                "/admin/recipes-list",
            )
            .await
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to save recipe");
            flash_redirect(
                &state,
                &headers,
                "error",
                "Could not save the recipe.",
                "/admin/recipes-list",
            )
            .await
        }
    }
}

async fn update_recipe(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<UpdateRecipeForm>,
) -> Response {
    // The slug is recomputed from the submitted title so it can never drift
    // from the title shown on the page.
    let draft = RecipeDraft {
        post_url: normalize::slugify(&form.title),
        post_tags: normalize::split_tags(&form.tags),
        posted_on: normalize::format_date_now(),
        title: form.title,
        image_url: form.image_url,
        summary: form.summary,
        content: form.content,
    };

    match state.recipes.update_by_id(&form.id, draft).await {
        Ok(recipe) => {
            tracing::info!(id = %recipe.id, "recipe updated");
            flash_redirect(
                &state,
                &headers,
                "success",
                "Recipe updated successfully!",
                "/admin/recipes-list",
            )
            .await
        }
        Err(err) => {
            tracing::error!(error = %err, id = %form.id, "error updating recipe");
            flash_redirect(
                &state,
                &headers,
                "error",
                "Could not update the recipe.",
                "/admin/recipes-list",
            )
            .await
        }
    }
}

async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteRecipeForm>,
) -> Response {
    match state.recipes.delete_by_id(&form.id).await {
        Ok(()) => {
            tracing::info!(id = %form.id, "recipe deleted");
        }
        // Deleting an already-deleted recipe is a no-op for the caller.
        Err(StorageError::NotFound(_)) => {
            tracing::warn!(id = %form.id, "delete target already gone");
        }
        Err(err) => return AppError::from(err).into_response(),
    }

    Redirect::to("/admin/recipes-list").into_response()
}

// Authentication

async fn register_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> View {
    let messages = flash_for_request(&state, &headers).await;
    View::new("auth/register").with("messages", messages)
}

async fn register_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.users.register(&form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "user registered");
            let token = state.sessions.create_authenticated(&user).await;
            state
                .sessions
                .flash(&token, "info", "Registered successfully!")
                .await;
            redirect_with_session(&token, "/admin/recipes-list")
        }
        Err(err) => {
            tracing::warn!(error = %err, username = %form.username, "registration failed");
            flash_redirect(&state, &headers, "error", "Registration failed!", "/register").await
        }
    }
}

async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> View {
    let messages = flash_for_request(&state, &headers).await;
    View::new("auth/login").with("messages", messages)
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state
        .users
        .verify_login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(username = %user.username, "login succeeded");
            let token = state.sessions.create_authenticated(&user).await;
            state.sessions.flash(&token, "success", "Welcome back!").await;
            redirect_with_session(&token, "/admin/recipes-list")
        }
        Err(err) => {
            tracing::warn!(error = %err, username = %form.username, "login failed");
            flash_redirect(
                &state,
                &headers,
                "error",
                "Invalid username or password.",
                "/login",
            )
            .await
        }
    }
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.destroy(&token).await;
    }

    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/")).into_response()
}

// Fallbacks and helpers

async fn not_found() -> View {
    View::new("errors/404").status(StatusCode::NOT_FOUND)
}

fn redirect_with_session(token: &str, to: &str) -> Response {
    ([(SET_COOKIE, session_cookie(token))], Redirect::to(to)).into_response()
}

/// Queues a flash message and redirects, creating an anonymous session for
/// the message when the request carries no live one.
async fn flash_redirect(
    state: &AppState,
    headers: &HeaderMap,
    category: &str,
    message: &str,
    to: &str,
) -> Response {
    let live_token = match token_from_headers(headers) {
        Some(token) if state.sessions.get(&token).await.is_some() => Some(token),
        _ => None,
    };

    match live_token {
        Some(token) => {
            state.sessions.flash(&token, category, message).await;
            Redirect::to(to).into_response()
        }
        None => {
            let token = state.sessions.create_anonymous().await;
            state.sessions.flash(&token, category, message).await;
            redirect_with_session(&token, to)
        }
    }
}

/// Drains flash messages for the request's session, if it has one.
async fn flash_for_request(
    state: &AppState,
    headers: &HeaderMap,
) -> Vec<crate::sessions::FlashMessage> {
    match token_from_headers(headers) {
        Some(token) => state.sessions.take_flash(&token).await,
        None => Vec::new(),
    }
}
