//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use solarspark_core::Category;
use tracing::instrument;

use crate::filters;
use crate::middleware::{PageChrome, ShopperCart};
use crate::routes::products::{CategoryLink, ProductCardView};
use crate::state::AppState;

/// How many featured products the home page shows.
const FEATURED_ON_HOME: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<CategoryLink>,
}

/// Display home page.
#[instrument(skip(state, cart))]
pub async fn home(State(state): State<AppState>, cart: ShopperCart) -> impl IntoResponse {
    let featured = state
        .catalog()
        .featured()
        .into_iter()
        .take(FEATURED_ON_HOME)
        .map(ProductCardView::from)
        .collect();

    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryLink::new(category.slug(), category.label(), false))
        .collect();

    HomeTemplate {
        chrome: cart.chrome().await,
        featured,
        categories,
    }
}
