mod api;
mod header;
mod models;
mod pages;
mod state;

use header::Header;
use pages::{CreatePost, EditPost, Home, PostPage};
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/create")]
    Create,
    #[at("/post/:id")]
    Post { id: i64 },
    #[at("/edit/:id")]
    Edit { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Create => html! { <CreatePost /> },
        Route::Post { id } => html! { <PostPage {id} /> },
        Route::Edit { id } => html! { <EditPost {id} /> },
        Route::NotFound => html! { <p class="not-found">{ "Page not found." }</p> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Header />
            <div class="container">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Panic handler
    console_error_panic_hook::set_once();

    // Logging
    #[cfg(debug_assertions)]
    console_log::init_with_level(log::Level::Debug).unwrap_or_else(|e| {
        web_sys::console::log_1(&format!("Failed to init logger: {}", e).into());
    });

    yew::Renderer::<App>::new().render();

    Ok(())
}
