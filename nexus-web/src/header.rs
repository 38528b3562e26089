use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="app-header">
            <h1 class="app-brand">
                <Link<Route> to={Route::Home}>{ "OctaneNexus" }</Link<Route>>
            </h1>
            <nav class="app-nav">
                <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                <Link<Route> to={Route::Create}>{ "Create Post" }</Link<Route>>
            </nav>
        </header>
    }
}
