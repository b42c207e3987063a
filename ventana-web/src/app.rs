#[cfg(target_arch = "wasm32")]
use crate::pages::{
    landing::LandingPage, not_found::NotFound, quiz::QuizPage, result::ResultPage,
};
#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
fn switch(route: Route) -> Html {
    log::debug!("routing to {route:?}");
    match route {
        Route::Home => html! { <LandingPage /> },
        Route::Chat => html! { <QuizPage /> },
        Route::Result => html! { <ResultPage /> },
        Route::NotFound => html! { <NotFoundRoute /> },
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(NotFoundRoute)]
fn not_found_route() -> Html {
    let navigator = use_navigator();
    let on_go_home = Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    });
    html! { <NotFound {on_go_home} /> }
}
