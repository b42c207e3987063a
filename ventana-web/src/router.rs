use ventana_core::Page;
use yew_router::prelude::*;

#[derive(Clone, Copy, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/chat")]
    Chat,
    #[at("/resultado")]
    Result,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_page(page: Page) -> Self {
        match page {
            Page::Landing => Self::Home,
            Page::Chat => Self::Chat,
            Page::Result => Self::Result,
        }
    }

    #[must_use]
    pub const fn page(self) -> Option<Page> {
        match self {
            Self::Home => Some(Page::Landing),
            Self::Chat => Some(Page::Chat),
            Self::Result => Some(Page::Result),
            Self::NotFound => None,
        }
    }
}
