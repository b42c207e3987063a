pub mod countdown_bar;
pub mod diagnosis;
pub mod embed_error;
pub mod loading_panel;
pub mod offer;
pub mod stepper;
pub mod sticky_footer;
pub mod urgency_window;
pub mod video;
