// Presentation layer - the widget state machine and the surfaces it drives
pub mod avatar_widget;
pub mod link_guard;
pub mod messages;
pub mod terminal_view;
pub mod view;
