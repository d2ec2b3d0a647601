use crate::domain::models::link::is_external_link;
use crate::presentation::messages::LEAVE_SITE_CONFIRM;
use crate::presentation::view::Prompt;

/// What to do with an intercepted click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Cancelled,
}

/// Asks for confirmation before following links that leave the site
#[derive(Debug, Clone)]
pub struct LinkGuard {
    message: String,
}

impl Default for LinkGuard {
    fn default() -> Self {
        Self::new(LEAVE_SITE_CONFIRM)
    }
}

impl LinkGuard {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn on_click<P>(&self, href: &str, prompt: &P) -> Navigation
    where
        P: Prompt + ?Sized,
    {
        if !is_external_link(href) {
            return Navigation::Proceed;
        }

        if prompt.confirm(&self.message) {
            tracing::debug!("Leaving site for {}", href);
            Navigation::Proceed
        } else {
            tracing::debug!("Navigation to {} cancelled", href);
            Navigation::Cancelled
        }
    }
}
