use std::sync::Arc;

use reqwest::Client;

use crate::application::services::avatar_service::AvatarService;
use crate::domain::errors::DomainError;
use crate::domain::repositories::avatar_repository::AvatarRepository;
use crate::infrastructure::apis::http_avatar_repository::HttpAvatarRepository;
use crate::infrastructure::config::WidgetConfig;
use crate::infrastructure::http_client::build_http_client;
use crate::presentation::avatar_widget::AvatarWidget;
use crate::presentation::link_guard::LinkGuard;
use crate::presentation::view::WidgetView;

pub(super) struct AppServices {
    pub avatar_widget: Arc<AvatarWidget>,
    pub link_guard: LinkGuard,
}

pub(super) fn build_services(
    config: &WidgetConfig,
    view: Arc<dyn WidgetView>,
) -> Result<AppServices, DomainError> {
    let avatar_repository = build_avatar_repository(config)?;
    let avatar_service = Arc::new(AvatarService::new(avatar_repository, config.user_id()?));
    let mut avatar_widget =
        AvatarWidget::new(avatar_service, view, config.default_avatar_path.clone());
    if let Some(url) = &config.current_avatar {
        avatar_widget = avatar_widget.with_current_avatar(url.clone());
    }

    Ok(AppServices {
        avatar_widget: Arc::new(avatar_widget),
        link_guard: LinkGuard::default(),
    })
}

fn build_avatar_repository(
    config: &WidgetConfig,
) -> Result<Arc<dyn AvatarRepository>, DomainError> {
    let client = build_http_client(Client::builder()).map_err(|error| {
        DomainError::InternalError(format!("Failed to build HTTP client: {error}"))
    })?;

    Ok(Arc::new(HttpAvatarRepository::new(
        client,
        config.base_url.clone(),
    )))
}
