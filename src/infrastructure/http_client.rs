use reqwest::{Client, ClientBuilder, Error};

/// Stable product token sent with every avatar service request.
pub const APP_USER_AGENT: &str = concat!("AvatarWidget/", env!("CARGO_PKG_VERSION"));

pub fn apply_default_user_agent(builder: ClientBuilder) -> ClientBuilder {
    builder.user_agent(APP_USER_AGENT)
}

/// Build the shared client. No request timeout is set: a request resolves
/// only when the transport or the service does.
pub fn build_http_client(builder: ClientBuilder) -> Result<Client, Error> {
    apply_default_user_agent(builder).build()
}
