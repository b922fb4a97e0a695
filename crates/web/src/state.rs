use services::AppServices;

/// Shared handler state; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    services: AppServices,
}

impl AppState {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }
}
