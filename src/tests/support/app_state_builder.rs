use crate::auth::application::use_cases::{
    fetch_current_user::IFetchCurrentUserUseCase, login_user::ILoginUserUseCase,
    refresh_token::IRefreshTokenUseCase, register_user::IRegisterUserUseCase,
};
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    register_user: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    refresh_token: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    fetch_current_user: Arc<dyn IFetchCurrentUserUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user: Arc::new(StubRegisterUserUseCase::success()),
            login_user: Arc::new(StubLoginUserUseCase::success()),
            refresh_token: Arc::new(StubRefreshTokenUseCase::success()),
            fetch_current_user: Arc::new(StubFetchCurrentUserUseCase::success()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.register_user = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(
        mut self,
        uc: impl IRefreshTokenUseCase + Send + Sync + 'static,
    ) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_fetch_current_user(
        mut self,
        uc: impl IFetchCurrentUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.fetch_current_user = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_use_case: self.register_user,
            login_user_use_case: self.login_user,
            refresh_token_use_case: self.refresh_token,
            fetch_current_user_use_case: self.fetch_current_user,
        })
    }
}
