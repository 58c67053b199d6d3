//! Wiring: one store, one session store and one API session per process,
//! shared by every use case and view model built from here.

use color_eyre::Result;
use std::sync::Arc;

use crate::api::{
  ApiSession, AuthorizationInterceptor, Interceptor, ReqwestTransport, RequestBuilder, Transport,
};
use crate::config::Config;
use crate::domain::cache::CacheLayer;
use crate::domain::usecases::{
  GetHerosUseCase, GetLocationsUseCase, GetTransformationUseCase, GetTransformationsUseCase,
  LoginUseCase, LogoutUseCase, SortHerosUseCase,
};
use crate::presentation::{
  HeroViewModel, HerosViewModel, LoginViewModel, SplashViewModel, TransformationViewModel,
};
use crate::session::{FileSessionStore, MemorySessionStore, SessionDataSource};
use crate::store::StoreDataProvider;

pub struct App {
  pub config: Config,
  pub store: Arc<StoreDataProvider>,
  pub session: Arc<dyn SessionDataSource>,
  pub api: ApiSession,
}

impl App {
  /// Open the configured store and session files.
  ///
  /// `ephemeral` keeps both in memory, so nothing outlives the process.
  pub fn new(config: Config, ephemeral: bool) -> Result<Self> {
    let (store, session): (StoreDataProvider, Arc<dyn SessionDataSource>) = if ephemeral {
      (
        StoreDataProvider::in_memory()?,
        Arc::new(MemorySessionStore::new()),
      )
    } else {
      let session = FileSessionStore::new(&config.session_dir()?);
      tracing::debug!(path = %session.path().display(), "Using session file");
      (
        StoreDataProvider::open(&config.database_path()?)?,
        Arc::new(session),
      )
    };

    Ok(Self::with_parts(
      config,
      Arc::new(store),
      session,
      Arc::new(ReqwestTransport::new()),
    ))
  }

  /// Assemble from explicit parts. The API session always carries the
  /// authorization interceptor bound to `session`.
  pub fn with_parts(
    config: Config,
    store: Arc<StoreDataProvider>,
    session: Arc<dyn SessionDataSource>,
    transport: Arc<dyn Transport>,
  ) -> Self {
    let interceptors: Vec<Box<dyn Interceptor>> =
      vec![Box::new(AuthorizationInterceptor::new(session.clone()))];
    let api = ApiSession::new(
      RequestBuilder::new(config.api.scheme.clone(), config.api.host.clone()),
      transport,
    )
    .with_interceptors(interceptors);

    Self {
      config,
      store,
      session,
      api,
    }
  }

  fn cache(&self) -> CacheLayer {
    CacheLayer::new(self.store.clone())
  }

  pub fn get_heros(&self) -> GetHerosUseCase {
    GetHerosUseCase::new(self.cache(), self.api.clone())
  }

  pub fn sort_heros(&self) -> SortHerosUseCase {
    SortHerosUseCase::new(self.cache())
  }

  pub fn get_transformations(&self) -> GetTransformationsUseCase {
    GetTransformationsUseCase::new(self.cache(), self.api.clone())
  }

  pub fn get_transformation(&self) -> GetTransformationUseCase {
    GetTransformationUseCase::new(self.cache())
  }

  pub fn get_locations(&self) -> GetLocationsUseCase {
    GetLocationsUseCase::new(self.cache(), self.api.clone())
  }

  pub fn login(&self) -> LoginUseCase {
    LoginUseCase::new(self.api.clone(), self.session.clone())
  }

  pub fn logout(&self) -> LogoutUseCase {
    LogoutUseCase::new(self.session.clone()).with_store(self.store.clone())
  }

  pub fn splash_view_model(&self) -> SplashViewModel {
    SplashViewModel::new(self.session.clone())
  }

  pub fn login_view_model(&self) -> LoginViewModel {
    LoginViewModel::new(Arc::new(self.login()))
  }

  pub fn heros_view_model(&self) -> HerosViewModel {
    HerosViewModel::new(Arc::new(self.get_heros()), Arc::new(self.sort_heros()))
  }

  pub fn transformation_view_model(&self) -> TransformationViewModel {
    TransformationViewModel::new(Arc::new(self.get_transformation()))
  }

  pub fn hero_view_model(&self) -> HeroViewModel {
    HeroViewModel::new(
      Arc::new(self.get_heros()),
      Arc::new(self.get_transformations()),
      Arc::new(self.get_locations()),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::testing::StubTransport;
  use crate::domain::usecases::{GetHeros, Logout};
  use crate::fixtures;
  use crate::presentation::{HeroState, LoginState, SplashState};

  fn app() -> (App, Arc<StubTransport>) {
    let transport = Arc::new(StubTransport::new());
    let app = App::with_parts(
      Config::default(),
      Arc::new(StoreDataProvider::in_memory().unwrap()),
      Arc::new(MemorySessionStore::new()),
      transport.clone(),
    );
    (app, transport)
  }

  #[tokio::test]
  async fn test_login_then_authorized_fetch() {
    let (app, transport) = app();
    assert_eq!(app.splash_view_model().state(), SplashState::Login);

    transport.push_body(200, b"jwt-token");
    let mut login = app.login_view_model();
    login.login("goku@dragonball.com", "kamehameha");
    login.wait().await;
    assert_eq!(login.state(), &LoginState::Ready);
    assert_eq!(app.splash_view_model().state(), SplashState::Logged);

    transport.push_json(200, fixtures::hero_json());
    let heros = app.get_heros().run("").await.unwrap();
    assert_eq!(heros.len(), 5);

    let requests = transport.requests();
    assert_eq!(
      requests[0].url.as_str(),
      "https://dragonball.keepcoding.education/api/auth/login"
    );
    assert!(requests[0]
      .header("Authorization")
      .is_some_and(|h| h.starts_with("Basic ")));
    assert_eq!(requests[1].header("Authorization"), Some("Bearer jwt-token"));
  }

  #[tokio::test]
  async fn test_hero_detail_loads_from_three_endpoints() {
    let (app, transport) = app();
    app.session.set(b"jwt-token").unwrap();

    transport.push_json(
      200,
      serde_json::to_value(vec![fixtures::hero_dtos().remove(0)]).unwrap(),
    );
    transport.push_json(200, serde_json::to_value(fixtures::goku_transformation_dtos()).unwrap());
    transport.push_json(200, serde_json::json!([]));

    let mut vm = app.hero_view_model();
    vm.load("Goku");
    vm.wait().await;

    let HeroState::Ready(detail) = vm.state() else {
      panic!("expected ready, got {:?}", vm.state());
    };
    assert_eq!(detail.hero.identifier, fixtures::GOKU_ID);
    assert_eq!(detail.transformations.len(), 2);
    assert!(detail.locations.is_empty());
    assert_eq!(transport.call_count(), 3);
  }

  #[tokio::test]
  async fn test_logout_wipes_store() {
    let (app, transport) = app();
    app.session.set(b"jwt-token").unwrap();
    transport.push_json(200, fixtures::hero_json());
    app.get_heros().run("").await.unwrap();

    app.logout().run().unwrap();

    assert!(app.store.counts().unwrap().is_empty());
    assert_eq!(app.session.get().unwrap(), None);
    assert_eq!(app.logout().run(), Err(crate::domain::AppError::Session));
  }
}
