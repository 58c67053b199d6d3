use std::sync::Arc;

use crate::domain::usecases::GetTransformation;
use crate::domain::Transformation;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformationState {
  Idle,
  Ready(Transformation),
  Error(String),
}

/// Single stored transformation. The lookup is local, so it runs inline.
pub struct TransformationViewModel {
  get_transformation: Arc<dyn GetTransformation>,
  state: TransformationState,
}

impl TransformationViewModel {
  pub fn new(get_transformation: Arc<dyn GetTransformation>) -> Self {
    Self {
      get_transformation,
      state: TransformationState::Idle,
    }
  }

  pub fn state(&self) -> &TransformationState {
    &self.state
  }

  pub fn load(&mut self, identifier: &str) {
    self.state = match self.get_transformation.run(identifier) {
      Ok(transformation) => TransformationState::Ready(transformation),
      Err(e) => TransformationState::Error(e.reason()),
    };
  }
}
