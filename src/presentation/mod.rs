//! View models driven from the CLI.
//!
//! Each view model owns the use cases it needs and exposes a plain state
//! enum. Async work is spawned through [`Query`] and only applied to the
//! view model when the owner calls `poll` or `wait`.

mod hero;
mod heros;
mod login;
pub mod query;
mod splash;
mod transformation;

pub use hero::{HeroDetail, HeroState, HeroViewModel};
pub use heros::{HerosState, HerosViewModel};
pub use login::{LoginState, LoginViewModel};
pub use query::{Query, QueryState};
pub use splash::{SplashState, SplashViewModel};
pub use transformation::{TransformationState, TransformationViewModel};
