use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;

use dbheroes::app::App;
use dbheroes::config::Config;
use dbheroes::domain::usecases::Logout;
use dbheroes::domain::{Hero, Location, Transformation};
use dbheroes::logging;
use dbheroes::presentation::{
  HeroState, HerosState, LoginState, SplashState, TransformationState,
};

#[derive(Parser, Debug)]
#[command(name = "dbheroes")]
#[command(about = "Browse Dragon Ball heroes, cached locally")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/dbheroes/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Keep the store and session in memory for this run only
  #[arg(long, global = true)]
  ephemeral: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Exchange credentials for a session token
  Login {
    #[arg(short, long)]
    email: String,
    /// Falls back to DBHEROES_PASSWORD
    #[arg(short, long)]
    password: Option<String>,
  },
  /// Forget the session token and wipe cached data
  Logout,
  /// Show session and cache state
  Status,
  /// List heroes
  Heroes {
    /// Exact hero name
    #[arg(short, long, default_value = "")]
    name: String,
    /// Re-sort the stored heroes by name
    #[arg(short, long)]
    sort: Option<Sort>,
  },
  /// Show a hero with its transformations and locations
  Hero { name: String },
  /// List transformations of a hero
  Transformations { hero_id: String },
  /// Show one cached transformation
  Transformation { id: String },
  /// List locations of a hero
  Locations { hero_id: String },
  /// Delete every cached hero, transformation and location
  ClearCache,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sort {
  Asc,
  Desc,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let config = Config::load(args.config.as_deref())?;
  let log_dir = if args.ephemeral {
    config.ephemeral_log_dir()
  } else {
    config.log_dir()?
  };
  let _guard = logging::init(&log_dir, &config.log.level)?;

  match &config.source {
    Some(path) => tracing::debug!(path = %path.display(), "Loaded configuration"),
    None => tracing::debug!("No configuration file found, using defaults"),
  }

  let app = App::new(config, args.ephemeral)?;

  match args.command {
    Command::Login { email, password } => {
      let password = match password {
        Some(p) => p,
        None => Config::get_password()?,
      };

      let mut vm = app.login_view_model();
      vm.login(&email, &password);
      vm.wait().await;

      match vm.state() {
        LoginState::Ready => println!("Logged in as {}", email),
        LoginState::InlineError(field) => return Err(eyre!("{}", field)),
        LoginState::FullScreenError(reason) => return Err(eyre!("{}", reason)),
        state => return Err(eyre!("Login did not finish: {:?}", state)),
      }
    }

    Command::Logout => {
      app.logout().run()?;
      println!("Logged out");
    }

    Command::Status => {
      let session = match app.splash_view_model().state() {
        SplashState::Logged => "logged in",
        SplashState::Login => "logged out",
      };
      let counts = app.store.counts()?;
      println!("Session:         {}", session);
      println!("API:             {}://{}", app.config.api.scheme, app.config.api.host);
      println!("Heroes:          {}", counts.heros);
      println!("Transformations: {}", counts.transformations);
      println!("Locations:       {}", counts.locations);
    }

    Command::Heroes { name, sort } => {
      let mut vm = app.heros_view_model();
      vm.load(&name);
      vm.wait().await;

      let loaded = matches!(vm.state(), HerosState::Ready);
      if let (true, Some(sort)) = (loaded, sort) {
        vm.sort(matches!(sort, Sort::Asc));
      }

      match vm.state() {
        HerosState::Ready => vm.heros().iter().for_each(print_hero),
        HerosState::Error(reason) => return Err(eyre!("{}", reason)),
        state => return Err(eyre!("Heroes did not load: {:?}", state)),
      }
    }

    Command::Hero { name } => {
      let mut vm = app.hero_view_model();
      vm.load(&name);
      vm.wait().await;

      match vm.state() {
        HeroState::Ready(detail) => {
          print_hero(&detail.hero);
          if let Some(info) = &detail.hero.info {
            println!("\n{}", info);
          }
          println!("\nTransformations:");
          detail.transformations.iter().for_each(print_transformation);
          println!("\nLocations:");
          detail.locations.iter().for_each(print_location);
        }
        HeroState::Error(reason) => return Err(eyre!("{}", reason)),
        state => return Err(eyre!("Hero did not load: {:?}", state)),
      }
    }

    Command::Transformations { hero_id } => {
      let result = app.get_transformations().fetch(&hero_id).await?;
      tracing::info!(source = ?result.source, count = result.data.len(), "Transformations");
      result.data.iter().for_each(print_transformation);
    }

    Command::Transformation { id } => {
      let mut vm = app.transformation_view_model();
      vm.load(&id);

      match vm.state() {
        TransformationState::Ready(transformation) => {
          print_transformation(transformation);
          println!("  hero: {}", transformation.hero.display_name());
          if let Some(info) = &transformation.info {
            println!("\n{}", info);
          }
        }
        TransformationState::Error(reason) => return Err(eyre!("{}", reason)),
        state => return Err(eyre!("Transformation did not load: {:?}", state)),
      }
    }

    Command::Locations { hero_id } => {
      let result = app.get_locations().fetch(&hero_id).await?;
      tracing::info!(source = ?result.source, count = result.data.len(), "Locations");
      result.data.iter().for_each(print_location);
    }

    Command::ClearCache => {
      app.store.clear()?;
      println!("Cache cleared");
    }
  }

  Ok(())
}

fn print_hero(hero: &Hero) {
  let star = if hero.is_favorite() { "*" } else { " " };
  println!("{} {:<12} {}", star, hero.display_name(), hero.identifier);
}

fn print_transformation(transformation: &Transformation) {
  println!(
    "  {:<40} {}",
    transformation.name.as_deref().unwrap_or("-"),
    transformation.identifier
  );
}

fn print_location(location: &Location) {
  let date = location
    .date
    .map(|d| d.format("%Y-%m-%d").to_string())
    .unwrap_or_else(|| "-".to_string());
  match location.coordinate() {
    Some((latitude, longitude)) => {
      println!("  {}  {:>11.6} {:>11.6}  {}", date, latitude, longitude, location.identifier)
    }
    None => println!("  {}  {:>23}  {}", date, "-", location.identifier),
  }
}
