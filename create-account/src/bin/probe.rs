use std::{path::PathBuf, rc::Rc};

use create_account::{
    args::{parse_args, required, Arg},
    config::{default_config_path, Config, ConfigError},
    logger::{parse_log_level, setup_logger},
    Error, HostNavigation, InMemorySessionStore, NavigationDecision, RegistrationController, Renderer,
    WebsiteDataType, VERSION,
};

/// Renderer printing what a real web view would do.
struct ConsoleRenderer {
    session: Rc<InMemorySessionStore>,
}

impl Renderer for ConsoleRenderer {
    fn load(&mut self, url: &str) {
        println!("load {}", url);
        if let Some(host) = url::Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
            self.session.insert(host, WebsiteDataType::Cookies);
        }
    }

    fn safe_area_bottom_inset(&self) -> f64 {
        0.0
    }

    fn set_content_inset_bottom(&mut self, _inset: f64) {}
}

struct ConsoleHost;

impl HostNavigation for ConsoleHost {
    type Context = String;

    fn dismiss(&mut self) {
        println!("dismiss");
    }

    fn enclosing_navigation_context(&self) -> Option<String> {
        Some("console".to_string())
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::from_file(&path),
        None => match default_config_path().and_then(|p| Config::from_file(&p)) {
            Err(ConfigError::NotFound) => Ok(Config::default()),
            res => res,
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().collect(), VERSION)?;

    let mut config_path = None;
    let mut environment = None;
    let mut product = None;
    let mut cancel = false;
    let mut urls = Vec::new();
    for arg in args {
        match arg {
            Arg::ConfigPath(path) => config_path = Some(path),
            Arg::Environment(env) => environment = Some(env),
            Arg::Product(name) => product = Some(name),
            Arg::Cancel => cancel = true,
            Arg::Url(url) => urls.push(url),
        }
    }

    let product = required(product, "--product")?;

    let mut config = load_config(config_path)?;
    if environment.is_some() {
        config.environment = environment;
    }

    let log_level = match parse_log_level()? {
        Some(level) => level,
        None => config.log_level()?,
    };
    setup_logger(log_level, None)?;

    let target = config
        .target(&product)
        .ok_or(Error::UnknownProduct(product))?;

    let session = Rc::new(InMemorySessionStore::new());
    let mut renderer = ConsoleRenderer {
        session: session.clone(),
    };
    let mut controller = RegistrationController::new(target, ConsoleHost, session.clone())
        .with_completion(|context| println!("completed in {:?}", context));

    controller.present(&mut renderer);
    controller.initial_load_complete();

    for url in &urls {
        let decision = controller.navigation_decision(Some(url.as_str()), &mut renderer);
        println!(
            "{} {}",
            match decision {
                NavigationDecision::Allow => "allow",
                NavigationDecision::Cancel => "cancel",
            },
            url
        );
        if decision == NavigationDecision::Allow {
            renderer.load(url);
        }
    }

    if cancel {
        controller.cancel();
        println!("{} web session records left", session.len());
    }

    if let Some(outcome) = controller.outcome() {
        println!("outcome: {:?}", outcome);
    }

    Ok(())
}
