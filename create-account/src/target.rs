use std::fmt;

use crate::environment::ApiEnvironment;

/// Signup products with a preset registration target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Drive,
    Mail,
    Euria,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::Drive, Product::Mail, Product::Euria];

    /// Name of the product in the signup URL.
    pub fn signup_name(&self) -> &'static str {
        match self {
            Product::Drive => "ikdrive",
            Product::Mail => "ikmail",
            Product::Euria => "euria",
        }
    }

    pub fn additional_path(&self) -> &'static str {
        match self {
            Product::Drive | Product::Mail => "?app=true",
            Product::Euria => "/myksuite",
        }
    }

    /// Find a product either by its short alias (`drive`) or its signup name (`ikdrive`).
    pub fn from_name(name: &str) -> Option<Product> {
        Product::ALL
            .into_iter()
            .find(|p| p.to_string() == name || p.signup_name() == name)
    }

    pub fn target(&self, deployment_host: &str) -> RegistrationTarget {
        RegistrationTarget::with_default_landing(
            self.signup_name(),
            self.additional_path(),
            deployment_host,
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Drive => write!(f, "drive"),
            Product::Mail => write!(f, "mail"),
            Product::Euria => write!(f, "euria"),
        }
    }
}

/// Which signup flow to run and the hosts that end it.
///
/// Every derived string is computed once, from a single deployment host, when
/// the target is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationTarget {
    name: String,
    target_url: String,
    landing_host: String,
    login_host: String,
}

impl RegistrationTarget {
    pub fn new(
        name: impl Into<String>,
        landing_host: impl Into<String>,
        additional_path: &str,
        deployment_host: &str,
    ) -> Self {
        let name = name.into();
        let target_url = format!(
            "https://welcome.{}/signup/{}{}",
            deployment_host, name, additional_path
        );
        Self {
            name,
            target_url,
            landing_host: normalize_host(&landing_host.into()),
            login_host: normalize_host(&format!("login.{}", deployment_host)),
        }
    }

    /// Target landing on the kSuite umbrella host shared by several products.
    pub fn with_default_landing(
        name: impl Into<String>,
        additional_path: &str,
        deployment_host: &str,
    ) -> Self {
        Self::new(
            name,
            default_landing_host(deployment_host),
            additional_path,
            deployment_host,
        )
    }

    pub fn drive(env: &ApiEnvironment) -> Self {
        Product::Drive.target(env.host())
    }

    pub fn mail(env: &ApiEnvironment) -> Self {
        Product::Mail.target(env.host())
    }

    pub fn euria(env: &ApiEnvironment) -> Self {
        Product::Euria.target(env.host())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn landing_host(&self) -> &str {
        &self.landing_host
    }

    pub fn login_host(&self) -> &str {
        &self.login_host
    }
}

/// Hosts are compared with the ones `url::Url` extracts from navigations, so
/// they go through the same parser: ASCII lowercased, IDNA to punycode.
fn normalize_host(host: &str) -> String {
    url::Host::parse(host)
        .map(|h| h.to_string())
        .unwrap_or_else(|_| host.to_ascii_lowercase())
}

pub fn default_landing_host(deployment_host: &str) -> String {
    format!("ksuite.{}", deployment_host)
}
