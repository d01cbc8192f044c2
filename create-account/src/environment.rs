use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Environment variable holding a custom deployment host. Takes precedence
/// over [`ENV_VAR_NAME`].
pub const HOST_VAR_NAME: &str = "CREATE_ACCOUNT_HOST";
/// Environment variable selecting a named deployment (`prod` or `preprod`).
pub const ENV_VAR_NAME: &str = "CREATE_ACCOUNT_ENV";

const PROD_HOST: &str = "infomaniak.com";
const PREPROD_HOST: &str = "preprod.dev.infomaniak.ch";

/// The deployment the signup flow is served from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    #[default]
    Prod,
    Preprod,
    Custom(String),
}

impl ApiEnvironment {
    /// Resolve the active environment from the process environment.
    ///
    /// A custom host set through [`HOST_VAR_NAME`] wins, then the named
    /// deployment of [`ENV_VAR_NAME`]. Unknown names fall back to `Prod`.
    pub fn current() -> Self {
        Self::resolve(
            std::env::var(HOST_VAR_NAME).ok(),
            std::env::var(ENV_VAR_NAME).ok(),
        )
    }

    fn resolve(host: Option<String>, name: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            return ApiEnvironment::Custom(host.trim().to_string());
        }
        match name.as_deref().map(str::trim) {
            None | Some("") | Some("prod") => ApiEnvironment::Prod,
            Some("preprod") => ApiEnvironment::Preprod,
            Some(other) => {
                tracing::warn!(
                    "Unknown {} value '{}', using the production environment",
                    ENV_VAR_NAME,
                    other
                );
                ApiEnvironment::Prod
            }
        }
    }

    /// The deployment host every derived hostname is built upon.
    pub fn host(&self) -> &str {
        match self {
            ApiEnvironment::Prod => PROD_HOST,
            ApiEnvironment::Preprod => PREPROD_HOST,
            ApiEnvironment::Custom(host) => host,
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiEnvironment::Prod => write!(f, "prod"),
            ApiEnvironment::Preprod => write!(f, "preprod"),
            ApiEnvironment::Custom(host) => write!(f, "{}", host),
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("empty environment".to_string()),
            "prod" => Ok(ApiEnvironment::Prod),
            "preprod" => Ok(ApiEnvironment::Preprod),
            host if host.contains(char::is_whitespace) || host.contains('/') => {
                Err(format!("'{}' is not a valid host", host))
            }
            host => Ok(ApiEnvironment::Custom(host.to_string())),
        }
    }
}

impl Serialize for ApiEnvironment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ApiEnvironment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiEnvironment::from_str(&s).map_err(de::Error::custom)
    }
}
