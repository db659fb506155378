//! Connection parameters for the table store.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

use crate::error::StoreError;

/// Default PostgreSQL port, used when `account` carries no `:port` suffix.
pub const DEFAULT_PORT: u16 = 5432;

/// Credentials and location of the survey table.
///
/// Passed explicitly to [`crate::PgSurveyStore::new`]; nothing in this
/// crate reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub user: String,
    pub password: String,
    /// Account identifier: `host` or `host:port`.
    pub account: String,
    /// Compute resource the session is attributed to. Sent as the
    /// connection's `application_name`; empty means unset.
    pub warehouse: String,
    pub database: String,
    /// Schema holding `survey_responses`, applied as the `search_path`.
    pub schema: String,
}

impl StoreConfig {
    /// Split `account` into host and port.
    pub fn host_and_port(&self) -> Result<(&str, u16), StoreError> {
        let account = self.account.trim();
        if account.is_empty() {
            return Err(StoreError::InvalidConfig(
                "account must not be empty".to_string(),
            ));
        }

        match account.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    StoreError::InvalidConfig(format!("invalid port in account '{account}'"))
                })?;
                Ok((host, port))
            }
            None => Ok((account, DEFAULT_PORT)),
        }
    }

    /// Build the options every store connection is opened with.
    pub fn connect_options(&self) -> Result<PgConnectOptions, StoreError> {
        let (host, port) = self.host_and_port()?;

        let mut options = PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database);

        if !self.schema.is_empty() {
            options = options.options([("search_path", self.schema.as_str())]);
        }
        if !self.warehouse.is_empty() {
            options = options.application_name(&self.warehouse);
        }

        Ok(options)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("account", &self.account)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config(account: &str) -> StoreConfig {
        StoreConfig {
            user: "survey".into(),
            password: "hunter2".into(),
            account: account.into(),
            warehouse: "survey_wh".into(),
            database: "workshop".into(),
            schema: "public".into(),
        }
    }

    #[test]
    fn account_without_port_uses_default() {
        let cfg = config("db.example.com");
        assert_eq!(cfg.host_and_port().unwrap(), ("db.example.com", DEFAULT_PORT));
    }

    #[test]
    fn account_with_port_is_split() {
        let cfg = config("db.example.com:6543");
        assert_eq!(cfg.host_and_port().unwrap(), ("db.example.com", 6543));
    }

    #[test]
    fn bad_port_is_rejected() {
        assert_matches!(
            config("db.example.com:http").host_and_port(),
            Err(StoreError::InvalidConfig(_))
        );
        assert_matches!(config("  ").connect_options(), Err(StoreError::InvalidConfig(_)));
    }

    #[test]
    fn connect_options_carry_location() {
        let options = config("db.example.com:6543").connect_options().unwrap();
        assert_eq!(options.get_host(), "db.example.com");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "survey");
        assert_eq!(options.get_database(), Some("workshop"));
        assert_eq!(options.get_application_name(), Some("survey_wh"));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", config("db.example.com"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }
}
