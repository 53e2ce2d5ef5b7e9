use serde::Deserialize;

use crate::domain::Templates;

const DEFAULT_SERVER_IP: &str = "app.cloopen.com";
const DEFAULT_SERVER_PORT: u16 = 8883;
const DEFAULT_SOFT_VERSION: &str = "2013-12-26";
const DEFAULT_UTC_OFFSET_HOURS: i8 = 8;

/// Account and endpoint settings for [`CloopenClient`](crate::CloopenClient).
///
/// Deserializes from the `cloopen` table of an application configuration. Keys are
/// snake_case; the camelCase spellings used by older Cloopen configs are accepted as
/// aliases. Only the account identifier, secret, and application id are required.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(alias = "accountSid", alias = "accountsid")]
    pub account_sid: String,
    #[serde(alias = "accountToken", alias = "accounttoken")]
    pub account_token: String,
    #[serde(alias = "appId", alias = "appid")]
    pub app_id: String,
    #[serde(default = "default_server_ip", alias = "serverIP", alias = "serverip")]
    pub server_ip: String,
    #[serde(
        default = "default_server_port",
        alias = "serverPort",
        alias = "serverport"
    )]
    pub server_port: u16,
    #[serde(
        default = "default_soft_version",
        alias = "softVersion",
        alias = "softversion"
    )]
    pub soft_version: String,
    #[serde(default, alias = "displayNum", alias = "displaynum")]
    pub display_num: String,
    #[serde(default, alias = "playTimes", alias = "playtimes")]
    pub play_times: String,
    #[serde(default, alias = "maxCallTime", alias = "maxcalltime")]
    pub max_call_time: String,
    #[serde(default)]
    pub templates: Templates,
    /// Clock zone of the provider, used to render the signing timestamp.
    #[serde(
        default = "default_utc_offset_hours",
        alias = "utcOffsetHours",
        alias = "utcoffsethours"
    )]
    pub utc_offset_hours: i8,
}

impl ClientConfig {
    /// Config table read by [`ClientConfig::from_config`].
    pub const TABLE: &'static str = "cloopen";

    /// Settings for the public Cloopen endpoint with no templates registered.
    pub fn new(
        account_sid: impl Into<String>,
        account_token: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            account_token: account_token.into(),
            app_id: app_id.into(),
            server_ip: default_server_ip(),
            server_port: DEFAULT_SERVER_PORT,
            soft_version: default_soft_version(),
            display_num: String::new(),
            play_times: String::new(),
            max_call_time: String::new(),
            templates: Templates::new(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }

    /// Register a template name → id mapping.
    pub fn template(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.templates.insert(name, id);
        self
    }

    /// Read the `cloopen` table from a loaded configuration.
    pub fn from_config(config: &config::Config) -> Result<Self, config::ConfigError> {
        config.get::<Self>(Self::TABLE)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account_sid", &self.account_sid)
            .field("account_token", &"***")
            .field("app_id", &self.app_id)
            .field("server_ip", &self.server_ip)
            .field("server_port", &self.server_port)
            .field("soft_version", &self.soft_version)
            .field("display_num", &self.display_num)
            .field("play_times", &self.play_times)
            .field("max_call_time", &self.max_call_time)
            .field("templates", &self.templates)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .finish()
    }
}

fn default_server_ip() -> String {
    DEFAULT_SERVER_IP.to_owned()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_soft_version() -> String {
    DEFAULT_SOFT_VERSION.to_owned()
}

fn default_utc_offset_hours() -> i8 {
    DEFAULT_UTC_OFFSET_HOURS
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn from_config_applies_defaults() {
        let source = r#"
        {
          "cloopen": {
            "account_sid": "sid",
            "account_token": "token",
            "app_id": "app",
            "templates": { "login": "100001" }
          }
        }
        "#;
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Json))
            .build()
            .unwrap();

        let parsed = ClientConfig::from_config(&config).unwrap();
        assert_eq!(parsed.account_sid, "sid");
        assert_eq!(parsed.server_ip, "app.cloopen.com");
        assert_eq!(parsed.server_port, 8883);
        assert_eq!(parsed.soft_version, "2013-12-26");
        assert_eq!(parsed.utc_offset_hours, 8);
        assert_eq!(parsed.templates.get("login"), Some("100001"));
    }

    #[test]
    fn from_config_reports_missing_table() {
        let config = Config::builder().build().unwrap();
        assert!(ClientConfig::from_config(&config).is_err());
    }

    #[test]
    fn from_config_reads_camel_case_keys() {
        let source = r#"
        [cloopen]
        accountSid = "sid"
        accountToken = "token"
        appId = "app"
        serverIP = "sandboxapp.cloopen.com"
        serverPort = 8884
        softVersion = "2014-06-30"
        displayNum = "400"
        playTimes = "2"
        maxCallTime = "60"
        utcOffsetHours = 0
        "#;
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap();

        let parsed = ClientConfig::from_config(&config).unwrap();
        assert_eq!(parsed.account_sid, "sid");
        assert_eq!(parsed.account_token, "token");
        assert_eq!(parsed.app_id, "app");
        assert_eq!(parsed.server_ip, "sandboxapp.cloopen.com");
        assert_eq!(parsed.server_port, 8884);
        assert_eq!(parsed.soft_version, "2014-06-30");
        assert_eq!(parsed.display_num, "400");
        assert_eq!(parsed.play_times, "2");
        assert_eq!(parsed.max_call_time, "60");
        assert_eq!(parsed.utc_offset_hours, 0);
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let json = r#"
        {
          "accountSid": "sid",
          "accountToken": "token",
          "appId": "app",
          "serverIP": "sandboxapp.cloopen.com",
          "serverPort": 8883,
          "displayNum": "400",
          "playTimes": "2",
          "maxCallTime": "60"
        }
        "#;
        let parsed: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.server_ip, "sandboxapp.cloopen.com");
        assert_eq!(parsed.display_num, "400");
        assert_eq!(parsed.play_times, "2");
        assert_eq!(parsed.max_call_time, "60");
        assert!(parsed.templates.is_empty());
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new("sid", "super-secret", "app");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("sid"));
    }
}
