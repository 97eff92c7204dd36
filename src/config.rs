use std::net::IpAddr;
use std::path::PathBuf;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub cooldown_secs: u64,
    pub static_dir: Option<PathBuf>,
    pub site_url: Option<String>,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub security: SmtpSecurity,
    pub timeout_secs: u64,
    pub from: String,
    pub from_name: Option<String>,
    pub recipient: String,
    pub subject: String,
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmtpSecurity {
    /// Implicit TLS from the first byte (usually port 465).
    Ssl,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    Tls,
}

impl std::str::FromStr for SmtpSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssl" => Ok(SmtpSecurity::Ssl),
            "tls" => Ok(SmtpSecurity::Tls),
            other => Err(format!("unknown security mode '{other}', expected 'ssl' or 'tls'")),
        }
    }
}

pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("CONTACT_RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_HOST: {e}"))?;

        let port: u16 = env_or("CONTACT_RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_PORT: {e}"))?;

        let max_body_size: usize = env_or("CONTACT_RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("CONTACT_RELAY_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid CONTACT_RELAY_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cooldown_secs = parse_cooldown_secs(&env_or("CONTACT_RELAY_COOLDOWN_SECS", "60"))
            .map_err(|e| format!("Invalid CONTACT_RELAY_COOLDOWN_SECS: {e}"))?;

        let static_dir = env_opt("CONTACT_RELAY_STATIC_DIR").map(PathBuf::from);
        let site_url = env_opt("CONTACT_RELAY_SITE_URL");
        let log_level = env_or("CONTACT_RELAY_LOG_LEVEL", "info");

        let smtp = match (
            env_opt("CONTACT_RELAY_SMTP_HOST"),
            env_opt("CONTACT_RELAY_SMTP_PORT"),
            env_opt("CONTACT_RELAY_SMTP_USER"),
            env_opt("CONTACT_RELAY_SMTP_PASS"),
            env_opt("CONTACT_RELAY_MAIL_FROM"),
            env_opt("CONTACT_RELAY_MAIL_RECIPIENT"),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from), Some(recipient)) => {
                Some(SmtpConfig {
                    host,
                    port: port
                        .parse()
                        .map_err(|e| format!("Invalid CONTACT_RELAY_SMTP_PORT: {e}"))?,
                    user,
                    pass,
                    security: env_or("CONTACT_RELAY_SMTP_SECURITY", "ssl")
                        .parse()
                        .map_err(|e| format!("Invalid CONTACT_RELAY_SMTP_SECURITY: {e}"))?,
                    timeout_secs: env_or("CONTACT_RELAY_SMTP_TIMEOUT_SECS", "30")
                        .parse()
                        .map_err(|e| format!("Invalid CONTACT_RELAY_SMTP_TIMEOUT_SECS: {e}"))?,
                    from,
                    from_name: env_opt("CONTACT_RELAY_MAIL_FROM_NAME"),
                    recipient,
                    subject: env_or("CONTACT_RELAY_MAIL_SUBJECT", DEFAULT_SUBJECT),
                })
            }
            _ => None,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            trusted_proxies,
            cooldown_secs,
            static_dir,
            site_url,
            log_level,
            smtp,
        })
    }
}

/// Parse a cooldown window in seconds. It must fit a unix timestamp delta.
pub fn parse_cooldown_secs(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
    i64::try_from(secs).map_err(|_| format!("{secs} exceeds {}", i64::MAX))?;
    Ok(secs)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
