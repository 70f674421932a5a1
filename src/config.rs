use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::layout::LayoutConfig;
use crate::session::SessionOptions;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            engine: EngineConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;
    const HOST_VAR: &'static str = "LOAD_LAYOUT_API_HOST";
    const PORT_VAR: &'static str = "LOAD_LAYOUT_API_PORT";

    fn from_env() -> Self {
        let host_value = env_string(Self::HOST_VAR).unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, display_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                eprintln!(
                    "⚠️ Could not parse {} ('{}'): {}. Using {}.",
                    Self::HOST_VAR,
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (
                    IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                    Self::DEFAULT_HOST.to_string(),
                )
            }
        };

        let port = env_string(Self::PORT_VAR)
            .and_then(|raw| parse_port(&raw, Self::PORT_VAR))
            .unwrap_or(Self::DEFAULT_PORT);

        Self {
            bind_ip,
            display_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }

    /// Checks whether the hostname matches the default value.
    pub fn uses_default_host(&self) -> bool {
        self.display_host == Self::DEFAULT_HOST
    }
}

/// Configuration of the layout engine: thresholds and default session locks.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    layout: LayoutConfig,
    session: SessionOptions,
}

impl EngineConfig {
    const SPACING_VAR: &'static str = "LOAD_LAYOUT_SPACING";
    const WEIGHT_WARN_VAR: &'static str = "LOAD_LAYOUT_WEIGHT_WARN_RATIO";
    const DIMENSION_WARN_VAR: &'static str = "LOAD_LAYOUT_DIMENSION_WARN_RATIO";
    const BALANCE_VAR: &'static str = "LOAD_LAYOUT_BALANCE_THRESHOLD_PERCENT";
    const ALLOW_Y_AXIS_VAR: &'static str = "LOAD_LAYOUT_ALLOW_Y_AXIS";
    const ALLOW_ROTATION_VAR: &'static str = "LOAD_LAYOUT_ALLOW_ROTATION";

    fn from_env() -> Self {
        let spacing = load_f64_with_warning(
            Self::SPACING_VAR,
            LayoutConfig::DEFAULT_SPACING,
            |value| value >= 0.0,
            "must not be negative",
            "Warning: Adjusted item spacing changes sequential placement",
        );

        let weight_warn_ratio = load_f64_with_warning(
            Self::WEIGHT_WARN_VAR,
            LayoutConfig::DEFAULT_WEIGHT_WARN_RATIO,
            |value| (0.0..=1.0).contains(&value),
            "must be between 0 and 1",
            "Warning: Adjusted weight warning threshold",
        );

        let dimension_warn_ratio = load_f64_with_warning(
            Self::DIMENSION_WARN_VAR,
            LayoutConfig::DEFAULT_DIMENSION_WARN_RATIO,
            |value| (0.0..=1.0).contains(&value),
            "must be between 0 and 1",
            "Warning: Adjusted length/width warning threshold",
        );

        let balance_threshold_percent = load_f64_with_warning(
            Self::BALANCE_VAR,
            LayoutConfig::DEFAULT_BALANCE_THRESHOLD_PERCENT,
            |value| value > 0.0 && value <= 100.0,
            "must be greater than 0 and at most 100",
            "Warning: Adjusted balance threshold may accept lopsided loads",
        );

        let layout = LayoutConfig::builder()
            .spacing(spacing)
            .weight_warn_ratio(weight_warn_ratio)
            .dimension_warn_ratio(dimension_warn_ratio)
            .balance_threshold_percent(balance_threshold_percent)
            .build();

        let session = SessionOptions {
            allow_y_axis: load_bool(Self::ALLOW_Y_AXIS_VAR, false),
            allow_rotation: load_bool(Self::ALLOW_ROTATION_VAR, false),
            read_only: false,
        };

        Self { layout, session }
    }

    pub fn new(layout: LayoutConfig, session: SessionOptions) -> Self {
        Self { layout, session }
    }

    /// Returns the configured LayoutConfig.
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout
    }

    /// Default locks for new sessions.
    pub fn session_options(&self) -> SessionOptions {
        self.session
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}

fn parse_port(raw: &str, var_name: &str) -> Option<u16> {
    match raw.parse::<u16>() {
        Ok(0) => {
            eprintln!("⚠️ {} must not be 0. Using default port.", var_name);
            None
        }
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!(
                "⚠️ Could not parse {} ('{}'): {}. Using default port.",
                var_name, raw, err
            );
            None
        }
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            eprintln!(
                "⚠️ Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}

fn load_bool(var_name: &str, default: bool) -> bool {
    env_string(var_name)
        .and_then(|raw| parse_bool(&raw, var_name))
        .unwrap_or(default)
}

fn load_f64_with_warning(
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
    warning: &str,
) -> f64 {
    let Some(raw) = env_string(var_name) else {
        return default;
    };
    parse_f64_with_warning(&raw, var_name, default, validator, invalid_hint, warning)
}

fn parse_f64_with_warning(
    raw: &str,
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
    warning: &str,
) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) if !validator(value) => {
            eprintln!(
                "⚠️ {} contains invalid value '{}': {}. Using {}.",
                var_name, raw, invalid_hint, default
            );
            default
        }
        Ok(value) => {
            let tolerance = (default.abs().max(1.0)) * 1e-9;
            if (value - default).abs() > tolerance {
                println!("⚠️ {} ({} = {}).", warning, var_name, value);
            }
            value
        }
        Err(err) => {
            eprintln!(
                "⚠️ Could not parse {} ('{}') as number: {}. Using {}.",
                var_name, raw, err, default
            );
            default
        }
    }
}
