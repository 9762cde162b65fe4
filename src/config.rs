use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Dashboard web server.
#[derive(Debug, Clone, Parser)]
#[command(name = "kosis-dashboard", version, about)]
pub struct ServerArgs {
    /// Survey table to serve (.csv, .json or .parquet).
    #[arg(long, env = "KOSIS_DATA", default_value = "kosis_data.csv")]
    pub data: PathBuf,

    /// Interface to listen on.
    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "DASHBOARD_PORT", default_value_t = 8050)]
    pub port: u16,

    /// Verbose logging, including every selection request.
    #[arg(long, env = "DASHBOARD_DEBUG")]
    pub debug: bool,
}

impl ServerArgs {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid host address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Desktop viewer.
#[derive(Debug, Clone, Parser)]
#[command(name = "kosis-desktop", version, about)]
pub struct DesktopArgs {
    /// Survey table to open at startup.
    #[arg(env = "KOSIS_DATA")]
    pub data: Option<PathBuf>,

    /// TrueType/OpenType font with Hangul glyphs. Common system Korean fonts
    /// are tried when unset.
    #[arg(long, env = "DASHBOARD_FONT")]
    pub font: Option<PathBuf>,

    #[arg(long, env = "DASHBOARD_DEBUG")]
    pub debug: bool,
}

/// Install the `env_logger` backend. `RUST_LOG` wins; otherwise `info`, or
/// `debug` for this crate when the debug flag is on.
pub fn init_logging(debug: bool) {
    let default_filter = if debug {
        "info,kosis_dashboard=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let args = ServerArgs::try_parse_from(["kosis-dashboard"]).unwrap();
        assert!(!args.debug);
        assert_eq!(args.socket_addr().unwrap().port(), args.port);
    }

    #[test]
    fn server_flags() {
        let args = ServerArgs::try_parse_from([
            "kosis-dashboard",
            "--data",
            "survey.parquet",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--debug",
        ])
        .unwrap();
        assert!(args.debug);
        assert_eq!(args.data, PathBuf::from("survey.parquet"));
        assert_eq!(args.socket_addr().unwrap().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn bad_host_is_an_error() {
        let args =
            ServerArgs::try_parse_from(["kosis-dashboard", "--host", "not an ip"]).unwrap();
        assert!(args.socket_addr().is_err());
    }

    #[test]
    fn desktop_path_is_positional() {
        let args = DesktopArgs::try_parse_from(["kosis-desktop", "kosis_data.csv"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("kosis_data.csv")));
    }

    #[test]
    fn desktop_font_flag() {
        let args = DesktopArgs::try_parse_from([
            "kosis-desktop",
            "--font",
            "/usr/share/fonts/NanumGothic.ttf",
        ])
        .unwrap();
        assert_eq!(args.font, Some(PathBuf::from("/usr/share/fonts/NanumGothic.ttf")));
    }
}
