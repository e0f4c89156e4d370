use sconfig::Specification;
use std::io::{self, Write};
use std::time::Duration;

/// Everything the demo reads from `DEMO_*` variables, flags and defaults.
#[derive(Debug, Default, Specification)]
pub(crate) struct Settings {
    /// Interface to bind
    #[sconfig(default = "127.0.0.1", flag = "host")]
    pub(crate) host: String,
    /// Port to listen on
    #[sconfig(default = "8080", flag = "port,p")]
    pub(crate) port: u16,
    /// Worker threads
    #[sconfig(default = "4", flag = "workers,w")]
    pub(crate) workers: usize,
    /// Request timeout, e.g. 30s or 1m
    #[sconfig(default = "30s", flag = "timeout")]
    pub(crate) timeout: Duration,
    /// Comma-separated list of allowed origins
    #[sconfig(flag = "origins")]
    pub(crate) origins: Vec<String>,
    /// Log level or filter directive
    #[sconfig(default = "info", flag = "log-level,l")]
    pub(crate) log_level: String,
    /// Emit logs as JSON
    #[sconfig(default = "false", flag = "log-json")]
    pub(crate) log_json: bool,
    /// Directory for rolling log files
    #[sconfig(flag = "log-dir")]
    pub(crate) log_dir: String,
    /// Rolling log files to keep
    #[sconfig(default = "10", flag = "log-files")]
    pub(crate) log_files: usize,
    /// Disable console logging
    #[sconfig(flag = "quiet,q")]
    pub(crate) quiet: bool,
}

impl Settings {
    /// Writes the bound settings as `key = value` lines.
    pub(crate) fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "host = {}", self.host)?;
        writeln!(out, "port = {}", self.port)?;
        writeln!(out, "workers = {}", self.workers)?;
        writeln!(out, "timeout = {:?}", self.timeout)?;
        writeln!(out, "origins = {}", self.origins.join(","))?;
        writeln!(out, "log_level = {}", self.log_level)?;
        writeln!(out, "log_json = {}", self.log_json)?;
        writeln!(out, "log_dir = {}", self.log_dir)?;
        writeln!(out, "log_files = {}", self.log_files)?;
        writeln!(out, "quiet = {}", self.quiet)
    }
}
