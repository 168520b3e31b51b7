//! Pipeline: load, validate, and report each named log set in turn.
//!
//! The first failure aborts the run; no partial results are produced. The
//! chart context is passed in by the caller so nothing here is global.

use arqlog_core::{
    config::Config,
    extract::{extract_file, ExtractStats, MatchSpec},
    validate, ArqlogError, DelaySink, Result, Side, TimeSeries,
};

/// The extracted server and client series for one name.
#[derive(Debug, Clone)]
pub struct LogSet {
    pub name: String,
    pub server: TimeSeries,
    pub client: TimeSeries,
    pub server_stats: ExtractStats,
    pub client_stats: ExtractStats,
}

/// Fail with [`ArqlogError::MissingInput`] when no names were given.
pub fn require_names(names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(ArqlogError::MissingInput);
    }
    Ok(())
}

/// Compiled server and client specs for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline<'c> {
    config: &'c Config,
    server: MatchSpec,
    client: MatchSpec,
}

impl<'c> Pipeline<'c> {
    pub fn new(config: &'c Config) -> Result<Self> {
        Ok(Self {
            config,
            server: MatchSpec::from_config(Side::Server, config)?,
            client: MatchSpec::from_config(Side::Client, config)?,
        })
    }

    /// Extract both files of the log set `name`.
    pub fn load(&self, name: &str) -> Result<LogSet> {
        let (server, server_stats) = self.load_side(Side::Server, name)?;
        let (client, client_stats) = self.load_side(Side::Client, name)?;
        tracing::info!(
            name,
            server = server.len(),
            client = client.len(),
            "log set loaded"
        );
        Ok(LogSet {
            name: name.to_string(),
            server,
            client,
            server_stats,
            client_stats,
        })
    }

    fn load_side(&self, side: Side, name: &str) -> Result<(TimeSeries, ExtractStats)> {
        let (path, spec) = match side {
            Side::Server => (self.config.server_log(name), &self.server),
            Side::Client => (self.config.client_log(name), &self.client),
        };
        let (series, stats) = extract_file(&path, spec)?;
        if stats.malformed > 0 {
            tracing::warn!(
                path = %path.display(),
                %side,
                malformed = stats.malformed,
                "lines matched both patterns but their timestamps did not parse; skipped"
            );
        }
        Ok((series, stats))
    }

    /// Load, validate, and report every name in order.
    ///
    /// `inspect` sees each log set after extraction and before validation.
    pub fn run<S, F>(&self, names: &[String], sink: &mut S, mut inspect: F) -> Result<()>
    where
        S: DelaySink,
        F: FnMut(&LogSet),
    {
        require_names(names)?;

        for name in names {
            let set = self.load(name)?;
            inspect(&set);

            validate(&set.server, &set.client).map_err(|source| ArqlogError::Validation {
                name: name.clone(),
                source,
            })?;

            sink.report(&set.server, &set.client, name);
        }
        Ok(())
    }
}
