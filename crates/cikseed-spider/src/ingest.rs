//! The seeding run: create the schema, resolve the CIKs, then fetch and persist each company
//! in turn.
//!
//! Only setup is fatal. Once ingestion starts, a company that fails to fetch or to persist is
//! logged and skipped; nothing is retried.

use crate::error::IngestError;
use crate::fetcher::MetadataFetcher;
use crate::resolver::ResolutionPlan;
use crate::storage::{Header, Storage};
use chrono::{DateTime, Utc};
use colored::Colorize;
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Bootstrapping,
    Resolving,
    Ingesting,
    Done,
    Aborted,
}

/// A CIK dropped during ingestion, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub cik: String,
    pub reason: String,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped CIK {}: {}", self.cik, self.reason)
    }
}

/// Tally of one run. Failures here never fail the run itself.
#[derive(Clone, Debug)]
pub struct IngestReport {
    pub resolved: usize,
    pub persisted: usize,
    pub fetch_failures: usize,
    pub persist_failures: usize,
    /// Every failed CIK, in processing order.
    pub skipped: Vec<Skipped>,
    pub started: DateTime<Utc>,
    pub elapsed: Duration,
}

impl IngestReport {
    fn start(resolved: usize) -> Self {
        Self {
            resolved,
            persisted: 0,
            fetch_failures: 0,
            persist_failures: 0,
            skipped: Vec::new(),
            started: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failures(&self) -> usize {
        self.fetch_failures + self.persist_failures
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} CIKs resolved, {} companies persisted, {} fetch failures, {} persist failures \
            (started {}, took {:?})",
            self.resolved,
            self.persisted,
            self.fetch_failures,
            self.persist_failures,
            self.started.format("%Y-%m-%d %H:%M:%S UTC"),
            self.elapsed
        )
    }
}

/// Drives a seeding run against an injected [`Storage`] and [`MetadataFetcher`].
pub struct Ingestion<S, F> {
    storage: S,
    fetcher: F,
    headers: Vec<Header>,
    bootstrap: bool,
    tui: bool,
    phase: Phase,
}

impl<S, F> Ingestion<S, F>
where
    S: Storage,
    F: MetadataFetcher,
{
    pub fn new(storage: S, fetcher: F) -> Self {
        Self {
            storage,
            fetcher,
            headers: Header::statements(),
            bootstrap: true,
            tui: false,
            phase: Phase::Bootstrapping,
        }
    }

    /// Headers seeded right after the schema is created.
    pub fn with_headers(mut self, headers: Vec<Header>) -> Self {
        self.headers = headers;
        self
    }

    /// Run against a schema that already exists.
    pub fn skip_bootstrap(mut self) -> Self {
        self.bootstrap = false;
        self
    }

    /// Print banners and a progress bar instead of relying on the tracing output.
    pub fn tui(mut self, tui: bool) -> Self {
        self.tui = tui;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Create the schema and seed the statement headers.
    pub async fn bootstrap(&mut self) -> Result<(), IngestError> {
        self.enter(Phase::Bootstrapping);
        self.banner("Schema");

        if let Err(err) = self.storage.initialize_schema().await {
            error!("failed to create the schema, error({err})");
            return Err(self.abort(IngestError::Bootstrap(err)));
        }

        let mut failed = None;
        for header in &self.headers {
            if let Err(err) = self.storage.insert_header(header).await {
                error!("failed to insert header {:?}, error({err})", header.keywords());
                failed = Some(err);
                break;
            }
        }
        if let Some(err) = failed {
            return Err(self.abort(IngestError::Bootstrap(err)));
        }
        debug!("schema created, {} headers seeded", self.headers.len());

        if self.tui {
            println!("creating schema ... {}\n", "done".green());
        }
        Ok(())
    }

    /// The whole run. Errors only for a failed bootstrap or a failed CIK source.
    pub async fn run(&mut self, plan: &ResolutionPlan) -> Result<IngestReport, IngestError> {
        let time = std::time::Instant::now();

        if self.bootstrap {
            self.bootstrap().await?;
        }

        self.enter(Phase::Resolving);
        self.banner("CIKs");
        let ciks = match plan.resolve().await {
            Ok(ciks) => ciks,
            Err(err) => return Err(self.abort(err.into())),
        };
        info!("resolved {} CIKs", ciks.len());
        if self.tui {
            println!("resolving CIKs ... {} ({})\n", "done".green(), ciks.len());
        }

        self.enter(Phase::Ingesting);
        self.banner("Companies");
        let mut report = self.ingest(&ciks).await;
        report.elapsed = time.elapsed();

        self.enter(Phase::Done);
        info!("ingestion finished: {report}");
        if self.tui {
            let failures = report.failures().to_string();
            println!(
                "collecting companies ... {} ({} persisted, {} failed)\n",
                "done".green(),
                report.persisted,
                if report.failures() > 0 { failures.red() } else { failures.normal() }
            );
        }

        Ok(report)
    }

    async fn ingest(&mut self, ciks: &[String]) -> IngestReport {
        let mut report = IngestReport::start(ciks.len());
        let pb = progress_bar(ciks.len(), self.tui);

        // strictly one company at a time, in resolution order
        let mut stream = stream::iter(ciks);
        while let Some(cik) = stream.next().await {
            pb.inc(1);

            let company = match self.fetcher.fetch(cik).await {
                Ok(company) => company,
                Err(err) => {
                    error!("failed to fetch company, error({err})");
                    report.fetch_failures += 1;
                    skip(&mut report, &pb, cik, err.to_string());
                    continue;
                }
            };
            pb.set_message(company.name.clone());

            match self.storage.insert_company(&company).await {
                Ok(id) => {
                    trace!("persisted {} [{}] as company {id}", company.name, company.cik);
                    report.persisted += 1;
                }
                Err(err) => {
                    error!(
                        "failed to insert company {} [{}], error({err})",
                        company.name, company.cik
                    );
                    report.persist_failures += 1;
                    skip(&mut report, &pb, cik, err.to_string());
                }
            }
        }

        pb.finish_and_clear();
        report
    }

    fn enter(&mut self, phase: Phase) {
        trace!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn abort(&mut self, err: IngestError) -> IngestError {
        match std::error::Error::source(&err) {
            Some(source) => error!("aborting during {:?}: {err}, error({source})", self.phase),
            None => error!("aborting during {:?}: {err}", self.phase),
        }
        self.phase = Phase::Aborted;
        err
    }

    fn banner(&self, name: &str) {
        if self.tui {
            println!("{bar}\n{name:^40}\n{bar}", bar = "=".repeat(40));
        }
    }
}

// a hidden bar drops the line, so this only prints in tui mode
fn skip(report: &mut IngestReport, pb: &ProgressBar, cik: &str, reason: String) {
    let skipped = Skipped {
        cik: cik.to_string(),
        reason,
    };
    pb.println(format!("{}", skipped.to_string().red()));
    report.skipped.push(skipped);
}

fn progress_bar(len: usize, tui: bool) -> ProgressBar {
    if !tui {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(
            "{msg} {spinner:.magenta}\n\
            [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
            [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    let pb = ProgressBar::new(len as u64).with_style(style);
    pb.set_message("collecting companies ...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
