use crate::cli::{Extraction, Source, SourceArgs};
use crate::config::Settings;
use cikseed_spider::fetcher::SecFetcher;
use cikseed_spider::http::{build_client, HttpClient};
use cikseed_spider::ingest::Ingestion;
use cikseed_spider::resolver::{CellExtraction, ConstituentScrape, ResolutionPlan, StaticList};
use cikseed_spider::storage::PgStorage;
use tracing::{debug, error, info, trace};

/// Run the seeding pipeline; `bootstrap` creates the schema first.
pub(crate) async fn run(
    settings: &Settings,
    args: &SourceArgs,
    bootstrap: bool,
    tui: bool,
) -> anyhow::Result<()> {
    let time = std::time::Instant::now();

    let (mut ingestion, http_client) = connect(settings, tui).await?;
    if !bootstrap {
        ingestion = ingestion.skip_bootstrap();
    }

    let plan = plan(settings, args, http_client);
    let report = ingestion.run(&plan).await?;

    if report.failures() > 0 {
        info!(
            "{} of {} CIKs were skipped; see the errors above",
            report.failures(),
            report.resolved
        );
    }
    info!("seeding finished, time elapsed: {:?}", time.elapsed());

    Ok(())
}

/// Create the schema and seed the statement headers only.
pub(crate) async fn schema(settings: &Settings, tui: bool) -> anyhow::Result<()> {
    let (mut ingestion, _) = connect(settings, tui).await?;
    ingestion.bootstrap().await?;
    info!("schema created");
    Ok(())
}

async fn connect(
    settings: &Settings,
    tui: bool,
) -> anyhow::Result<(Ingestion<PgStorage, SecFetcher>, HttpClient)> {
    trace!("building http client");
    let http_client = build_client(&settings.user_agent, settings.timeout).map_err(|err| {
        error!("failed to build http client, error({err})");
        err
    })?;

    trace!("connecting to the database ...");
    let storage = PgStorage::connect(&settings.database).await?;
    debug!("database connection established");

    let fetcher = SecFetcher::new(http_client.clone())
        .with_base_url(&settings.submissions_url)
        .with_delay(settings.delay);

    Ok((Ingestion::new(storage, fetcher).tui(tui), http_client))
}

fn plan(settings: &Settings, args: &SourceArgs, http_client: HttpClient) -> ResolutionPlan {
    let extraction = match args.extraction {
        Extraction::Structured => CellExtraction::Structured,
        Extraction::Positional => CellExtraction::Positional,
    };
    let scrape = || {
        ConstituentScrape::new(http_client.clone(), &settings.constituents_url)
            .with_extraction(extraction)
    };

    let plan = match args.source {
        Source::Static => ResolutionPlan::new().source(StaticList::sp500()),
        Source::Scrape => ResolutionPlan::new().source(scrape()),
        Source::All => ResolutionPlan::new()
            .source(StaticList::sp500())
            .source(scrape()),
    };

    if args.keep_duplicates {
        plan.keep_duplicates()
    } else {
        plan
    }
}
