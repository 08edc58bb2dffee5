use std::{fs, fs::File, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use time::OffsetDateTime;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use spendlens::{
    CampaignQuery, Error, ExpenseQuery, build_campaigns_view, build_expenses_view,
    export::{write_campaigns_csv, write_expenses_csv},
    format::{currency, percent},
    paginate::{DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE, PageIndicator, PageInfo,
        page_indicators},
    record::{campaigns_from_json, expenses_from_json},
    series::Series,
    sort::{SortDirection, SortState},
    timezone,
};

/// Which dataset a record file contains.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dataset {
    Expenses,
    Campaigns,
}

/// Terminal dashboard for spendlens record batches.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON record batch.
    #[arg(long)]
    records: PathBuf,

    /// Which dataset the record file contains.
    #[arg(long, value_enum, default_value = "expenses")]
    dataset: Dataset,

    /// Substring search over the dataset's text fields.
    #[arg(long, default_value = "")]
    search: String,

    /// Selected expense category.
    #[arg(long)]
    category: Option<String>,

    /// Selected expense region tag.
    #[arg(long)]
    region: Option<String>,

    /// Selected campaign location.
    #[arg(long)]
    location: Option<String>,

    /// Date window keyword (all, today, yesterday, last7, this-month,
    /// last-month, this-year). Expenses only.
    #[arg(long, default_value = "all")]
    window: String,

    /// Quick filter keyword (all, high-performing, high-spend). Campaigns
    /// only.
    #[arg(long, default_value = "all")]
    quick: String,

    /// Sort column keyword. Defaults to the dataset's most relevant column.
    #[arg(long)]
    sort: Option<String>,

    /// Sort ascending instead of the default descending.
    #[arg(long)]
    ascending: bool,

    /// The 1-indexed page to show.
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// How many records per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u64,

    /// Canonical timezone for the "today" snapshot, e.g. Asia/Kolkata.
    /// Defaults to UTC.
    #[arg(long)]
    timezone: Option<String>,

    /// Write the filtered set to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> ExitCode {
    setup_logging();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let env_filter = filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    let today = match &args.timezone {
        Some(timezone) => timezone::local_today(timezone)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let bytes = fs::read(&args.records).map_err(|error| {
        Error::RecordFile(args.records.display().to_string(), error.to_string())
    })?;

    let direction = if args.ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    match args.dataset {
        Dataset::Expenses => run_expenses(&args, &bytes, direction, today),
        Dataset::Campaigns => run_campaigns(&args, &bytes, direction),
    }
}

fn run_expenses(
    args: &Args,
    bytes: &[u8],
    direction: SortDirection,
    today: time::Date,
) -> Result<(), Error> {
    let records = expenses_from_json(bytes)?;
    tracing::info!("loaded {} expense records", records.len());

    let sort = SortState {
        key: match &args.sort {
            Some(keyword) => keyword.parse()?,
            None => Default::default(),
        },
        direction,
    };
    let query = ExpenseQuery {
        search: args.search.clone(),
        category: args.category.clone(),
        region: args.region.clone(),
        window: args.window.parse()?,
        sort,
        page: args.page,
        page_size: args.page_size,
    };

    let view = build_expenses_view(&records, &query, today);

    println!("Expenses: {} records match", view.totals.count);
    println!("  total: {}", currency(view.totals.total));
    println!("  largest: {}", currency(view.totals.largest));
    println!("  spent today: {}", currency(view.totals.today));
    println!();

    print_series("By region", &view.by_region);
    print_series("By category", &view.by_category);
    print_series("Top recipients", &view.top_recipients);

    println!(
        "{:<12} {:>12}  {:<24} {:<20} {:<12} {}",
        "Date", "Amount", "Paid to", "Reason", "User", "Region"
    );
    for record in &view.page {
        println!(
            "{:<12} {:>12}  {:<24} {:<20} {:<12} {}",
            record.date,
            currency(record.amount),
            record.paid_to,
            record.reason,
            record.user_name(),
            record.region.join("; "),
        );
    }
    print_pager(&view.page_info);

    if let Some(path) = &args.export {
        let file =
            File::create(path).map_err(|error| Error::CsvExport(error.to_string()))?;
        write_expenses_csv(file, &view.filtered)?;
        tracing::info!("wrote {} records to {}", view.filtered.len(), path.display());
    }

    Ok(())
}

fn run_campaigns(args: &Args, bytes: &[u8], direction: SortDirection) -> Result<(), Error> {
    let records = campaigns_from_json(bytes)?;
    tracing::info!("loaded {} campaign records", records.len());

    let sort = SortState {
        key: match &args.sort {
            Some(keyword) => keyword.parse()?,
            None => Default::default(),
        },
        direction,
    };
    let query = CampaignQuery {
        search: args.search.clone(),
        location: args.location.clone(),
        quick: args.quick.parse()?,
        sort,
        page: args.page,
        page_size: args.page_size,
    };

    let view = build_campaigns_view(&records, &query);

    println!("Campaigns: {} records match", view.totals.count);
    println!("  cost (excl. GST): {}", currency(view.totals.cost_without_gst));
    println!("  cost (incl. GST): {}", currency(view.totals.cost_with_gst));
    println!("  clicks: {}", view.totals.clicks);
    println!("  impressions: {}", view.totals.impressions);
    println!("  average CPC: {}", currency(view.totals.average_cpc));
    println!("  average CTR: {}", percent(view.totals.average_ctr));
    println!();

    print_series("Cost by location", &view.cost_by_location);
    print_series("Top campaigns", &view.top_campaigns);

    println!(
        "{:<28} {:<16} {:>14} {:>10} {:>12} {:>10} {:>8}",
        "Campaign", "Location", "Cost", "Clicks", "Impressions", "CPC", "CTR"
    );
    for row in &view.page {
        println!(
            "{:<28} {:<16} {:>14} {:>10} {:>12} {:>10} {:>8}",
            row.record.name,
            row.record.location,
            currency(row.record.cost_without_gst),
            row.record.clicks(),
            row.record.impressions(),
            currency(row.metrics.cpc),
            percent(row.metrics.ctr),
        );
    }
    print_pager(&view.page_info);

    if let Some(path) = &args.export {
        let file =
            File::create(path).map_err(|error| Error::CsvExport(error.to_string()))?;
        write_campaigns_csv(file, &view.filtered)?;
        tracing::info!("wrote {} records to {}", view.filtered.len(), path.display());
    }

    Ok(())
}

fn print_series(title: &str, series: &Series) {
    if series.is_empty() {
        return;
    }

    println!("{title}:");
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("  {label:<24} {}", currency(*value));
    }
    println!();
}

fn print_pager(info: &PageInfo) {
    if info.total_pages <= 1 {
        return;
    }

    let pager = page_indicators(info, DEFAULT_MAX_VISIBLE_PAGES)
        .iter()
        .map(|indicator| match indicator {
            PageIndicator::Back(_) => "«".to_owned(),
            PageIndicator::Page(page) => page.to_string(),
            PageIndicator::Current(page) => format!("[{page}]"),
            PageIndicator::Ellipsis => "…".to_owned(),
            PageIndicator::Next(_) => "»".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    println!("Page {} of {}: {pager}", info.page_number, info.total_pages);
}
