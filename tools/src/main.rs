//! dash-runner: makes sure the dashboard tables exist, then reports on them.
//!
//! Usage:
//!   dash-runner --data-dir ./data --region North --start 2024-01-01
//!   dash-runner --config gen.json --seed 7 --regenerate
//!   dash-runner --data-dir ./data --ipc-mode

use anyhow::Result;
use bizdash_core::{
    config::GeneratorConfig,
    dashboard::{Dashboard, DashboardView, DEFAULT_TOP_N},
    filter::DashboardFilter,
    loader::{self, LoadOutcome},
    store::DataStore,
    types::Labelled,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    View {
        #[serde(default)]
        region: Option<String>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        end: Option<String>,
        #[serde(default)]
        top: Option<usize>,
    },
    Options,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = arg_str(&args, "--data-dir").unwrap_or(".");
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let json = has_flag(&args, "--json");
    let top_n = parse_arg(&args, "--top", DEFAULT_TOP_N)?;

    let mut config = match arg_str(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;

    let store = DataStore::open(data_dir);
    let dataset = if has_flag(&args, "--regenerate") {
        loader::regenerate(&store, &config)?
    } else {
        let (dataset, outcome) = loader::load_or_generate(&store, &config)?;
        if !ipc_mode && !json {
            match outcome {
                LoadOutcome::Loaded => println!("Using existing data files in {data_dir}"),
                LoadOutcome::Generated => println!("Generated sample data in {data_dir}"),
            }
        }
        dataset
    };
    let dashboard = Dashboard::new(dataset);

    if ipc_mode {
        return run_ipc_loop(&dashboard);
    }

    let filter = DashboardFilter::from_labels(
        arg_str(&args, "--region"),
        arg_str(&args, "--category"),
        arg_str(&args, "--start"),
        arg_str(&args, "--end"),
    )?;
    let view = dashboard.view(&filter, top_n)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_summary(&view);
    }
    Ok(())
}

/// One JSON request per stdin line, one JSON reply per stdout line.
fn run_ipc_loop(dashboard: &Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_request(dashboard, &buffer)? {
            Some(reply) => writeln!(stdout, "{reply}")?,
            None => break,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Answer one request line. `None` means the client asked to quit.
/// Bad requests and bad filters get an `{"error": ...}` reply.
fn handle_request(dashboard: &Dashboard, line: &str) -> Result<Option<String>> {
    let request: IpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Unparseable request: {e}");
            return Ok(Some(error_json(&e).to_string()));
        }
    };

    let reply = match request {
        IpcRequest::Quit => return Ok(None),
        IpcRequest::Options => serde_json::to_string(&dashboard.options())?,
        IpcRequest::View { region, category, start, end, top } => {
            let view = DashboardFilter::from_labels(
                region.as_deref(),
                category.as_deref(),
                start.as_deref(),
                end.as_deref(),
            )
            .and_then(|filter| dashboard.view(&filter, top.unwrap_or(DEFAULT_TOP_N)));
            match view {
                Ok(view) => serde_json::to_string(&view)?,
                Err(e) => error_json(&e).to_string(),
            }
        }
    };
    Ok(Some(reply))
}

fn error_json(e: &dyn std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn print_summary(view: &DashboardView) {
    let s = &view.summary;
    println!();
    println!("=== KEY METRICS ===");
    println!("  total revenue:      ${:.0}", s.total_revenue);
    println!("  active customers:   {}", s.customer_count);
    match s.avg_satisfaction {
        Some(v) => println!("  satisfaction:       {v:.1}/10"),
        None => println!("  satisfaction:       n/a"),
    }
    match s.avg_profit_margin {
        Some(v) => println!("  average margin:     {:.1}%", v * 100.0),
        None => println!("  average margin:     n/a"),
    }

    println!();
    println!("=== FILTER ===");
    println!("  region:   {}", view.filter.region.map_or("all", |r| r.label()));
    println!("  category: {}", view.filter.category.map_or("all", |c| c.label()));
    println!(
        "  dates:    {} .. {}",
        view.filter.start.map_or("start".to_string(), |d| d.to_string()),
        view.filter.end.map_or("end".to_string(), |d| d.to_string())
    );
    println!(
        "  matched:  {} transactions, ${:.2}",
        view.filtered_transactions, view.filtered_revenue
    );

    println!();
    println!("=== REGIONAL LEADERS ===");
    if view.regional_leaders.is_empty() {
        println!("  (no matching sales)");
    }
    for r in &view.regional_leaders {
        println!(
            "  {:<6} | Total: ${:>12.0} | Avg: ${:>6.0} | Txns: {}",
            r.region.label(),
            r.total_sales,
            r.avg_transaction,
            r.transaction_count
        );
    }

    println!();
    println!("=== SALES BY CATEGORY ===");
    for g in &view.category_sales {
        println!("  {:<14} ${:.0}", g.key.label(), g.total);
    }

    println!();
    println!("=== SALES BY SEGMENT ===");
    for g in &view.segment_sales {
        println!("  {:<9} ${:.0}", g.key.label(), g.total);
    }

    println!();
    println!("=== TOP PRODUCTS ===");
    for (rank, p) in view.top_products.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} ${:>10.0} | {:>4} units | {:.1}% | {:.1}*",
            rank + 1,
            p.name,
            p.revenue,
            p.units_sold,
            p.profit_margin * 100.0,
            p.rating
        );
    }

    println!();
    println!("=== SATISFACTION BY SEGMENT ===");
    for s in &view.satisfaction_by_segment {
        println!(
            "  {:<9} n={:<5} median {:.1} (q1 {:.1}, q3 {:.1}) mean {:.2}",
            s.segment.label(),
            s.count,
            s.median,
            s.q1,
            s.q3,
            s.mean
        );
    }
}

fn arg_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// `default` when the flag is absent; an error when its value does not parse.
fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> Result<T> {
    match arg_str(args, flag) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid value for {flag}: '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdash_core::{generator::DataGenerator, types::Day};

    fn small_dashboard() -> Dashboard {
        let config = GeneratorConfig {
            end_date: Day::from_ymd_opt(2023, 1, 10).unwrap(),
            num_customers: 20,
            ..GeneratorConfig::default()
        };
        Dashboard::new(DataGenerator::new(config).unwrap().generate().unwrap())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    fn reply(dashboard: &Dashboard, line: &str) -> serde_json::Value {
        let text = handle_request(dashboard, line).unwrap().expect("a reply line");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn malformed_request_gets_error_reply() {
        let dash = small_dashboard();
        let json = reply(&dash, "{not json");
        assert!(json["error"].is_string());

        // The next request is still served.
        let json = reply(&dash, r#"{"type":"options"}"#);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn unknown_request_type_gets_error_reply() {
        let dash = small_dashboard();
        assert!(reply(&dash, r#"{"type":"refresh"}"#)["error"].is_string());
    }

    #[test]
    fn bad_filter_gets_error_reply() {
        let dash = small_dashboard();
        let json = reply(&dash, r#"{"type":"view","region":"Central"}"#);
        assert!(json["error"].as_str().unwrap().contains("Central"));

        let json = reply(&dash, r#"{"type":"view","start":"2023-02-01","end":"2023-01-01"}"#);
        assert!(json["error"].is_string());
    }

    #[test]
    fn view_request_applies_filter_and_top() {
        let dash = small_dashboard();
        let json = reply(&dash, r#"{"type":"view","region":"North","category":"all","top":3}"#);
        assert_eq!(json["filter"]["region"], "North");
        assert_eq!(json["top_products"].as_array().unwrap().len(), 3);
        assert!(json["daily_sales"].as_array().unwrap().len() <= 10);
    }

    #[test]
    fn options_lists_date_bounds() {
        let dash = small_dashboard();
        let json = reply(&dash, r#"{"type":"options"}"#);
        assert_eq!(json["first_date"], "2023-01-01");
        assert_eq!(json["last_date"], "2023-01-10");
    }

    #[test]
    fn quit_ends_the_session() {
        let dash = small_dashboard();
        assert!(handle_request(&dash, r#"{"type":"quit"}"#).unwrap().is_none());
    }

    #[test]
    fn flag_values_parse_or_fail() {
        let a = args(&["dash-runner", "--seed", "7", "--top", "x"]);
        assert_eq!(parse_arg(&a, "--seed", 42u64).unwrap(), 7);
        assert!(parse_arg(&a, "--top", 10usize).is_err());
        assert_eq!(parse_arg(&a, "--missing", 5u64).unwrap(), 5);

        let bad_seed = args(&["dash-runner", "--seed", "abc"]);
        assert!(parse_arg(&bad_seed, "--seed", 42u64).is_err());
    }
}
